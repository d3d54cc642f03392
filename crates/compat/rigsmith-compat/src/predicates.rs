//! Socket and memory-type matching.
//!
//! Both predicates are total: missing or blank input is never a match.
//! Rules check presence first, so a `false` here from missing data does
//! not turn into a reported conflict.

/// Lowercase with all whitespace removed ("AM 4" -> "am4")
pub fn normalize_socket(socket: &str) -> String {
    socket
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Uppercase with all whitespace removed ("ddr 5" -> "DDR5")
pub fn normalize_memory_type(memory_type: &str) -> String {
    memory_type
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Exact match after normalization
pub fn sockets_compatible(a: Option<&str>, b: Option<&str>) -> bool {
    match (a.map(normalize_socket), b.map(normalize_socket)) {
        (Some(a), Some(b)) => !a.is_empty() && a == b,
        _ => false,
    }
}

/// The motherboard's declared type contains the RAM type ("DDR4/DDR5" accepts "DDR5")
pub fn ram_compatible(motherboard_type: Option<&str>, ram_type: Option<&str>) -> bool {
    match (
        motherboard_type.map(normalize_memory_type),
        ram_type.map(normalize_memory_type),
    ) {
        (Some(board), Some(ram)) => !board.is_empty() && !ram.is_empty() && board.contains(&ram),
        _ => false,
    }
}
