//! Core traits shared across rigsmith crates.

use crate::error::Result;

/// Trait for validatable objects
pub trait Validatable {
    /// Validate this object
    fn validate(&self) -> Result<()>;

    /// Check if this object is valid
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
