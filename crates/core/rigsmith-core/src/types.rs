//! Core types for the rigsmith configurator
//!
//! Category tags, issue severities and the issue record produced by the
//! compatibility rules.

use crate::error::RigsmithError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Component slot in a build
///
/// Declaration order is the fixed tie-break priority used by the build
/// generator, so the derived `Ord` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Processor
    Cpu,
    /// Mainboard
    Motherboard,
    /// RAM kit
    Memory,
    /// SSD / HDD
    Storage,
    /// Power supply
    Psu,
    /// Chassis
    Case,
    /// Graphics card
    Gpu,
    /// CPU cooler (air or liquid)
    Cooling,
    /// Display
    Monitor,
}

impl Category {
    /// Every category, in generator priority order
    pub const ALL: [Category; 9] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Memory,
        Category::Storage,
        Category::Psu,
        Category::Case,
        Category::Gpu,
        Category::Cooling,
        Category::Monitor,
    ];

    /// Wire tag of the category
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Motherboard => "motherboard",
            Category::Memory => "memory",
            Category::Storage => "storage",
            Category::Psu => "psu",
            Category::Case => "case",
            Category::Gpu => "gpu",
            Category::Cooling => "cooling",
            Category::Monitor => "monitor",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RigsmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == tag)
            .ok_or_else(|| RigsmithError::invalid_input(format!("unknown category tag '{s}'")))
    }
}

/// Budget profile driving the build generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    /// GPU-heavy
    Gaming,
    /// CPU and memory heavy
    Productivity,
    /// Balanced CPU and GPU
    Streaming,
    /// No discrete GPU, includes a monitor
    Office,
    /// General-purpose split
    #[default]
    Default,
}

impl UseCase {
    /// Every use case
    pub const ALL: [UseCase; 5] = [
        UseCase::Gaming,
        UseCase::Productivity,
        UseCase::Streaming,
        UseCase::Office,
        UseCase::Default,
    ];

    /// Wire tag of the use case
    pub fn as_str(self) -> &'static str {
        match self {
            UseCase::Gaming => "gaming",
            UseCase::Productivity => "productivity",
            UseCase::Streaming => "streaming",
            UseCase::Office => "office",
            UseCase::Default => "default",
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UseCase {
    type Err = RigsmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        UseCase::ALL
            .into_iter()
            .find(|use_case| use_case.as_str() == tag)
            .ok_or_else(|| RigsmithError::UnknownUseCase(s.to_string()))
    }
}

/// Severity of a compatibility issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory; the build still works
    Warning,
    /// Blocking; the parts cannot be used together
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A reported compatibility problem
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    /// Description shown to the user
    pub message: String,
    /// How serious the problem is
    pub severity: Severity,
}

impl Issue {
    /// Create a blocking issue
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Create an advisory issue
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// Check if the issue blocks the build
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
