//! Error handling types for the rigsmith workspace.
//!
//! Compatibility rules and attribute lookups never fail: missing data is
//! modelled as `None`. Errors are reserved for malformed requests (bad
//! budget, unknown use case), broken build invariants and configuration.

use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The main error type for the rigsmith workspace.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RigsmithError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Budget is not a positive, finite amount
    #[error("Invalid budget: {budget} (must be a positive amount)")]
    InvalidBudget {
        /// The rejected budget
        budget: f64,
    },

    /// Use-case tag with no allocation table
    #[error("Unknown use case: {0}")]
    UnknownUseCase(String),

    /// A component was placed in a slot for a different category
    #[error("Category mismatch: {found} component cannot occupy the {slot} slot")]
    CategoryMismatch {
        /// Slot the component was stored under
        slot: Category,
        /// Category declared by the component
        found: Category,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RigsmithError {
    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Self::Configuration(msg.to_string())
    }

    /// Create a new invalid input error
    pub fn invalid_input<T: fmt::Display>(msg: T) -> Self {
        Self::InvalidInput(msg.to_string())
    }

    /// Create a new serialization error
    pub fn serialization<T: fmt::Display>(msg: T) -> Self {
        Self::Serialization(msg.to_string())
    }

    /// Check if this error was caused by the caller's request
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::InvalidBudget { .. }
                | Self::UnknownUseCase(_)
                | Self::CategoryMismatch { .. }
        )
    }

    /// Check if this error came from configuration loading
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Result type alias for rigsmith operations
pub type Result<T> = std::result::Result<T, RigsmithError>;

impl From<serde_json::Error> for RigsmithError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err)
    }
}

impl From<toml::de::Error> for RigsmithError {
    fn from(err: toml::de::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}
