//! # Rigsmith Core
//!
//! Shared model for the rigsmith PC build configurator. The compatibility
//! and planner crates depend on the types defined here.
//!
//! ## Features
//!
//! - **Catalog model**: [`Component`] records with a weakly-typed attribute bag
//! - **Builds**: [`Build`] with pure `with_component` / `without_component` transitions
//! - **Issues**: [`Issue`] and the always-complete [`IssueMap`]
//! - **Error Handling**: [`RigsmithError`] and the [`Result`] alias
//! - **Configuration**: file + environment layering into [`ConfiguratorConfig`]
//! - **Telemetry**: `tracing-subscriber` setup
//!
//! ## Quick Start
//!
//! ```rust
//! use rigsmith_core::{Build, Category, Component};
//!
//! let cpu = Component::new("cpu-1", Category::Cpu, "Ryzen 5 7600", 199.0)
//!     .with_attr("socket", "AM5");
//! let build = Build::new().with_component(Category::Cpu, cpu).unwrap();
//! assert!(build.contains(Category::Cpu));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod build;
pub mod component;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export commonly used items
pub use build::{Build, IssueMap};
pub use component::{AttrValue, Catalog, Component};
pub use config::ConfiguratorConfig;
pub use error::{Result, RigsmithError};
pub use traits::Validatable;
pub use types::{Category, Issue, Severity, UseCase};

/// Version information for the rigsmith core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the rigsmith core library
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "rigsmith-core");
    }
}
