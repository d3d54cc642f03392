//! # Rigsmith Compat
//!
//! Compatibility checking for rigsmith builds.
//!
//! - [`resolver`]: reads logical attributes out of loosely shaped catalog records
//! - [`predicates`]: socket and memory-type matching
//! - [`rules`]: the ten cross-category rules
//! - [`CompatibilityEvaluator`]: runs the rules and builds an [`IssueMap`](rigsmith_core::IssueMap)
//! - [`CompatibilityFilter`]: narrows candidate lists for one category
//! - [`BuildSession`]: a build paired with its issues
//!
//! ```rust
//! use rigsmith_compat::evaluate_compatibility;
//! use rigsmith_core::{Build, Category, Component};
//!
//! let build = Build::new()
//!     .with_component(
//!         Category::Cpu,
//!         Component::new("cpu", Category::Cpu, "Ryzen 5 5600", 129.0).with_attr("socket", "AM4"),
//!     )
//!     .unwrap()
//!     .with_component(
//!         Category::Motherboard,
//!         Component::new("mb", Category::Motherboard, "B650", 149.0).with_attr("socket", "AM5"),
//!     )
//!     .unwrap();
//!
//! let issues = evaluate_compatibility(&build);
//! assert!(issues.has_errors());
//! assert_eq!(issues.for_category(Category::Cpu).len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod evaluator;
pub mod filter;
pub mod power;
pub mod predicates;
pub mod resolver;
pub mod rules;
pub mod session;

pub use evaluator::{evaluate_compatibility, CompatibilityEvaluator};
pub use filter::{filter_compatible_options, CompatibilityFilter};
pub use power::{estimate_power, PowerEstimate};
pub use predicates::{ram_compatible, sockets_compatible};
pub use resolver::Attribute;
pub use rules::{CompatibilityRule, Finding, Findings};
pub use session::BuildSession;
