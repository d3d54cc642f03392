//! # Rigsmith Planner
//!
//! Budget-driven build generation and checkout totals.
//!
//! The generator spends a budget greedily across categories using a fixed
//! allocation table per [`UseCase`](rigsmith_core::UseCase), keeping every
//! pick compatible with what was chosen before it.
//!
//! ```rust
//! use rigsmith_core::{Catalog, Category, Component, UseCase};
//! use rigsmith_planner::{generate_build, summarize_price};
//!
//! let catalog = Catalog::new().with_options(
//!     Category::Gpu,
//!     vec![
//!         Component::new("rx7600", Category::Gpu, "Radeon RX 7600", 259.0),
//!         Component::new("rtx4070", Category::Gpu, "GeForce RTX 4070", 549.0),
//!     ],
//! );
//!
//! let build = generate_build(800.0, UseCase::Gaming, &catalog).unwrap();
//! assert_eq!(build.get(Category::Gpu).unwrap().id, "rx7600");
//!
//! let summary = summarize_price(&build);
//! assert_eq!(summary.subtotal, 259.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod allocation;
pub mod generator;
pub mod pricing;

pub use allocation::{allocation_for, Allocation, BudgetProfile};
pub use generator::{generate_build, AllocationStep, BuildGenerator, GenerationPlan};
pub use pricing::{summarize_price, PriceCalculator, PriceSummary};
