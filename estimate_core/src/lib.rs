//! # estimate_core - Construction Cost Estimation Engine
//!
//! `estimate_core` is the computational heart of BuildCalc. It turns a
//! building's dimensions, a set of material categories, and labor and
//! contingency rates into an itemized, priced budget. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Total**: Bad numbers degrade to zero quantities, never to errors
//! - **Injected prices**: The price table is configuration handed to the
//!   engine, so alternate tables drop in without code changes
//! - **Table-driven**: Each line item is one row of a rule table
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::{Estimator, MaterialSelection, ProjectSpec, RateConfig};
//! use estimate_core::project::BuildingType;
//!
//! let project = ProjectSpec::new("Ranch", BuildingType::Residential, 60.0, 40.0, 10.0);
//! let result = Estimator::default().estimate(
//!     &project,
//!     &MaterialSelection::all(),
//!     &RateConfig::default(),
//! );
//!
//! // Serialize to JSON for display or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("Foundation Concrete"));
//! ```
//!
//! ## Modules
//!
//! - [`project`] - Building geometry, material selection, and rates
//! - [`pricing`] - Unit prices and building-type multipliers
//! - [`calculations`] - Geometry, line items, and cost aggregation
//! - [`report`] - Plain-text report rendering
//! - [`format`] - Currency and quantity formatting
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON loading and atomic report saves

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod format;
pub mod pricing;
pub mod project;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, EstimateInput, EstimateResult, Estimator, LineItem};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_estimate_input, load_price_table, save_report};
pub use pricing::PriceTable;
pub use project::{MaterialSelection, ProjectSpec, RateConfig};
pub use report::EstimateReport;
