//! # Estimate Calculations
//!
//! The engine runs three stages in order:
//!
//! 1. [`geometry`] - areas, perimeter and window count from the dimensions
//! 2. [`line_items`] - one priced line per applicable rule
//! 3. [`aggregate`] - material subtotal, labor, contingency, total
//!
//! [`Estimator`] ties them together. Like every calculation in this crate
//! it follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, ...)` - Pure calculation function
//!
//! Estimation cannot fail, so `calculate` returns the result directly.

pub mod aggregate;
pub mod estimate;
pub mod geometry;
pub mod line_items;

// Re-export commonly used types
pub use aggregate::CostSummary;
pub use estimate::{calculate, EstimateInput, EstimateResult, Estimator};
pub use geometry::Geometry;
pub use line_items::{LineCategory, LineItem, LineRule, QuantityFormat, LINE_RULES};
