//! # Cost Aggregator
//!
//! Sums the breakdown and layers the markups. Contingency compounds on
//! labor: it is charged on materials plus labor, not on materials alone.

use serde::{Deserialize, Serialize};

use super::line_items::LineItem;
use crate::project::RateConfig;

/// Subtotal, markups, and grand total.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostSummary {
    pub material_subtotal: f64,
    pub labor_cost: f64,
    pub contingency_cost: f64,
    pub total: f64,
}

/// Aggregate priced lines under the given rates.
///
/// ```rust
/// use estimate_core::calculations::aggregate::aggregate;
/// use estimate_core::project::RateConfig;
///
/// let summary = aggregate(&[], &RateConfig::default());
/// assert_eq!(summary.total, 0.0);
/// ```
pub fn aggregate(lines: &[LineItem], rates: &RateConfig) -> CostSummary {
    let material_subtotal = lines.iter().fold(0.0, |acc, line| acc + line.cost);
    let labor_cost = material_subtotal * (rates.labor_rate_percent / 100.0);
    let subtotal = material_subtotal + labor_cost;
    let contingency_cost = subtotal * (rates.contingency_rate_percent / 100.0);

    CostSummary {
        material_subtotal,
        labor_cost,
        contingency_cost,
        total: subtotal + contingency_cost,
    }
}
