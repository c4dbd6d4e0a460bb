//! # Construction Cost Estimate
//!
//! Prices a building from its dimensions, a material selection, and
//! labor/contingency rates.
//!
//! ## Assumptions
//!
//! - Rectangular footprint, identical floors stacked vertically
//! - Foundation concrete covers the ground floor footprint only
//! - Roofing covers the top floor footprint plus a 15% overhang
//! - Wall-based materials (bricks, lumber, drywall, windows) cover the
//!   exterior wall area of every floor
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use estimate_core::calculations::Estimator;
//! use estimate_core::project::{BuildingType, MaterialSelection, ProjectSpec, RateConfig};
//!
//! let project = ProjectSpec::new("Ranch", BuildingType::Residential, 60.0, 40.0, 10.0);
//! let estimator = Estimator::default();
//!
//! let result = estimator.estimate(&project, &MaterialSelection::default(), &RateConfig::default());
//!
//! assert_eq!(result.line_items.len(), 2);
//! assert!((result.material_subtotal - 5014.44).abs() < 0.01);
//! assert!((result.total - 5791.68).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use super::aggregate::{aggregate, CostSummary};
use super::geometry::{resolve, Geometry};
use super::line_items::{price_lines, LineItem, LineRule, RuleContext, LINE_RULES};
use crate::pricing::PriceTable;
use crate::project::{MaterialSelection, ProjectSpec, RateConfig};

/// A complete estimate request.
///
/// ## JSON Example
///
/// ```json
/// {
///   "project": {
///     "name": "Smith Residence",
///     "building_type": "residential",
///     "length_ft": 60.0,
///     "width_ft": 40.0,
///     "wall_height_ft": 10.0,
///     "floors": 2,
///     "slab_thickness_in": 4.0,
///     "upper_floor_type": "wood_frame"
///   },
///   "materials": { "concrete": true, "roofing": true, "windows": true },
///   "rates": { "labor_rate_percent": 15.0, "contingency_rate_percent": 5.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateInput {
    pub project: ProjectSpec,
    pub materials: MaterialSelection,
    pub rates: RateConfig,
}

/// Priced breakdown and totals for one estimate.
///
/// Amounts are dollars at full precision; rounding is left to whoever
/// displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Priced lines in breakdown order
    pub line_items: Vec<LineItem>,

    /// Sum of all line costs
    pub material_subtotal: f64,

    /// Labor markup on materials
    pub labor_cost: f64,

    /// Contingency markup on materials plus labor
    pub contingency_cost: f64,

    /// Materials + labor + contingency
    pub total: f64,

    /// Footprint of one floor (sq ft)
    pub floor_area: f64,

    /// Floor area over all floors (sq ft)
    pub total_floor_area: f64,

    /// Exterior wall area over all floors (sq ft)
    pub total_wall_area: f64,

    /// Effective floor count
    pub floors: u32,
}

impl EstimateResult {
    /// Find a line by display name
    pub fn line(&self, name: &str) -> Option<&LineItem> {
        self.line_items.iter().find(|l| l.name == name)
    }

    /// Subtotal and markups as a [`CostSummary`]
    pub fn summary(&self) -> CostSummary {
        CostSummary {
            material_subtotal: self.material_subtotal,
            labor_cost: self.labor_cost,
            contingency_cost: self.contingency_cost,
            total: self.total,
        }
    }

    fn assemble(geometry: &Geometry, line_items: Vec<LineItem>, summary: CostSummary) -> Self {
        EstimateResult {
            line_items,
            material_subtotal: summary.material_subtotal,
            labor_cost: summary.labor_cost,
            contingency_cost: summary.contingency_cost,
            total: summary.total,
            floor_area: geometry.floor_area_sqft,
            total_floor_area: geometry.total_floor_area_sqft,
            total_wall_area: geometry.total_wall_area_sqft,
            floors: geometry.floors,
        }
    }
}

/// The estimation engine: a price table and a rule set.
///
/// Holds no state between calls; `estimate` is a pure function of its
/// arguments and the configuration given at construction.
#[derive(Debug, Clone)]
pub struct Estimator {
    prices: PriceTable,
    rules: &'static [LineRule],
}

impl Default for Estimator {
    fn default() -> Self {
        Estimator::new(PriceTable::default())
    }
}

impl Estimator {
    /// Engine over the standard rule table
    pub fn new(prices: PriceTable) -> Self {
        Estimator {
            prices,
            rules: &LINE_RULES,
        }
    }

    /// Engine over a custom rule table
    pub fn with_rules(prices: PriceTable, rules: &'static [LineRule]) -> Self {
        Estimator { prices, rules }
    }

    /// Price table in use
    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Run all three stages.
    pub fn estimate(
        &self,
        project: &ProjectSpec,
        selection: &MaterialSelection,
        rates: &RateConfig,
    ) -> EstimateResult {
        let geometry = resolve(project);
        let ctx = RuleContext {
            geometry: &geometry,
            selection,
            upper_floor_type: project.upper_floor_type,
        };
        let multiplier = self.prices.multiplier(project.building_type);

        let line_items = price_lines(self.rules, &ctx, &self.prices, multiplier);
        let summary = aggregate(&line_items, rates);

        EstimateResult::assemble(&geometry, line_items, summary)
    }
}

/// Estimate a JSON-shaped request against a price table.
pub fn calculate(input: &EstimateInput, prices: &PriceTable) -> EstimateResult {
    Estimator::new(prices.clone()).estimate(&input.project, &input.materials, &input.rates)
}
