//! # Text Report Generation
//!
//! Renders an estimate as a plain-text report suitable for saving or
//! printing. Every figure in the [`EstimateResult`] appears verbatim:
//! line names, rounded quantities with units, costs, notes, and the four
//! summary amounts. Currency is shown with two decimals and thousands
//! separators.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use estimate_core::calculations::Estimator;
//! use estimate_core::project::{BuildingType, MaterialSelection, ProjectSpec, RateConfig};
//! use estimate_core::report::EstimateReport;
//!
//! let project = ProjectSpec::new("Ranch", BuildingType::Residential, 60.0, 40.0, 10.0);
//! let rates = RateConfig::default();
//! let estimator = Estimator::default();
//! let result = estimator.estimate(&project, &MaterialSelection::default(), &rates);
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let text = EstimateReport::new(&project, &rates, &result, estimator.prices(), date).render();
//!
//! assert!(text.contains("TOTAL ESTIMATE:        $5,791.68"));
//! ```

use std::fmt::{self, Write as _};

use chrono::{DateTime, NaiveDate, Utc};

use crate::calculations::EstimateResult;
use crate::format::{format_currency, format_grouped, format_plain};
use crate::pricing::PriceTable;
use crate::project::{ProjectSpec, RateConfig};

/// Heavy rule framing the title and the total
const HEAVY_RULE: &str = "════════════════════════════════════════════";

/// Light rule framing section headings
const LIGHT_RULE: &str = "────────────────────────────────────────────";

/// Footer line naming the generator
pub const GENERATOR: &str = "Generated by BuildCalc Pro";

/// Everything needed to render one report.
#[derive(Debug, Clone, Copy)]
pub struct EstimateReport<'a> {
    pub project: &'a ProjectSpec,
    pub rates: &'a RateConfig,
    pub result: &'a EstimateResult,
    pub prices: &'a PriceTable,
    pub date: NaiveDate,
}

impl<'a> EstimateReport<'a> {
    pub fn new(
        project: &'a ProjectSpec,
        rates: &'a RateConfig,
        result: &'a EstimateResult,
        prices: &'a PriceTable,
        date: NaiveDate,
    ) -> Self {
        EstimateReport {
            project,
            rates,
            result,
            prices,
            date,
        }
    }

    /// Render the report to a string.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_header(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "{}", HEAVY_RULE)?;
        writeln!(out, "       CONSTRUCTION COST ESTIMATE")?;
        writeln!(out, "{}", HEAVY_RULE)?;
        writeln!(out)?;
        writeln!(out, "Project: {}", self.project.display_name())?;
        writeln!(out, "Type: {}", self.project.building_type.display_name())?;
        writeln!(out, "Date: {}", self.date.format("%-m/%-d/%Y"))?;
        writeln!(out)
    }

    fn write_section_heading(out: &mut String, title: &str) -> fmt::Result {
        writeln!(out, "{}", LIGHT_RULE)?;
        writeln!(out, "{}", title)?;
        writeln!(out, "{}", LIGHT_RULE)
    }

    fn write_dimensions(&self, out: &mut String) -> fmt::Result {
        let p = self.project;
        let r = self.result;
        Self::write_section_heading(out, "BUILDING DIMENSIONS")?;
        writeln!(out, "Length: {} ft", format_plain(p.length_ft))?;
        writeln!(out, "Width: {} ft", format_plain(p.width_ft))?;
        writeln!(out, "Wall Height: {} ft per floor", format_plain(p.wall_height_ft))?;
        writeln!(out, "Floors: {}", r.floors)?;
        writeln!(out, "Floor Type: {}", p.upper_floor_type.display_name())?;
        writeln!(out, "Slab Thickness: {} in", format_plain(p.slab_thickness_in))?;
        writeln!(out)?;
        writeln!(out, "Floor Area (per floor): {} sq ft", format_grouped(r.floor_area))?;
        writeln!(out, "Total Floor Area: {} sq ft", format_grouped(r.total_floor_area))?;
        writeln!(out, "Total Wall Area: {} sq ft", format_grouped(r.total_wall_area))?;
        writeln!(out)
    }

    fn write_breakdown(&self, out: &mut String) -> fmt::Result {
        Self::write_section_heading(out, "MATERIALS BREAKDOWN")?;
        if self.result.line_items.is_empty() {
            writeln!(out, "(no materials selected)")?;
        }
        for (i, item) in self.result.line_items.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{}", item.name)?;
            writeln!(out, "  Quantity: {} {}", item.display_quantity(), item.unit)?;
            writeln!(out, "  Cost: ${}", format_currency(item.cost))?;
            writeln!(out, "  Note: {}", item.note)?;
        }
        writeln!(out)
    }

    fn write_summary(&self, out: &mut String) -> fmt::Result {
        let r = self.result;
        Self::write_section_heading(out, "COST SUMMARY")?;

        // Each label keeps its own fixed gap before the amount
        writeln!(out, "Materials Subtotal:    ${}", format_currency(r.material_subtotal))?;
        writeln!(
            out,
            "Labor ({}%):            ${}",
            format_plain(self.rates.labor_rate_percent),
            format_currency(r.labor_cost)
        )?;
        writeln!(
            out,
            "Contingency ({}%):      ${}",
            format_plain(self.rates.contingency_rate_percent),
            format_currency(r.contingency_cost)
        )?;
        writeln!(out)?;
        writeln!(out, "{}", HEAVY_RULE)?;
        writeln!(out, "TOTAL ESTIMATE:        ${}", format_currency(r.total))?;
        writeln!(out, "{}", HEAVY_RULE)?;
        writeln!(out)
    }

    fn write_footer(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "* Prices based on {}", self.prices.basis)?;
        writeln!(out, "* {}", self.prices.rate_note(self.project.building_type))?;
        writeln!(out, "* This is an estimate only. Actual costs may vary.")?;
        writeln!(out)?;
        writeln!(out, "{}", LIGHT_RULE)?;
        write!(out, "{}", GENERATOR)
    }
}

impl fmt::Display for EstimateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_header(&mut out)?;
        self.write_dimensions(&mut out)?;
        self.write_breakdown(&mut out)?;
        self.write_summary(&mut out)?;
        self.write_footer(&mut out)?;
        f.write_str(&out)
    }
}

/// Default report file name: `{project name or "estimate"}-{unix millis}.txt`.
///
/// Path separators and control characters in the name become `_`.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use estimate_core::project::ProjectSpec;
/// use estimate_core::report::report_file_name;
///
/// let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
/// assert_eq!(report_file_name(&ProjectSpec::default(), at), "estimate-1700000000000.txt");
/// ```
pub fn report_file_name(project: &ProjectSpec, at: DateTime<Utc>) -> String {
    let name = project.name.trim();
    let stem: String = if name.is_empty() {
        "estimate".to_string()
    } else {
        name.chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') || c.is_control() { '_' } else { c })
            .collect()
    };
    format!("{}-{}.txt", stem, at.timestamp_millis())
}
