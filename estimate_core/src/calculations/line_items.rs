//! # Line-Item Calculator
//!
//! Turns resolved geometry and a material selection into priced lines.
//!
//! Every line comes from one entry of [`LINE_RULES`]: when to emit it,
//! which price it is charged at, how its quantity is derived, and whether
//! the building-type multiplier applies. The table order is the breakdown
//! order. Adding a category means adding a row.
//!
//! | Line | Quantity | Unit | Multiplier |
//! |---|---|---|---|
//! | Foundation Concrete | `(L × W × t/12) / 27` | cu yd | yes |
//! | Cement Bags | `ceil(cu yd × 1.25)` | bags | no |
//! | Suspended Slabs / Wood Frame Floors | `floors − 1` | floors | yes |
//! | Bricks | `ceil(wall area × 7)` | pcs | yes |
//! | Lumber Framing | `ceil(perimeter × H × 1.5 × floors)` | board ft | yes |
//! | Roofing | `floor area × 1.15` | sq ft | yes |
//! | Drywall | `ceil(wall area / 32)` | sheets | yes |
//! | Flooring | total floor area | sq ft | yes |
//! | Windows | `ceil(wall area / 100)` | units | yes |
//! | Electrical / Plumbing Rough-in | total floor area | sq ft | yes |
//!
//! Upper floors built as slab on grade add no structure line; they are
//! taken to cost the same as the ground slab already priced.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Geometry;
use crate::format::{format_fixed, format_grouped, format_plain};
use crate::pricing::{PriceKey, PriceTable};
use crate::project::{MaterialCategory, MaterialSelection, UpperFloorType};
use crate::units::{CubicYards, Feet, Inches};

/// Cement bags per cubic yard of concrete (25% over volumetric need)
pub const CEMENT_BAGS_PER_CU_YD: f64 = 1.25;

/// Bricks per square foot of wall
pub const BRICKS_PER_SQFT: f64 = 7.0;

/// Board feet of framing lumber per square foot of wall
pub const LUMBER_BOARD_FT_PER_SQFT: f64 = 1.5;

/// Roof area per square foot of footprint (15% overhang allowance)
pub const ROOF_OVERHANG_FACTOR: f64 = 1.15;

/// Coverage of one 4x8 drywall sheet (sq ft)
pub const DRYWALL_SHEET_SQFT: f64 = 32.0;

// ============================================================================
// Line Items
// ============================================================================

/// Which rule produced a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCategory {
    FoundationConcrete,
    CementBags,
    SuspendedSlabs,
    WoodFrameFloors,
    Bricks,
    Lumber,
    Roofing,
    Drywall,
    Flooring,
    Windows,
    Electrical,
    Plumbing,
}

/// How a quantity should be rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityFormat {
    /// Two decimals ("29.63")
    TwoDecimals,
    /// Rounded to a whole number, no separators ("2760")
    Rounded,
    /// Thousands separators, up to three decimals ("16,800")
    Grouped,
    /// Whole count as-is ("38")
    Count,
}

impl QuantityFormat {
    /// Render a quantity
    pub fn render(&self, quantity: f64) -> String {
        match self {
            QuantityFormat::TwoDecimals => format_fixed(quantity, 2),
            QuantityFormat::Rounded => format_fixed(quantity, 0),
            QuantityFormat::Grouped => format_grouped(quantity),
            QuantityFormat::Count => format_plain(quantity),
        }
    }
}

/// One priced row of the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Rule that produced this line
    pub category: LineCategory,

    /// Display name ("Foundation Concrete")
    pub name: String,

    /// Quantity in `unit`, full precision
    pub quantity: f64,

    /// Unit label ("cu yd", "pcs", ...)
    pub unit: String,

    /// Line cost in dollars
    pub cost: f64,

    /// Descriptive qualifier ("Ground floor slab")
    pub note: String,

    /// Display rounding for `quantity`
    pub quantity_format: QuantityFormat,
}

impl LineItem {
    /// Quantity rounded for display
    pub fn display_quantity(&self) -> String {
        self.quantity_format.render(self.quantity)
    }
}

// ============================================================================
// Rule Table
// ============================================================================

/// Everything a rule may read.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub geometry: &'a Geometry,
    pub selection: &'a MaterialSelection,
    pub upper_floor_type: UpperFloorType,
}

/// When a rule emits its line.
#[derive(Debug, Clone, Copy)]
pub enum Applicability {
    /// The material category is selected
    Selected(MaterialCategory),
    /// More than one floor, with upper floors of the given type
    UpperFloors(UpperFloorType),
}

impl Applicability {
    pub fn holds(&self, ctx: &RuleContext<'_>) -> bool {
        match *self {
            Applicability::Selected(category) => ctx.selection.is_selected(category),
            Applicability::UpperFloors(floor_type) => {
                ctx.geometry.floors > 1
                    && ctx.upper_floor_type == floor_type
                    && floor_type.adds_structure()
            }
        }
    }
}

/// Note template for a line.
#[derive(Debug, Clone, Copy)]
pub enum NoteTemplate {
    /// Fixed text
    Fixed(&'static str),
    /// "All N floor(s)"
    AllFloors,
    /// "{floor area} sq ft × {upper floors} floors"
    UpperFloorArea,
}

impl NoteTemplate {
    pub fn render(&self, ctx: &RuleContext<'_>) -> String {
        match self {
            NoteTemplate::Fixed(text) => (*text).to_string(),
            NoteTemplate::AllFloors => format!("All {} floor(s)", ctx.geometry.floors),
            NoteTemplate::UpperFloorArea => format!(
                "{} sq ft × {} floors",
                format_grouped(ctx.geometry.floor_area_sqft),
                upper_floors(ctx)
            ),
        }
    }
}

/// Derives a quantity from the rule context
pub type QuantityFn = fn(&RuleContext<'_>) -> f64;

/// One row of the rule table.
#[derive(Clone, Copy)]
pub struct LineRule {
    pub category: LineCategory,
    pub name: &'static str,
    pub applies: Applicability,
    pub price: PriceKey,
    /// Quantity reported on the line
    pub quantity: QuantityFn,
    /// Quantity the unit price is charged against, when it differs
    pub cost_basis: Option<QuantityFn>,
    pub unit: &'static str,
    pub applies_multiplier: bool,
    pub quantity_format: QuantityFormat,
    pub note: NoteTemplate,
}

impl fmt::Debug for LineRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineRule")
            .field("category", &self.category)
            .field("name", &self.name)
            .field("applies", &self.applies)
            .field("price", &self.price)
            .field("unit", &self.unit)
            .field("applies_multiplier", &self.applies_multiplier)
            .finish_non_exhaustive()
    }
}

impl LineRule {
    /// Price this rule, or `None` if it does not apply.
    pub fn evaluate(&self, ctx: &RuleContext<'_>, prices: &PriceTable, multiplier: f64) -> Option<LineItem> {
        if !self.applies.holds(ctx) {
            return None;
        }

        let quantity = (self.quantity)(ctx);
        let basis = match self.cost_basis {
            Some(f) => f(ctx),
            None => quantity,
        };
        let mut cost = basis * prices.unit_price(self.price);
        if self.applies_multiplier {
            cost *= multiplier;
        }

        Some(LineItem {
            category: self.category,
            name: self.name.to_string(),
            quantity,
            unit: self.unit.to_string(),
            cost,
            note: self.note.render(ctx),
            quantity_format: self.quantity_format,
        })
    }
}

fn concrete_cubic_yards(ctx: &RuleContext<'_>) -> f64 {
    let g = ctx.geometry;
    let slab: Feet = Inches(g.slab_thickness_in).into();
    let volume: CubicYards = (Feet(g.length_ft) * Feet(g.width_ft) * slab).into();
    volume.0
}

fn cement_bags(ctx: &RuleContext<'_>) -> f64 {
    (concrete_cubic_yards(ctx) * CEMENT_BAGS_PER_CU_YD).ceil()
}

fn upper_floors(ctx: &RuleContext<'_>) -> f64 {
    f64::from(ctx.geometry.floors.saturating_sub(1))
}

fn upper_floor_area(ctx: &RuleContext<'_>) -> f64 {
    ctx.geometry.floor_area_sqft * upper_floors(ctx)
}

fn brick_count(ctx: &RuleContext<'_>) -> f64 {
    (ctx.geometry.total_wall_area_sqft * BRICKS_PER_SQFT).ceil()
}

fn lumber_board_feet(ctx: &RuleContext<'_>) -> f64 {
    let g = ctx.geometry;
    (g.perimeter_ft * g.wall_height_ft * LUMBER_BOARD_FT_PER_SQFT * f64::from(g.floors)).ceil()
}

fn roof_area(ctx: &RuleContext<'_>) -> f64 {
    ctx.geometry.floor_area_sqft * ROOF_OVERHANG_FACTOR
}

fn drywall_sheets(ctx: &RuleContext<'_>) -> f64 {
    (ctx.geometry.total_wall_area_sqft / DRYWALL_SHEET_SQFT).ceil()
}

fn total_floor_area(ctx: &RuleContext<'_>) -> f64 {
    ctx.geometry.total_floor_area_sqft
}

fn windows(ctx: &RuleContext<'_>) -> f64 {
    ctx.geometry.window_count as f64
}

/// The rule table, in breakdown order.
pub static LINE_RULES: [LineRule; 12] = [
    LineRule {
        category: LineCategory::FoundationConcrete,
        name: "Foundation Concrete",
        applies: Applicability::Selected(MaterialCategory::Concrete),
        price: PriceKey::Concrete,
        quantity: concrete_cubic_yards,
        cost_basis: None,
        unit: "cu yd",
        applies_multiplier: true,
        quantity_format: QuantityFormat::TwoDecimals,
        note: NoteTemplate::Fixed("Ground floor slab"),
    },
    LineRule {
        category: LineCategory::CementBags,
        name: "Cement Bags",
        applies: Applicability::Selected(MaterialCategory::Concrete),
        price: PriceKey::Cement,
        quantity: cement_bags,
        cost_basis: None,
        unit: "bags",
        applies_multiplier: false,
        quantity_format: QuantityFormat::Count,
        note: NoteTemplate::Fixed("For foundation"),
    },
    LineRule {
        category: LineCategory::SuspendedSlabs,
        name: "Suspended Slabs",
        applies: Applicability::UpperFloors(UpperFloorType::SuspendedConcrete),
        price: PriceKey::SuspendedSlab,
        quantity: upper_floors,
        cost_basis: Some(upper_floor_area),
        unit: "floors",
        applies_multiplier: true,
        quantity_format: QuantityFormat::Count,
        note: NoteTemplate::UpperFloorArea,
    },
    LineRule {
        category: LineCategory::WoodFrameFloors,
        name: "Wood Frame Floors",
        applies: Applicability::UpperFloors(UpperFloorType::WoodFrame),
        price: PriceKey::WoodFrame,
        quantity: upper_floors,
        cost_basis: Some(upper_floor_area),
        unit: "floors",
        applies_multiplier: true,
        quantity_format: QuantityFormat::Count,
        note: NoteTemplate::UpperFloorArea,
    },
    LineRule {
        category: LineCategory::Bricks,
        name: "Bricks",
        applies: Applicability::Selected(MaterialCategory::Bricks),
        price: PriceKey::Bricks,
        quantity: brick_count,
        cost_basis: None,
        unit: "pcs",
        applies_multiplier: true,
        quantity_format: QuantityFormat::Grouped,
        note: NoteTemplate::AllFloors,
    },
    LineRule {
        category: LineCategory::Lumber,
        name: "Lumber Framing",
        applies: Applicability::Selected(MaterialCategory::Lumber),
        price: PriceKey::Lumber,
        quantity: lumber_board_feet,
        cost_basis: None,
        unit: "board ft",
        applies_multiplier: true,
        quantity_format: QuantityFormat::Grouped,
        note: NoteTemplate::AllFloors,
    },
    LineRule {
        category: LineCategory::Roofing,
        name: "Roofing",
        applies: Applicability::Selected(MaterialCategory::Roofing),
        price: PriceKey::Roofing,
        quantity: roof_area,
        cost_basis: None,
        unit: "sq ft",
        applies_multiplier: true,
        quantity_format: QuantityFormat::Rounded,
        note: NoteTemplate::Fixed("Top floor only"),
    },
    LineRule {
        category: LineCategory::Drywall,
        name: "Drywall",
        applies: Applicability::Selected(MaterialCategory::Drywall),
        price: PriceKey::Drywall,
        quantity: drywall_sheets,
        cost_basis: None,
        unit: "sheets",
        applies_multiplier: true,
        quantity_format: QuantityFormat::Count,
        note: NoteTemplate::AllFloors,
    },
    LineRule {
        category: LineCategory::Flooring,
        name: "Flooring",
        applies: Applicability::Selected(MaterialCategory::Flooring),
        price: PriceKey::Flooring,
        quantity: total_floor_area,
        cost_basis: None,
        unit: "sq ft",
        applies_multiplier: true,
        quantity_format: QuantityFormat::Grouped,
        note: NoteTemplate::AllFloors,
    },
    LineRule {
        category: LineCategory::Windows,
        name: "Windows",
        applies: Applicability::Selected(MaterialCategory::Windows),
        price: PriceKey::Windows,
        quantity: windows,
        cost_basis: None,
        unit: "units",
        applies_multiplier: true,
        quantity_format: QuantityFormat::Count,
        note: NoteTemplate::Fixed("Standard size estimate"),
    },
    LineRule {
        category: LineCategory::Electrical,
        name: "Electrical Rough-in",
        applies: Applicability::Selected(MaterialCategory::Electrical),
        price: PriceKey::Electrical,
        quantity: total_floor_area,
        cost_basis: None,
        unit: "sq ft",
        applies_multiplier: true,
        quantity_format: QuantityFormat::Grouped,
        note: NoteTemplate::AllFloors,
    },
    LineRule {
        category: LineCategory::Plumbing,
        name: "Plumbing Rough-in",
        applies: Applicability::Selected(MaterialCategory::Plumbing),
        price: PriceKey::Plumbing,
        quantity: total_floor_area,
        cost_basis: None,
        unit: "sq ft",
        applies_multiplier: true,
        quantity_format: QuantityFormat::Grouped,
        note: NoteTemplate::AllFloors,
    },
];

/// Evaluate a rule table against a context, in table order.
pub fn price_lines(rules: &[LineRule], ctx: &RuleContext<'_>, prices: &PriceTable, multiplier: f64) -> Vec<LineItem> {
    rules
        .iter()
        .filter_map(|rule| rule.evaluate(ctx, prices, multiplier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::geometry::resolve;
    use crate::project::{BuildingType, ProjectSpec};

    fn lines_for(project: &ProjectSpec, selection: MaterialSelection) -> Vec<LineItem> {
        let geometry = resolve(project);
        let ctx = RuleContext {
            geometry: &geometry,
            selection: &selection,
            upper_floor_type: project.upper_floor_type,
        };
        let prices = PriceTable::default();
        let multiplier = prices.multiplier(project.building_type);
        price_lines(&LINE_RULES, &ctx, &prices, multiplier)
    }

    fn find(lines: &[LineItem], category: LineCategory) -> &LineItem {
        lines
            .iter()
            .find(|l| l.category == category)
            .unwrap_or_else(|| panic!("missing line {:?}", category))
    }

    fn ranch() -> ProjectSpec {
        ProjectSpec::new("Ranch", BuildingType::Residential, 60.0, 40.0, 10.0)
    }

    #[test]
    fn test_concrete_and_cement() {
        let lines = lines_for(&ranch(), MaterialSelection::only(&[MaterialCategory::Concrete]));
        assert_eq!(lines.len(), 2);

        let concrete = &lines[0];
        assert_eq!(concrete.name, "Foundation Concrete");
        assert!((concrete.quantity - 29.6296296).abs() < 1e-6);
        assert_eq!(concrete.display_quantity(), "29.63");
        assert!((concrete.cost - 4444.4444444).abs() < 1e-6);
        assert_eq!(concrete.note, "Ground floor slab");

        let cement = &lines[1];
        assert_eq!(cement.quantity, 38.0);
        assert_eq!(cement.cost, 570.0);
        assert_eq!(cement.unit, "bags");
    }

    #[test]
    fn test_wall_materials() {
        let selection = MaterialSelection::only(&[
            MaterialCategory::Bricks,
            MaterialCategory::Lumber,
            MaterialCategory::Drywall,
            MaterialCategory::Windows,
        ]);
        let lines = lines_for(&ranch(), selection);

        // Wall area 2000 sq ft, perimeter 200 ft
        let bricks = find(&lines, LineCategory::Bricks);
        assert_eq!(bricks.quantity, 14000.0);
        assert_eq!(bricks.cost, 10500.0);
        assert_eq!(bricks.display_quantity(), "14,000");
        assert_eq!(bricks.note, "All 1 floor(s)");

        let lumber = find(&lines, LineCategory::Lumber);
        assert_eq!(lumber.quantity, 3000.0);
        assert_eq!(lumber.cost, 24000.0);

        let drywall = find(&lines, LineCategory::Drywall);
        assert_eq!(drywall.quantity, 63.0);
        assert_eq!(drywall.cost, 945.0);

        let windows = find(&lines, LineCategory::Windows);
        assert_eq!(windows.quantity, 20.0);
        assert_eq!(windows.cost, 9000.0);
        assert_eq!(windows.note, "Standard size estimate");
    }

    #[test]
    fn test_area_materials() {
        let project = ranch().with_floors(2);
        let selection = MaterialSelection::only(&[
            MaterialCategory::Roofing,
            MaterialCategory::Flooring,
            MaterialCategory::Electrical,
            MaterialCategory::Plumbing,
        ]);
        let lines = lines_for(&project, selection);
        assert_eq!(lines.len(), 4);

        let roofing = find(&lines, LineCategory::Roofing);
        assert!((roofing.quantity - 2760.0).abs() < 1e-9);
        assert_eq!(roofing.display_quantity(), "2760");
        assert_eq!(roofing.note, "Top floor only");

        let flooring = find(&lines, LineCategory::Flooring);
        assert_eq!(flooring.quantity, 4800.0);
        assert_eq!(flooring.cost, 38400.0);
        assert_eq!(flooring.note, "All 2 floor(s)");

        assert_eq!(find(&lines, LineCategory::Electrical).cost, 19200.0);
        assert_eq!(find(&lines, LineCategory::Plumbing).cost, 28800.0);
    }

    #[test]
    fn test_wood_frame_upper_floors() {
        let project = ProjectSpec::new("Tower", BuildingType::Residential, 40.0, 25.0, 10.0)
            .with_floors(3)
            .with_upper_floor_type(UpperFloorType::WoodFrame);
        let lines = lines_for(&project, MaterialSelection::none());
        assert_eq!(lines.len(), 1);

        let floors = &lines[0];
        assert_eq!(floors.name, "Wood Frame Floors");
        assert_eq!(floors.quantity, 2.0);
        assert_eq!(floors.unit, "floors");
        assert_eq!(floors.cost, 1000.0 * 2.0 * 6.0);
        assert_eq!(floors.note, "1,000 sq ft × 2 floors");
    }

    #[test]
    fn test_suspended_upper_floors_follow_concrete() {
        let project = ranch()
            .with_floors(2)
            .with_upper_floor_type(UpperFloorType::SuspendedConcrete);
        let lines = lines_for(&project, MaterialSelection::default());
        let names: Vec<_> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Foundation Concrete", "Cement Bags", "Suspended Slabs"]);
        assert_eq!(lines[2].cost, 2400.0 * 12.0);
    }

    #[test]
    fn test_slab_on_grade_adds_no_structure_line() {
        let project = ranch().with_floors(4);
        let lines = lines_for(&project, MaterialSelection::none());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_single_floor_ignores_upper_floor_type() {
        let project = ranch().with_upper_floor_type(UpperFloorType::WoodFrame);
        let lines = lines_for(&project, MaterialSelection::none());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_cement_ignores_multiplier() {
        let project = ProjectSpec::new("Shop", BuildingType::Commercial, 60.0, 40.0, 10.0);
        let lines = lines_for(&project, MaterialSelection::default());
        assert_eq!(find(&lines, LineCategory::CementBags).cost, 570.0);
        let concrete = find(&lines, LineCategory::FoundationConcrete);
        assert!((concrete.cost - 4444.4444444 * 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_full_selection_order() {
        let project = ranch()
            .with_floors(2)
            .with_upper_floor_type(UpperFloorType::WoodFrame);
        let lines = lines_for(&project, MaterialSelection::all());
        let categories: Vec<_> = lines.iter().map(|l| l.category).collect();
        assert_eq!(
            categories,
            vec![
                LineCategory::FoundationConcrete,
                LineCategory::CementBags,
                LineCategory::WoodFrameFloors,
                LineCategory::Bricks,
                LineCategory::Lumber,
                LineCategory::Roofing,
                LineCategory::Drywall,
                LineCategory::Flooring,
                LineCategory::Windows,
                LineCategory::Electrical,
                LineCategory::Plumbing,
            ]
        );
    }
}
