//! # Project Data Structures
//!
//! Everything the estimator needs to know about a building, plus the
//! selection and rate settings chosen alongside it.
//!
//! ## Structure
//!
//! ```text
//! ProjectSpec        (geometry and configuration)
//! MaterialSelection  (which material categories to price)
//! RateConfig         (labor and contingency percentages)
//! ProjectInput       (the same geometry as raw user text)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::project::{BuildingType, ProjectSpec, UpperFloorType};
//!
//! let project = ProjectSpec::new("Duplex", BuildingType::Apartment, 40.0, 30.0, 9.0)
//!     .with_floors(2)
//!     .with_upper_floor_type(UpperFloorType::WoodFrame);
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("wood_frame"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Building and Floor Types
// ============================================================================

/// Occupancy class of the building. Selects the cost multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    /// Single family residential
    #[default]
    Residential,
    /// Commercial construction
    Commercial,
    /// Apartment / multi-family
    Apartment,
}

impl BuildingType {
    /// All building types in wizard order
    pub const ALL: [BuildingType; 3] = [
        BuildingType::Residential,
        BuildingType::Apartment,
        BuildingType::Commercial,
    ];

    /// Lowercase key used in JSON and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            BuildingType::Residential => "residential",
            BuildingType::Commercial => "commercial",
            BuildingType::Apartment => "apartment",
        }
    }

    /// Short display name ("Residential")
    pub fn display_name(&self) -> &'static str {
        match self {
            BuildingType::Residential => "Residential",
            BuildingType::Commercial => "Commercial",
            BuildingType::Apartment => "Apartment",
        }
    }

    /// Long description for selection lists
    pub fn description(&self) -> &'static str {
        match self {
            BuildingType::Residential => "Residential (Single Family)",
            BuildingType::Commercial => "Commercial",
            BuildingType::Apartment => "Apartment / Multi-Family",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BuildingType {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "residential" => Ok(BuildingType::Residential),
            "commercial" => Ok(BuildingType::Commercial),
            "apartment" | "multi-family" | "multifamily" => Ok(BuildingType::Apartment),
            _ => Err(CalcError::invalid_input(
                "building_type",
                s,
                "Expected residential, commercial, or apartment",
            )),
        }
    }
}

/// Construction method for the floors above the ground floor.
///
/// Only meaningful when the building has more than one floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpperFloorType {
    /// Upper floors priced as the ground slab; adds no structure line
    #[default]
    SlabOnGrade,
    /// Suspended (elevated) concrete slabs
    SuspendedConcrete,
    /// Wood-framed floor systems
    WoodFrame,
}

impl UpperFloorType {
    /// All upper floor types in wizard order
    pub const ALL: [UpperFloorType; 3] = [
        UpperFloorType::SlabOnGrade,
        UpperFloorType::SuspendedConcrete,
        UpperFloorType::WoodFrame,
    ];

    /// Display name used in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            UpperFloorType::SlabOnGrade => "Slab on Grade",
            UpperFloorType::SuspendedConcrete => "Suspended Concrete",
            UpperFloorType::WoodFrame => "Wood Frame",
        }
    }

    /// Whether upper floors of this type are priced as an extra structure line
    pub fn adds_structure(&self) -> bool {
        !matches!(self, UpperFloorType::SlabOnGrade)
    }
}

impl fmt::Display for UpperFloorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for UpperFloorType {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "slab" | "slab_on_grade" => Ok(UpperFloorType::SlabOnGrade),
            "suspended" | "suspended_concrete" => Ok(UpperFloorType::SuspendedConcrete),
            "wood" | "wood_frame" => Ok(UpperFloorType::WoodFrame),
            _ => Err(CalcError::invalid_input(
                "upper_floor_type",
                s,
                "Expected slab, suspended, or wood",
            )),
        }
    }
}

// ============================================================================
// Project Geometry
// ============================================================================

/// Building geometry and configuration.
///
/// Dimensions are in feet except the slab thickness, which is in inches.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Smith Residence",
///   "building_type": "residential",
///   "length_ft": 60.0,
///   "width_ft": 40.0,
///   "wall_height_ft": 10.0,
///   "floors": 2,
///   "slab_thickness_in": 4.0,
///   "upper_floor_type": "wood_frame"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSpec {
    /// Project name (display only)
    pub name: String,

    /// Occupancy class, selects the cost multiplier
    pub building_type: BuildingType,

    /// Building length in feet
    #[serde(deserialize_with = "lenient_dimension")]
    pub length_ft: f64,

    /// Building width in feet
    #[serde(deserialize_with = "lenient_dimension")]
    pub width_ft: f64,

    /// Wall height per floor in feet
    #[serde(deserialize_with = "lenient_dimension")]
    pub wall_height_ft: f64,

    /// Number of floors (at least 1)
    #[serde(deserialize_with = "lenient_floors")]
    pub floors: u32,

    /// Ground floor slab thickness in inches
    #[serde(deserialize_with = "lenient_dimension")]
    pub slab_thickness_in: f64,

    /// Construction of floors above the ground floor
    pub upper_floor_type: UpperFloorType,
}

/// Default slab thickness offered by the wizard (inches)
pub const DEFAULT_SLAB_THICKNESS_IN: f64 = 4.0;

impl ProjectSpec {
    /// Create a single-storey project with the default 4" slab.
    pub fn new(
        name: impl Into<String>,
        building_type: BuildingType,
        length_ft: f64,
        width_ft: f64,
        wall_height_ft: f64,
    ) -> Self {
        ProjectSpec {
            name: name.into(),
            building_type,
            length_ft,
            width_ft,
            wall_height_ft,
            ..ProjectSpec::default()
        }
    }

    /// Set the floor count (builder pattern)
    pub fn with_floors(mut self, floors: u32) -> Self {
        self.floors = floors;
        self
    }

    /// Set the slab thickness in inches (builder pattern)
    pub fn with_slab_thickness(mut self, slab_thickness_in: f64) -> Self {
        self.slab_thickness_in = slab_thickness_in;
        self
    }

    /// Set the upper floor construction (builder pattern)
    pub fn with_upper_floor_type(mut self, upper_floor_type: UpperFloorType) -> Self {
        self.upper_floor_type = upper_floor_type;
        self
    }

    /// Name for display, falling back to "Untitled Project"
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Untitled Project"
        } else {
            &self.name
        }
    }
}

impl Default for ProjectSpec {
    fn default() -> Self {
        ProjectSpec {
            name: String::new(),
            building_type: BuildingType::Residential,
            length_ft: 0.0,
            width_ft: 0.0,
            wall_height_ft: 0.0,
            floors: 1,
            slab_thickness_in: DEFAULT_SLAB_THICKNESS_IN,
            upper_floor_type: UpperFloorType::SlabOnGrade,
        }
    }
}

// ============================================================================
// Raw Text Input
// ============================================================================

/// Project geometry exactly as typed into a form.
///
/// Numeric fields are kept as text; [`ProjectInput::to_spec`] coerces them
/// the permissive way a browser form would: a leading number is read and
/// anything unreadable becomes 0. An unreadable or non-positive floor
/// count becomes 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInput {
    pub name: String,
    pub building_type: BuildingType,
    pub length: String,
    pub width: String,
    pub height: String,
    pub floors: String,
    pub slab_thickness: String,
    pub upper_floor_type: UpperFloorType,
}

impl Default for ProjectInput {
    fn default() -> Self {
        ProjectInput {
            name: String::new(),
            building_type: BuildingType::Residential,
            length: String::new(),
            width: String::new(),
            height: String::new(),
            floors: "1".to_string(),
            slab_thickness: "4".to_string(),
            upper_floor_type: UpperFloorType::SlabOnGrade,
        }
    }
}

impl ProjectInput {
    /// Coerce the text fields into a [`ProjectSpec`]. Never fails.
    ///
    /// ```rust
    /// use estimate_core::project::ProjectInput;
    ///
    /// let input = ProjectInput {
    ///     length: "60ft".to_string(),
    ///     width: "forty".to_string(),
    ///     floors: "".to_string(),
    ///     ..ProjectInput::default()
    /// };
    /// let spec = input.to_spec();
    /// assert_eq!(spec.length_ft, 60.0);
    /// assert_eq!(spec.width_ft, 0.0);
    /// assert_eq!(spec.floors, 1);
    /// ```
    pub fn to_spec(&self) -> ProjectSpec {
        let floors = floors_from_int(parse_leading_int(&self.floors));

        ProjectSpec {
            name: self.name.clone(),
            building_type: self.building_type,
            length_ft: parse_number(&self.length),
            width_ft: parse_number(&self.width),
            wall_height_ft: parse_number(&self.height),
            floors,
            slab_thickness_in: parse_number(&self.slab_thickness),
            upper_floor_type: self.upper_floor_type,
        }
    }
}

/// Read the leading decimal number of `text`, or 0 if there is none.
///
/// Leading whitespace is skipped, an optional sign, digits, fraction and
/// exponent are accepted, and trailing text is ignored. Non-finite
/// results also collapse to 0.
pub fn parse_number(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Read the leading integer of `text` (base 10), if any.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

/// Floor count from a parsed integer: anything below 1 becomes 1.
fn floors_from_int(n: Option<i64>) -> u32 {
    match n {
        Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

// ============================================================================
// Lenient JSON Numbers
// ============================================================================

/// A JSON value where a number was expected.
enum LooseNumber {
    Number(f64),
    Text(String),
    Other,
}

struct LooseNumberVisitor;

impl<'de> de::Visitor<'de> for LooseNumberVisitor {
    type Value = LooseNumber;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a numeric string, or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(LooseNumber::Number(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(LooseNumber::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(LooseNumber::Number(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(LooseNumber::Text(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(LooseNumber::Other)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(LooseNumber::Other)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(LooseNumber::Other)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(LooseNumber::Other)
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
        Ok(LooseNumber::Other)
    }
}

/// Dimension from JSON: numbers pass through, strings are read like form
/// text, anything else (null, bools, objects) becomes 0.
fn lenient_dimension<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match deserializer.deserialize_any(LooseNumberVisitor)? {
        LooseNumber::Number(v) if v.is_finite() => v,
        LooseNumber::Number(_) | LooseNumber::Other => 0.0,
        LooseNumber::Text(text) => parse_number(&text),
    })
}

/// Floor count from JSON, with the same fallback to 1 as form text.
fn lenient_floors<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(match deserializer.deserialize_any(LooseNumberVisitor)? {
        LooseNumber::Number(v) if v.is_finite() && v >= 1.0 => {
            if v >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                v.trunc() as u32
            }
        }
        LooseNumber::Number(_) | LooseNumber::Other => 1,
        LooseNumber::Text(text) => floors_from_int(parse_leading_int(&text)),
    })
}

// ============================================================================
// Material Selection
// ============================================================================

/// A selectable material category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Concrete,
    Bricks,
    Lumber,
    Roofing,
    Drywall,
    Flooring,
    Windows,
    Electrical,
    Plumbing,
}

impl MaterialCategory {
    /// All categories in breakdown order
    pub const ALL: [MaterialCategory; 9] = [
        MaterialCategory::Concrete,
        MaterialCategory::Bricks,
        MaterialCategory::Lumber,
        MaterialCategory::Roofing,
        MaterialCategory::Drywall,
        MaterialCategory::Flooring,
        MaterialCategory::Windows,
        MaterialCategory::Electrical,
        MaterialCategory::Plumbing,
    ];

    /// Lowercase key used in JSON and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            MaterialCategory::Concrete => "concrete",
            MaterialCategory::Bricks => "bricks",
            MaterialCategory::Lumber => "lumber",
            MaterialCategory::Roofing => "roofing",
            MaterialCategory::Drywall => "drywall",
            MaterialCategory::Flooring => "flooring",
            MaterialCategory::Windows => "windows",
            MaterialCategory::Electrical => "electrical",
            MaterialCategory::Plumbing => "plumbing",
        }
    }

    /// Label and short description for selection lists
    pub fn description(&self) -> (&'static str, &'static str) {
        match self {
            MaterialCategory::Concrete => ("Concrete & Cement", "Foundation slab"),
            MaterialCategory::Bricks => ("Bricks", "Exterior walls"),
            MaterialCategory::Lumber => ("Lumber", "Wall framing"),
            MaterialCategory::Roofing => ("Roofing", "Shingles and underlayment"),
            MaterialCategory::Drywall => ("Drywall", "Interior walls"),
            MaterialCategory::Flooring => ("Flooring", "Finished floors"),
            MaterialCategory::Windows => ("Windows", "Standard windows"),
            MaterialCategory::Electrical => ("Electrical", "Rough-in wiring"),
            MaterialCategory::Plumbing => ("Plumbing", "Rough-in plumbing"),
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MaterialCategory {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        let key = s.trim().to_ascii_lowercase();
        MaterialCategory::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| {
                CalcError::invalid_input("materials", s, "Unknown material category")
            })
    }
}

/// Which material categories to include in the estimate.
///
/// Defaults to concrete only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSelection {
    pub concrete: bool,
    pub bricks: bool,
    pub lumber: bool,
    pub roofing: bool,
    pub drywall: bool,
    pub flooring: bool,
    pub windows: bool,
    pub electrical: bool,
    pub plumbing: bool,
}

impl Default for MaterialSelection {
    fn default() -> Self {
        MaterialSelection {
            concrete: true,
            ..MaterialSelection::none()
        }
    }
}

impl MaterialSelection {
    /// Nothing selected
    pub fn none() -> Self {
        MaterialSelection {
            concrete: false,
            bricks: false,
            lumber: false,
            roofing: false,
            drywall: false,
            flooring: false,
            windows: false,
            electrical: false,
            plumbing: false,
        }
    }

    /// Every category selected
    pub fn all() -> Self {
        MaterialSelection {
            concrete: true,
            bricks: true,
            lumber: true,
            roofing: true,
            drywall: true,
            flooring: true,
            windows: true,
            electrical: true,
            plumbing: true,
        }
    }

    /// Select exactly the given categories
    pub fn only(categories: &[MaterialCategory]) -> Self {
        let mut selection = MaterialSelection::none();
        for &category in categories {
            selection.set(category, true);
        }
        selection
    }

    /// Parse a comma-separated key list such as `"concrete,bricks"`.
    ///
    /// `"all"` selects everything, `"none"` or an empty string selects nothing.
    pub fn from_keys(list: &str) -> CalcResult<Self> {
        let trimmed = list.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(MaterialSelection::all());
        }
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(MaterialSelection::none());
        }
        let categories = trimmed
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<CalcResult<Vec<MaterialCategory>>>()?;
        Ok(MaterialSelection::only(&categories))
    }

    /// Whether a category is included
    pub fn is_selected(&self, category: MaterialCategory) -> bool {
        match category {
            MaterialCategory::Concrete => self.concrete,
            MaterialCategory::Bricks => self.bricks,
            MaterialCategory::Lumber => self.lumber,
            MaterialCategory::Roofing => self.roofing,
            MaterialCategory::Drywall => self.drywall,
            MaterialCategory::Flooring => self.flooring,
            MaterialCategory::Windows => self.windows,
            MaterialCategory::Electrical => self.electrical,
            MaterialCategory::Plumbing => self.plumbing,
        }
    }

    /// Include or exclude a category
    pub fn set(&mut self, category: MaterialCategory, selected: bool) {
        let flag = match category {
            MaterialCategory::Concrete => &mut self.concrete,
            MaterialCategory::Bricks => &mut self.bricks,
            MaterialCategory::Lumber => &mut self.lumber,
            MaterialCategory::Roofing => &mut self.roofing,
            MaterialCategory::Drywall => &mut self.drywall,
            MaterialCategory::Flooring => &mut self.flooring,
            MaterialCategory::Windows => &mut self.windows,
            MaterialCategory::Electrical => &mut self.electrical,
            MaterialCategory::Plumbing => &mut self.plumbing,
        };
        *flag = selected;
    }

    /// Selected categories in breakdown order
    pub fn selected(&self) -> impl Iterator<Item = MaterialCategory> + '_ {
        MaterialCategory::ALL
            .into_iter()
            .filter(move |c| self.is_selected(*c))
    }

    /// Number of selected categories
    pub fn count(&self) -> usize {
        self.selected().count()
    }
}

// ============================================================================
// Rates
// ============================================================================

/// Labor and contingency markups, in percent.
///
/// The wizard limits labor to 5–30% and contingency to 0–20%, but the
/// engine applies whatever non-negative values it is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Labor as a percentage of the material subtotal
    pub labor_rate_percent: f64,

    /// Contingency as a percentage of materials plus labor
    pub contingency_rate_percent: f64,
}

impl RateConfig {
    /// Wizard slider range for labor (percent)
    pub const LABOR_RANGE: (f64, f64) = (5.0, 30.0);

    /// Wizard slider range for contingency (percent)
    pub const CONTINGENCY_RANGE: (f64, f64) = (0.0, 20.0);

    pub fn new(labor_rate_percent: f64, contingency_rate_percent: f64) -> Self {
        RateConfig {
            labor_rate_percent,
            contingency_rate_percent,
        }
    }

    /// Copy with both rates clamped into their wizard ranges.
    ///
    /// Never applied implicitly by the engine.
    pub fn clamped(&self) -> Self {
        let (lmin, lmax) = Self::LABOR_RANGE;
        let (cmin, cmax) = Self::CONTINGENCY_RANGE;
        RateConfig {
            labor_rate_percent: self.labor_rate_percent.clamp(lmin, lmax),
            contingency_rate_percent: self.contingency_rate_percent.clamp(cmin, cmax),
        }
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        RateConfig {
            labor_rate_percent: 10.0,
            contingency_rate_percent: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_defaults() {
        let project = ProjectSpec::default();
        assert_eq!(project.floors, 1);
        assert_eq!(project.slab_thickness_in, 4.0);
        assert_eq!(project.building_type, BuildingType::Residential);
        assert_eq!(project.upper_floor_type, UpperFloorType::SlabOnGrade);
        assert_eq!(project.display_name(), "Untitled Project");
    }

    #[test]
    fn test_project_serialization() {
        let project = ProjectSpec::new("Smith Residence", BuildingType::Commercial, 60.0, 40.0, 10.0)
            .with_floors(3)
            .with_upper_floor_type(UpperFloorType::SuspendedConcrete);
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("\"commercial\""));
        assert!(json.contains("\"suspended_concrete\""));

        let roundtrip: ProjectSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, project);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let project: ProjectSpec =
            serde_json::from_str(r#"{ "length_ft": 30, "width_ft": 20 }"#).unwrap();
        assert_eq!(project.length_ft, 30.0);
        assert_eq!(project.floors, 1);
        assert_eq!(project.slab_thickness_in, 4.0);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("60"), 60.0);
        assert_eq!(parse_number("  12.5 ft"), 12.5);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("-3"), -3.0);
        assert_eq!(parse_number("1e2x"), 100.0);
        assert_eq!(parse_number("4e"), 4.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("."), 0.0);
        assert_eq!(parse_number("1e999"), 0.0);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("3"), Some(3));
        assert_eq!(parse_leading_int("2.9"), Some(2));
        assert_eq!(parse_leading_int(" 4 floors"), Some(4));
        assert_eq!(parse_leading_int("-1"), Some(-1));
        assert_eq!(parse_leading_int("two"), None);
    }

    #[test]
    fn test_loose_json_dimensions() {
        let json = r#"{
            "length_ft": "60ft",
            "width_ft": null,
            "wall_height_ft": "abc",
            "floors": "3 storeys",
            "slab_thickness_in": 6
        }"#;
        let project: ProjectSpec = serde_json::from_str(json).unwrap();
        assert_eq!(project.length_ft, 60.0);
        assert_eq!(project.width_ft, 0.0);
        assert_eq!(project.wall_height_ft, 0.0);
        assert_eq!(project.floors, 3);
        assert_eq!(project.slab_thickness_in, 6.0);

        let odd: ProjectSpec =
            serde_json::from_str(r#"{ "length_ft": true, "width_ft": [1], "floors": -2 }"#).unwrap();
        assert_eq!(odd.length_ft, 0.0);
        assert_eq!(odd.width_ft, 0.0);
        assert_eq!(odd.floors, 1);

        let decimal_floors: ProjectSpec = serde_json::from_str(r#"{ "floors": 2.7 }"#).unwrap();
        assert_eq!(decimal_floors.floors, 2);
    }

    #[test]
    fn test_input_coercion() {
        let input = ProjectInput {
            name: "Shop".to_string(),
            building_type: BuildingType::Commercial,
            length: "60".to_string(),
            width: "40".to_string(),
            height: "".to_string(),
            floors: "0".to_string(),
            slab_thickness: "six".to_string(),
            upper_floor_type: UpperFloorType::WoodFrame,
        };
        let spec = input.to_spec();
        assert_eq!(spec.length_ft, 60.0);
        assert_eq!(spec.width_ft, 40.0);
        assert_eq!(spec.wall_height_ft, 0.0);
        assert_eq!(spec.floors, 1);
        assert_eq!(spec.slab_thickness_in, 0.0);
        assert_eq!(spec.building_type, BuildingType::Commercial);
    }

    #[test]
    fn test_building_type_parse() {
        assert_eq!("Commercial".parse::<BuildingType>().unwrap(), BuildingType::Commercial);
        assert_eq!("apartment".parse::<BuildingType>().unwrap(), BuildingType::Apartment);
        assert!("castle".parse::<BuildingType>().is_err());
    }

    #[test]
    fn test_upper_floor_type_parse() {
        assert_eq!("wood".parse::<UpperFloorType>().unwrap(), UpperFloorType::WoodFrame);
        assert_eq!(
            "suspended-concrete".parse::<UpperFloorType>().unwrap(),
            UpperFloorType::SuspendedConcrete
        );
        assert_eq!("slab".parse::<UpperFloorType>().unwrap(), UpperFloorType::SlabOnGrade);
        assert!(!UpperFloorType::SlabOnGrade.adds_structure());
        assert!(UpperFloorType::WoodFrame.adds_structure());
    }

    #[test]
    fn test_selection_from_keys() {
        let sel = MaterialSelection::from_keys("concrete, bricks,windows").unwrap();
        assert!(sel.concrete && sel.bricks && sel.windows);
        assert!(!sel.lumber);
        assert_eq!(sel.count(), 3);

        assert_eq!(MaterialSelection::from_keys("all").unwrap(), MaterialSelection::all());
        assert_eq!(MaterialSelection::from_keys("").unwrap(), MaterialSelection::none());

        let err = MaterialSelection::from_keys("concrete,gold").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_selection_order() {
        let sel = MaterialSelection::only(&[MaterialCategory::Plumbing, MaterialCategory::Bricks]);
        let order: Vec<_> = sel.selected().collect();
        assert_eq!(order, vec![MaterialCategory::Bricks, MaterialCategory::Plumbing]);
        assert_eq!(MaterialSelection::default().count(), 1);
    }

    #[test]
    fn test_rate_clamping() {
        let rates = RateConfig::new(45.0, -2.0).clamped();
        assert_eq!(rates.labor_rate_percent, 30.0);
        assert_eq!(rates.contingency_rate_percent, 0.0);
        assert_eq!(RateConfig::default(), RateConfig::new(10.0, 5.0));
    }
}
