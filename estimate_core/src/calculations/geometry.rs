//! # Geometry Resolver
//!
//! Derives the areas and counts every line item is priced from. All
//! dimensions are sanitized first: a negative, NaN or infinite value is
//! read as 0, and a floor count of 0 is read as 1, so the resolver never
//! fails and never produces a negative quantity.

use serde::{Deserialize, Serialize};

use crate::project::ProjectSpec;
use crate::units::{Feet, SqFt};

/// Wall area covered by one window (sq ft)
pub const WALL_AREA_PER_WINDOW_SQFT: f64 = 100.0;

/// Quantities derived from the building footprint and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Sanitized length (ft)
    pub length_ft: f64,

    /// Sanitized width (ft)
    pub width_ft: f64,

    /// Sanitized wall height per floor (ft)
    pub wall_height_ft: f64,

    /// Sanitized slab thickness (in)
    pub slab_thickness_in: f64,

    /// Effective floor count (at least 1)
    pub floors: u32,

    /// Footprint area of one floor (sq ft)
    pub floor_area_sqft: f64,

    /// Floor area summed over all floors (sq ft)
    pub total_floor_area_sqft: f64,

    /// Exterior wall area of one floor (sq ft)
    pub wall_area_per_floor_sqft: f64,

    /// Exterior wall area over all floors (sq ft)
    pub total_wall_area_sqft: f64,

    /// Building perimeter (ft)
    pub perimeter_ft: f64,

    /// Windows needed, one per 100 sq ft of wall, rounded up
    pub window_count: u64,
}

/// Map negative values, NaN and infinities to 0
pub fn dimension_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Resolve the geometry of a project.
///
/// ```rust
/// use estimate_core::calculations::geometry::resolve;
/// use estimate_core::project::{BuildingType, ProjectSpec};
///
/// let project = ProjectSpec::new("Shed", BuildingType::Residential, 10.0, 15.0, 5.0);
/// let geometry = resolve(&project);
/// assert_eq!(geometry.floor_area_sqft, 150.0);
/// assert_eq!(geometry.total_wall_area_sqft, 250.0);
/// assert_eq!(geometry.window_count, 3);
/// ```
pub fn resolve(project: &ProjectSpec) -> Geometry {
    let length = Feet(dimension_or_zero(project.length_ft));
    let width = Feet(dimension_or_zero(project.width_ft));
    let height = dimension_or_zero(project.wall_height_ft);
    let floors = project.floors.max(1);
    let n = f64::from(floors);

    let floor_area: SqFt = length * width;
    let total_floor_area = floor_area * n;
    let perimeter = (length + width) * 2.0;
    let wall_area_per_floor = SqFt(perimeter.0 * height);
    let total_wall_area = wall_area_per_floor * n;

    Geometry {
        length_ft: length.0,
        width_ft: width.0,
        wall_height_ft: height,
        slab_thickness_in: dimension_or_zero(project.slab_thickness_in),
        floors,
        floor_area_sqft: floor_area.0,
        total_floor_area_sqft: total_floor_area.0,
        wall_area_per_floor_sqft: wall_area_per_floor.0,
        total_wall_area_sqft: total_wall_area.0,
        perimeter_ft: perimeter.0,
        window_count: window_count(total_wall_area.0),
    }
}

/// Windows for a given total wall area: `ceil(area / 100)`, never negative.
pub fn window_count(total_wall_area_sqft: f64) -> u64 {
    let count = (total_wall_area_sqft / WALL_AREA_PER_WINDOW_SQFT).ceil();
    if count > 0.0 {
        count as u64
    } else {
        0
    }
}
