//! # Unit Types
//!
//! Type-safe wrappers for the takeoff units the estimator works in. These
//! are plain f64 newtypes: they catch unit confusion at compile time and
//! serialize as bare numbers.
//!
//! ## US Customary Units
//!
//! - Length: feet (ft), inches (in)
//! - Area: square feet (sq ft)
//! - Volume: cubic feet (cu ft), cubic yards (cu yd, the unit ready-mix
//!   concrete is sold in)
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{CubicYards, Feet, Inches};
//!
//! let slab: Feet = Inches(6.0).into();
//! assert_eq!(slab.0, 0.5);
//!
//! let volume = Feet(27.0) * Feet(2.0) * slab;
//! let yards: CubicYards = volume.into();
//! assert_eq!(yards.0, 1.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Cubic feet per cubic yard
pub const CU_FT_PER_CU_YD: f64 = 27.0;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl Mul<Feet> for Feet {
    type Output = SqFt;
    fn mul(self, rhs: Feet) -> SqFt {
        SqFt(self.0 * rhs.0)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuFt(pub f64);

/// Volume in cubic yards
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicYards(pub f64);

impl Mul<Feet> for SqFt {
    type Output = CuFt;
    fn mul(self, rhs: Feet) -> CuFt {
        CuFt(self.0 * rhs.0)
    }
}

impl From<CuFt> for CubicYards {
    fn from(cuft: CuFt) -> Self {
        CubicYards(cuft.0 / CU_FT_PER_CU_YD)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(SqFt);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_to_feet() {
        let t: Feet = Inches(4.0).into();
        assert_eq!(t.0, 4.0 / 12.0);
    }

    #[test]
    fn test_area_and_volume() {
        let area = Feet(60.0) * Feet(40.0);
        assert_eq!(area, SqFt(2400.0));

        let volume = area * Feet(0.5);
        assert_eq!(volume, CuFt(1200.0));

        let yards: CubicYards = CuFt(54.0).into();
        assert_eq!(yards.0, 2.0);
    }

    #[test]
    fn test_perimeter_arithmetic() {
        let perimeter = (Feet(60.0) + Feet(40.0)) * 2.0;
        assert_eq!(perimeter, Feet(200.0));
        assert_eq!(SqFt(2400.0) * 3.0, SqFt(7200.0));
    }

    #[test]
    fn test_serialization() {
        let yd = CubicYards(29.5);
        let json = serde_json::to_string(&yd).unwrap();
        assert_eq!(json, "29.5");

        let roundtrip: CubicYards = serde_json::from_str(&json).unwrap();
        assert_eq!(yd, roundtrip);
    }
}
