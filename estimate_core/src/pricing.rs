//! # Price Table
//!
//! Unit prices and building-type multipliers. The table is plain data
//! handed to the [`Estimator`](crate::calculations::Estimator); nothing in
//! the engine reads prices from anywhere else, so tests and regional
//! variants can substitute their own.
//!
//! ## Default Prices (US national averages, 2024)
//!
//! | Key | Price | Per |
//! |---|---|---|
//! | concrete | 150.00 | cubic yard |
//! | bricks | 0.75 | brick |
//! | lumber | 8.00 | board foot |
//! | roofing | 5.00 | sq ft |
//! | drywall | 15.00 | 4x8 sheet |
//! | cement | 15.00 | 94 lb bag |
//! | flooring | 8.00 | sq ft |
//! | windows | 450.00 | window |
//! | electrical | 4.00 | sq ft |
//! | plumbing | 6.00 | sq ft |
//! | suspended_slab | 12.00 | sq ft |
//! | wood_frame | 6.00 | sq ft |
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::pricing::{PriceKey, PriceTable};
//! use estimate_core::project::BuildingType;
//!
//! let prices = PriceTable::default();
//! assert_eq!(prices.unit_price(PriceKey::Concrete), 150.0);
//! assert_eq!(prices.multiplier(BuildingType::Commercial), 1.25);
//!
//! // A partial JSON table overrides only what it names
//! let regional: PriceTable = serde_json::from_str(r#"{ "prices": { "concrete": 175.0 } }"#).unwrap();
//! assert_eq!(regional.unit_price(PriceKey::Concrete), 175.0);
//! assert_eq!(regional.unit_price(PriceKey::Bricks), 0.75);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::project::BuildingType;

/// Label describing where the default prices come from
pub const DEFAULT_PRICE_BASIS: &str = "US national averages (2024)";

/// Key into the unit price list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceKey {
    Concrete,
    Bricks,
    Lumber,
    Roofing,
    Drywall,
    Cement,
    Flooring,
    Windows,
    Electrical,
    Plumbing,
    SuspendedSlab,
    WoodFrame,
}

impl PriceKey {
    pub const ALL: [PriceKey; 12] = [
        PriceKey::Concrete,
        PriceKey::Bricks,
        PriceKey::Lumber,
        PriceKey::Roofing,
        PriceKey::Drywall,
        PriceKey::Cement,
        PriceKey::Flooring,
        PriceKey::Windows,
        PriceKey::Electrical,
        PriceKey::Plumbing,
        PriceKey::SuspendedSlab,
        PriceKey::WoodFrame,
    ];

    /// Snake-case key as used in JSON
    pub fn key(&self) -> &'static str {
        match self {
            PriceKey::Concrete => "concrete",
            PriceKey::Bricks => "bricks",
            PriceKey::Lumber => "lumber",
            PriceKey::Roofing => "roofing",
            PriceKey::Drywall => "drywall",
            PriceKey::Cement => "cement",
            PriceKey::Flooring => "flooring",
            PriceKey::Windows => "windows",
            PriceKey::Electrical => "electrical",
            PriceKey::Plumbing => "plumbing",
            PriceKey::SuspendedSlab => "suspended_slab",
            PriceKey::WoodFrame => "wood_frame",
        }
    }

    /// The unit the price is quoted per
    pub fn price_unit(&self) -> &'static str {
        match self {
            PriceKey::Concrete => "cubic yard",
            PriceKey::Bricks => "brick",
            PriceKey::Lumber => "board foot",
            PriceKey::Drywall => "4x8 sheet",
            PriceKey::Cement => "94 lb bag",
            PriceKey::Windows => "window",
            PriceKey::Roofing
            | PriceKey::Flooring
            | PriceKey::Electrical
            | PriceKey::Plumbing
            | PriceKey::SuspendedSlab
            | PriceKey::WoodFrame => "sq ft",
        }
    }
}

impl fmt::Display for PriceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Unit prices in dollars, one field per [`PriceKey`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitPrices {
    pub concrete: f64,
    pub bricks: f64,
    pub lumber: f64,
    pub roofing: f64,
    pub drywall: f64,
    pub cement: f64,
    pub flooring: f64,
    pub windows: f64,
    pub electrical: f64,
    pub plumbing: f64,
    pub suspended_slab: f64,
    pub wood_frame: f64,
}

impl Default for UnitPrices {
    fn default() -> Self {
        UnitPrices {
            concrete: 150.0,
            bricks: 0.75,
            lumber: 8.0,
            roofing: 5.0,
            drywall: 15.0,
            cement: 15.0,
            flooring: 8.0,
            windows: 450.0,
            electrical: 4.0,
            plumbing: 6.0,
            suspended_slab: 12.0,
            wood_frame: 6.0,
        }
    }
}

/// Cost multipliers by building type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingMultipliers {
    pub residential: f64,
    pub commercial: f64,
    pub apartment: f64,
}

impl Default for BuildingMultipliers {
    fn default() -> Self {
        BuildingMultipliers {
            residential: 1.0,
            commercial: 1.25,
            apartment: 1.15,
        }
    }
}

/// Complete pricing configuration for an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTable {
    /// Where the prices come from, printed in reports
    pub basis: String,

    /// Unit prices
    pub prices: UnitPrices,

    /// Building type multipliers
    pub multipliers: BuildingMultipliers,
}

impl Default for PriceTable {
    fn default() -> Self {
        PriceTable {
            basis: DEFAULT_PRICE_BASIS.to_string(),
            prices: UnitPrices::default(),
            multipliers: BuildingMultipliers::default(),
        }
    }
}

impl PriceTable {
    /// Look up a unit price
    pub fn unit_price(&self, key: PriceKey) -> f64 {
        let p = &self.prices;
        match key {
            PriceKey::Concrete => p.concrete,
            PriceKey::Bricks => p.bricks,
            PriceKey::Lumber => p.lumber,
            PriceKey::Roofing => p.roofing,
            PriceKey::Drywall => p.drywall,
            PriceKey::Cement => p.cement,
            PriceKey::Flooring => p.flooring,
            PriceKey::Windows => p.windows,
            PriceKey::Electrical => p.electrical,
            PriceKey::Plumbing => p.plumbing,
            PriceKey::SuspendedSlab => p.suspended_slab,
            PriceKey::WoodFrame => p.wood_frame,
        }
    }

    /// Copy of this table with one unit price replaced (builder pattern)
    pub fn with_unit_price(mut self, key: PriceKey, price: f64) -> Self {
        let p = &mut self.prices;
        let slot = match key {
            PriceKey::Concrete => &mut p.concrete,
            PriceKey::Bricks => &mut p.bricks,
            PriceKey::Lumber => &mut p.lumber,
            PriceKey::Roofing => &mut p.roofing,
            PriceKey::Drywall => &mut p.drywall,
            PriceKey::Cement => &mut p.cement,
            PriceKey::Flooring => &mut p.flooring,
            PriceKey::Windows => &mut p.windows,
            PriceKey::Electrical => &mut p.electrical,
            PriceKey::Plumbing => &mut p.plumbing,
            PriceKey::SuspendedSlab => &mut p.suspended_slab,
            PriceKey::WoodFrame => &mut p.wood_frame,
        };
        *slot = price;
        self
    }

    /// Cost multiplier for a building type
    pub fn multiplier(&self, building_type: BuildingType) -> f64 {
        match building_type {
            BuildingType::Residential => self.multipliers.residential,
            BuildingType::Commercial => self.multipliers.commercial,
            BuildingType::Apartment => self.multipliers.apartment,
        }
    }

    /// Footnote describing the rate applied for a building type,
    /// e.g. "Commercial rates applied (+25%)"
    pub fn rate_note(&self, building_type: BuildingType) -> String {
        let uplift = (self.multiplier(building_type) - 1.0) * 100.0;
        if uplift.abs() < 1e-9 {
            format!("{} rates applied", building_type.display_name())
        } else {
            format!(
                "{} rates applied ({:+}%)",
                building_type.display_name(),
                (uplift * 100.0).round() / 100.0
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prices() {
        let table = PriceTable::default();
        assert_eq!(table.unit_price(PriceKey::Bricks), 0.75);
        assert_eq!(table.unit_price(PriceKey::Windows), 450.0);
        assert_eq!(table.unit_price(PriceKey::SuspendedSlab), 12.0);
        assert_eq!(table.unit_price(PriceKey::WoodFrame), 6.0);
        assert_eq!(table.multiplier(BuildingType::Residential), 1.0);
        assert_eq!(table.multiplier(BuildingType::Apartment), 1.15);
    }

    #[test]
    fn test_with_unit_price() {
        let table = PriceTable::default().with_unit_price(PriceKey::Drywall, 18.5);
        assert_eq!(table.unit_price(PriceKey::Drywall), 18.5);
        assert_eq!(table.unit_price(PriceKey::Cement), 15.0);
    }

    #[test]
    fn test_every_key_round_trips_through_builder() {
        for (i, key) in PriceKey::ALL.into_iter().enumerate() {
            let price = 100.0 + i as f64;
            let table = PriceTable::default().with_unit_price(key, price);
            assert_eq!(table.unit_price(key), price, "key {}", key);
        }
    }

    #[test]
    fn test_json_keys_match_price_keys() {
        let json = serde_json::to_value(PriceTable::default()).unwrap();
        for key in PriceKey::ALL {
            assert!(json["prices"].get(key.key()).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_rate_notes() {
        let table = PriceTable::default();
        assert_eq!(table.rate_note(BuildingType::Residential), "Residential rates applied");
        assert_eq!(table.rate_note(BuildingType::Commercial), "Commercial rates applied (+25%)");
        assert_eq!(table.rate_note(BuildingType::Apartment), "Apartment rates applied (+15%)");
    }
}
