//! # File I/O Module
//!
//! The engine never touches the filesystem; this module is for the
//! callers around it:
//! - **Loading**: estimate requests and price tables from JSON files
//! - **Atomic saves**: reports are written to a `.tmp` sibling, synced,
//!   then renamed over the target so a crash never leaves half a report
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::calculations::calculate;
//! use estimate_core::file_io::{load_estimate_input, load_price_table, save_report};
//! use std::path::Path;
//!
//! let input = load_estimate_input(Path::new("house.json"))?;
//! let prices = load_price_table(Path::new("prices.json"))?;
//! let result = calculate(&input, &prices);
//!
//! save_report(&format!("Total: {:.2}", result.total), Path::new("house.txt"))?;
//! # Ok::<(), estimate_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::calculations::EstimateInput;
use crate::errors::{CalcError, CalcResult};
use crate::pricing::PriceTable;

/// Read and parse a JSON file.
///
/// `what` names the content in error messages ("price table").
pub fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> CalcResult<T> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "loaded {}", what);

    serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid {} JSON in {}: {}", what, path.display(), e))
    })
}

/// Load an estimate request.
///
/// Missing sections fall back to their defaults (concrete only, 10% labor,
/// 5% contingency).
pub fn load_estimate_input(path: &Path) -> CalcResult<EstimateInput> {
    load_json(path, "estimate request")
}

/// Load a price table.
///
/// Prices and multipliers the file does not mention keep their US-2024
/// defaults.
///
/// # Returns
///
/// * `Ok(PriceTable)` - Successfully loaded table
/// * `Err(CalcError::InvalidInput)` - A price or multiplier is negative or not finite
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_price_table(path: &Path) -> CalcResult<PriceTable> {
    let table: PriceTable = load_json(path, "price table")?;
    validate_price_table(&table)?;
    Ok(table)
}

/// Reject negative or non-finite prices and multipliers.
fn validate_price_table(table: &PriceTable) -> CalcResult<()> {
    use crate::pricing::PriceKey;
    use crate::project::BuildingType;

    for key in PriceKey::ALL {
        let price = table.unit_price(key);
        if !price.is_finite() || price < 0.0 {
            return Err(CalcError::invalid_input(
                format!("prices.{}", key.key()),
                price.to_string(),
                "Unit price must be a non-negative number",
            ));
        }
    }
    for building_type in BuildingType::ALL {
        let multiplier = table.multiplier(building_type);
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(CalcError::invalid_input(
                format!("multipliers.{}", building_type.key()),
                multiplier.to_string(),
                "Multiplier must be a non-negative number",
            ));
        }
    }
    Ok(())
}

/// Path of the temporary sibling used during an atomic write
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write bytes to a file with atomic write semantics.
///
/// The save process:
/// 1. Write to a temporary file (`<path>.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename over `path` (atomic on most filesystems)
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

/// Save a rendered text report.
///
/// # Example
///
/// ```rust,no_run
/// use estimate_core::file_io::save_report;
/// use std::path::Path;
///
/// save_report("CONSTRUCTION COST ESTIMATE", Path::new("estimate.txt"))?;
/// # Ok::<(), estimate_core::errors::CalcError>(())
/// ```
pub fn save_report(report: &str, path: &Path) -> CalcResult<()> {
    write_atomic(path, report.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PriceKey;
    use crate::project::BuildingType;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_read_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("estimate.txt");

        save_report("TOTAL ESTIMATE: $1.00", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "TOTAL ESTIMATE: $1.00");
        assert!(!tmp_path_for(&path).exists());

        // Overwrite in place
        save_report("second", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("estimate.txt");
        let err = save_report("x", &path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_partial_price_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prices.json");
        fs::write(
            &path,
            r#"{ "basis": "Denver 2025", "prices": { "concrete": 180 }, "multipliers": { "commercial": 1.3 } }"#,
        )
        .unwrap();

        let table = load_price_table(&path).unwrap();
        assert_eq!(table.basis, "Denver 2025");
        assert_eq!(table.unit_price(PriceKey::Concrete), 180.0);
        assert_eq!(table.unit_price(PriceKey::Windows), 450.0);
        assert_eq!(table.multiplier(BuildingType::Commercial), 1.3);
        assert_eq!(table.multiplier(BuildingType::Apartment), 1.15);
    }

    #[test]
    fn test_negative_price_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prices.json");
        fs::write(&path, r#"{ "prices": { "bricks": -1 } }"#).unwrap();

        let err = load_price_table(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("prices.bricks"));
    }

    #[test]
    fn test_load_estimate_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("house.json");
        fs::write(
            &path,
            r#"{ "project": { "name": "House", "length_ft": 30, "width_ft": 20, "wall_height_ft": 9 } }"#,
        )
        .unwrap();

        let input = load_estimate_input(&path).unwrap();
        assert_eq!(input.project.name, "House");
        assert!(input.materials.concrete);
        assert_eq!(input.rates.labor_rate_percent, 10.0);
    }

    #[test]
    fn test_load_request_with_unreadable_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sketch.json");
        fs::write(
            &path,
            r#"{ "project": { "length_ft": "abc", "width_ft": null, "wall_height_ft": 10 } }"#,
        )
        .unwrap();

        let input = load_estimate_input(&path).unwrap();
        assert_eq!(input.project.length_ft, 0.0);
        assert_eq!(input.project.width_ft, 0.0);
        assert_eq!(input.project.wall_height_ft, 10.0);

        let result = crate::calculations::calculate(&input, &PriceTable::default());
        assert_eq!(result.total, 0.0);
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_estimate_input(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_missing_file() {
        let err = load_price_table(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
