//! Star catalog reader
//!
//! The catalog is a CSV export with one row per object. Recognised headers
//! are `NB_SYS`, `OBJ_CAT`, `OBJ_NAME`, `SYSTEM_NAME`, `RA`, `DEC`,
//! `PARALLAX` and `SP_TYPE`; other columns are ignored. Empty or missing
//! cells take zero/empty defaults. A row that cannot be parsed (wrong field
//! count, non-numeric coordinates) is skipped with a warning.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::core::error::{MapperError, Result, ResultExt};
use crate::core::models::RawObservation;

lazy_static! {
    static ref SPECTRAL_LETTERS: Regex = Regex::new(r"^[A-Z]+").unwrap();
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "NB_SYS", default)]
    system_group: Option<i64>,
    #[serde(rename = "OBJ_CAT", default)]
    category: Option<String>,
    #[serde(rename = "OBJ_NAME", default)]
    object_name: Option<String>,
    #[serde(rename = "SYSTEM_NAME", default)]
    system_name: Option<String>,
    #[serde(rename = "RA", default)]
    ra: Option<f64>,
    #[serde(rename = "DEC", default)]
    dec: Option<f64>,
    #[serde(rename = "PARALLAX", default)]
    parallax: Option<f64>,
    #[serde(rename = "SP_TYPE", default)]
    spectral_type: Option<String>,
}

impl From<CatalogRow> for RawObservation {
    fn from(row: CatalogRow) -> Self {
        RawObservation {
            system_group: row.system_group.unwrap_or_default(),
            category: row.category.unwrap_or_default(),
            object_name: row.object_name.unwrap_or_default(),
            system_name: row.system_name.unwrap_or_default(),
            ra: row.ra.unwrap_or_default(),
            dec: row.dec.unwrap_or_default(),
            parallax: row.parallax.unwrap_or_default(),
            spectral_type: row
                .spectral_type
                .as_deref()
                .map(normalize_spectral_type)
                .unwrap_or_default(),
        }
    }
}

/// Reduce a free-text spectral type to its leading uppercase letters.
///
/// `"M5.5Ve"` becomes `"M"`, `"DA7"` becomes `"DA"`, and anything not
/// starting with an uppercase letter becomes empty.
///
/// Only the leading run is kept. Keeping every uppercase letter in the
/// string would turn `"M5.5Ve"` into `"MV"` and `"K1III"` into `"KIII"`,
/// mixing the luminosity class into the type. Networks written by tools
/// that normalize that way will show different `spectral_type` values
/// for the same catalog.
pub fn normalize_spectral_type(raw: &str) -> String {
    SPECTRAL_LETTERS
        .find(raw.trim())
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Read catalog rows from a CSV file
pub fn read_catalog(path: &Path) -> Result<Vec<RawObservation>> {
    if !path.exists() {
        return Err(MapperError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    read_catalog_from(BufReader::new(file)).context(format!("reading catalog {}", path.display()))
}

/// Read catalog rows from any CSV source
pub fn read_catalog_from<R: Read>(reader: R) -> Result<Vec<RawObservation>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in csv_reader.deserialize::<CatalogRow>() {
        match result {
            Ok(row) => rows.push(RawObservation::from(row)),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line());
                warn!(line = ?line, error = %e, "skipping malformed catalog row");
                skipped += 1;
            }
        }
    }

    debug!(rows = rows.len(), skipped, "catalog read");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "NB_SYS,OBJ_CAT,OBJ_NAME,SYSTEM_NAME,RA,DEC,PARALLAX,SP_TYPE\n";

    #[test]
    fn test_normalize_spectral_type() {
        assert_eq!(normalize_spectral_type("M5.5Ve"), "M");
        assert_eq!(normalize_spectral_type("G2V"), "G");
        assert_eq!(normalize_spectral_type("DA7"), "DA");
        assert_eq!(normalize_spectral_type("  K1 "), "K");
        assert_eq!(normalize_spectral_type("sdM"), "");
        assert_eq!(normalize_spectral_type(""), "");
    }

    #[test]
    fn test_luminosity_class_is_dropped() {
        assert_eq!(normalize_spectral_type("K1III"), "K");
        assert_eq!(normalize_spectral_type("M5.5Ve"), "M");
        assert_eq!(normalize_spectral_type("DQ9 V"), "DQ");
    }

    #[test]
    fn test_reads_rows_in_order() {
        let csv = format!(
            "{}1,*,alf Cen A,alf Cen,219.9,-60.8,747.1,G2V\n1,*,alf Cen B,alf Cen,219.9,-60.8,747.1,K1V\n2,WD,Sirius B,Sirius,101.3,-16.7,379.2,DA2\n",
            HEADER
        );
        let rows = read_catalog_from(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].object_name, "alf Cen A");
        assert_eq!(rows[0].system_group, 1);
        assert_eq!(rows[0].spectral_type, "G");
        assert_eq!(rows[1].spectral_type, "K");
        assert_eq!(rows[2].category, "WD");
        assert_eq!(rows[2].system_name, "Sirius");
        assert_eq!(rows[2].spectral_type, "DA");
        assert_eq!(rows[2].parallax, 379.2);
    }

    #[test]
    fn test_empty_cells_default_to_zero() {
        let csv = format!("{}3,*,Lonely,,,,,\n", HEADER);
        let rows = read_catalog_from(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ra, 0.0);
        assert_eq!(rows[0].dec, 0.0);
        assert_eq!(rows[0].parallax, 0.0);
        assert_eq!(rows[0].system_name, "");
        assert_eq!(rows[0].spectral_type, "");
    }

    #[test]
    fn test_missing_columns_take_defaults() {
        let csv = "NB_SYS,OBJ_NAME,PARALLAX\n4,Barnard's Star,546.9\n";
        let rows = read_catalog_from(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "");
        assert_eq!(rows[0].parallax, 546.9);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let csv = format!(
            "{}1,*,good,,10,20,100,G\n2,*,bad ra,,abc,20,100,G\n3,*,short\n4,*,also good,,30,40,200,K\n",
            HEADER
        );
        let rows = read_catalog_from(csv.as_bytes()).unwrap();

        let names: Vec<_> = rows.iter().map(|r| r.object_name.as_str()).collect();
        assert_eq!(names, vec!["good", "also good"]);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = "NB_SYS,OBJ_CAT,OBJ_NAME,NOTES,PARALLAX\n5,*,Wolf 359,flare star,415.2\n";
        let rows = read_catalog_from(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].object_name, "Wolf 359");
    }

    #[test]
    fn test_missing_file() {
        let err = read_catalog(Path::new("/nonexistent/catalog.csv")).unwrap_err();
        assert!(matches!(err, MapperError::FileNotFound { .. }));
    }
}
