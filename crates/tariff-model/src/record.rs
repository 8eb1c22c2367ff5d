//! A single normalized tariff schedule row.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 8-digit HTS product code column.
pub const HTS8_COLUMN: &str = "hts8";
/// MFN ad valorem rate column.
pub const AD_VAL_RATE_COLUMN: &str = "mfn_ad_val_rate";
/// MFN ad valorem equivalent (average) column.
pub const AVE_COLUMN: &str = "mfn_ave";
/// Effective end date column.
pub const END_DATE_COLUMN: &str = "end_effective_date";
/// Source file name, added by the loader.
pub const SOURCE_FILE_COLUMN: &str = "source_file";
/// Source year parsed from the file name, added by the loader.
pub const SOURCE_YEAR_COLUMN: &str = "source_year";

/// Columns that receive typed coercion, in output order.
pub const NORMALIZED_COLUMNS: [&str; 6] = [
    HTS8_COLUMN,
    AD_VAL_RATE_COLUMN,
    AVE_COLUMN,
    END_DATE_COLUMN,
    SOURCE_FILE_COLUMN,
    SOURCE_YEAR_COLUMN,
];

/// One row of the combined tariff table.
///
/// Typed fields hold the coerced columns; anything unparseable is `None`.
/// Every other column from the source file is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffRecord {
    /// Canonical 8-digit HTS code.
    pub hts8: String,
    pub mfn_ad_val_rate: Option<f64>,
    pub mfn_ave: Option<f64>,
    pub end_effective_date: Option<NaiveDate>,
    pub source_file: String,
    pub source_year: Option<i32>,
    /// Remaining source columns (header -> raw cell). Empty cells are omitted.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl TariffRecord {
    /// Creates a record with only the code and provenance set.
    pub fn new(hts8: impl Into<String>, source_file: impl Into<String>) -> Self {
        Self {
            hts8: hts8.into(),
            mfn_ad_val_rate: None,
            mfn_ave: None,
            end_effective_date: None,
            source_file: source_file.into(),
            source_year: None,
            extra: BTreeMap::new(),
        }
    }

    /// The rate to use for estimates: the ad valorem rate, falling back to
    /// the ad valorem equivalent when the schedule has no plain rate.
    pub fn effective_rate(&self) -> Option<f64> {
        self.mfn_ad_val_rate.or(self.mfn_ave)
    }
}
