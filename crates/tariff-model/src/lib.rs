//! Tariff schedule data model.
//!
//! - **hts**: HTS product code normalization shared by the loader and the filter
//! - **record**: one normalized row of a tariff schedule
//! - **table**: the combined, ordered table built from every schedule file
//! - **error**: errors raised while exporting tables

pub mod error;
pub mod hts;
pub mod record;
pub mod table;

pub use error::{ModelError, Result};
pub use hts::{HTS_CODE_LEN, is_normalized_hts_code, normalize_hts_code};
pub use record::{
    AD_VAL_RATE_COLUMN, AVE_COLUMN, END_DATE_COLUMN, HTS8_COLUMN, NORMALIZED_COLUMNS,
    SOURCE_FILE_COLUMN, SOURCE_YEAR_COLUMN, TariffRecord,
};
pub use table::{SourceSummary, TariffTable};
