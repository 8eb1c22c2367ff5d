//! Tariff schedule ingestion.
//!
//! This crate locates a directory of tariff schedule text files, parses each
//! file with delimiter and encoding fallback, and normalizes the rows into a
//! single [`tariff_model::TariffTable`].
//!
//! # Features
//!
//! - **Directory Resolution**: search an ordered list of candidate directories
//! - **Delimited Reading**: comma/pipe guessing, UTF-8 then Latin-1, sniffing fallback
//! - **Normalization**: 8-digit HTS codes, numeric rates, effective end dates, source year
//! - **Filtering**: select rows by product code in any formatting
//!
//! # Example
//!
//! ```ignore
//! use tariff_ingest::{filter_tariffs, load_tariff_data};
//!
//! let table = load_tariff_data("data", None)?;
//! let horses = filter_tariffs(&table, ["0101.21.00", "0101.29.00"]);
//! ```

mod coerce;
mod error;
mod filter;
mod load;
mod reader;
mod resolve;

// === Error Types ===
pub use error::{IngestError, Result};

// === Directory Resolution ===
pub use resolve::{DEFAULT_DATA_DIR, candidate_dirs, list_txt_files, resolve_data_dir};

// === Delimited Reading ===
pub use reader::{
    Delimiter, DelimiterChoice, ParseAttempt, ParsedFile, RawTable, TextEncoding,
    guess_delimiter, parse_delimited, parse_plan, read_delimited_file, sniff_delimiter,
};

// === Loading ===
pub use coerce::{parse_date, parse_rate, source_year_from_name};
pub use load::{
    LoadOptions, MAX_FILE_SIZE, load_tariff_data, load_tariff_data_with_options,
    load_tariff_file,
};

// === Filtering ===
pub use filter::filter_tariffs;
