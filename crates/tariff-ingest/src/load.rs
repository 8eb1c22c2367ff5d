//! Tariff schedule loading and normalization.

use std::path::Path;

use tracing::{debug, info, info_span};

use tariff_model::{
    AD_VAL_RATE_COLUMN, AVE_COLUMN, END_DATE_COLUMN, HTS8_COLUMN, NORMALIZED_COLUMNS,
    TariffRecord, TariffTable, normalize_hts_code,
};

use crate::coerce::{parse_date, parse_rate, source_year_from_name};
use crate::error::{IngestError, Result};
use crate::reader::{Delimiter, RawTable, read_delimited_file};
use crate::resolve::{list_txt_files, resolve_data_dir};

/// Maximum schedule file size (500 MB default).
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Options controlling how schedule files are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Delimiter to use instead of guessing from the first line.
    pub force_delimiter: Option<Delimiter>,
    /// Files larger than this fail the load.
    pub max_file_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            force_delimiter: None,
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Option<Delimiter>) -> Self {
        self.force_delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

/// Loads every schedule file under `data_dir` into one combined table.
///
/// `data_dir` is resolved against the candidate list of
/// [`crate::resolve_data_dir`]. Files are read in filename order and their
/// rows concatenated. The first file that cannot be parsed aborts the load.
///
/// # Example
///
/// ```ignore
/// use tariff_ingest::{Delimiter, load_tariff_data};
///
/// let table = load_tariff_data("data", Some(Delimiter::Pipe))?;
/// println!("{} rows", table.len());
/// ```
pub fn load_tariff_data(
    data_dir: impl AsRef<Path>,
    force_sep: Option<Delimiter>,
) -> Result<TariffTable> {
    load_tariff_data_with_options(data_dir, &LoadOptions::new().with_delimiter(force_sep))
}

/// Loads every schedule file under `data_dir` with explicit options.
pub fn load_tariff_data_with_options(
    data_dir: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<TariffTable> {
    let dir = resolve_data_dir(data_dir.as_ref())?;
    let span = info_span!("load_tariff_data", dir = %dir.display());
    let _guard = span.enter();

    let files = list_txt_files(&dir)?;
    let mut combined = TariffTable::new();
    for path in &files {
        combined.append(load_tariff_file(path, options)?);
    }

    info!(files = files.len(), rows = combined.len(), "loaded tariff data");
    Ok(combined)
}

/// Loads and normalizes a single schedule file.
pub fn load_tariff_file(path: &Path, options: &LoadOptions) -> Result<TariffTable> {
    check_file_size(path, options.max_file_size)?;
    let parsed = read_delimited_file(path, options.force_delimiter)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let source_year = source_year_from_name(&stem);

    let table = normalize_table(parsed.table, &file_name, source_year, path)?;
    info!(
        file = %file_name,
        rows = table.len(),
        delimiter = %parsed.delimiter,
        encoding = %parsed.encoding,
        source_year = ?source_year,
        "loaded schedule file"
    );
    Ok(table)
}

/// Check file size against a limit.
fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::file_read(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Converts a parsed file into typed records.
fn normalize_table(
    raw: RawTable,
    file_name: &str,
    source_year: Option<i32>,
    path: &Path,
) -> Result<TariffTable> {
    let hts_idx = raw
        .column_index(HTS8_COLUMN)
        .ok_or_else(|| IngestError::MissingColumn {
            column: HTS8_COLUMN.to_string(),
            path: path.to_path_buf(),
        })?;
    let rate_idx = raw.column_index(AD_VAL_RATE_COLUMN);
    let ave_idx = raw.column_index(AVE_COLUMN);
    let date_idx = raw.column_index(END_DATE_COLUMN);
    if rate_idx.is_none() {
        debug!(file = %file_name, "no {AD_VAL_RATE_COLUMN} column, rates left missing");
    }

    // first occurrence of each untyped header
    let mut extra: Vec<(usize, String)> = Vec::new();
    for (idx, header) in raw.headers.iter().enumerate() {
        if header.is_empty() || NORMALIZED_COLUMNS.contains(&header.as_str()) {
            continue;
        }
        if extra.iter().all(|(_, seen)| seen != header) {
            extra.push((idx, header.clone()));
        }
    }

    let mut records = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        let mut record = TariffRecord::new(normalize_hts_code(&row[hts_idx]), file_name);
        record.mfn_ad_val_rate = rate_idx.and_then(|idx| parse_rate(&row[idx]));
        record.mfn_ave = ave_idx.and_then(|idx| parse_rate(&row[idx]));
        record.end_effective_date = date_idx.and_then(|idx| parse_date(&row[idx]));
        record.source_year = source_year;
        for (idx, header) in &extra {
            let value = &row[*idx];
            if !value.is_empty() {
                record.extra.insert(header.clone(), value.clone());
            }
        }
        records.push(record);
    }

    let extra_columns = extra.into_iter().map(|(_, header)| header).collect();
    Ok(TariffTable::from_records(extra_columns, records))
}
