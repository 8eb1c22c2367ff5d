//! The combined tariff table.
//!
//! Rows keep the order in which they were loaded; row identity is the
//! position in the table. The column set is the typed columns followed by
//! the union of every source file's own columns in first-seen order.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::path::Path;

use polars::prelude::{Column, CsvWriter, DataFrame, IntoColumn, NamedFrom, SerWriter, Series};
use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::record::{
    AD_VAL_RATE_COLUMN, AVE_COLUMN, END_DATE_COLUMN, HTS8_COLUMN, NORMALIZED_COLUMNS,
    SOURCE_FILE_COLUMN, SOURCE_YEAR_COLUMN, TariffRecord,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TariffTable {
    extra_columns: Vec<String>,
    records: Vec<TariffRecord>,
}

/// Per-file row and rate statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSummary {
    pub source_file: String,
    pub source_year: Option<i32>,
    pub rows: usize,
    /// Rows with a usable rate (ad valorem or its equivalent).
    pub rated_rows: usize,
    pub mean_rate: Option<f64>,
    pub max_rate: Option<f64>,
}

impl TariffTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from records and the extra columns they may carry.
    pub fn from_records(extra_columns: Vec<String>, records: Vec<TariffRecord>) -> Self {
        let mut table = Self::default();
        table.add_columns(extra_columns);
        table.records = records;
        table
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TariffRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TariffRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<TariffRecord> {
        self.records
    }

    /// Source columns other than the typed ones.
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    /// Every column name, typed columns first.
    pub fn columns(&self) -> Vec<String> {
        NORMALIZED_COLUMNS
            .iter()
            .map(|name| (*name).to_string())
            .chain(self.extra_columns.iter().cloned())
            .collect()
    }

    /// Appends another table's rows after this table's rows.
    pub fn append(&mut self, other: TariffTable) {
        self.add_columns(other.extra_columns);
        self.records.extend(other.records);
    }

    /// Concatenates tables in order.
    pub fn concat(tables: impl IntoIterator<Item = TariffTable>) -> Self {
        let mut combined = Self::default();
        for table in tables {
            combined.append(table);
        }
        combined
    }

    /// Returns an independent copy of the rows matching `predicate`.
    pub fn select<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&TariffRecord) -> bool,
    {
        Self {
            extra_columns: self.extra_columns.clone(),
            records: self
                .records
                .iter()
                .filter(|record| predicate(record))
                .cloned()
                .collect(),
        }
    }

    /// Summarizes rows per source file, in load order.
    pub fn source_summaries(&self) -> Vec<SourceSummary> {
        let mut order: Vec<String> = Vec::new();
        let mut groups: BTreeMap<&str, Vec<&TariffRecord>> = BTreeMap::new();
        for record in &self.records {
            let entry = groups.entry(record.source_file.as_str()).or_default();
            if entry.is_empty() {
                order.push(record.source_file.clone());
            }
            entry.push(record);
        }
        order
            .into_iter()
            .map(|source_file| {
                let rows = groups.remove(source_file.as_str()).unwrap_or_default();
                let rates: Vec<f64> = rows
                    .iter()
                    .filter_map(|record| record.effective_rate())
                    .collect();
                let mean_rate = if rates.is_empty() {
                    None
                } else {
                    Some(rates.iter().sum::<f64>() / rates.len() as f64)
                };
                let max_rate = rates.iter().copied().reduce(f64::max);
                SourceSummary {
                    source_year: rows.first().and_then(|record| record.source_year),
                    rows: rows.len(),
                    rated_rows: rates.len(),
                    mean_rate,
                    max_rate,
                    source_file,
                }
            })
            .collect()
    }

    /// Converts the table to a Polars DataFrame.
    ///
    /// Missing values become nulls. The end date is written as ISO 8601 text.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> =
            Vec::with_capacity(NORMALIZED_COLUMNS.len() + self.extra_columns.len());

        let codes: Vec<&str> = self.records.iter().map(|r| r.hts8.as_str()).collect();
        columns.push(Series::new(HTS8_COLUMN.into(), codes).into_column());

        let rates: Vec<Option<f64>> = self.records.iter().map(|r| r.mfn_ad_val_rate).collect();
        columns.push(Series::new(AD_VAL_RATE_COLUMN.into(), rates).into_column());

        let averages: Vec<Option<f64>> = self.records.iter().map(|r| r.mfn_ave).collect();
        columns.push(Series::new(AVE_COLUMN.into(), averages).into_column());

        let dates: Vec<Option<String>> = self
            .records
            .iter()
            .map(|r| r.end_effective_date.map(|d| d.format("%Y-%m-%d").to_string()))
            .collect();
        columns.push(Series::new(END_DATE_COLUMN.into(), dates).into_column());

        let files: Vec<&str> = self.records.iter().map(|r| r.source_file.as_str()).collect();
        columns.push(Series::new(SOURCE_FILE_COLUMN.into(), files).into_column());

        let years: Vec<Option<i32>> = self.records.iter().map(|r| r.source_year).collect();
        columns.push(Series::new(SOURCE_YEAR_COLUMN.into(), years).into_column());

        for name in &self.extra_columns {
            let values: Vec<Option<&str>> = self
                .records
                .iter()
                .map(|r| r.extra.get(name).map(String::as_str))
                .collect();
            columns.push(Series::new(name.as_str().into(), values).into_column());
        }

        Ok(DataFrame::new(columns)?)
    }

    /// Writes the table as comma-separated text with a header row.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut df = self.to_dataframe()?;
        let mut file = File::create(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
        Ok(())
    }

    /// Serializes the rows as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.records)
            .map_err(|e| ModelError::Serialize(e.to_string()))
    }

    fn add_columns(&mut self, columns: Vec<String>) {
        let mut seen: HashSet<String> = self.extra_columns.iter().cloned().collect();
        for column in columns {
            if NORMALIZED_COLUMNS.contains(&column.as_str()) {
                continue;
            }
            if seen.insert(column.clone()) {
                self.extra_columns.push(column);
            }
        }
    }
}

impl<'a> IntoIterator for &'a TariffTable {
    type Item = &'a TariffRecord;
    type IntoIter = std::slice::Iter<'a, TariffRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
