use std::path::PathBuf;

use tariff_econ::LafferPoint;
use tariff_model::{SourceSummary, TariffTable};

/// Outcome of the `load` command.
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub table: TariffTable,
    pub sources: Vec<SourceSummary>,
    /// CSV export written, if one was requested.
    pub output: Option<PathBuf>,
}

/// Outcome of the `laffer` command.
#[derive(Debug, Clone)]
pub struct LafferResult {
    pub import_value: f64,
    pub elasticity: f64,
    pub points: Vec<LafferPoint>,
    pub best: Option<LafferPoint>,
}
