use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use tariff_econ::{
    elasticity_response, laffer_curve, pass_through, rate_grid, revenue_maximizing_rate,
};
use tariff_ingest::{LoadOptions, filter_tariffs, load_tariff_data_with_options};
use tariff_model::TariffTable;

use crate::cli::{
    ElasticityArgs, FilterArgs, LafferArgs, LoadArgs, PassThroughArgs, SourceArgs,
};
use crate::types::{LafferResult, LoadResult};

/// Rates swept by `laffer` when neither `--rate` nor `--sweep` is given.
const DEFAULT_SWEEP: (f64, f64, f64) = (0.0, 1.0, 0.05);

pub fn run_load(args: &LoadArgs) -> Result<LoadResult> {
    let table = load_source(&args.source)?;
    let output = match &args.output {
        Some(path) => {
            table
                .write_csv(path)
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), rows = table.len(), "wrote combined table");
            Some(path.clone())
        }
        None => None,
    };
    Ok(LoadResult {
        sources: table.source_summaries(),
        table,
        output,
    })
}

pub fn run_filter(args: &FilterArgs) -> Result<TariffTable> {
    let table = load_source(&args.source)?;
    let filtered = filter_tariffs(&table, &args.codes);
    info!(
        codes = args.codes.len(),
        matched = filtered.len(),
        "filtered tariff rows"
    );
    Ok(filtered)
}

pub fn run_pass_through(args: &PassThroughArgs) -> f64 {
    pass_through(args.price, args.rate, args.fraction)
}

pub fn run_elasticity(args: &ElasticityArgs) -> f64 {
    elasticity_response(args.volume, args.price_change, args.elasticity)
}

pub fn run_laffer(args: &LafferArgs) -> LafferResult {
    let rates = match (args.rate, args.sweep.as_deref()) {
        (Some(rate), _) => vec![rate],
        (None, Some([start, end, step])) => rate_grid(*start, *end, *step),
        (None, _) => {
            let (start, end, step) = DEFAULT_SWEEP;
            rate_grid(start, end, step)
        }
    };
    debug!(rates = rates.len(), "evaluating laffer curve");
    let points = laffer_curve(args.imports, rates, args.elasticity);
    LafferResult {
        import_value: args.imports,
        elasticity: args.elasticity,
        best: revenue_maximizing_rate(&points),
        points,
    }
}

fn load_source(args: &SourceArgs) -> Result<TariffTable> {
    let span = info_span!("load", data_dir = %args.data_dir.display());
    let _guard = span.enter();
    let start = Instant::now();
    let options = LoadOptions::new().with_delimiter(args.sep.map(Into::into));
    let table = load_tariff_data_with_options(&args.data_dir, &options)
        .with_context(|| format!("load tariff data from {}", args.data_dir.display()))?;
    info!(
        rows = table.len(),
        duration_ms = start.elapsed().as_millis(),
        "tariff data ready"
    );
    Ok(table)
}
