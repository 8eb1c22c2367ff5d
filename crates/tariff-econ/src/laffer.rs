//! Revenue sweeps across a range of tariff rates.

use serde::Serialize;
use tracing::{debug, warn};

use crate::formulas::laffer_revenue;

/// Revenue at one point of a rate sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LafferPoint {
    pub rate: f64,
    /// Import value left after the demand response, floored at zero.
    pub imports: f64,
    pub revenue: f64,
}

/// Evaluates [`laffer_revenue`] at every rate, preserving order.
pub fn laffer_curve(
    import_value: f64,
    rates: impl IntoIterator<Item = f64>,
    elasticity: f64,
) -> Vec<LafferPoint> {
    let points: Vec<LafferPoint> = rates
        .into_iter()
        .map(|rate| {
            let revenue = laffer_revenue(import_value, rate, elasticity);
            let imports = (import_value * (1.0 + elasticity * rate)).max(0.0);
            LafferPoint {
                rate,
                imports,
                revenue,
            }
        })
        .collect();
    debug!(points = points.len(), elasticity, "computed laffer curve");
    points
}

/// The point with the highest revenue; the earliest wins a tie.
///
/// Returns `None` for an empty curve. NaN revenues never win.
pub fn revenue_maximizing_rate(points: &[LafferPoint]) -> Option<LafferPoint> {
    let mut best: Option<LafferPoint> = None;
    for point in points {
        if point.revenue.is_nan() {
            continue;
        }
        if best.is_none_or(|b| point.revenue > b.revenue) {
            best = Some(*point);
        }
    }
    best
}

/// Upper bound on the number of rates [`rate_grid`] produces.
pub const MAX_GRID_POINTS: usize = 10_000;

/// Inclusive grid of rates from `start` to `end` in `step` increments.
///
/// Rates are computed as `start + i * step` so error does not accumulate.
/// A non-positive or non-finite step, a non-finite bound, or `end < start`
/// yields `[start]`. Grids longer than [`MAX_GRID_POINTS`] are cut off at
/// that many points.
pub fn rate_grid(start: f64, end: f64, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0 && start.is_finite() && end.is_finite()) || end < start {
        return vec![start];
    }
    // tolerate float error on the last point
    let intervals = ((end - start) / step + 1e-9).floor();
    let last = (MAX_GRID_POINTS - 1) as f64;
    if intervals > last {
        warn!(
            start,
            end,
            step,
            max_points = MAX_GRID_POINTS,
            "rate grid truncated"
        );
    }
    let count = intervals.min(last) as usize;
    (0..=count).map(|i| start + i as f64 * step).collect()
}
