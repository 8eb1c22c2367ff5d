//! Closed-form price, volume, and revenue formulas.

/// Share of a tariff forwarded into the consumer price.
pub const DEFAULT_PASS_THROUGH: f64 = 0.7;

/// Import demand elasticity used by the revenue model.
pub const DEFAULT_IMPORT_ELASTICITY: f64 = -1.1;

/// Consumer price after a tariff is partially passed through.
///
/// `base_price * (1 + tariff_rate * pass_through_fraction)`
pub fn pass_through(base_price: f64, tariff_rate: f64, pass_through_fraction: f64) -> f64 {
    base_price * (1.0 + tariff_rate * pass_through_fraction)
}

/// First-order demand response to a proportional price change.
///
/// `volume * (1 + elasticity * price_change)`
pub fn elasticity_response(volume: f64, price_change: f64, elasticity: f64) -> f64 {
    volume * (1.0 + elasticity * price_change)
}

/// Stylized tariff revenue at `rate`.
///
/// Imports shrink linearly with the rate and are floored at zero, so
/// revenue drops to zero once demand destruction wipes out the base.
pub fn laffer_revenue(import_value: f64, rate: f64, elasticity: f64) -> f64 {
    let adjusted_imports = (import_value * (1.0 + elasticity * rate)).max(0.0);
    adjusted_imports * rate
}
