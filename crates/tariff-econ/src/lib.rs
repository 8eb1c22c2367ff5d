//! Elementary tariff economics.
//!
//! Pure functions over plain numbers: price pass-through, linear demand
//! response, and a stylized Laffer revenue curve. No input is range
//! checked; callers pass rates and elasticities as fractions
//! (`0.1` for 10 %).

pub mod formulas;
pub mod laffer;
pub mod scenario;

pub use formulas::{
    DEFAULT_IMPORT_ELASTICITY, DEFAULT_PASS_THROUGH, elasticity_response, laffer_revenue,
    pass_through,
};
pub use laffer::{
    LafferPoint, MAX_GRID_POINTS, laffer_curve, rate_grid, revenue_maximizing_rate,
};
pub use scenario::ScenarioParams;
