//! Formula parameters applied to loaded tariff records.

use serde::{Deserialize, Serialize};

use tariff_model::TariffRecord;

use crate::formulas::{DEFAULT_IMPORT_ELASTICITY, DEFAULT_PASS_THROUGH, laffer_revenue, pass_through};

/// Parameters shared by the record-level estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub pass_through_fraction: f64,
    pub import_elasticity: f64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            pass_through_fraction: DEFAULT_PASS_THROUGH,
            import_elasticity: DEFAULT_IMPORT_ELASTICITY,
        }
    }
}

impl ScenarioParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pass_through(mut self, fraction: f64) -> Self {
        self.pass_through_fraction = fraction;
        self
    }

    #[must_use]
    pub fn with_elasticity(mut self, elasticity: f64) -> Self {
        self.import_elasticity = elasticity;
        self
    }

    /// Consumer price of a good priced at `base_price` under the record's
    /// rate. `None` when the record carries no rate.
    pub fn consumer_price(&self, record: &TariffRecord, base_price: f64) -> Option<f64> {
        record
            .effective_rate()
            .map(|rate| pass_through(base_price, rate, self.pass_through_fraction))
    }

    /// Stylized revenue collected on `import_value` at the record's rate.
    pub fn stylized_revenue(&self, record: &TariffRecord, import_value: f64) -> Option<f64> {
        record
            .effective_rate()
            .map(|rate| laffer_revenue(import_value, rate, self.import_elasticity))
    }
}
