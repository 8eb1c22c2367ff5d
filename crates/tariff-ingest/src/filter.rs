//! Product code filtering.

use std::collections::HashSet;

use tracing::debug;

use tariff_model::{TariffTable, is_normalized_hts_code, normalize_hts_code};

/// Returns the rows whose HTS code matches one of `codes`.
///
/// Each supplied code is normalized the same way the loader normalizes the
/// table, so `"0101.21.00"`, `"1012100"` and `"01012100"` all select the same
/// rows. The result is an independent copy in table order; an empty code set
/// yields an empty table.
pub fn filter_tariffs<I, S>(table: &TariffTable, codes: I) -> TariffTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let wanted: HashSet<String> = codes
        .into_iter()
        .map(|code| normalize_hts_code(code.as_ref()))
        .collect();

    let filtered = table.select(|record| {
        if is_normalized_hts_code(&record.hts8) {
            wanted.contains(record.hts8.as_str())
        } else {
            wanted.contains(&normalize_hts_code(&record.hts8))
        }
    });
    debug!(
        codes = wanted.len(),
        rows = filtered.len(),
        "filtered tariff table"
    );
    filtered
}
