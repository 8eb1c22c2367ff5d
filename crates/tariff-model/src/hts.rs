//! HTS product code normalization.
//!
//! Schedule files carry the 8-digit Harmonized Tariff Schedule code in many
//! shapes: dotted (`1234.56.78`), numeric with the leading zeros lost
//! (`1011000`), or with a float artifact (`1011000.0`). Every code is reduced
//! to the same canonical form so that codes from different files and from
//! user input compare equal.

/// Length of a canonical HTS code.
pub const HTS_CODE_LEN: usize = 8;

/// Normalizes a raw product code to its canonical 8-digit form.
///
/// Steps, in order:
/// 1. strip a trailing `.0` left behind by numeric parsing
/// 2. drop every non-digit character
/// 3. left-pad with zeros to 8 digits
///
/// Codes longer than 8 digits (10-digit statistical suffixes) keep their
/// leading 8 digits, which is the HTS-8 heading they belong to.
///
/// ```
/// use tariff_model::normalize_hts_code;
///
/// assert_eq!(normalize_hts_code("1234.56.78"), "12345678");
/// assert_eq!(normalize_hts_code("1011000"), "01011000");
/// assert_eq!(normalize_hts_code("1011000.0"), "01011000");
/// assert_eq!(normalize_hts_code(""), "00000000");
/// ```
pub fn normalize_hts_code(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    let digits: String = trimmed
        .chars()
        .filter(char::is_ascii_digit)
        .take(HTS_CODE_LEN)
        .collect();
    format!("{digits:0>width$}", width = HTS_CODE_LEN)
}

/// Returns true when `code` is already in canonical form.
pub fn is_normalized_hts_code(code: &str) -> bool {
    code.len() == HTS_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}
