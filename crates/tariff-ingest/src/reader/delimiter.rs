//! Field delimiter guessing and sniffing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Field delimiters recognized in schedule files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delimiter {
    Comma,
    Pipe,
    Semicolon,
    Tab,
}

impl Delimiter {
    /// Candidates considered when sniffing, in tie-break order.
    pub const ALL: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Tab,
        Delimiter::Pipe,
    ];

    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
        }
    }

    pub fn as_byte(self) -> u8 {
        self.as_char() as u8
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Tab => f.write_str("'\\t'"),
            other => write!(f, "'{}'", other.as_char()),
        }
    }
}

/// Guesses the delimiter from a file's first line.
///
/// Comma wins unless the line has strictly more pipes than commas.
pub fn guess_delimiter(first_line: &str) -> Delimiter {
    let commas = first_line.matches(',').count();
    let pipes = first_line.matches('|').count();
    if commas >= pipes {
        Delimiter::Comma
    } else {
        Delimiter::Pipe
    }
}

/// Number of non-empty lines examined when sniffing.
const SNIFF_LINES: usize = 10;

/// Sniffs the delimiter from a text sample.
///
/// Each candidate is scored by its average count per line divided by one
/// plus the standard deviation of those counts, so a delimiter that appears
/// often and consistently wins. Returns `None` when no candidate appears.
pub fn sniff_delimiter(sample: &str) -> Option<Delimiter> {
    let lines: Vec<&str> = sample
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();
    if lines.is_empty() {
        return None;
    }

    let mut best: Option<(Delimiter, f64)> = None;
    for delimiter in Delimiter::ALL {
        let counts: Vec<f64> = lines
            .iter()
            .map(|line| line.matches(delimiter.as_char()).count() as f64)
            .collect();
        let avg = counts.iter().sum::<f64>() / counts.len() as f64;
        if avg == 0.0 {
            continue;
        }
        let variance =
            counts.iter().map(|count| (count - avg).powi(2)).sum::<f64>() / counts.len() as f64;
        let score = avg / (1.0 + variance.sqrt());
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((delimiter, score));
        }
    }
    best.map(|(delimiter, _)| delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_prefers_comma_on_tie() {
        assert_eq!(guess_delimiter("hts8"), Delimiter::Comma);
        assert_eq!(guess_delimiter("a,b|c"), Delimiter::Comma);
        assert_eq!(guess_delimiter("a,b,c|d"), Delimiter::Comma);
    }

    #[test]
    fn test_guess_pipe_when_more_pipes() {
        assert_eq!(guess_delimiter("hts8|brief_description|mfn_ad_val_rate"), Delimiter::Pipe);
        assert_eq!(guess_delimiter("a|b|c,d"), Delimiter::Pipe);
    }

    #[test]
    fn test_sniff_consistent_delimiter() {
        let sample = "hts8;desc;rate\n01011000;Horses, live;0\n01012000;Asses;0.068\n";
        assert_eq!(sniff_delimiter(sample), Some(Delimiter::Semicolon));
    }

    #[test]
    fn test_sniff_tab() {
        let sample = "hts8\trate\n01011000\t0\n";
        assert_eq!(sniff_delimiter(sample), Some(Delimiter::Tab));
    }

    #[test]
    fn test_sniff_none_without_delimiters() {
        assert_eq!(sniff_delimiter("hts8\n01011000\n"), None);
        assert_eq!(sniff_delimiter(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Delimiter::Pipe.to_string(), "'|'");
        assert_eq!(Delimiter::Tab.to_string(), "'\\t'");
    }
}
