//! Delimited text reading.

mod delimiter;
mod encoding;
mod table;

pub use delimiter::{Delimiter, guess_delimiter, sniff_delimiter};
pub use encoding::TextEncoding;
pub use table::{
    DelimiterChoice, ParseAttempt, ParsedFile, RawTable, parse_delimited, parse_plan,
    read_delimited_file,
};
