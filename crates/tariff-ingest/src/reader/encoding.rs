//! Text decoding for schedule files.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::WINDOWS_1252;

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encodings tried when decoding a schedule file, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// ISO-8859-1, decoded with the WHATWG `windows-1252` superset.
    Latin1,
}

impl TextEncoding {
    /// Decodes `bytes`, stripping a leading UTF-8 byte order mark under
    /// either encoding.
    ///
    /// UTF-8 decoding is strict; Latin-1 maps every byte and never fails.
    pub fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>, String> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        match self {
            TextEncoding::Utf8 => {
                let text = std::str::from_utf8(bytes).map_err(|e| e.to_string())?;
                Ok(Cow::Borrowed(text))
            }
            TextEncoding::Latin1 => {
                let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
                Ok(text)
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => f.write_str("utf-8"),
            TextEncoding::Latin1 => f.write_str("latin-1"),
        }
    }
}
