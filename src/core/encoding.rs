//! Output character encodings.
//!
//! Legacy accounting tools mostly ingest ISO-8859-15 or plain ASCII.
//! Encoding is a best-effort, silent degradation: ASCII output is
//! transliterated first (é → e, œ → oe, …) and any character that still
//! has no representation in the target charset becomes `?`.

use serde::{Deserialize, Serialize};

/// Target byte encoding of a text export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    /// ISO-8859-15 (Latin-9), the default for French accounting imports.
    Iso8859_15,
    Utf8,
    /// Strict ASCII with transliteration of accented characters.
    Ascii,
}

/// Encode a finished text buffer into the configured byte encoding.
pub fn encode_text(text: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::Utf8 => text.as_bytes().to_vec(),
        TextEncoding::Ascii => deunicode::deunicode(text)
            .chars()
            .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
            .collect(),
        TextEncoding::Iso8859_15 => text
            .chars()
            .map(|c| latin9_byte(c).unwrap_or(b'?'))
            .collect(),
    }
}

/// ISO-8859-15 is Latin-1 with eight code points remapped (most notably
/// U+20AC at 0xA4). The eight displaced Latin-1 characters are no longer
/// representable.
fn latin9_byte(c: char) -> Option<u8> {
    match c {
        '\u{20AC}' => Some(0xA4), // €
        '\u{0160}' => Some(0xA6), // Š
        '\u{0161}' => Some(0xA8), // š
        '\u{017D}' => Some(0xB4), // Ž
        '\u{017E}' => Some(0xB8), // ž
        '\u{0152}' => Some(0xBC), // Œ
        '\u{0153}' => Some(0xBD), // œ
        '\u{0178}' => Some(0xBE), // Ÿ
        '¤' | '¦' | '¨' | '´' | '¸' | '¼' | '½' | '¾' => None,
        c if (c as u32) <= 0xFF => Some(c as u8),
        _ => None,
    }
}
