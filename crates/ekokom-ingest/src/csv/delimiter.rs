//! Field separator selection.

use std::fmt;
use std::str::FromStr;

use crate::error::IngestError;

/// Candidates scanned by [`sniff_delimiter`], in tie-break order.
const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Field separator for one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Detect from the header line.
    Auto,
    Byte(u8),
}

impl Delimiter {
    pub const COMMA: Delimiter = Delimiter::Byte(b',');
    pub const SEMICOLON: Delimiter = Delimiter::Byte(b';');

    /// Concrete separator for a file whose first line is `header_line`.
    pub fn resolve(self, header_line: &str) -> u8 {
        match self {
            Self::Auto => sniff_delimiter(header_line),
            Self::Byte(byte) => byte,
        }
    }
}

impl FromStr for Delimiter {
    type Err = IngestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "auto" => Ok(Self::Auto),
            "tab" | "\\t" | "\t" => Ok(Self::Byte(b'\t')),
            _ => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if ch.is_ascii() && ch != '"' => Ok(Self::Byte(ch as u8)),
                    _ => Err(IngestError::InvalidDelimiter(value.to_string())),
                }
            }
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Byte(b'\t') => f.write_str("tab"),
            Self::Byte(byte) => write!(f, "{}", *byte as char),
        }
    }
}

/// Picks the most frequent candidate separator outside quotes; `,` if none occur.
pub fn sniff_delimiter(header_line: &str) -> u8 {
    let mut counts = [0usize; CANDIDATES.len()];
    let mut in_quotes = false;
    for byte in header_line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(idx) = CANDIDATES.iter().position(|candidate| *candidate == byte) {
            counts[idx] += 1;
        }
    }
    let mut best = 0usize;
    for idx in 1..CANDIDATES.len() {
        if counts[idx] > counts[best] {
            best = idx;
        }
    }
    CANDIDATES[best]
}
