//! Domestic/foreign classification of registry origin flags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::fold_case;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OriginClass {
    Domestic,
    Foreign,
}

impl OriginClass {
    /// Report order: domestic view first.
    pub const ALL: [OriginClass; 2] = [OriginClass::Domestic, OriginClass::Foreign];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::Foreign => "foreign",
        }
    }
}

impl fmt::Display for OriginClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides which origin flags mark a foreign supplier.
///
/// A flag is split into alphanumeric tokens; it is foreign when any token
/// equals one of the markers, ignoring case. Everything else is domestic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginPolicy {
    pub foreign_markers: Vec<String>,
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self {
            foreign_markers: vec!["ne".to_string(), "foreign".to_string()],
        }
    }
}

impl OriginPolicy {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            foreign_markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classify(&self, flag: &str) -> OriginClass {
        let lowered = fold_case(flag);
        let is_foreign = lowered
            .split(|ch: char| !ch.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .any(|token| {
                self.foreign_markers
                    .iter()
                    .any(|marker| fold_case(marker.trim()) == token)
            });
        if is_foreign {
            OriginClass::Foreign
        } else {
            OriginClass::Domestic
        }
    }
}
