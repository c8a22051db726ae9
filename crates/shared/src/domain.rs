use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(CategoryId);

/// Orderings a category can be displayed under.
///
/// Declaration order is the cycle order; [`SortMode::ALL`] is the single
/// source of truth for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Canonical,
    Alphabetical,
    Price,
    Count,
    Color,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Canonical,
        SortMode::Alphabetical,
        SortMode::Price,
        SortMode::Count,
        SortMode::Color,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        match self {
            SortMode::Canonical => 0,
            SortMode::Alphabetical => 1,
            SortMode::Price => 2,
            SortMode::Count => 3,
            SortMode::Color => 4,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Canonical => "canonical",
            SortMode::Alphabetical => "alphabetical",
            SortMode::Price => "price",
            SortMode::Count => "count",
            SortMode::Color => "color",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleDirection {
    Forward,
    Backward,
}

/// What a category's count column measures. Picks the Count sort label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountKind {
    Shipped,
    Caught,
    Found,
    Cooked,
}

/// Input events a host forwards for one category tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostTrigger {
    Open,
    Select,
    AltSelect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_declaration_order() {
        for (position, mode) in SortMode::ALL.into_iter().enumerate() {
            assert_eq!(mode.index(), position);
            assert_eq!(SortMode::from_index(position), mode);
        }
    }

    #[test]
    fn parses_mode_names_case_insensitively() {
        assert_eq!(SortMode::parse("Price"), Some(SortMode::Price));
        assert_eq!(SortMode::parse(" color "), Some(SortMode::Color));
        assert_eq!(SortMode::parse("shipped"), None);
    }

    #[test]
    fn serializes_mode_as_snake_case() {
        let raw = serde_json::to_string(&SortMode::Alphabetical).expect("serialize");
        assert_eq!(raw, "\"alphabetical\"");
    }
}
