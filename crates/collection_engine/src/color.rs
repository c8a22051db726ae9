use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub const DEFAULT_COLOR_KEY: &str = "no_color";

/// Tag-pattern predicate supplied by the item-metadata side of the host.
pub trait TagMatcher {
    fn matches(&self, pattern: &str, tags: &HashSet<String>) -> bool;
}

/// Matcher for hosts without their own tag query language.
///
/// `tag` matches exactly, `prefix*` matches any tag starting with `prefix`,
/// and a leading `!` inverts the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTagMatcher;

impl TagMatcher for StandardTagMatcher {
    fn matches(&self, pattern: &str, tags: &HashSet<String>) -> bool {
        let pattern = pattern.trim();
        if let Some(inner) = pattern.strip_prefix('!') {
            return !self.matches(inner, tags);
        }
        match pattern.strip_suffix('*') {
            Some(prefix) => tags.iter().any(|tag| tag.starts_with(prefix)),
            None => tags.contains(pattern),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorBucket {
    pub key: String,
    pub rank: usize,
}

/// Ordered color patterns shared by every category. The default bucket is
/// implicit and always ranks after the last pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorOrder {
    patterns: Vec<String>,
}

impl ColorOrder {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let patterns = patterns
            .into_iter()
            .map(|pattern| pattern.into().trim().to_string())
            .filter(|pattern| !pattern.is_empty() && pattern != DEFAULT_COLOR_KEY)
            .filter(|pattern| seen.insert(pattern.clone()))
            .collect();
        Self { patterns }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn default_bucket(&self) -> ColorBucket {
        ColorBucket {
            key: DEFAULT_COLOR_KEY.to_string(),
            rank: self.patterns.len(),
        }
    }

    pub fn rank_of(&self, key: &str) -> usize {
        self.patterns
            .iter()
            .position(|pattern| pattern == key)
            .unwrap_or(self.patterns.len())
    }
}

pub fn classify(
    tags: &HashSet<String>,
    order: &ColorOrder,
    matcher: &dyn TagMatcher,
) -> ColorBucket {
    order
        .patterns
        .iter()
        .enumerate()
        .find(|(_, pattern)| matcher.matches(pattern, tags))
        .map(|(rank, pattern)| ColorBucket {
            key: pattern.clone(),
            rank,
        })
        .unwrap_or_else(|| order.default_bucket())
}
