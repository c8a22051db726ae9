use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use collection_engine::{CategoryDef, OrderSource, Translator};
use thiserror::Error;
use tracing::{debug, warn};

pub const COLOR_ORDER_FILE: &str = "color_sorting.json";
pub const TRANSLATIONS_FILE: &str = "translations.json";

#[derive(Debug, Error)]
pub enum OrderSourceError {
    #[error("{} does not exist", path.display())]
    Missing { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("{} is not a JSON list of strings: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{} is empty", path.display())]
    Empty { path: PathBuf },
}

/// Reads order lists and translations from one assets directory.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read_id_list(&self, file_name: &str) -> Result<Vec<String>, OrderSourceError> {
        let path = self.root.join(file_name);
        let raw = read_source(&path)?;
        let stripped = strip_json_comments(&raw);
        if stripped.trim().is_empty() {
            return Err(OrderSourceError::Empty { path });
        }
        let ids: Vec<String> = serde_json::from_str(&stripped)
            .map_err(|source| OrderSourceError::Malformed {
                path: path.clone(),
                source,
            })?;
        if ids.is_empty() {
            return Err(OrderSourceError::Empty { path });
        }
        debug!(file = %path.display(), ids = ids.len(), "read id list");
        Ok(ids)
    }

    /// Translation table for the current locale. A missing file is normal
    /// (built-in labels apply); a broken one is logged and ignored.
    pub fn load_translations(&self) -> TranslationTable {
        let path = self.root.join(TRANSLATIONS_FILE);
        let raw = match read_source(&path) {
            Ok(raw) => raw,
            Err(OrderSourceError::Missing { .. }) => {
                debug!(file = %path.display(), "no translations; using built-in labels");
                return TranslationTable::default();
            }
            Err(error) => {
                warn!(%error, "failed to read translations; using built-in labels");
                return TranslationTable::default();
            }
        };
        match serde_json::from_str::<HashMap<String, String>>(&strip_json_comments(&raw)) {
            Ok(entries) => {
                debug!(file = %path.display(), entries = entries.len(), "loaded translations");
                TranslationTable(entries)
            }
            Err(error) => {
                warn!(file = %path.display(), %error, "malformed translations; using built-in labels");
                TranslationTable::default()
            }
        }
    }
}

impl OrderSource for AssetStore {
    fn canonical_order(&self, def: &CategoryDef) -> anyhow::Result<Vec<String>> {
        Ok(self.read_id_list(&def.order_file)?)
    }

    fn color_patterns(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.read_id_list(COLOR_ORDER_FILE)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable(HashMap<String, String>);

impl TranslationTable {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for TranslationTable {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Translator for TranslationTable {
    fn translate(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

fn read_source(path: &Path) -> Result<String, OrderSourceError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            OrderSourceError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            OrderSourceError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Removes `//` and `/* */` comments so hand-edited order files parse as
/// plain JSON. Comment markers inside string literals are kept.
pub fn strip_json_comments(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = '\0';
                for skipped in chars.by_ref() {
                    if previous == '*' && skipped == '/' {
                        break;
                    }
                    previous = skipped;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
