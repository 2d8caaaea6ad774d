//! Translation catalog lookup
//!
//! Labels and documentation text are resolved through a [`TranslationProvider`]
//! that is injected explicitly wherever text is generated. There is no global
//! locale state; swapping locales means swapping providers.
//!
//! The bundled [`Catalog`] implementation is an in-memory key/text map loaded
//! from a TOML file, e.g.:
//!
//! ```toml
//! "UserCountry_Country" = "Country"
//! "UserCountry_Countries" = "Countries"
//!
//! [bounce_count]
//! rate = "Bounce Rate"
//! ```
//!
//! Nested tables become contextual entries: the `rate` entry above is found by
//! `resolve("bounce_count", Some("rate"))`.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Read-only lookup of localized text.
///
/// Implementations must be safe for concurrent read access; the engine only
/// ever calls [`resolve`](TranslationProvider::resolve).
pub trait TranslationProvider: Send + Sync {
    /// Resolve a label key, optionally qualified by a context (such as a
    /// computed-formula kind).
    ///
    /// Returns `None` when the catalog has no entry for the key, or no entry
    /// for the key under the given context. Callers decide what the fallback
    /// is; the provider never invents text.
    fn resolve(&self, key: &str, context: Option<&str>) -> Option<String>;
}

/// In-memory translation catalog.
///
/// Contextual entries are stored under `key.context`; plain entries under the
/// key itself. The two namespaces never shadow each other.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from `(key, text)` pairs.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Insert or replace a plain entry.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Insert or replace a contextual entry.
    pub fn insert_contextual(
        &mut self,
        key: &str,
        context: &str,
        text: impl Into<String>,
    ) {
        self.entries
            .insert(contextual_key(key, context), text.into());
    }

    /// Parse a catalog from TOML text.
    ///
    /// Top-level string values become plain entries; nested tables are
    /// flattened with `.` so they act as contextual entries. Any non-string
    /// leaf value is rejected.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let value: toml::Value = toml::from_str(raw)?;
        let table = value
            .as_table()
            .ok_or_else(|| Error::Catalog("catalog root must be a table".to_string()))?;

        let mut entries = HashMap::new();
        flatten_table(table, None, &mut entries)?;
        Ok(Self { entries })
    }

    /// Load a catalog from a TOML file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Number of entries in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TranslationProvider for Catalog {
    fn resolve(&self, key: &str, context: Option<&str>) -> Option<String> {
        let lookup = match context {
            Some(ctx) => self.entries.get(&contextual_key(key, ctx)),
            None => self.entries.get(key),
        };
        lookup.cloned()
    }
}

fn contextual_key(key: &str, context: &str) -> String {
    format!("{key}.{context}")
}

fn flatten_table(
    table: &toml::value::Table,
    prefix: Option<&str>,
    entries: &mut HashMap<String, String>,
) -> Result<()> {
    for (key, value) in table {
        let full_key = match prefix {
            Some(p) => contextual_key(p, key),
            None => key.clone(),
        };
        match value {
            toml::Value::String(text) => {
                entries.insert(full_key, text.clone());
            }
            toml::Value::Table(nested) => {
                flatten_table(nested, Some(&full_key), entries)?;
            }
            other => {
                return Err(Error::Catalog(format!(
                    "catalog entry {full_key} must be a string, got {}",
                    other.type_str()
                )));
            }
        }
    }
    Ok(())
}
