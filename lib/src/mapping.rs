use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::Result;
use crate::value::{self, Dict, Format, Json};

/// The type assigned to content whose label has no mapping.
pub const FALLBACK_TYPE: &str = "Thing";

const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("people", "Person"),
    ("organizations", "Organization"),
    ("experience", "WorkExperience"),
    ("projects", "CreativeWork"),
    ("certifications", "EducationalOccupationalCredential"),
];

const DEFAULT_FIELDS: &[(&str, &str)] = &[
    ("title", "name"),
    ("summary", "description"),
    ("tags", "keywords"),
    ("date", "dateCreated"),
    ("url", "url"),
    ("image", "image"),
];

static DEFAULT: Lazy<Mappings> = Lazy::new(|| Mappings {
    categories: Mappings::category_map(DEFAULT_CATEGORIES.iter().copied()),
    fields: Mappings::field_list(DEFAULT_FIELDS.iter().copied()),
});

/// Category → type and source field → target field translation tables.
///
/// Category labels are stored lowercased; lookups lowercase their input, so
/// matching is case-insensitive. Field pairs are ordered by source name.
#[derive(Debug, Clone, PartialEq)]
pub struct Mappings {
    categories: FxHashMap<Arc<str>, Arc<str>>,
    fields: Vec<(Arc<str>, Arc<str>)>,
}

/// The on-disk shape of a mappings file. `folders` is the legacy name of
/// `categories`.
#[derive(Debug, Default, Deserialize)]
struct RawMappings {
    #[serde(default)]
    categories: Option<Dict<String, String>>,
    #[serde(default)]
    folders: Option<Dict<String, String>>,
    #[serde(default)]
    fields: Option<Dict<String, String>>,
}

impl Default for Mappings {
    fn default() -> Self {
        DEFAULT.clone()
    }
}

impl Mappings {
    fn category_map<I, K, V>(pairs: I) -> FxHashMap<Arc<str>, Arc<str>>
        where I: IntoIterator<Item = (K, V)>, K: AsRef<str>, V: AsRef<str>
    {
        pairs.into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase().into(), v.as_ref().into()))
            .collect()
    }

    fn field_list<I, K, V>(pairs: I) -> Vec<(Arc<str>, Arc<str>)>
        where I: IntoIterator<Item = (K, V)>, K: AsRef<str>, V: AsRef<str>
    {
        let mut fields: Vec<(Arc<str>, Arc<str>)> = pairs.into_iter()
            .map(|(k, v)| (k.as_ref().into(), v.as_ref().into()))
            .collect();

        fields.sort_by(|a, b| a.0.cmp(&b.0));
        fields
    }

    fn from_raw(raw: RawMappings) -> Self {
        let categories = match raw.categories.or(raw.folders) {
            Some(map) => Mappings::category_map(map),
            None => DEFAULT.categories.clone(),
        };

        let fields = match raw.fields {
            Some(map) => Mappings::field_list(map),
            None => DEFAULT.fields.clone(),
        };

        Mappings { categories, fields }
    }

    /// Parses a JSON mappings document.
    ///
    /// ```rust
    /// use ldgraph::Mappings;
    ///
    /// let mappings = Mappings::from_str(r#"{"folders": {"Talks": "Event"}}"#).unwrap();
    /// assert_eq!(mappings.resolve(Some("talks")), "Event");
    /// assert_eq!(mappings.resolve(Some("people")), "Thing");
    /// assert_eq!(mappings.target("title"), Some("name"));
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self> {
        let raw: RawMappings = Json::from_str(json)?;
        Ok(Mappings::from_raw(raw))
    }

    /// Reads mappings from the file at `path`: TOML for `.toml` files, JSON
    /// otherwise.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw: RawMappings = value::read_any(path)?;
        Ok(Mappings::from_raw(raw))
    }

    /// Loads mappings from `path`, falling back to the built-in defaults when
    /// no path is given, the file doesn't exist, or it fails to parse. Never
    /// fails.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) if path.exists() => path,
            Some(path) => {
                tracing::info!(path = %path.display(), "no mappings file found, using defaults");
                return Mappings::default();
            }
            None => {
                tracing::info!("no mappings file configured, using defaults");
                return Mappings::default();
            }
        };

        match Mappings::read(path) {
            Ok(mappings) => {
                tracing::info!(path = %path.display(), "loaded mappings");
                mappings
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to load mappings: {e}");
                tracing::warn!("using default mappings");
                Mappings::default()
            }
        }
    }

    /// Resolves a category (or folder) label to a type, case-insensitively.
    /// Returns [`FALLBACK_TYPE`] when `label` is absent or unmapped.
    pub fn resolve(&self, label: Option<&str>) -> &str {
        label.and_then(|label| self.categories.get(&*label.to_lowercase()))
            .map(|ty| &**ty)
            .unwrap_or(FALLBACK_TYPE)
    }

    /// The target field for the source field `source`, if mapped.
    pub fn target(&self, source: &str) -> Option<&str> {
        self.fields.iter()
            .find(|(s, _)| &**s == source)
            .map(|(_, t)| &**t)
    }

    /// All `(source, target)` field pairs, ordered by source field.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.fields.iter().map(|(s, t)| (&**s, &**t))
    }
}
