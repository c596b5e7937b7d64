use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::url::UrlBuf;
use crate::value::{Format, Toml};

/// Which record label picks an entity's type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeSource {
    /// The record's `category`.
    #[default]
    Category,
    /// The name of the directory holding the record's source file.
    Folder,
}

/// Build configuration. Every field has a default, so an empty document is
/// a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Mappings file. Relative paths resolve against the project root.
    pub mappings_file: Option<PathBuf>,
    /// Output directory for JSON files, relative to the build output root.
    pub output_path: PathBuf,
    /// File name of the graph document.
    pub graph_filename: String,
    /// Write one `<slug>.json` file per entity.
    pub export_individual: bool,
    /// Inject script blocks into generated HTML.
    pub inject: bool,
    /// Publication statuses that are processed; others are skipped.
    pub statuses: Vec<Arc<str>>,
    /// Base URL for relative URLs and images.
    pub site_url: UrlBuf,
    pub type_source: TypeSource,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mappings_file: Some(PathBuf::from("mappings.json")),
            output_path: PathBuf::from("jsonld"),
            graph_filename: "graph.jsonld".into(),
            export_individual: true,
            inject: true,
            statuses: vec!["published".into()],
            site_url: UrlBuf::new(),
            type_source: TypeSource::Category,
        }
    }
}

impl Settings {
    /// Reads settings from a TOML file.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        Toml::read(path)
    }

    /// The mappings file, resolved against `root` when relative.
    pub fn mappings_path(&self, root: Option<&Path>) -> Option<PathBuf> {
        let file = self.mappings_file.as_ref()?;
        match root {
            Some(root) if file.is_relative() => Some(root.join(file)),
            _ => Some(file.clone()),
        }
    }

    /// Whether content with `status` is processed. Content without a status
    /// counts as `published`.
    pub fn allows(&self, status: Option<&str>) -> bool {
        let status = status.unwrap_or("published");
        self.statuses.iter().any(|s| s.eq_ignore_ascii_case(status))
    }
}
