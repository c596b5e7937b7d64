use std::path::{Path, PathBuf};

use serde::Deserialize;

use ldgraph::Record;
use ldgraph::error::{Error, Result};
use ldgraph::value::read_any;

/// The content of one build: `{ "items": [..] }` in JSON or TOML.
///
/// Items are kept raw and converted one at a time by [`Manifest::records()`],
/// so a malformed item doesn't invalidate the rest.
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

/// A manifest item that isn't a valid [`Record`].
#[derive(Debug)]
pub struct Rejected {
    pub index: usize,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub error: Error,
}

impl Manifest {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_any(path)
    }

    /// Each item, in order, as a [`Record`] or the reason it isn't one.
    pub fn records(&self) -> impl Iterator<Item = Result<Record, Rejected>> + '_ {
        self.items.iter().enumerate().map(|(index, item)| {
            Record::deserialize(item).map_err(|e| {
                let text = |key: &str| item.get(key)
                    .and_then(|v| v.as_str())
                    .map(String::from);

                Rejected { index, title: text("title"), slug: text("slug"), error: e.into() }
            })
        })
    }
}

/// Every `.html` file below `root`, in a stable order. Hidden entries are
/// skipped.
pub fn html_files<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(true)
        .sort(true);

    walker.into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("skipping unreadable output entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "html"))
        .collect()
}
