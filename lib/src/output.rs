use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::entity::Entity;
use crate::error::{Result, Chainable};
use crate::graph::Graph;

/// Writes the enveloped `graph` to `path` as pretty-printed JSON.
pub fn write_graph<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    write_json(&graph.all(), path.as_ref())
}

/// Writes `entity` to `path` as pretty-printed JSON.
pub fn write_entity<P: AsRef<Path>>(entity: &Entity, path: P) -> Result<()> {
    write_json(entity, path.as_ref())
}

/// Serializes `value` fully, then replaces the file at `path` with it.
///
/// Missing parent directories are created. The document is written to a
/// hidden sibling file first and renamed into place, so `path` never holds a
/// partial document.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).chain_with(|| error! {
        "failed to serialize JSON document",
        "destination path" => path.display(),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).chain_with(|| error! {
            "failed to create output directory",
            "directory" => parent.display(),
        })?;
    }

    let temp = temp_path(path);
    fs::write(&temp, json.as_bytes())
        .and_then(|_| fs::rename(&temp, path))
        .map_err(|e| {
            let _ = fs::remove_file(&temp);
            e
        })
        .chain_with(|| error! {
            "failed to write JSON document",
            "destination path" => path.display(),
        })?;

    tracing::debug!(path = %path.display(), "wrote JSON document");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();

    path.with_file_name(format!(".{name}.tmp"))
}
