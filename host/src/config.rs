use std::path::{Path, PathBuf};

use ldgraph::Settings;
use ldgraph::error::{Result, Chainable};
use ldgraph::error;

#[derive(Debug)]
pub struct Config {
    pub root: PathBuf,
    pub settings: Settings,
}

impl Config {
    /// Reads `explicit` if given, else `CONFIG_FILE` under `root` if it
    /// exists, else uses default settings.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let implicit = root.join(crate::CONFIG_FILE);
        let settings = match explicit {
            Some(path) => Settings::read(path).chain_with(|| error! {
                "failed to load configuration",
                "config file" => path.display(),
            })?,
            None if implicit.is_file() => Settings::read(&implicit)?,
            None => Settings::default(),
        };

        tracing::debug!(root = %root.display(), ?settings, "configuration loaded");
        Ok(Config { root: root.to_path_buf(), settings })
    }
}
