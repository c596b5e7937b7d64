use std::path::Path;
use std::process::ExitCode;

use ldgraph::{Processed, Session, Summary};
use ldgraph::error::Result;

use crate::config::Config;
use crate::discover::{html_files, Manifest};

mod config;
mod discover;

pub const CONFIG_FILE: &str = "ldgraph.toml";

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Builds a schema.org JSON-LD graph from a content manifest and
        /// injects it into the generated HTML under the output directory.
        cmd ldgraph {
            /// Content manifest: `{ "items": [..] }` as JSON or TOML.
            required manifest: PathBuf
            /// Build output directory.
            required output: PathBuf
            /// Settings file. Defaults to `ldgraph.toml` in the project root.
            optional -c, --config path: PathBuf
            /// Project root. Defaults to the manifest's directory.
            optional -r, --root dir: PathBuf
            /// Log at debug level.
            optional -v, --verbose
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "ldgraph=debug,ldgraph_host=debug" } else { "ldgraph=info,ldgraph_host=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// What one build did, item by item.
#[derive(Debug, Default)]
struct Report {
    added: usize,
    skipped: usize,
    rejected: usize,
    summary: Summary,
}

/// Feeds every manifest item into a fresh session and finalizes it below
/// `output`. Malformed items are logged and counted, never fatal.
fn build(config: Config, manifest: &Manifest, output: &Path) -> Result<(Session, Report)> {
    let mut session = Session::new(config.settings, Some(config.root.as_path()));
    let mut report = Report::default();
    for record in manifest.records() {
        let record = match record {
            Ok(record) => record,
            Err(rejected) => {
                tracing::error!(
                    index = rejected.index,
                    title = rejected.title.as_deref().unwrap_or_default(),
                    slug = rejected.slug.as_deref().unwrap_or_default(),
                    "invalid manifest item: {}", rejected.error
                );

                report.rejected += 1;
                continue;
            }
        };

        match session.process(&record) {
            Processed::Added(_) => report.added += 1,
            Processed::Skipped(_) => report.skipped += 1,
        }
    }

    tracing::info!(
        added = report.added,
        skipped = report.skipped,
        rejected = report.rejected,
        "processed {} items", manifest.items.len()
    );

    report.summary = session.finalize(output)?;
    Ok((session, report))
}

fn run(flags: &flags::Ldgraph) -> Result<()> {
    let root = match &flags.root {
        Some(root) => root.as_path(),
        None => flags.manifest.parent().unwrap_or(Path::new("")),
    };

    let config = Config::discover(root, flags.config.as_deref())?;
    let manifest = Manifest::read(&flags.manifest)?;
    let (session, report) = build(config, &manifest, &flags.output)?;
    if let Some(graph) = &report.summary.graph {
        tracing::debug!(path = %graph.display(), files = report.summary.individual, "graph exported");
    }

    let injected = html_files(&flags.output).iter()
        .filter(|path| session.content_written(path))
        .count();

    tracing::info!("injected JSON-LD into {injected} pages");
    Ok(())
}

pub fn main() -> ExitCode {
    let flags = flags::Ldgraph::from_env_or_exit();
    init_logging(flags.verbose);

    let start = std::time::Instant::now();
    if let Err(e) = run(&flags) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    tracing::debug!("total time: {}ms", start.elapsed().as_millis());
    ExitCode::SUCCESS
}
