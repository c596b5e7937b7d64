use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use derive_more::Debug;

use crate::entity::Entity;
use crate::error::{Error, Result, Chainable};
use crate::graph::Graph;
use crate::inject;
use crate::mapping::Mappings;
use crate::normalize::Normalizer;
use crate::output;
use crate::record::Record;
use crate::settings::{Settings, TypeSource};
use crate::util::slugify;

/// The outcome of processing one content record.
#[derive(Debug)]
pub enum Processed {
    /// The record's entity was added to the graph under this slug.
    Added(Arc<str>),
    Skipped(Skipped),
}

/// A record that produced no entity, and why.
#[derive(Debug)]
pub struct Skipped {
    pub slug: Arc<str>,
    pub title: Arc<str>,
    pub reason: SkipReason,
}

#[derive(Debug)]
pub enum SkipReason {
    /// The record's status isn't one of the allowed statuses.
    Status(Arc<str>),
    /// The record couldn't be converted.
    Invalid(Error),
}

/// What `finalize` wrote.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// The graph file, unless there was nothing to write.
    pub graph: Option<PathBuf>,
    pub entities: usize,
    /// Number of per-entity files written.
    pub individual: usize,
}

/// The state of one build: settings, mappings, and the graph being built.
///
/// A host creates a session when a build starts, calls [`Session::process()`]
/// for every content item, [`Session::finalize()`] once all items are in, and
/// [`Session::content_written()`] for every HTML file it emits. Long-lived
/// hosts that build repeatedly call [`Session::reset()`] at the start of each
/// later build.
#[derive(Debug)]
pub struct Session {
    settings: Arc<Settings>,
    root: Option<PathBuf>,
    #[debug(ignore)]
    mappings: Mappings,
    graph: Graph,
    skipped: usize,
}

impl Session {
    /// Starts a build. The mappings file is resolved against `root`.
    pub fn new(settings: Settings, root: Option<&Path>) -> Session {
        let root = root.map(Path::to_path_buf);
        let mappings = Mappings::load(settings.mappings_path(root.as_deref()).as_deref());
        tracing::info!("JSON-LD graph session initialized");
        Session {
            settings: Arc::new(settings),
            root,
            mappings,
            graph: Graph::new(),
            skipped: 0,
        }
    }

    /// Starts a fresh build in the same session: forgets every entity and
    /// reloads the mappings file.
    pub fn reset(&mut self) {
        let path = self.settings.mappings_path(self.root.as_deref());
        self.mappings = Mappings::load(path.as_deref());
        self.graph.clear();
        self.skipped = 0;
        tracing::debug!("JSON-LD graph session reset");
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mappings(&self) -> &Mappings {
        &self.mappings
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Number of records skipped so far in this build.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The type for `record` under the configured [`TypeSource`].
    pub fn entity_type(&self, record: &Record) -> &str {
        let label = match self.settings.type_source {
            TypeSource::Category => record.category.as_deref(),
            TypeSource::Folder => record.folder(),
        };

        self.mappings.resolve(label)
    }

    /// Converts `record` into an entity and adds it to the graph.
    ///
    /// Never fails: records with a disallowed status or that fail to convert
    /// are logged and reported as [`Processed::Skipped`].
    pub fn process(&mut self, record: &Record) -> Processed {
        let slug: Arc<str> = match record.slug.is_empty() {
            true => slugify(&record.title).into(),
            false => record.slug.clone(),
        };

        let skip = |reason| Skipped { slug: slug.clone(), title: record.title.clone(), reason };
        if !self.settings.allows(record.status.as_deref()) {
            let status = record.status.clone().unwrap_or_else(|| "published".into());
            tracing::debug!(%slug, %status, "skipping content with disallowed status");
            self.skipped += 1;
            return Processed::Skipped(skip(SkipReason::Status(status)));
        }

        let kind = self.entity_type(record);
        let normalizer = Normalizer::new(&self.mappings, &self.settings.site_url);
        let entity = match normalizer.normalize(record, kind) {
            Ok(entity) => entity,
            Err(e) => {
                tracing::error!(title = %record.title, %slug, "failed to convert content: {e}");
                self.skipped += 1;
                return Processed::Skipped(skip(SkipReason::Invalid(e)));
            }
        };

        tracing::debug!(%slug, kind = entity.kind(), "processed {}", record.title);
        if let Some(previous) = self.graph.add(entity, &slug) {
            tracing::warn!(%slug, previous = previous.kind(), "slug already indexed; replacing entity");
        }

        Processed::Added(slug)
    }

    /// Writes the graph and, if enabled, one file per indexed entity below
    /// `output_root`. Writes nothing when no entities were added.
    pub fn finalize<P: AsRef<Path>>(&self, output_root: P) -> Result<Summary> {
        if self.graph.is_empty() {
            tracing::info!(skipped = self.skipped, "no entities to export; graph not written");
            return Ok(Summary::default());
        }

        tracing::info!("starting JSON-LD graph generation with {} entities", self.graph.len());
        let dir = output_root.as_ref().join(&self.settings.output_path);
        let graph_path = dir.join(&self.settings.graph_filename);
        output::write_graph(&self.graph, &graph_path)?;
        tracing::info!(path = %graph_path.display(), "global graph written");

        let mut individual = 0;
        if self.settings.export_individual {
            for (slug, entity) in self.graph.indexed() {
                output::write_entity(entity, dir.join(format!("{slug}.json")))?;
                individual += 1;
            }

            tracing::info!("exported {individual} individual entity files");
        }

        Ok(Summary { graph: Some(graph_path), entities: self.graph.len(), individual })
    }

    /// Injects the entity for the page at `path` into `html`. The slug is
    /// the file name of `path` without its extension.
    pub fn inject<'a>(&self, html: &'a str, path: &Path) -> Result<Cow<'a, str>> {
        match inject::slug_for(path) {
            Some(slug) => inject::inject(html, slug, &self.graph, self.settings.inject),
            None => Ok(Cow::Borrowed(html)),
        }
    }

    /// Rewrites the HTML file at `path` in place with its entity injected.
    /// Returns `Ok(true)` if the file changed. Paths not ending in `.html`
    /// are left alone.
    pub fn rewrite_html(&self, path: &Path) -> Result<bool> {
        if path.extension().map_or(true, |ext| ext != "html") {
            return Ok(false);
        }

        let html = fs::read_to_string(path).chain_with(|| error! {
            "failed to read HTML file",
            "path" => path.display(),
        })?;

        let Cow::Owned(rewritten) = self.inject(&html, path)? else {
            return Ok(false);
        };

        fs::write(path, rewritten).chain_with(|| error! {
            "failed to write HTML file",
            "path" => path.display(),
        })?;

        tracing::debug!(path = %path.display(), "injected JSON-LD");
        Ok(true)
    }

    /// The host's "content written" hook: like [`Session::rewrite_html()`],
    /// but failures are logged and reported as `false`.
    pub fn content_written(&self, path: &Path) -> bool {
        match self.rewrite_html(path) {
            Ok(changed) => changed,
            Err(e) => {
                tracing::error!(path = %path.display(), "error injecting JSON-LD: {e}");
                false
            }
        }
    }

    /// The entity indexed under `slug`.
    pub fn lookup(&self, slug: &str) -> Option<&Entity> {
        self.graph.lookup(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(Session: Send, Sync);

    fn session(settings: Settings) -> Session {
        Session::new(Settings { mappings_file: None, ..settings }, None)
    }

    #[test]
    fn drafts_are_skipped() {
        let mut session = session(Settings::default());
        let draft = Record::new("Draft", "draft").with_status("draft");

        let outcome = session.process(&draft);
        assert!(matches!(outcome, Processed::Skipped(Skipped { reason: SkipReason::Status(ref s), .. }) if &**s == "draft"));
        assert!(session.graph().is_empty());
        assert_eq!(session.skipped(), 1);
    }

    #[test]
    fn invalid_records_are_skipped() {
        let mut session = session(Settings::default());
        let outcome = session.process(&Record::new("", "nameless"));
        assert!(matches!(outcome, Processed::Skipped(Skipped { reason: SkipReason::Invalid(_), .. })));

        let outcome = session.process(&Record::new("Named", "named"));
        assert!(matches!(outcome, Processed::Added(ref slug) if &**slug == "named"));
        assert_eq!(session.graph().len(), 1);
    }

    #[test]
    fn missing_slug_is_derived_from_title() {
        let mut session = session(Settings::default());
        session.process(&Record::new("Jane Doe", ""));
        assert_eq!(session.lookup("jane-doe").map(Entity::kind), Some("Thing"));
    }

    #[test]
    fn folder_type_source() {
        let settings = Settings { type_source: TypeSource::Folder, ..Settings::default() };
        let mut session = session(settings);

        let record = Record::new("Acme", "acme")
            .with_category("people")
            .with_source_path("content/organizations/acme.md");

        session.process(&record);
        assert_eq!(session.lookup("acme").map(Entity::kind), Some("Organization"));
    }

    #[test]
    fn reset_forgets_entities() {
        let mut session = session(Settings::default());
        session.process(&Record::new("A", "a"));
        session.reset();
        assert!(session.graph().is_empty());
        assert!(session.lookup("a").is_none());
        assert_eq!(session.skipped(), 0);
    }

    #[test]
    fn non_html_paths_are_ignored() {
        let mut session = session(Settings::default());
        session.process(&Record::new("A", "a"));
        assert!(!session.rewrite_html(Path::new("a.css")).unwrap());
        assert!(!session.rewrite_html(Path::new("a")).unwrap());
    }

    #[test]
    fn unreadable_html_is_logged_not_fatal() {
        let mut session = session(Settings::default());
        session.process(&Record::new("A", "a"));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("a.html");
        assert!(session.rewrite_html(&missing).is_err());
        assert!(!session.content_written(&missing));
    }
}
