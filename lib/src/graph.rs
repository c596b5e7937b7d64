use std::sync::Arc;

use derive_more::Debug;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::entity::Entity;

pub const SCHEMA_CONTEXT: &str = "https://schema.org/";

/// The entities of one build, in processing order, plus an index from slug
/// to entity.
///
/// Every indexed entity is also in the ordered sequence. A slug added twice
/// points at the later entity; both remain in the sequence.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    entities: Vec<Arc<Entity>>,
    #[debug(ignore)]
    index: FxHashMap<Arc<str>, Arc<Entity>>,
}

/// The serialized form of a [`Graph`]: `{"@context": .., "@graph": [..]}`.
#[derive(Debug, Serialize)]
pub struct Envelope<'a> {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@graph")]
    pub graph: &'a [Arc<Entity>],
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Appends `entity`. A non-empty `slug` also indexes it, replacing any
    /// entity previously indexed under the same slug. Returns the replaced
    /// entity, if any.
    pub fn add(&mut self, entity: Entity, slug: &str) -> Option<Arc<Entity>> {
        let entity = Arc::new(entity);
        self.entities.push(entity.clone());
        if slug.is_empty() {
            return None;
        }

        self.index.insert(slug.into(), entity)
    }

    pub fn all(&self) -> Envelope<'_> {
        Envelope { context: SCHEMA_CONTEXT, graph: &self.entities }
    }

    pub fn lookup(&self, slug: &str) -> Option<&Entity> {
        self.index.get(slug).map(|e| &**e)
    }

    /// Indexed `(slug, entity)` pairs, ordered by slug.
    pub fn indexed(&self) -> Vec<(&str, &Entity)> {
        let mut pairs: Vec<_> = self.index.iter()
            .map(|(slug, entity)| (&**slug, &**entity))
            .collect();

        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_lookup() {
        let mut graph = Graph::new();
        assert!(graph.add(Entity::new("Person"), "jane").is_none());
        assert!(graph.add(Entity::new("Thing"), "").is_none());

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.indexed().len(), 1);
        assert_eq!(graph.lookup("jane").map(Entity::kind), Some("Person"));
        assert!(graph.lookup("").is_none());
        assert!(graph.lookup("john").is_none());
    }

    #[test]
    fn later_slug_wins() {
        let mut graph = Graph::new();
        graph.add(Entity::new("Person"), "dup");
        let replaced = graph.add(Entity::new("Organization"), "dup");

        assert_eq!(replaced.map(|e| e.kind().to_string()).as_deref(), Some("Person"));
        assert_eq!(graph.lookup("dup").map(Entity::kind), Some("Organization"));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn envelope_shape() {
        let mut graph = Graph::new();
        graph.add(Entity::new("Person"), "a");
        graph.add(Entity::new("Thing"), "b");

        let json = serde_json::to_value(graph.all()).unwrap();
        assert_eq!(json["@context"], "https://schema.org/");
        assert_eq!(json["@graph"][0]["@type"], "Person");
        assert_eq!(json["@graph"][1]["@type"], "Thing");

        graph.clear();
        assert!(graph.is_empty());
        assert!(graph.lookup("a").is_none());
    }
}
