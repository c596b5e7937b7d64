#![doc = svgbobdoc::transform!(
//! A library for building a schema.org JSON-LD knowledge graph from the
//! content of a static site.
//!
//! # Overview
//!
//! Every content item of a site build is described by a [`Record`]: its
//! title, slug, summary, tags, date, and whatever else its front matter
//! carries. `ldgraph` converts each record into a schema.org [`Entity`],
//! collects the entities of a build into a [`Graph`], writes the graph to
//! disk, and injects each page's entity into that page's HTML as an
//! `application/ld+json` script block.
//!
//! A build flows through a [`Session`] as follows:
//!
//! ```svgbob
//!  +--------+   process   +------------+  normalize  +--------+
//!  | Record |------------>|  Mappings  |------------>| Entity |
//!  +--------+             +------------+             +---+----+
//!                          type + field                  |
//!                          resolution                    v
//!                                                    +-------+
//!        +--------------------+      finalize        | Graph |
//!        | graph.jsonld       |<---------------------+       |
//!        | <slug>.json ...    |                      +---+---+
//!        +--------------------+                          |
//!                                                        |
//!        +--------------------+   content_written        |
//!        | page.html          |<-------------------------+
//!        | <script ld+json>   |
//!        +--------------------+
//! ```
//!
//!   1. [`Session::new()`] loads [`Settings`] and the [`Mappings`] file.
//!   2. [`Session::process()`] is called once per content item. Items whose
//!      status isn't allowed, or that fail to convert, are skipped and
//!      logged; they never abort the build.
//!   3. [`Session::finalize()`] writes the graph, `{"@context", "@graph"}`,
//!      and optionally one file per entity.
//!   4. [`Session::content_written()`] is called for every generated HTML
//!      file and injects the matching entity before `</head>`.
//!
//! # Mappings
//!
//! A [`Mappings`] document maps content categories (or, with
//! [`TypeSource::Folder`], source folders) to schema.org types and content
//! fields to schema.org properties:
//!
//! ```json
//! {
//!   "categories": { "people": "Person", "talks": "Event" },
//!   "fields": { "title": "name", "summary": "description", "tags": "keywords" }
//! }
//! ```
//!
//! Unknown categories resolve to `Thing`. A missing or unreadable mappings
//! file falls back to built-in defaults.
)]

#[macro_use]
pub mod error;
pub mod util;
pub mod value;
pub mod url;
pub mod record;
pub mod mapping;
pub mod entity;
pub mod normalize;
pub mod graph;
pub mod output;
pub mod inject;
pub mod settings;
pub mod session;

pub use error::{Error, Result};
pub use record::{Record, Field, Timestamp};
pub use mapping::Mappings;
pub use entity::Entity;
pub use normalize::Normalizer;
pub use graph::{Graph, Envelope};
pub use settings::{Settings, TypeSource};
pub use session::{Session, Processed, Skipped, SkipReason, Summary};
