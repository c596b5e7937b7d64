use std::sync::Arc;

use crate::entity::Entity;
use crate::error::Result;
use crate::mapping::Mappings;
use crate::record::{Field, Record};
use crate::url::{Url, UrlBuf};
use crate::util::strip_markup;
use crate::value::Value;

/// How a mapped field's value is shaped before it lands in an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Treatment {
    /// Lists stay lists of strings.
    Keywords,
    /// Markup is stripped and whitespace trimmed.
    Description,
    /// Relative URLs are resolved against the site URL.
    Url,
    /// Like `Url`, for image paths.
    Image,
    /// Lists collapse to their first element.
    Plain,
}

impl Treatment {
    pub fn of(source: &str, target: &str) -> Treatment {
        match (source, target) {
            ("tags" | "keywords", _) | (_, "keywords") => Treatment::Keywords,
            ("summary" | "description", _) | (_, "description") => Treatment::Description,
            ("url", _) => Treatment::Url,
            ("image", _) => Treatment::Image,
            _ => Treatment::Plain,
        }
    }
}

/// Converts [`Record`]s into [`Entity`]s according to a set of [`Mappings`].
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    mappings: &'a Mappings,
    site_url: &'a Url,
}

impl<'a> Normalizer<'a> {
    pub fn new(mappings: &'a Mappings, site_url: &'a Url) -> Self {
        Normalizer { mappings, site_url }
    }

    /// Builds an entity of type `kind` from `record`.
    ///
    /// Every mapped source field the record carries is converted and stored
    /// under its target key. Blank values are skipped.
    ///
    /// ```rust
    /// use ldgraph::{Mappings, Normalizer, Record};
    /// use ldgraph::url::Url;
    ///
    /// let mappings = Mappings::default();
    /// let record = Record::new("Jane Doe", "jane-doe")
    ///     .with_category("people")
    ///     .with_summary("<p>Engineer</p>");
    ///
    /// let kind = mappings.resolve(record.category.as_deref());
    /// let entity = Normalizer::new(&mappings, Url::new(""))
    ///     .normalize(&record, kind)
    ///     .unwrap();
    ///
    /// let json = serde_json::to_value(&entity).unwrap();
    /// assert_eq!(json, serde_json::json!({
    ///     "@type": "Person",
    ///     "name": "Jane Doe",
    ///     "description": "Engineer",
    /// }));
    /// ```
    pub fn normalize(&self, record: &Record, kind: &str) -> Result<Entity> {
        if record.title.trim().is_empty() {
            return err!("content record has no title", "slug" => record.slug);
        }

        let mut entity = Entity::new(kind);
        for (source, target) in self.mappings.fields() {
            if target.is_empty() || target == Entity::TYPE_KEY {
                return err! {
                    "invalid field mapping target",
                    "source field" => source,
                    "target field" => format!("{target:?}"),
                };
            }

            let Some(field) = record.field(source) else {
                continue;
            };

            let treatment = Treatment::of(source, target);
            if let Some(value) = self.convert(field, treatment)? {
                entity.insert(target, value);
            }
        }

        Ok(entity)
    }

    fn convert(&self, field: Field<'_>, treatment: Treatment) -> Result<Option<Value>> {
        let value = match field {
            Field::Text(s) if s.is_empty() => return Ok(None),
            Field::Text(s) => Value::from(s),
            Field::Date(t) => Value::from(t.to_iso8601()),
            Field::Tags(tags) => Value::Array(Arc::new(tags.iter().cloned().map(Value::from).collect())),
            Field::Value(v) if v.is_blank() => return Ok(None),
            Field::Value(v) => v.clone(),
        };

        let value = match (value, treatment) {
            (Value::Array(items), Treatment::Keywords) => items.iter()
                .map(keyword)
                .collect::<Result<Value>>()?,
            (Value::Array(items), _) => items.first().cloned().unwrap_or_else(|| Value::from("")),
            (value, _) => value,
        };

        let value = match (value, treatment) {
            (Value::String(s), Treatment::Description) => Value::from(strip_markup(&s).trim()),
            (Value::String(s), Treatment::Url) => Value::from(self.resolve_url(&s)),
            (Value::String(s), Treatment::Image) => Value::from(self.resolve_image(&s)),
            (value, _) => value,
        };

        Ok(Some(value))
    }

    /// Absolute URLs are returned unchanged. Anything else is joined to the
    /// site URL with exactly one `/`, unless the site URL is empty: a slash
    /// ending the site URL and one starting `url` merge, so `/about` and
    /// `about` against `https://x.test/` both give `https://x.test/about`.
    /// A prefix only counts as a scheme if it is a letter followed by
    /// letters, digits, `+`, `-` or `.`, so `2024:recap` is relative.
    ///
    /// ```rust
    /// use ldgraph::{Mappings, Normalizer};
    /// use ldgraph::url::Url;
    ///
    /// let mappings = Mappings::default();
    /// let normalizer = Normalizer::new(&mappings, Url::new("https://x.test/"));
    /// assert_eq!(normalizer.resolve_url("/about").as_str(), "https://x.test/about");
    /// assert_eq!(normalizer.resolve_url("about").as_str(), "https://x.test/about");
    /// assert_eq!(normalizer.resolve_url("mailto:a@b.test").as_str(), "mailto:a@b.test");
    /// ```
    pub fn resolve_url(&self, url: &str) -> UrlBuf {
        let url = UrlBuf::from(url);
        if url.has_scheme() || self.site_url.is_empty() {
            return url;
        }

        let mut resolved = self.site_url.to_owned();
        resolved.append(url);
        resolved
    }

    /// Image paths resolve like URLs: `/`-prefixed paths are appended to the
    /// site URL as is, other relative paths after a separating `/`.
    pub fn resolve_image(&self, image: &str) -> UrlBuf {
        let mut image = UrlBuf::from(image);
        if !image.has_scheme() && !self.site_url.is_empty() {
            image.prepend(self.site_url);
        }

        image
    }
}

fn keyword(value: &Value) -> Result<Value> {
    match value {
        Value::String(_) => Ok(value.clone()),
        other => Ok(Value::from(serde_json::to_string(other)?)),
    }
}
