use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::value::{Dict, Value};

/// One content item as supplied by the host: an article, page, or any other
/// document that ends up as an HTML page.
///
/// All fields but `title` and `slug` are optional. Metadata beyond the known
/// fields is kept in `extra` so custom field mappings can reach it.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    pub title: Arc<str>,
    #[serde(default = "empty")]
    pub slug: Arc<str>,
    #[serde(default)]
    pub summary: Option<Arc<str>>,
    #[serde(default)]
    pub tags: Vec<Arc<str>>,
    #[serde(default)]
    pub date: Option<Timestamp>,
    #[serde(default)]
    pub url: Option<Arc<str>>,
    #[serde(default)]
    pub image: Option<Arc<str>>,
    #[serde(default)]
    pub category: Option<Arc<str>>,
    #[serde(default)]
    pub status: Option<Arc<str>>,
    #[serde(default)]
    pub source_path: Option<PathBuf>,
    #[serde(flatten)]
    pub extra: Dict,
}

fn empty() -> Arc<str> {
    Arc::from("")
}

/// A raw metadata value borrowed from a [`Record`].
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    Text(&'a str),
    Tags(&'a [Arc<str>]),
    Date(&'a Timestamp),
    Value(&'a Value),
}

impl Record {
    pub fn new<T: Into<Arc<str>>, S: Into<Arc<str>>>(title: T, slug: S) -> Self {
        Record {
            title: title.into(),
            slug: slug.into(),
            summary: None,
            tags: vec![],
            date: None,
            url: None,
            image: None,
            category: None,
            status: None,
            source_path: None,
            extra: Dict::new(),
        }
    }

    /// Returns the value of the metadata field named `name`, if the record
    /// carries one. Known fields shadow same-named entries in `extra`. An
    /// empty tag list counts as absent.
    pub fn field(&self, name: &str) -> Option<Field<'_>> {
        fn text(value: &Option<Arc<str>>) -> Option<Field<'_>> {
            value.as_deref().map(Field::Text)
        }

        match name {
            "title" => Some(Field::Text(&self.title)),
            "slug" => Some(Field::Text(&self.slug)),
            "summary" => text(&self.summary),
            "tags" if self.tags.is_empty() => None,
            "tags" => Some(Field::Tags(&self.tags)),
            "date" => self.date.as_ref().map(Field::Date),
            "url" => text(&self.url),
            "image" => text(&self.image),
            "category" => text(&self.category),
            "status" => text(&self.status),
            _ => self.extra.get(name).map(Field::Value),
        }
    }

    /// The name of the directory containing the record's source file.
    pub fn folder(&self) -> Option<&str> {
        self.source_path.as_ref()?
            .parent()?
            .file_name()?
            .to_str()
    }

    pub fn with_summary<S: Into<Arc<str>>>(mut self, summary: S) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
        where I: IntoIterator<Item = S>, S: Into<Arc<str>>
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date(mut self, date: Timestamp) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_url<S: Into<Arc<str>>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_image<S: Into<Arc<str>>>(mut self, image: S) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_category<S: Into<Arc<str>>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_status<S: Into<Arc<str>>>(mut self, status: S) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_source_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn with_extra<K: Into<Arc<str>>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A publication timestamp, as precise as its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// A date and time with a UTC offset.
    Zoned(DateTime<FixedOffset>),
    /// A date and time without offset.
    Local(NaiveDateTime),
    /// A calendar day.
    Day(NaiveDate),
}

impl Timestamp {
    /// The ISO-8601 rendering of the timestamp.
    ///
    /// ```rust
    /// use ldgraph::Timestamp;
    ///
    /// let day: Timestamp = "2024-03-01".parse().unwrap();
    /// assert_eq!(day.to_iso8601(), "2024-03-01");
    ///
    /// let local: Timestamp = "2024-03-01 09:30".parse().unwrap();
    /// assert_eq!(local.to_iso8601(), "2024-03-01T09:30:00");
    ///
    /// let zoned: Timestamp = "2024-03-01T09:30:00+02:00".parse().unwrap();
    /// assert_eq!(zoned.to_iso8601(), "2024-03-01T09:30:00+02:00");
    /// ```
    pub fn to_iso8601(&self) -> String {
        match self {
            Timestamp::Zoned(t) => t.format("%Y-%m-%dT%H:%M:%S%.f%:z").to_string(),
            Timestamp::Local(t) => t.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            Timestamp::Day(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl FromStr for Timestamp {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const LOCAL_FORMATS: &[&str] = &[
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M",
        ];

        let s = s.trim();
        if let Ok(t) = DateTime::parse_from_rfc3339(s) {
            return Ok(Timestamp::Zoned(t));
        }

        for format in LOCAL_FORMATS {
            if let Ok(t) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Timestamp::Local(t));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Timestamp::Day)
            .map_err(|e| error! {
                "unrecognized timestamp",
                "value" => s,
                "expected" => "RFC 3339, `YYYY-MM-DD HH:MM[:SS]`, or `YYYY-MM-DD`",
                e,
            })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(value: NaiveDate) -> Self {
        Timestamp::Day(value)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Timestamp::Local(value)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Timestamp::Zoned(value)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::{self, Visitor, MapAccess};

        struct TimestampVisitor;

        impl<'de> Visitor<'de> for TimestampVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a date or date-time")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
                v.parse().map_err(|e: crate::error::Error| {
                    E::custom(format_args!("{}: `{}`", e.headline(), v))
                })
            }

            // TOML hands out native datetimes as a single-entry map.
            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Timestamp, A::Error> {
                match map.next_entry::<String, String>()? {
                    Some((_, value)) => self.visit_str(&value),
                    None => Err(de::Error::invalid_length(0, &self)),
                }
            }
        }

        deserializer.deserialize_any(TimestampVisitor)
    }
}
