use std::ops::Deref;
use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use super::Url;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct UrlBuf(String);

impl UrlBuf {
    pub fn new() -> UrlBuf {
        UrlBuf(String::new())
    }

    pub fn as_url(&self) -> &Url {
        Url::new(self.0.as_str())
    }

    /// ```rust
    /// use ldgraph::url::UrlBuf;
    ///
    /// let mut url = UrlBuf::from("about");
    /// url.prepend("https://x.test");
    /// assert_eq!(url.as_str(), "https://x.test/about");
    ///
    /// let mut url = UrlBuf::from("/images/jane.png");
    /// url.prepend("https://x.test");
    /// assert_eq!(url.as_str(), "https://x.test/images/jane.png");
    ///
    /// let mut url = UrlBuf::from("https://y.test/z");
    /// url.prepend("https://x.test");
    /// assert_eq!(url.as_str(), "https://y.test/z");
    /// ```
    // FIXME: Deal with query and hash, in `self` and `url`.
    pub fn prepend<T: AsRef<Url>>(&mut self, url: T) -> &mut Self {
        if self.has_scheme() {
            return self;
        }

        let mut url = url.as_ref().to_owned();
        let suffix = std::mem::take(self);
        url.append(suffix);
        *self = url;
        self
    }

    /// ```rust
    /// use ldgraph::url::UrlBuf;
    ///
    /// let mut url = UrlBuf::from("https://x.test/");
    /// url.append("people/jane");
    /// assert_eq!(url.as_str(), "https://x.test/people/jane");
    ///
    /// url.append("/cv.pdf");
    /// assert_eq!(url.as_str(), "https://x.test/people/jane/cv.pdf");
    ///
    /// url.append("https://y.test/z");
    /// assert_eq!(url.as_str(), "https://y.test/z");
    /// ```
    // FIXME: Deal with query and hash, in `self` and `url`.
    pub fn append<T: AsRef<Url>>(&mut self, url: T) -> &mut Self {
        let url = url.as_ref();
        if url.has_scheme() {
            *self = url.to_owned();
        } else {
            match (self.ends_with('/'), url.starts_with('/')) {
                (true, true) => self.0.push_str(&url[1..]),
                (true, false) | (false, true) => self.0.push_str(url),
                (false, false) => {
                    self.0.push('/');
                    self.0.push_str(url);
                }
            }
        }

        self
    }
}

impl From<String> for UrlBuf {
    fn from(value: String) -> Self {
        UrlBuf(value)
    }
}

impl From<&str> for UrlBuf {
    fn from(value: &str) -> Self {
        UrlBuf(value.to_owned())
    }
}

impl From<&Url> for UrlBuf {
    fn from(value: &Url) -> Self {
        value.to_url_buf()
    }
}

impl Deref for UrlBuf {
    type Target = Url;

    fn deref(&self) -> &Self::Target {
        self.as_url()
    }
}

impl AsRef<Url> for UrlBuf {
    fn as_ref(&self) -> &Url {
        self.as_url()
    }
}

impl Borrow<Url> for UrlBuf {
    fn borrow(&self) -> &Url {
        self.as_url()
    }
}

impl AsRef<str> for UrlBuf {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<UrlBuf> for Arc<str> {
    fn from(value: UrlBuf) -> Self {
        value.0.into()
    }
}

impl From<UrlBuf> for String {
    fn from(value: UrlBuf) -> Self {
        value.0
    }
}
