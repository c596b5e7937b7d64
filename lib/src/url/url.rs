use std::ops::Deref;
use std::borrow::Borrow;

pub use super::UrlBuf;

/// A borrowed URL or URL fragment.
///
/// Any string is a `Url`. Nothing is validated; the methods here only
/// classify it.
#[derive(Debug)]
#[repr(transparent)]
pub struct Url(str);

impl Url {
    pub fn new<S: AsRef<str> + ?Sized>(from: &S) -> &Url {
        let string: &str = from.as_ref();
        unsafe { &*(string as *const str as *const Url) }
    }

    pub const fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_url_buf(&self) -> UrlBuf {
        UrlBuf::from(self.0.to_owned())
    }

    /// ```rust
    /// use ldgraph::url::Url;
    ///
    /// let url = Url::new("https://schema.org");
    /// assert_eq!(url.scheme(), Some("https"));
    ///
    /// let url = Url::new("mailto:jane@doe.test");
    /// assert_eq!(url.scheme(), Some("mailto"));
    ///
    /// let url = Url::new("about");
    /// assert_eq!(url.scheme(), None);
    ///
    /// let url = Url::new("/images/jane.png");
    /// assert_eq!(url.scheme(), None);
    ///
    /// let url = Url::new("foo#bar:baz");
    /// assert_eq!(url.scheme(), None);
    ///
    /// let url = Url::new("foo?bar:baz");
    /// assert_eq!(url.scheme(), None);
    ///
    /// let url = Url::new("2024:recap");
    /// assert_eq!(url.scheme(), None);
    ///
    /// let url = Url::new("git+ssh://host/repo");
    /// assert_eq!(url.scheme(), Some("git+ssh"));
    /// ```
    pub fn scheme(&self) -> Option<&str> {
        let bytes = self.as_bytes();
        let i = memchr::memchr3(b':', b'?', b'/', bytes).filter(|&i| bytes[i] == b':')?;
        let (first, rest) = bytes[..i].split_first()?;
        let valid = first.is_ascii_alphabetic() && rest.iter()
            .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'));

        valid.then(|| &self[..i])
    }

    /// Whether the URL names its own scheme, i.e, is usable without a base.
    pub fn has_scheme(&self) -> bool {
        self.scheme().is_some()
    }
}

impl<'a> From<&'a str> for &'a Url {
    fn from(value: &'a str) -> Self {
        Url::new(value)
    }
}

impl Deref for Url {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl Borrow<str> for Url {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<Url> for str {
    fn as_ref(&self) -> &Url {
        Url::new(self)
    }
}

impl AsRef<Url> for String {
    fn as_ref(&self) -> &Url {
        Url::new(self.as_str())
    }
}

impl AsRef<Url> for std::sync::Arc<str> {
    fn as_ref(&self) -> &Url {
        Url::new(&**self)
    }
}

impl AsRef<Url> for Url {
    fn as_ref(&self) -> &Url {
        self
    }
}

impl ToOwned for Url {
    type Owned = UrlBuf;

    fn to_owned(&self) -> Self::Owned {
        self.to_url_buf()
    }
}
