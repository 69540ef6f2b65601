//! Compose URL builder.

use std::fmt;

use url::Url;
use url::form_urlencoded::Parse;

use crate::error::{Error, Result};
use crate::query::QueryItem;

/// URL accepted by the parser, kept exactly as it was assembled.
///
/// The `url` crate rewrites authorities it understands (an empty port is
/// dropped, a second `@` gets escaped), while email apps expect the text
/// they documented.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComposeUrl {
    raw: String,
    parsed: Url,
}

impl ComposeUrl {
    /// Validates `raw` as an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `raw` holds whitespace, control or non-ASCII
    /// characters, or if the parser rejects it.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let parsed = Self::validate(&raw)?;

        if let Some(position) = raw.bytes().position(|b| !b.is_ascii_graphic()) {
            return Err(Error::InvalidCharacter { position });
        }

        Ok(Self { raw, parsed })
    }

    fn validate(raw: &str) -> Result<Url> {
        let err = match Url::parse(raw) {
            Ok(url) => return Ok(url),
            Err(err) => err,
        };

        // `scheme://host:rest` is only an authority for the WHATWG parser.
        // Custom schemes may put anything there, so retry it as an opaque path.
        let (scheme, rest) = raw.split_once(':').ok_or(err)?;
        let rest = rest.strip_prefix("//").ok_or(err)?;
        match Url::parse(&format!("{scheme}:{rest}")) {
            Ok(url) if url.cannot_be_a_base() => Ok(url),
            _ => Err(err.into()),
        }
    }

    /// Serialization of the URL.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Scheme, lowercased by the parser.
    pub fn scheme(&self) -> &str {
        self.parsed.scheme()
    }

    /// Query string, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.parsed.query()
    }

    /// Decoded `(name, value)` pairs of the query.
    pub fn query_pairs(&self) -> Parse<'_> {
        self.parsed.query_pairs()
    }

    /// Parsed form, as normalized by the `url` crate.
    pub fn url(&self) -> &Url {
        &self.parsed
    }
}

impl fmt::Display for ComposeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for ComposeUrl {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl From<ComposeUrl> for String {
    fn from(url: ComposeUrl) -> Self {
        url.raw
    }
}

/// Appends present query items to the start of an URL.
#[derive(Debug, Clone, Default)]
pub struct UrlBuilder {
    prefix: String,
    items: Vec<QueryItem>,
}

impl UrlBuilder {
    /// Create a new [`UrlBuilder`] from the start of the URL.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            items: Vec::new(),
        }
    }

    /// Push a query item. `None` values are skipped at build time.
    pub fn param(mut self, name: &str, value: Option<&str>) -> Self {
        self.items.push(QueryItem::new(name, value));
        self
    }

    /// Push many query items, keeping their order.
    pub fn items(mut self, items: impl IntoIterator<Item = QueryItem>) -> Self {
        self.items.extend(items);
        self
    }

    /// Start of the URL.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Builds the URL, reporting why the parser rejected it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the assembled text is not a valid absolute URL.
    pub fn try_build(&self) -> Result<ComposeUrl> {
        let query = self
            .items
            .iter()
            .filter_map(QueryItem::encode)
            .collect::<Vec<_>>();

        if query.is_empty() {
            ComposeUrl::parse(self.prefix.as_str())
        } else {
            ComposeUrl::parse(format!("{}?{}", self.prefix, query.join("&")))
        }
    }

    /// Builds the URL by appending items with a present value to the prefix.
    pub fn build(&self) -> Option<ComposeUrl> {
        match self.try_build() {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::debug!(error = %err, prefix = %self.prefix, "url rejected");
                None
            },
        }
    }
}

/// Shortcut for [`UrlBuilder`] with `(name, value)` pairs.
pub fn build<'a>(
    prefix: &str,
    params: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
) -> Option<ComposeUrl> {
    params
        .into_iter()
        .fold(UrlBuilder::new(prefix), |builder, (name, value)| {
            builder.param(name, value)
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_items_presence() {
        let items = [QueryItem::new("x", Some("1")), QueryItem::new("x", None)];

        for item in items {
            let url = UrlBuilder::new("mailto:")
                .items([item.clone()])
                .build()
                .unwrap();

            match item.value {
                Some(value) => {
                    let pairs = url.query_pairs().collect::<Vec<_>>();
                    assert_eq!(pairs.len(), 1);
                    assert_eq!(pairs[0].0, item.name);
                    assert_eq!(pairs[0].1, value);
                },
                None => {
                    assert_eq!(url.query(), None);
                    assert!(!url.as_str().contains('?'));
                },
            }
        }
    }

    #[test]
    fn test_round_trip_with_reserved_characters() {
        let value = "Hello there & welcome = 1+1 #tag 100%";
        let url = build("mailto:", [("subject", Some(value))]).unwrap();

        let pairs = url.query_pairs().collect::<Vec<_>>();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "subject");
        assert_eq!(pairs[0].1, value);
    }

    #[test]
    fn test_skip_absent_value() {
        let url =
            build("mailto:user@x.com", [("subject", Some("Hi")), ("body", None)])
                .unwrap();
        assert_eq!(url.as_str(), "mailto:user@x.com?subject=Hi");
    }

    #[test]
    fn test_keep_insertion_order() {
        let url = build(
            "googlegmail://co",
            [("to", Some("a@b.com")), ("subject", Some("")), ("body", Some("b"))],
        )
        .unwrap();
        assert_eq!(url.as_str(), "googlegmail://co?to=a@b.com&subject=&body=b");
    }

    #[test]
    fn test_no_query_when_nothing_present() {
        let url = build("ymail://mail/compose", [("subject", None), ("body", None)])
            .unwrap();
        assert_eq!(url.as_str(), "ymail://mail/compose");
    }

    #[test]
    fn test_reject_relative_url() {
        // The WHATWG parser used by `url` refuses input without a scheme.
        assert!(
            build("bad url with space and no scheme", [("subject", None)])
                .is_none()
        );
        assert!(matches!(
            UrlBuilder::new("bad url with space and no scheme").try_build(),
            Err(Error::Url(url::ParseError::RelativeUrlWithoutBase))
        ));
    }

    #[test]
    fn test_keep_assembled_text() {
        let url = UrlBuilder::new("protonmail://mailto:")
            .param("subject", Some("S"))
            .build()
            .unwrap();
        assert_eq!(url.as_str(), "protonmail://mailto:?subject=S");
        assert_eq!(url.scheme(), "protonmail");
        assert_eq!(url.query(), Some("subject=S"));

        // Read as `user@host` by the parser, still printed as given.
        let url = build("protonmail://mailto:a@b@c.com", [("body", None)]).unwrap();
        assert_eq!(url.to_string(), "protonmail://mailto:a@b@c.com");
    }

    #[test]
    fn test_opaque_retry_for_custom_scheme() {
        // `nobody` is not a port, but custom schemes accept it after `//`.
        let url = build("protonmail://mailto:nobody", [("body", Some("x"))]).unwrap();
        assert_eq!(url.as_str(), "protonmail://mailto:nobody?body=x");
        assert_eq!(url.scheme(), "protonmail");
        assert_eq!(url.query_pairs().count(), 1);

        // Special schemes keep the strict authority rules.
        assert!(build("https://host:nobody", [("subject", None)]).is_none());
    }

    #[test]
    fn test_reject_invalid_characters() {
        assert!(matches!(
            UrlBuilder::new("mailto:a b@c.com").try_build(),
            Err(Error::InvalidCharacter { position: 8 })
        ));
        assert!(build("mailto:jo\u{e9}@c.com", [("subject", None)]).is_none());
    }
}
