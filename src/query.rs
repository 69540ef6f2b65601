//! Query items appended to compose URLs.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Subject of the message.
pub const EMAIL_SUBJECT: &str = "subject";
/// Body of the message.
pub const EMAIL_BODY: &str = "body";
/// Recipient, for most apps taking it as a query parameter.
pub const EMAIL_TO: &str = "to";
/// Recipient, Spark dialect.
pub const EMAIL_RECIPIENT: &str = "recipient";

/// Characters escaped inside a query name or value.
///
/// `@`, `/`, `:` and `?` are legal in a query and stay readable, so that
/// `to=a@b.com` is not turned into `to=a%40b.com`.
const COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A single `name=value` pair. An absent value drops the pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryItem {
    pub name: String,
    pub value: Option<String>,
}

impl QueryItem {
    /// Create a new [`QueryItem`].
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(str::to_owned),
        }
    }

    /// Encoded `name=value`, or `None` if the value is absent.
    pub(crate) fn encode(&self) -> Option<String> {
        self.value.as_deref().map(|value| {
            format!(
                "{}={}",
                utf8_percent_encode(&self.name, COMPONENT),
                utf8_percent_encode(value, COMPONENT)
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_keeps_address_readable() {
        let item = QueryItem::new(EMAIL_TO, Some("a@b.com"));
        assert_eq!(item.encode().as_deref(), Some("to=a@b.com"));
    }

    #[test]
    fn test_encode_escapes_separators() {
        let item = QueryItem::new(EMAIL_BODY, Some("a b&c=d+e#f 100%"));
        assert_eq!(
            item.encode().as_deref(),
            Some("body=a%20b%26c%3Dd%2Be%23f%20100%25")
        );
    }

    #[test]
    fn test_absent_and_empty_values() {
        assert_eq!(QueryItem::new(EMAIL_SUBJECT, None).encode(), None);
        assert_eq!(
            QueryItem::new(EMAIL_SUBJECT, Some("")).encode().as_deref(),
            Some("subject=")
        );
    }
}
