//! Known email apps and their compose URL dialects.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use crate::builder::{ComposeUrl, UrlBuilder};
use crate::error::{Error, Result};
use crate::handler::UrlHandler;
use crate::query::{EMAIL_BODY, EMAIL_RECIPIENT, EMAIL_SUBJECT, EMAIL_TO};

/// Where the recipient address goes in the compose URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "name")]
pub enum AddressEmbedding {
    /// Concatenated to the URL prefix, before the query string.
    Inline,
    /// Passed as a query item with the given name.
    Query(&'static str),
}

/// Static description of an email app URL dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// Name of the email app.
    pub name: &'static str,
    /// URL scheme of the email app, without colon.
    pub scheme: &'static str,
    /// Scheme-specific path, may be empty.
    pub path: &'static str,
    /// How the recipient is given to the app.
    pub address: AddressEmbedding,
}

const PROTON: Descriptor = Descriptor {
    name: "Proton",
    scheme: "protonmail",
    path: "//mailto:",
    address: AddressEmbedding::Inline,
};

const GMAIL: Descriptor = Descriptor {
    name: "Gmail",
    scheme: "googlegmail",
    path: "//co",
    address: AddressEmbedding::Query(EMAIL_TO),
};

const OUTLOOK: Descriptor = Descriptor {
    name: "Outlook",
    scheme: "ms-outlook",
    path: "//compose",
    address: AddressEmbedding::Query(EMAIL_TO),
};

const YAHOO: Descriptor = Descriptor {
    name: "Yahoo",
    scheme: "ymail",
    path: "//mail/compose",
    address: AddressEmbedding::Query(EMAIL_TO),
};

const SPARK: Descriptor = Descriptor {
    name: "Spark",
    scheme: "readdle-spark",
    path: "//compose",
    address: AddressEmbedding::Query(EMAIL_RECIPIENT),
};

// The system handler takes the address right after the colon.
const DEFAULT: Descriptor = Descriptor {
    name: "Mail",
    scheme: "mailto",
    path: "",
    address: AddressEmbedding::Inline,
};

/// Message to pre-fill on the compose screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeRequest {
    pub email: String,
    pub subject: Option<String>,
    pub body: Option<String>,
}

impl ComposeRequest {
    /// Create a new [`ComposeRequest`] without subject nor body.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    /// Update `subject` field on [`ComposeRequest`].
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Update `body` field on [`ComposeRequest`].
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Built-in email apps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Proton,
    Gmail,
    Outlook,
    Yahoo,
    Spark,
    /// System mail handler, `mailto:`.
    Default,
}

impl Provider {
    /// Every known email app, in a stable order.
    pub const ALL: [Provider; 6] = [
        Provider::Proton,
        Provider::Gmail,
        Provider::Outlook,
        Provider::Yahoo,
        Provider::Spark,
        Provider::Default,
    ];

    pub fn descriptor(&self) -> &'static Descriptor {
        match self {
            Provider::Proton => &PROTON,
            Provider::Gmail => &GMAIL,
            Provider::Outlook => &OUTLOOK,
            Provider::Yahoo => &YAHOO,
            Provider::Spark => &SPARK,
            Provider::Default => &DEFAULT,
        }
    }

    /// Name of the email app.
    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// URL scheme of the email app.
    pub fn scheme(&self) -> &'static str {
        self.descriptor().scheme
    }

    /// URL first part formed by `scheme` and `path`.
    pub fn url_prefix(&self) -> String {
        self.descriptor().url_prefix()
    }

    /// Checks if the email app can be opened on the current device.
    pub fn is_supported(&self, handler: &dyn UrlHandler) -> bool {
        handler.can_open(&format!("{}:", self.scheme()))
    }

    /// Creates URL to open the email app on a new message with the
    /// specified email, subject and body fields.
    ///
    /// Returns `None` if no valid URL can be formed. Whether the app is
    /// installed is not checked here.
    pub fn compose_url(
        &self,
        email: &str,
        subject: Option<&str>,
        body: Option<&str>,
    ) -> Option<ComposeUrl> {
        self.builder(email, subject, body).build()
    }

    /// Same as [`Provider::compose_url`] with the parser error kept.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the assembled URL is rejected.
    pub fn try_compose(&self, request: &ComposeRequest) -> Result<ComposeUrl> {
        self.builder(
            &request.email,
            request.subject.as_deref(),
            request.body.as_deref(),
        )
        .try_build()
    }

    /// [`Provider::compose_url`] for a [`ComposeRequest`].
    pub fn compose(&self, request: &ComposeRequest) -> Option<ComposeUrl> {
        self.compose_url(
            &request.email,
            request.subject.as_deref(),
            request.body.as_deref(),
        )
    }

    fn builder(
        &self,
        email: &str,
        subject: Option<&str>,
        body: Option<&str>,
    ) -> UrlBuilder {
        tracing::trace!(provider = self.name(), "compose url");

        let prefix = self.url_prefix();
        let builder = match self.descriptor().address {
            AddressEmbedding::Inline => UrlBuilder::new(format!("{prefix}{email}")),
            AddressEmbedding::Query(name) => {
                UrlBuilder::new(prefix).param(name, Some(email))
            },
        };

        builder
            .param(EMAIL_SUBJECT, subject)
            .param(EMAIL_BODY, body)
    }
}

impl Descriptor {
    /// `scheme:path`.
    pub fn url_prefix(&self) -> String {
        format!("{}:{}", self.scheme, self.path)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Provider {
    type Err = Error;

    /// Finds an email app by display name, variant name or scheme.
    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().trim_end_matches(':');

        Provider::ALL
            .into_iter()
            .find(|provider| {
                needle.eq_ignore_ascii_case(provider.name())
                    || needle.eq_ignore_ascii_case(provider.scheme())
                    || needle.eq_ignore_ascii_case(&format!("{provider:?}"))
            })
            .ok_or_else(|| Error::UnknownProvider(s.to_string()))
    }
}

/// [`Descriptor`] with its computed prefix.
#[derive(Serialize)]
struct Listing {
    #[serde(flatten)]
    descriptor: &'static Descriptor,
    prefix: String,
}

impl Serialize for Provider {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        Listing {
            descriptor: self.descriptor(),
            prefix: self.url_prefix(),
        }
        .serialize(serializer)
    }
}
