//! Registry of email apps available on the current device.

use std::sync::Arc;

use crate::builder::ComposeUrl;
use crate::handler::{SharedHandler, UrlHandler};
use crate::provider::{ComposeRequest, Provider};

/// List known email apps.
pub fn all() -> &'static [Provider] {
    &Provider::ALL
}

/// Known email apps filtered through a platform [`UrlHandler`].
#[derive(Clone)]
pub struct EmailApps {
    handler: SharedHandler,
}

impl EmailApps {
    /// Create a new [`EmailApps`].
    pub fn new(handler: impl UrlHandler + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Create a new [`EmailApps`] from an already shared handler.
    pub fn with_handler(handler: SharedHandler) -> Self {
        Self { handler }
    }

    /// List known email apps.
    pub fn all(&self) -> &'static [Provider] {
        all()
    }

    /// Checks a single email app against the handler.
    pub fn is_supported(&self, provider: Provider) -> bool {
        provider.is_supported(self.handler.as_ref())
    }

    /// List supported email apps.
    ///
    /// The handler is asked again on every call, as apps may have been
    /// installed or removed in between.
    pub fn supported(&self) -> Vec<Provider> {
        let supported = all()
            .iter()
            .copied()
            .filter(|provider| self.is_supported(*provider))
            .collect::<Vec<_>>();

        tracing::debug!(?supported, "email apps looked up");
        supported
    }

    /// Compose URLs for every supported email app.
    ///
    /// Apps unable to build an URL for `request` are skipped.
    pub fn compose_supported(&self, request: &ComposeRequest) -> Vec<(Provider, ComposeUrl)> {
        self.supported()
            .into_iter()
            .filter_map(|provider| match provider.try_compose(request) {
                Ok(url) => Some((provider, url)),
                Err(err) => {
                    tracing::warn!(%provider, error = %err, "skipping email app");
                    None
                },
            })
            .collect()
    }
}

impl std::fmt::Debug for EmailApps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailApps").finish_non_exhaustive()
    }
}
