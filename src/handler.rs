//! Interface to the platform URL handlers.
//!
//! Deciding whether an email app is installed is up to the host platform.
//! The registry only asks, through [`UrlHandler`], if `scheme:` can be opened.

use std::collections::HashSet;
use std::sync::Arc;

/// Port for checking whether an URL can be opened on this device.
pub trait UrlHandler: Send + Sync {
    /// Returns `true` if a registered application can open `url`.
    fn can_open(&self, url: &str) -> bool;
}

impl<F> UrlHandler for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn can_open(&self, url: &str) -> bool {
        self(url)
    }
}

pub type SharedHandler = Arc<dyn UrlHandler>;

/// Scheme part of an URL, lowercased, without the colon.
fn scheme_of(url: &str) -> Option<String> {
    let (scheme, _) = url.split_once(':')?;
    (!scheme.is_empty()).then(|| scheme.to_ascii_lowercase())
}

/// Fixed set of schemes known to be openable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledSchemes {
    schemes: HashSet<String>,
}

impl InstalledSchemes {
    /// Create a new [`InstalledSchemes`].
    ///
    /// Entries are case-insensitive and may carry a trailing colon.
    pub fn new<S: AsRef<str>>(schemes: impl IntoIterator<Item = S>) -> Self {
        Self {
            schemes: schemes
                .into_iter()
                .map(|scheme| {
                    scheme.as_ref().trim().trim_end_matches(':').to_ascii_lowercase()
                })
                .filter(|scheme| !scheme.is_empty())
                .collect(),
        }
    }

    /// Mark one more scheme as openable.
    pub fn insert(&mut self, scheme: &str) {
        self.schemes.extend(Self::new([scheme]).schemes);
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

impl UrlHandler for InstalledSchemes {
    fn can_open(&self, url: &str) -> bool {
        scheme_of(url).is_some_and(|scheme| self.schemes.contains(&scheme))
    }
}

/// Handler backed by the desktop environment.
///
/// On Linux, `xdg-mime` is asked for the default `x-scheme-handler`.
/// Other targets have no lookup and report nothing as openable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHandler;

impl SystemHandler {
    pub fn new() -> Self {
        Self
    }
}

impl UrlHandler for SystemHandler {
    #[cfg(target_os = "linux")]
    fn can_open(&self, url: &str) -> bool {
        use std::process::Command;

        let Some(scheme) = scheme_of(url) else {
            return false;
        };

        match Command::new("xdg-mime")
            .args(["query", "default"])
            .arg(format!("x-scheme-handler/{scheme}"))
            .output()
        {
            Ok(output) if output.status.success() => {
                let handler = String::from_utf8_lossy(&output.stdout);
                tracing::trace!(%scheme, handler = %handler.trim(), "xdg-mime answered");
                !handler.trim().is_empty()
            },
            Ok(output) => {
                tracing::debug!(%scheme, status = %output.status, "xdg-mime failed");
                false
            },
            Err(err) => {
                tracing::debug!(%scheme, error = %err, "cannot run xdg-mime");
                false
            },
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn can_open(&self, url: &str) -> bool {
        tracing::trace!(%url, "no url handler lookup on this platform");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_of() {
        assert_eq!(scheme_of("mailto:"), Some("mailto".into()));
        assert_eq!(scheme_of("MS-Outlook://compose"), Some("ms-outlook".into()));
        assert_eq!(scheme_of(":"), None);
        assert_eq!(scheme_of("mailto"), None);
    }

    #[test]
    fn test_installed_schemes() {
        let mut handler = InstalledSchemes::new(["mailto:", " GoogleGmail ", ""]);
        assert!(handler.can_open("mailto:"));
        assert!(handler.can_open("googlegmail:"));
        assert!(!handler.can_open("ymail:"));

        handler.insert("ymail");
        assert!(handler.can_open("ymail:"));
        assert!(!InstalledSchemes::default().can_open("mailto:"));
        assert!(InstalledSchemes::default().is_empty());
    }

    #[test]
    fn test_closure_handler() {
        let handler = |url: &str| url == "mailto:";
        assert!(handler.can_open("mailto:"));
        assert!(!handler.can_open("ymail:"));

        let shared: SharedHandler = Arc::new(handler);
        assert!(shared.can_open("mailto:"));
    }
}
