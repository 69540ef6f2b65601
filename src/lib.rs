//! Mailapps builds deep links opening email apps on a pre-filled compose
//! screen.
//!
//! ```
//! use mailapps::{InstalledSchemes, EmailApps, Provider};
//!
//! let url = Provider::Gmail.compose_url("a@b.com", Some("Hi"), None);
//! assert_eq!(
//!     url.map(String::from).as_deref(),
//!     Some("googlegmail://co?to=a@b.com&subject=Hi")
//! );
//!
//! let apps = EmailApps::new(InstalledSchemes::new(["mailto"]));
//! assert_eq!(apps.supported(), vec![Provider::Default]);
//! ```

#![forbid(unsafe_code)]

pub mod builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod provider;
pub mod query;
pub mod registry;
pub mod telemetry;

pub use builder::{ComposeUrl, UrlBuilder, build};
pub use error::{Error, Result};
pub use handler::{InstalledSchemes, SharedHandler, SystemHandler, UrlHandler};
pub use provider::{AddressEmbedding, ComposeRequest, Descriptor, Provider};
pub use registry::EmailApps;
