//! Configuration manager for mailapps.

use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::handler::{InstalledSchemes, SharedHandler, SystemHandler};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_LOG_LEVEL: &str = "info";
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Source of truth for "can this app be opened".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handler {
    /// Ask the desktop environment.
    #[default]
    System,
    /// Trust the `schemes` list.
    Static,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Instance name, shown in logs.
    pub name: String,
    /// Default log level, overridden by `RUST_LOG`.
    pub log: String,
    /// Which [`Handler`] decides what is installed.
    pub handler: Handler,
    /// Installed URL schemes, used by the static handler.
    pub schemes: Vec<String>,
    #[serde(skip_deserializing)]
    version: String,
    #[serde(skip)]
    path: PathBuf,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_owned(),
            log: DEFAULT_LOG_LEVEL.to_owned(),
            handler: Handler::default(),
            schemes: Vec::new(),
            version: VERSION.to_owned(),
            path: PathBuf::default(),
        }
    }
}

impl Configuration {
    pub fn path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    /// Version of the crate which read the configuration.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Lowercases schemes and strips trailing colons.
    fn normalize_scheme(scheme: &str) -> String {
        scheme.trim().trim_end_matches(':').to_ascii_lowercase()
    }

    /// Reads the `config.yaml` file from the specified path or the default
    /// location.
    ///
    /// A missing file at the default location yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an explicit path cannot be opened, or if the file is
    /// not a valid configuration.
    pub fn read(self) -> Result<Arc<Self>> {
        let explicit = !self.path.as_os_str().is_empty();
        let file_path = if explicit {
            self.path.clone()
        } else {
            PathBuf::from(DEFAULT_CONFIG_PATH)
        };

        let file = match File::open(&file_path) {
            Ok(file) => file,
            Err(err) if !explicit && err.kind() == ErrorKind::NotFound => {
                return Ok(Arc::new(Self::default()));
            },
            Err(source) => {
                return Err(Error::Io {
                    path: file_path,
                    source,
                });
            },
        };

        let mut config: Configuration = serde_yaml::from_reader(file)?;

        // set app version.
        config.version = VERSION.to_owned();
        config.path = file_path;

        config.schemes = config
            .schemes
            .iter()
            .map(|scheme| Self::normalize_scheme(scheme))
            .filter(|scheme| !scheme.is_empty())
            .collect();

        Ok(Arc::new(config))
    }

    /// Build the URL handler described by this configuration.
    pub fn handler(&self) -> SharedHandler {
        match self.handler {
            Handler::System => Arc::new(SystemHandler::new()),
            Handler::Static => {
                if self.schemes.is_empty() {
                    tracing::warn!(
                        "static handler without `schemes`, no email app will be supported"
                    );
                }
                Arc::new(InstalledSchemes::new(&self.schemes))
            },
        }
    }
}
