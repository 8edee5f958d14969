//! Configuration types for the exporter

use crate::connection::SHUTDOWN_GRACE;
use crate::error::{ExportError, Result};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tonic::transport::Uri;

/// Collector address used when none is given.
pub const DEFAULT_TARGET: &str = "localhost:50051";

/// Profile file used when none is given.
pub const DEFAULT_PATH: &str = "./ciao";

/// Exporter configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Collector address, `host:port` or `http://host:port`
    pub target: String,

    /// File holding one binary-encoded profile record
    pub path: PathBuf,

    /// How long teardown waits for in-flight calls before giving up
    pub shutdown_grace: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            path: PathBuf::from(DEFAULT_PATH),
            shutdown_grace: SHUTDOWN_GRACE,
        }
    }
}

impl Config {
    pub fn new(target: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.target.trim().is_empty() {
            return Err(ExportError::Config("target must not be empty".to_string()));
        }

        if self.path.as_os_str().is_empty() {
            return Err(ExportError::Config("path must not be empty".to_string()));
        }

        Ok(())
    }
}

/// A collector endpoint, normalized to a plaintext `http://` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    uri: Uri,
}

impl Target {
    /// Parse `host:port` or `http://host:port`.
    ///
    /// Bare addresses get an `http://` prefix. Any other scheme is rejected,
    /// since the channel is never encrypted.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: String| ExportError::InvalidTarget {
            target: raw.to_string(),
            reason,
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid("target is empty".to_string()));
        }

        let with_scheme = match trimmed.split_once("://") {
            Some((scheme, _)) if scheme.eq_ignore_ascii_case("http") => trimmed.to_string(),
            Some((scheme, _)) => {
                return Err(invalid(format!(
                    "unsupported scheme '{}', only host:port and http://host:port targets are supported",
                    scheme
                )))
            }
            None => format!("http://{}", trimmed),
        };

        let uri = with_scheme
            .parse::<Uri>()
            .map_err(|e| invalid(e.to_string()))?;
        if uri.host().map_or(true, str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }

        Ok(Self { uri })
    }

    pub fn as_uri(&self) -> &Uri {
        &self.uri
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.uri.authority() {
            Some(authority) => write!(f, "http://{}", authority),
            None => write!(f, "{}", self.uri),
        }
    }
}
