//! Kiosk configuration stored as `config.toml` in the `.ratekiosk` directory.
//!
//! Every field is optional. A missing file is replaced by the defaults so
//! operators get an editable template on first launch.

mod errors;
mod io;


use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app_dirs;
use crate::transport::{HttpTransport, TransportConfig};

pub use errors::ConfigError;
pub use io::{load_from_path, save_to_path};

/// Default filename used to store the kiosk configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/submit_feedback";
/// Seconds the acknowledgment stays up by default.
pub const DEFAULT_ACKNOWLEDGMENT_SECONDS: NonZeroU32 = NonZeroU32::new(5).unwrap();
/// Default overall timeout for one rating request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
/// Bounds applied to `request_timeout_secs` on load.
pub const REQUEST_TIMEOUT_RANGE_SECS: (u64, u64) = (1, 120);

/// Everything the kiosk reads at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    /// URL of the rating endpoint.
    pub endpoint: String,
    /// Length of the acknowledgment countdown.
    pub acknowledgment_seconds: NonZeroU32,
    /// Overall timeout for one rating request.
    pub request_timeout_secs: u64,
    /// Request and response shape.
    pub transport: TransportConfig,
    /// Window presentation.
    pub display: DisplaySettings,
}

/// Presentation options for the kiosk window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Heading shown above the rating buttons.
    pub prompt: String,
    /// Start the window fullscreen.
    pub fullscreen: bool,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            acknowledgment_seconds: DEFAULT_ACKNOWLEDGMENT_SECONDS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            transport: TransportConfig::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            prompt: "How satisfied are you with our service today?".to_string(),
            fullscreen: true,
        }
    }
}

impl KioskConfig {
    /// Trim and clamp loaded values.
    pub fn normalized(mut self) -> Self {
        self.endpoint = self.endpoint.trim().to_string();
        let (min, max) = REQUEST_TIMEOUT_RANGE_SECS;
        self.request_timeout_secs = self.request_timeout_secs.clamp(min, max);
        if self.display.prompt.trim().is_empty() {
            self.display.prompt = DisplaySettings::default().prompt;
        }
        self
    }

    /// Reject endpoints that are not absolute http(s) URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };
        let url = url::Url::parse(&self.endpoint).map_err(|err| invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }

    /// Overall timeout applied to each rating request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Transport for the configured endpoint.
    pub fn build_transport(&self) -> HttpTransport {
        HttpTransport::new(self.endpoint.clone(), self.transport, self.request_timeout())
    }
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir()?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, writing and returning defaults if missing.
pub fn load_or_default() -> Result<KioskConfig, ConfigError> {
    let path = config_path()?;
    if path.exists() {
        return load_from_path(&path);
    }
    let config = KioskConfig::default();
    match save_to_path(&config, &path) {
        Ok(()) => tracing::info!(path = %path.display(), "Wrote default configuration"),
        Err(err) => tracing::warn!(error = %err, "Could not write default configuration"),
    }
    Ok(config)
}
