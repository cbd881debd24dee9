//! Client configuration

use std::path::Path;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Fallback text for transport and decoding failures
pub const DEFAULT_CONNECTIVITY_MESSAGE: &str =
    "Something went wrong. Please check your internet connection and try again.";

/// How GET and PATCH place their parameters in the URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressingMode {
    /// Append `?key=value&...`
    #[default]
    Query,
    /// Substitute `{0}`, `{1}`, ... with route parameters
    Route,
}

/// Client settings, read once at construction time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Addressing mode used by GET
    pub get_addressing: AddressingMode,
    /// Addressing mode used by PATCH
    pub patch_addressing: AddressingMode,
    /// Message reported as [`ErrorKind::Custom`](crate::ErrorKind::Custom)
    /// when no usable response arrives
    pub connectivity_message: String,
    /// `User-Agent` sent by the default transport
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            get_addressing: AddressingMode::Query,
            patch_addressing: AddressingMode::Query,
            connectivity_message: DEFAULT_CONNECTIVITY_MESSAGE.to_string(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load from a TOML file, on top of the defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::from(path.as_ref()).format(FileFormat::Toml);
        Self::layered(file)
    }

    /// Load from TOML text, on top of the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::layered(File::from_str(toml, FileFormat::Toml))
    }

    fn layered<S>(source: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            // use defaults
            .add_source(Config::try_from(&Self::default())?)
            // override with the given source
            .add_source(source)
            .build()?;

        config.try_deserialize()
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Addressing mode for GET
    pub fn get_addressing(mut self, mode: AddressingMode) -> Self {
        self.config.get_addressing = mode;
        self
    }

    /// Addressing mode for PATCH
    pub fn patch_addressing(mut self, mode: AddressingMode) -> Self {
        self.config.patch_addressing = mode;
        self
    }

    /// Fallback message for transport and decoding failures
    pub fn connectivity_message(mut self, message: impl Into<String>) -> Self {
        self.config.connectivity_message = message.into();
        self
    }

    /// `User-Agent` for the default transport
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Finish building
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
