//! Configuration for legacy transaction support

use crate::error::ConfigError;
use crate::handler::LegacyTxHandler;
use gridway_codec::LegacyAmino;
use gridway_log::{init_tracing, LogConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Maps a message type url to its legacy amino name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AminoRegistration {
    pub type_url: String,
    pub name: String,
}

/// Amino codec section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AminoConfig {
    pub registrations: Vec<AminoRegistration>,
    /// Multisig layers accepted by the handler, unbounded when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_multisig_depth: Option<usize>,
}

/// Legacy transaction configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyTxConfig {
    pub amino: AminoConfig,
    pub log: LogConfig,
}

impl LegacyTxConfig {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LegacyTxConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Register every configured message and seal the codec
    pub fn build_codec(&self) -> Result<LegacyAmino, ConfigError> {
        let mut cdc = LegacyAmino::new();
        for reg in &self.amino.registrations {
            cdc.register_concrete(&reg.type_url, &reg.name)?;
        }
        cdc.seal();
        Ok(cdc)
    }

    /// Install the global tracing subscriber from the `[log]` section; fails
    /// if one is already installed
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        init_tracing(&self.log).map_err(|e| ConfigError::Logging(e.to_string()))
    }

    pub fn build_handler(&self) -> Result<LegacyTxHandler, ConfigError> {
        let cdc = self.build_codec()?;
        Ok(LegacyTxHandler::new(
            Arc::new(cdc),
            self.amino.max_multisig_depth,
        ))
    }
}
