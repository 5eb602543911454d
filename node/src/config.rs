//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};

use vox_types::ServiceParams;

use crate::NodeError;

/// Configuration for a vox node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Number of digits in a verification code.
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Seconds a pending verification code stays live.
    #[serde(default = "default_code_ttl_secs")]
    pub code_ttl_secs: u64,

    /// Fixed backoff (seconds) between delivery attempts.
    #[serde(default = "default_delivery_retry_delay_secs")]
    pub delivery_retry_delay_secs: u64,

    /// Delivery retries before a message is dead-lettered.
    #[serde(default = "default_delivery_max_retries")]
    pub delivery_max_retries: u32,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Polls created at startup. Polls have no runtime creation surface,
    /// so this is where the ballot comes from.
    #[serde(default, rename = "polls")]
    pub poll_seeds: Vec<PollSeed>,
}

/// One `[[polls]]` entry in the config file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PollSeed {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub option_a: String,
    pub option_b: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_port() -> u16 {
    8080
}

fn default_code_length() -> usize {
    6
}

fn default_code_ttl_secs() -> u64 {
    120
}

fn default_delivery_retry_delay_secs() -> u64 {
    5
}

fn default_delivery_max_retries() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("NodeConfig is always serializable to TOML")
    }

    /// The service parameters carried by this configuration.
    pub fn service_params(&self) -> ServiceParams {
        ServiceParams {
            code_length: self.code_length,
            code_ttl_secs: self.code_ttl_secs,
            delivery_retry_delay_secs: self.delivery_retry_delay_secs,
            delivery_max_retries: self.delivery_max_retries,
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            code_length: default_code_length(),
            code_ttl_secs: default_code_ttl_secs(),
            delivery_retry_delay_secs: default_delivery_retry_delay_secs(),
            delivery_max_retries: default_delivery_max_retries(),
            log_level: default_log_level(),
            poll_seeds: Vec::new(),
        }
    }
}
