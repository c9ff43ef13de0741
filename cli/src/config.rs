//! CLI configuration with TOML file support.

use chainvote_contracts::ContractAddresses;
use chainvote_types::{Address, Chain};
use chainvote_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("no contract addresses configured for chain {0} (add a [contracts.{0}] table)")]
    MissingContracts(&'static str),

    #[error("no wallet address configured (pass --caller or set CHAINVOTE_CALLER)")]
    MissingCaller,
}

/// Configuration for the `chainvote` CLI.
///
/// Loaded from a TOML file via [`CliConfig::from_toml_file`]; flags and
/// `CHAINVOTE_*` environment variables override individual fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CliConfig {
    /// Which chain the contracts live on.
    #[serde(default = "default_chain")]
    pub chain: Chain,

    /// Contract gateway endpoint.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// The connected wallet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller: Option<Address>,

    /// Delay between receipt polls while a transaction is confirming.
    #[serde(default = "default_confirmation_poll_ms")]
    pub confirmation_poll_ms: u64,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Contract addresses keyed by chain name.
    #[serde(default)]
    pub contracts: BTreeMap<String, ContractAddresses>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_chain() -> Chain {
    Chain::Sepolia
}

fn default_gateway_url() -> String {
    "http://127.0.0.1:8787/contracts".to_string()
}

fn default_confirmation_poll_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl CliConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Contract addresses for the selected chain.
    pub fn addresses(&self) -> Result<ContractAddresses, ConfigError> {
        self.contracts
            .get(self.chain.as_str())
            .copied()
            .ok_or(ConfigError::MissingContracts(self.chain.as_str()))
    }

    pub fn caller(&self) -> Result<Address, ConfigError> {
        self.caller.ok_or(ConfigError::MissingCaller)
    }

    pub fn confirmation_poll(&self) -> Duration {
        Duration::from_millis(self.confirmation_poll_ms)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            chain: default_chain(),
            gateway_url: default_gateway_url(),
            caller: None,
            confirmation_poll_ms: default_confirmation_poll_ms(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            contracts: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL: &str = r#"
        chain = "localhost"
        gateway_url = "http://localhost:9000/rpc"
        caller = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
        log_format = "json"

        [contracts.localhost]
        voter_database = "0x0101010101010101010101010101010101010101"
        candidate_database = "0x0202020202020202020202020202020202020202"
        election_database = "0x0303030303030303030303030303030303030303"
    "#;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert_eq!(config.chain, Chain::Sepolia);
        assert_eq!(config.confirmation_poll(), Duration::from_secs(1));
        assert_eq!(config.log_format, LogFormat::Human);
        assert!(matches!(config.caller(), Err(ConfigError::MissingCaller)));
        assert!(matches!(
            config.addresses(),
            Err(ConfigError::MissingContracts("sepolia"))
        ));
    }

    #[test]
    fn file_with_contract_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let config = CliConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.chain, Chain::Localhost);
        assert_eq!(config.caller().unwrap(), Address::new([0xaa; 20]));
        assert_eq!(config.log_format, LogFormat::Json);
        let addresses = config.addresses().unwrap();
        assert_eq!(addresses.election_database, Address::new([3; 20]));
    }

    #[test]
    fn written_config_reads_back() {
        let config = CliConfig::from_toml_str(FULL).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chainvote.toml");
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        let reread = CliConfig::from_toml_file(&path).unwrap();
        assert_eq!(reread.gateway_url, config.gateway_url);
        assert_eq!(reread.addresses().unwrap(), config.addresses().unwrap());
    }

    #[test]
    fn bad_address_is_a_parse_error() {
        let err = CliConfig::from_toml_str(r#"caller = "0x12""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = CliConfig::from_toml_file(Path::new("/nonexistent/chainvote.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
