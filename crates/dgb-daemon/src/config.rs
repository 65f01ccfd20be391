// crates/dgb-daemon/src/config.rs
//
// Runtime configuration for the DGB daemon.
// Loaded from a TOML file or populated with sensible defaults.
//
// An optional `[[emission.eras]]` table replaces the network's preset
// schedule. Only a missing file falls back to defaults; any other read,
// parse, or schedule error stops start-up before the RPC server binds.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use dgb_core::Network;
use dgb_economics::{schedule_for, EmissionEra, EmissionError, EmissionSchedule};

/// Errors that stop the daemon while reading its configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Schedule(#[from] EmissionError),
}

/// Where the start-up configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    Defaults,
}

/// Everything the daemon needs before it binds: the effective config and its
/// validated emission schedule.
#[derive(Debug)]
pub struct Startup {
    pub config: DaemonConfig,
    pub schedule: EmissionSchedule,
    pub source: ConfigSource,
}

/// Resolve the config file, apply CLI overrides, and validate the schedule.
///
/// Overrides are applied before the schedule is built so a `--network` flag
/// selects the matching preset.
pub fn prepare(
    path: &Path,
    network: Option<Network>,
    rpc_port: Option<u16>,
) -> Result<Startup, ConfigError> {
    let (mut config, source) = DaemonConfig::load_or_default(path)?;
    if let Some(network) = network {
        config.network = network;
    }
    if let Some(port) = rpc_port {
        config.rpc_port = Some(port);
    }
    let schedule = config.build_schedule()?;
    Ok(Startup {
        config,
        schedule,
        source,
    })
}

/// Runtime configuration for the daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    /// Network to run: "main", "test", "signet", or "regtest".
    #[serde(default)]
    pub network: Network,

    /// Directory for local data storage.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Host address for the RPC server.
    #[serde(default = "default_rpc_host")]
    pub rpc_host: String,

    /// Port for the RPC server. Defaults to the network's RPC port.
    #[serde(default)]
    pub rpc_port: Option<u16>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Replacement emission schedule.
    #[serde(default)]
    pub emission: Option<EmissionOverride>,
}

/// The `[emission]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct EmissionOverride {
    pub eras: Vec<EmissionEra>,
}

fn default_data_dir() -> String {
    "~/.dgb/data".to_string()
}

fn default_rpc_host() -> String {
    "127.0.0.1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            data_dir: default_data_dir(),
            rpc_host: default_rpc_host(),
            rpc_port: None,
            log_level: default_log_level(),
            emission: None,
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok((config, ConfigSource::File)),
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok((Self::default(), ConfigSource::Defaults))
            }
            Err(e) => Err(e),
        }
    }

    /// Parse configuration from TOML text.
    ///
    /// A bad `[emission]` table is reported as a malformed schedule rather
    /// than a generic parse error.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(contents)?;
        let emission = table.remove("emission");

        let mut config: DaemonConfig = toml::Value::Table(table).try_into()?;
        if let Some(emission) = emission {
            let emission: EmissionOverride = emission
                .try_into()
                .map_err(|e| EmissionError::MalformedSchedule(format!("[emission]: {}", e)))?;
            config.emission = Some(emission);
        }
        Ok(config)
    }

    /// The RPC port, falling back to the network default.
    pub fn rpc_port(&self) -> u16 {
        self.rpc_port.unwrap_or_else(|| self.network.default_rpc_port())
    }

    /// Build and validate the emission schedule: the configured override if
    /// present, otherwise the network preset.
    pub fn build_schedule(&self) -> Result<EmissionSchedule, EmissionError> {
        match &self.emission {
            Some(emission) => EmissionSchedule::new(emission.eras.clone()),
            None => schedule_for(self.network),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dgb_economics::RewardResolver;

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = DaemonConfig::parse("").unwrap();
        assert_eq!(cfg.network, Network::Main);
        assert_eq!(cfg.rpc_port(), Network::Main.default_rpc_port());
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.emission.is_none());
    }

    #[test]
    fn test_rpc_port_follows_network() {
        let cfg = DaemonConfig::parse("network = \"regtest\"").unwrap();
        assert_eq!(cfg.rpc_port(), Network::Regtest.default_rpc_port());

        let cfg = DaemonConfig::parse("network = \"regtest\"\nrpc_port = 9000").unwrap();
        assert_eq!(cfg.rpc_port(), 9000);
    }

    #[test]
    fn test_preset_schedule_without_override() {
        let cfg = DaemonConfig::parse("network = \"signet\"").unwrap();
        let schedule = cfg.build_schedule().unwrap();
        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn test_emission_override() {
        let toml = r#"
            network = "regtest"

            [[emission.eras]]
            start_height = 0
            end_height = 100
            base_reward = 5000000000
            rule = { kind = "flat" }

            [[emission.eras]]
            start_height = 100
            base_reward = 5000000000
            rule = { kind = "halving", interval = 10 }
        "#;
        let cfg = DaemonConfig::parse(toml).unwrap();
        let resolver = RewardResolver::new(cfg.build_schedule().unwrap());
        assert_eq!(resolver.reward_at(99).unwrap(), 5_000_000_000);
        assert_eq!(resolver.reward_at(110).unwrap(), 2_500_000_000);
    }

    #[test]
    fn test_gapped_override_is_malformed() {
        let toml = r#"
            [[emission.eras]]
            start_height = 0
            end_height = 100
            base_reward = 100
            rule = { kind = "flat" }

            [[emission.eras]]
            start_height = 150
            base_reward = 100
            rule = { kind = "flat" }
        "#;
        let cfg = DaemonConfig::parse(toml).unwrap();
        assert!(matches!(
            cfg.build_schedule(),
            Err(EmissionError::MalformedSchedule(_))
        ));
    }

    #[test]
    fn test_zero_interval_is_malformed() {
        let toml = r#"
            [[emission.eras]]
            start_height = 0
            base_reward = 100
            rule = { kind = "halving", interval = 0 }
        "#;
        assert!(matches!(
            DaemonConfig::parse(toml),
            Err(ConfigError::Schedule(EmissionError::MalformedSchedule(_)))
        ));
    }

    #[test]
    fn test_mistyped_era_is_malformed() {
        let negative_start = r#"
            [[emission.eras]]
            start_height = -1
            base_reward = 100
            rule = { kind = "flat" }
        "#;
        let string_reward = r#"
            [[emission.eras]]
            start_height = 0
            base_reward = "lots"
            rule = { kind = "flat" }
        "#;
        for toml in [negative_start, string_reward] {
            assert!(matches!(
                DaemonConfig::parse(toml),
                Err(ConfigError::Schedule(EmissionError::MalformedSchedule(_)))
            ));
        }
    }

    #[test]
    fn test_bad_top_level_value_is_parse_error() {
        assert!(matches!(
            DaemonConfig::parse("rpc_port = \"not a port\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            DaemonConfig::parse("network = "),
            Err(ConfigError::Parse(_))
        ));
    }

    // -----------------------------------------------------------------------
    // Start-up resolution
    // -----------------------------------------------------------------------

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_starts_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let startup = prepare(&dir.path().join("absent.toml"), None, None).unwrap();
        assert_eq!(startup.source, ConfigSource::Defaults);
        assert_eq!(startup.config.network, Network::Main);
        assert_eq!(startup.schedule.len(), 4);
    }

    #[test]
    fn test_zero_interval_override_refuses_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
            network = "regtest"
            rpc_port = 28555

            [[emission.eras]]
            start_height = 0
            base_reward = 100
            rule = { kind = "halving", interval = 0 }
            "#,
        );
        assert!(matches!(
            prepare(&path, None, None),
            Err(ConfigError::Schedule(EmissionError::MalformedSchedule(_)))
        ));
    }

    #[test]
    fn test_gapped_override_refuses_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
            [[emission.eras]]
            start_height = 0
            end_height = 100
            base_reward = 100
            rule = { kind = "flat" }

            [[emission.eras]]
            start_height = 150
            base_reward = 100
            rule = { kind = "flat" }
            "#,
        );
        assert!(matches!(
            prepare(&path, None, None),
            Err(ConfigError::Schedule(EmissionError::MalformedSchedule(_)))
        ));
    }

    #[test]
    fn test_unparseable_file_refuses_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "network = [");
        assert!(matches!(prepare(&path, None, None), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unreadable_path_refuses_start() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists but cannot be read as a file.
        assert!(matches!(
            prepare(dir.path(), None, None),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_cli_overrides_apply_before_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "network = \"main\"\nlog_level = \"debug\"");
        let startup = prepare(&path, Some(Network::Signet), Some(9000)).unwrap();
        assert_eq!(startup.source, ConfigSource::File);
        assert_eq!(startup.config.network, Network::Signet);
        assert_eq!(startup.config.rpc_port(), 9000);
        assert_eq!(startup.config.log_level, "debug");
        assert_eq!(startup.schedule.len(), 2);
    }
}
