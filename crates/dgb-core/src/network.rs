// crates/dgb-core/src/network.rs
//
// Network selection. Each network carries its own monetary policy preset
// (see dgb-economics::params) and default RPC port.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DgbError;

/// The chain a node is running on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network.
    #[default]
    Main,
    /// Public test network, reset from time to time.
    Test,
    /// Signed-block test network.
    Signet,
    /// Private regression-test network with instant block generation.
    Regtest,
}

impl Network {
    /// All known networks, in display order.
    pub const ALL: [Network; 4] = [
        Network::Main,
        Network::Test,
        Network::Signet,
        Network::Regtest,
    ];

    /// Default port for the JSON-RPC server on this network.
    pub fn default_rpc_port(&self) -> u16 {
        match self {
            Network::Main => 14022,
            Network::Test => 14023,
            Network::Signet => 38443,
            Network::Regtest => 18443,
        }
    }

    /// Whether `generatetoaddress` may append blocks without proof-of-work.
    pub fn allows_generate(&self) -> bool {
        matches!(self, Network::Regtest)
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Signet => "signet",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = DgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            "signet" => Ok(Network::Signet),
            "regtest" => Ok(Network::Regtest),
            other => Err(DgbError::InvalidParameter(format!(
                "unknown network '{}': expected main, test, signet, or regtest",
                other
            ))),
        }
    }
}
