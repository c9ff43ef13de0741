//! Chain identifier.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TypesError;

/// Identifies which chain the election contracts are deployed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Ethereum mainnet.
    Mainnet,
    /// The Sepolia public test network.
    Sepolia,
    /// A local development node.
    Localhost,
}

impl Chain {
    /// EIP-155 chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Sepolia => 11_155_111,
            Self::Localhost => 31_337,
        }
    }

    /// Human-readable name, also the key of the per-chain contract address table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Sepolia => "sepolia",
            Self::Localhost => "localhost",
        }
    }
}

impl FromStr for Chain {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "sepolia" => Ok(Self::Sepolia),
            "localhost" | "local" | "dev" => Ok(Self::Localhost),
            other => Err(TypesError::UnknownChain(other.to_string())),
        }
    }
}
