//! The call key sent to the contract gateway, plus argument encoding helpers.

use chainvote_types::{Address, TxHash};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The ABI a call is made against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractKind {
    VoterDatabase,
    CandidateDatabase,
    ElectionDatabase,
}

impl ContractKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VoterDatabase => "VoterDatabase",
            Self::CandidateDatabase => "CandidateDatabase",
            Self::ElectionDatabase => "ElectionDatabase",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(contract address, ABI, function, args, caller)`: everything needed to
/// issue a read or write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractCall {
    pub contract: Address,
    pub kind: ContractKind,
    pub function: &'static str,
    pub args: Vec<Value>,
    /// The connected wallet; `msg.sender` for reads, signer for writes.
    pub caller: Address,
}

impl ContractCall {
    /// Cache key. Includes the caller because `getMy*` style reads depend on it.
    pub fn cache_key(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.contract,
            self.function,
            Value::Array(self.args.clone()),
            self.caller
        )
    }

    /// Prefix shared by every cache key of `function` on `contract`.
    pub fn function_prefix(contract: &Address, function: &str) -> String {
        format!("{contract}:{function}:")
    }
}

/// Inclusion proof for a broadcast transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    #[serde(rename = "transaction_hash")]
    pub hash: TxHash,
    #[serde(default)]
    pub block_number: u64,
    /// `false` if the transaction was mined but reverted.
    #[serde(rename = "status", default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

/// JSON encoding of call arguments.
///
/// uint256 values go over the wire as decimal strings so no consumer has to
/// squeeze them through a float.
pub mod args {
    use chainvote_types::Address;
    use serde_json::Value;

    pub fn address(a: &Address) -> Value {
        Value::String(a.to_string())
    }

    pub fn addresses(list: &[Address]) -> Value {
        Value::Array(list.iter().map(address).collect())
    }

    pub fn uint(n: u64) -> Value {
        Value::String(n.to_string())
    }

    pub fn small(n: u8) -> Value {
        Value::from(n)
    }

    pub fn text(s: &str) -> Value {
        Value::String(s.to_string())
    }
}
