//! Transport seam to the external contracts, and the HTTP gateway implementation.

use async_trait::async_trait;
use chainvote_types::TxHash;
use serde_json::{json, Value};
use std::time::Duration;

use crate::call::{ContractCall, TxReceipt};
use crate::error::{ContractError, ErrorKind};

/// Request/response access to the election contracts.
///
/// Implementations resolve reads to the raw decoded tuple, writes to the
/// transaction hash once broadcast, and receipts to `None` until the
/// transaction is mined.
#[async_trait]
pub trait ContractTransport: Send + Sync {
    async fn read(&self, call: &ContractCall) -> Result<Value, ContractError>;

    /// Ask the connected wallet to sign and broadcast. May wait indefinitely
    /// for the wallet owner.
    async fn write(&self, call: &ContractCall) -> Result<TxHash, ContractError>;

    async fn receipt(&self, hash: &TxHash) -> Result<Option<TxReceipt>, ContractError>;
}

// ── HttpTransport ───────────────────────────────────────────────────────

/// JSON-RPC client for a contract gateway (a node plus the wallet that signs
/// for the caller).
///
/// Every request is a POST of a JSON object tagged with an `action`
/// (`contract_read`, `contract_write` or `transaction_receipt`). Responses
/// carry either `result` or `error`; `error` may be a plain string or an
/// object with `message` and an optional `kind`.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    gateway_url: String,
}

impl HttpTransport {
    /// Create a transport targeting the given gateway URL (e.g. `http://127.0.0.1:8545`).
    ///
    /// Only connecting is time-limited: a `contract_write` is answered after
    /// the wallet owner signs, which has no upper bound.
    pub fn new(gateway_url: impl Into<String>) -> Result<Self, ContractError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ContractError::transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            gateway_url: gateway_url.into(),
        })
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    /// Send a JSON-RPC request and return the `result` field.
    async fn rpc_call(&self, action: &str, params: Value) -> Result<Value, ContractError> {
        let mut body = params;
        body.as_object_mut()
            .ok_or_else(|| ContractError::transport("params must be a JSON object"))?
            .insert("action".to_string(), json!(action));

        let response = self
            .http
            .post(&self.gateway_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ContractError::transport(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ContractError::transport(format!(
                "gateway returned HTTP {}",
                response.status()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| ContractError::transport(format!("invalid JSON response: {e}")))?;

        if let Some(err) = json.get("error").filter(|e| !e.is_null()) {
            return Err(gateway_error(err));
        }

        Ok(json.get("result").cloned().unwrap_or(Value::Null))
    }

    fn call_params(call: &ContractCall) -> Value {
        json!({
            "contract": call.contract.to_string(),
            "abi": call.kind.as_str(),
            "function": call.function,
            "args": call.args,
            "from": call.caller.to_string(),
        })
    }
}

/// Map a gateway `error` payload to a [`ContractError`].
fn gateway_error(err: &Value) -> ContractError {
    match err {
        Value::String(message) => ContractError::classify(message.clone()),
        Value::Object(obj) => {
            let message = obj
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown gateway error")
                .to_string();
            match obj.get("kind").and_then(Value::as_str) {
                Some("user_rejected") => ContractError::new(ErrorKind::UserRejected, message),
                Some("reverted") => ContractError::new(ErrorKind::Reverted, message),
                Some("transport") => ContractError::new(ErrorKind::Transport, message),
                _ => ContractError::classify(message),
            }
        }
        other => ContractError::classify(other.to_string()),
    }
}

#[async_trait]
impl ContractTransport for HttpTransport {
    async fn read(&self, call: &ContractCall) -> Result<Value, ContractError> {
        self.rpc_call("contract_read", Self::call_params(call)).await
    }

    async fn write(&self, call: &ContractCall) -> Result<TxHash, ContractError> {
        let result = self
            .rpc_call("contract_write", Self::call_params(call))
            .await?;
        let hash = result
            .as_str()
            .ok_or_else(|| ContractError::decode(format!("expected transaction hash, got {result}")))?;
        hash.parse()
            .map_err(|e| ContractError::decode(format!("invalid transaction hash: {e}")))
    }

    async fn receipt(&self, hash: &TxHash) -> Result<Option<TxReceipt>, ContractError> {
        let result = self
            .rpc_call("transaction_receipt", json!({ "hash": hash.to_string() }))
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        serde_json::from_value(result)
            .map(Some)
            .map_err(|e| ContractError::decode(format!("invalid receipt: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::{args, ContractKind};
    use chainvote_types::Address;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HASH: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";

    fn call(function: &'static str) -> ContractCall {
        ContractCall {
            contract: Address::new([0xee; 20]),
            kind: ContractKind::ElectionDatabase,
            function,
            args: vec![args::uint(7)],
            caller: Address::new([0xaa; 20]),
        }
    }

    #[tokio::test]
    async fn read_sends_call_key_and_returns_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "action": "contract_read",
                "abi": "ElectionDatabase",
                "function": "getTotalVoteCount",
                "args": ["7"],
                "from": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "12" })))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        let value = transport.read(&call("getTotalVoteCount")).await.unwrap();
        assert_eq!(value, json!("12"));
    }

    #[tokio::test]
    async fn write_returns_hash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "action": "contract_write" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": HASH })))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        let hash = transport.write(&call("vote")).await.unwrap();
        assert_eq!(hash.to_string(), HASH);
    }

    #[tokio::test]
    async fn string_error_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "error": "User rejected the request." })),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        let err = transport.write(&call("vote")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UserRejected);
    }

    #[tokio::test]
    async fn object_error_carries_kind() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": { "message": "Already voted", "kind": "reverted" }
            })))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        let err = transport.write(&call("vote")).await.unwrap_err();
        assert_eq!(err, ContractError::reverted("Already voted"));
    }

    #[tokio::test]
    async fn http_failure_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        let err = transport.read(&call("getWinner")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transport);
        assert!(err.retryable());
    }

    #[tokio::test]
    async fn pending_receipt_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "action": "transaction_receipt", "hash": HASH })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": null })))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        let receipt = transport.receipt(&HASH.parse().unwrap()).await.unwrap();
        assert!(receipt.is_none());
    }

    #[tokio::test]
    async fn mined_receipt_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": { "transaction_hash": HASH, "block_number": 42, "status": true }
            })))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        let receipt = transport
            .receipt(&HASH.parse().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(receipt.block_number, 42);
        assert!(receipt.success);
    }
}
