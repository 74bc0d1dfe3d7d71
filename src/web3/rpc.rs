use std::sync::atomic::{AtomicU64, Ordering};

use alloy::primitives::hex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Minimal Ethereum JSON-RPC client over HTTP. Read-only calls only.
#[derive(Debug)]
pub struct JsonRpcClient {
    http: Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue a JSON-RPC request and return its `result` field.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
            "method": method,
            "params": params,
        });

        let resp: RpcResponse = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = resp.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        resp.result
            .ok_or_else(|| RpcError::Unexpected(format!("{method}: missing result")))
    }

    pub async fn block_number(&self) -> Result<u64, RpcError> {
        let value = self.call("eth_blockNumber", json!([])).await?;
        parse_quantity(&value)
    }

    pub async fn chain_id(&self) -> Result<u64, RpcError> {
        let value = self.call("eth_chainId", json!([])).await?;
        parse_quantity(&value)
    }

    /// `eth_call` against the latest block, returning the raw return data.
    pub async fn eth_call(&self, to: &str, data: &str) -> Result<Vec<u8>, RpcError> {
        let value = self
            .call("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await?;
        let raw = value
            .as_str()
            .ok_or_else(|| RpcError::Unexpected(format!("eth_call returned {value}")))?;
        hex::decode(raw).map_err(|e| RpcError::Unexpected(format!("eth_call hex: {e}")))
    }
}

/// Decode a hex `QUANTITY` such as `"0x1b4"`.
pub fn parse_quantity(value: &Value) -> Result<u64, RpcError> {
    let s = value
        .as_str()
        .ok_or_else(|| RpcError::Unexpected(format!("expected hex quantity, got {value}")))?;
    let digits = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(digits, 16)
        .map_err(|e| RpcError::Unexpected(format!("bad quantity {s}: {e}")))
}
