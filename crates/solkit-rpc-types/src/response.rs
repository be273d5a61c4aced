//! JSON-RPC request/response envelopes and small node-info payloads.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::RpcTypesError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonRpcResponse<T> {
    pub jsonrpc: String,
    pub id: u64,
    pub result: Option<T>,
    pub error: Option<JsonRpcError>,
}

impl<T: DeserializeOwned> JsonRpcResponse<T> {
    /// Parse a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, RpcTypesError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// The result, or the node's error.
    pub fn into_result(self) -> Result<T, RpcTypesError> {
        match (self.result, self.error) {
            (_, Some(err)) => Err(RpcTypesError::Rpc {
                code: err.code,
                message: err.message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(RpcTypesError::MalformedPayload(
                "response has neither result nor error".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcContext {
    pub slot: u64,
    #[serde(default)]
    pub api_version: Option<String>,
}

/// A value reported together with the slot it was observed at.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValueWithContext<T> {
    pub context: RpcContext,
    pub value: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpochInfo {
    pub absolute_slot: u64,
    pub block_height: u64,
    pub epoch: u64,
    pub slot_index: u64,
    pub slots_in_epoch: u64,
    #[serde(default)]
    pub transaction_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VersionInfo {
    pub solana_core: String,
    #[serde(default)]
    pub feature_set: Option<u32>,
}
