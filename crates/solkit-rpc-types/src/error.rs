use solkit_core::{AddressError, CodecError};
use thiserror::Error;

/// Errors converting between wire values and JSON-RPC payloads.
#[derive(Debug, Error)]
pub enum RpcTypesError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("wire format error: {0}")]
    Codec(#[from] CodecError),

    #[error("address error: {0}")]
    Address(#[from] AddressError),

    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
}
