//! Text encodings of wire-format transactions.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use solkit_core::{CodecError, Transaction};

use crate::error::RpcTypesError;

/// How binary payloads are rendered as JSON strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionEncoding {
    Base58,
    #[default]
    Base64,
}

impl TransactionEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base58 => "base58",
            Self::Base64 => "base64",
        }
    }

    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Self::Base58 => bs58::encode(bytes).into_string(),
            Self::Base64 => STANDARD.encode(bytes),
        }
    }

    pub fn decode(&self, text: &str) -> Result<Vec<u8>, RpcTypesError> {
        match self {
            Self::Base58 => bs58::decode(text).into_vec().map_err(|e| {
                RpcTypesError::Codec(CodecError::Malformed(format!("base58 decode failed: {e}")))
            }),
            Self::Base64 => Ok(STANDARD.decode(text)?),
        }
    }
}

impl std::str::FromStr for TransactionEncoding {
    type Err = RpcTypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base58" => Ok(Self::Base58),
            "base64" => Ok(Self::Base64),
            other => Err(RpcTypesError::UnsupportedEncoding(other.to_string())),
        }
    }
}

/// Serialize a transaction into the text form `sendTransaction` accepts.
pub fn encode_transaction(
    tx: &Transaction,
    encoding: TransactionEncoding,
) -> Result<String, RpcTypesError> {
    Ok(encoding.encode(&tx.serialize()?))
}

/// Parse a transaction from its text form.
pub fn decode_transaction(
    text: &str,
    encoding: TransactionEncoding,
) -> Result<Transaction, RpcTypesError> {
    let bytes = encoding.decode(text)?;
    Ok(Transaction::deserialize(&bytes)?)
}

/// Decode the `[text, encoding]` pairs the node uses for account and
/// return data.
pub(crate) fn decode_data_pair(value: &[String]) -> Result<Vec<u8>, RpcTypesError> {
    match value {
        [text, encoding] => encoding.parse::<TransactionEncoding>()?.decode(text),
        _ => Err(RpcTypesError::MalformedPayload(format!(
            "expected [data, encoding], got {} elements",
            value.len()
        ))),
    }
}
