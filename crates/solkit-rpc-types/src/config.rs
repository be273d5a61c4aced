//! Request configuration for the JSON-RPC collaborator.
//!
//! These are plain values: nothing here opens a connection or holds state.
//! Each config renders the `params` array of its JSON-RPC call.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use solkit_core::Transaction;

use crate::encoding::{encode_transaction, TransactionEncoding};
use crate::error::RpcTypesError;

/// How finalized a block must be before the node reports on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    #[default]
    Finalized,
}

/// Public clusters and their canonical JSON-RPC endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    MainnetBeta,
    Devnet,
    Testnet,
    Localnet,
}

impl Cluster {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
            Self::Localnet => "http://localhost:8899",
        }
    }
}

/// Options for `simulateTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulateTransactionConfig {
    pub sig_verify: bool,
    pub commitment: Option<Commitment>,
    pub replace_recent_blockhash: bool,
    /// Accounts whose post-simulation state should be returned.
    pub addresses: Vec<String>,
    pub inner_instructions: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RpcSimulateTransactionConfig<'a> {
    encoding: TransactionEncoding,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    sig_verify: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    commitment: Option<Commitment>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    replace_recent_blockhash: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    accounts: Option<RpcAccountsConfig<'a>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    inner_instructions: bool,
}

#[derive(Serialize)]
struct RpcAccountsConfig<'a> {
    encoding: TransactionEncoding,
    addresses: &'a [String],
}

impl SimulateTransactionConfig {
    /// `[<base64 tx>, {config}]`
    pub fn to_rpc_params(&self, tx: &Transaction) -> Result<Value, RpcTypesError> {
        let encoding = TransactionEncoding::Base64;
        let accounts = (!self.addresses.is_empty()).then_some(RpcAccountsConfig {
            encoding,
            addresses: &self.addresses,
        });
        let config = RpcSimulateTransactionConfig {
            encoding,
            sig_verify: self.sig_verify,
            commitment: self.commitment,
            replace_recent_blockhash: self.replace_recent_blockhash,
            accounts,
            inner_instructions: self.inner_instructions,
        };
        Ok(json!([encode_transaction(tx, encoding)?, config]))
    }
}

/// Options for `sendTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendTransactionConfig {
    pub skip_preflight: bool,
    pub preflight_commitment: Option<Commitment>,
    pub max_retries: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RpcSendTransactionConfig {
    encoding: TransactionEncoding,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    skip_preflight: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    preflight_commitment: Option<Commitment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_retries: Option<usize>,
}

impl SendTransactionConfig {
    /// `[<base64 tx>, {config}]`
    ///
    /// Refuses transactions that are not fully signed; the node would reject
    /// them anyway and there is no reason to put them on the wire.
    pub fn to_rpc_params(&self, tx: &Transaction) -> Result<Value, RpcTypesError> {
        if !tx.verify() {
            let missing: Vec<String> = tx.missing_signers().iter().map(|k| k.to_string()).collect();
            return Err(RpcTypesError::MalformedPayload(format!(
                "transaction is not fully signed (missing: [{}])",
                missing.join(", ")
            )));
        }

        let encoding = TransactionEncoding::Base64;
        let config = RpcSendTransactionConfig {
            encoding,
            skip_preflight: self.skip_preflight,
            preflight_commitment: self.preflight_commitment,
            max_retries: self.max_retries,
        };
        Ok(json!([encode_transaction(tx, encoding)?, config]))
    }
}
