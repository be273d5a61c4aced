//! Typed values at the JSON-RPC boundary.
//!
//! This crate does not talk to a node. It renders request params for
//! `simulateTransaction` / `sendTransaction` / `getAsset`, encodes signed
//! transactions as wire text, and converts node responses into
//! `solkit-core` types.

pub mod asset;
pub mod config;
pub mod encoding;
pub mod error;
pub mod response;
pub mod simulate;

pub use asset::{
    get_asset_params, Asset, AssetAuthority, AssetCompression, AssetContent, AssetCreator,
    AssetFile, AssetGrouping, AssetLinks, AssetMetadata, AssetOwnership, AssetRoyalty, AssetUses,
};
pub use config::{Cluster, Commitment, SendTransactionConfig, SimulateTransactionConfig};
pub use encoding::{decode_transaction, encode_transaction, TransactionEncoding};
pub use error::RpcTypesError;
pub use response::{
    EpochInfo, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcContext, ValueWithContext,
    VersionInfo,
};
pub use simulate::{
    AccountInfo, InnerInstruction, InnerInstructions, InstructionPayload, ReturnData,
    SimulateTransactionResult,
};
