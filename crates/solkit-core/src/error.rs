use thiserror::Error;

use crate::pubkey::Pubkey;

/// Program-derived address errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("seed {index} is {len} bytes, maximum is 32")]
    SeedTooLong { index: usize, len: usize },

    #[error("{count} seeds supplied, maximum is {max}")]
    TooManySeeds { count: usize, max: usize },

    #[error("no bump seed in 0..=255 yields an off-curve address")]
    BumpExhausted,

    #[error("seeds derive an address that lies on the ed25519 curve")]
    InvalidSeeds,

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Message compilation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("message references {count} accounts, maximum is 256")]
    TooManyAccounts { count: usize },

    #[error("no fee payer supplied")]
    MissingFeePayer,

    #[error("instruction {index} carries {len} data bytes, more than the wire format can express")]
    DataTooLarge { index: usize, len: usize },
}

/// Wire format encode/decode errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("buffer truncated at offset {offset}: needed {needed} more bytes")]
    Truncated { offset: usize, needed: usize },

    #[error("malformed data: {0}")]
    Malformed(String),

    #[error("value {0} does not fit in compact-u16")]
    ValueTooLarge(usize),

    #[error("{0} trailing bytes after decoded value")]
    TrailingBytes(usize),
}

/// Transaction signing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    #[error("keypair {0} is not a required signer of this message")]
    UnknownSigner(Pubkey),

    #[error("{0} is not a required signer of this message")]
    NotARequiredSigner(Pubkey),

    #[error("signature does not verify for {0}")]
    InvalidSignature(Pubkey),

    #[error("slot for {0} already holds a different valid signature")]
    AlreadySigned(Pubkey),

    #[error("required signer {0} was not supplied")]
    MissingSigner(Pubkey),

    #[error("invalid keypair: {0}")]
    InvalidKeypair(String),

    #[error("message encoding failed: {0}")]
    Codec(#[from] CodecError),
}

/// Any error surfaced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Signing(#[from] SigningError),
}
