//! Transaction construction and signing for the Solana ledger.
//!
//! This crate covers the part of a client SDK that must match the ledger
//! byte for byte: program-derived address derivation, message compilation,
//! the compact wire format, and Ed25519 signing. It performs no I/O; the
//! JSON-RPC boundary lives in `solkit-rpc-types`.
//!
//! The wire format is implemented by hand on top of `ed25519-dalek`,
//! `curve25519-dalek` and `sha2`, without depending on `solana-sdk`.

pub mod error;
pub mod instruction;
pub mod keypair;
pub mod message;
pub mod pda;
pub mod programs;
pub mod pubkey;
pub mod short_vec;
pub mod transaction;

// Re-export key public types for ergonomic imports.
pub use error::{AddressError, CodecError, CompileError, SdkError, SigningError};
pub use instruction::{AccountMeta, CompiledInstruction, Instruction};
pub use keypair::{Keypair, Signature, Signer};
pub use message::{Message, MessageHeader};
pub use pda::{create_program_address, find_program_address, ProgramDerivedAddress};
pub use pubkey::{Hash, Pubkey};
pub use short_vec::{decode_len, encode_compact_u16, encode_len};
pub use transaction::{SignatureStatus, Transaction};
