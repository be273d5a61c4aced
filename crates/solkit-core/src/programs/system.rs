//! System Program instructions.
//!
//! Instruction data starts with the instruction index as a little-endian
//! u32, followed by the instruction's arguments.

use crate::instruction::{AccountMeta, Instruction};
use crate::programs::sysvar;
use crate::pubkey::Pubkey;

/// The System Program public key: 32 zero bytes.
/// Base58: `11111111111111111111111111111111`
pub const ID: Pubkey = Pubkey::new_from_array([0u8; 32]);

const ADVANCE_NONCE_ACCOUNT: u32 = 4;
const TRANSFER: u32 = 2;
const UPGRADE_NONCE_ACCOUNT: u32 = 12;

/// Move `lamports` from `from` (signer) to `to`.
pub fn transfer(from: &Pubkey, to: &Pubkey, lamports: u64) -> Instruction {
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&TRANSFER.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());

    Instruction {
        program_id: ID,
        accounts: vec![AccountMeta::new(*from, true), AccountMeta::new(*to, false)],
        data,
    }
}

/// Consume the stored durable nonce, replacing it with a fresh one.
///
/// Must be the first instruction of a transaction that uses the nonce as
/// its recent blockhash.
pub fn advance_nonce_account(nonce: &Pubkey, authority: &Pubkey) -> Instruction {
    Instruction {
        program_id: ID,
        accounts: vec![
            AccountMeta::new(*nonce, false),
            AccountMeta::new_readonly(sysvar::RECENT_BLOCKHASHES, false),
            AccountMeta::new_readonly(*authority, true),
        ],
        data: ADVANCE_NONCE_ACCOUNT.to_le_bytes().to_vec(),
    }
}

/// Upgrade a legacy nonce account to the current version.
pub fn upgrade_nonce_account(nonce: &Pubkey) -> Instruction {
    Instruction {
        program_id: ID,
        accounts: vec![AccountMeta::new(*nonce, false)],
        data: UPGRADE_NONCE_ACCOUNT.to_le_bytes().to_vec(),
    }
}
