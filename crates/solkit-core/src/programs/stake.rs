//! Stake Program instructions.

use crate::instruction::{AccountMeta, Instruction};
use crate::programs::sysvar;
use crate::pubkey::Pubkey;

/// Stake Program ID: `Stake11111111111111111111111111111111111111`
pub const ID: Pubkey = Pubkey::new_from_array([
    0x06, 0xa1, 0xd8, 0x17, 0x91, 0x37, 0x54, 0x2a, 0x98, 0x34, 0x37, 0xbd, 0xfe, 0x2a, 0x7a,
    0xb2, 0x55, 0x7f, 0x53, 0x5c, 0x8a, 0x78, 0x72, 0x2b, 0x68, 0xa4, 0x9d, 0xc0, 0x00, 0x00,
    0x00, 0x00,
]);

const DEACTIVATE: u32 = 5;

/// Deactivate a delegated stake account; `authority` is the stake authority.
pub fn deactivate(stake: &Pubkey, authority: &Pubkey) -> Instruction {
    Instruction {
        program_id: ID,
        accounts: vec![
            AccountMeta::new(*stake, false),
            AccountMeta::new_readonly(sysvar::CLOCK, false),
            AccountMeta::new_readonly(*authority, true),
        ],
        data: DEACTIVATE.to_le_bytes().to_vec(),
    }
}
