//! Bubblegum (compressed NFT) asset ids.

use crate::error::AddressError;
use crate::pda;
use crate::pubkey::Pubkey;

/// Bubblegum Program ID: `BGUMAp9Gq7iTEuizy4pqaxsTyUCBK68MDfK752saRPUY`
pub const ID: Pubkey = Pubkey::new_from_array([
    0x98, 0x8b, 0x80, 0xeb, 0x79, 0x35, 0x28, 0x69, 0xb2, 0x24, 0x74, 0x5f, 0x59, 0xdd, 0xbf,
    0x8a, 0x26, 0x58, 0xca, 0x13, 0xdc, 0x68, 0x81, 0x21, 0x26, 0x35, 0x1c, 0xae, 0x07, 0xc1,
    0xa5, 0xa5,
]);

const ASSET_PREFIX: &[u8] = b"asset";

/// Asset id of the leaf at `leaf_index` in merkle `tree`.
///
/// Seeds: `["asset", tree, leaf_index as u64 LE]`.
pub fn leaf_asset_id(tree: &Pubkey, leaf_index: u64) -> Result<Pubkey, AddressError> {
    let index = leaf_index.to_le_bytes();
    pda::find_program_address(&[ASSET_PREFIX, tree.as_ref(), &index], &ID).map(|(key, _)| key)
}
