//! Token Metadata account addresses.

use crate::error::AddressError;
use crate::pda;
use crate::pubkey::Pubkey;

/// Token Metadata Program ID: `metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s`
pub const ID: Pubkey = Pubkey::new_from_array([
    0x0b, 0x70, 0x65, 0xb1, 0xe3, 0xd1, 0x7c, 0x45, 0x38, 0x9d, 0x52, 0x7f, 0x6b, 0x04, 0xc3,
    0xcd, 0x58, 0xb8, 0x6c, 0x73, 0x1a, 0xa0, 0xfd, 0xb5, 0x49, 0xb6, 0xd1, 0xbc, 0x03, 0xf8,
    0x29, 0x46,
]);

const PREFIX: &[u8] = b"metadata";
const EDITION: &[u8] = b"edition";

/// Metadata account for `mint`: seeds `["metadata", program_id, mint]`.
pub fn metadata_address(mint: &Pubkey) -> Result<Pubkey, AddressError> {
    pda::find_program_address(&[PREFIX, ID.as_ref(), mint.as_ref()], &ID).map(|(key, _)| key)
}

/// Master edition account for `mint`: seeds `["metadata", program_id, mint, "edition"]`.
pub fn master_edition_address(mint: &Pubkey) -> Result<Pubkey, AddressError> {
    pda::find_program_address(&[PREFIX, ID.as_ref(), mint.as_ref(), EDITION], &ID)
        .map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_id_roundtrip() {
        assert_eq!(ID.to_string(), "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
    }

    #[test]
    fn metadata_and_edition_differ() {
        let mint = Pubkey::from([0x42; 32]);
        let metadata = metadata_address(&mint).unwrap();
        let edition = master_edition_address(&mint).unwrap();
        assert_ne!(metadata, edition);
        assert!(!metadata.is_on_curve());
        assert!(!edition.is_on_curve());
    }
}
