//! Program-derived addresses.
//!
//! A PDA is `SHA-256(seed_0 || ... || seed_n || program_id || "ProgramDerivedAddress")`
//! with the requirement that the digest is NOT a valid Ed25519 point, so no
//! private key can ever sign for it. [`find_program_address`] appends a
//! one-byte bump seed and walks it from 255 down to 0 until the digest falls
//! off the curve.

use log::{debug, trace};
use sha2::{Digest, Sha256};

use crate::error::AddressError;
use crate::pubkey::{bytes_are_curve_point, Pubkey};

/// Maximum length of a single seed.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of seeds, counting the bump seed when there is one.
pub const MAX_SEEDS: usize = 16;

/// Domain separator appended after the program id.
const PDA_MARKER: &[u8; 21] = b"ProgramDerivedAddress";

/// Derive the address for `seeds` exactly as given.
///
/// Used to re-derive a PDA whose bump is already known, in which case the
/// bump is the last element of `seeds`. Fails with
/// [`AddressError::InvalidSeeds`] if the digest lands on the curve.
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<Pubkey, AddressError> {
    validate_seeds(seeds, MAX_SEEDS)?;

    let hash = hash_seeds(seeds, None, program_id);
    if bytes_are_curve_point(&hash) {
        return Err(AddressError::InvalidSeeds);
    }

    Ok(Pubkey::new_from_array(hash))
}

/// Find the canonical (highest-bump) PDA for `seeds` under `program_id`.
///
/// The bump occupies one seed slot, so at most `MAX_SEEDS - 1` caller seeds
/// are accepted. Seeds are validated before any hashing happens.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), AddressError> {
    validate_seeds(seeds, MAX_SEEDS - 1)?;

    for bump in (0..=u8::MAX).rev() {
        let hash = hash_seeds(seeds, Some(bump), program_id);
        if bytes_are_curve_point(&hash) {
            trace!("bump {bump} lands on curve for program {program_id}");
            continue;
        }

        let address = Pubkey::new_from_array(hash);
        debug!("derived {address} with bump {bump} for program {program_id}");
        return Ok((address, bump));
    }

    Err(AddressError::BumpExhausted)
}

/// A derived address together with everything needed to re-derive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramDerivedAddress {
    seeds: Vec<Vec<u8>>,
    program_id: Pubkey,
    bump: u8,
    address: Pubkey,
}

impl ProgramDerivedAddress {
    /// Run the bump search and keep the seeds alongside the result.
    pub fn find(seeds: &[&[u8]], program_id: &Pubkey) -> Result<Self, AddressError> {
        let (address, bump) = find_program_address(seeds, program_id)?;
        Ok(Self {
            seeds: seeds.iter().map(|s| s.to_vec()).collect(),
            program_id: *program_id,
            bump,
            address,
        })
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn bump(&self) -> u8 {
        self.bump
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn seeds(&self) -> &[Vec<u8>] {
        &self.seeds
    }

    /// Re-derive the address from the stored seeds and bump.
    pub fn verify(&self) -> Result<bool, AddressError> {
        let bump = [self.bump];
        let mut seeds: Vec<&[u8]> = self.seeds.iter().map(Vec::as_slice).collect();
        seeds.push(&bump);
        Ok(create_program_address(&seeds, &self.program_id)? == self.address)
    }
}

fn validate_seeds(seeds: &[&[u8]], max: usize) -> Result<(), AddressError> {
    if seeds.len() > max {
        return Err(AddressError::TooManySeeds {
            count: seeds.len(),
            max,
        });
    }

    if let Some((index, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(AddressError::SeedTooLong {
            index,
            len: seed.len(),
        });
    }

    Ok(())
}

fn hash_seeds(seeds: &[&[u8]], bump: Option<u8>, program_id: &Pubkey) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    if let Some(bump) = bump {
        hasher.update([bump]);
    }
    hasher.update(program_id);
    hasher.update(PDA_MARKER);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> Pubkey {
        "BGUMAp9Gq7iTEuizy4pqaxsTyUCBK68MDfK752saRPUY".parse().unwrap()
    }

    #[test]
    fn find_is_deterministic() {
        let seeds: &[&[u8]] = &[b"vault", &[0x11; 32]];
        let first = find_program_address(seeds, &program()).unwrap();
        let _other = find_program_address(&[b"unrelated"], &program()).unwrap();
        let second = find_program_address(seeds, &program()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn found_address_is_off_curve() {
        for i in 0u8..32 {
            let (address, _) = find_program_address(&[b"seed", &[i]], &program()).unwrap();
            assert!(!address.is_on_curve(), "seed byte {i} produced an on-curve PDA");
        }
    }

    #[test]
    fn bump_rederives_same_address() {
        let mint = [0x42u8; 32];
        let (address, bump) = find_program_address(&[b"metadata", &mint], &program()).unwrap();
        let recreated = create_program_address(&[b"metadata", &mint, &[bump]], &program()).unwrap();
        assert_eq!(recreated, address);
    }

    #[test]
    fn different_programs_give_different_addresses() {
        let a = find_program_address(&[b"x"], &program()).unwrap().0;
        let b = find_program_address(&[b"x"], &Pubkey::default()).unwrap().0;
        assert_ne!(a, b);
    }

    #[test]
    fn empty_seed_list_is_allowed() {
        let (address, _) = find_program_address(&[], &program()).unwrap();
        assert!(!address.is_on_curve());
    }

    #[test]
    fn seed_of_exactly_32_bytes_is_allowed() {
        assert!(find_program_address(&[&[0u8; 32]], &program()).is_ok());
    }

    #[test]
    fn seed_too_long_is_rejected() {
        let err = find_program_address(&[b"ok", &[0u8; 33]], &program()).unwrap_err();
        assert_eq!(err, AddressError::SeedTooLong { index: 1, len: 33 });

        let err = create_program_address(&[&[0u8; 33]], &program()).unwrap_err();
        assert_eq!(err, AddressError::SeedTooLong { index: 0, len: 33 });
    }

    #[test]
    fn too_many_seeds_is_rejected() {
        let seed: &[u8] = b"s";
        let seeds = vec![seed; 17];
        assert_eq!(
            create_program_address(&seeds, &program()),
            Err(AddressError::TooManySeeds { count: 17, max: 16 })
        );
        assert_eq!(
            find_program_address(&seeds[..16], &program()),
            Err(AddressError::TooManySeeds { count: 16, max: 15 })
        );
        assert!(find_program_address(&seeds[..15], &program()).is_ok());
    }

    #[test]
    fn seed_count_is_checked_before_seed_length() {
        let long: &[u8] = &[0u8; 40];
        let seeds = vec![long; 17];
        assert!(matches!(
            create_program_address(&seeds, &program()),
            Err(AddressError::TooManySeeds { .. })
        ));
    }

    #[test]
    fn create_rejects_on_curve_result() {
        // Find a bump that lands on the curve and make sure create refuses it.
        let seeds: &[&[u8]] = &[b"on-curve-search"];
        let on_curve_bump = (0..=u8::MAX)
            .rev()
            .find(|b| bytes_are_curve_point(&hash_seeds(seeds, Some(*b), &program())))
            .expect("about half of all bumps land on the curve");
        let err = create_program_address(&[b"on-curve-search", &[on_curve_bump]], &program())
            .unwrap_err();
        assert_eq!(err, AddressError::InvalidSeeds);
    }

    #[test]
    fn program_derived_address_verifies() {
        let pda = ProgramDerivedAddress::find(&[b"asset", &[9u8; 32]], &program()).unwrap();
        assert_eq!(pda.seeds().len(), 2);
        assert_eq!(pda.program_id(), program());
        assert!(pda.verify().unwrap());
        assert_eq!(
            find_program_address(&[b"asset", &[9u8; 32]], &program()).unwrap(),
            (pda.address(), pda.bump())
        );
    }

    #[test]
    fn leaf_asset_vector() {
        let tree: Pubkey = "TrEEuqmjD6XKzRoqWzyPz8DrWFARV33hdhYKr1BCMyP".parse().unwrap();
        let leaf = 805_306u64.to_le_bytes();
        let (address, bump) =
            find_program_address(&[b"asset", tree.as_ref(), &leaf], &program()).unwrap();
        assert_eq!(address.to_string(), "3RDSyGbEbENEZAnNsgGqNzxJgsLXQf5GdNkgqhJU4193");
        assert_eq!(bump, 255);
    }
}
