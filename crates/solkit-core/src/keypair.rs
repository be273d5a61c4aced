//! Ed25519 keypairs and signatures.
//!
//! Secret material lives only inside `ed25519_dalek::SigningKey`, which wipes
//! itself on drop. Seed bytes handed to the constructors are copied into a
//! `Zeroizing` buffer and cleared as soon as the signing key exists.

use std::fmt;
use std::str::FromStr;

use ed25519_dalek::{Signer as _, SigningKey, VerifyingKey};
use zeroize::Zeroizing;

use crate::error::{CodecError, SigningError};
use crate::pubkey::Pubkey;

/// Number of bytes in a signature.
pub const SIGNATURE_BYTES: usize = 64;

/// Number of bytes in the `seed || pubkey` keypair encoding.
pub const KEYPAIR_BYTES: usize = 64;

/// A 64-byte Ed25519 signature. The all-zero value marks an empty slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_BYTES]);

impl Signature {
    pub const fn new_from_array(bytes: [u8; SIGNATURE_BYTES]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; SIGNATURE_BYTES] {
        self.0
    }

    /// True for an unfilled slot.
    pub fn is_default(&self) -> bool {
        self.0 == [0u8; SIGNATURE_BYTES]
    }

    /// Strictly verify this signature over `message` for `pubkey`.
    ///
    /// Returns false for keys that are not valid curve points.
    pub fn verify(&self, pubkey: &Pubkey, message: &[u8]) -> bool {
        let Ok(vk) = VerifyingKey::from_bytes(pubkey.as_array()) else {
            return false;
        };
        let sig = ed25519_dalek::Signature::from_bytes(&self.0);
        vk.verify_strict(message, &sig).is_ok()
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self([0u8; SIGNATURE_BYTES])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; SIGNATURE_BYTES]> for Signature {
    fn from(bytes: [u8; SIGNATURE_BYTES]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

impl FromStr for Signature {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| CodecError::Malformed(format!("base58 decode failed: {e}")))?;
        let arr: [u8; SIGNATURE_BYTES] = bytes.try_into().map_err(|v: Vec<u8>| {
            CodecError::Malformed(format!("expected 64 signature bytes, got {}", v.len()))
        })?;
        Ok(Self(arr))
    }
}

/// Anything that can produce signatures for one public key.
///
/// Wallets and remote keystores implement this; [`Keypair`] is the in-memory
/// implementation.
pub trait Signer {
    fn pubkey(&self) -> Pubkey;

    fn sign_message(&self, message: &[u8]) -> Signature;
}

/// An in-memory Ed25519 keypair.
pub struct Keypair(SigningKey);

impl Keypair {
    /// Generate a fresh keypair from the OS random number generator.
    pub fn generate() -> Self {
        Self(SigningKey::generate(&mut rand::rngs::OsRng))
    }

    /// Build a keypair from a 32-byte Ed25519 seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let seed = Zeroizing::new(*seed);
        Self(SigningKey::from_bytes(&seed))
    }

    /// Build a keypair from the 64-byte `seed || pubkey` encoding.
    ///
    /// The trailing public key must match the one derived from the seed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigningError> {
        if bytes.len() != KEYPAIR_BYTES {
            return Err(SigningError::InvalidKeypair(format!(
                "expected {KEYPAIR_BYTES} bytes, got {}",
                bytes.len()
            )));
        }

        let mut seed = Zeroizing::new([0u8; 32]);
        seed.copy_from_slice(&bytes[..32]);
        let keypair = Self(SigningKey::from_bytes(&seed));

        if keypair.pubkey().as_ref() != &bytes[32..] {
            return Err(SigningError::InvalidKeypair(
                "public key does not match seed".into(),
            ));
        }

        Ok(keypair)
    }

    /// Parse the Base58 text form of the 64-byte keypair encoding.
    pub fn from_base58_string(s: &str) -> Result<Self, SigningError> {
        let bytes = Zeroizing::new(
            bs58::decode(s)
                .into_vec()
                .map_err(|e| SigningError::InvalidKeypair(format!("base58 decode failed: {e}")))?,
        );
        Self::from_bytes(&bytes)
    }

    /// The 64-byte `seed || pubkey` encoding, wiped when dropped.
    pub fn to_bytes(&self) -> Zeroizing<[u8; KEYPAIR_BYTES]> {
        Zeroizing::new(self.0.to_keypair_bytes())
    }
}

impl Signer for Keypair {
    fn pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.0.verifying_key().to_bytes())
    }

    fn sign_message(&self, message: &[u8]) -> Signature {
        Signature(self.0.sign(message).to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Keypair").field(&self.pubkey()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_keypair_is_deterministic() {
        let a = Keypair::from_seed(&[0x42; 32]);
        let b = Keypair::from_seed(&[0x42; 32]);
        assert_eq!(a.pubkey(), b.pubkey());
        assert_eq!(a.sign_message(b"msg"), b.sign_message(b"msg"));
    }

    #[test]
    fn pubkey_is_on_curve() {
        assert!(Keypair::generate().pubkey().is_on_curve());
    }

    #[test]
    fn signature_verifies_for_signer_only() {
        let kp = Keypair::from_seed(&[1; 32]);
        let other = Keypair::from_seed(&[2; 32]);
        let sig = kp.sign_message(b"hello");
        assert!(sig.verify(&kp.pubkey(), b"hello"));
        assert!(!sig.verify(&kp.pubkey(), b"hellp"));
        assert!(!sig.verify(&other.pubkey(), b"hello"));
    }

    #[test]
    fn default_signature_is_empty_and_invalid() {
        let kp = Keypair::from_seed(&[3; 32]);
        let sig = Signature::default();
        assert!(sig.is_default());
        assert!(!sig.verify(&kp.pubkey(), b"x"));
    }

    #[test]
    fn verify_against_off_curve_key_is_false() {
        let sig = Keypair::from_seed(&[4; 32]).sign_message(b"x");
        assert!(!sig.verify(&Pubkey::from([0x02; 32]), b"x"));
    }

    #[test]
    fn keypair_bytes_roundtrip() {
        let kp = Keypair::generate();
        let bytes = kp.to_bytes();
        let restored = Keypair::from_bytes(&bytes[..]).unwrap();
        assert_eq!(restored.pubkey(), kp.pubkey());
    }

    #[test]
    fn keypair_base58_roundtrip() {
        let kp = Keypair::from_seed(&[9; 32]);
        let text = bs58::encode(&kp.to_bytes()[..]).into_string();
        let restored = Keypair::from_base58_string(&text).unwrap();
        assert_eq!(restored.pubkey(), kp.pubkey());
    }

    #[test]
    fn keypair_bytes_with_wrong_pubkey_rejected() {
        let mut bytes = *Keypair::from_seed(&[5; 32]).to_bytes();
        bytes[63] ^= 0xff;
        assert!(Keypair::from_bytes(&bytes).is_err());
    }

    #[test]
    fn keypair_bytes_wrong_length_rejected() {
        let err = Keypair::from_bytes(&[0u8; 32]).unwrap_err();
        assert!(err.to_string().contains("expected 64 bytes"));
    }

    #[test]
    fn debug_does_not_leak_seed() {
        let kp = Keypair::from_seed(&[0xAB; 32]);
        let debug = format!("{kp:?}");
        assert!(debug.contains(&kp.pubkey().to_string()));
        assert!(!debug.contains("171, 171"));
    }

    #[test]
    fn signature_text_roundtrip() {
        let sig = Keypair::from_seed(&[6; 32]).sign_message(b"x");
        let parsed: Signature = sig.to_string().parse().unwrap();
        assert_eq!(parsed, sig);
    }
}
