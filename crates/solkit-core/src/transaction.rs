//! Transactions: a message plus one signature slot per required signer.
//!
//! ```text
//! Transaction:
//!   num_signatures          compact-u16
//!   signatures              64 bytes * num_signatures
//!   message                 (see `message`)
//! ```
//!
//! Slots start zeroed and are filled as signers sign, so several parties can
//! sign the same transaction independently. A slot is only ever filled with
//! a signature that has been checked against the message bytes.

use log::debug;

use crate::error::{CodecError, SigningError};
use crate::keypair::{Signature, Signer};
use crate::message::Message;
use crate::pubkey::Pubkey;
use crate::short_vec::{self, Reader};

/// How far along a transaction is toward being submittable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureStatus {
    Unsigned,
    PartiallySigned,
    FullySigned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    signatures: Vec<Signature>,
    message: Message,
}

impl Transaction {
    /// Wrap `message` with one empty signature slot per required signer.
    pub fn new_unsigned(message: Message) -> Self {
        let slots = message.signer_keys().len();
        Self {
            signatures: vec![Signature::default(); slots],
            message,
        }
    }

    /// Build a transaction and sign it with every required signer.
    ///
    /// Fails if `signers` contains a key the message does not need, or if
    /// any required signer is missing.
    pub fn new_signed(message: Message, signers: &[&dyn Signer]) -> Result<Self, SigningError> {
        let mut tx = Self::new_unsigned(message);
        tx.sign(signers)?;
        if let Some(missing) = tx.missing_signers().first() {
            return Err(SigningError::MissingSigner(*missing));
        }
        Ok(tx)
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// The fee payer's signature, which identifies the transaction on the ledger.
    pub fn signature(&self) -> Option<&Signature> {
        self.signatures.first()
    }

    /// The exact bytes each signer signs.
    pub fn message_data(&self) -> Result<Vec<u8>, CodecError> {
        self.message.serialize()
    }

    /// Sign with each of `signers`, filling the slot that matches its key.
    ///
    /// Slots belonging to other signers are left alone, so calling this
    /// repeatedly with disjoint signer sets accumulates signatures. A slot
    /// that already holds a valid signature is kept as is. Every signer is
    /// checked before any slot is written; on error the transaction is
    /// unchanged.
    pub fn sign(&mut self, signers: &[&dyn Signer]) -> Result<(), SigningError> {
        let mut positions = Vec::with_capacity(signers.len());
        for signer in signers {
            let pubkey = signer.pubkey();
            let index = self
                .message
                .signer_index(&pubkey)
                .ok_or(SigningError::UnknownSigner(pubkey))?;
            positions.push((index, pubkey));
        }

        let message_data = self.message_data()?;
        for ((index, pubkey), signer) in positions.into_iter().zip(signers) {
            if self.slot_is_valid(index, &pubkey, &message_data) {
                debug!("signature slot {index} already filled, keeping it");
                continue;
            }
            debug!("filled signature slot {index}");
            self.signatures[index] = signer.sign_message(&message_data);
        }

        Ok(())
    }

    /// Insert a signature produced elsewhere (e.g. a hardware wallet).
    ///
    /// The signature is verified against `pubkey` and the message bytes
    /// before it is stored. A slot that already holds a different valid
    /// signature is never replaced.
    pub fn add_signature(
        &mut self,
        pubkey: &Pubkey,
        signature: Signature,
    ) -> Result<(), SigningError> {
        let index = self
            .message
            .signer_index(pubkey)
            .ok_or(SigningError::NotARequiredSigner(*pubkey))?;

        let message_data = self.message_data()?;
        if !signature.verify(pubkey, &message_data) {
            return Err(SigningError::InvalidSignature(*pubkey));
        }
        if self.slot_is_valid(index, pubkey, &message_data) {
            if self.signatures[index] == signature {
                return Ok(());
            }
            return Err(SigningError::AlreadySigned(*pubkey));
        }

        debug!("added external signature for {pubkey} at slot {index}");
        self.signatures[index] = signature;
        Ok(())
    }

    fn slot_is_valid(&self, index: usize, pubkey: &Pubkey, message_data: &[u8]) -> bool {
        let slot = &self.signatures[index];
        !slot.is_default() && slot.verify(pubkey, message_data)
    }

    /// Per-slot verification result; empty slots report false.
    pub fn verify_with_results(&self) -> Vec<bool> {
        let Ok(message_data) = self.message_data() else {
            return vec![false; self.signatures.len()];
        };
        self.signatures
            .iter()
            .zip(self.message.signer_keys())
            .map(|(sig, key)| !sig.is_default() && sig.verify(key, &message_data))
            .collect()
    }

    /// True only when every required slot holds a valid signature.
    pub fn verify(&self) -> bool {
        self.signatures.len() == self.message.signer_keys().len()
            && self.verify_with_results().into_iter().all(|ok| ok)
    }

    pub fn is_fully_signed(&self) -> bool {
        self.verify()
    }

    pub fn signature_status(&self) -> SignatureStatus {
        if self.signatures.iter().all(Signature::is_default) {
            SignatureStatus::Unsigned
        } else if self.verify() {
            SignatureStatus::FullySigned
        } else {
            SignatureStatus::PartiallySigned
        }
    }

    /// Required signers whose slot is still empty.
    pub fn missing_signers(&self) -> Vec<Pubkey> {
        self.signatures
            .iter()
            .zip(self.message.signer_keys())
            .filter(|(sig, _)| sig.is_default())
            .map(|(_, key)| *key)
            .collect()
    }

    /// Encode the full transaction for submission.
    pub fn serialize(&self) -> Result<Vec<u8>, CodecError> {
        let message_data = self.message_data()?;
        let mut wire = Vec::with_capacity(3 + 64 * self.signatures.len() + message_data.len());

        short_vec::encode_len(self.signatures.len(), &mut wire)?;
        for sig in &self.signatures {
            wire.extend_from_slice(sig.as_ref());
        }
        wire.extend_from_slice(&message_data);

        Ok(wire)
    }

    /// Decode a wire-format transaction.
    ///
    /// The signature count must match the message header. Signatures are
    /// not verified here; use [`Transaction::verify`].
    pub fn deserialize(data: &[u8]) -> Result<Self, CodecError> {
        let mut reader = Reader::new(data);

        let num_signatures = reader.read_len()?;
        let mut signatures = Vec::with_capacity(num_signatures.min(reader.remaining() / 64));
        for _ in 0..num_signatures {
            signatures.push(Signature::new_from_array(reader.read_array()?));
        }

        let message_start = reader.position();
        let message = Message::read_from(&mut reader)?;
        reader.finish()?;

        if signatures.len() != message.signer_keys().len() {
            return Err(CodecError::Malformed(format!(
                "{} signatures for {} required signers (message at offset {message_start})",
                signatures.len(),
                message.signer_keys().len()
            )));
        }

        Ok(Self {
            signatures,
            message,
        })
    }
}
