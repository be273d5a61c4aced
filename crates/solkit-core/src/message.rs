//! Message compilation and the message wire format.
//!
//! ```text
//! Message:
//!   num_required_sigs     u8
//!   num_readonly_signed   u8
//!   num_readonly_unsigned u8
//!   num_accounts          compact-u16
//!   account_keys          32 bytes * num_accounts
//!   recent_blockhash      32 bytes
//!   num_instructions      compact-u16
//!   instructions[]        (see below)
//!
//! Instruction:
//!   program_id_index      u8
//!   num_accounts          compact-u16
//!   account_indices       u8 * num_accounts
//!   data_len              compact-u16
//!   data                  u8 * data_len
//! ```

use log::debug;

use crate::error::{CodecError, CompileError};
use crate::instruction::{CompiledInstruction, Instruction};
use crate::pubkey::{Hash, Pubkey};
use crate::short_vec::{self, Reader, MAX_ENCODED_VALUE};

/// Account indices are one byte wide.
pub const MAX_ACCOUNTS: usize = 256;

/// The three counts that partition the account table into its tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageHeader {
    /// The first `num_required_signatures` keys must sign.
    pub num_required_signatures: u8,
    /// How many of the signing keys are read-only (they sit last among signers).
    pub num_readonly_signed_accounts: u8,
    /// How many of the non-signing keys are read-only (they sit last overall).
    pub num_readonly_unsigned_accounts: u8,
}

/// A compiled, canonical transaction message.
///
/// Immutable once built; changing instructions means compiling a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    header: MessageHeader,
    account_keys: Vec<Pubkey>,
    recent_blockhash: Hash,
    instructions: Vec<CompiledInstruction>,
}

#[derive(Debug)]
struct KeyEntry {
    pubkey: Pubkey,
    is_signer: bool,
    is_writable: bool,
}

impl KeyEntry {
    /// Tier rank: writable signers, readonly signers, writable, readonly.
    fn rank(&self) -> u8 {
        match (self.is_signer, self.is_writable) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        }
    }
}

impl Message {
    /// Compile `instructions` into a message paid for by `payer`.
    ///
    /// Duplicate keys are merged by OR-ing their flags. The payer is always
    /// a writable signer at index 0, whether or not any instruction names
    /// it. Within each tier keys keep the order they were first seen in.
    /// An empty instruction list is legal.
    pub fn compile(
        payer: Option<&Pubkey>,
        recent_blockhash: Hash,
        instructions: &[Instruction],
    ) -> Result<Self, CompileError> {
        let payer = payer.ok_or(CompileError::MissingFeePayer)?;

        let mut entries: Vec<KeyEntry> = Vec::new();
        let mut upsert = |pubkey: Pubkey, signer: bool, writable: bool| {
            if let Some(entry) = entries.iter_mut().find(|e| e.pubkey == pubkey) {
                entry.is_signer |= signer;
                entry.is_writable |= writable;
            } else {
                entries.push(KeyEntry {
                    pubkey,
                    is_signer: signer,
                    is_writable: writable,
                });
            }
        };

        upsert(*payer, true, true);
        for (index, ix) in instructions.iter().enumerate() {
            if ix.data.len() > MAX_ENCODED_VALUE {
                return Err(CompileError::DataTooLarge {
                    index,
                    len: ix.data.len(),
                });
            }
            for meta in &ix.accounts {
                upsert(meta.pubkey, meta.is_signer, meta.is_writable);
            }
            upsert(ix.program_id, false, false);
        }

        if entries.len() > MAX_ACCOUNTS {
            return Err(CompileError::TooManyAccounts {
                count: entries.len(),
            });
        }

        // Stable sort: first-seen order survives within a tier, and the payer
        // was seen first in the top tier.
        entries.sort_by_key(KeyEntry::rank);

        let count_u8 = |n: usize| {
            u8::try_from(n).map_err(|_| CompileError::TooManyAccounts {
                count: entries.len(),
            })
        };
        let header = MessageHeader {
            num_required_signatures: count_u8(entries.iter().filter(|e| e.is_signer).count())?,
            num_readonly_signed_accounts: count_u8(
                entries.iter().filter(|e| e.rank() == 1).count(),
            )?,
            num_readonly_unsigned_accounts: count_u8(
                entries.iter().filter(|e| e.rank() == 3).count(),
            )?,
        };

        let account_keys: Vec<Pubkey> = entries.iter().map(|e| e.pubkey).collect();

        let index_of = |key: &Pubkey| -> u8 {
            // Every key was inserted above and the table holds at most 256.
            account_keys.iter().position(|k| k == key).unwrap_or_default() as u8
        };

        let compiled = instructions
            .iter()
            .map(|ix| CompiledInstruction {
                program_id_index: index_of(&ix.program_id),
                accounts: ix.accounts.iter().map(|m| index_of(&m.pubkey)).collect(),
                data: ix.data.clone(),
            })
            .collect();

        debug!(
            "compiled message: {} accounts, {} instructions, header {:?}",
            account_keys.len(),
            instructions.len(),
            header
        );

        Ok(Self {
            header,
            account_keys,
            recent_blockhash,
            instructions: compiled,
        })
    }

    pub fn header(&self) -> &MessageHeader {
        &self.header
    }

    pub fn account_keys(&self) -> &[Pubkey] {
        &self.account_keys
    }

    pub fn recent_blockhash(&self) -> &Hash {
        &self.recent_blockhash
    }

    pub fn instructions(&self) -> &[CompiledInstruction] {
        &self.instructions
    }

    /// The account paying fees, always at index 0.
    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.signer_keys().first()
    }

    /// The keys whose signatures are required, in slot order.
    pub fn signer_keys(&self) -> &[Pubkey] {
        let n = usize::from(self.header.num_required_signatures).min(self.account_keys.len());
        &self.account_keys[..n]
    }

    /// Signature slot for `pubkey`, if it is a required signer.
    pub fn signer_index(&self, pubkey: &Pubkey) -> Option<usize> {
        self.signer_keys().iter().position(|k| k == pubkey)
    }

    pub fn is_signer(&self, index: usize) -> bool {
        index < usize::from(self.header.num_required_signatures)
    }

    pub fn is_writable(&self, index: usize) -> bool {
        let num_signed = usize::from(self.header.num_required_signatures);
        let readonly_signed = usize::from(self.header.num_readonly_signed_accounts);
        let readonly_unsigned = usize::from(self.header.num_readonly_unsigned_accounts);

        if index >= self.account_keys.len() {
            return false;
        }
        if index < num_signed {
            index < num_signed.saturating_sub(readonly_signed)
        } else {
            index < self.account_keys.len().saturating_sub(readonly_unsigned)
        }
    }

    /// Encode the message; these are the bytes every signer signs.
    pub fn serialize(&self) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::with_capacity(
            3 + 3 + 32 * self.account_keys.len() + 32 + 3 + self.instructions.len() * 8,
        );

        buf.push(self.header.num_required_signatures);
        buf.push(self.header.num_readonly_signed_accounts);
        buf.push(self.header.num_readonly_unsigned_accounts);

        short_vec::encode_len(self.account_keys.len(), &mut buf)?;
        for key in &self.account_keys {
            buf.extend_from_slice(key.as_ref());
        }

        buf.extend_from_slice(self.recent_blockhash.as_ref());

        short_vec::encode_len(self.instructions.len(), &mut buf)?;
        for ix in &self.instructions {
            buf.push(ix.program_id_index);

            short_vec::encode_len(ix.accounts.len(), &mut buf)?;
            buf.extend_from_slice(&ix.accounts);

            short_vec::encode_len(ix.data.len(), &mut buf)?;
            buf.extend_from_slice(&ix.data);
        }

        Ok(buf)
    }

    /// Decode a message, rejecting any bytes left over.
    pub fn deserialize(data: &[u8]) -> Result<Self, CodecError> {
        let mut reader = Reader::new(data);
        let message = Self::read_from(&mut reader)?;
        reader.finish()?;
        Ok(message)
    }

    pub(crate) fn read_from(reader: &mut Reader<'_>) -> Result<Self, CodecError> {
        let header = MessageHeader {
            num_required_signatures: reader.read_u8()?,
            num_readonly_signed_accounts: reader.read_u8()?,
            num_readonly_unsigned_accounts: reader.read_u8()?,
        };

        let num_keys = reader.read_len()?;
        if num_keys > MAX_ACCOUNTS {
            return Err(CodecError::Malformed(format!(
                "{num_keys} account keys, maximum is {MAX_ACCOUNTS}"
            )));
        }
        let mut account_keys = Vec::with_capacity(num_keys);
        for _ in 0..num_keys {
            let key = Pubkey::new_from_array(reader.read_array()?);
            if account_keys.contains(&key) {
                return Err(CodecError::Malformed(format!("duplicate account key {key}")));
            }
            account_keys.push(key);
        }

        let recent_blockhash = Hash::new_from_array(reader.read_array()?);

        let num_instructions = reader.read_len()?;
        let mut instructions = Vec::with_capacity(num_instructions.min(reader.remaining()));
        for _ in 0..num_instructions {
            let program_id_index = reader.read_u8()?;
            let num_accounts = reader.read_len()?;
            let accounts = reader.read_bytes(num_accounts)?.to_vec();
            let data_len = reader.read_len()?;
            let data = reader.read_bytes(data_len)?.to_vec();
            instructions.push(CompiledInstruction {
                program_id_index,
                accounts,
                data,
            });
        }

        let message = Self {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        };
        message.sanitize()?;
        Ok(message)
    }

    /// Structural checks a decoded message must pass.
    fn sanitize(&self) -> Result<(), CodecError> {
        let num_keys = self.account_keys.len();
        let num_signed = usize::from(self.header.num_required_signatures);
        let readonly_signed = usize::from(self.header.num_readonly_signed_accounts);
        let readonly_unsigned = usize::from(self.header.num_readonly_unsigned_accounts);

        if num_signed == 0 {
            return Err(CodecError::Malformed("message has no fee payer".into()));
        }
        if readonly_signed >= num_signed {
            return Err(CodecError::Malformed(
                "fee payer slot is marked read-only".into(),
            ));
        }
        if num_signed + readonly_unsigned > num_keys {
            return Err(CodecError::Malformed(format!(
                "header claims {} accounts but table has {num_keys}",
                num_signed + readonly_unsigned
            )));
        }

        for (i, ix) in self.instructions.iter().enumerate() {
            let out_of_range = std::iter::once(&ix.program_id_index)
                .chain(&ix.accounts)
                .find(|&&idx| usize::from(idx) >= num_keys);
            if let Some(idx) = out_of_range {
                return Err(CodecError::Malformed(format!(
                    "instruction {i} references account {idx}, table has {num_keys}"
                )));
            }
        }

        Ok(())
    }
}
