//! Instructions as produced by program-specific builders.

use crate::pubkey::Pubkey;

/// A single account reference in an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account reference.
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account reference.
    pub fn new_readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// An instruction before compilation.
///
/// The order of `accounts` is meaningful to the target program and is
/// preserved verbatim in the compiled indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Pubkey,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn new_with_bytes(program_id: Pubkey, data: &[u8], accounts: Vec<AccountMeta>) -> Self {
        Self {
            program_id,
            accounts,
            data: data.to_vec(),
        }
    }
}

/// An instruction whose keys have been replaced by indices into the
/// message's account table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    /// Index of the program to invoke.
    pub program_id_index: u8,
    /// Indices of each referenced account, in instruction order.
    pub accounts: Vec<u8>,
    /// Opaque instruction data.
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_meta_constructors_set_flags() {
        let key = Pubkey::from([1u8; 32]);

        let writable = AccountMeta::new(key, true);
        assert!(writable.is_signer);
        assert!(writable.is_writable);

        let readonly = AccountMeta::new_readonly(key, false);
        assert!(!readonly.is_signer);
        assert!(!readonly.is_writable);
    }

    #[test]
    fn new_with_bytes_copies_data() {
        let data = [1u8, 2, 3];
        let ix = Instruction::new_with_bytes(Pubkey::default(), &data, vec![]);
        assert_eq!(ix.data, data);
        assert!(ix.accounts.is_empty());
    }
}
