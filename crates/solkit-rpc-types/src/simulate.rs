//! `simulateTransaction` results.
//!
//! The node's JSON is first read into the `Rpc*` mirror structs, then
//! converted into typed values: addresses become [`Pubkey`], encoded data
//! becomes bytes. Any decode failure aborts the whole conversion.

use log::debug;
use serde::Deserialize;
use serde_json::Value;
use solkit_core::{CodecError, Pubkey};

use crate::encoding::decode_data_pair;
use crate::error::RpcTypesError;
use crate::response::ValueWithContext;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcSimulateTransactionValue {
    #[serde(default)]
    pub err: Option<Value>,
    #[serde(default)]
    pub logs: Option<Vec<String>>,
    #[serde(default)]
    pub accounts: Option<Vec<Option<RpcAccountInfo>>>,
    #[serde(default)]
    pub return_data: Option<RpcReturnData>,
    #[serde(default)]
    pub units_consumed: Option<u64>,
    #[serde(default)]
    pub inner_instructions: Option<Vec<RpcInnerInstructions>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcAccountInfo {
    pub lamports: u64,
    pub owner: String,
    #[serde(default)]
    pub rent_epoch: u64,
    /// `[text, encoding]`
    pub data: Vec<String>,
    pub executable: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReturnData {
    pub program_id: String,
    /// `[text, "base64"]`
    pub data: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcInnerInstructions {
    pub index: u64,
    pub instructions: Vec<RpcInstruction>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcInstruction {
    #[serde(default)]
    pub parsed: Option<Value>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub accounts: Option<Vec<String>>,
    #[serde(default)]
    pub data: Option<String>,
    pub program_id: String,
    #[serde(default)]
    pub stack_height: Option<u32>,
}

// ─── Converted types ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub lamports: u64,
    pub owner: Pubkey,
    pub rent_epoch: u64,
    pub data: Vec<u8>,
    pub executable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnData {
    pub program_id: Pubkey,
    pub data: Vec<u8>,
}

/// What an inner instruction carries.
///
/// The node renders an instruction as `jsonParsed` when it knows the
/// program, and as raw accounts plus base-58 data otherwise. The variant
/// follows from whether the `parsed` field is present.
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionPayload {
    Parsed { program: String, parsed: Value },
    Raw { accounts: Vec<Pubkey>, data: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InnerInstruction {
    pub program_id: Pubkey,
    pub stack_height: Option<u32>,
    pub payload: InstructionPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InnerInstructions {
    /// Index of the top-level instruction these were invoked from.
    pub index: u64,
    pub instructions: Vec<InnerInstruction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulateTransactionResult {
    /// The transaction error as reported by the node, `None` on success.
    pub err: Option<Value>,
    pub logs: Option<Vec<String>>,
    /// One entry per requested address; `None` where the account does not exist.
    pub accounts: Option<Vec<Option<AccountInfo>>>,
    pub return_data: Option<ReturnData>,
    pub units_consumed: Option<u64>,
    pub inner_instructions: Option<Vec<InnerInstructions>>,
}

impl SimulateTransactionResult {
    pub fn is_success(&self) -> bool {
        self.err.is_none()
    }

    /// Parse the `result` object of a `simulateTransaction` response.
    pub fn from_rpc_value(value: Value) -> Result<ValueWithContext<Self>, RpcTypesError> {
        let raw: ValueWithContext<RpcSimulateTransactionValue> = serde_json::from_value(value)?;
        Ok(ValueWithContext {
            context: raw.context,
            value: raw.value.try_into()?,
        })
    }
}

impl TryFrom<RpcAccountInfo> for AccountInfo {
    type Error = RpcTypesError;

    fn try_from(raw: RpcAccountInfo) -> Result<Self, Self::Error> {
        Ok(Self {
            lamports: raw.lamports,
            owner: raw.owner.parse()?,
            rent_epoch: raw.rent_epoch,
            data: decode_data_pair(&raw.data)?,
            executable: raw.executable,
        })
    }
}

impl TryFrom<RpcReturnData> for ReturnData {
    type Error = RpcTypesError;

    fn try_from(raw: RpcReturnData) -> Result<Self, Self::Error> {
        Ok(Self {
            program_id: raw.program_id.parse()?,
            data: decode_data_pair(&raw.data)?,
        })
    }
}

impl TryFrom<RpcInstruction> for InnerInstruction {
    type Error = RpcTypesError;

    fn try_from(raw: RpcInstruction) -> Result<Self, Self::Error> {
        let program_id: Pubkey = raw.program_id.parse()?;

        let payload = match raw.parsed {
            Some(parsed) => InstructionPayload::Parsed {
                program: raw.program.unwrap_or_default(),
                parsed,
            },
            None => {
                let accounts = raw
                    .accounts
                    .unwrap_or_default()
                    .iter()
                    .map(|key| key.parse::<Pubkey>())
                    .collect::<Result<Vec<_>, _>>()?;
                let data = match raw.data.as_deref() {
                    None | Some("") => Vec::new(),
                    Some(text) => bs58::decode(text).into_vec().map_err(|e| {
                        CodecError::Malformed(format!(
                            "instruction data for {program_id} is not base58: {e}"
                        ))
                    })?,
                };
                InstructionPayload::Raw { accounts, data }
            }
        };

        Ok(Self {
            program_id,
            stack_height: raw.stack_height,
            payload,
        })
    }
}

impl TryFrom<RpcInnerInstructions> for InnerInstructions {
    type Error = RpcTypesError;

    fn try_from(raw: RpcInnerInstructions) -> Result<Self, Self::Error> {
        let instructions = raw
            .instructions
            .into_iter()
            .map(InnerInstruction::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            index: raw.index,
            instructions,
        })
    }
}

impl TryFrom<RpcSimulateTransactionValue> for SimulateTransactionResult {
    type Error = RpcTypesError;

    fn try_from(raw: RpcSimulateTransactionValue) -> Result<Self, Self::Error> {
        let accounts = raw
            .accounts
            .map(|accounts| {
                accounts
                    .into_iter()
                    .map(|account| account.map(AccountInfo::try_from).transpose())
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let return_data = raw.return_data.map(ReturnData::try_from).transpose()?;

        let inner_instructions = raw
            .inner_instructions
            .map(|groups| {
                groups
                    .into_iter()
                    .map(InnerInstructions::try_from)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        debug!(
            "simulation: err={:?} units={:?} inner groups={}",
            raw.err,
            raw.units_consumed,
            inner_instructions.as_ref().map_or(0, Vec::len)
        );

        Ok(Self {
            err: raw.err,
            logs: raw.logs,
            accounts,
            return_data,
            units_consumed: raw.units_consumed,
            inner_instructions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use solkit_core::programs::{spl_token, system};

    fn raw_instruction(value: Value) -> RpcInstruction {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parsed_field_selects_parsed_variant() {
        let ix = raw_instruction(json!({
            "parsed": { "type": "transfer", "info": { "lamports": 5000 } },
            "program": "system",
            "programId": "11111111111111111111111111111111",
            "stackHeight": 2
        }));
        let converted = InnerInstruction::try_from(ix).unwrap();
        assert_eq!(converted.program_id, system::ID);
        assert_eq!(converted.stack_height, Some(2));
        match converted.payload {
            InstructionPayload::Parsed { program, parsed } => {
                assert_eq!(program, "system");
                assert_eq!(parsed["info"]["lamports"], 5000);
            }
            other => panic!("expected parsed payload, got {other:?}"),
        }
    }

    #[test]
    fn string_parsed_value_is_still_parsed() {
        let ix = raw_instruction(json!({
            "parsed": "hello",
            "program": "spl-memo",
            "programId": "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr",
        }));
        let converted = InnerInstruction::try_from(ix).unwrap();
        assert!(matches!(
            converted.payload,
            InstructionPayload::Parsed { ref parsed, .. } if parsed == "hello"
        ));
    }

    #[test]
    fn missing_parsed_field_selects_raw_variant() {
        let data = bs58::encode([3u8, 1, 0, 0, 0, 0, 0, 0, 0]).into_string();
        let ix = raw_instruction(json!({
            "accounts": [
                "11111111111111111111111111111111",
                "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
            ],
            "data": data,
            "programId": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
            "stackHeight": null
        }));
        let converted = InnerInstruction::try_from(ix).unwrap();
        assert_eq!(converted.program_id, spl_token::ID);
        assert_eq!(converted.stack_height, None);
        assert_eq!(
            converted.payload,
            InstructionPayload::Raw {
                accounts: vec![system::ID, spl_token::ID],
                data: vec![3, 1, 0, 0, 0, 0, 0, 0, 0],
            }
        );
    }

    #[test]
    fn bad_raw_data_is_an_error() {
        let ix = raw_instruction(json!({
            "accounts": [],
            "data": "0OIl",
            "programId": "11111111111111111111111111111111",
        }));
        assert!(matches!(
            InnerInstruction::try_from(ix),
            Err(RpcTypesError::Codec(CodecError::Malformed(_)))
        ));
    }

    #[test]
    fn bad_account_key_is_an_error() {
        let ix = raw_instruction(json!({
            "accounts": ["not-a-key"],
            "data": "",
            "programId": "11111111111111111111111111111111",
        }));
        assert!(matches!(
            InnerInstruction::try_from(ix),
            Err(RpcTypesError::Address(_))
        ));
    }

    #[test]
    fn wide_top_level_index_is_accepted() {
        let raw: RpcInnerInstructions = serde_json::from_value(json!({
            "index": 300,
            "instructions": []
        }))
        .unwrap();
        let converted = InnerInstructions::try_from(raw).unwrap();
        assert_eq!(converted.index, 300);
        assert!(converted.instructions.is_empty());
    }

    #[test]
    fn return_data_is_base64_decoded() {
        let raw: RpcReturnData = serde_json::from_value(json!({
            "programId": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
            "data": ["AQID", "base64"]
        }))
        .unwrap();
        let converted = ReturnData::try_from(raw).unwrap();
        assert_eq!(converted.program_id, spl_token::ID);
        assert_eq!(converted.data, vec![1, 2, 3]);
    }

    #[test]
    fn missing_accounts_stay_none() {
        let raw: RpcSimulateTransactionValue = serde_json::from_value(json!({
            "err": null,
            "accounts": [null, {
                "lamports": 10,
                "owner": "11111111111111111111111111111111",
                "rentEpoch": 0,
                "data": ["", "base64"],
                "executable": false
            }]
        }))
        .unwrap();
        let result = SimulateTransactionResult::try_from(raw).unwrap();
        assert!(result.is_success());
        assert_eq!(result.inner_instructions, None);
        let accounts = result.accounts.as_ref().unwrap();
        assert_eq!(accounts.len(), 2);
        assert!(accounts[0].is_none());
        assert_eq!(accounts[1].as_ref().unwrap().lamports, 10);
    }
}
