//! Digital Asset Standard `getAsset` results.
//!
//! Same two-step shape as `simulate`: the node's JSON lands in the `Rpc*`
//! mirrors, then addresses and hashes are parsed into [`Pubkey`] / [`Hash`].
//! Sections that hold only display text (content, uses) deserialize straight
//! into their final types.

use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};
use solkit_core::{Hash, Pubkey};

use crate::error::RpcTypesError;

/// `params` for a `getAsset` request.
pub fn get_asset_params(asset_id: &Pubkey) -> Value {
    json!([asset_id.to_string()])
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcAsset {
    pub interface: String,
    pub id: String,
    #[serde(default)]
    pub content: Option<AssetContent>,
    #[serde(default)]
    pub authorities: Vec<RpcAssetAuthority>,
    #[serde(default)]
    pub compression: Option<RpcAssetCompression>,
    #[serde(default)]
    pub grouping: Vec<AssetGrouping>,
    #[serde(default)]
    pub royalty: Option<RpcAssetRoyalty>,
    #[serde(default)]
    pub creators: Vec<RpcAssetCreator>,
    pub ownership: RpcAssetOwnership,
    #[serde(default)]
    pub uses: Option<AssetUses>,
    #[serde(default)]
    pub supply: Option<i64>,
    pub mutable: bool,
    pub burnt: bool,
    #[serde(default)]
    pub lamports: Option<u64>,
    #[serde(default)]
    pub executable: Option<bool>,
    #[serde(default)]
    pub rent_epoch: Option<u64>,
    #[serde(default)]
    pub metadata_owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcAssetAuthority {
    pub address: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcAssetCompression {
    pub eligible: bool,
    pub compressed: bool,
    /// Empty for uncompressed assets, as are the other hashes and `tree`.
    #[serde(default)]
    pub data_hash: String,
    #[serde(default)]
    pub creator_hash: String,
    #[serde(default)]
    pub asset_hash: String,
    #[serde(default)]
    pub tree: String,
    #[serde(default)]
    pub seq: u64,
    #[serde(default)]
    pub leaf_id: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcAssetRoyalty {
    pub royalty_model: String,
    #[serde(default)]
    pub target: Option<String>,
    pub percent: f64,
    pub basis_points: u16,
    pub primary_sale_happened: bool,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcAssetCreator {
    pub address: String,
    pub share: u8,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcAssetOwnership {
    pub frozen: bool,
    pub delegated: bool,
    #[serde(default)]
    pub delegate: Option<String>,
    pub ownership_model: String,
    pub owner: String,
}

// ─── Text-only sections ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetContent {
    #[serde(rename = "$schema", default)]
    pub schema: String,
    #[serde(default)]
    pub json_uri: String,
    #[serde(default)]
    pub files: Vec<AssetFile>,
    #[serde(default)]
    pub metadata: AssetMetadata,
    #[serde(default)]
    pub links: Option<AssetLinks>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetFile {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub mime: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetMetadata {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub token_standard: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetLinks {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub external_url: String,
}

/// Collection membership and similar key/value tags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetGrouping {
    pub group_key: String,
    pub group_value: String,
    #[serde(default)]
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetUses {
    pub use_method: String,
    pub remaining: u64,
    pub total: u64,
}

// ─── Converted types ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// e.g. `V1_NFT`, `ProgrammableNFT`, `FungibleToken`.
    pub interface: String,
    pub id: Pubkey,
    pub content: Option<AssetContent>,
    pub authorities: Vec<AssetAuthority>,
    pub compression: Option<AssetCompression>,
    pub grouping: Vec<AssetGrouping>,
    pub royalty: Option<AssetRoyalty>,
    pub creators: Vec<AssetCreator>,
    pub ownership: AssetOwnership,
    pub uses: Option<AssetUses>,
    pub supply: Option<i64>,
    pub mutable: bool,
    pub burnt: bool,
    pub lamports: Option<u64>,
    pub executable: Option<bool>,
    pub rent_epoch: Option<u64>,
    pub metadata_owner: Option<Pubkey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetAuthority {
    pub address: Pubkey,
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCompression {
    pub eligible: bool,
    pub compressed: bool,
    pub data_hash: Option<Hash>,
    pub creator_hash: Option<Hash>,
    pub asset_hash: Option<Hash>,
    pub tree: Option<Pubkey>,
    pub seq: u64,
    pub leaf_id: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetRoyalty {
    pub royalty_model: String,
    pub target: Option<Pubkey>,
    pub percent: f64,
    pub basis_points: u16,
    pub primary_sale_happened: bool,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCreator {
    pub address: Pubkey,
    /// Percentage of royalties, 0..=100 across all creators.
    pub share: u8,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetOwnership {
    pub frozen: bool,
    pub delegated: bool,
    pub delegate: Option<Pubkey>,
    /// `single` or `token`.
    pub ownership_model: String,
    pub owner: Pubkey,
}

impl Asset {
    /// Parse the `result` of a `getAsset` response.
    ///
    /// A `null` result or an empty `id` means the indexer has no such asset.
    pub fn from_rpc_value(value: Value) -> Result<Option<Self>, RpcTypesError> {
        let raw: Option<RpcAsset> = serde_json::from_value(value)?;
        match raw {
            Some(raw) if !raw.id.is_empty() => {
                let asset: Self = raw.try_into()?;
                debug!(
                    "asset {} ({}, {} creators)",
                    asset.id,
                    asset.interface,
                    asset.creators.len()
                );
                Ok(Some(asset))
            }
            _ => Ok(None),
        }
    }

    /// The verified collection this asset belongs to, if any.
    pub fn collection(&self) -> Option<&str> {
        self.grouping
            .iter()
            .find(|g| g.group_key == "collection" && g.verified != Some(false))
            .map(|g| g.group_value.as_str())
    }
}

/// Empty strings and `null` both mean "not set".
fn optional<T>(text: Option<&str>) -> Result<Option<T>, RpcTypesError>
where
    T: std::str::FromStr,
    RpcTypesError: From<T::Err>,
{
    match text {
        None | Some("") => Ok(None),
        Some(text) => Ok(Some(text.parse()?)),
    }
}

impl TryFrom<RpcAsset> for Asset {
    type Error = RpcTypesError;

    fn try_from(raw: RpcAsset) -> Result<Self, Self::Error> {
        let authorities = raw
            .authorities
            .into_iter()
            .map(AssetAuthority::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let creators = raw
            .creators
            .into_iter()
            .map(AssetCreator::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            interface: raw.interface,
            id: raw.id.parse()?,
            content: raw.content,
            authorities,
            compression: raw.compression.map(AssetCompression::try_from).transpose()?,
            grouping: raw.grouping,
            royalty: raw.royalty.map(AssetRoyalty::try_from).transpose()?,
            creators,
            ownership: raw.ownership.try_into()?,
            uses: raw.uses,
            supply: raw.supply,
            mutable: raw.mutable,
            burnt: raw.burnt,
            lamports: raw.lamports,
            executable: raw.executable,
            rent_epoch: raw.rent_epoch,
            metadata_owner: optional(raw.metadata_owner.as_deref())?,
        })
    }
}

impl TryFrom<RpcAssetAuthority> for AssetAuthority {
    type Error = RpcTypesError;

    fn try_from(raw: RpcAssetAuthority) -> Result<Self, Self::Error> {
        Ok(Self {
            address: raw.address.parse()?,
            scopes: raw.scopes,
        })
    }
}

impl TryFrom<RpcAssetCompression> for AssetCompression {
    type Error = RpcTypesError;

    fn try_from(raw: RpcAssetCompression) -> Result<Self, Self::Error> {
        Ok(Self {
            eligible: raw.eligible,
            compressed: raw.compressed,
            data_hash: optional(Some(&raw.data_hash))?,
            creator_hash: optional(Some(&raw.creator_hash))?,
            asset_hash: optional(Some(&raw.asset_hash))?,
            tree: optional(Some(&raw.tree))?,
            seq: raw.seq,
            leaf_id: raw.leaf_id,
        })
    }
}

impl TryFrom<RpcAssetRoyalty> for AssetRoyalty {
    type Error = RpcTypesError;

    fn try_from(raw: RpcAssetRoyalty) -> Result<Self, Self::Error> {
        Ok(Self {
            royalty_model: raw.royalty_model,
            target: optional(raw.target.as_deref())?,
            percent: raw.percent,
            basis_points: raw.basis_points,
            primary_sale_happened: raw.primary_sale_happened,
            locked: raw.locked,
        })
    }
}

impl TryFrom<RpcAssetCreator> for AssetCreator {
    type Error = RpcTypesError;

    fn try_from(raw: RpcAssetCreator) -> Result<Self, Self::Error> {
        Ok(Self {
            address: raw.address.parse()?,
            share: raw.share,
            verified: raw.verified,
        })
    }
}

impl TryFrom<RpcAssetOwnership> for AssetOwnership {
    type Error = RpcTypesError;

    fn try_from(raw: RpcAssetOwnership) -> Result<Self, Self::Error> {
        Ok(Self {
            frozen: raw.frozen,
            delegated: raw.delegated,
            delegate: optional(raw.delegate.as_deref())?,
            ownership_model: raw.ownership_model,
            owner: raw.owner.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solkit_core::programs::bubblegum;

    fn ownership(owner: &str) -> Value {
        json!({
            "frozen": false,
            "delegated": false,
            "delegate": null,
            "ownership_model": "single",
            "owner": owner
        })
    }

    #[test]
    fn params_carry_base58_id() {
        let id = Pubkey::from([3; 32]);
        assert_eq!(get_asset_params(&id), json!([id.to_string()]));
    }

    #[test]
    fn null_result_is_no_asset() {
        assert_eq!(Asset::from_rpc_value(Value::Null).unwrap(), None);
    }

    #[test]
    fn empty_id_is_no_asset() {
        let value = json!({
            "interface": "",
            "id": "",
            "ownership": ownership(""),
            "mutable": false,
            "burnt": false
        });
        assert_eq!(Asset::from_rpc_value(value).unwrap(), None);
    }

    #[test]
    fn minimal_asset_converts() {
        let value = json!({
            "interface": "V1_NFT",
            "id": bubblegum::ID.to_string(),
            "ownership": ownership("11111111111111111111111111111111"),
            "mutable": true,
            "burnt": false
        });
        let asset = Asset::from_rpc_value(value).unwrap().unwrap();
        assert_eq!(asset.id, bubblegum::ID);
        assert_eq!(asset.ownership.owner, Pubkey::default());
        assert_eq!(asset.ownership.delegate, None);
        assert!(asset.authorities.is_empty());
        assert_eq!(asset.supply, None);
        assert_eq!(asset.metadata_owner, None);
        assert_eq!(asset.collection(), None);
    }

    #[test]
    fn uncompressed_hashes_are_none() {
        let raw: RpcAssetCompression = serde_json::from_value(json!({
            "eligible": false,
            "compressed": false,
            "data_hash": "",
            "creator_hash": "",
            "asset_hash": "",
            "tree": "",
            "seq": 0,
            "leaf_id": 0
        }))
        .unwrap();
        let converted = AssetCompression::try_from(raw).unwrap();
        assert_eq!(converted.tree, None);
        assert_eq!(converted.data_hash, None);
    }

    #[test]
    fn bad_owner_is_an_error() {
        let raw: RpcAssetOwnership =
            serde_json::from_value(ownership("definitely-not-base58!")).unwrap();
        assert!(matches!(
            AssetOwnership::try_from(raw),
            Err(RpcTypesError::Address(_))
        ));
    }

    #[test]
    fn unverified_collection_is_ignored() {
        let value = json!({
            "interface": "V1_NFT",
            "id": bubblegum::ID.to_string(),
            "grouping": [{
                "group_key": "collection",
                "group_value": "Col1",
                "verified": false
            }],
            "ownership": ownership("11111111111111111111111111111111"),
            "mutable": true,
            "burnt": false
        });
        let asset = Asset::from_rpc_value(value).unwrap().unwrap();
        assert_eq!(asset.grouping.len(), 1);
        assert_eq!(asset.collection(), None);
    }
}
