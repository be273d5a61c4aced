//! `getAsset` goes out with the asset id, an indexer response comes back and
//! is converted into typed values.

use serde_json::{json, Value};
use solkit_core::programs::bubblegum;
use solkit_core::{Hash, Pubkey};
use solkit_rpc_types::*;

const TREE: &str = "TrEEuqmjD6XKzRoqWzyPz8DrWFARV33hdhYKr1BCMyP";
const OWNER: &str = "5PjDJaGfSPJj4tFzMRCiuuAasKg5n8dJKXKenhuwZexx";
const CREATOR: &str = "5TeWSsjg2gbxCyWVniXeCmwM7UtHTCK7svzJr5xYJzHf";
const AUTHORITY: &str = "5XZobBCgcyuBM4m1E1rZVei7Me6V8FzwSLexuU194KcN";

fn compressed_nft(id: &str, owner: &str) -> Value {
    json!({
        "interface": "V1_NFT",
        "id": id,
        "content": {
            "$schema": "https://schema.metaplex.com/nft1.0.json",
            "json_uri": "https://arweave.net/abc",
            "files": [{ "uri": "https://arweave.net/abc.png", "mime": "image/png" }],
            "metadata": {
                "description": "A leaf in a tree",
                "name": "Leaf #805306",
                "symbol": "LEAF",
                "token_standard": "NonFungible"
            },
            "links": { "image": "https://arweave.net/abc.png" }
        },
        "authorities": [{ "address": AUTHORITY, "scopes": ["full"] }],
        "compression": {
            "eligible": false,
            "compressed": true,
            "data_hash": "5bV6jUfhDHCQVA1WfKBUnXUsboJgoKgkzkKcxr3joew5",
            "creator_hash": "5fQPsn8hoaVddFG26cWQ5QFdqxWtUPNaZ9zH2E6LYzFn",
            "asset_hash": "5jKh25biPsnrmLWXXuqKNH2Q67j69T4Q7Zew5c8wJKaV",
            "tree": TREE,
            "seq": 912_004,
            "leaf_id": 805_306
        },
        "grouping": [{
            "group_key": "collection",
            "group_value": AUTHORITY
        }],
        "royalty": {
            "royalty_model": "creators",
            "target": null,
            "percent": 0.05,
            "basis_points": 500,
            "primary_sale_happened": true,
            "locked": false
        },
        "creators": [{ "address": CREATOR, "share": 100, "verified": true }],
        "ownership": {
            "frozen": false,
            "delegated": false,
            "delegate": null,
            "ownership_model": "single",
            "owner": owner
        },
        "supply": null,
        "mutable": true,
        "burnt": false
    })
}

#[test]
fn request_params_carry_asset_id() {
    let id: Pubkey = "3RDSyGbEbENEZAnNsgGqNzxJgsLXQf5GdNkgqhJU4193".parse().unwrap();
    let request = JsonRpcRequest::new(7, "getAsset", get_asset_params(&id));
    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["method"], "getAsset");
    assert_eq!(body["params"], json!([id.to_string()]));
}

#[test]
fn compressed_nft_response_converts() {
    let tree: Pubkey = TREE.parse().unwrap();
    let id = bubblegum::leaf_asset_id(&tree, 805_306).unwrap();

    let body = json!({
        "jsonrpc": "2.0",
        "id": 7,
        "result": compressed_nft(&id.to_string(), OWNER)
    });
    let result = JsonRpcResponse::<Value>::from_slice(body.to_string().as_bytes())
        .unwrap()
        .into_result()
        .unwrap();
    let asset = Asset::from_rpc_value(result).unwrap().unwrap();

    assert_eq!(asset.id, id);
    assert_eq!(asset.interface, "V1_NFT");
    assert_eq!(asset.ownership.owner, Pubkey::from([0x41; 32]));
    assert_eq!(asset.ownership.delegate, None);
    assert_eq!(asset.supply, None);
    assert_eq!(asset.lamports, None);
    assert_eq!(asset.metadata_owner, None);

    let compression = asset.compression.as_ref().unwrap();
    assert!(compression.compressed);
    assert_eq!(compression.tree, Some(tree));
    assert_eq!(compression.leaf_id, 805_306);
    assert_eq!(
        compression.data_hash,
        Some(Hash::new_from_array([0x44; 32]))
    );

    let content = asset.content.as_ref().unwrap();
    assert_eq!(content.schema, "https://schema.metaplex.com/nft1.0.json");
    assert_eq!(content.metadata.symbol, "LEAF");
    assert_eq!(content.links.as_ref().unwrap().external_url, "");

    assert_eq!(asset.creators[0].address, Pubkey::from([0x42; 32]));
    assert_eq!(asset.creators[0].share, 100);
    assert_eq!(asset.authorities[0].scopes, vec!["full".to_string()]);
    assert_eq!(asset.collection(), Some(AUTHORITY));

    let royalty = asset.royalty.as_ref().unwrap();
    assert_eq!(royalty.basis_points, 500);
    assert_eq!(royalty.target, None);
}

#[test]
fn unknown_asset_is_none() {
    let body = json!({ "jsonrpc": "2.0", "id": 7, "result": null });
    assert_eq!(Asset::from_rpc_value(body["result"].clone()).unwrap(), None);

    let empty = compressed_nft("", OWNER);
    assert_eq!(Asset::from_rpc_value(empty).unwrap(), None);
}

#[test]
fn bad_owner_fails_whole_conversion() {
    let value = compressed_nft(&Pubkey::from([1; 32]).to_string(), "0OIl-not-base58");
    assert!(matches!(
        Asset::from_rpc_value(value),
        Err(RpcTypesError::Address(_))
    ));
}

#[test]
fn missing_required_field_is_json_error() {
    let mut value = compressed_nft(&Pubkey::from([1; 32]).to_string(), OWNER);
    value.as_object_mut().unwrap().remove("ownership");
    assert!(matches!(
        Asset::from_rpc_value(value),
        Err(RpcTypesError::Json(_))
    ));
}
