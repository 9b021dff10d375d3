//! RPC method handler for the Linkshelf JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method name and its params to the link store.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::app::App;
use crate::managers::link_manager::LinkManagerTrait;
use crate::types::link::{LinkPatch, NewLink, ALL_COLLECTIONS};

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn parse_params<T: DeserializeOwned>(params: &Value) -> Result<T, String> {
    serde_json::from_value(params.clone()).map_err(|e| format!("invalid params: {}", e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call to the link store.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &App, method: &str, params: &Value) -> Result<Value, String> {
    let links = app.links.as_ref();
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Collections ───
        "collections.list" => {
            let collections = links.list_collections().await.map_err(|e| e.to_string())?;
            to_json(&collections)
        }

        // ─── Links ───
        "links.list" => {
            let collection = params
                .get("collection_id")
                .or_else(|| params.get("collectionId"))
                .and_then(|v| v.as_str())
                .unwrap_or(ALL_COLLECTIONS);
            let items = links.list_links(collection).await.map_err(|e| e.to_string())?;
            to_json(&items)
        }
        "links.get" => {
            let id = str_param(params, "id")?;
            match links.get_link(id).await.map_err(|e| e.to_string())? {
                Some(link) => to_json(&link),
                None => Err(format!("link not found: {}", id)),
            }
        }
        "links.create" => {
            let input: NewLink = parse_params(params)?;
            let link = links.create_link(input).await.map_err(|e| e.to_string())?;
            to_json(&link)
        }
        "links.update" => {
            let id = str_param(params, "id")?;
            let patch: LinkPatch = parse_params(params)?;
            match links.update_link(id, &patch).await.map_err(|e| e.to_string())? {
                Some(_) => Ok(json!({"ok": true})),
                None => Err(format!("link not found: {}", id)),
            }
        }
        "links.delete" => {
            let id = str_param(params, "id")?;
            if !links.delete_link(id).await.map_err(|e| e.to_string())? {
                return Err(format!("link not found: {}", id));
            }
            Ok(json!({"ok": true}))
        }
        "links.toggle_read" => {
            let id = str_param(params, "id")?;
            match links.toggle_read_status(id).await.map_err(|e| e.to_string())? {
                Some(link) => Ok(json!({"ok": true, "is_read": link.is_read})),
                None => Err(format!("link not found: {}", id)),
            }
        }
        "links.search" => {
            let query = str_param(params, "query")?;
            let items = links.search(query).await.map_err(|e| e.to_string())?;
            to_json(&items)
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
