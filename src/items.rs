//! Demo item handlers showing the envelope layer and guards in use.
//!
//! The store is a fixed in-memory catalogue; nothing is persisted.

use axum::body::Bytes;
use axum::extract::Path;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::fields::{Fields, ParamSources};
use crate::middleware::Responder;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
}

fn catalogue(id: &str) -> Option<Item> {
    (id == "1").then(|| Item {
        id: "1".to_string(),
        name: "widget".to_string(),
    })
}

pub async fn get_item(res: Responder, Path(id): Path<String>) -> Response {
    match catalogue(&id) {
        Some(item) => res.ok(item),
        None => res.not_found(format!("Item {id} not found")),
    }
}

/// Runs behind `require_headers` and `require_params`, so both the key and
/// `name` are known to be present here.
pub async fn create_item(
    res: Responder,
    Path(id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if api_key.trim().is_empty() {
        return res.unauthorized("API key must not be empty");
    }

    let sources = ParamSources {
        body: Fields::from_body(&headers, &body),
        path: Fields::default(),
        query: Fields::from_query(uri.query()),
    };

    match sources.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => res.created(Item {
            id,
            name: name.clone(),
        }),
        _ => res.invalid(vec!["name must be a non-empty string"]),
    }
}

pub async fn delete_item(res: Responder, Path(id): Path<String>) -> Response {
    res.forbidden(format!("Item {id} is read-only"))
}

pub async fn route_not_found(res: Responder, uri: Uri) -> Response {
    res.not_found(format!("Route not found: {}", uri.path()))
}

pub async fn method_not_allowed(res: Responder, method: Method, uri: Uri) -> Response {
    res.unsupported_action(format!(
        "Method {method} is not supported on {}",
        uri.path()
    ))
}
