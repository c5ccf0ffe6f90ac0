//! Bag HTTP routes
//!
//! The collection surface consumed by the dashboard: list, create, partial
//! update, delete. Handlers are stateless; each request is one store call.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::model::{Bag, BagPatch, NewBag};
use crate::observability::{Logger, Severity};
use crate::store::BagStore;

use super::errors::{ApiError, ApiResult};

/// Shared handler state
pub struct BagState<S> {
    store: Arc<S>,
}

impl<S: BagStore> BagState<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

/// Delete acknowledgment; returned whether or not the bag existed
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub ok: bool,
}

/// Create bag routes
pub fn bag_routes<S: BagStore + 'static>(state: Arc<BagState<S>>) -> Router {
    Router::new()
        .route("/bags", get(list_bags).post(create_bag))
        .route("/bags/:id", put(update_bag).delete(delete_bag))
        .with_state(state)
}

/// List all bags, most recently touched first
async fn list_bags<S: BagStore + 'static>(
    State(state): State<Arc<BagState<S>>>,
) -> ApiResult<Json<Vec<Bag>>> {
    let bags = state.store.list().map_err(|e| {
        Logger::log_stderr(Severity::Error, "bag_list_failed", &[("error", &e.to_string())]);
        ApiError::Internal(e.to_string())
    })?;
    Ok(Json(bags))
}

/// Create a bag from the posted fields
async fn create_bag<S: BagStore + 'static>(
    State(state): State<Arc<BagState<S>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Bag>)> {
    let new: NewBag = decode_body(payload)?;
    let bag = state.store.create(new)?;
    Ok((StatusCode::CREATED, Json(bag)))
}

/// Merge the supplied fields into an existing bag
///
/// Serves both single-field status transitions and multi-field detail edits;
/// the handler does not distinguish them.
async fn update_bag<S: BagStore + 'static>(
    State(state): State<Arc<BagState<S>>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Bag>> {
    let id = parse_id(&id)?;
    let patch: BagPatch = decode_body(payload)?;
    let bag = state.store.update(id, patch)?;
    Ok(Json(bag))
}

/// Delete a bag; acknowledged even when the id does not exist
async fn delete_bag<S: BagStore + 'static>(
    State(state): State<Arc<BagState<S>>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAck>> {
    let id = parse_id(&id)?;
    state.store.delete(id)?;
    Ok(Json(DeleteAck { ok: true }))
}

/// Decode a JSON body into the expected payload shape.
///
/// Both transport-level rejections and shape mismatches come back as the
/// client-error class so the caller always sees `{error}`.
fn decode_body<T: serde::de::DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<T> {
    let Json(body) = payload
        .map_err(|e| ApiError::Rejected(format!("invalid request body: {}", e.body_text())))?;
    serde_json::from_value(body)
        .map_err(|e| ApiError::Rejected(format!("invalid request body: {}", e)))
}

fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Rejected(format!("invalid bag id: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_garbage() {
        let err = parse_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("not-a-uuid"));
    }

    #[test]
    fn test_parse_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_delete_ack_shape() {
        let json = serde_json::to_value(DeleteAck { ok: true }).unwrap();
        assert_eq!(json, serde_json::json!({"ok": true}));
    }
}
