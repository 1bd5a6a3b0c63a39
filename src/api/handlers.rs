//! # Resource Handlers
//!
//! The prestador collection handlers: orchestrate validation, issue the
//! store operation, translate outcomes into response envelopes. Handlers
//! hold no state beyond the shared store and validator; lookups that match
//! nothing are empty successes, not errors.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde_json::Value;

use crate::prestador::model::{fields, strip_id, COLLECTION};
use crate::prestador::validation::{FieldError, Validator};
use crate::store::{DocumentStore, Filter, SortSpec, ID_FIELD};

use super::errors::{ApiError, ApiResult};
use super::response::{DeleteResult, InsertResult, UpdateResult};

/// Shared state for the prestador handlers
pub struct ApiState<S> {
    pub store: Arc<S>,
    pub validator: Validator,
}

impl<S: DocumentStore> ApiState<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            validator: Validator::standard(),
        }
    }
}

/// Build the prestador collection router
pub fn prestador_routes<S: DocumentStore + 'static>(state: Arc<ApiState<S>>) -> Router {
    Router::new()
        .route(
            "/",
            get(list_handler::<S>)
                .post(create_handler::<S>)
                .put(update_handler::<S>),
        )
        .route("/id/:id", get(get_by_id_handler::<S>))
        .route("/razao/:razao", get(get_by_razao_handler::<S>))
        .route("/:id", delete(delete_handler::<S>))
        .with_state(state)
}

/// Default sort for listings: razao_social ascending
fn default_sort() -> SortSpec {
    SortSpec::asc(fields::RAZAO_SOCIAL)
}

/// Create a record: validate with no own id, then insert
async fn create_handler<S: DocumentStore + 'static>(
    State(state): State<Arc<ApiState<S>>>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<InsertResult>)> {
    state
        .validator
        .validate(&body, None, state.store.as_ref())?;

    let outcome = state
        .store
        .insert_one(COLLECTION, body)
        .map_err(ApiError::StoreWrite)?;

    Ok((StatusCode::CREATED, Json(InsertResult::from(outcome))))
}

/// Update a record: the body carries the id; it is stripped before
/// persistence and used only as the match key
async fn update_handler<S: DocumentStore + 'static>(
    State(state): State<Arc<ApiState<S>>>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<UpdateResult>)> {
    let (id, body) = strip_id(body);
    let id = id.ok_or_else(|| {
        ApiError::Validation(vec![FieldError::field(
            ID_FIELD,
            None,
            "document id is required for updates",
        )])
    })?;

    state
        .validator
        .validate(&body, Some(id.as_str()), state.store.as_ref())?;

    let outcome = state
        .store
        .update_one(COLLECTION, &id, &body)
        .map_err(ApiError::StoreWrite)?;

    Ok((StatusCode::CREATED, Json(UpdateResult::from(outcome))))
}

/// List all records sorted by razao_social
async fn list_handler<S: DocumentStore + 'static>(
    State(state): State<Arc<ApiState<S>>>,
) -> ApiResult<Json<Vec<Value>>> {
    let documents = state
        .store
        .find(COLLECTION, &Filter::All, Some(&default_sort()))
        .map_err(ApiError::StoreRead)?;

    Ok(Json(documents))
}

/// Get by id: an array of 0 or 1 records; absence is not an error
async fn get_by_id_handler<S: DocumentStore + 'static>(
    State(state): State<Arc<ApiState<S>>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    let filter = Filter::id_eq(&id).map_err(ApiError::StoreRead)?;

    let documents = state
        .store
        .find(COLLECTION, &filter, Some(&default_sort()))
        .map_err(ApiError::StoreRead)?;

    Ok(Json(documents))
}

/// Get by name substring, case-insensitive, sorted
async fn get_by_razao_handler<S: DocumentStore + 'static>(
    State(state): State<Arc<ApiState<S>>>,
    Path(razao): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    let filter = Filter::contains_ci(fields::RAZAO_SOCIAL, razao);

    let documents = state
        .store
        .find(COLLECTION, &filter, Some(&default_sort()))
        .map_err(ApiError::StoreRead)?;

    Ok(Json(documents))
}

/// Delete by id: accepted with the deletion count; zero is a no-match,
/// not an error
async fn delete_handler<S: DocumentStore + 'static>(
    State(state): State<Arc<ApiState<S>>>,
    Path(id): Path<String>,
) -> ApiResult<(StatusCode, Json<DeleteResult>)> {
    let outcome = state
        .store
        .delete_one(COLLECTION, &id)
        .map_err(ApiError::StoreWrite)?;

    Ok((StatusCode::ACCEPTED, Json(DeleteResult::from(outcome))))
}
