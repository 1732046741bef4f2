use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use super::state::AppState;
use super::static_files::serve_static;
use super::ws::ws_handler;
use crate::broadcast::reload_message;
use crate::database::DbError;
use crate::docs::{CreateDocumentInput, Document, UpdateDocumentInput};

type ApiError = (StatusCode, Json<Value>);

/// Build the full request-to-handler table.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/documents", get(list_documents).post(create_document))
        .route(
            "/api/documents/:id",
            get(get_document).put(update_document).delete(delete_document),
        )
        .route("/_dev/reload", post(trigger_reload))
        .route("/ws", get(ws_handler))
        .fallback(serve_static)
        .with_state(state)
}

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Document not found" })),
    )
}

fn bad_request(rejection: JsonRejection) -> ApiError {
    tracing::debug!("rejected request body: {rejection}");
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Invalid request body" })),
    )
}

/// Storage faults are not recovered here; log and answer with a generic
/// server error.
fn storage_fault(err: DbError) -> ApiError {
    tracing::error!("storage fault: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
}

async fn list_documents(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let docs = state.repository.find_all().await.map_err(storage_fault)?;
    Ok(Json(docs))
}

async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    state
        .repository
        .find_by_id(&id)
        .await
        .map_err(storage_fault)?
        .map(Json)
        .ok_or_else(not_found)
}

async fn create_document(
    State(state): State<AppState>,
    payload: Result<Json<CreateDocumentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let Json(input) = payload.map_err(bad_request)?;
    let doc = state.repository.create(input).await.map_err(storage_fault)?;
    Ok((StatusCode::CREATED, Json(doc)))
}

async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDocumentInput>, JsonRejection>,
) -> Result<Json<Document>, ApiError> {
    let Json(input) = payload.map_err(bad_request)?;
    state
        .repository
        .update(&id, input)
        .await
        .map_err(storage_fault)?
        .map(Json)
        .ok_or_else(not_found)
}

async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let removed = state
        .repository
        .delete(&id)
        .await
        .map_err(storage_fault)?;
    if removed {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(not_found())
    }
}

/// Dev-only rebuild hook: tell every connected client to reload.
async fn trigger_reload(State(state): State<AppState>) -> &'static str {
    let delivered = state.channel.publish(reload_message());
    tracing::info!(subscribers = delivered, "reload triggered");
    "OK"
}
