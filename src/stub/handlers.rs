use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{Media, MediaId, MediaPage},
};

use super::{request_id::RequestId, StubState};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;

fn require_fields(media: &Media) -> AppResult<()> {
    let missing = media.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingFields(missing))
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// One page of media in insertion order
pub async fn list_media(
    State(state): State<StubState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<MediaPage>> {
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let inner = state.inner.read().await;
    let media_page = inner.page(page, limit)?;
    Ok(Json(media_page))
}

/// Persist a new media entry
pub async fn create_media(
    State(state): State<StubState>,
    Extension(request_id): Extension<RequestId>,
    Json(draft): Json<Media>,
) -> AppResult<(StatusCode, Json<Media>)> {
    require_fields(&draft)?;

    let mut inner = state.inner.write().await;
    let media = inner.insert(draft);

    tracing::info!(id = ?media.id, request_id = %request_id, "Stub media created");

    Ok((StatusCode::CREATED, Json(media)))
}

/// Replace an existing media entry
pub async fn update_media(
    State(state): State<StubState>,
    Path(id): Path<MediaId>,
    Json(media): Json<Media>,
) -> AppResult<Json<Media>> {
    require_fields(&media)?;

    let mut inner = state.inner.write().await;
    let updated = inner.replace(id, media)?;
    Ok(Json(updated))
}

/// Remove a media entry
pub async fn delete_media(
    State(state): State<StubState>,
    Path(id): Path<MediaId>,
) -> AppResult<StatusCode> {
    let mut inner = state.inner.write().await;
    inner.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}
