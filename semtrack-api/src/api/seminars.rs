//! Seminar CRUD endpoints
//!
//! Listing accepts the filter fields as query parameters; writes go through
//! the resolution pipeline so coordinates and provenance stamps are always
//! applied the same way.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use semtrack_common::{FilterState, Seminar, SeminarDraft};

use crate::{db, ApiError, ApiResult, AppState};

/// GET /api/seminars
///
/// Filtered listing, ascending by start date. All filter parameters are
/// optional and AND-combined.
pub async fn list_seminars(
    State(state): State<AppState>,
    Query(filter): Query<FilterState>,
) -> ApiResult<Json<Vec<Seminar>>> {
    let seminars = db::seminars::query_seminars(&state.db, &filter).await?;
    Ok(Json(seminars))
}

/// GET /api/seminars/:id
pub async fn get_seminar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Seminar>> {
    db::seminars::get_seminar(&state.db, &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Seminar not found: {}", id)))
}

/// POST /api/seminars
pub async fn create_seminar(
    State(state): State<AppState>,
    Json(draft): Json<SeminarDraft>,
) -> ApiResult<(StatusCode, Json<Seminar>)> {
    let seminar = state.pipeline.create(&state.db, draft).await?;
    Ok((StatusCode::CREATED, Json(seminar)))
}

/// PUT /api/seminars/:id
pub async fn update_seminar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<SeminarDraft>,
) -> ApiResult<Json<Seminar>> {
    let seminar = state.pipeline.update(&state.db, &id, draft).await?;
    Ok(Json(seminar))
}

/// DELETE /api/seminars/:id
pub async fn delete_seminar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !db::seminars::delete_seminar(&state.db, &id).await? {
        return Err(ApiError::NotFound(format!("Seminar not found: {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
