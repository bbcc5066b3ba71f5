//! Axum route handlers for career-sheet profiles.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::career::CareerItem;
use crate::models::profile::{Profile, ProfilePatch};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub name: String,
    #[serde(default)]
    pub career_history: Vec<CareerItem>,
}

/// POST /api/v1/profiles
pub async fn handle_create_profile(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<Profile>), AppError> {
    let profile = state
        .store
        .create(request.name, request.career_history)
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/v1/profiles/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.store.get(id).await?))
}

/// PATCH /api/v1/profiles/:id
///
/// Updates basics and free-text sections; absent keys are left untouched.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.store.update_profile(id, patch).await?))
}

/// POST /api/v1/profiles/:id/careers
pub async fn handle_add_career(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(item): Json<CareerItem>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.store.add_career(id, item).await?))
}

/// PUT /api/v1/profiles/:id/careers/:index
pub async fn handle_update_career(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(item): Json<CareerItem>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.store.update_career(id, index, item).await?))
}

/// DELETE /api/v1/profiles/:id/careers/:index
pub async fn handle_delete_career(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.store.delete_career(id, index).await?))
}
