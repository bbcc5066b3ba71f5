//! Axum route handlers for timeline layout.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::career::{CareerItem, YearMonth, MAX_YEAR, MIN_YEAR};
use crate::state::AppState;
use crate::timeline::engine::TimelineLayout;
use crate::timeline::viewport::Viewport;

#[derive(Debug, Deserialize)]
pub struct ProfileTimelineRequest {
    #[serde(flatten)]
    pub viewport: Viewport,
    /// Evaluation month; defaults to the current UTC month.
    #[serde(default)]
    pub now: Option<YearMonth>,
}

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub items: Vec<CareerItem>,
    #[serde(flatten)]
    pub viewport: Viewport,
    #[serde(default)]
    pub now: Option<YearMonth>,
}

fn resolve_now(now: Option<YearMonth>) -> Result<YearMonth, AppError> {
    match now {
        Some(now) if !(1..=12).contains(&now.month) => Err(AppError::Validation(format!(
            "now.month must be between 1 and 12, got {}",
            now.month
        ))),
        Some(now) if !(MIN_YEAR..=MAX_YEAR).contains(&now.year) => {
            Err(AppError::Validation(format!(
                "now.year must be between {MIN_YEAR} and {MAX_YEAR}, got {}",
                now.year
            )))
        }
        Some(now) => Ok(now),
        None => Ok(YearMonth::now()),
    }
}

/// Ad-hoc items skip the store, so their years are checked here. The year
/// ruler grows with the year range.
fn check_item_years(items: &[CareerItem]) -> Result<(), AppError> {
    for (index, item) in items.iter().enumerate() {
        item.check_years()
            .map_err(|msg| AppError::Validation(format!("items[{index}]: {msg}")))?;
    }
    Ok(())
}

/// POST /api/v1/profiles/:id/timeline
///
/// Lays out the stored career history of a profile for the caller's viewport.
pub async fn handle_profile_timeline(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ProfileTimelineRequest>,
) -> Result<Json<TimelineLayout>, AppError> {
    request.viewport.validate().map_err(AppError::Validation)?;
    let now = resolve_now(request.now)?;

    let profile = state.store.get(id).await?;
    let history = profile.career_history;
    Ok(Json(state.timeline.layout(&history, now, &request.viewport)))
}

/// POST /api/v1/timeline/layout
///
/// Stateless layout of an arbitrary item list; nothing is stored.
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<TimelineLayout>, AppError> {
    request.viewport.validate().map_err(AppError::Validation)?;
    check_item_years(&request.items)?;
    let now = resolve_now(request.now)?;
    Ok(Json(state.timeline.layout(&request.items, now, &request.viewport)))
}
