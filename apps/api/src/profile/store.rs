//! Profile storage: the career history the timeline is rendered from.
//!
//! Copy-on-write: every edit builds a fresh `Arc<[CareerItem]>` and swaps it in.
//! A reader holding an earlier snapshot (e.g. a `TimelineSession`) never sees a
//! half-applied add/update/delete.
//!
//! `AppState` holds an `Arc<dyn ProfileStore>`; the in-memory backend is the
//! only one today.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::career::CareerItem;
use crate::models::profile::{Profile, ProfileBasics, ProfilePatch, ProfileSections};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn create(&self, name: String, history: Vec<CareerItem>) -> Result<Profile, AppError>;

    async fn get(&self, id: Uuid) -> Result<Profile, AppError>;

    /// Updates the name, basics and free-text sections. The career history is
    /// edited only through the career operations.
    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> Result<Profile, AppError>;

    async fn add_career(&self, id: Uuid, item: CareerItem) -> Result<Profile, AppError>;

    async fn update_career(
        &self,
        id: Uuid,
        index: usize,
        item: CareerItem,
    ) -> Result<Profile, AppError>;

    async fn delete_career(&self, id: Uuid, index: usize) -> Result<Profile, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Editing rules shared by every backend
// ────────────────────────────────────────────────────────────────────────────

/// Clamps the date order, then rejects items the editor could never produce.
pub fn prepare_career(mut item: CareerItem) -> Result<CareerItem, AppError> {
    item.clamp_date_order();

    if item.organization.trim().is_empty() {
        return Err(AppError::Validation(
            "organization cannot be empty".to_string(),
        ));
    }
    item.check_years().map_err(AppError::Validation)?;
    if !item.is_current && (item.end_year.is_none() || item.end_month.is_none()) {
        return Err(AppError::Validation(
            "end_year and end_month are required unless the position is current".to_string(),
        ));
    }
    for (field, month) in [("start_month", item.start_month), ("end_month", item.end_month)] {
        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                return Err(AppError::Validation(format!(
                    "{field} must be between 1 and 12, got {month}"
                )));
            }
        }
    }
    Ok(item)
}

/// Builds the next history snapshot, ordered by start month.
fn sorted_snapshot(mut items: Vec<CareerItem>) -> Arc<[CareerItem]> {
    items.sort_by_key(CareerItem::sort_key);
    items.into()
}

fn check_index(profile: &Profile, index: usize) -> Result<(), AppError> {
    if index < profile.career_history.len() {
        Ok(())
    } else {
        Err(AppError::NotFound(format!(
            "Career entry {index} not found in profile {}",
            profile.id
        )))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<Uuid, Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `edit` to a copy of the profile's history and swaps the result in.
    async fn replace_history<F>(&self, id: Uuid, edit: F) -> Result<Profile, AppError>
    where
        F: FnOnce(&Profile) -> Result<Vec<CareerItem>, AppError> + Send,
    {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;

        let next = edit(profile)?;
        profile.career_history = sorted_snapshot(next);
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn create(&self, name: String, history: Vec<CareerItem>) -> Result<Profile, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        let history = history
            .into_iter()
            .map(prepare_career)
            .collect::<Result<Vec<_>, _>>()?;

        let profile = Profile {
            id: Uuid::new_v4(),
            name,
            basics: ProfileBasics::default(),
            sections: ProfileSections::default(),
            career_history: sorted_snapshot(history),
            updated_at: Utc::now(),
        };
        self.profiles
            .write()
            .await
            .insert(profile.id, profile.clone());

        info!(
            "Created profile {} with {} career entries",
            profile.id,
            profile.career_history.len()
        );
        Ok(profile)
    }

    async fn get(&self, id: Uuid) -> Result<Profile, AppError> {
        self.profiles
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))
    }

    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> Result<Profile, AppError> {
        patch.validate().map_err(AppError::Validation)?;

        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
        patch.apply(profile);
        profile.updated_at = Utc::now();

        info!("Updated profile {id}");
        Ok(profile.clone())
    }

    async fn add_career(&self, id: Uuid, item: CareerItem) -> Result<Profile, AppError> {
        let item = prepare_career(item)?;
        self.replace_history(id, move |profile| {
            let mut next = profile.career_history.to_vec();
            next.push(item);
            Ok(next)
        })
        .await
    }

    async fn update_career(
        &self,
        id: Uuid,
        index: usize,
        item: CareerItem,
    ) -> Result<Profile, AppError> {
        let item = prepare_career(item)?;
        self.replace_history(id, move |profile| {
            check_index(profile, index)?;
            let mut next = profile.career_history.to_vec();
            next[index] = item;
            Ok(next)
        })
        .await
    }

    async fn delete_career(&self, id: Uuid, index: usize) -> Result<Profile, AppError> {
        self.replace_history(id, move |profile| {
            check_index(profile, index)?;
            let mut next = profile.career_history.to_vec();
            next.remove(index);
            Ok(next)
        })
        .await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
