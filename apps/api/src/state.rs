use std::sync::Arc;

use crate::profile::ProfileStore;
use crate::timeline::TimelineEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable profile backend. Default: InMemoryProfileStore.
    pub store: Arc<dyn ProfileStore>,
    /// Timeline layout engine with the configured text measurer and label styles.
    pub timeline: TimelineEngine,
}
