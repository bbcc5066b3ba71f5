//! A live timeline view: one item snapshot kept laid out as the viewport changes.
//!
//! The session owns its viewport subscription, so dropping the session is
//! what unregisters it from the observer.
//!
//! Embedding API for a live view that redraws on resize. The HTTP surface lays
//! out one viewport per request and never opens a session.

#![allow(dead_code)]

use std::sync::Arc;

use crate::models::career::{CareerItem, YearMonth};
use crate::timeline::engine::{TimelineEngine, TimelineLayout};
use crate::timeline::viewport::{ViewportObserver, ViewportSubscription};

pub struct TimelineSession {
    engine: TimelineEngine,
    items: Arc<[CareerItem]>,
    now: YearMonth,
    subscription: ViewportSubscription,
}

impl TimelineSession {
    pub fn open(
        engine: TimelineEngine,
        observer: &ViewportObserver,
        items: Arc<[CareerItem]>,
        now: YearMonth,
    ) -> Self {
        Self {
            engine,
            items,
            now,
            subscription: observer.subscribe(),
        }
    }

    /// Layout for the current snapshot and the last viewport seen.
    pub fn layout(&self) -> TimelineLayout {
        self.engine
            .layout(&self.items, self.now, &self.subscription.current())
    }

    /// Swaps in a new history. The previous snapshot is never mutated.
    pub fn replace_items(&mut self, items: Arc<[CareerItem]>) {
        self.items = items;
    }

    pub fn set_now(&mut self, now: YearMonth) {
        self.now = now;
    }

    /// Waits for the next resize and returns the recomputed layout, or `None`
    /// once the observer has shut down.
    pub async fn next_layout(&mut self) -> Option<TimelineLayout> {
        let viewport = self.subscription.changed().await?;
        Some(self.engine.layout(&self.items, self.now, &viewport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::career::test_support::career;
    use crate::timeline::engine::EngineSettings;
    use crate::timeline::font_metrics::MetricTableMeasurer;
    use crate::timeline::labels::LabelStyles;
    use crate::timeline::viewport::Viewport;

    fn engine() -> TimelineEngine {
        TimelineEngine::new(
            Arc::new(MetricTableMeasurer),
            EngineSettings {
                label_styles: LabelStyles::default(),
                right_margin_px: 20.0,
                mobile_breakpoint_px: 768.0,
            },
        )
    }

    fn items() -> Arc<[CareerItem]> {
        vec![
            career("Sakura Hospital", (2012, 4), Some((2016, 3)), false),
            career("Aoba Clinic", (2016, 4), None, true),
        ]
        .into()
    }

    #[tokio::test]
    async fn test_resize_recomputes_layout() {
        let observer = ViewportObserver::new(Viewport::new(1280.0, 900.0));
        let mut session =
            TimelineSession::open(engine(), &observer, items(), YearMonth::new(2024, 6));
        assert!(!session.layout().is_mobile);

        observer.publish(Viewport::new(375.0, 340.0));
        let layout = session.next_layout().await.expect("observer alive");
        assert!(layout.is_mobile);
        assert_eq!(layout.container_width_px, 340.0);
    }

    #[tokio::test]
    async fn test_replaced_snapshot_is_used_on_next_resize() {
        let observer = ViewportObserver::new(Viewport::new(1280.0, 900.0));
        let mut session =
            TimelineSession::open(engine(), &observer, items(), YearMonth::new(2024, 6));
        let before = items();

        session.replace_items(vec![career("Only", (2020, 1), None, true)].into());
        observer.publish(Viewport::new(1000.0, 800.0));
        let layout = session.next_layout().await.expect("observer alive");

        assert_eq!(layout.bars.len(), 1);
        assert_eq!(before.len(), 2);
    }

    #[test]
    fn test_dropping_session_unsubscribes() {
        let observer = ViewportObserver::new(Viewport::new(1280.0, 900.0));
        let session = TimelineSession::open(engine(), &observer, items(), YearMonth::new(2024, 6));
        assert_eq!(observer.subscriber_count(), 1);
        drop(session);
        assert_eq!(observer.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_next_layout_ends_with_observer() {
        let observer = ViewportObserver::new(Viewport::new(1280.0, 900.0));
        let mut session =
            TimelineSession::open(engine(), &observer, items(), YearMonth::new(2024, 6));
        drop(observer);
        assert!(session.next_layout().await.is_none());
    }
}
