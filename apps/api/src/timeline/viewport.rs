//! Viewport state and the shared resize signal.
//!
//! One `ViewportObserver` fans resize notifications out to every dependent
//! layout. Subscriptions are scoped: dropping a `ViewportSubscription`
//! unregisters it.
//!
//! The HTTP handlers are request/response and take a `Viewport` per call.
//! `ViewportObserver` is the embedding API for a live view (see
//! `TimelineSession`), so the service binary itself does not construct one.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

pub const DEFAULT_MOBILE_BREAKPOINT_PX: f64 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width of the whole window, used for the mobile/desktop switch.
    pub viewport_width_px: f64,
    /// Measured width of the bar track.
    pub container_width_px: f64,
}

impl Viewport {
    pub fn new(viewport_width_px: f64, container_width_px: f64) -> Self {
        Self {
            viewport_width_px,
            container_width_px,
        }
    }

    pub fn is_mobile(&self, breakpoint_px: f64) -> bool {
        self.viewport_width_px <= breakpoint_px
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("viewport_width_px", self.viewport_width_px),
            ("container_width_px", self.container_width_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a finite, non-negative number"));
            }
        }
        Ok(())
    }
}

pub struct ViewportObserver {
    tx: watch::Sender<Viewport>,
}

impl ViewportObserver {
    pub fn new(initial: Viewport) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Records a resize. Subscribers are only woken when the viewport changed.
    pub fn publish(&self, viewport: Viewport) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == viewport {
                false
            } else {
                *current = viewport;
                true
            }
        })
    }

    pub fn current(&self) -> Viewport {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> ViewportSubscription {
        ViewportSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[derive(Debug)]
pub struct ViewportSubscription {
    rx: watch::Receiver<Viewport>,
}

impl ViewportSubscription {
    pub fn current(&self) -> Viewport {
        *self.rx.borrow()
    }

    /// Waits for the next resize. Returns `None` once the observer is gone.
    pub async fn changed(&mut self) -> Option<Viewport> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
