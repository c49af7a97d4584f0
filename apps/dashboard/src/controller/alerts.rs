//! Alert slot with a cancellable auto-dismiss timer.

use std::time::Duration;

use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};

use crate::controller::events::{Alert, AlertId, AlertKind, UiEvent};

pub const ALERT_DISMISS_AFTER: Duration = Duration::from_secs(3);

/// Spawns expiry timers that report back to the dashboard loop.
#[derive(Debug, Clone)]
pub struct AlertScheduler {
    events: UnboundedSender<UiEvent>,
    dismiss_after: Duration,
}

impl AlertScheduler {
    pub fn new(events: UnboundedSender<UiEvent>) -> Self {
        Self {
            events,
            dismiss_after: ALERT_DISMISS_AFTER,
        }
    }

    fn schedule(&self, id: AlertId) -> JoinHandle<()> {
        let events = self.events.clone();
        let dismiss_after = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            // The loop may already be gone during shutdown.
            let _ = events.send(UiEvent::AlertExpired(id));
        })
    }
}

#[derive(Debug)]
struct AlertTimer {
    id: AlertId,
    handle: JoinHandle<()>,
}

/// Holds at most one alert. Every transition that replaces or hides the alert cancels the
/// pending timer, so an expiry can only ever hide the alert it was scheduled for.
#[derive(Debug, Default)]
pub struct AlertSlot {
    alert: Option<Alert>,
    timer: Option<AlertTimer>,
    next_id: u64,
}

impl AlertSlot {
    pub fn show(
        &mut self,
        scheduler: &AlertScheduler,
        kind: AlertKind,
        message: impl Into<String>,
        sub_message: Option<String>,
    ) -> AlertId {
        self.cancel_timer();
        self.next_id += 1;
        let id = AlertId(self.next_id);
        self.alert = Some(Alert {
            id,
            kind,
            message: message.into(),
            sub_message,
            visible: true,
        });
        self.timer = Some(AlertTimer {
            id,
            handle: scheduler.schedule(id),
        });
        id
    }

    pub fn dismiss(&mut self) {
        self.cancel_timer();
        if let Some(alert) = self.alert.as_mut() {
            alert.visible = false;
        }
    }

    /// Applies an expiry. Returns false when the id no longer names the visible alert.
    pub fn expire(&mut self, id: AlertId) -> bool {
        match self.alert.as_mut() {
            Some(alert) if alert.id == id && alert.visible => {
                alert.visible = false;
                self.timer = None;
                true
            }
            _ => false,
        }
    }

    /// The alert currently on screen, if any.
    pub fn visible(&self) -> Option<&Alert> {
        self.last().filter(|alert| alert.visible)
    }

    /// The most recent alert, whether or not it is still visible.
    pub fn last(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible().is_some()
    }

    #[cfg(test)]
    pub fn has_pending_timer(&self) -> bool {
        self.timer.is_some()
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            tracing::trace!(alert_id = timer.id.0, "cancelling alert timer");
            timer.handle.abort();
        }
    }
}

impl Drop for AlertSlot {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

#[cfg(test)]
#[path = "tests/alerts_tests.rs"]
mod tests;
