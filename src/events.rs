//! Monitor events and the outbound event channel
//!
//! Events are the live, best-effort leg of the monitor's output: a hint
//! to whatever UI layer happens to be listening. When nobody is
//! subscribed an event is dropped, not queued; the notification sink is
//! the durable path for background alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// An alert produced when background movement exceeds the threshold.
///
/// `speed_kmh` is already converted and clamped, so it is always ≥ 0.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpeedAlertEvent {
    pub speed_kmh: f64,
    pub timestamp: DateTime<Utc>,
}

impl SpeedAlertEvent {
    pub fn new(speed_kmh: f64) -> Self {
        Self {
            speed_kmh,
            timestamp: Utc::now(),
        }
    }

    /// Notification title for this alert.
    pub fn title(&self) -> String {
        "Speed alert".to_string()
    }

    /// Notification body for this alert.
    pub fn body(&self) -> String {
        format!("You are moving at {:.1} km/h", self.speed_kmh)
    }
}

/// Events emitted toward the application UI layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MonitorEvent {
    /// Foreground sample processed; carries the converted speed.
    LiveUpdate { speed_kmh: f64 },
    /// Background over-threshold sample; mirrors the notification so a
    /// later-foregrounded observer still learns of the alert.
    BackgroundAlert { speed_kmh: f64 },
}

impl MonitorEvent {
    /// Wire name of this event.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::LiveUpdate { .. } => "liveUpdate",
            Self::BackgroundAlert { .. } => "backgroundAlert",
        }
    }

    /// Converted speed carried by the event.
    pub fn speed_kmh(&self) -> f64 {
        match self {
            Self::LiveUpdate { speed_kmh } => *speed_kmh,
            Self::BackgroundAlert { speed_kmh } => *speed_kmh,
        }
    }
}

/// One-way, best-effort channel from the monitor to the UI layer.
#[derive(Clone)]
pub struct EventChannel {
    tx: broadcast::Sender<MonitorEvent>,
}

impl EventChannel {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Send an event to whoever is listening. With no subscriber
    /// attached the event is dropped.
    pub fn emit(&self, event: MonitorEvent) {
        let _ = self.tx.send(event);
    }

    /// Attach a listener.
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_shape() {
        let event = MonitorEvent::BackgroundAlert { speed_kmh: 42.5 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "backgroundAlert");
        assert_eq!(json["speedKmh"], 42.5);

        let event = MonitorEvent::LiveUpdate { speed_kmh: 3.0 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "liveUpdate");
        assert_eq!(json["speedKmh"], 3.0);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(
            MonitorEvent::LiveUpdate { speed_kmh: 0.0 }.event_name(),
            "liveUpdate"
        );
        assert_eq!(
            MonitorEvent::BackgroundAlert { speed_kmh: 0.0 }.event_name(),
            "backgroundAlert"
        );
    }

    #[test]
    fn test_emit_without_listener_is_dropped() {
        let channel = EventChannel::new(16);
        // No subscriber: emit must neither panic nor queue.
        channel.emit(MonitorEvent::LiveUpdate { speed_kmh: 1.0 });

        let mut rx = channel.subscribe();
        assert!(
            rx.try_recv().is_err(),
            "Events emitted before subscribing must not be replayed"
        );
    }

    #[test]
    fn test_alert_body_text() {
        let alert = SpeedAlertEvent::new(42.34);
        assert_eq!(alert.body(), "You are moving at 42.3 km/h");
        assert_eq!(alert.title(), "Speed alert");
    }
}
