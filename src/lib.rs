//! speedwatch - background overspeed monitoring
//!
//! A host-agnostic core for detecting when a device is moving above a
//! fixed speed threshold while the owning application is backgrounded.
//! A location source pushes raw samples in; the monitor converts them to
//! km/h, reads the host lifecycle state at that moment, and fans out to
//! two collaborators: a notification sink (background alerts) and a live
//! event channel (foreground updates, plus a copy of every alert).
//!
//! Everything OS-facing is a trait seam, so the crate runs identically
//! against real platform services or the in-process simulated source:
//!
//! ```text
//! LocationSource ──samples──▶ SpeedMonitor ──▶ NotificationSink
//!                                  │   ▲
//!                                  ▼   │ current_state()
//!                            EventChannel   LifecycleQuery
//! ```
//!
//! See `SpeedMonitor` for the lifecycle and the decision rule.

pub mod events;
pub mod lifecycle;
pub mod monitor;
pub mod notify;
pub mod provider;
pub mod types;

pub use events::{EventChannel, MonitorEvent, SpeedAlertEvent};
pub use lifecycle::{AppLifecycleState, LifecycleQuery, SharedLifecycle};
pub use monitor::{MonitorConfig, MonitorError, MonitorState, SpeedMonitor, SPEED_THRESHOLD_KMH};
pub use notify::{LogNotificationSink, NotificationSink, NotifyError};
pub use provider::{
    Accuracy, LocationError, LocationSource, PermissionStatus, ProviderConfig,
};
pub use types::location::LocationSample;
