//! SpeedMonitor - the decision loop that ties it all together
//!
//! Manages the lifecycle of a tracking session: permission request,
//! location subscription, per-sample classification against the host
//! lifecycle state, and fan-out to the notification sink and the event
//! channel.

use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

use crate::events::{EventChannel, MonitorEvent, SpeedAlertEvent};
use crate::lifecycle::{AppLifecycleState, LifecycleQuery};
use crate::notify::NotificationSink;
use crate::provider::{LocationError, LocationSource, PermissionStatus, ProviderConfig};
use crate::types::location::LocationSample;

/// Speed above which background movement triggers an alert, in km/h.
pub const SPEED_THRESHOLD_KMH: f64 = 30.0;

/// Whether a converted reading qualifies for a background alert.
/// The comparison is strict: exactly at the threshold does not alert.
pub fn exceeds_threshold(speed_kmh: f64) -> bool {
    speed_kmh > SPEED_THRESHOLD_KMH
}

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Location provider error: {0}")]
    Provider(#[from] LocationError),
}

/// Configuration for a speed monitor.
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    /// Policy handed to the location source when tracking starts.
    pub provider: ProviderConfig,
    /// Buffered capacity of the outbound event channel.
    pub event_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            event_capacity: 64,
        }
    }
}

/// Whether a tracking session is currently active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorState {
    Stopped,
    Tracking,
}

/// An active tracking session: owns the shutdown signal for the sample
/// loop. Created by `start`, destroyed by `stop`; at most one exists.
struct MonitorSession {
    id: Uuid,
    shutdown_tx: broadcast::Sender<()>,
}

/// Transforms raw location samples into alerts and live events.
///
/// All session mutation goes through one async mutex and all sample
/// handling runs on a single task per session, so `start`, `stop`, and
/// sample processing can never interleave destructively regardless of
/// how the host schedules its callbacks.
pub struct SpeedMonitor {
    source: Arc<dyn LocationSource>,
    lifecycle: Arc<dyn LifecycleQuery>,
    sink: Arc<dyn NotificationSink>,
    events: EventChannel,
    config: MonitorConfig,
    session: Mutex<Option<MonitorSession>>,
    permission: StdMutex<PermissionStatus>,
}

impl SpeedMonitor {
    /// Create a new SpeedMonitor around its three collaborators.
    pub fn new(
        source: Arc<dyn LocationSource>,
        lifecycle: Arc<dyn LifecycleQuery>,
        sink: Arc<dyn NotificationSink>,
        config: MonitorConfig,
    ) -> Arc<Self> {
        let events = EventChannel::new(config.event_capacity);
        Arc::new(Self {
            source,
            lifecycle,
            sink,
            events,
            config,
            session: Mutex::new(None),
            permission: StdMutex::new(PermissionStatus::NotDetermined),
        })
    }

    /// Attach a listener to the outbound event channel. Events emitted
    /// while nobody is subscribed are dropped, not replayed.
    pub fn events(&self) -> broadcast::Receiver<MonitorEvent> {
        self.events.subscribe()
    }

    /// The host's most recent answer to the permission request.
    /// `Denied` means tracking is silently sample-free, not failed.
    pub fn permission_status(&self) -> PermissionStatus {
        *self.permission.lock().unwrap()
    }

    pub async fn state(&self) -> MonitorState {
        if self.session.lock().await.is_some() {
            MonitorState::Tracking
        } else {
            MonitorState::Stopped
        }
    }

    /// Begin tracking: request permission, start location updates, and
    /// spawn the sample loop. Idempotent: calling while already tracking
    /// is a no-op, never a second subscription.
    pub async fn start(self: &Arc<Self>) -> Result<(), MonitorError> {
        let mut session = self.session.lock().await;
        if session.is_some() {
            log::debug!("start ignored: already tracking");
            return Ok(());
        }

        let status = self.source.request_permission().await?;
        *self.permission.lock().unwrap() = status;
        if status == PermissionStatus::Denied {
            // Tracking proceeds; the source simply never delivers.
            log::warn!("background location permission denied; no samples will arrive");
        }

        self.source.start_updates(&self.config.provider).await?;
        let mut samples = self.source.samples();

        let (shutdown_tx, _) = broadcast::channel(1);
        let mut shutdown = shutdown_tx.subscribe();
        let monitor = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = samples.recv() => {
                        match result {
                            Ok(sample) => monitor.handle_sample(sample).await,
                            Err(broadcast::error::RecvError::Lagged(missed)) => {
                                log::warn!("sample loop lagged, {} samples dropped", missed);
                            }
                            Err(broadcast::error::RecvError::Closed) => break,
                        }
                    }
                    _ = shutdown.recv() => break,
                }
            }
        });

        let id = Uuid::new_v4();
        log::info!("tracking session {} started", id);
        *session = Some(MonitorSession { id, shutdown_tx });
        Ok(())
    }

    /// Stop tracking and release the location subscription. Idempotent:
    /// calling while already stopped is a no-op.
    pub async fn stop(&self) -> Result<(), MonitorError> {
        let mut session = self.session.lock().await;
        let Some(active) = session.take() else {
            log::debug!("stop ignored: not tracking");
            return Ok(());
        };
        let _ = active.shutdown_tx.send(());
        self.source.stop_updates().await?;
        log::info!("tracking session {} stopped", active.id);
        Ok(())
    }

    /// The single decision point, run once per incoming sample.
    ///
    /// Foreground: live event only, no threshold test. Background over
    /// the threshold: notification plus a mirrored event. There is no
    /// cooldown; every qualifying sample alerts on its own.
    async fn handle_sample(&self, sample: LocationSample) {
        let speed_kmh = sample.speed_kmh();
        match self.lifecycle.current_state() {
            AppLifecycleState::Foreground => {
                self.events.emit(MonitorEvent::LiveUpdate { speed_kmh });
            }
            AppLifecycleState::Background => {
                if !exceeds_threshold(speed_kmh) {
                    return;
                }
                let alert = SpeedAlertEvent::new(speed_kmh);
                if let Err(e) = self.sink.deliver(&alert.title(), &alert.body()).await {
                    log::warn!("failed to deliver speed alert: {}", e);
                }
                self.events.emit(MonitorEvent::BackgroundAlert { speed_kmh });
            }
        }
    }
}
