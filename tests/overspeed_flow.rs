//! Full-lifecycle overspeed monitoring test
//!
//! Drives a monitor through a realistic trip over the simulated location
//! service: a foreground warm-up, a backgrounded speeding stretch, a
//! stop, and a fresh restart.
//!
//! Run with:
//!   cargo test --test overspeed_flow

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use speedwatch::provider::simulated::SimLocationService;
use speedwatch::{
    AppLifecycleState, LocationSource, MonitorConfig, MonitorEvent, MonitorState,
    NotificationSink, NotifyError, SharedLifecycle, SpeedMonitor,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingSink {
    bodies: Mutex<Vec<String>>,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, _title: &str, body: &str) -> Result<(), NotifyError> {
        self.bodies.lock().unwrap().push(body.to_string());
        Ok(())
    }
}

struct Trip {
    monitor: Arc<SpeedMonitor>,
    service: Arc<SimLocationService>,
    lifecycle: SharedLifecycle,
    sink: Arc<RecordingSink>,
    events: broadcast::Receiver<MonitorEvent>,
}

fn make_trip() -> Trip {
    let service = SimLocationService::new();
    let lifecycle = SharedLifecycle::new(AppLifecycleState::Foreground);
    let sink = Arc::new(RecordingSink::default());
    let monitor = SpeedMonitor::new(
        Arc::clone(&service) as Arc<dyn LocationSource>,
        Arc::new(lifecycle.clone()),
        Arc::clone(&sink) as Arc<dyn NotificationSink>,
        MonitorConfig::default(),
    );
    let events = monitor.events();
    Trip {
        monitor,
        service,
        lifecycle,
        sink,
        events,
    }
}

async fn next_event(rx: &mut broadcast::Receiver<MonitorEvent>) -> MonitorEvent {
    tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("expected an event")
        .expect("event channel closed")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_full_trip_lifecycle() {
    let mut trip = make_trip();
    trip.monitor.start().await.unwrap();
    assert_eq!(trip.monitor.state().await, MonitorState::Tracking);

    // Foreground warm-up: live updates only, whatever the speed.
    trip.service.push_sample(2.0); // walking pace
    trip.service.push_sample(15.0); // 54 km/h, but foreground
    assert_eq!(next_event(&mut trip.events).await.event_name(), "liveUpdate");
    assert_eq!(next_event(&mut trip.events).await.event_name(), "liveUpdate");
    assert!(trip.sink.bodies.lock().unwrap().is_empty());

    // App goes to the background and the device keeps speeding.
    trip.lifecycle.set_state(AppLifecycleState::Background);
    trip.service.push_sample(15.0); // 54 km/h
    trip.service.push_sample(16.0); // 57.6 km/h

    let first = next_event(&mut trip.events).await;
    let second = next_event(&mut trip.events).await;
    assert_eq!(first.event_name(), "backgroundAlert");
    assert_eq!(second.event_name(), "backgroundAlert");
    assert_eq!(
        trip.sink.bodies.lock().unwrap().len(),
        2,
        "Sustained speeding alerts once per sample"
    );

    // Slowing down in the background goes quiet.
    trip.service.push_sample(5.0); // 18 km/h
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(trip.events.try_recv().is_err());

    trip.monitor.stop().await.unwrap();
    assert_eq!(trip.monitor.state().await, MonitorState::Stopped);
    assert!(!trip.service.is_updating());
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_stop_creates_fresh_session() {
    let mut trip = make_trip();

    trip.monitor.start().await.unwrap();
    trip.monitor.stop().await.unwrap();

    trip.monitor.start().await.unwrap();
    assert_eq!(trip.monitor.state().await, MonitorState::Tracking);
    assert_eq!(
        trip.service.start_count(),
        2,
        "Each start/stop cycle reconfigures the source once"
    );

    trip.service.push_sample(10.0);
    let event = next_event(&mut trip.events).await;
    assert_eq!(event, MonitorEvent::LiveUpdate { speed_kmh: 36.0 });
}

#[tokio::test(start_paused = true)]
async fn test_events_without_listener_are_dropped() {
    let trip = make_trip();
    drop(trip.events);

    trip.monitor.start().await.unwrap();
    trip.lifecycle.set_state(AppLifecycleState::Background);
    trip.service.push_sample(20.0); // 72 km/h
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The notification is the durable path; the channel is only a hint.
    assert_eq!(trip.sink.bodies.lock().unwrap().len(), 1);

    let mut late = trip.monitor.events();
    assert!(
        late.try_recv().is_err(),
        "A late subscriber must not see replayed events"
    );
}
