//! demos/overspeed_demo.rs
//!
//! A demo app that drives the speed monitor over the simulated location
//! service: foreground live updates, a backgrounded speeding stretch
//! with notifications, then a clean stop.
//!
//! Run with:
//!   cargo run --example overspeed_demo

use std::sync::Arc;
use std::time::Duration;

use speedwatch::provider::simulated::SimLocationService;
use speedwatch::{
    AppLifecycleState, LocationSource, LogNotificationSink, MonitorConfig, SharedLifecycle,
    SpeedMonitor,
};
use tokio::time::sleep;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let service = SimLocationService::new();
    let lifecycle = SharedLifecycle::new(AppLifecycleState::Foreground);
    let monitor = SpeedMonitor::new(
        Arc::clone(&service) as Arc<dyn LocationSource>,
        Arc::new(lifecycle.clone()),
        Arc::new(LogNotificationSink),
        MonitorConfig::default(),
    );

    // Print everything the UI layer would see.
    let mut events = monitor.events();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => println!("[Event] {}", json),
                Err(e) => eprintln!("Failed to encode event: {}", e),
            }
        }
    });

    monitor.start().await?;
    println!("Tracking started (permission: {:?})", monitor.permission_status());

    // Foreground: a few city-driving samples.
    for speed_mps in [3.0, 8.0, 12.5] {
        println!("[Local] Foreground sample: {:.1} m/s", speed_mps);
        service.push_sample(speed_mps);
        sleep(Duration::from_millis(500)).await;
    }

    // App goes to the background; the device keeps moving fast.
    println!("[Local] App backgrounded");
    lifecycle.set_state(AppLifecycleState::Background);
    for speed_mps in [12.5, 14.0, 6.0] {
        println!("[Local] Background sample: {:.1} m/s", speed_mps);
        service.push_sample(speed_mps);
        sleep(Duration::from_millis(500)).await;
    }

    monitor.stop().await?;
    println!("Tracking stopped");
    Ok(())
}
