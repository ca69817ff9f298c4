//! In-process location source simulator
//!
//! Provides a simulated location service where tests and demos push
//! samples by hand. Delivery honors the same gating a real platform
//! source has: nothing arrives before `start_updates`, after
//! `stop_updates`, or when permission was denied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{LocationError, LocationSource, PermissionStatus, ProviderConfig};
use crate::types::location::LocationSample;

/// A simulated location service backed by a broadcast channel.
pub struct SimLocationService {
    sample_tx: broadcast::Sender<LocationSample>,
    /// The answer this service gives to permission requests.
    permission_response: Mutex<PermissionStatus>,
    /// Last status actually handed out by `request_permission`.
    granted: Mutex<PermissionStatus>,
    updating: AtomicBool,
    /// How many times `start_updates` actually (re)configured delivery.
    start_count: Mutex<u32>,
    /// Policy received on the most recent `start_updates`.
    active_config: Mutex<Option<ProviderConfig>>,
}

impl SimLocationService {
    /// Create a service that will grant permission when asked.
    pub fn new() -> Arc<Self> {
        let (sample_tx, _) = broadcast::channel(64);
        Arc::new(Self {
            sample_tx,
            permission_response: Mutex::new(PermissionStatus::Granted),
            granted: Mutex::new(PermissionStatus::NotDetermined),
            updating: AtomicBool::new(false),
            start_count: Mutex::new(0),
            active_config: Mutex::new(None),
        })
    }

    /// Configure the answer future permission requests receive.
    pub fn set_permission_response(&self, response: PermissionStatus) {
        *self.permission_response.lock().unwrap() = response;
    }

    /// Push a raw reading into the simulated service.
    ///
    /// Delivered only while updates are active and permission was
    /// granted, the same silence a real denied or stopped source produces.
    /// Returns whether the sample was delivered to the stream.
    pub fn push_sample(&self, speed_mps: f64) -> bool {
        if !self.updating.load(Ordering::SeqCst) {
            return false;
        }
        if *self.granted.lock().unwrap() != PermissionStatus::Granted {
            return false;
        }
        self.sample_tx.send(LocationSample::new(speed_mps)).is_ok()
    }

    /// Whether the service is currently delivering samples.
    pub fn is_updating(&self) -> bool {
        self.updating.load(Ordering::SeqCst)
    }

    /// How many times delivery was (re)configured via `start_updates`.
    pub fn start_count(&self) -> u32 {
        *self.start_count.lock().unwrap()
    }

    /// The policy received on the most recent `start_updates`, if any.
    pub fn active_config(&self) -> Option<ProviderConfig> {
        self.active_config.lock().unwrap().clone()
    }
}

#[async_trait]
impl LocationSource for SimLocationService {
    async fn request_permission(&self) -> Result<PermissionStatus, LocationError> {
        let response = *self.permission_response.lock().unwrap();
        *self.granted.lock().unwrap() = response;
        Ok(response)
    }

    async fn start_updates(&self, config: &ProviderConfig) -> Result<(), LocationError> {
        self.updating.store(true, Ordering::SeqCst);
        *self.start_count.lock().unwrap() += 1;
        *self.active_config.lock().unwrap() = Some(config.clone());
        Ok(())
    }

    async fn stop_updates(&self) -> Result<(), LocationError> {
        self.updating.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn samples(&self) -> broadcast::Receiver<LocationSample> {
        self.sample_tx.subscribe()
    }
}
