//! Location source abstraction
//!
//! Defines the abstract location interface that both the simulated
//! source and real platform (Core Location / fused provider) bindings
//! conform to. Accuracy and update-frequency policy travel with
//! `ProviderConfig`; they are configuration for the source, not part of
//! the monitoring decision logic.

pub mod simulated;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

use crate::types::location::LocationSample;

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("Permission request failed: {0}")]
    PermissionRequestFailed(String),

    #[error("Location provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Subscription error: {0}")]
    SubscriptionError(String),
}

/// Outcome of asking the host OS for foreground+background location
/// permission. `Denied` is an ordinary, queryable state; the practical
/// effect is that no samples ever arrive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    NotDetermined,
    Granted,
    Denied,
}

/// Positioning accuracy requested from the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accuracy {
    /// Highest accuracy the hardware offers; intended for movement tracking.
    BestForNavigation,
    Balanced,
    LowPower,
}

/// Update policy handed to the source when tracking starts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub accuracy: Accuracy,
    /// Minimum movement in meters before a new sample fires.
    pub distance_filter_m: f64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::BestForNavigation,
            distance_filter_m: 10.0,
        }
    }
}

/// A source of location samples.
///
/// Implementations include the in-process `SimLocationService` and
/// platform bindings over the host OS location services. Obtaining a
/// receiver from `samples()` is the subscription; dropping it
/// unsubscribes.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Ask the host for foreground+background location permission.
    /// The returned status is the host's answer, not an error path.
    async fn request_permission(&self) -> Result<PermissionStatus, LocationError>;

    /// Begin delivering samples under the given policy.
    /// Starting an already-started source reconfigures it; it never
    /// results in duplicate delivery.
    async fn start_updates(&self, config: &ProviderConfig) -> Result<(), LocationError>;

    /// Stop delivering samples. No-op when already stopped.
    async fn stop_updates(&self) -> Result<(), LocationError>;

    /// Subscribe to the sample stream.
    fn samples(&self) -> broadcast::Receiver<LocationSample>;
}
