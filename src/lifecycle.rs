//! Host application lifecycle state
//!
//! The monitor never owns foreground/background state; it asks the host
//! through the LifecycleQuery seam at the moment each sample is handled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Whether the host application is currently in the foreground.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppLifecycleState {
    Foreground,
    Background,
}

/// Synchronous lifecycle lookup, answered by the host environment.
pub trait LifecycleQuery: Send + Sync {
    /// The host's lifecycle state right now.
    fn current_state(&self) -> AppLifecycleState;
}

/// A shared lifecycle flag the host flips from its own callbacks.
///
/// Cheap to clone; all clones observe the same state.
#[derive(Clone)]
pub struct SharedLifecycle {
    foreground: Arc<AtomicBool>,
}

impl SharedLifecycle {
    /// Create a new flag in the given initial state.
    pub fn new(initial: AppLifecycleState) -> Self {
        Self {
            foreground: Arc::new(AtomicBool::new(initial == AppLifecycleState::Foreground)),
        }
    }

    /// Record a host lifecycle transition.
    pub fn set_state(&self, state: AppLifecycleState) {
        self.foreground
            .store(state == AppLifecycleState::Foreground, Ordering::SeqCst);
    }
}

impl LifecycleQuery for SharedLifecycle {
    fn current_state(&self) -> AppLifecycleState {
        if self.foreground.load(Ordering::SeqCst) {
            AppLifecycleState::Foreground
        } else {
            AppLifecycleState::Background
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_lifecycle_transitions() {
        let lifecycle = SharedLifecycle::new(AppLifecycleState::Foreground);
        assert_eq!(lifecycle.current_state(), AppLifecycleState::Foreground);

        lifecycle.set_state(AppLifecycleState::Background);
        assert_eq!(lifecycle.current_state(), AppLifecycleState::Background);

        // Clones observe the same flag.
        let clone = lifecycle.clone();
        clone.set_state(AppLifecycleState::Foreground);
        assert_eq!(lifecycle.current_state(), AppLifecycleState::Foreground);
    }
}
