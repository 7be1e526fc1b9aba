//! Core environment context trait for replay scheduling.

use async_trait::async_trait;
use std::time::Duration;

/// The central interface for time interaction.
///
/// This trait abstracts the clock so the replay scheduler can run in both
/// production and test environments.
///
/// # Implementations
///
/// - **Production**: `TokioContext` - wraps `Instant` / `tokio::time`
/// - **Tests / instant replay**: `VirtualClock` - a manually advanced clock
///
/// # Determinism
///
/// Frame deadlines are absolute offsets from context creation, so a
/// virtual implementation replays a schedule without wall-clock delay
/// while preserving frame order and nominal fire times.
#[async_trait]
pub trait MailGridContext: Send + Sync + 'static {
    /// Returns the elapsed time since context creation.
    ///
    /// In a virtual implementation, this is the virtual clock time.
    fn now(&self) -> Duration;

    /// Suspends execution for the given duration.
    ///
    /// In production: wraps `tokio::time::sleep`
    /// In a virtual implementation: advances the virtual clock
    async fn sleep(&self, duration: Duration);
}
