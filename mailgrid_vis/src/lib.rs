//! MailGrid Replay Harness
//!
//! Drives a loaded playback record through the [`mailgrid_core`] playback
//! driver on a schedule: frame k fires at `k * speed` seconds. The whole
//! timer list is materialized up front (the original visualizer scheduled
//! every frame eagerly with independent timeouts), then walked in deadline
//! order against a [`mailgrid_env::MailGridContext`] clock.
//!
//! With [`VirtualClock`], a replay completes instantly and
//! deterministically, which is how the scheduler is tested.

pub mod clock;
pub mod schedule;

pub use clock::VirtualClock;
pub use schedule::{FrameTimer, ReplaySchedule};
