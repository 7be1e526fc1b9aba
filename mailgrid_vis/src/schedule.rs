//! Replay scheduler: fires each frame at its nominal time.

use mailgrid_core::playback::{PlaybackState, RobotVisual};
use mailgrid_core::{GridConfig, Record, VisError};
use mailgrid_env::MailGridContext;
use std::time::Duration;
use tracing::debug;

/// A single scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTimer {
    /// Absolute deadline, measured from replay start
    pub at: Duration,

    /// Frame index to apply at the deadline
    pub frame: usize,
}

/// The full timer list for a replay.
///
/// Every frame's deadline exists before the first one fires; frame k is
/// due at `k * speed` seconds. Timers fire in deadline order on whatever
/// single task runs the replay, so frames never apply concurrently or out
/// of order even if the host clock falls behind.
#[derive(Debug, Clone)]
pub struct ReplaySchedule {
    timers: Vec<FrameTimer>,
}

impl ReplaySchedule {
    /// Eagerly builds the deadline for every frame of a record.
    ///
    /// The deadline arithmetic requires a finite, non-negative speed;
    /// anything else is rejected up front.
    pub fn build(frame_count: usize, config: &GridConfig) -> Result<Self, VisError> {
        config.validate()?;
        let timers = (0..frame_count)
            .map(|frame| FrameTimer {
                at: Duration::from_secs_f64(frame as f64 * config.speed),
                frame,
            })
            .collect();
        Ok(Self { timers })
    }

    /// The scheduled timers in fire order.
    pub fn timers(&self) -> &[FrameTimer] {
        &self.timers
    }

    /// Runs the replay to completion.
    ///
    /// Sleeps through the context until each deadline, then applies the
    /// frame. A deadline already in the past is applied immediately.
    pub async fn run<C, V>(
        &self,
        ctx: &C,
        state: &mut PlaybackState<V>,
        record: &Record,
        config: &GridConfig,
    ) -> Result<(), VisError>
    where
        C: MailGridContext,
        V: RobotVisual,
    {
        for timer in &self.timers {
            let now = ctx.now();
            if timer.at > now {
                ctx.sleep(timer.at - now).await;
            }
            state.advance(record, timer.frame, config)?;
            debug!(
                "frame {} applied at t={:.2}s",
                timer.frame,
                ctx.now().as_secs_f64()
            );
        }
        Ok(())
    }
}
