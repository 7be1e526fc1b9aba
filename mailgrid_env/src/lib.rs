//! MailGrid Environment Abstraction Layer
//!
//! The replay scheduler only ever talks to a clock through the
//! [`MailGridContext`] trait, so playback can run against real time in
//! production and a virtual clock in tests.
//!
//! # Example
//!
//! ```ignore
//! use mailgrid_env::{MailGridContext, TokioContext};
//!
//! async fn wait_one_frame<Ctx: MailGridContext>(ctx: &Ctx) {
//!     ctx.sleep(Duration::from_millis(500)).await;
//! }
//! ```

mod context;
mod tokio_impl;

pub use context::MailGridContext;
pub use tokio_impl::TokioContext;
