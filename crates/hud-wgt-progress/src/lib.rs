//! Circular progress overlay widget.
//!
//! The widget shows a ring-shaped progress animation timed to a host supplied
//! duration, optionally with a caption, then notifies the host when the
//! animation completes. It is driven entirely by the application shell: the
//! shell routes decoded bridge signals into [`ProgressWidget::signal`], pumps
//! [`ProgressWidget::frame`] once per repaint while a frame request is
//! pending, forwards the signals drained from [`OverlayUpdates`] back through
//! the bridge and draws the [`RingFrame`] returned by
//! [`ProgressWidget::render`].
//!
//! Time never comes from the OS clock directly, the shell samples it once per
//! event-loop pass and hands the same [`UiInstant`] to every handler in that
//! pass.
//!
//! [`OverlayUpdates`]: update::OverlayUpdates
//! [`RingFrame`]: render::RingFrame
//! [`UiInstant`]: time::UiInstant

#![warn(unused_extern_crates)]
#![warn(missing_docs)]

pub mod render;
pub mod time;
pub mod update;

mod progress;
pub use progress::*;

pub use hud_bridge_api as bridge;
