//! Per-pass update requests.

use hud_bridge_api::UiSignal;

/// Requests collected from widget handlers during one event-loop pass.
///
/// Handlers never call into the host directly, they record requests here and
/// the shell drains them at the end of the pass: a pending frame request goes
/// to the host frame-scheduling primitive, queued signals go out through the
/// event bridge.
#[derive(Debug, Default)]
pub struct OverlayUpdates {
    frame: bool,
    signals: Vec<UiSignal>,
}
impl OverlayUpdates {
    /// New with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request one frame callback before the next repaint.
    pub fn request_frame(&mut self) {
        self.frame = true;
    }

    /// Queue an outbound signal for the host.
    pub fn emit(&mut self, signal: UiSignal) {
        self.signals.push(signal);
    }

    /// Returns `true` if a frame request or an outbound signal is pending.
    pub fn is_pending(&self) -> bool {
        self.frame || !self.signals.is_empty()
    }

    /// Take the pending frame request, if any.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame)
    }

    /// Drain the queued outbound signals in emission order.
    pub fn drain_signals(&mut self) -> std::vec::Drain<'_, UiSignal> {
        self.signals.drain(..)
    }
}
