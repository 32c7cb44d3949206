use std::{
    num::NonZeroU32,
    sync::atomic::{AtomicU32, Ordering},
    time::Duration,
};

use hud_bridge_api::{HostSignal, Position, StartProgressRequest, UiSignal};

use crate::{
    time::{Deadline, TimeUnits, UiInstant},
    update::OverlayUpdates,
};

/// Unique identity of one progress run.
///
/// IDs are unique for the process duration, a queued callback that carries the
/// ID of a superseded run is detected and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(NonZeroU32);
impl RunId {
    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        loop {
            // zero only after the counter wraps the entire u32 space.
            if let Some(id) = NonZeroU32::new(NEXT.fetch_add(1, Ordering::Relaxed)) {
                return RunId(id);
            }
        }
    }

    /// The underlying value.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Progress overlay state observed by the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    /// Whether the widget is rendered.
    pub visible: bool,
    /// Displayed progress, in `0..=100`.
    pub percent: u8,
    /// Caption under the ring, possibly empty.
    pub label: String,
    /// Target animation length of the run.
    pub duration: Duration,
    /// Vertical placement on screen.
    pub position: Position,
}
impl ProgressState {
    fn hidden() -> Self {
        ProgressState {
            visible: false,
            percent: 0,
            label: String::new(),
            duration: Duration::ZERO,
            position: Position::Middle,
        }
    }
}

/// Defines when a finished run hides and notifies the host.
///
/// Which variant the host expects is part of the host contract, the shell
/// selects it at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletePolicy {
    /// Keep the full ring on screen for the delay, then hide and notify.
    HideDelay(Duration),
    /// Hide immediately so the toolkit exit transition plays, notify when the
    /// shell reports the transition finished with [`ProgressWidget::exit_done`].
    ExitTransition,
}
impl Default for CompletePolicy {
    /// `HideDelay` of 300ms.
    fn default() -> Self {
        CompletePolicy::HideDelay(300.ms())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Completing { hide: Option<Deadline> },
}

#[derive(Debug, Clone, Copy)]
struct Run {
    id: RunId,
    started: UiInstant,
}

/// Circular progress indicator widget.
///
/// Drives a time-based progress animation and reports completion. At most one
/// run is active at a time, a start signal received while a run is active is
/// dropped. The machine is reusable indefinitely.
///
/// All operations are infallible, malformed input degrades instead of
/// erroring: a zero duration produces an instant run, an empty label renders
/// no caption.
#[derive(Debug)]
pub struct ProgressWidget {
    state: ProgressState,
    phase: Phase,
    run: Option<Run>,
    policy: CompletePolicy,
}
impl Default for ProgressWidget {
    fn default() -> Self {
        Self::new(CompletePolicy::default())
    }
}
impl ProgressWidget {
    /// New idle widget with the completion `policy`.
    pub fn new(policy: CompletePolicy) -> Self {
        ProgressWidget {
            state: ProgressState::hidden(),
            phase: Phase::Idle,
            run: None,
            policy,
        }
    }

    /// The current overlay state.
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// The completion policy.
    pub fn policy(&self) -> CompletePolicy {
        self.policy
    }

    /// Identity of the active run, `None` when idle.
    ///
    /// A run stays active through its exit transition, only after the
    /// completion notification is queued (or on cancel) the widget is idle
    /// again.
    pub fn active_run(&self) -> Option<RunId> {
        self.run.map(|r| r.id)
    }

    /// Route a decoded inbound signal.
    pub fn signal(&mut self, signal: HostSignal, now: UiInstant, updates: &mut OverlayUpdates) {
        match signal {
            HostSignal::StartProgress(request) => self.start(request, now, updates),
            HostSignal::CancelProgress => self.cancel(),
        }
    }

    /// Begin a run.
    ///
    /// Dropped silently if a run is already active. Otherwise resets the full
    /// state from the `request`, captures `now` as the run start and requests
    /// the first animation frame.
    pub fn start(&mut self, request: StartProgressRequest, now: UiInstant, updates: &mut OverlayUpdates) {
        if !matches!(self.phase, Phase::Idle) {
            tracing::debug!("dropped start-progress, a run is already active");
            return;
        }

        let id = RunId::next();
        tracing::debug!("progress run {} started, {:?}", id.get(), request.duration());

        let duration = request.duration();
        self.state = ProgressState {
            visible: true,
            percent: 0,
            label: request.label,
            duration,
            position: request.position,
        };
        self.phase = Phase::Running;
        self.run = Some(Run { id, started: now });
        updates.request_frame();
    }

    /// Abort the current run.
    ///
    /// Snaps the displayed percent to 99, the almost-done snap signals
    /// interruption rather than success, and hides the widget synchronously.
    /// The completion notification for the aborted run is never emitted.
    /// No-op when idle.
    pub fn cancel(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        tracing::debug!("progress run {} cancelled", run.id.get());

        self.state.percent = 99;
        self.state.visible = false;
        self.phase = Phase::Idle;
    }

    /// Animation frame tick.
    ///
    /// The shell calls this once before the next repaint after a frame request
    /// was taken. Updates the displayed percent from the wall-clock time
    /// elapsed since the run started, so the animation catches up after
    /// stalled frames instead of slowing down. A tick that outlives its run
    /// is a no-op.
    pub fn frame(&mut self, now: UiInstant, updates: &mut OverlayUpdates) {
        match self.phase {
            Phase::Idle => {}
            Phase::Running => {
                let Some(run) = self.run else {
                    return;
                };
                let elapsed = now.saturating_duration_since(run.started);
                self.state.percent = percent_at(elapsed, self.state.duration);

                if self.state.percent < 100 {
                    updates.request_frame();
                } else {
                    self.complete(now, updates);
                }
            }
            Phase::Completing { hide: Some(deadline) } => {
                if deadline.has_elapsed(now) {
                    self.state.visible = false;
                    self.finish(updates);
                } else {
                    updates.request_frame();
                }
            }
            // waiting on the exit transition report.
            Phase::Completing { hide: None } => {}
        }
    }

    /// Exit transition finished report, for the [`CompletePolicy::ExitTransition`] policy.
    ///
    /// The shell calls this when the toolkit reports the fade-out of the `run`
    /// finished, the queued completion notification is only released here.
    /// Reports for a superseded run are ignored.
    pub fn exit_done(&mut self, run: RunId, updates: &mut OverlayUpdates) {
        if !matches!(self.phase, Phase::Completing { hide: None }) {
            return;
        }
        match self.run {
            Some(r) if r.id == run => self.finish(updates),
            _ => tracing::debug!("ignored exit report for superseded run {}", run.get()),
        }
    }

    fn complete(&mut self, now: UiInstant, updates: &mut OverlayUpdates) {
        match self.policy {
            CompletePolicy::HideDelay(delay) => {
                self.phase = Phase::Completing {
                    hide: Some(Deadline::after(now, delay)),
                };
                updates.request_frame();
            }
            CompletePolicy::ExitTransition => {
                self.state.visible = false;
                self.phase = Phase::Completing { hide: None };
            }
        }
    }

    fn finish(&mut self, updates: &mut OverlayUpdates) {
        if let Some(run) = self.run.take() {
            tracing::debug!("progress run {} completed", run.id.get());
        }
        self.phase = Phase::Idle;
        updates.emit(UiSignal::ProgressComplete);
    }
}

/// `floor(min(elapsed/duration, 1) * 100)`, with the degenerate zero duration
/// reading as already complete.
fn percent_at(elapsed: Duration, duration: Duration) -> u8 {
    if duration.is_zero() {
        return 100;
    }
    let factor = (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0);
    (factor * 100.0).floor() as u8
}
