//! Signal contract between the game host and the HUD overlay layer.
//!
//! The host and the overlay exchange named signals with JSON payloads over an
//! event bridge. The bridge transport is a collaborator, this crate only
//! defines the wire names, the payload types and the inbound [`SignalDispatcher`]
//! the application shell feeds raw messages into.
//!
//! The wire names and payload shapes are an interop contract with the host
//! scripting runtime, they must not change.

#![warn(unused_extern_crates)]
#![warn(missing_docs)]

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

mod dispatch;
pub use dispatch::*;

/// Wire name of the inbound signal that begins a progress run.
pub const START_PROGRESS: &str = "start-progress";

/// Wire name of the inbound signal that aborts the current progress run.
pub const CANCEL_PROGRESS: &str = "cancel-progress";

/// Wire name of the outbound signal that reports natural completion of a run.
pub const PROGRESS_COMPLETE: &str = "progress-complete";

/// Vertical placement of an overlay widget on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Centered in the viewport.
    #[default]
    Middle,
    /// Centered in the bottom band of the viewport.
    Bottom,
}

/// Payload of the [`START_PROGRESS`] signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartProgressRequest {
    /// Caption shown under the ring.
    ///
    /// Empty renders no caption.
    #[serde(default)]
    pub label: String,

    /// Total animation length in milliseconds.
    ///
    /// Not validated, zero produces an instant run.
    pub duration: u64,

    /// Vertical placement of the widget.
    #[serde(default)]
    pub position: Position,
}
impl StartProgressRequest {
    /// The animation length as a [`Duration`].
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration)
    }
}

/// An inbound signal decoded from the event bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum HostSignal {
    /// Begin a progress run.
    StartProgress(StartProgressRequest),
    /// Abort the current progress run, without completion notification.
    CancelProgress,
}
impl HostSignal {
    /// Decode a named signal and JSON payload received from the bridge.
    ///
    /// Payload-less signals accept any payload, extra fields in payloads
    /// are ignored.
    pub fn decode(name: &str, payload: &serde_json::Value) -> Result<HostSignal, SignalError> {
        match name {
            START_PROGRESS => Ok(HostSignal::StartProgress(
                serde_json::from_value(payload.clone()).map_err(SignalError::Payload)?,
            )),
            CANCEL_PROGRESS => Ok(HostSignal::CancelProgress),
            unknown => Err(SignalError::UnknownSignal(unknown.to_owned())),
        }
    }

    /// Wire name of the signal.
    pub fn name(&self) -> &'static str {
        match self {
            HostSignal::StartProgress(_) => START_PROGRESS,
            HostSignal::CancelProgress => CANCEL_PROGRESS,
        }
    }
}

/// An outbound signal produced by the overlay for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiSignal {
    /// A progress run finished naturally, the host may proceed past whatever
    /// action the indicator represented.
    ProgressComplete,
}
impl UiSignal {
    /// Wire name of the signal.
    pub fn name(self) -> &'static str {
        match self {
            UiSignal::ProgressComplete => PROGRESS_COMPLETE,
        }
    }

    /// JSON payload of the signal.
    ///
    /// Is [`serde_json::Value::Null`] for payload-less signals.
    pub fn payload(self) -> serde_json::Value {
        match self {
            UiSignal::ProgressComplete => serde_json::Value::Null,
        }
    }
}

/// Error decoding an inbound bridge signal.
#[derive(Debug)]
#[non_exhaustive]
pub enum SignalError {
    /// The signal name is not part of the contract.
    UnknownSignal(String),
    /// The payload JSON does not match the signal schema.
    Payload(serde_json::Error),
}
impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalError::UnknownSignal(name) => write!(f, "unknown signal {name:?}"),
            SignalError::Payload(e) => write!(f, "invalid signal payload, {e}"),
        }
    }
}
impl std::error::Error for SignalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SignalError::UnknownSignal(_) => None,
            SignalError::Payload(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_start_full() {
        let s = HostSignal::decode(
            START_PROGRESS,
            &json!({ "label": "Picking lock", "duration": 1000, "position": "middle" }),
        )
        .unwrap();
        assert_eq!(
            s,
            HostSignal::StartProgress(StartProgressRequest {
                label: "Picking lock".to_owned(),
                duration: 1000,
                position: Position::Middle,
            })
        );
    }

    #[test]
    fn decode_start_defaults() {
        // only `duration` is required, everything else degrades to defaults.
        let s = HostSignal::decode(START_PROGRESS, &json!({ "duration": 500 })).unwrap();
        match s {
            HostSignal::StartProgress(r) => {
                assert!(r.label.is_empty());
                assert_eq!(r.position, Position::Middle);
                assert_eq!(r.duration(), Duration::from_millis(500));
            }
            s => panic!("expected start, got {s:?}"),
        }
    }

    #[test]
    fn decode_start_bottom() {
        let s = HostSignal::decode(START_PROGRESS, &json!({ "duration": 500, "position": "bottom" })).unwrap();
        match s {
            HostSignal::StartProgress(r) => assert_eq!(r.position, Position::Bottom),
            s => panic!("expected start, got {s:?}"),
        }
    }

    #[test]
    fn decode_cancel_ignores_payload() {
        let s = HostSignal::decode(CANCEL_PROGRESS, &json!({ "unexpected": true })).unwrap();
        assert_eq!(s, HostSignal::CancelProgress);
    }

    #[test]
    fn decode_unknown() {
        let e = HostSignal::decode("open-inventory", &serde_json::Value::Null).unwrap_err();
        assert!(matches!(e, SignalError::UnknownSignal(n) if n == "open-inventory"));
    }

    #[test]
    fn decode_bad_duration() {
        let e = HostSignal::decode(START_PROGRESS, &json!({ "duration": "soon" })).unwrap_err();
        assert!(matches!(e, SignalError::Payload(_)));
    }

    #[test]
    fn complete_signal_shape() {
        assert_eq!(UiSignal::ProgressComplete.name(), PROGRESS_COMPLETE);
        assert!(UiSignal::ProgressComplete.payload().is_null());
    }
}
