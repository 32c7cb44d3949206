//! Inbound signal routing.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::{HostSignal, SignalError};

/// Boxed handler for decoded inbound signals.
pub type SignalHandler = Box<dyn FnMut(HostSignal) + Send>;

/// Routes raw bridge messages to registered signal handlers.
///
/// The application shell feeds every `(name, payload)` pair received from the
/// bridge transport into [`dispatch`]. Messages that fail to decode and
/// signals without a registered handler are logged and dropped, decode errors
/// never reach the handlers.
///
/// Handlers run while the registry is locked, they must not dispatch
/// recursively.
///
/// [`dispatch`]: SignalDispatcher::dispatch
#[derive(Default)]
pub struct SignalDispatcher {
    handlers: Mutex<HashMap<&'static str, SignalHandler>>,
}
impl SignalDispatcher {
    /// New dispatcher with no registered handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for the signal `name`, replacing any previous handler.
    pub fn on(&self, name: &'static str, handler: impl FnMut(HostSignal) + Send + 'static) {
        self.handlers.lock().insert(name, Box::new(handler));
    }

    /// Decode and route one raw bridge message.
    pub fn dispatch(&self, name: &str, payload: &serde_json::Value) {
        let signal = match HostSignal::decode(name, payload) {
            Ok(s) => s,
            Err(e @ SignalError::UnknownSignal(_)) => {
                tracing::error!("dropped bridge message, {e}");
                return;
            }
            Err(e) => {
                tracing::error!("dropped {name:?} message, {e}");
                return;
            }
        };
        let mut handlers = self.handlers.lock();
        match handlers.get_mut(signal.name()) {
            Some(handler) => handler(signal),
            None => tracing::debug!("no handler for {name:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CANCEL_PROGRESS, START_PROGRESS};

    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use serde_json::json;

    #[test]
    fn routes_to_handler() {
        let dispatcher = SignalDispatcher::new();
        let starts = Arc::new(AtomicUsize::new(0));

        let count = Arc::clone(&starts);
        dispatcher.on(START_PROGRESS, move |s| {
            assert!(matches!(s, HostSignal::StartProgress(_)));
            count.fetch_add(1, Ordering::Relaxed);
        });

        dispatcher.dispatch(START_PROGRESS, &json!({ "duration": 100 }));
        dispatcher.dispatch(START_PROGRESS, &json!({ "duration": 100 }));
        assert_eq!(starts.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn bad_messages_are_dropped() {
        let dispatcher = SignalDispatcher::new();
        let called = Arc::new(AtomicUsize::new(0));

        let count = Arc::clone(&called);
        dispatcher.on(START_PROGRESS, move |_| {
            count.fetch_add(1, Ordering::Relaxed);
        });

        // unknown name and malformed payload must not panic nor reach handlers.
        dispatcher.dispatch("open-inventory", &serde_json::Value::Null);
        dispatcher.dispatch(START_PROGRESS, &json!({ "duration": "soon" }));
        assert_eq!(called.load(Ordering::Relaxed), 0);

        // unhandled but valid signal is dropped too.
        dispatcher.dispatch(CANCEL_PROGRESS, &serde_json::Value::Null);
    }
}
