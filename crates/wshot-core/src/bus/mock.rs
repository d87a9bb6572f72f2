//! Scripted bus double for tests.
//!
//! Responses are queued per method name and consumed in order, so a
//! `GetFrameRect` reply can be scripted once per window. All calls are
//! recorded for assertion.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::errors::BusError;
use super::types::{Bus, BusCall};

#[derive(Default)]
pub struct MockBus {
    responses: Mutex<HashMap<String, VecDeque<Result<String, BusError>>>>,
    calls: Mutex<Vec<BusCall>>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply for the given method.
    pub fn push_reply(&self, method: &str, reply: impl Into<String>) {
        self.responses
            .lock()
            .expect("mock bus poisoned")
            .entry(method.to_string())
            .or_default()
            .push_back(Ok(reply.into()));
    }

    /// Queue a failure for the given method.
    pub fn push_error(&self, method: &str, error: BusError) {
        self.responses
            .lock()
            .expect("mock bus poisoned")
            .entry(method.to_string())
            .or_default()
            .push_back(Err(error));
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<BusCall> {
        self.calls.lock().expect("mock bus poisoned").clone()
    }
}

impl Bus for MockBus {
    fn call(&self, call: &BusCall) -> Result<String, BusError> {
        self.calls
            .lock()
            .expect("mock bus poisoned")
            .push(call.clone());

        self.responses
            .lock()
            .expect("mock bus poisoned")
            .get_mut(call.method())
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(BusError::CallFailed {
                    method: call.method().to_string(),
                    message: "no scripted reply".to_string(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replies_consumed_in_order() {
        let bus = MockBus::new();
        bus.push_reply("a.b.C", "first");
        bus.push_reply("a.b.C", "second");

        let call = BusCall::new("a", "/b", "a.b.C");
        assert_eq!(bus.call(&call).unwrap(), "first");
        assert_eq!(bus.call(&call).unwrap(), "second");
        assert!(bus.call(&call).is_err());
    }

    #[test]
    fn test_unscripted_method_fails() {
        let bus = MockBus::new();
        let call = BusCall::new("a", "/b", "a.b.Unknown");
        let err = bus.call(&call).unwrap_err();
        assert!(err.to_string().contains("no scripted reply"));
    }

    #[test]
    fn test_calls_are_recorded() {
        let bus = MockBus::new();
        bus.push_reply("a.b.C", "ok");

        let call = BusCall::new("a", "/b", "a.b.C").arg(7);
        let _ = bus.call(&call);

        let recorded = bus.calls();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].args(), &["7".to_string()]);
    }

    #[test]
    fn test_scripted_error_is_returned() {
        let bus = MockBus::new();
        bus.push_error(
            "a.b.C",
            BusError::Timeout {
                method: "a.b.C".to_string(),
                timeout_ms: 10,
            },
        );

        let call = BusCall::new("a", "/b", "a.b.C");
        assert!(matches!(
            bus.call(&call),
            Err(BusError::Timeout { timeout_ms: 10, .. })
        ));
    }
}
