//! Debounce bookkeeping for the search input.

/// Tracks the pending commit for a rapidly-changing value. Each `input`
/// replaces the pending value and pushes the deadline out by the quiet
/// interval; `poll` releases the value only once the deadline has passed.
///
/// Correctness does not depend on timer cancellation: a timer scheduled for
/// a superseded input polls before the new deadline and commits nothing.
/// Cancelling stale timers is still worthwhile to avoid dead wakeups, and
/// the owning component must cancel the live one on teardown.
#[derive(Clone, Debug)]
pub struct Debounce {
    quiet_ms: u64,
    pending: Option<(u64, String)>,
}

impl Debounce {
    pub fn new(quiet_ms: u64) -> Debounce {
        Debounce {
            quiet_ms,
            pending: None,
        }
    }

    pub fn quiet_ms(&self) -> u64 {
        self.quiet_ms
    }

    pub fn input(&mut self, now_ms: u64, value: &str) {
        self.pending = Some((now_ms + self.quiet_ms, value.to_string()));
    }

    /// Takes the pending value if its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<String> {
        match &self.pending {
            Some((deadline, _)) if now_ms >= *deadline => {
                self.pending.take().map(|(_, value)| value)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
