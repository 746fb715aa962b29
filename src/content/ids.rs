use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::clock::Clock;

/// Generates `<prefix>_<millis>` ids that never repeat within one generator.
///
/// Two creations in the same millisecond (or after the clock steps back)
/// get `previous + 1` instead of the clock reading.
pub struct IdGenerator {
    last: AtomicI64,
    clock: Arc<dyn Clock>,
}

impl IdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            last: AtomicI64::new(0),
            clock,
        }
    }

    pub fn next(&self, prefix: &str) -> String {
        let now = self.clock.now_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);

        format!("{}_{}", prefix, now.max(previous + 1))
    }
}
