//! One-shot result delivery between a worker and the submitting caller.

use crate::error::{Error, Result};
use crossbeam_channel::{bounded, Receiver, Sender};

/// Create a connected producer/consumer pair for a single task outcome.
pub(crate) fn result_channel<T>() -> (ResultSlot<T>, JoinHandle<T>) {
    let (tx, rx) = bounded(1);
    (ResultSlot { tx }, JoinHandle { rx })
}

/// Producer half of the result channel, owned by the queued task.
///
/// Write-once: fulfilling consumes the slot.
#[derive(Debug)]
pub(crate) struct ResultSlot<T> {
    tx: Sender<Result<T>>,
}

impl<T> ResultSlot<T> {
    /// Deliver the task's outcome. The caller may have discarded its handle;
    /// a closed channel is not an error here.
    pub(crate) fn fulfill(self, outcome: Result<T>) {
        let _ = self.tx.send(outcome);
    }
}

/// Consumer half of the result channel, returned to the caller at
/// submission time.
#[derive(Debug)]
pub struct JoinHandle<T> {
    rx: Receiver<Result<T>>,
}

impl<T> JoinHandle<T> {
    /// Block until the task completes, then return its value or re-raise the
    /// failure captured during execution.
    ///
    /// Consumes the handle: a task outcome can be read exactly once, and a
    /// second read is a compile error rather than stale data.
    pub fn get(self) -> Result<T> {
        match self.rx.recv() {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::ResultDropped),
        }
    }

    /// Whether an outcome is already waiting, making `get` non-blocking.
    pub fn is_finished(&self) -> bool {
        !self.rx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fulfill_then_get() {
        let (slot, handle) = result_channel();
        slot.fulfill(Ok(42));

        assert!(handle.is_finished());
        assert_eq!(handle.get().unwrap(), 42);
    }

    #[test]
    fn test_dropped_slot_is_reported() {
        let (slot, handle) = result_channel::<i32>();
        drop(slot);

        assert!(matches!(handle.get(), Err(Error::ResultDropped)));
    }

    #[test]
    fn test_get_blocks_until_fulfilled() {
        let (slot, handle) = result_channel();

        let producer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            slot.fulfill(Ok("done"));
        });

        assert_eq!(handle.get().unwrap(), "done");
        producer.join().unwrap();
    }

    #[test]
    fn test_failure_is_re_raised() {
        let (slot, handle) = result_channel::<u8>();
        slot.fulfill(Err(Error::TaskPanicked("boom".to_string())));

        match handle.get() {
            Err(Error::TaskPanicked(msg)) => assert_eq!(msg, "boom"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
