//! Shared FIFO task queue with blocking removal.

use super::task::Task;
use crate::error::{Error, Result};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

/// Unbounded FIFO shared between the pool and its workers.
///
/// The interior is mutated only under the mutex. The stop flag is atomic,
/// but `close` sets it while holding the mutex: a worker that checked the
/// predicate and is about to sleep cannot miss the transition.
pub(crate) struct TaskQueue {
    tasks: Mutex<VecDeque<Task>>,
    ready: Condvar,
    stopped: AtomicBool,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
            ready: Condvar::new(),
            stopped: AtomicBool::new(false),
        }
    }

    /// Append a task and wake one waiting worker.
    ///
    /// Fails with `PoolStopped` once `close` has run. The flag is checked
    /// under the queue mutex, so a push racing with `close` is either
    /// accepted (and later drained) or rejected, never lost.
    pub fn push(&self, task: Task) -> Result<()> {
        let mut tasks = self.tasks.lock();
        if self.stopped.load(Ordering::Acquire) {
            return Err(Error::PoolStopped);
        }
        tasks.push_back(task);
        drop(tasks);

        self.ready.notify_one();
        Ok(())
    }

    /// Block until a task is available or the queue is closed and empty.
    ///
    /// A closed queue still hands out its backlog; `None` means both
    /// "stopped" and "nothing left to drain".
    pub fn wait_and_pop(&self) -> Option<Task> {
        let mut tasks = self.tasks.lock();
        loop {
            if let Some(task) = tasks.pop_front() {
                return Some(task);
            }
            if self.stopped.load(Ordering::Acquire) {
                return None;
            }
            self.ready.wait(&mut tasks);
        }
    }

    /// Mark the queue stopped and wake every waiter. Idempotent.
    ///
    /// Broadcast rather than single wake: each blocked worker must
    /// re-evaluate the exit predicate for itself.
    pub fn close(&self) {
        let tasks = self.tasks.lock();
        self.stopped.store(true, Ordering::Release);
        drop(tasks);

        self.ready.notify_all();
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_pop_preserves_push_order() {
        let queue = TaskQueue::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5 {
            let seen = seen.clone();
            queue.push(Task::new(move || seen.lock().push(i))).unwrap();
        }
        assert_eq!(queue.len(), 5);

        for _ in 0..5 {
            queue.wait_and_pop().unwrap().run();
        }

        assert_eq!(*seen.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_push_after_close_is_rejected() {
        let queue = TaskQueue::new();
        queue.close();

        let result = queue.push(Task::new(|| {}));
        assert!(matches!(result, Err(Error::PoolStopped)));
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_closed_queue_drains_backlog_first() {
        let queue = TaskQueue::new();
        queue.push(Task::new(|| {})).unwrap();
        queue.push(Task::new(|| {})).unwrap();
        queue.close();

        assert!(queue.wait_and_pop().is_some());
        assert!(queue.wait_and_pop().is_some());
        assert!(queue.wait_and_pop().is_none());
    }

    #[test]
    fn test_close_wakes_blocked_waiter() {
        let queue = Arc::new(TaskQueue::new());
        let waiter = {
            let queue = queue.clone();
            thread::spawn(move || queue.wait_and_pop().is_none())
        };

        thread::sleep(Duration::from_millis(20));
        queue.close();

        assert!(waiter.join().unwrap());
    }

    #[test]
    fn test_close_is_idempotent() {
        let queue = TaskQueue::new();
        queue.close();
        queue.close();
        assert!(queue.is_stopped());
    }
}
