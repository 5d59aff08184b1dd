//! Task representation and execution.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global task ID counter
static TASK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a task, carried for panic diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TaskId(u64);

impl TaskId {
    fn next() -> Self {
        TaskId(TASK_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// A queued unit of work: a type-erased, zero-argument closure built at
/// submission time. Closes over the caller's function, its captured
/// arguments, and (for `submit`) the producer half of the result channel.
pub(crate) struct Task {
    pub(crate) id: TaskId,
    func: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Task {
            id: TaskId::next(),
            func: Box::new(f),
        }
    }

    /// Run the work. Consuming `self` keeps the at-most-once invariant in
    /// the type system.
    pub fn run(self) {
        (self.func)();
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_run_invokes_closure() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();

        let task = Task::new(move || flag.store(true, Ordering::Relaxed));
        task.run();

        assert!(ran.load(Ordering::Relaxed));
    }

    #[test]
    fn test_ids_are_distinct() {
        let a = Task::new(|| {});
        let b = Task::new(|| {});
        assert_ne!(a.id, b.id);
    }
}
