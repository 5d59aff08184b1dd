// worker thread stuff
use super::queue::TaskQueue;
use super::task::Task;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub(crate) type WorkerId = usize;

// counters for each worker, shared with the owning pool
pub(crate) struct WorkerState {
    pub tasks_executed: AtomicU64,
    pub tasks_panicked: AtomicU64,
}

impl WorkerState {
    fn new() -> Self {
        Self {
            tasks_executed: AtomicU64::new(0),
            tasks_panicked: AtomicU64::new(0),
        }
    }
}

pub(crate) struct Worker {
    pub id: WorkerId,
    pub state: Arc<WorkerState>,
}

impl Worker {
    pub fn new(id: WorkerId) -> Self {
        Self {
            id,
            state: Arc::new(WorkerState::new()),
        }
    }

    // main loop: block for work, run exactly one task per iteration, exit
    // once the queue reports stopped-and-empty. Draining the backlog is the
    // queue's contract; the worker never inspects the stop flag itself.
    pub fn run(&self, queue: &TaskQueue) {
        while let Some(task) = queue.wait_and_pop() {
            self.execute_task(task);
        }
    }

    fn execute_task(&self, task: Task) {
        let tid = task.id;

        // A panicking task must not take the worker down. Submission wrappers
        // re-raise after storing the failure in the result slot, so this is
        // also where every panic is counted.
        let result = catch_unwind(AssertUnwindSafe(|| task.run()));

        if result.is_err() {
            self.state.tasks_panicked.fetch_add(1, Ordering::Relaxed);
            eprintln!("worker {}: task {:?} panicked", self.id, tid);
        }

        self.state.tasks_executed.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_survives_panicking_task() {
        let worker = Worker::new(0);
        let queue = TaskQueue::new();

        queue.push(Task::new(|| panic!("scripted"))).unwrap();
        queue.push(Task::new(|| {})).unwrap();
        queue.close();

        worker.run(&queue);

        assert_eq!(worker.state.tasks_executed.load(Ordering::Relaxed), 2);
        assert_eq!(worker.state.tasks_panicked.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_worker_exits_on_closed_empty_queue() {
        let worker = Worker::new(3);
        let queue = TaskQueue::new();
        queue.close();

        // returns immediately instead of blocking
        worker.run(&queue);
        assert_eq!(worker.state.tasks_executed.load(Ordering::Relaxed), 0);
    }
}
