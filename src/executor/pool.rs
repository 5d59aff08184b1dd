use super::panic_handler::panic_message;
use super::queue::TaskQueue;
use super::task::Task;
use super::worker::{Worker, WorkerState};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::handle::{result_channel, JoinHandle};
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

/// A fixed set of worker threads draining one shared FIFO queue.
///
/// Submission never blocks on worker availability (the queue is unbounded).
/// Shutdown, explicit via [`shutdown`](ThreadPool::shutdown) or implicit on
/// drop, stops intake, drains every queued task, and joins every worker
/// before returning.
pub struct ThreadPool {
    queue: Arc<TaskQueue>,
    workers: Vec<WorkerHandle>,
    num_threads: usize,
}

struct WorkerHandle {
    state: Arc<WorkerState>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ThreadPool {
    /// Create a pool with the default configuration (one worker per
    /// available CPU).
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    /// Create a pool with `requested` workers. Zero selects the platform
    /// concurrency hint.
    pub fn with_threads(requested: usize) -> Result<Self> {
        let config = Config {
            num_threads: Some(requested),
            ..Config::default()
        };
        Self::with_config(&config)
    }

    pub fn with_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let num_threads = config.worker_threads();
        let queue = Arc::new(TaskQueue::new());
        let mut workers: Vec<WorkerHandle> = Vec::with_capacity(num_threads);

        for id in 0..num_threads {
            let worker = Worker::new(id);
            let state = worker.state.clone();
            let queue_clone = queue.clone();
            let name = format!("{}-{}", config.thread_name_prefix, id);

            let mut builder = thread::Builder::new().name(name);
            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            let thread = match builder.spawn(move || worker.run(&queue_clone)) {
                Ok(thread) => thread,
                Err(e) => {
                    // A half-built pool is unusable: stop and reap the
                    // workers that did start before surfacing the failure.
                    queue.close();
                    for w in &mut workers {
                        if let Some(thread) = w.thread.take() {
                            let _ = thread.join();
                        }
                    }
                    return Err(Error::Spawn(e));
                }
            };

            workers.push(WorkerHandle {
                state,
                thread: Some(thread),
            });
        }

        Ok(Self {
            queue,
            workers,
            num_threads,
        })
    }

    /// Queue `f` for execution and return the handle its result arrives on.
    ///
    /// The closure runs on one worker thread, exactly once. A panic inside it
    /// is captured into the handle instead of unwinding the worker. Fails
    /// with [`Error::PoolStopped`] once shutdown has begun; no task is queued
    /// in that case.
    pub fn submit<F, T>(&self, f: F) -> Result<JoinHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (slot, handle) = result_channel();

        let task = Task::new(move || match catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => slot.fulfill(Ok(value)),
            Err(payload) => {
                slot.fulfill(Err(Error::TaskPanicked(panic_message(payload.as_ref()))));
                // The worker's own catch_unwind is the accounting point for
                // panics; hand the payload back up once the result is stored.
                resume_unwind(payload);
            }
        });

        self.queue.push(task)?;
        Ok(handle)
    }

    /// Fire-and-forget variant of [`submit`](ThreadPool::submit) for work
    /// with no result to collect.
    pub fn execute<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue.push(Task::new(f))
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Tasks queued but not yet picked up by a worker.
    pub fn queued_tasks(&self) -> usize {
        self.queue.len()
    }

    /// Snapshot of the pool's counters.
    pub fn stats(&self) -> PoolStats {
        let mut stats = PoolStats {
            queued_tasks: self.queue.len(),
            ..PoolStats::default()
        };

        for worker in &self.workers {
            stats.tasks_executed += worker.state.tasks_executed.load(Ordering::Relaxed);
            stats.tasks_panicked += worker.state.tasks_panicked.load(Ordering::Relaxed);
        }

        stats
    }

    /// Begin teardown and wait for it to finish: reject further submissions,
    /// wake every worker, drain the backlog, join every thread.
    ///
    /// Idempotent; later calls return immediately.
    pub fn shutdown(&mut self) {
        self.queue.close();

        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                let _ = thread.join();
            }
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("num_threads", &self.num_threads)
            .field("queued_tasks", &self.queue.len())
            .field("stopped", &self.queue.is_stopped())
            .finish()
    }
}

/// Aggregated counters across all workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Tasks a worker has finished running, panicking ones included.
    pub tasks_executed: u64,
    /// Tasks whose closure panicked.
    pub tasks_panicked: u64,
    /// Tasks still waiting in the queue.
    pub queued_tasks: usize,
}
