//! THREADMILL - a fixed-size worker pool with one-shot result handles.
//!
//! Decouples submission of arbitrary units of work from their execution:
//! tasks go into a shared FIFO queue, a fixed set of worker threads drains
//! it, and each submission returns a [`JoinHandle`] the caller blocks on to
//! collect the value, or the failure captured while the task ran.
//!
//! # Quick Start
//!
//! ```
//! use threadmill::ThreadPool;
//!
//! let mut pool = ThreadPool::with_threads(4).unwrap();
//!
//! let handle = pool.submit(|| 2 + 2).unwrap();
//! assert_eq!(handle.get().unwrap(), 4);
//!
//! // Drains every queued task, then joins the workers.
//! pool.shutdown();
//! ```
//!
//! # Guarantees
//!
//! - **FIFO dequeue**: among queued tasks, workers pick up work in
//!   submission order. Completion order across workers is not guaranteed.
//! - **Drain on shutdown**: teardown executes the whole backlog before
//!   returning; nothing is abandoned.
//! - **Panic isolation**: a panicking task is reported through its handle
//!   and never takes a worker down.
//! - **Deterministic late submission**: `submit` racing with shutdown either
//!   queues the task (which then runs) or fails with [`Error::PoolStopped`];
//!   it is never dropped silently.

#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod executor;
pub mod handle;
pub mod prelude;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use executor::{PoolStats, ThreadPool};
pub use handle::JoinHandle;
