//! Task execution infrastructure.
//!
//! The shared task queue, the worker threads that drain it, and the
//! fixed-size thread pool that owns both.

pub mod pool;

pub(crate) mod panic_handler;
pub(crate) mod queue;
pub(crate) mod task;
pub(crate) mod worker;

pub use pool::{PoolStats, ThreadPool};
