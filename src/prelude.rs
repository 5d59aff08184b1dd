//! Convenience re-exports.

pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{Error, Result};
pub use crate::executor::{PoolStats, ThreadPool};
pub use crate::handle::JoinHandle;
