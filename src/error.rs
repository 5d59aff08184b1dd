pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Submission arrived after shutdown began. No task was queued.
    #[error("thread pool is stopped")]
    PoolStopped,

    /// A worker thread could not be created at construction. The pool is
    /// unusable and already torn down.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// The submitted closure panicked. The payload message is re-raised to
    /// whoever reads the task's handle.
    #[error("task panicked: {0}")]
    TaskPanicked(String),

    /// The producer side of a result handle was destroyed without ever
    /// fulfilling it.
    #[error("task result was dropped before completion")]
    ResultDropped,

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
}
