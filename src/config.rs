use crate::error::{Error, Result};

/// Worker count used when the platform reports no concurrency hint.
const FALLBACK_THREADS: usize = 2;

/// Pool configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of worker threads. `None` or `Some(0)` selects the platform
    /// concurrency hint.
    pub num_threads: Option<usize>,

    /// Prefix for worker thread names; the worker index is appended.
    pub thread_name_prefix: String,

    /// Stack size for worker threads, in bytes. `None` uses the platform
    /// default.
    pub stack_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_threads: None,
            thread_name_prefix: "threadmill-worker".to_string(),
            stack_size: None,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.num_threads {
            if n > 1024 {
                return Err(Error::config("num_threads too large (max 1024)"));
            }
        }

        if self.thread_name_prefix.contains('\0') {
            return Err(Error::config("thread_name_prefix must not contain null bytes"));
        }

        Ok(())
    }

    /// Effective worker count: the configured count if nonzero, otherwise the
    /// platform concurrency hint, otherwise a fallback of 2.
    pub fn worker_threads(&self) -> usize {
        match self.num_threads {
            Some(n) if n > 0 => n,
            _ => {
                let hint = num_cpus::get();
                if hint == 0 {
                    FALLBACK_THREADS
                } else {
                    hint
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the worker count. Zero selects the platform concurrency hint.
    pub fn num_threads(mut self, n: usize) -> Self {
        self.config.num_threads = Some(n);
        self
    }

    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
