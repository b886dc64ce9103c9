use std::io;
use thiserror::Error;

/// Error type for taskpool operations.
#[derive(Error, Debug)]
pub enum PoolError {
    /// IO error from spawning a worker thread.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The pool was asked for zero worker threads.
    #[error("worker count must be at least 1")]
    ZeroWorkers,

    /// A job was submitted after shutdown had begun.
    #[error("thread pool is shut down")]
    ShutDown,
}

/// Result type alias for taskpool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
