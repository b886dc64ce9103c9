#![deny(missing_docs)]

//! A fixed-size worker thread pool with blocking result handles.
//!
//! A bounded set of long-lived worker threads pulls jobs from a shared
//! FIFO queue. [`ThreadPool::submit`] wraps a closure into a queued job
//! paired with a [`TaskHandle`] and returns the handle immediately;
//! [`TaskHandle::wait`] blocks until the job has run and yields its
//! value, or resumes the job's panic on the calling thread.
//!
//! Shutting the pool down (explicitly or by dropping it) stops
//! accepting new jobs, runs everything already queued to completion,
//! and joins all workers.
//!
//! ```
//! use taskpool::ThreadPool;
//!
//! let pool = ThreadPool::new(4).unwrap();
//! let handle = pool.submit(|| "hello".len()).unwrap();
//! assert_eq!(handle.wait(), 5);
//! ```

mod error;
mod handle;
mod pool;
mod queue;

pub use error::{PoolError, Result};
pub use handle::TaskHandle;
pub use pool::ThreadPool;
