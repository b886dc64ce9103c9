use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use crossbeam::channel;
use log::{debug, error};

use crate::handle::TaskHandle;
use crate::queue::{Job, TaskQueue};
use crate::{PoolError, Result};

/// A fixed-size pool of worker threads executing jobs in FIFO order.
///
/// Workers are spawned once at construction and live until shutdown.
/// Jobs are claimed in submission order; with more than one worker,
/// completion order across jobs is not guaranteed.
///
/// Dropping the pool (or calling [`shutdown`](ThreadPool::shutdown))
/// stops accepting new jobs, runs everything already queued to
/// completion, and joins all workers.
///
/// # Examples
///
/// ```
/// use taskpool::ThreadPool;
///
/// let pool = ThreadPool::new(2).unwrap();
/// let handle = pool.submit(|| 2 + 2).unwrap();
/// assert_eq!(handle.wait(), 4);
/// ```
pub struct ThreadPool {
    queue: Arc<TaskQueue>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl ThreadPool {
    /// Creates a pool with exactly `threads` worker threads.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ZeroWorkers`] if `threads` is zero, or the
    /// underlying IO error if a worker thread cannot be spawned. On a
    /// partial spawn failure the already-spawned workers are stopped
    /// and joined before the error is returned, so no threads leak.
    pub fn new(threads: usize) -> Result<ThreadPool> {
        if threads == 0 {
            return Err(PoolError::ZeroWorkers);
        }

        let queue = Arc::new(TaskQueue::new());
        let mut workers = Vec::with_capacity(threads);

        for id in 0..threads {
            match spawn_worker(id, Arc::clone(&queue)) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    queue.close();
                    for worker in workers {
                        let _ = worker.join();
                    }
                    return Err(e.into());
                }
            }
        }

        Ok(ThreadPool { queue, workers })
    }

    /// Submits a job and returns a handle to its eventual outcome.
    ///
    /// The job is appended to the shared FIFO queue and this returns
    /// immediately; the queue is unbounded, so submission never waits
    /// for a free worker. A panic inside the job is captured and
    /// resurfaces only from [`TaskHandle::wait`].
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ShutDown`] if shutdown has already begun.
    pub fn submit<F, T>(&self, job: F) -> Result<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = channel::bounded(1);
        let job: Job = Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(job));
            // The caller may have dropped its handle; nobody to notify.
            let _ = tx.send(outcome);
        });

        self.queue.push(job)?;
        Ok(TaskHandle::new(rx))
    }

    /// Shuts the pool down, blocking until all queued jobs have run.
    ///
    /// No new jobs are accepted once this begins, but every job
    /// accepted before it runs to completion. Idempotent: a second
    /// call (including the one from `Drop`) is a no-op.
    pub fn shutdown(&mut self) {
        self.queue.close();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                error!("A worker thread panicked outside a job boundary");
            }
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Spawns a single worker thread that pulls jobs from the shared queue.
///
/// The worker exits only once the queue reports closed-and-drained.
fn spawn_worker(id: usize, queue: Arc<TaskQueue>) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("pool-worker-{id}"))
        .spawn(move || {
            while let Some(job) = queue.wait_and_pop() {
                debug!("Worker {id} executing job");
                // Jobs capture their own panics into the result cell;
                // this guards the loop against anything that escapes.
                if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                    error!("Worker {id}: job escaped its panic boundary");
                }
            }
            debug!("Worker {id}: queue closed and drained, exiting");
        })
}
