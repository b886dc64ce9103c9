use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

use crate::{PoolError, Result};

/// A unit of queued work: a type-erased, zero-argument closure.
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// A FIFO job queue shared by submitters and workers.
///
/// The pending jobs and the shutdown flag live under a single mutex so
/// that "queue is empty" and "shutdown requested" are always observed
/// together. Workers block on the condition variable until one of the
/// two holds.
pub(crate) struct TaskQueue {
    inner: Mutex<Inner>,
    available: Condvar,
}

struct Inner {
    jobs: VecDeque<Job>,
    shutdown: bool,
}

impl TaskQueue {
    pub(crate) fn new() -> TaskQueue {
        TaskQueue {
            inner: Mutex::new(Inner {
                jobs: VecDeque::new(),
                shutdown: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Appends a job to the back of the queue and wakes one worker.
    ///
    /// The queue is unbounded, so this never blocks beyond lock
    /// contention. Returns [`PoolError::ShutDown`] once the queue has
    /// been closed.
    pub(crate) fn push(&self, job: Job) -> Result<()> {
        {
            let mut inner = self.inner.lock().expect("queue lock poisoned");
            if inner.shutdown {
                return Err(PoolError::ShutDown);
            }
            inner.jobs.push_back(job);
        }
        self.available.notify_one();
        Ok(())
    }

    /// Blocks until a job is available or the queue is closed and empty.
    ///
    /// Returns `None` only once the queue is closed AND drained, so
    /// jobs accepted before close are never lost. The wait predicate is
    /// re-checked after every wake, which also covers spurious wakeups.
    pub(crate) fn wait_and_pop(&self) -> Option<Job> {
        let mut inner = self.inner.lock().expect("queue lock poisoned");
        loop {
            if let Some(job) = inner.jobs.pop_front() {
                return Some(job);
            }
            if inner.shutdown {
                return None;
            }
            inner = self.available.wait(inner).expect("queue lock poisoned");
        }
    }

    /// Closes the queue and wakes every waiting worker.
    ///
    /// The shutdown flag is one-way; calling this again is a no-op.
    pub(crate) fn close(&self) {
        {
            let mut inner = self.inner.lock().expect("queue lock poisoned");
            inner.shutdown = true;
        }
        self.available.notify_all();
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().expect("queue lock poisoned").jobs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn push_pop_is_fifo() {
        let queue = TaskQueue::new();
        for _ in 0..3 {
            queue.push(Box::new(|| ())).unwrap();
        }
        assert_eq!(queue.len(), 3);

        for _ in 0..3 {
            assert!(queue.wait_and_pop().is_some());
        }
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn push_after_close_is_rejected() {
        let queue = TaskQueue::new();
        queue.close();
        assert!(matches!(
            queue.push(Box::new(|| ())),
            Err(PoolError::ShutDown)
        ));
    }

    #[test]
    fn close_drains_before_signalling_exit() {
        let queue = TaskQueue::new();
        queue.push(Box::new(|| ())).unwrap();
        queue.close();

        // The pending job is still handed out after close.
        assert!(queue.wait_and_pop().is_some());
        assert!(queue.wait_and_pop().is_none());
    }

    #[test]
    fn blocked_pop_wakes_on_close() {
        let queue = Arc::new(TaskQueue::new());
        let waiter = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.wait_and_pop().is_none())
        };

        queue.close();
        assert!(waiter.join().unwrap());
    }
}
