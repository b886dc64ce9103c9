use std::panic;
use std::thread;

use crossbeam::channel::Receiver;

/// The caller-visible handle to a submitted job's eventual outcome.
///
/// Each submission gets its own one-shot result cell, written exactly
/// once by the worker that runs the job. Retrieving the outcome
/// consumes the handle, so it can be read at most once.
pub struct TaskHandle<T> {
    cell: Receiver<thread::Result<T>>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(cell: Receiver<thread::Result<T>>) -> TaskHandle<T> {
        TaskHandle { cell }
    }

    /// Blocks until the job has run, then returns its value.
    ///
    /// If the job panicked, the panic is resumed on the calling thread.
    /// Panics from other jobs never surface here; each handle only ever
    /// observes its own job.
    pub fn wait(self) -> T {
        let outcome = self
            .cell
            .recv()
            .expect("job dropped without reporting a result");
        match outcome {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}
