// src/scheduler.rs

//! Timers that drive the periodic eviction sweep.
//!
//! The gate never sleeps on its own. It hands a task to a [`Scheduler`] and keeps
//! the returned [`TaskHandle`]; dropping or cancelling the handle stops the task.
//! A scheduler that cannot start the task returns no handle.
//! [`ThreadScheduler`] runs the task on a background thread, [`ManualScheduler`]
//! runs it only when the host calls [`ManualScheduler::run_pending`].

// dependencies
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

/// A repeating unit of work.
pub type Task = Arc<dyn Fn() + Send + Sync + 'static>;

/// Runs a task repeatedly until its handle is cancelled or dropped.
pub trait Scheduler: Send + Sync {
    /// `None` when the task could not be started.
    fn schedule_every(&self, period: Duration, task: Task) -> Option<TaskHandle>;
}

/// Cancels its task when cancelled explicitly or dropped.
pub struct TaskHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TaskHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Runs each task on its own named background thread.
///
/// The thread waits on a stop channel between runs, so cancelling wakes it
/// immediately instead of waiting out the period.
#[derive(Debug, Clone, Default)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn schedule_every(&self, period: Duration, task: Task) -> Option<TaskHandle> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let spawned = thread::Builder::new()
            .name("flux-gate-sweep".into())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => task(),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                tracing::trace!("sweep thread exiting");
            });

        if let Err(err) = spawned {
            tracing::error!(error = %err, "failed to spawn sweep thread");
            return None;
        }

        Some(TaskHandle::new(move || {
            let _ = stop_tx.send(());
        }))
    }
}

struct ScheduledTask {
    id: u64,
    period: Duration,
    task: Task,
}

/// Scheduler driven by explicit calls, for single-threaded hosts and tests.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    tasks: Arc<Mutex<Vec<ScheduledTask>>>,
    next_id: Arc<AtomicU64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every live task once. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        // run outside the lock so a task may cancel itself
        let tasks: Vec<Task> = lock(&self.tasks)
            .iter()
            .map(|scheduled| Arc::clone(&scheduled.task))
            .collect();
        for task in &tasks {
            task();
        }
        tasks.len()
    }

    /// Number of tasks currently scheduled.
    pub fn scheduled(&self) -> usize {
        lock(&self.tasks).len()
    }

    /// Periods of the scheduled tasks, in scheduling order.
    pub fn periods(&self) -> Vec<Duration> {
        lock(&self.tasks).iter().map(|scheduled| scheduled.period).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_every(&self, period: Duration, task: Task) -> Option<TaskHandle> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.tasks).push(ScheduledTask { id, period, task });

        let tasks = Arc::clone(&self.tasks);
        Some(TaskHandle::new(move || {
            lock(&tasks).retain(|scheduled| scheduled.id != id)
        }))
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("scheduled", &self.scheduled())
            .finish()
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
