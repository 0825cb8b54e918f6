//! # One-Shot Scheduling
//!
//! The only environmental capability a controller needs: "run this callback once after a
//! delay, and give me something I can cancel it with".
//!
//! ## Contract
//! - `schedule` must never run the task synchronously. Controllers call it while holding
//!   their own state borrow.
//! - `cancel` on a handle whose task already ran (or was already cancelled) is a no-op.
//!
//! ## Implementations
//! - [`SimulatedClock`]: manual time for tests and deterministic replays
//! - [`TokioScheduler`]: real time, single-threaded, inside a `tokio::task::LocalSet`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// A deferred unit of work. Not `Send`: everything runs on one event loop.
pub type Task = Box<dyn FnOnce()>;

/// Run-once-after-delay capability with cancellation.
pub trait Scheduler {
    /// Token returned by `schedule`, consumed by `cancel`.
    type Handle;

    /// Arrange for `task` to run once, `delay` from now.
    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;

    /// Prevent a scheduled task from running.
    fn cancel(&self, handle: Self::Handle);
}

/// Identifier of a task pending on a [`SimulatedClock`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

struct Pending {
    id: TimerId,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

/// Manually advanced clock.
///
/// Clones share the same timeline, so a test keeps one clone and hands another to the
/// controller under test.
///
/// # Example
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
/// use slide_rotator::scheduler::{Scheduler, SimulatedClock};
///
/// let clock = SimulatedClock::new();
/// let fired = Rc::new(Cell::new(false));
/// let flag = fired.clone();
/// clock.schedule(Duration::from_millis(100), Box::new(move || flag.set(true)));
///
/// clock.advance(Duration::from_millis(99));
/// assert!(!fired.get());
/// clock.advance(Duration::from_millis(1));
/// assert!(fired.get());
/// ```
#[derive(Clone, Default)]
pub struct SimulatedClock {
    state: Rc<RefCell<ClockState>>,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the clock was created.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of tasks scheduled and not yet run or cancelled.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<Duration> {
        self.state.borrow().pending.iter().map(|p| p.due).min()
    }

    /// Move time forward by `by`, running every task that falls due on the way.
    ///
    /// Tasks run in due order, ties broken by scheduling order. While a task runs, `now()`
    /// reports its due time, so work it schedules is timed from the right instant. Tasks
    /// scheduled during the advance that fall inside the window run too.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;

        loop {
            // The borrow must end before the task runs: tasks reschedule on this clock.
            let next = {
                let mut state = self.state.borrow_mut();
                let earliest = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.id))
                    .map(|(position, _)| position);

                earliest.map(|position| {
                    let pending = state.pending.remove(position);
                    state.now = pending.due;
                    pending
                })
            };

            match next {
                Some(pending) => {
                    trace!(
                        id = pending.id.0,
                        due_ms = pending.due.as_millis() as u64,
                        "simulated timer fired"
                    );
                    (pending.task)();
                }
                None => break,
            }
        }

        self.state.borrow_mut().now = target;
    }
}

impl Scheduler for SimulatedClock {
    type Handle = TimerId;

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let due = state.now + delay;
        state.pending.push(Pending { id, due, task });
        id
    }

    fn cancel(&self, handle: TimerId) {
        self.state.borrow_mut().pending.retain(|p| p.id != handle);
    }
}

impl std::fmt::Debug for SimulatedClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("SimulatedClock")
            .field("now", &state.now)
            .field("pending", &state.pending.len())
            .finish()
    }
}

/// Scheduler backed by tokio timers.
///
/// Tasks are spawned with `spawn_local`, so every call must happen inside a
/// `tokio::task::LocalSet` on a runtime with the time driver enabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    type Handle = JoinHandle<()>;

    fn schedule(&self, delay: Duration, task: Task) -> JoinHandle<()> {
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            task();
        })
    }

    fn cancel(&self, handle: JoinHandle<()>) {
        handle.abort();
    }
}
