//! The scheduler contract.
//!
//! The lock object layer is a consumer of the task scheduler, never an
//! implementer of it. Everything the scheduler proper does beyond these
//! seven methods — ready-queue maintenance, time-window accounting,
//! partition mode transitions — is external to this specification (see
//! `spec.md` §1 and §4.4).

use crate::ids::{PartitionId, ThreadId};
use crate::policy::PartitionMode;

/// The hooks a lock object implementation needs from the task scheduler.
///
/// # Safety contract
///
/// Implementations must uphold two properties the lock object layer
/// depends on without being able to check them itself:
///
/// - [`lock_current_thread`](Scheduler::lock_current_thread) and
///   [`lock_current_thread_timed`](Scheduler::lock_current_thread_timed)
///   mark the running thread blocked but must not themselves yield the
///   processor; the caller releases its spin region and calls
///   [`yield_now`](Scheduler::yield_now) explicitly afterwards.
/// - [`unlock_thread`](Scheduler::unlock_thread) marks a thread runnable
///   but must not yield either, for the same reason.
///
/// Violating either property does not corrupt lock object state (the
/// state machine only observes blocked/runnable transitions through
/// these calls) but it does break the ordering guarantees described in
/// `spec.md` §5.
pub trait Scheduler {
    /// The thread id of the thread currently running.
    fn current_thread(&self) -> ThreadId;

    /// The partition the currently running thread belongs to.
    fn current_partition(&self) -> PartitionId;

    /// The current partition's execution mode.
    fn partition_mode(&self, partition: PartitionId) -> PartitionMode;

    /// Mark the running thread blocked. Does not yield.
    fn lock_current_thread(&self);

    /// Mark the running thread blocked, to be released automatically if
    /// still blocked once `now_ticks() >= deadline`. Does not yield.
    fn lock_current_thread_timed(&self, deadline: u64);

    /// Mark `thread` runnable. Does not yield.
    fn unlock_thread(&self, thread: ThreadId);

    /// Yield the processor to the scheduler, which picks the next
    /// runnable thread in the current partition window.
    fn yield_now(&self);

    /// A monotonic tick reading.
    fn now_ticks(&self) -> u64;
}
