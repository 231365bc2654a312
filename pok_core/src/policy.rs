//! Enumerations recorded on lock objects and partitions.

/// What a lock object does: mutual exclusion, counting, or rendezvous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockKind {
    /// Binary mutual exclusion. `current_value` is 0 (held) or 1 (free).
    Mutex,
    /// Counting permits, bounded by `max_value`.
    Semaphore,
    /// Wait/signal rendezvous, guarded by its own internal mutex.
    Event,
}

/// The priority-inversion avoidance protocol recorded on a mutex.
///
/// This core records the policy but does not enforce it; enforcement
/// (priority inheritance or priority ceiling) is declared external to this
/// specification (see `spec.md` §1, Non-goals).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockingPolicy {
    /// No priority inversion avoidance.
    Standard,
    /// Priority Inheritance Protocol.
    Pip,
    /// Priority Ceiling Protocol.
    Pcp,
}

/// The order in which blocked threads are released from a lock object's
/// wait queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueingPolicy {
    /// Threads are released in the order they blocked.
    Fifo,
    /// Threads are released in priority order, ties broken by FIFO order.
    ///
    /// Not implemented by this core (see `SPEC_FULL.md` REDESIGN FLAGS):
    /// `create` rejects this policy rather than silently falling back to
    /// FIFO.
    Priority,
}

/// A partition's current execution mode, as tracked by the scheduler.
///
/// Only the two init modes matter to the lock object subsystem: `create`
/// is only permitted while a partition is still initializing itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionMode {
    /// Cold-start initialization: partition state has no prior history.
    InitCold,
    /// Warm-start initialization: partition is recovering from a restart.
    InitWarm,
    /// Steady-state execution. `create` is rejected in this mode.
    Normal,
}
