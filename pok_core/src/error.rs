//! The stable, per-call result-code surface.
//!
//! <div class="admonition-follows"></div>
//!
//! > **Relation to the original implementation:** the numeric
//! > discriminants below match the `POK_ERRNO_*` constants of the C
//! > implementation this core was distilled from, so that a future
//! > syscall ABI boundary can round-trip them without a translation
//! > table. Success is modeled as `Ok(())`/`Ok(T)` rather than as a
//! > variant of this enum — unlike a C return-code API, a Rust `Result`
//! > doesn't need an in-band success value.

use core::fmt;

/// Everything that can go wrong with a single lock object operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum LockObjError {
    /// A parameter is invalid: wrong kind presented at the gateway, or a
    /// lock object id outside the caller's partition range.
    EInval = -1,
    /// `create` was attempted while the calling partition is not in
    /// `InitCold` or `InitWarm` mode.
    Mode = -2,
    /// `create` was given a `LockingPolicy`/`QueueingPolicy` combination
    /// this core doesn't support (includes `QueueingPolicy::Priority`,
    /// which is recorded but not implemented).
    LockObjPolicy = -3,
    /// `create` was given a `LockKind` outside the enumerated set.
    LockObjKind = -4,
    /// `create` found no free slot in the calling partition's range.
    LockObjUnavailable = -5,
    /// An operation was attempted on a lock object that has not been
    /// `create`d yet.
    LockObjNotReady = -6,
    /// A timed wait's deadline elapsed before the condition was met.
    Timeout = -7,
    /// `eventwait`'s internal unlock of the guarding mutex failed.
    Unavailable = -8,
    /// A wait queue enqueue found the queue already full (capacity
    /// `NB_THREADS`); this indicates a double-enqueue kernel bug, not
    /// real exhaustion, since only distinct threads can wait.
    Full = -9,
    /// A wait queue dequeue found the queue empty.
    Empty = -10,
    /// A targeted wait-queue removal did not find the requested thread.
    NotFound = -11,
}

impl LockObjError {
    /// The short name of the result code, as used in log messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EInval => "EInval",
            Self::Mode => "Mode",
            Self::LockObjPolicy => "LockObjPolicy",
            Self::LockObjKind => "LockObjKind",
            Self::LockObjUnavailable => "LockObjUnavailable",
            Self::LockObjNotReady => "LockObjNotReady",
            Self::Timeout => "Timeout",
            Self::Unavailable => "Unavailable",
            Self::Full => "Full",
            Self::Empty => "Empty",
            Self::NotFound => "NotFound",
        }
    }
}

impl fmt::Display for LockObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fatal mismatch discovered in the static partition configuration.
///
/// Raised once, at `PartitionTable` construction time, via the kernel
/// error bus. In an avionics deployment this normally halts the system
/// (or the affected partition); it is never returned from a per-call
/// lock object operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelConfigError {
    /// The sum of per-partition `(high - low)` widths does not equal
    /// `NB_LOCKOBJECTS`, or two partitions' ranges overlap.
    KernelConfig,
}

impl fmt::Display for KernelConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KernelConfig")
    }
}
