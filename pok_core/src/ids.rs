//! Opaque small-integer identifiers used throughout the kernel.
//!
//! Each id is a zero-based index into a fixed-size, compile-time-sized
//! table (`[0, NB_THREADS)`, `[0, NB_PARTITIONS)`, `[0, NB_LOCKOBJECTS)`).
//! They are deliberately thin: the kernel never allocates them, it only
//! receives them from the scheduler (for [`ThreadId`]/[`PartitionId`]) or
//! hands them back to the caller (for [`LockObjId`]).

use core::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            /// Construct an id from its raw index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Return the raw index.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self::new(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(id: $name) -> usize {
                id.get()
            }
        }
    };
}

define_id!(
    /// Identifies the thread currently running, as reported by the scheduler.
    ThreadId
);

define_id!(
    /// Identifies a partition.
    PartitionId
);

define_id!(
    /// Identifies a lock object in the global table. This is the opaque
    /// handle a partition receives from [`create`](crate::sched) and must
    /// present back to every later operation.
    LockObjId
);
