//! API definitions for the lock object subsystem of a partitioned,
//! ARINC-653-style real-time kernel.
//!
//! This crate is the interface layer: opaque id types, the stable
//! result-code enum, and the [`sched::Scheduler`] trait that the lock
//! object implementation (see the `pok_kernel` crate) requires from the
//! rest of the kernel. It carries no state and performs no locking itself;
//! a partition's user-side library and the task scheduler module both
//! depend on it without depending on `pok_kernel`.
#![no_std]
#![warn(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod ids;
pub mod policy;
pub mod sched;

pub use error::{KernelConfigError, LockObjError};
pub use ids::{LockObjId, PartitionId, ThreadId};
pub use policy::{LockKind, LockingPolicy, PartitionMode, QueueingPolicy};
pub use sched::Scheduler;
