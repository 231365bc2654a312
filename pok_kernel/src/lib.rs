//! Lock object subsystem of a partitioned, ARINC-653-style real-time
//! kernel: a unified mutex/semaphore/event state machine, its wait
//! queues, and the partition gateway that fronts it.
//!
//! This crate implements; [`pok_core`] declares the interface it's built
//! against (ids, result codes, the [`pok_core::Scheduler`] trait). A
//! partition's user-space library calls into [`partition::call`],
//! [`partition::create`], and [`partition::query`]; everything else here
//! is implementation detail reachable only through those three entry
//! points plus direct [`lockobj::LockObj`] access for embedders that
//! don't need the gateway's partition-ownership checks.
#![cfg_attr(not(test), no_std)]
#![warn(unsafe_op_in_unsafe_fn)]

pub mod fifo;
pub mod lockobj;
pub mod partition;

pub use fifo::Fifo;
pub use lockobj::{CreateAttr, LockObj};
pub use partition::{call, create, query, LockObjTable, Operation, OpAttr, PartitionRange, PartitionTable, QueryResult};
