//! The partition gateway: the only surface through which a partition's
//! user-space library reaches a lock object.
//!
//! Every call is checked against the caller's partition before it reaches
//! [`LockObj`]: the id must fall inside the partition's configured range,
//! and the kind presented by the caller must match the kind recorded at
//! `create` time. `create` itself additionally requires the partition to
//! still be initializing.

use pok_core::{
    error::{KernelConfigError, LockObjError},
    ids::{LockObjId, PartitionId},
    policy::{LockKind, PartitionMode},
    sched::Scheduler,
};

use crate::lockobj::{CreateAttr, LockObj};

/// A half-open `[low, high)` range of lock object ids owned by one
/// partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionRange {
    pub low: usize,
    pub high: usize,
}

impl PartitionRange {
    fn overlaps(&self, other: &PartitionRange) -> bool {
        self.low < other.high && other.low < self.high
    }

    fn width(&self) -> usize {
        self.high.saturating_sub(self.low)
    }
}

/// The static table mapping each partition to its slice of the global
/// lock object table.
///
/// Built once at kernel configuration time; [`PartitionTable::new`]
/// rejects a malformed configuration instead of panicking, since a
/// misconfigured range table is a configuration defect, not a
/// per-call error. Validation is checked directly against the
/// [`LockObjTable`] the ranges index into, so a partition-range count
/// that disagrees with the table's real size is caught here rather
/// than surfacing later as an out-of-bounds panic in [`LockObjTable::get`].
pub struct PartitionTable<const NP: usize> {
    ranges: [PartitionRange; NP],
}

impl<const NP: usize> PartitionTable<NP> {
    /// Validate that `ranges` are pairwise disjoint, ascending (`low <=
    /// high`), and exactly cover `[0, table.len())` in total width, where
    /// `table` is the actual global lock object table these ranges index
    /// into — tying the check to the table's real size `NL` rather than
    /// to an independently-supplied count that could silently disagree
    /// with it.
    pub fn new<const NT: usize, const NL: usize>(
        ranges: [PartitionRange; NP],
        _table: &LockObjTable<NT, NL>,
    ) -> Result<Self, KernelConfigError> {
        let mut total = 0usize;
        for (i, r) in ranges.iter().enumerate() {
            if r.low > r.high {
                return Err(KernelConfigError::KernelConfig);
            }
            total += r.width();
            for other in ranges.iter().skip(i + 1) {
                if r.overlaps(other) {
                    return Err(KernelConfigError::KernelConfig);
                }
            }
        }
        if total != NL {
            return Err(KernelConfigError::KernelConfig);
        }
        Ok(Self { ranges })
    }

    /// The range owned by `partition`.
    pub fn range(&self, partition: PartitionId) -> PartitionRange {
        self.ranges[partition.get()]
    }
}

/// The global lock object table, indexed by [`LockObjId`].
pub struct LockObjTable<const NT: usize, const NL: usize> {
    objects: [LockObj<NT>; NL],
}

impl<const NT: usize, const NL: usize> LockObjTable<NT, NL> {
    /// A table of uninitialized slots.
    pub fn new() -> Self {
        Self {
            objects: core::array::from_fn(|_| LockObj::new()),
        }
    }

    pub(crate) fn get(&self, id: LockObjId) -> &LockObj<NT> {
        &self.objects[id.get()]
    }
}

impl<const NT: usize, const NL: usize> Default for LockObjTable<NT, NL> {
    fn default() -> Self {
        Self::new()
    }
}

/// The operation a gateway call dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Lock,
    TryLock,
    Unlock,
    Wait,
    Signal,
    Broadcast,
}

/// The parameters a partition supplies to [`call`].
#[derive(Debug, Clone, Copy)]
pub struct OpAttr {
    pub operation: Operation,
    /// The kind the caller believes this object to be. Checked against
    /// the kind recorded at `create` time.
    pub obj_kind: LockKind,
    /// Ticks to wait, 0 meaning indefinitely. Ignored by operations that
    /// don't block.
    pub timeout_ticks: u64,
}

/// A read-only snapshot returned by [`query`].
#[derive(Debug, Clone, Copy)]
pub struct QueryResult {
    pub kind: LockKind,
    pub value: u32,
    pub waiters: usize,
}

fn check_bounds_and_kind<const NT: usize, const NL: usize, const NP: usize>(
    sched_partition: PartitionId,
    table: &LockObjTable<NT, NL>,
    partitions: &PartitionTable<NP>,
    id: LockObjId,
    obj_kind: LockKind,
) -> Result<(), LockObjError> {
    let range = partitions.range(sched_partition);
    if id.get() < range.low || id.get() >= range.high {
        return Err(LockObjError::EInval);
    }
    if table.get(id).kind() != Some(obj_kind) {
        return Err(LockObjError::EInval);
    }
    Ok(())
}

/// Dispatch a lock/unlock/wait/signal/broadcast operation on behalf of
/// the scheduler's current partition.
pub fn call<S: Scheduler, const NT: usize, const NL: usize, const NP: usize>(
    sched: &S,
    table: &LockObjTable<NT, NL>,
    partitions: &PartitionTable<NP>,
    id: LockObjId,
    attr: &OpAttr,
) -> Result<(), LockObjError> {
    check_bounds_and_kind(sched.current_partition(), table, partitions, id, attr.obj_kind)?;

    let obj = table.get(id);
    match attr.operation {
        Operation::Lock => obj.lock(sched, attr.timeout_ticks),
        Operation::TryLock => obj.try_lock(),
        Operation::Unlock => obj.unlock(sched),
        Operation::Wait => obj.eventwait(sched, attr.timeout_ticks),
        Operation::Signal => obj.eventsignal(sched),
        Operation::Broadcast => obj.eventbroadcast(sched),
    }
}

/// Find a free slot in the calling partition's range and initialize it.
///
/// Rejected with [`LockObjError::Mode`] outside `InitCold`/`InitWarm`,
/// and with [`LockObjError::LockObjUnavailable`] if every slot in the
/// partition's range is already in use.
pub fn create<S: Scheduler, const NT: usize, const NL: usize, const NP: usize>(
    sched: &S,
    table: &LockObjTable<NT, NL>,
    partitions: &PartitionTable<NP>,
    attr: &CreateAttr,
) -> Result<LockObjId, LockObjError> {
    let partition = sched.current_partition();
    match sched.partition_mode(partition) {
        PartitionMode::InitCold | PartitionMode::InitWarm => {}
        PartitionMode::Normal => return Err(LockObjError::Mode),
    }

    let range = partitions.range(partition);
    for idx in range.low..range.high {
        let id = LockObjId::new(idx);
        let obj = table.get(id);
        if !obj.is_initialized() {
            obj.create(attr)?;
            return Ok(id);
        }
    }
    Err(LockObjError::LockObjUnavailable)
}

/// Read a lock object's kind, value, and waiter count without mutating
/// it.
pub fn query<const NT: usize, const NL: usize, const NP: usize>(
    current_partition: PartitionId,
    table: &LockObjTable<NT, NL>,
    partitions: &PartitionTable<NP>,
    id: LockObjId,
    obj_kind: LockKind,
) -> Result<QueryResult, LockObjError> {
    check_bounds_and_kind(current_partition, table, partitions, id, obj_kind)?;
    let obj = table.get(id);
    Ok(QueryResult {
        kind: obj.kind().expect("bounds/kind check above confirmed initialization"),
        value: obj.value(),
        waiters: obj.waiters(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_ranges_summing_to_total_are_accepted() {
        let lockobjs: LockObjTable<1, 5> = LockObjTable::new();
        let table = PartitionTable::<2>::new(
            [
                PartitionRange { low: 0, high: 3 },
                PartitionRange { low: 3, high: 5 },
            ],
            &lockobjs,
        );
        assert!(table.is_ok());
    }

    #[test]
    fn overlapping_ranges_are_rejected() {
        let lockobjs: LockObjTable<1, 5> = LockObjTable::new();
        let table = PartitionTable::<2>::new(
            [
                PartitionRange { low: 0, high: 3 },
                PartitionRange { low: 2, high: 5 },
            ],
            &lockobjs,
        );
        assert_eq!(table.err(), Some(KernelConfigError::KernelConfig));
    }

    #[test]
    fn mismatched_total_is_rejected() {
        let lockobjs: LockObjTable<1, 5> = LockObjTable::new();
        let table = PartitionTable::<1>::new([PartitionRange { low: 0, high: 3 }], &lockobjs);
        assert_eq!(table.err(), Some(KernelConfigError::KernelConfig));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let lockobjs: LockObjTable<1, 0> = LockObjTable::new();
        let table = PartitionTable::<1>::new([PartitionRange { low: 3, high: 1 }], &lockobjs);
        assert_eq!(table.err(), Some(KernelConfigError::KernelConfig));
    }
}
