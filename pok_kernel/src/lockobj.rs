//! The lock object state machine: a single type underlying mutexes,
//! semaphores, and events.
//!
//! Each [`LockObj`] owns two logical, non-nested mutual-exclusion regions,
//! each a dedicated [`spin::Mutex`]:
//!
//! - `spin` guards `current_value`, `fifo`, and the kind/policy fields set
//!   at `create` time. [`lock`](LockObj::lock), [`try_lock`](LockObj::try_lock),
//!   and [`unlock`](LockObj::unlock) take it.
//! - `eventspin` guards `event_fifo`. [`eventwait`](LockObj::eventwait),
//!   [`eventsignal`](LockObj::eventsignal), and
//!   [`eventbroadcast`](LockObj::eventbroadcast) take it.
//!
//! `eventwait` is the one operation that touches both: it holds
//! `eventspin` across a call to `unlock` (which takes `spin` internally),
//! so callers must never acquire the two regions in the opposite order.

use pok_core::{
    error::LockObjError,
    ids::ThreadId,
    policy::{LockKind, LockingPolicy, QueueingPolicy},
    sched::Scheduler,
};

use crate::fifo::Fifo;

/// The parameters a partition supplies to [`LockObj::create`].
#[derive(Debug, Clone, Copy)]
pub struct CreateAttr {
    pub kind: LockKind,
    pub locking_policy: LockingPolicy,
    pub queueing_policy: QueueingPolicy,
    /// Initial permit count. Ignored for `Mutex` and `Event`, which always
    /// start at 0.
    pub initial_value: u32,
    /// Permit ceiling. Ignored for `Mutex` and `Event`.
    pub max_value: u32,
}

struct Core<const NT: usize> {
    kind: Option<LockKind>,
    locking_policy: LockingPolicy,
    queueing_policy: QueueingPolicy,
    current_value: u32,
    max_value: u32,
    initialized: bool,
    fifo: Fifo<NT>,
}

impl<const NT: usize> Core<NT> {
    const fn new() -> Self {
        Self {
            kind: None,
            locking_policy: LockingPolicy::Standard,
            queueing_policy: QueueingPolicy::Fifo,
            current_value: 0,
            max_value: 0,
            initialized: false,
            fifo: Fifo::new(),
        }
    }
}

struct EventCore<const NT: usize> {
    event_fifo: Fifo<NT>,
}

impl<const NT: usize> EventCore<NT> {
    const fn new() -> Self {
        Self {
            event_fifo: Fifo::new(),
        }
    }
}

/// A single mutex, semaphore, or event, parameterized over the maximum
/// number of threads that can ever block on it at once.
pub struct LockObj<const NT: usize> {
    spin: spin::Mutex<Core<NT>>,
    eventspin: spin::Mutex<EventCore<NT>>,
}

impl<const NT: usize> LockObj<NT> {
    /// An uninitialized slot, as held by a partition's free lock object
    /// table before `create` is called on it.
    pub const fn new() -> Self {
        Self {
            spin: spin::Mutex::new(Core::new()),
            eventspin: spin::Mutex::new(EventCore::new()),
        }
    }

    /// Whether `create` has been called on this slot.
    pub fn is_initialized(&self) -> bool {
        self.spin.lock().initialized
    }

    /// The lock object's kind, once initialized.
    pub fn kind(&self) -> Option<LockKind> {
        self.spin.lock().kind
    }

    /// The current permit count / lock state, for diagnostics and the
    /// `query` gateway operation.
    pub fn value(&self) -> u32 {
        self.spin.lock().current_value
    }

    /// The number of threads currently blocked in the lock/unlock wait
    /// queue, for the `query` gateway operation.
    pub fn waiters(&self) -> usize {
        self.spin.lock().fifo.len()
    }

    /// Initialize a free slot. Resets both wait queues.
    ///
    /// `QueueingPolicy::Priority` is rejected outright rather than
    /// silently treated as FIFO, since this core never implements
    /// priority-ordered release.
    pub fn create(&self, attr: &CreateAttr) -> Result<(), LockObjError> {
        if attr.queueing_policy == QueueingPolicy::Priority {
            return Err(LockObjError::LockObjPolicy);
        }

        let (current_value, max_value) = match attr.kind {
            LockKind::Mutex | LockKind::Event => (0, 0),
            LockKind::Semaphore => (attr.initial_value, attr.max_value),
        };

        let mut core = self.spin.lock();
        core.kind = Some(attr.kind);
        core.locking_policy = attr.locking_policy;
        core.queueing_policy = attr.queueing_policy;
        core.current_value = current_value;
        core.max_value = max_value;
        core.fifo = Fifo::new();
        core.initialized = true;
        drop(core);

        self.eventspin.lock().event_fifo = Fifo::new();
        Ok(())
    }

    /// Acquire the lock object, blocking if unavailable.
    ///
    /// `timeout_ticks == 0` waits indefinitely; otherwise the wait
    /// deadline is `now_ticks() + timeout_ticks`. Returns
    /// [`LockObjError::Timeout`] if the deadline elapses first.
    pub fn lock<S: Scheduler>(&self, sched: &S, timeout_ticks: u64) -> Result<(), LockObjError> {
        let mut core = self.spin.lock();
        if !core.initialized {
            return Err(LockObjError::LockObjNotReady);
        }
        if core.current_value > 0 {
            debug_assert!(core.fifo.is_empty(), "current_value > 0 with threads still queued");
            core.current_value -= 1;
            return Ok(());
        }

        let deadline = if timeout_ticks > 0 {
            sched.now_ticks() + timeout_ticks
        } else {
            0
        };
        let tid = sched.current_thread();
        core.fifo.enqueue(tid)?;
        if deadline > 0 {
            sched.lock_current_thread_timed(deadline);
        } else {
            sched.lock_current_thread();
        }
        drop(core);
        sched.yield_now();

        if deadline == 0 {
            return Ok(());
        }

        // Whether this thread is still in the queue on wakeup is the
        // atomic signal for why it woke: `unlock` dequeues a thread
        // before waking it, so finding ourselves already gone means we
        // were handed the lock, not timed out.
        let mut core = self.spin.lock();
        match core.fifo.remove(tid) {
            Ok(()) => Err(LockObjError::Timeout),
            Err(_) => Ok(()),
        }
    }

    /// Acquire the lock object without blocking.
    pub fn try_lock(&self) -> Result<(), LockObjError> {
        let mut core = self.spin.lock();
        if !core.initialized {
            return Err(LockObjError::LockObjNotReady);
        }
        if core.current_value > 0 {
            core.current_value -= 1;
            Ok(())
        } else {
            Err(LockObjError::Timeout)
        }
    }

    /// Release the lock object, waking the longest-waiting blocked thread
    /// if any, otherwise incrementing `current_value` (saturating at
    /// `max_value` for semaphores).
    pub fn unlock<S: Scheduler>(&self, sched: &S) -> Result<(), LockObjError> {
        let mut core = self.spin.lock();
        if !core.initialized {
            return Err(LockObjError::LockObjNotReady);
        }

        if core.current_value > 0 {
            debug_assert!(core.fifo.is_empty(), "current_value > 0 with threads still queued");
            match core.kind {
                Some(LockKind::Semaphore) => {
                    if core.current_value < core.max_value {
                        core.current_value += 1;
                    }
                }
                _ => log::debug!("unlock of an already-unlocked mutex/event lockobj"),
            }
            drop(core);
        } else if core.fifo.is_empty() {
            core.current_value = 1;
            drop(core);
        } else {
            let tid = core.fifo.dequeue()?;
            drop(core);
            sched.unlock_thread(tid);
        }

        if !self.eventspin.is_locked() {
            sched.yield_now();
        }
        Ok(())
    }

    /// Atomically release the guarding mutex and block until
    /// [`eventsignal`](Self::eventsignal) or
    /// [`eventbroadcast`](Self::eventbroadcast) wakes this thread, or
    /// `timeout_ticks` elapses, then re-acquire the guarding mutex.
    ///
    /// Returns [`LockObjError::Timeout`] if the deadline elapsed, but
    /// still re-acquires the guarding mutex before returning either way,
    /// matching the original implementation's contract that a caller
    /// always leaves `eventwait` holding the lock.
    pub fn eventwait<S: Scheduler>(&self, sched: &S, timeout_ticks: u64) -> Result<(), LockObjError> {
        let mut ev = self.eventspin.lock();

        {
            let core = self.spin.lock();
            if !core.initialized {
                return Err(LockObjError::LockObjNotReady);
            }
            if core.kind != Some(LockKind::Event) {
                return Err(LockObjError::EInval);
            }
        }

        if self.unlock(sched).is_err() {
            return Err(LockObjError::Unavailable);
        }

        let tid = sched.current_thread();
        ev.event_fifo.enqueue(tid)?;
        let deadline = if timeout_ticks > 0 {
            sched.now_ticks() + timeout_ticks
        } else {
            0
        };
        if deadline > 0 {
            sched.lock_current_thread_timed(deadline);
        } else {
            sched.lock_current_thread();
        }
        drop(ev);
        sched.yield_now();

        let mut ev = self.eventspin.lock();
        let wait_result = if deadline == 0 {
            Ok(())
        } else {
            match ev.event_fifo.remove(tid) {
                Ok(()) => Err(LockObjError::Timeout),
                Err(_) => Ok(()),
            }
        };
        drop(ev);

        match self.lock(sched, 0) {
            Ok(()) => wait_result,
            Err(e) => Err(e),
        }
    }

    /// Wake the single longest-waiting thread blocked in `eventwait`.
    pub fn eventsignal<S: Scheduler>(&self, sched: &S) -> Result<(), LockObjError> {
        let mut ev = self.eventspin.lock();
        if ev.event_fifo.is_empty() {
            return Err(LockObjError::NotFound);
        }
        let tid = ev.event_fifo.dequeue()?;
        drop(ev);
        sched.unlock_thread(tid);
        sched.yield_now();
        Ok(())
    }

    /// Wake every thread blocked in `eventwait`.
    pub fn eventbroadcast<S: Scheduler>(&self, sched: &S) -> Result<(), LockObjError> {
        let mut ev = self.eventspin.lock();
        let mut woke_any = false;
        while !ev.event_fifo.is_empty() {
            let tid = ev.event_fifo.dequeue().expect("checked non-empty above");
            sched.unlock_thread(tid);
            woke_any = true;
        }
        drop(ev);
        if woke_any {
            sched.yield_now();
        }
        Ok(())
    }
}

impl<const NT: usize> Default for LockObj<NT> {
    fn default() -> Self {
        Self::new()
    }
}
