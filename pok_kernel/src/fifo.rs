//! Bounded wait queue: a ring buffer of waiting thread ids.
//!
//! Capacity is fixed at `NB_THREADS` since only distinct threads can ever
//! be enqueued; a [`LockObjError::Full`] from [`Fifo::enqueue`] therefore
//! indicates a double-enqueue kernel bug rather than genuine exhaustion.

use pok_core::{error::LockObjError, ids::ThreadId};

/// A bounded FIFO of [`ThreadId`]s, backed by a fixed-size ring buffer.
#[derive(Debug, Clone)]
pub struct Fifo<const CAP: usize> {
    buffer: [Option<ThreadId>; CAP],
    head: usize,
    tail: usize,
    is_empty: bool,
}

impl<const CAP: usize> Fifo<CAP> {
    /// An empty queue.
    pub const fn new() -> Self {
        Self {
            buffer: [None; CAP],
            head: 0,
            tail: 0,
            is_empty: true,
        }
    }

    /// Whether the queue currently holds no threads.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// The number of threads currently waiting.
    pub fn len(&self) -> usize {
        if self.is_empty {
            0
        } else if self.tail > self.head {
            self.tail - self.head
        } else {
            CAP - self.head + self.tail
        }
    }

    /// Append `tid` to the tail of the queue.
    pub fn enqueue(&mut self, tid: ThreadId) -> Result<(), LockObjError> {
        if !self.is_empty && self.head == self.tail {
            return Err(LockObjError::Full);
        }
        self.buffer[self.tail] = Some(tid);
        self.tail = (self.tail + 1) % CAP;
        self.is_empty = false;
        Ok(())
    }

    /// Remove and return the thread at the head of the queue.
    pub fn dequeue(&mut self) -> Result<ThreadId, LockObjError> {
        if self.is_empty {
            return Err(LockObjError::Empty);
        }
        let tid = self.buffer[self.head].take().expect("live slot holds a thread id");
        self.head = (self.head + 1) % CAP;
        if self.head == self.tail {
            self.is_empty = true;
        }
        Ok(tid)
    }

    /// Return the thread at the head of the queue without removing it.
    pub fn peek(&self) -> Result<ThreadId, LockObjError> {
        if self.is_empty {
            Err(LockObjError::Empty)
        } else {
            Ok(self.buffer[self.head].expect("live slot holds a thread id"))
        }
    }

    /// Remove `tid` from the queue wherever it is, preserving the FIFO
    /// order of the remaining entries.
    ///
    /// Scans the whole live range `[head, tail)` (mod `CAP`) for a match.
    /// A prior revision of this routine broke out of the scan after the
    /// first slot regardless of whether it matched; that defect is not
    /// reproduced here.
    pub fn remove(&mut self, tid: ThreadId) -> Result<(), LockObjError> {
        if self.is_empty {
            return Err(LockObjError::NotFound);
        }

        let mut i = self.head;
        let mut found = None;
        loop {
            if self.buffer[i] == Some(tid) {
                found = Some(i);
                break;
            }
            i = (i + 1) % CAP;
            if i == self.tail {
                break;
            }
        }

        let mut pos = match found {
            Some(pos) => pos,
            None => return Err(LockObjError::NotFound),
        };

        loop {
            let next = (pos + 1) % CAP;
            if next == self.tail {
                break;
            }
            self.buffer[pos] = self.buffer[next];
            pos = next;
        }

        self.tail = if self.tail == 0 { CAP - 1 } else { self.tail - 1 };
        self.buffer[self.tail] = None;
        if self.head == self.tail {
            self.is_empty = true;
        }
        Ok(())
    }
}

impl<const CAP: usize> Default for Fifo<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tid(n: usize) -> ThreadId {
        ThreadId::new(n)
    }

    #[test]
    fn starts_empty() {
        let q: Fifo<4> = Fifo::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn enqueue_dequeue_is_fifo() {
        let mut q: Fifo<4> = Fifo::new();
        q.enqueue(tid(1)).unwrap();
        q.enqueue(tid(2)).unwrap();
        q.enqueue(tid(3)).unwrap();
        assert_eq!(q.dequeue().unwrap(), tid(1));
        assert_eq!(q.dequeue().unwrap(), tid(2));
        assert_eq!(q.dequeue().unwrap(), tid(3));
        assert!(q.is_empty());
    }

    #[test]
    fn enqueue_on_full_fails() {
        let mut q: Fifo<2> = Fifo::new();
        q.enqueue(tid(1)).unwrap();
        q.enqueue(tid(2)).unwrap();
        assert_eq!(q.enqueue(tid(3)), Err(LockObjError::Full));
    }

    #[test]
    fn dequeue_on_empty_fails() {
        let mut q: Fifo<2> = Fifo::new();
        assert_eq!(q.dequeue(), Err(LockObjError::Empty));
    }

    #[test]
    fn remove_from_middle_preserves_order() {
        let mut q: Fifo<4> = Fifo::new();
        q.enqueue(tid(1)).unwrap();
        q.enqueue(tid(2)).unwrap();
        q.enqueue(tid(3)).unwrap();
        q.remove(tid(2)).unwrap();
        assert_eq!(q.dequeue().unwrap(), tid(1));
        assert_eq!(q.dequeue().unwrap(), tid(3));
        assert!(q.is_empty());
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut q: Fifo<4> = Fifo::new();
        q.enqueue(tid(1)).unwrap();
        assert_eq!(q.remove(tid(99)), Err(LockObjError::NotFound));
    }

    #[test]
    fn remove_scans_past_the_first_slot() {
        // Regression test for the early-`break` defect found in the
        // original C source: the third enqueued thread must still be
        // removable even though it isn't at the head.
        let mut q: Fifo<4> = Fifo::new();
        q.enqueue(tid(10)).unwrap();
        q.enqueue(tid(20)).unwrap();
        q.enqueue(tid(30)).unwrap();
        assert!(q.remove(tid(30)).is_ok());
        assert_eq!(q.dequeue().unwrap(), tid(10));
        assert_eq!(q.dequeue().unwrap(), tid(20));
        assert!(q.is_empty());
    }

    #[test]
    fn wraps_around_the_ring() {
        let mut q: Fifo<3> = Fifo::new();
        q.enqueue(tid(1)).unwrap();
        q.enqueue(tid(2)).unwrap();
        q.dequeue().unwrap();
        q.enqueue(tid(3)).unwrap();
        q.enqueue(tid(4)).unwrap();
        assert_eq!(q.dequeue().unwrap(), tid(2));
        assert_eq!(q.dequeue().unwrap(), tid(3));
        assert_eq!(q.dequeue().unwrap(), tid(4));
        assert!(q.is_empty());
    }
}
