//! Property tests for the bounded wait queue: whatever sequence of
//! enqueues, dequeues, and targeted removals is applied, the queue must
//! behave like a plain `VecDeque` of the same capacity.

use pok_core::ids::ThreadId;
use pok_kernel::Fifo;
use quickcheck_macros::quickcheck;
use std::collections::VecDeque;

const CAP: usize = 8;

#[derive(Debug, Clone, Copy)]
enum Op {
    Enqueue(u8),
    Dequeue,
    Remove(u8),
}

impl quickcheck::Arbitrary for Op {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        match u8::arbitrary(g) % 3 {
            0 => Op::Enqueue(u8::arbitrary(g) % (CAP as u8 * 2)),
            1 => Op::Dequeue,
            _ => Op::Remove(u8::arbitrary(g) % (CAP as u8 * 2)),
        }
    }
}

#[quickcheck]
fn matches_a_reference_deque(ops: Vec<Op>) -> bool {
    let mut fifo: Fifo<CAP> = Fifo::new();
    let mut model: VecDeque<u8> = VecDeque::new();

    for op in ops {
        match op {
            Op::Enqueue(v) => {
                let ok = fifo.enqueue(ThreadId::new(v as usize)).is_ok();
                let should_ok = model.len() < CAP;
                if ok != should_ok {
                    return false;
                }
                if ok {
                    model.push_back(v);
                }
            }
            Op::Dequeue => {
                let got = fifo.dequeue().ok().map(|t| t.get() as u8);
                let want = model.pop_front();
                if got != want {
                    return false;
                }
            }
            Op::Remove(v) => {
                let removed = fifo.remove(ThreadId::new(v as usize)).is_ok();
                let pos = model.iter().position(|&x| x == v);
                match pos {
                    Some(i) => {
                        model.remove(i);
                        if !removed {
                            return false;
                        }
                    }
                    None => {
                        if removed {
                            return false;
                        }
                    }
                }
            }
        }
        if fifo.is_empty() != model.is_empty() {
            return false;
        }
        if fifo.len() != model.len() {
            return false;
        }
    }
    true
}

#[quickcheck]
fn remove_then_dequeue_never_yields_removed_thread(a: u8, b: u8, c: u8) -> bool {
    if a == b || b == c || a == c {
        return true;
    }
    let mut fifo: Fifo<CAP> = Fifo::new();
    let ids = [a, b, c].map(|v| ThreadId::new((v % (CAP as u8)) as usize));
    if fifo.enqueue(ids[0]).is_err() || fifo.enqueue(ids[1]).is_err() || fifo.enqueue(ids[2]).is_err() {
        return true;
    }
    if fifo.remove(ids[1]).is_err() {
        return true;
    }
    let mut seen = Vec::new();
    while let Ok(t) = fifo.dequeue() {
        seen.push(t);
    }
    !seen.contains(&ids[1])
}
