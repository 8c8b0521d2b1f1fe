use crate::core::{Pid, SimCtx, Task, Ticks};
use keyed_priority_queue::KeyedPriorityQueue;
use std::cmp::Ordering;

/// Selection order for the ready queue: smallest key first, then earliest
/// arrival, then lowest pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank<K> {
    pub key: K,
    pub arrival: Ticks,
    pub pid: Pid,
}

impl<K> Rank<K> {
    pub fn new(key: K, task: &Task) -> Self {
        Self {
            key,
            arrival: task.process.arrival_time,
            pid: task.process.pid,
        }
    }
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl<K: Ord> PartialOrd for Rank<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Rank<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.arrival.cmp(&self.arrival))
            .then_with(|| other.pid.cmp(&self.pid))
    }
}

/// Shortest-key-first with preemption.
///
/// Equivalent to re-selecting the best arrived task on every tick, but the
/// clock only stops where the choice can change: at the next arrival, or when
/// the running task completes. Between those points the running task stays
/// the best candidate, since its own key can only shrink (remaining time) or
/// stay put (priority).
pub fn run_shortest_first<K, F>(ctx: &mut SimCtx, mut key: F)
where
    K: Ord + Copy,
    F: FnMut(&Task) -> K,
{
    ctx.sort_tasks_by_key(|process| process.arrival_time);

    let mut ready: KeyedPriorityQueue<usize, Rank<K>> = KeyedPriorityQueue::new();
    let mut cursor = 0;

    while !ctx.all_completed() {
        while cursor < ctx.len() && ctx.task(cursor).has_arrived(ctx.now) {
            let task = ctx.task(cursor);
            ready.push(cursor, Rank::new(key(task), task));
            cursor += 1;
        }

        let Some((idx, _)) = ready.pop() else {
            match ctx.tasks.get(cursor) {
                Some(next) => {
                    let arrival = next.process.arrival_time;
                    ctx.idle_until(arrival);
                    continue;
                }
                None => {
                    debug_assert!(false, "Unfinished tasks missing from the ready queue");
                    break;
                }
            }
        };

        let remaining = ctx.task(idx).remaining;
        let slice = match ctx.tasks.get(cursor) {
            Some(next) => remaining.min(next.process.arrival_time - ctx.now),
            None => remaining,
        };

        if ctx.run_merged(idx, slice) == 0 {
            ctx.complete(idx);
        } else {
            let task = ctx.task(idx);
            ready.push(idx, Rank::new(key(task), task));
        }
    }
}
