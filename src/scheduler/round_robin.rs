use super::Scheduler;
use crate::core::SimCtx;
use std::{collections::VecDeque, num::NonZeroU64};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoundRobinVariant {
    /// Repeated passes over the arrival-sorted list. A task that arrives
    /// mid-pass still gets its turn in that pass if the scan has not reached
    /// it yet.
    #[default]
    Scan,
    /// Single FIFO ready queue. A task whose quantum expires goes to the back,
    /// behind everything that arrived while it ran.
    ReadyQueue,
}

pub struct RoundRobinScheduler {
    quantum: NonZeroU64,
    variant: RoundRobinVariant,
}

impl RoundRobinScheduler {
    pub fn new(quantum: NonZeroU64, variant: RoundRobinVariant) -> Self {
        Self { quantum, variant }
    }

    fn scan(&self, ctx: &mut SimCtx) {
        let quantum = self.quantum.get();

        while !ctx.all_completed() {
            let mut made_progress = false;

            for idx in 0..ctx.len() {
                let task = ctx.task(idx);
                if task.is_completed() || !task.has_arrived(ctx.now) {
                    continue;
                }

                made_progress = true;
                let slice = quantum.min(task.remaining);
                if ctx.run(idx, slice) == 0 {
                    ctx.complete(idx);
                }
            }

            if !made_progress {
                // A whole pass found nothing to run: idle until the next arrival
                match ctx.next_arrival() {
                    Some(arrival) => ctx.idle_until(arrival),
                    None => break,
                }
            }
        }
    }

    fn ready_queue(&self, ctx: &mut SimCtx) {
        let quantum = self.quantum.get();
        let mut queue = VecDeque::with_capacity(ctx.len());
        let mut cursor = 0;

        loop {
            admit_arrivals(ctx, &mut queue, &mut cursor);

            let Some(idx) = queue.pop_front() else {
                match ctx.tasks.get(cursor) {
                    Some(next) => {
                        let arrival = next.process.arrival_time;
                        ctx.idle_until(arrival);
                        continue;
                    }
                    None => break,
                }
            };

            let slice = quantum.min(ctx.task(idx).remaining);
            let remaining = ctx.run(idx, slice);

            // Arrivals during the slice queue up ahead of the expired task
            admit_arrivals(ctx, &mut queue, &mut cursor);
            if remaining == 0 {
                ctx.complete(idx);
            } else {
                queue.push_back(idx);
            }
        }
    }
}

fn admit_arrivals(ctx: &SimCtx, queue: &mut VecDeque<usize>, cursor: &mut usize) {
    while *cursor < ctx.len() && ctx.task(*cursor).has_arrived(ctx.now) {
        queue.push_back(*cursor);
        *cursor += 1;
    }
}

impl Scheduler for RoundRobinScheduler {
    fn schedule(&mut self, ctx: &mut SimCtx) {
        ctx.sort_tasks_by_key(|process| process.arrival_time);

        match self.variant {
            RoundRobinVariant::Scan => self.scan(ctx),
            RoundRobinVariant::ReadyQueue => self.ready_queue(ctx),
        }
    }
}
