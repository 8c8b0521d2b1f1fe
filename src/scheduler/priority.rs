use super::{FcfsScheduler, Scheduler, preemptive};
use crate::core::SimCtx;

/// Non-preemptive priority. Tasks are ranked by priority before being handed
/// to FCFS, whose stable arrival sort leaves priority as the tie-break among
/// tasks that arrive together.
pub struct PriorityScheduler;

impl Scheduler for PriorityScheduler {
    fn schedule(&mut self, ctx: &mut SimCtx) {
        ctx.sort_tasks_by_key(|process| (process.priority, process.arrival_time));
        FcfsScheduler::run_to_completion(ctx);
    }
}

pub struct PreemptivePriorityScheduler;

impl Scheduler for PreemptivePriorityScheduler {
    fn schedule(&mut self, ctx: &mut SimCtx) {
        preemptive::run_shortest_first(ctx, |task| task.process.priority);
    }
}
