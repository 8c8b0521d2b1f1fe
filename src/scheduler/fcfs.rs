use super::Scheduler;
use crate::core::SimCtx;

pub struct FcfsScheduler;

impl FcfsScheduler {
    /// Runs every task to completion in arrival order. The sort is stable, so
    /// a caller that sorted the tasks first keeps its order among equal
    /// arrivals.
    pub fn run_to_completion(ctx: &mut SimCtx) {
        ctx.sort_tasks_by_key(|process| process.arrival_time);

        for idx in 0..ctx.len() {
            let task = ctx.task(idx);
            let arrival = task.process.arrival_time;
            let burst = task.remaining;

            if ctx.now < arrival {
                ctx.idle_until(arrival);
            }
            ctx.run(idx, burst);
            ctx.complete(idx);
        }
    }
}

impl Scheduler for FcfsScheduler {
    fn schedule(&mut self, ctx: &mut SimCtx) {
        Self::run_to_completion(ctx);
    }
}
