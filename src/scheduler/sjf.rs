use super::{FcfsScheduler, Scheduler, preemptive};
use crate::core::SimCtx;

/// Non-preemptive shortest job first: among equal arrivals the shorter burst
/// goes first. The ordering is fixed up front; there is no live ready check.
pub struct SjfScheduler;

impl Scheduler for SjfScheduler {
    fn schedule(&mut self, ctx: &mut SimCtx) {
        ctx.sort_tasks_by_key(|process| (process.arrival_time, process.burst_time));
        FcfsScheduler::run_to_completion(ctx);
    }
}

/// Shortest remaining time first.
pub struct PreemptiveSjfScheduler;

impl Scheduler for PreemptiveSjfScheduler {
    fn schedule(&mut self, ctx: &mut SimCtx) {
        preemptive::run_shortest_first(ctx, |task| task.remaining);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Process, Schedule, Step};

    fn run(mut scheduler: impl Scheduler, processes: &[Process]) -> Schedule {
        let mut ctx = SimCtx::new(processes);
        scheduler.schedule(&mut ctx);
        ctx.into_schedule()
    }

    #[test]
    fn shorter_burst_wins_among_equal_arrivals() {
        let schedule = run(
            SjfScheduler,
            &[
                Process::new(1, 0, 6),
                Process::new(2, 0, 2),
                Process::new(3, 0, 4),
            ],
        );

        assert_eq!(schedule.completion_order(), vec![2, 3, 1]);
        assert_eq!(schedule.outcome(1).unwrap().waiting_time, 6);
    }

    #[test]
    fn non_preemptive_sjf_never_reorders_across_arrivals() {
        // P2 is shorter but arrives later; it still waits for P1.
        let schedule = run(SjfScheduler, &[Process::new(1, 0, 8), Process::new(2, 1, 1)]);

        assert_eq!(
            schedule.timeline.to_steps(),
            vec![Step::new(1, 8), Step::new(2, 1)]
        );
    }

    #[test]
    fn shorter_arrival_preempts_running_job() {
        let schedule = run(
            PreemptiveSjfScheduler,
            &[
                Process::new(1, 0, 8),
                Process::new(2, 1, 4),
                Process::new(3, 2, 9),
                Process::new(4, 3, 5),
            ],
        );

        assert_eq!(
            schedule.timeline.to_steps(),
            vec![
                Step::new(1, 1),
                Step::new(2, 4),
                Step::new(4, 5),
                Step::new(1, 7),
                Step::new(3, 9),
            ]
        );
        let waiting: Vec<_> = [1, 2, 3, 4]
            .iter()
            .map(|&pid| schedule.outcome(pid).unwrap().waiting_time)
            .collect();
        assert_eq!(waiting, vec![9, 0, 15, 2]);
    }

    #[test]
    fn remaining_time_ties_go_to_the_earlier_arrival() {
        // At t=2 both have 2 ticks left; P1 arrived first and keeps the CPU.
        let schedule = run(
            PreemptiveSjfScheduler,
            &[Process::new(1, 0, 4), Process::new(2, 2, 2)],
        );

        assert_eq!(
            schedule.timeline.to_steps(),
            vec![Step::new(1, 4), Step::new(2, 2)]
        );
    }

    #[test]
    fn unit_steps_match_tick_by_tick_emission() {
        let schedule = run(
            PreemptiveSjfScheduler,
            &[Process::new(1, 0, 3), Process::new(2, 1, 1)],
        );

        assert_eq!(
            schedule.timeline.unit_steps(),
            vec![
                Step::new(1, 1),
                Step::new(2, 1),
                Step::new(1, 1),
                Step::new(1, 1),
            ]
        );
    }
}
