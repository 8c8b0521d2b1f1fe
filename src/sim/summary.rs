use crate::core::{Schedule, Ticks};
use average::{Estimate, Mean};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub makespan: Ticks,
    pub idle_ticks: Ticks,
    /// Busy fraction of `0..makespan`
    pub cpu_utilization: f64,
}

impl Summary {
    pub fn of(schedule: &Schedule) -> Self {
        let waiting = schedule
            .outcomes
            .iter()
            .map(|outcome| outcome.waiting_time as f64);
        let turnaround = schedule
            .outcomes
            .iter()
            .map(|outcome| outcome.turnaround_time as f64);

        let makespan = schedule.timeline.makespan();
        let cpu_utilization = if makespan == 0 {
            0.0
        } else {
            schedule.timeline.busy_ticks() as f64 / makespan as f64
        };

        Self {
            average_waiting_time: avg(waiting),
            average_turnaround_time: avg(turnaround),
            makespan,
            idle_ticks: schedule.timeline.idle_ticks(),
            cpu_utilization,
        }
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}
