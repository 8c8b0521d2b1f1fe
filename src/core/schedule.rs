use super::{
    event::EventRecord,
    state::{Pid, Priority, Process, Ticks},
    timeline::Timeline,
};

/// A finished process: its input plus the times the policy produced for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Priority,
    pub waiting_time: Ticks,
    pub turnaround_time: Ticks,
    pub completion_time: Ticks,
}

impl ProcessOutcome {
    pub fn new(process: Process, completion_time: Ticks) -> Self {
        debug_assert!(
            completion_time >= process.arrival_time.saturating_add(process.burst_time),
            "P{} completed before it could have run its burst",
            process.pid
        );
        let turnaround_time = completion_time - process.arrival_time;
        Self {
            pid: process.pid,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            waiting_time: turnaround_time - process.burst_time,
            turnaround_time,
            completion_time,
        }
    }
}

/// Result of one policy run. Always built fresh; the caller's processes are
/// never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub outcomes: Vec<ProcessOutcome>,
    pub timeline: Timeline,
    pub events: Vec<EventRecord>,
}

impl Schedule {
    pub fn outcome(&self, pid: Pid) -> Option<&ProcessOutcome> {
        self.outcomes.iter().find(|outcome| outcome.pid == pid)
    }

    pub fn makespan(&self) -> Ticks {
        self.outcomes
            .iter()
            .map(|outcome| outcome.completion_time)
            .max()
            .unwrap_or(0)
    }

    /// Pids in completion order.
    pub fn completion_order(&self) -> Vec<Pid> {
        let mut finished: Vec<_> = self
            .outcomes
            .iter()
            .map(|outcome| (outcome.completion_time, outcome.pid))
            .collect();
        finished.sort_unstable();
        finished.into_iter().map(|(_, pid)| pid).collect()
    }
}
