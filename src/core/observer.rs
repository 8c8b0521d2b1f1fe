use super::{
    schedule::Schedule,
    state::{Pid, Process, Ticks},
};
use rustc_hash::FxHashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MissingOutcome { pid: Pid },
    UnknownOutcome { pid: Pid },
    TurnaroundMismatch { pid: Pid },
    CompletionMismatch { pid: Pid },
    ServiceMismatch { pid: Pid, expected: Ticks, got: Ticks },
    RanBeforeArrival { pid: Pid, at: Ticks },
    FinishMismatch { pid: Pid, timeline: Option<Ticks>, outcome: Ticks },
    MakespanMismatch { timeline: Ticks, outcomes: Ticks },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOutcome { pid } => write!(f, "P{pid} has no outcome"),
            Self::UnknownOutcome { pid } => write!(f, "outcome for unknown P{pid}"),
            Self::TurnaroundMismatch { pid } => {
                write!(f, "P{pid}: turnaround != waiting + burst")
            }
            Self::CompletionMismatch { pid } => {
                write!(f, "P{pid}: turnaround != completion - arrival")
            }
            Self::ServiceMismatch { pid, expected, got } => {
                write!(f, "P{pid} ran {got} ticks, burst is {expected}")
            }
            Self::RanBeforeArrival { pid, at } => write!(f, "P{pid} ran at {at} before arriving"),
            Self::FinishMismatch {
                pid,
                timeline,
                outcome,
            } => write!(
                f,
                "P{pid} last runs until {timeline:?} but completes at {outcome}"
            ),
            Self::MakespanMismatch { timeline, outcomes } => write!(
                f,
                "timeline ends at {timeline}, last completion is {outcomes}"
            ),
        }
    }
}

/// Cross-checks a finished schedule against the processes it was built from.
#[derive(Debug, Default)]
pub struct Observer {
    runs: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn observe(&mut self, processes: &[Process], schedule: &Schedule) {
        self.runs += 1;

        let violations = Self::check(processes, schedule);
        debug_assert!(
            violations.is_empty(),
            "Run {} broke schedule invariants: {}",
            self.runs,
            violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        );
        for violation in &violations {
            log::error!("schedule invariant broken: {violation}");
        }
    }

    pub fn check(processes: &[Process], schedule: &Schedule) -> Vec<Violation> {
        let mut violations = Vec::new();
        let by_pid: FxHashMap<Pid, &Process> = processes.iter().map(|p| (p.pid, p)).collect();
        let service = schedule.timeline.ticks_by_pid();

        for outcome in &schedule.outcomes {
            let pid = outcome.pid;
            if !by_pid.contains_key(&pid) {
                violations.push(Violation::UnknownOutcome { pid });
                continue;
            }
            if outcome.turnaround_time != outcome.waiting_time + outcome.burst_time {
                violations.push(Violation::TurnaroundMismatch { pid });
            }
            if outcome.turnaround_time + outcome.arrival_time != outcome.completion_time {
                violations.push(Violation::CompletionMismatch { pid });
            }

            let got = service.get(&pid).copied().unwrap_or(0);
            if got != outcome.burst_time {
                violations.push(Violation::ServiceMismatch {
                    pid,
                    expected: outcome.burst_time,
                    got,
                });
            }

            let finish = schedule.timeline.finish_of(pid);
            if finish != Some(outcome.completion_time) {
                violations.push(Violation::FinishMismatch {
                    pid,
                    timeline: finish,
                    outcome: outcome.completion_time,
                });
            }
        }

        for process in processes {
            if schedule.outcome(process.pid).is_none() {
                violations.push(Violation::MissingOutcome { pid: process.pid });
            }
        }

        for slice in schedule.timeline.slices() {
            if let Some(process) = by_pid.get(&slice.pid) {
                if slice.start < process.arrival_time {
                    violations.push(Violation::RanBeforeArrival {
                        pid: slice.pid,
                        at: slice.start,
                    });
                }
            }
        }

        let timeline = schedule.timeline.makespan();
        let outcomes = schedule.makespan();
        if timeline != outcomes {
            violations.push(Violation::MakespanMismatch { timeline, outcomes });
        }

        violations
    }
}
