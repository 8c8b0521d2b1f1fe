pub mod fcfs;
pub mod preemptive;
pub mod priority;
pub mod round_robin;
pub mod sjf;

use crate::{core::SimCtx, error::SimError};
use std::{fmt, str::FromStr};

pub use fcfs::FcfsScheduler;
pub use priority::{PreemptivePriorityScheduler, PriorityScheduler};
pub use round_robin::{RoundRobinScheduler, RoundRobinVariant};
pub use sjf::{PreemptiveSjfScheduler, SjfScheduler};

/// A scheduling policy. Drives the context until every task has completed.
pub trait Scheduler {
    fn schedule(&mut self, ctx: &mut SimCtx);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Fcfs,
    RoundRobin,
    NonPreemptiveSjf,
    PreemptiveSjf,
    NonPreemptivePriority,
    PreemptivePriority,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Fcfs,
        Algorithm::RoundRobin,
        Algorithm::NonPreemptiveSjf,
        Algorithm::PreemptiveSjf,
        Algorithm::NonPreemptivePriority,
        Algorithm::PreemptivePriority,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::RoundRobin => "Round Robin",
            Self::NonPreemptiveSjf => "Non-Preemptive SJF",
            Self::PreemptiveSjf => "Preemptive SJF",
            Self::NonPreemptivePriority => "Non-Preemptive Priority",
            Self::PreemptivePriority => "Preemptive Priority",
        }
    }

    // Short forms for the command line
    fn alias(self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::RoundRobin => "rr",
            Self::NonPreemptiveSjf => "sjf",
            Self::PreemptiveSjf => "srtf",
            Self::NonPreemptivePriority => "prio",
            Self::PreemptivePriority => "pprio",
        }
    }

    pub fn is_preemptive(self) -> bool {
        matches!(
            self,
            Self::RoundRobin | Self::PreemptiveSjf | Self::PreemptivePriority
        )
    }

    pub fn uses_quantum(self) -> bool {
        self == Self::RoundRobin
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s || algorithm.alias().eq_ignore_ascii_case(s))
            .ok_or_else(|| SimError::UnknownPolicy(s.to_owned()))
    }
}
