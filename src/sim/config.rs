use crate::{
    core::{Priority, Ticks},
    scheduler::RoundRobinVariant,
};
use std::num::NonZeroU64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Round Robin quantum. `None` falls back to the first process's burst.
    pub quantum: Option<NonZeroU64>,
    pub round_robin: RoundRobinVariant,
    /// Cross-check every schedule with the observer
    pub observe: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            quantum: None,
            round_robin: RoundRobinVariant::Scan,
            observe: true,
        }
    }
}

impl SimConfig {
    pub fn with_quantum(quantum: Ticks) -> Self {
        Self {
            quantum: NonZeroU64::new(quantum),
            ..Self::default()
        }
    }
}

/// Parameters of the random workload: one Bernoulli trial per tick decides
/// whether a process arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkloadConfig {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_ticks: Ticks,
    pub long_ticks: Ticks,
    pub max_priority: Priority,
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            ticks: 20,
            p_arrival: 0.3,
            p_short: 0.3,
            short_ticks: 2,
            long_ticks: 6,
            max_priority: 4,
            seed: 0,
        }
    }
}
