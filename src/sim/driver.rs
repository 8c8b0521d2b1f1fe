use super::config::SimConfig;
use crate::{
    core::{Observer, Process, Schedule, SimCtx, Ticks},
    error::SimError,
    scheduler::{
        Algorithm, FcfsScheduler, PreemptivePriorityScheduler, PreemptiveSjfScheduler,
        PriorityScheduler, RoundRobinScheduler, Scheduler, SjfScheduler,
    },
};
use rustc_hash::FxHashSet;
use std::num::NonZeroU64;

pub struct Sim {
    config: SimConfig,
    observer: Observer,
}

impl Sim {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            observer: Observer::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    /// Run one policy over a private copy of `processes`.
    pub fn run(&mut self, algorithm: Algorithm, processes: &[Process]) -> Result<Schedule, SimError> {
        validate(processes)?;

        log::debug!("{algorithm}: scheduling {} processes", processes.len());
        let mut ctx = SimCtx::new(processes);
        match algorithm {
            Algorithm::Fcfs => FcfsScheduler.schedule(&mut ctx),
            Algorithm::RoundRobin => {
                let quantum = self.quantum_for(processes)?;
                log::debug!("{algorithm}: quantum {quantum}");
                RoundRobinScheduler::new(quantum, self.config.round_robin).schedule(&mut ctx);
            }
            Algorithm::NonPreemptiveSjf => SjfScheduler.schedule(&mut ctx),
            Algorithm::PreemptiveSjf => PreemptiveSjfScheduler.schedule(&mut ctx),
            Algorithm::NonPreemptivePriority => PriorityScheduler.schedule(&mut ctx),
            Algorithm::PreemptivePriority => PreemptivePriorityScheduler.schedule(&mut ctx),
        }

        let schedule = ctx.into_schedule();
        log::debug!(
            "{algorithm}: makespan {} ({} idle ticks, {} steps)",
            schedule.makespan(),
            schedule.timeline.idle_ticks(),
            schedule.timeline.len()
        );

        if self.config.observe {
            self.observer.observe(processes, &schedule);
        }
        Ok(schedule)
    }

    /// Run every policy over the same processes.
    pub fn run_all(&mut self, processes: &[Process]) -> Result<Vec<(Algorithm, Schedule)>, SimError> {
        Algorithm::ALL
            .into_iter()
            .map(|algorithm| Ok((algorithm, self.run(algorithm, processes)?)))
            .collect()
    }

    fn quantum_for(&self, processes: &[Process]) -> Result<NonZeroU64, SimError> {
        self.config
            .quantum
            .or_else(|| default_quantum(processes))
            .ok_or(SimError::EmptyWorkload)
    }
}

impl Default for Sim {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

/// Fallback quantum when the caller gives none: the first process's burst.
pub fn default_quantum(processes: &[Process]) -> Option<NonZeroU64> {
    processes
        .first()
        .and_then(|process| NonZeroU64::new(process.burst_time))
}

/// Run the policy named `policy` (one of the [`Algorithm`] display names).
/// A missing or zero quantum is replaced by [`default_quantum`].
pub fn simulate(
    policy: &str,
    processes: &[Process],
    quantum: Option<Ticks>,
) -> Result<Schedule, SimError> {
    let algorithm: Algorithm = policy.parse()?;
    let config = SimConfig {
        quantum: quantum.and_then(NonZeroU64::new),
        ..SimConfig::default()
    };
    Sim::new(config).run(algorithm, processes)
}

fn validate(processes: &[Process]) -> Result<(), SimError> {
    if processes.is_empty() {
        return Err(SimError::EmptyWorkload);
    }

    let mut seen = FxHashSet::default();
    for process in processes {
        if process.burst_time == 0 {
            return Err(SimError::ZeroBurst { pid: process.pid });
        }
        if !seen.insert(process.pid) {
            return Err(SimError::DuplicatePid(process.pid));
        }
    }

    // Makespan is at most the last arrival plus every burst back to back
    let last_arrival = processes
        .iter()
        .map(|process| process.arrival_time)
        .max()
        .unwrap_or(0);
    processes
        .iter()
        .try_fold(last_arrival, |horizon, process| {
            horizon.checked_add(process.burst_time)
        })
        .map(|_| ())
        .ok_or(SimError::HorizonOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Step;

    #[test]
    fn empty_workload_is_rejected_before_scheduling() {
        let mut sim = Sim::default();
        assert_eq!(sim.run(Algorithm::Fcfs, &[]), Err(SimError::EmptyWorkload));
        assert_eq!(sim.observer().runs(), 0);
    }

    #[test]
    fn unknown_policy_fails_loudly() {
        let processes = [Process::new(1, 0, 1)];
        assert_eq!(
            simulate("Shortest Queue", &processes, None),
            Err(SimError::UnknownPolicy("Shortest Queue".to_owned()))
        );
    }

    #[test]
    fn zero_burst_and_duplicate_pids_are_rejected() {
        let mut sim = Sim::default();
        assert_eq!(
            sim.run(Algorithm::Fcfs, &[Process::new(1, 0, 0)]),
            Err(SimError::ZeroBurst { pid: 1 })
        );
        assert_eq!(
            sim.run(
                Algorithm::Fcfs,
                &[Process::new(1, 0, 1), Process::new(1, 2, 1)]
            ),
            Err(SimError::DuplicatePid(1))
        );
    }

    #[test]
    fn workload_past_the_tick_counter_is_rejected() {
        let mut sim = Sim::default();
        let late = [Process::new(1, Ticks::MAX, 1)];
        let long = [Process::new(1, 0, Ticks::MAX), Process::new(2, 0, 1)];

        for processes in [&late[..], &long[..]] {
            for algorithm in Algorithm::ALL {
                assert_eq!(
                    sim.run(algorithm, processes),
                    Err(SimError::HorizonOverflow)
                );
            }
        }
    }

    #[test]
    fn workload_ending_exactly_at_the_tick_limit_runs() {
        let processes = [Process::new(1, Ticks::MAX - 3, 3)];
        let schedule = Sim::default().run(Algorithm::Fcfs, &processes).unwrap();

        let outcome = schedule.outcome(1).unwrap();
        assert_eq!(outcome.completion_time, Ticks::MAX);
        assert_eq!((outcome.waiting_time, outcome.turnaround_time), (0, 3));
    }

    #[test]
    fn missing_quantum_falls_back_to_first_burst() {
        let processes = [Process::new(1, 0, 3), Process::new(2, 0, 5)];

        for quantum in [None, Some(0)] {
            let schedule = simulate("Round Robin", &processes, quantum).unwrap();
            assert_eq!(
                schedule.timeline.to_steps(),
                vec![Step::new(1, 3), Step::new(2, 3), Step::new(2, 2)]
            );
        }
    }

    #[test]
    fn inputs_are_left_untouched_across_runs() {
        let processes = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];
        let before = processes.clone();
        let mut sim = Sim::default();

        let first = sim.run(Algorithm::Fcfs, &processes).unwrap();
        let second = sim.run(Algorithm::Fcfs, &processes).unwrap();

        assert_eq!(processes, before);
        assert_eq!(first, second);
        assert_eq!(sim.observer().runs(), 2);
    }

    #[test]
    fn run_all_covers_every_algorithm() {
        let processes = [Process::new(1, 0, 2), Process::new(2, 1, 1)];
        let results = Sim::default().run_all(&processes).unwrap();

        let algorithms: Vec<_> = results.iter().map(|(algorithm, _)| *algorithm).collect();
        assert_eq!(algorithms, Algorithm::ALL);
        assert!(results.iter().all(|(_, schedule)| schedule.makespan() == 3));
    }
}
