use super::config::WorkloadConfig;
use crate::{
    core::{Pid, Priority, Process, Ticks},
    error::{Field, InputError},
};
use rand::prelude::*;

/// Collects processes entered one at a time, handing out pids in creation
/// order starting at 1. A rejected entry leaves the table unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    processes: Vec<Process>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a process from raw text fields. An empty priority means the default.
    pub fn add(&mut self, arrival: &str, burst: &str, priority: &str) -> Result<Pid, InputError> {
        let arrival = parse_field(Field::Arrival, arrival)?;
        let burst = parse_field(Field::Burst, burst)?;
        let priority = match priority.trim() {
            "" => Process::DEFAULT_PRIORITY,
            value => parse_field(Field::Priority, value)?,
        };
        self.push(arrival, burst, priority)
    }

    /// Add a process written as `ARRIVAL,BURST[,PRIORITY]`.
    pub fn add_spec(&mut self, spec: &str) -> Result<Pid, InputError> {
        let mut fields = spec.split(',');
        let arrival = fields.next().unwrap_or("");
        let burst = fields
            .next()
            .ok_or(InputError::MissingField(Field::Burst))?;
        let priority = fields.next().unwrap_or("");
        if let Some(extra) = fields.next() {
            return Err(InputError::NotAnInteger {
                field: Field::Priority,
                value: format!("{priority},{extra}"),
            });
        }
        self.add(arrival, burst, priority)
    }

    pub fn push(&mut self, arrival: i64, burst: i64, priority: Priority) -> Result<Pid, InputError> {
        let arrival_time =
            Ticks::try_from(arrival).map_err(|_| InputError::NegativeArrival(arrival))?;
        let burst_time = match Ticks::try_from(burst) {
            Ok(burst) if burst > 0 => burst,
            _ => return Err(InputError::NonPositiveBurst(burst)),
        };

        let pid = self.processes.len() as Pid + 1;
        self.processes
            .push(Process::with_priority(pid, arrival_time, burst_time, priority));
        Ok(pid)
    }

    pub fn clear(&mut self) {
        self.processes.clear();
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

fn parse_field(field: Field, value: &str) -> Result<i64, InputError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(InputError::MissingField(field));
    }
    value.parse().map_err(|_| InputError::NotAnInteger {
        field,
        value: value.to_owned(),
    })
}

/// Random workload: on every tick a process arrives with probability
/// `p_arrival`; it is short with probability `p_short`, long otherwise.
pub fn bernoulli_workload(config: &WorkloadConfig) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut processes = Vec::new();

    for t in 0..config.ticks {
        if rng.random::<f64>() < config.p_arrival {
            let burst_time = if rng.random::<f64>() < config.p_short {
                config.short_ticks
            } else {
                config.long_ticks
            };
            let priority = rng.random_range(0..=config.max_priority.max(0));

            processes.push(Process::with_priority(
                processes.len() as Pid + 1,
                t,
                burst_time.max(1),
                priority,
            ));
        }
    }

    processes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pids_follow_creation_order() {
        let mut table = ProcessTable::new();
        assert_eq!(table.add("0", "5", ""), Ok(1));
        assert_eq!(table.add(" 1 ", "3", "2"), Ok(2));

        assert_eq!(table.processes()[1], Process::with_priority(2, 1, 3, 2));
        assert_eq!(table.processes()[0].priority, 0);
    }

    #[test]
    fn bad_entry_is_rejected_alone() {
        let mut table = ProcessTable::new();
        table.add("0", "5", "").unwrap();

        assert_eq!(
            table.add("x", "5", ""),
            Err(InputError::NotAnInteger {
                field: Field::Arrival,
                value: "x".to_owned()
            })
        );
        assert_eq!(
            table.add("1", "2.5", ""),
            Err(InputError::NotAnInteger {
                field: Field::Burst,
                value: "2.5".to_owned()
            })
        );
        assert_eq!(table.add("-1", "2", ""), Err(InputError::NegativeArrival(-1)));
        assert_eq!(table.add("1", "0", ""), Err(InputError::NonPositiveBurst(0)));

        assert_eq!(table.len(), 1);
        // The failed entries did not consume pids
        assert_eq!(table.add("2", "1", "-3"), Ok(2));
    }

    #[test]
    fn spec_strings_parse_optional_priority() {
        let mut table = ProcessTable::new();
        assert_eq!(table.add_spec("0,4"), Ok(1));
        assert_eq!(table.add_spec("2,3,1"), Ok(2));
        assert_eq!(
            table.add_spec("7"),
            Err(InputError::MissingField(Field::Burst))
        );
        assert!(table.add_spec("1,2,3,4").is_err());

        assert_eq!(table.processes()[1].priority, 1);
    }

    #[test]
    fn clear_restarts_pids() {
        let mut table = ProcessTable::new();
        table.add("0", "1", "").unwrap();
        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.add("0", "1", ""), Ok(1));
    }

    #[test]
    fn display_matches_process_list_entry() {
        let process = Process::with_priority(3, 4, 5, 1);
        assert_eq!(process.to_string(), "P3: Arrival=4, Burst=5, Priority=1");
    }

    #[test]
    fn bernoulli_workload_is_deterministic_per_seed() {
        let config = WorkloadConfig {
            ticks: 200,
            ..WorkloadConfig::default()
        };
        let first = bernoulli_workload(&config);
        let second = bernoulli_workload(&config);

        assert_eq!(first, second);
        assert!(!first.is_empty());
        assert!(first.windows(2).all(|w| w[0].arrival_time < w[1].arrival_time));
        assert!(first.iter().enumerate().all(|(i, p)| p.pid == i as Pid + 1));
        assert!(
            first
                .iter()
                .all(|p| p.burst_time == config.short_ticks || p.burst_time == config.long_ticks)
        );
    }
}
