pub mod core;
pub mod error;
pub mod report;
pub mod scheduler;
pub mod sim;

pub use crate::core::{
    EventRecord, Pid, Priority, Process, ProcessOutcome, SchedEvent, Schedule, Step, Ticks,
    Timeline,
};
pub use error::{InputError, SimError};
pub use scheduler::{Algorithm, RoundRobinVariant, Scheduler};
pub use sim::{ProcessTable, Sim, SimConfig, Summary, WorkloadConfig, simulate};
