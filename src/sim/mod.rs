pub mod config;
pub mod driver;
pub mod summary;
pub mod workload;

pub use config::{SimConfig, WorkloadConfig};
pub use driver::{Sim, default_quantum, simulate};
pub use summary::Summary;
pub use workload::{ProcessTable, bernoulli_workload};
