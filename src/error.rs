use crate::core::Pid;
use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    EmptyWorkload,
    UnknownPolicy(String),
    ZeroBurst { pid: Pid },
    DuplicatePid(Pid),
    // Latest arrival plus total burst does not fit in the clock
    HorizonOverflow,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWorkload => f.write_str("add at least one process"),
            Self::UnknownPolicy(name) => write!(f, "unknown scheduling policy {name:?}"),
            Self::ZeroBurst { pid } => write!(f, "P{pid} has a zero burst time"),
            Self::DuplicatePid(pid) => write!(f, "pid {pid} appears more than once"),
            Self::HorizonOverflow => f.write_str("workload runs past the end of the tick counter"),
        }
    }
}

impl Error for SimError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Arrival,
    Burst,
    Priority,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Arrival => "arrival time",
            Self::Burst => "burst time",
            Self::Priority => "priority",
        })
    }
}

/// A rejected process entry. Only that entry is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    NotAnInteger { field: Field, value: String },
    NegativeArrival(i64),
    NonPositiveBurst(i64),
    MissingField(Field),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnInteger { field, value } => {
                write!(f, "{field} {value:?} is not a valid integer")
            }
            Self::NegativeArrival(value) => write!(f, "arrival time {value} is negative"),
            Self::NonPositiveBurst(value) => write!(f, "burst time {value} must be positive"),
            Self::MissingField(field) => write!(f, "missing {field}"),
        }
    }
}

impl Error for InputError {}
