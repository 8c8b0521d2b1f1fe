use crate::core::{Pid, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedEvent {
    Dispatched {
        pid: Pid,
    },
    // Lost the CPU with work left
    Preempted {
        pid: Pid,
        remaining: Ticks,
    },
    Completed {
        pid: Pid,
        waiting_time: Ticks,
        turnaround_time: Ticks,
    },
    // Nothing has arrived yet
    CpuIdle {
        until: Ticks,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRecord {
    pub at: Ticks,
    pub event: SchedEvent,
}
