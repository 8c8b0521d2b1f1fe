use super::{
    event::{EventRecord, SchedEvent},
    schedule::{ProcessOutcome, Schedule},
    timeline::Timeline,
};
use std::fmt;

pub type Pid = u64;
pub type Ticks = u64;
// Lower value means higher priority
pub type Priority = i64;

/// A process as entered by the user. Immutable input to every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Process {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Priority,
}

impl Process {
    pub const DEFAULT_PRIORITY: Priority = 0;

    pub fn new(pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self::with_priority(pid, arrival_time, burst_time, Self::DEFAULT_PRIORITY)
    }

    pub fn with_priority(
        pid: Pid,
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: Priority,
    ) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            priority,
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{}: Arrival={}, Burst={}, Priority={}",
            self.pid, self.arrival_time, self.burst_time, self.priority
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Runnable,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub process: Process,
    pub state: TaskState,
    pub remaining: Ticks,
    pub completion_time: Option<Ticks>,
}

impl Task {
    fn new(process: Process) -> Self {
        Self {
            process,
            state: TaskState::Runnable,
            remaining: process.burst_time,
            completion_time: None,
        }
    }

    pub fn has_arrived(&self, now: Ticks) -> bool {
        self.process.arrival_time <= now
    }

    pub fn is_completed(&self) -> bool {
        self.state == TaskState::Completed
    }
}

/// Per-run simulation state: one CPU, a clock, and a private copy of the
/// processes being scheduled. Policies only decide *which* task runs and for
/// how long; the context does the bookkeeping.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub tasks: Vec<Task>,
    current: Option<usize>,
    completed: usize,
    timeline: Timeline,
    events: Vec<EventRecord>,
}

impl SimCtx {
    pub fn new(processes: &[Process]) -> Self {
        Self {
            now: 0,
            tasks: processes.iter().copied().map(Task::new).collect(),
            current: None,
            completed: 0,
            timeline: Timeline::new(),
            events: Vec::new(),
        }
    }

    /// Stable sort, so equal keys keep the order the tasks are already in.
    /// Only valid before anything has run: indices are not stable across it.
    pub fn sort_tasks_by_key<K: Ord>(&mut self, mut key: impl FnMut(&Process) -> K) {
        debug_assert!(
            self.timeline.is_empty(),
            "Tasks must not be reordered mid-simulation"
        );
        self.tasks.sort_by_key(|task| key(&task.process));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, idx: usize) -> &Task {
        &self.tasks[idx]
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.tasks.len()
    }

    /// Earliest arrival among unfinished tasks that have not arrived yet.
    pub fn next_arrival(&self) -> Option<Ticks> {
        self.tasks
            .iter()
            .filter(|task| !task.is_completed() && !task.has_arrived(self.now))
            .map(|task| task.process.arrival_time)
            .min()
    }

    pub fn idle_until(&mut self, until: Ticks) {
        debug_assert!(until >= self.now, "Clock cannot move backwards");
        if until == self.now {
            return;
        }
        debug_assert!(
            self.current
                .is_none_or(|idx| self.tasks[idx].state != TaskState::Running),
            "CPU cannot idle while a task is running"
        );

        log::trace!("t={} cpu idle until {}", self.now, until);
        self.record(SchedEvent::CpuIdle { until });
        self.current = None;
        self.now = until;
    }

    /// Run `idx` for `ticks`, recording a separate timeline step.
    /// Returns the task's remaining time.
    pub fn run(&mut self, idx: usize, ticks: Ticks) -> Ticks {
        self.run_inner(idx, ticks, false)
    }

    /// Like [`SimCtx::run`], but extends the previous step when the same task
    /// simply keeps the CPU.
    pub fn run_merged(&mut self, idx: usize, ticks: Ticks) -> Ticks {
        self.run_inner(idx, ticks, true)
    }

    fn run_inner(&mut self, idx: usize, ticks: Ticks, merge: bool) -> Ticks {
        debug_assert!(ticks > 0, "Slices must be at least one tick long");
        debug_assert!(
            self.tasks[idx].has_arrived(self.now),
            "Task {} scheduled before its arrival",
            self.tasks[idx].process.pid
        );
        debug_assert!(
            ticks <= self.tasks[idx].remaining,
            "Task {} scheduled past its burst",
            self.tasks[idx].process.pid
        );

        self.switch_to(idx);

        let pid = self.tasks[idx].process.pid;
        if merge {
            self.timeline.extend(pid, self.now, ticks);
        } else {
            self.timeline.push(pid, self.now, ticks);
        }
        self.now = self.now.saturating_add(ticks);

        let task = &mut self.tasks[idx];
        task.remaining -= ticks;
        task.remaining
    }

    fn switch_to(&mut self, idx: usize) {
        if self.current == Some(idx) {
            return;
        }

        if let Some(prev) = self.current {
            let prev = &mut self.tasks[prev];
            if prev.state == TaskState::Running {
                prev.state = TaskState::Runnable;
                let event = SchedEvent::Preempted {
                    pid: prev.process.pid,
                    remaining: prev.remaining,
                };
                self.record(event);
            }
        }

        let pid = self.tasks[idx].process.pid;
        log::trace!("t={} dispatch P{}", self.now, pid);
        self.tasks[idx].state = TaskState::Running;
        self.current = Some(idx);
        self.record(SchedEvent::Dispatched { pid });
    }

    pub fn complete(&mut self, idx: usize) {
        let now = self.now;
        let task = &mut self.tasks[idx];
        debug_assert_eq!(
            task.remaining, 0,
            "Task {} completed with work left",
            task.process.pid
        );
        debug_assert!(
            task.state == TaskState::Running,
            "Task {} must have been running before marked complete",
            task.process.pid
        );

        task.state = TaskState::Completed;
        task.completion_time = Some(now);
        self.completed += 1;

        let turnaround_time = now - task.process.arrival_time;
        let waiting_time = turnaround_time - task.process.burst_time;
        let pid = task.process.pid;
        log::trace!("t={now} P{pid} completed (waiting={waiting_time}, turnaround={turnaround_time})");
        self.record(SchedEvent::Completed {
            pid,
            waiting_time,
            turnaround_time,
        });
    }

    fn record(&mut self, event: SchedEvent) {
        self.events.push(EventRecord { at: self.now, event });
    }

    /// Consume the context into the run's result. Outcomes keep the order the
    /// policy sorted the tasks into.
    pub fn into_schedule(self) -> Schedule {
        debug_assert!(self.all_completed(), "Simulation ended with unfinished tasks");

        let outcomes = self
            .tasks
            .iter()
            .filter_map(|task| {
                task.completion_time
                    .map(|completion| ProcessOutcome::new(task.process, completion))
            })
            .collect();

        Schedule {
            outcomes,
            timeline: self.timeline,
            events: self.events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_then_run_keeps_gap_in_timeline() {
        let mut ctx = SimCtx::new(&[Process::new(1, 5, 2)]);
        ctx.idle_until(5);
        assert_eq!(ctx.run(0, 2), 0);
        ctx.complete(0);

        let schedule = ctx.into_schedule();
        assert_eq!(schedule.timeline.slices()[0].start, 5);
        assert_eq!(schedule.outcomes[0].waiting_time, 0);
        assert_eq!(schedule.outcomes[0].turnaround_time, 2);
        assert!(matches!(
            schedule.events[0].event,
            SchedEvent::CpuIdle { until: 5 }
        ));
    }

    #[test]
    fn switching_away_from_unfinished_task_records_preemption() {
        let mut ctx = SimCtx::new(&[Process::new(1, 0, 3), Process::new(2, 0, 1)]);
        ctx.run(0, 1);
        ctx.run(1, 1);
        ctx.complete(1);
        ctx.run(0, 2);
        ctx.complete(0);

        let schedule = ctx.into_schedule();
        let preempted: Vec<_> = schedule
            .events
            .iter()
            .filter(|record| matches!(record.event, SchedEvent::Preempted { .. }))
            .collect();
        assert_eq!(preempted.len(), 1);
        assert_eq!(preempted[0].at, 1);
        assert_eq!(
            preempted[0].event,
            SchedEvent::Preempted {
                pid: 1,
                remaining: 2
            }
        );
    }

    #[test]
    fn run_merged_extends_previous_step_of_same_task() {
        let mut ctx = SimCtx::new(&[Process::new(1, 0, 3)]);
        ctx.run_merged(0, 1);
        ctx.run_merged(0, 2);
        ctx.complete(0);

        let schedule = ctx.into_schedule();
        assert_eq!(schedule.timeline.len(), 1);
        assert_eq!(schedule.timeline.makespan(), 3);
    }

    #[test]
    fn next_arrival_ignores_arrived_and_finished_tasks() {
        let ctx = SimCtx::new(&[
            Process::new(1, 0, 1),
            Process::new(2, 7, 1),
            Process::new(3, 4, 1),
        ]);
        assert_eq!(ctx.next_arrival(), Some(4));
    }
}
