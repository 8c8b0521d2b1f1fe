use super::state::{Pid, Ticks};
use rustc_hash::FxHashMap;

/// One entry of the execution timeline: `pid` held the CPU for `duration` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub pid: Pid,
    pub duration: Ticks,
}

impl Step {
    pub fn new(pid: Pid, duration: Ticks) -> Self {
        Self { pid, duration }
    }
}

impl From<(Pid, Ticks)> for Step {
    fn from((pid, duration): (Pid, Ticks)) -> Self {
        Self::new(pid, duration)
    }
}

/// A step together with the tick it started at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub pid: Pid,
    pub start: Ticks,
    pub duration: Ticks,
}

impl Slice {
    pub fn end(&self) -> Ticks {
        self.start + self.duration
    }

    pub fn step(&self) -> Step {
        Step::new(self.pid, self.duration)
    }
}

/// Ordered, non-overlapping execution slices. Idle time is never recorded;
/// it shows up as a gap between one slice's end and the next one's start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    slices: Vec<Slice>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pid: Pid, start: Ticks, duration: Ticks) {
        debug_assert!(duration > 0, "Empty slice for P{pid}");
        debug_assert!(
            self.slices.last().is_none_or(|last| last.end() <= start),
            "Slice for P{pid} at {start} overlaps the previous one"
        );
        self.slices.push(Slice {
            pid,
            start,
            duration,
        });
    }

    /// Append, merging into the last slice if it belongs to the same pid and
    /// ends exactly where this one starts.
    pub fn extend(&mut self, pid: Pid, start: Ticks, duration: Ticks) {
        if let Some(last) = self.slices.last_mut() {
            if last.pid == pid && last.end() == start {
                last.duration += duration;
                return;
            }
        }
        self.push(pid, start, duration);
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.slices.iter().map(Slice::step)
    }

    pub fn to_steps(&self) -> Vec<Step> {
        self.steps().collect()
    }

    /// The tick-granular view: one `(pid, 1)` step per executed tick.
    pub fn unit_steps(&self) -> Vec<Step> {
        self.slices
            .iter()
            .flat_map(|slice| (0..slice.duration).map(move |_| Step::new(slice.pid, 1)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn makespan(&self) -> Ticks {
        self.slices.last().map_or(0, Slice::end)
    }

    pub fn busy_ticks(&self) -> Ticks {
        self.slices.iter().map(|slice| slice.duration).sum()
    }

    pub fn idle_ticks(&self) -> Ticks {
        self.makespan() - self.busy_ticks()
    }

    pub fn ticks_by_pid(&self) -> FxHashMap<Pid, Ticks> {
        let mut ticks = FxHashMap::default();
        for slice in &self.slices {
            *ticks.entry(slice.pid).or_insert(0) += slice.duration;
        }
        ticks
    }

    /// End of the last slice that ran `pid`.
    pub fn finish_of(&self, pid: Pid) -> Option<Ticks> {
        self.slices
            .iter()
            .rev()
            .find(|slice| slice.pid == pid)
            .map(Slice::end)
    }
}
