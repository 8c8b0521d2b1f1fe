//! Plain-text rendering of a finished schedule: the per-process result
//! lines with their averages, and a one-row Gantt chart of the timeline.

use crate::{
    core::{Pid, Schedule, Ticks, Timeline},
    sim::Summary,
};
use std::fmt::Write;

const PALETTE: [char; 5] = ['#', '=', '*', '+', '%'];
const IDLE: char = '.';
const MAX_WIDTH: Ticks = 72;

pub fn render_results(schedule: &Schedule) -> String {
    let mut out = String::new();
    for outcome in &schedule.outcomes {
        let _ = writeln!(
            out,
            "P{}: Waiting Time={}, Turnaround Time={}",
            outcome.pid, outcome.waiting_time, outcome.turnaround_time
        );
    }

    let summary = Summary::of(schedule);
    let _ = write!(
        out,
        "\nAverage Waiting Time: {:.2}\nAverage Turnaround Time: {:.2}",
        summary.average_waiting_time, summary.average_turnaround_time
    );
    out
}

pub fn glyph(pid: Pid) -> char {
    PALETTE[(pid % PALETTE.len() as Pid) as usize]
}

/// Three rows: slice labels, the bar itself, and the tick offsets where each
/// slice starts. Long timelines are scaled down to fit.
pub fn render_gantt(title: &str, timeline: &Timeline) -> String {
    let makespan = timeline.makespan();
    if makespan == 0 {
        return format!("{title}\n(empty)");
    }

    let width = makespan.min(MAX_WIDTH);
    // Scaled in u128: `t * width` can overflow for very long timelines
    let column =
        |t: Ticks| (u128::from(t) * u128::from(width) / u128::from(makespan)) as usize;

    let mut labels = vec![' '; width as usize + 1];
    let mut bar = vec![IDLE; width as usize];
    let mut axis = vec![' '; width as usize + 8];

    for slice in timeline.slices() {
        let (from, to) = (column(slice.start), column(slice.end()));
        bar[from..to].fill(glyph(slice.pid));

        let label = format!("P{}", slice.pid);
        if label.len() <= to - from {
            for (i, c) in label.chars().enumerate() {
                labels[from + i] = c;
            }
        }
        place(&mut axis, from, slice.start);
    }
    place(&mut axis, width as usize, makespan);

    let labels: String = labels.into_iter().collect();
    let bar: String = bar.into_iter().collect();
    let axis: String = axis.into_iter().collect();
    format!(
        "{title}\n {}\n|{bar}|\n{}",
        labels.trim_end(),
        axis.trim_end()
    )
}

// Write `t` at `col` unless it would overwrite an earlier offset
fn place(axis: &mut Vec<char>, col: usize, t: Ticks) {
    let text = t.to_string();
    let end = col + text.len();
    if end > axis.len() {
        axis.resize(end, ' ');
    }
    if (col > 0 && axis[col - 1] != ' ') || axis[col..end].iter().any(|&c| c != ' ') {
        return;
    }
    for (i, c) in text.chars().enumerate() {
        axis[col + i] = c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::Process, scheduler::Algorithm, sim::Sim};

    fn fcfs(processes: &[Process]) -> Schedule {
        Sim::default().run(Algorithm::Fcfs, processes).unwrap()
    }

    #[test]
    fn result_text_lists_processes_and_averages() {
        let schedule = fcfs(&[Process::new(1, 0, 5), Process::new(2, 1, 3)]);

        assert_eq!(
            render_results(&schedule),
            "P1: Waiting Time=0, Turnaround Time=5\n\
             P2: Waiting Time=4, Turnaround Time=7\n\
             \n\
             Average Waiting Time: 2.00\n\
             Average Turnaround Time: 6.00"
        );
    }

    #[test]
    fn gantt_draws_one_bar_per_slice_with_idle_gap() {
        let schedule = fcfs(&[Process::new(1, 0, 3), Process::new(2, 5, 2)]);
        let chart = render_gantt("FCFS", &schedule.timeline);

        assert_eq!(chart, "FCFS\n P1   P2\n|===..**|\n0    5 7");
    }

    #[test]
    fn glyph_cycles_through_palette() {
        assert_eq!(glyph(1), glyph(6));
        assert_ne!(glyph(1), glyph(2));
    }

    #[test]
    fn wide_timelines_are_scaled() {
        let schedule = fcfs(&[Process::new(1, 0, 500), Process::new(2, 0, 100)]);
        let chart = render_gantt("FCFS", &schedule.timeline);
        let bar = chart.lines().nth(2).unwrap();

        assert_eq!(bar.len(), MAX_WIDTH as usize + 2);
        assert_eq!(bar.matches(glyph(1)).count(), 60);
    }

    #[test]
    fn huge_bursts_render_without_overflow() {
        let burst = 300_000_000_000_000_000;
        let schedule = fcfs(&[Process::new(1, 0, burst)]);
        let chart = render_gantt("FCFS", &schedule.timeline);
        let lines: Vec<_> = chart.lines().collect();

        assert_eq!(lines[1], " P1");
        assert_eq!(lines[2].matches(glyph(1)).count(), MAX_WIDTH as usize);
        assert!(lines[3].ends_with(&burst.to_string()));
    }

    #[test]
    fn late_slice_in_huge_timeline_lands_in_last_columns() {
        let mut timeline = Timeline::new();
        timeline.push(1, 0, Ticks::MAX / 2);
        timeline.push(2, Ticks::MAX / 2, Ticks::MAX / 2);

        let chart = render_gantt("FCFS", &timeline);
        let bar = chart.lines().nth(2).unwrap();

        assert_eq!(bar.matches(glyph(1)).count(), 36);
        assert_eq!(bar.matches(glyph(2)).count(), 36);
    }
}
