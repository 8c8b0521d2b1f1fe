pub mod event;
pub mod observer;
pub mod schedule;
pub mod state;
pub mod timeline;

pub use event::{EventRecord, SchedEvent};
pub use observer::{Observer, Violation};
pub use schedule::{ProcessOutcome, Schedule};
pub use state::{Pid, Priority, Process, SimCtx, Task, TaskState, Ticks};
pub use timeline::{Slice, Step, Timeline};
