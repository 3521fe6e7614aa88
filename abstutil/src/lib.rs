//! Small helpers shared by the other crates: phase timing through `log`, a min-ordering wrapper
//! for `BinaryHeap`, and logger setup for binaries.

#[macro_use]
extern crate log;

pub mod logger;
mod priority_queue;
mod time;
mod utils;

pub use crate::priority_queue::PriorityQueueItem;
pub use crate::time::{elapsed_seconds, prettyprint_time, Timer};
pub use crate::utils::prettyprint_usize;
