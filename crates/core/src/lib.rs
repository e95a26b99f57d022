#![deny(warnings)]

pub mod circular;
pub mod config;
pub mod list;
pub mod queue;
pub mod stack;
mod util;

pub use circular::{CircularBuffer, EnqueueOutcome, OverwritePolicy};
pub use list::LinkedList;
pub use queue::Queue;
pub use stack::Stack;
