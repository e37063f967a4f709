//! Domain models for the front-desk queue.

mod patient;
mod section;

pub use patient::*;
pub use section::*;
