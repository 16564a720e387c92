//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock for the immunity window)

pub mod time;

pub use time::{Clock, ManualClock, SystemClock};
