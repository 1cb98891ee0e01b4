//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame pacing
//! - Keyboard input

pub mod input;
pub mod time;

pub use input::{InputEvent, InputSlot, map_key};
pub use time::FrameThrottle;
