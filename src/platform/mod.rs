//! Platform abstraction layer
//!
//! Whatever window or terminal drives the game translates its raw events
//! into [`InputEvent`]s and feeds its frame deltas through a [`FrameClock`].

pub mod input;
pub mod time;

pub use input::{InputEvent, TimedInput};
pub use time::FrameClock;
