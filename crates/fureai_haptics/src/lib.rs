//! # Fureai haptics
//!
//! Plays vibration patterns on a haptic actuator.
//!
//! ## Architecture
//!
//! - [`PatternPlayer`] is a plain state machine: `load`, `stop` and
//!   `tick(now)`. It owns no clock and spawns nothing, so the same player
//!   runs on a board's cooperative loop or under test with synthetic time.
//! - [`Actuator`] is the single capability the player needs from the outside
//!   world: set the output to a percentage.
//! - [`HapticDriver`] puts a player on a tokio task with a fixed-rate tick
//!   and hands out a command/status handle.

mod actuator;
mod driver;
pub mod player;
mod tick;

pub use actuator::{Actuator, RecordingActuator, TracingActuator};
pub use driver::HapticDriver;
pub use player::{PatternPlayer, PlayerState, PlayerStatus};
pub use tick::TickConfig;
