//! Tick configuration for the haptic driver
//!
//! The tick rate bounds how late a step edge can be observed at the motor.
//! It does not affect total pattern length: the player schedules boundaries
//! from the pattern itself.

use std::time::Duration;

/// Configuration for the player tick
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// How often the player is advanced (default: 20ms)
    pub interval: Duration,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(20),
        }
    }
}

impl TickConfig {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(ms.max(1)),
        }
    }

    /// Fast tick for crisp step edges
    pub fn fast() -> Self {
        Self::from_millis(10)
    }

    /// Slow tick for resource-constrained hosts
    pub fn slow() -> Self {
        Self::from_millis(50)
    }

    /// Very fast tick for testing
    pub fn testing() -> Self {
        Self::from_millis(5)
    }
}
