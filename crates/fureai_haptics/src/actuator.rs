//! Output side of the player: whatever physically moves the motor.

use std::sync::{Arc, Mutex};

/// A haptic output that can be set to a percentage level.
///
/// Calls are fire-and-forget: the player never waits for, or checks, an
/// acknowledgement. Implementations must not block.
pub trait Actuator: Send {
    fn apply_output(&mut self, intensity: u8);
}

impl<A: Actuator + ?Sized> Actuator for Box<A> {
    fn apply_output(&mut self, intensity: u8) {
        (**self).apply_output(intensity)
    }
}

/// Logs every level change instead of driving hardware.
#[derive(Debug, Clone)]
pub struct TracingActuator {
    name: String,
    last: Option<u8>,
}

impl TracingActuator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last: None,
        }
    }
}

impl Actuator for TracingActuator {
    fn apply_output(&mut self, intensity: u8) {
        if self.last != Some(intensity) {
            tracing::info!(actuator = %self.name, "output -> {}%", intensity);
        } else {
            tracing::trace!(actuator = %self.name, "output held at {}%", intensity);
        }
        self.last = Some(intensity);
    }
}

/// Keeps every applied level in a shared trace.
///
/// Clones share the same trace, so a host can hand one clone to a player
/// (or a driver task) and read the levels back through another.
#[derive(Debug, Clone, Default)]
pub struct RecordingActuator {
    trace: Arc<Mutex<Vec<u8>>>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every level applied so far, oldest first.
    pub fn trace(&self) -> Vec<u8> {
        self.trace
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Most recent level, if anything was applied yet.
    pub fn last(&self) -> Option<u8> {
        self.trace
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .copied()
    }

    pub fn clear(&self) {
        self.trace
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl Actuator for RecordingActuator {
    fn apply_output(&mut self, intensity: u8) {
        self.trace
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(intensity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_clones_share_trace() {
        let recorder = RecordingActuator::new();
        let mut handle = recorder.clone();
        handle.apply_output(40);
        handle.apply_output(0);
        assert_eq!(recorder.trace(), vec![40, 0]);
        assert_eq!(recorder.last(), Some(0));
        recorder.clear();
        assert!(recorder.trace().is_empty());
        assert_eq!(recorder.last(), None);
    }

    #[test]
    fn test_boxed_actuator_forwards() {
        let recorder = RecordingActuator::new();
        let mut boxed: Box<dyn Actuator> = Box::new(recorder.clone());
        boxed.apply_output(75);
        assert_eq!(recorder.trace(), vec![75]);
    }

    #[test]
    fn test_tracing_actuator_remembers_last() {
        let mut a = TracingActuator::new("test");
        a.apply_output(10);
        a.apply_output(10);
        assert_eq!(a.last, Some(10));
    }
}
