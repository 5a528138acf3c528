//! The pattern player state machine.
//!
//! ```text
//!            load              dur_i elapsed           dur_i + interval elapsed
//!   Idle ──────────▶ PlayingStep(i) ──────────▶ IntervalGap(i) ──────────▶ PlayingStep(i+1)
//!                         ▲                                │  last step, repeats left
//!                         └────────────────────────────────┘
//!                                                          │  last step, no repeats left
//!                                                          ▼
//!   any state ─────────── stop ─────────────────────────▶ Stopped
//! ```
//!
//! Time is whatever monotonic clock the host uses, expressed as a `Duration`
//! since an arbitrary origin. The player never reads a clock itself: every
//! call that depends on time takes `now`, which keeps playback deterministic.
//!
//! Output is non-zero only in `PlayingStep`. Step boundaries are scheduled
//! from the previous boundary rather than from the tick that noticed them,
//! so coarse or jittery ticks never stretch a pattern: the total active time
//! is always `repeat_count × Σ(duration_i + interval)`.

use crate::actuator::Actuator;
use fureai_core::{PatternError, VibrationPattern};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the player is in its pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "step", rename_all = "snake_case")]
pub enum PlayerState {
    Idle,
    PlayingStep(usize),
    IntervalGap(usize),
    Stopped,
}

/// Snapshot of a player, as reported to hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub state: PlayerState,
    pub running: bool,
    /// Level currently applied to the actuator.
    pub output: u8,
    /// 1-based pass through the pattern (0 when nothing is loaded).
    pub repeat: u32,
    pub repeat_count: u32,
    /// Playback time left, in milliseconds.
    pub remaining_ms: u64,
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self {
            state: PlayerState::Idle,
            running: false,
            output: 0,
            repeat: 0,
            repeat_count: 0,
            remaining_ms: 0,
        }
    }
}

/// Bookkeeping for the pattern being played. Exists only while running.
#[derive(Debug)]
struct Runtime {
    pattern: VibrationPattern,
    step_started: Duration,
    repeats_done: u32,
}

impl Runtime {
    fn step_ms(&self, i: usize) -> u64 {
        self.pattern.steps()[i].duration as u64
    }

    fn interval_ms(&self) -> u64 {
        self.pattern.interval() as u64
    }

    /// Active time consumed up to `now`, given the current step index.
    fn elapsed_ms(&self, step: usize, now: Duration) -> u64 {
        let before_step = (0..step)
            .map(|i| self.step_ms(i) + self.interval_ms())
            .fold(0u64, u64::saturating_add);
        let in_step = u64::try_from(now.saturating_sub(self.step_started).as_millis())
            .unwrap_or(u64::MAX);
        (self.repeats_done as u64)
            .saturating_mul(self.pattern.cycle_ms())
            .saturating_add(before_step)
            .saturating_add(in_step)
    }
}

/// Plays one vibration pattern at a time on one actuator.
pub struct PatternPlayer<A: Actuator> {
    actuator: A,
    state: PlayerState,
    output: u8,
    runtime: Option<Runtime>,
}

impl<A: Actuator> PatternPlayer<A> {
    pub fn new(actuator: A) -> Self {
        Self {
            actuator,
            state: PlayerState::Idle,
            output: 0,
            runtime: None,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(
            self.state,
            PlayerState::PlayingStep(_) | PlayerState::IntervalGap(_)
        )
    }

    pub fn output(&self) -> u8 {
        self.output
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn into_actuator(self) -> A {
        self.actuator
    }

    /// Start playing `pattern` from step 0 at time `now`.
    ///
    /// Anything already playing is stopped first; there is no queue. An empty
    /// pattern is refused and leaves the current playback exactly as it was.
    pub fn load(&mut self, pattern: VibrationPattern, now: Duration) -> Result<(), PatternError> {
        if pattern.is_empty() {
            tracing::warn!("Refusing to load empty vibration pattern");
            return Err(PatternError::EmptyPattern);
        }

        if self.is_running() {
            tracing::debug!("New pattern replaces one still playing");
            self.stop();
        }

        tracing::debug!(
            "Loaded pattern: {} steps, interval {}ms, {} repeats ({}ms total)",
            pattern.steps().len(),
            pattern.interval(),
            pattern.repeat_count(),
            pattern.total_duration_ms()
        );

        let first = pattern.steps()[0].intensity;
        self.runtime = Some(Runtime {
            pattern,
            step_started: now,
            repeats_done: 0,
        });
        self.state = PlayerState::PlayingStep(0);
        self.set_output(first);
        Ok(())
    }

    /// Force the output to zero and forget the current pattern.
    ///
    /// Unconditional and idempotent: it always zeroes the actuator, whatever
    /// state the player is in.
    pub fn stop(&mut self) {
        if self.is_running() {
            tracing::debug!("Playback stopped in {:?}", self.state);
        }
        self.runtime = None;
        self.state = PlayerState::Stopped;
        self.set_output(0);
    }

    /// Advance the state machine to `now`.
    ///
    /// Every transition that has come due since the last tick is taken, in
    /// order, so a late tick catches up instead of skipping ahead. No-op when
    /// idle or stopped.
    pub fn tick(&mut self, now: Duration) {
        loop {
            let Some(rt) = self.runtime.as_mut() else {
                return;
            };

            match self.state {
                PlayerState::PlayingStep(i) => {
                    let step_end = rt.step_started + Duration::from_millis(rt.step_ms(i));
                    if now < step_end {
                        return;
                    }
                    self.state = PlayerState::IntervalGap(i);
                    self.set_output(0);
                }
                PlayerState::IntervalGap(i) => {
                    let gap_end = rt.step_started
                        + Duration::from_millis(rt.step_ms(i) + rt.interval_ms());
                    if now < gap_end {
                        return;
                    }
                    rt.step_started = gap_end;

                    let next = if i + 1 < rt.pattern.steps().len() {
                        Some(i + 1)
                    } else {
                        rt.repeats_done += 1;
                        // a zero-length pass would replay forever within one tick
                        if rt.repeats_done < rt.pattern.repeat_count() && rt.pattern.cycle_ms() > 0
                        {
                            tracing::trace!("Repeat {} begins", rt.repeats_done + 1);
                            Some(0)
                        } else {
                            None
                        }
                    };

                    match next {
                        Some(n) => {
                            let level = rt.pattern.steps()[n].intensity;
                            self.state = PlayerState::PlayingStep(n);
                            self.set_output(level);
                        }
                        None => {
                            tracing::debug!("Pattern finished");
                            self.runtime = None;
                            self.state = PlayerState::Stopped;
                            self.set_output(0);
                        }
                    }
                }
                PlayerState::Idle | PlayerState::Stopped => return,
            }
        }
    }

    pub fn status(&self, now: Duration) -> PlayerStatus {
        let Some(rt) = self.runtime.as_ref() else {
            return PlayerStatus {
                state: self.state,
                output: self.output,
                ..Default::default()
            };
        };

        let step = match self.state {
            PlayerState::PlayingStep(i) | PlayerState::IntervalGap(i) => i,
            PlayerState::Idle | PlayerState::Stopped => 0,
        };
        let total = rt.pattern.total_duration_ms();

        PlayerStatus {
            state: self.state,
            running: self.is_running(),
            output: self.output,
            repeat: rt.repeats_done + 1,
            repeat_count: rt.pattern.repeat_count(),
            remaining_ms: total.saturating_sub(rt.elapsed_ms(step, now)),
        }
    }

    fn set_output(&mut self, level: u8) {
        self.output = level;
        self.actuator.apply_output(level);
    }
}
