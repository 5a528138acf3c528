//! Vibration patterns: ordered intensity/duration steps plus timing metadata.
//!
//! A pattern is a short score for a single haptic motor. Each step holds the
//! motor at a fixed intensity for a number of milliseconds, the motor is then
//! silent for the pattern's interval, and the whole list is played
//! `repeat_count` times.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Most steps a single pattern may carry. The actuator boards keep patterns
/// in a fixed-size array of this length.
pub const MAX_STEPS: usize = 10;

/// Default gap between steps, in milliseconds.
pub const DEFAULT_INTERVAL_MS: u32 = 50;

/// One held intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibrationStep {
    /// Output level as a percentage (0 - 100).
    pub intensity: u8,
    /// How long the level is held, in milliseconds.
    pub duration: u32,
}

impl VibrationStep {
    pub fn new(intensity: u8, duration: u32) -> Self {
        Self {
            intensity: intensity.min(100),
            duration,
        }
    }

    /// Build a step from a 0.0 - 1.0 fraction.
    pub fn from_fraction(fraction: f32, duration: u32) -> Self {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        Self::new((fraction * 100.0).round() as u8, duration)
    }
}

/// A complete haptic score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VibrationPattern {
    steps: Vec<VibrationStep>,
    /// Silence after every step, in milliseconds.
    interval: u32,
    /// How many times the step list is played (at least 1).
    repeat_count: u32,
}

impl VibrationPattern {
    /// Build a pattern, clamping anything the boards could not play.
    ///
    /// Steps past [`MAX_STEPS`] are dropped and a repeat count of zero is
    /// raised to one. An empty step list is allowed here; it is the player
    /// that refuses it.
    pub fn new(steps: Vec<VibrationStep>, interval: u32, repeat_count: u32) -> Self {
        let mut steps: Vec<VibrationStep> = steps
            .into_iter()
            .map(|s| VibrationStep::new(s.intensity, s.duration))
            .collect();
        if steps.len() > MAX_STEPS {
            tracing::warn!(
                "Pattern has {} steps, truncating to {}",
                steps.len(),
                MAX_STEPS
            );
            steps.truncate(MAX_STEPS);
        }
        if repeat_count == 0 {
            tracing::debug!("Repeat count 0 raised to 1");
        }
        Self {
            steps,
            interval,
            repeat_count: repeat_count.max(1),
        }
    }

    pub fn steps(&self) -> &[VibrationStep] {
        &self.steps
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Length of one pass through the steps, gaps included.
    pub fn cycle_ms(&self) -> u64 {
        self.steps
            .iter()
            .map(|s| s.duration as u64 + self.interval as u64)
            .fold(0u64, u64::saturating_add)
    }

    /// Total active playback time: `repeat_count × Σ(duration_i + interval)`.
    ///
    /// Saturates at `u64::MAX` for patterns that would outlast it.
    pub fn total_duration_ms(&self) -> u64 {
        self.cycle_ms().saturating_mul(self.repeat_count as u64)
    }

    /// Mean step intensity as a 0.0 - 1.0 fraction.
    pub fn average_intensity(&self) -> f32 {
        if self.steps.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.steps.iter().map(|s| s.intensity as u32).sum();
        sum as f32 / self.steps.len() as f32 / 100.0
    }
}

impl<'de> Deserialize<'de> for VibrationPattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            steps: Vec<VibrationStep>,
            #[serde(default = "default_interval")]
            interval: u32,
            #[serde(default = "default_repeat")]
            repeat_count: u32,
        }

        fn default_interval() -> u32 {
            DEFAULT_INTERVAL_MS
        }

        fn default_repeat() -> u32 {
            1
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(VibrationPattern::new(raw.steps, raw.interval, raw.repeat_count))
    }
}

/// Base shapes for generated patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// On/off beats.
    Pulse,
    /// Rising swell.
    Wave,
    /// Short hard hits, repeated more often.
    Burst,
    /// Strong start tailing off.
    Fade,
}

impl Archetype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Pulse => "pulse",
            Archetype::Wave => "wave",
            Archetype::Burst => "burst",
            Archetype::Fade => "fade",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pulse" => Ok(Archetype::Pulse),
            "wave" => Ok(Archetype::Wave),
            "burst" => Ok(Archetype::Burst),
            "fade" => Ok(Archetype::Fade),
            other => anyhow::bail!("unknown pattern archetype: {}", other),
        }
    }
}

/// Build an archetype shape from an intensity (0.0 - 1.0), a nominal total
/// duration and a repeat count.
///
/// Burst ignores `duration_ms`: its hits are fixed-length, and it plays three
/// times as many repeats instead.
pub fn custom_pattern(
    archetype: Archetype,
    intensity: f32,
    duration_ms: u32,
    repeat_count: u32,
) -> VibrationPattern {
    let i = if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    };
    let step = VibrationStep::from_fraction;

    match archetype {
        Archetype::Pulse => VibrationPattern::new(
            vec![step(i, duration_ms / 2), step(0.0, duration_ms / 2)],
            DEFAULT_INTERVAL_MS,
            repeat_count,
        ),
        Archetype::Wave => VibrationPattern::new(
            vec![
                step(i * 0.3, duration_ms / 3),
                step(i * 0.7, duration_ms / 3),
                step(i, duration_ms / 3),
            ],
            DEFAULT_INTERVAL_MS,
            repeat_count,
        ),
        Archetype::Burst => VibrationPattern::new(
            vec![step(i, 100), step(0.0, 50)],
            30,
            repeat_count.max(1).saturating_mul(3),
        ),
        Archetype::Fade => VibrationPattern::new(
            vec![
                step(i, duration_ms / 2),
                step(i * 0.5, duration_ms / 4),
                step(i * 0.2, duration_ms / 4),
            ],
            DEFAULT_INTERVAL_MS,
            repeat_count,
        ),
    }
}

/// Fixed patterns, one per named mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Joy,
    Anger,
    Sorrow,
    Pleasure,
    Neutral,
}

impl Preset {
    pub fn pattern(&self) -> VibrationPattern {
        let s = VibrationStep::new;
        match self {
            // light and rhythmic
            Preset::Joy => VibrationPattern::new(
                vec![s(60, 100), s(0, 50), s(80, 150), s(0, 50), s(60, 100)],
                50,
                2,
            ),
            // intense and rapid
            Preset::Anger => VibrationPattern::new(
                vec![s(90, 200), s(0, 30), s(100, 150), s(0, 30), s(80, 200)],
                20,
                3,
            ),
            // slow and gentle
            Preset::Sorrow => {
                VibrationPattern::new(vec![s(80, 500), s(60, 300), s(40, 200)], 100, 2)
            }
            Preset::Pleasure => VibrationPattern::new(
                vec![s(60, 300), s(80, 400), s(70, 300), s(50, 200)],
                50,
                1,
            ),
            Preset::Neutral => VibrationPattern::new(vec![s(50, 200)], 0, 1),
        }
    }
}
