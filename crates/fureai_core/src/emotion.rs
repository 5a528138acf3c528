//! Emotion state and the touch-to-emotion transform.
//!
//! The companion's mood is four independent axes (joy, fun, anger, sad), each
//! living on a 0-5 scale. A touch moves them according to how hard it was:
//! mid-range contact is pleasant, a barely-there touch reads as neglect, and
//! anything near the top of the range hurts.

use crate::touch::TouchInput;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Upper bound for every emotion axis.
pub const EMOTION_MAX: f32 = 5.0;

const PLEASANT_LOW: f32 = 0.3;
const PLEASANT_HIGH: f32 = 0.7;

/// Clamp a level into [0, EMOTION_MAX], mapping NaN to 0.
#[inline]
fn clamp_level(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, EMOTION_MAX)
    }
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = f32::deserialize(deserializer)?;
    Ok(clamp_level(v))
}

/// One of the four emotion axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionKind {
    Joy,
    Fun,
    Anger,
    Sad,
}

impl EmotionKind {
    /// All axes, in tie-break order.
    pub const ALL: [EmotionKind; 4] = [
        EmotionKind::Joy,
        EmotionKind::Fun,
        EmotionKind::Anger,
        EmotionKind::Sad,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionKind::Joy => "joy",
            EmotionKind::Fun => "fun",
            EmotionKind::Anger => "anger",
            EmotionKind::Sad => "sad",
        }
    }
}

impl fmt::Display for EmotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four bounded mood scalars, each in [0, 5].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionState {
    #[serde(deserialize_with = "deserialize_level")]
    pub joy: f32,
    #[serde(deserialize_with = "deserialize_level")]
    pub fun: f32,
    #[serde(deserialize_with = "deserialize_level")]
    pub anger: f32,
    #[serde(deserialize_with = "deserialize_level")]
    pub sad: f32,
}

impl Default for EmotionState {
    /// Session-start baseline: mildly content, nothing negative.
    fn default() -> Self {
        Self {
            joy: 2.5,
            fun: 2.5,
            anger: 0.0,
            sad: 0.0,
        }
    }
}

impl EmotionState {
    pub fn new(joy: f32, fun: f32, anger: f32, sad: f32) -> Self {
        Self {
            joy: clamp_level(joy),
            fun: clamp_level(fun),
            anger: clamp_level(anger),
            sad: clamp_level(sad),
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn get(&self, kind: EmotionKind) -> f32 {
        match kind {
            EmotionKind::Joy => self.joy,
            EmotionKind::Fun => self.fun,
            EmotionKind::Anger => self.anger,
            EmotionKind::Sad => self.sad,
        }
    }

    /// Largest axis and its level. Ties go to the earlier axis in
    /// [`EmotionKind::ALL`], so an all-zero state reports joy.
    pub fn dominant(&self) -> (EmotionKind, f32) {
        let mut best = (EmotionKind::Joy, self.joy);
        for kind in EmotionKind::ALL.into_iter().skip(1) {
            let level = self.get(kind);
            if level > best.1 {
                best = (kind, level);
            }
        }
        best
    }

    /// Component-wise difference `self - before`, for logging a turn.
    pub fn delta(&self, before: &EmotionState) -> [f32; 4] {
        [
            self.joy - before.joy,
            self.fun - before.fun,
            self.anger - before.anger,
            self.sad - before.sad,
        ]
    }

    /// Apply signed deltas and clamp, returning a new state.
    fn shifted(&self, joy: f32, fun: f32, anger: f32, sad: f32) -> Self {
        Self::new(
            self.joy + joy,
            self.fun + fun,
            self.anger + anger,
            self.sad + sad,
        )
    }
}

/// Compute the next emotion state from the previous one and a touch.
///
/// Pure and deterministic. `prev` is left untouched so the caller can diff
/// before and after. Out-of-range intensities are clamped into [0, 1]; the
/// touched area scales how large the change is but never which way it goes.
pub fn transform(prev: &EmotionState, input: &TouchInput) -> EmotionState {
    let x = input.clamped_intensity();
    let w = input.touched_area.weight();

    if (PLEASANT_LOW..=PLEASANT_HIGH).contains(&x) {
        // Peaks at 0.5, tapering to 0.6 at the band edges.
        let p = (1.0 - (x - 0.5).abs() * 2.0) * w;
        prev.shifted(0.5 * p, 0.3 * p, -0.2 * p, -0.2 * p)
    } else if x < PLEASANT_LOW {
        prev.shifted(0.0, -0.1 * w, 0.0, 0.1 * w)
    } else {
        let q = (x - PLEASANT_HIGH) / (1.0 - PLEASANT_HIGH) * w;
        prev.shifted(-0.3 * q, -0.3 * q, 0.5 * q, 0.2 * q)
    }
}
