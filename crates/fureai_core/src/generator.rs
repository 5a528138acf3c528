//! Emotion-to-vibration pattern generation.
//!
//! The dominant emotion picks an archetype shape; its level (0 - 5) then sets
//! how hard and how quickly that shape is played. Stronger feelings vibrate
//! harder and shorter, and repeat more often.

use crate::emotion::{EmotionKind, EmotionState, EMOTION_MAX};
use crate::pattern::{custom_pattern, Archetype, VibrationPattern};
use serde::{Deserialize, Serialize};

/// Level at or above which a non-dominant emotion is reported as mixed in.
const MIXED_EMOTION_LEVEL: f32 = 3.0;

/// Intensity gain when another emotion is mixed in.
const MIXED_INTENSITY_GAIN: f32 = 1.1;

/// Repeat gain when another emotion is mixed in.
const MIXED_REPEAT_GAIN: f64 = 1.2;

/// Scaling bounds for one archetype.
///
/// At level 0 the shape plays at `min_intensity` over `max_duration_ms`; at
/// level 5 it plays at `max_intensity` over `min_duration_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeBounds {
    pub min_intensity: f32,
    pub max_intensity: f32,
    pub min_duration_ms: u32,
    pub max_duration_ms: u32,
    pub repeat_count: u32,
}

impl Default for ArchetypeBounds {
    fn default() -> Self {
        Self {
            min_intensity: 0.2,
            max_intensity: 1.0,
            min_duration_ms: 300,
            max_duration_ms: 600,
            repeat_count: 1,
        }
    }
}

impl ArchetypeBounds {
    fn new(
        min_intensity: f32,
        max_intensity: f32,
        min_duration_ms: u32,
        max_duration_ms: u32,
        repeat_count: u32,
    ) -> Self {
        Self {
            min_intensity,
            max_intensity,
            min_duration_ms,
            max_duration_ms,
            repeat_count,
        }
    }

    /// Intensity for a level, linear in `t = level / 5`.
    pub fn intensity_at(&self, level: f32) -> f32 {
        let t = normalized_level(level);
        let lo = self.min_intensity.clamp(0.0, 1.0);
        let hi = self.max_intensity.clamp(0.0, 1.0);
        lo + (hi - lo) * t
    }

    /// Duration for a level, shrinking linearly as the level rises.
    pub fn duration_at(&self, level: f32) -> u32 {
        let t = normalized_level(level);
        let long = self.max_duration_ms as f32;
        let short = self.min_duration_ms as f32;
        (long + (short - long) * t).round().max(0.0) as u32
    }

    /// Repeat count for a level: one extra pass for every two levels above 1.
    pub fn repeats_at(&self, level: f32) -> u32 {
        let whole = if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, EMOTION_MAX)
        };
        let scale = if whole >= 1.0 {
            1 + ((whole - 1.0) / 2.0).floor() as u32
        } else {
            1
        };
        self.repeat_count.max(1).saturating_mul(scale)
    }
}

fn normalized_level(level: f32) -> f32 {
    if level.is_nan() {
        return 0.0;
    }
    level.clamp(0.0, EMOTION_MAX) / EMOTION_MAX
}

/// Per-archetype bounds. Every field falls back to its default when missing
/// from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub pulse: ArchetypeBounds,
    pub wave: ArchetypeBounds,
    pub burst: ArchetypeBounds,
    pub fade: ArchetypeBounds,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            pulse: ArchetypeBounds::new(0.3, 0.9, 300, 600, 2),
            wave: ArchetypeBounds::new(0.3, 0.8, 450, 900, 1),
            burst: ArchetypeBounds::new(0.5, 1.0, 150, 300, 1),
            fade: ArchetypeBounds::new(0.2, 0.7, 600, 1200, 1),
        }
    }
}

impl GeneratorConfig {
    pub fn bounds(&self, archetype: Archetype) -> &ArchetypeBounds {
        match archetype {
            Archetype::Pulse => &self.pulse,
            Archetype::Wave => &self.wave,
            Archetype::Burst => &self.burst,
            Archetype::Fade => &self.fade,
        }
    }
}

/// Archetype used to express an emotion.
pub fn archetype_for(kind: EmotionKind) -> Archetype {
    match kind {
        EmotionKind::Joy => Archetype::Pulse,
        EmotionKind::Fun => Archetype::Wave,
        EmotionKind::Anger => Archetype::Burst,
        EmotionKind::Sad => Archetype::Fade,
    }
}

/// Generate a pattern with the default bounds.
pub fn generate(emotion: &EmotionState) -> VibrationPattern {
    generate_with(emotion, &GeneratorConfig::default())
}

/// Other emotions at or above the mixing level, in axis order.
pub fn mixed_emotions(emotion: &EmotionState) -> Vec<EmotionKind> {
    let (dominant, _) = emotion.dominant();
    EmotionKind::ALL
        .into_iter()
        .filter(|k| *k != dominant && emotion.get(*k) >= MIXED_EMOTION_LEVEL)
        .collect()
}

/// Generate a pattern for the dominant emotion.
///
/// Always yields at least one step. A calm (all-zero) state plays the joy
/// archetype at its lower bound. When another emotion is mixed in, the shape
/// plays harder (x1.1, capped at full power) and repeats more (x1.2, rounded
/// up).
pub fn generate_with(emotion: &EmotionState, config: &GeneratorConfig) -> VibrationPattern {
    let (kind, level) = emotion.dominant();
    let archetype = archetype_for(kind);
    let bounds = config.bounds(archetype);

    let mut intensity = bounds.intensity_at(level);
    let duration = bounds.duration_at(level);
    let mut repeats = bounds.repeats_at(level);

    let mixed = !mixed_emotions(emotion).is_empty();
    if mixed {
        intensity = (intensity * MIXED_INTENSITY_GAIN).min(1.0);
        // float to int casts saturate
        repeats = (repeats as f64 * MIXED_REPEAT_GAIN).ceil() as u32;
    }

    tracing::debug!(
        "Generated {} pattern for {}={:.2}: intensity={:.2}, duration={}ms, repeats={}, mixed={}",
        archetype,
        kind,
        level,
        intensity,
        duration,
        repeats,
        mixed
    );

    custom_pattern(archetype, intensity, duration, repeats)
}

/// Descriptive record that travels alongside a generated pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub dominant_emotion: EmotionKind,
    pub emotion_level: f32,
    pub archetype: Archetype,
    /// Archetype name, suffixed with `_mixed` when other emotions are mixed in.
    pub pattern_type: String,
    /// Mean step intensity (0.0 - 1.0).
    pub intensity: f32,
    pub repeat_count: u32,
    /// Total playback time in milliseconds, gaps and repeats included.
    pub duration_ms: u64,
    /// Other emotions strong enough to colour the dominant one.
    pub mixed_emotions: Vec<EmotionKind>,
    pub description: String,
    pub vibration_pattern: VibrationPattern,
}

/// Summarize a pattern generated from `emotion`.
pub fn summarize(emotion: &EmotionState, pattern: VibrationPattern) -> PatternSummary {
    let (dominant, level) = emotion.dominant();
    let archetype = archetype_for(dominant);
    let mixed_emotions = mixed_emotions(emotion);
    let pattern_type = if mixed_emotions.is_empty() {
        archetype.to_string()
    } else {
        format!("{}_mixed", archetype)
    };

    let description = match dominant {
        EmotionKind::Joy => "軽快でリズミカルな振動",
        EmotionKind::Fun => "楽しい波打つような振動",
        EmotionKind::Anger => "強く断続的な振動",
        EmotionKind::Sad => "ゆっくりとした弱い振動",
    };

    PatternSummary {
        dominant_emotion: dominant,
        emotion_level: level,
        archetype,
        pattern_type,
        intensity: pattern.average_intensity(),
        repeat_count: pattern.repeat_count(),
        duration_ms: pattern.total_duration_ms(),
        mixed_emotions,
        description: description.to_string(),
        vibration_pattern: pattern,
    }
}
