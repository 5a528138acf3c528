//! # Fureai core
//!
//! The deterministic heart of the touch companion:
//!
//! - [`emotion`]: four-axis emotion state and the touch-to-emotion transform
//! - [`pattern`]: vibration steps, patterns, archetype shapes and presets
//! - [`generator`]: dominant emotion to vibration pattern
//! - [`emoji`]: emoji decoration picked from the emotion state
//! - [`dialogue`]: a conversation session tying the above together
//!
//! Everything here is pure or session-local; the haptic player that actually
//! drives a motor lives in `fureai_haptics`.

pub mod config;
pub mod dialogue;
pub mod emoji;
pub mod emotion;
pub mod error;
pub mod generator;
pub mod pattern;
pub mod touch;

pub use config::{FureaiConfig, HapticsConfig, SessionConfig};
pub use dialogue::{Reply, TouchSession, TouchTurn};
pub use emoji::{add_emoji, emoji_for};
pub use emotion::{transform, EmotionKind, EmotionState, EMOTION_MAX};
pub use error::PatternError;
pub use generator::{
    archetype_for, generate, generate_with, mixed_emotions, summarize, ArchetypeBounds,
    GeneratorConfig, PatternSummary,
};
pub use pattern::{
    custom_pattern, Archetype, Preset, VibrationPattern, VibrationStep, DEFAULT_INTERVAL_MS,
    MAX_STEPS,
};
pub use touch::{HandPosition, TouchArea, TouchInput};
