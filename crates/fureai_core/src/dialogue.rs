//! Touch session: one conversation's worth of emotional memory.
//!
//! The session owns the emotion state. Every turn runs the transform, picks a
//! reply line that fits the new dominant emotion, and attaches the vibration
//! pattern the companion should play back.

use crate::config::SessionConfig;
use crate::emoji::add_emoji;
use crate::emotion::{transform, EmotionKind, EmotionState};
use crate::generator::{generate_with, summarize, GeneratorConfig, PatternSummary};
use crate::touch::{TouchArea, TouchInput};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A touch turn as it arrives from a front-end, optionally switching the
/// companion's voice gender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchTurn {
    #[serde(flatten)]
    pub touch: TouchInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

/// What the companion says and feels after a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub emotion: EmotionState,
    pub message: String,
    /// Emoji matching the emotion, empty when the companion feels nothing.
    #[serde(default)]
    pub emoji: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibration: Option<PatternSummary>,
    pub timestamp: DateTime<Utc>,
}

pub struct TouchSession<R: Rng = StdRng> {
    emotion: EmotionState,
    baseline: EmotionState,
    gender: String,
    generator: GeneratorConfig,
    started_at: DateTime<Utc>,
    turns: u64,
    rng: R,
}

impl TouchSession<StdRng> {
    pub fn new(config: &SessionConfig, generator: GeneratorConfig) -> Self {
        Self::with_rng(config, generator, StdRng::from_entropy())
    }
}

impl<R: Rng> TouchSession<R> {
    /// Session with an injected RNG (seeded RNGs make reply choice repeatable).
    pub fn with_rng(config: &SessionConfig, generator: GeneratorConfig, rng: R) -> Self {
        let baseline = config.initial_emotion;
        Self {
            emotion: baseline,
            baseline,
            gender: config.gender.clone(),
            generator,
            started_at: Utc::now(),
            turns: 0,
            rng,
        }
    }

    pub fn emotion(&self) -> EmotionState {
        self.emotion
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Start over from the baseline, as at session start.
    pub fn reset(&mut self) {
        tracing::info!("Session reset after {} turns", self.turns);
        self.emotion = self.baseline;
        self.turns = 0;
        self.started_at = Utc::now();
    }

    /// Apply one touch turn.
    pub fn process(&mut self, turn: &TouchTurn) -> Reply {
        if let Some(gender) = &turn.gender {
            self.gender = gender.clone();
        }

        let before = self.emotion;
        self.emotion = transform(&before, &turn.touch);
        self.turns += 1;

        let [dj, df, da, ds] = self.emotion.delta(&before);
        tracing::info!(
            "Turn {}: touch {:.2} on {} -> joy {:+.2}, fun {:+.2}, anger {:+.2}, sad {:+.2}",
            self.turns,
            turn.touch.clamped_intensity(),
            turn.touch.touched_area,
            dj,
            df,
            da,
            ds
        );

        let (dominant, _) = self.emotion.dominant();
        let message = self.touch_line(dominant, &turn.touch.touched_area);
        let pattern = generate_with(&self.emotion, &self.generator);

        Reply {
            emotion: self.emotion,
            message,
            emoji: add_emoji(&self.emotion),
            vibration: Some(summarize(&self.emotion, pattern)),
            timestamp: Utc::now(),
        }
    }

    /// Something to say when nobody is touching.
    pub fn idle_reply(&mut self) -> Reply {
        let (dominant, _) = self.emotion.dominant();
        let lines: &[&str] = match dominant {
            EmotionKind::Joy => &["今日はとても幸せな気分です！", "あなたと話せて嬉しいです♪"],
            EmotionKind::Fun => &["何か楽しいことしましょう！", "わくわくしています！"],
            EmotionKind::Anger => &["少しイライラしています...", "機嫌が悪いです。"],
            EmotionKind::Sad => &["なんだか寂しいです...", "元気が出ません..."],
        };
        let message = lines.choose(&mut self.rng).copied().unwrap_or("こんにちは。");
        Reply {
            emotion: self.emotion,
            message: message.to_string(),
            emoji: add_emoji(&self.emotion),
            vibration: None,
            timestamp: Utc::now(),
        }
    }

    fn touch_line(&mut self, dominant: EmotionKind, area: &TouchArea) -> String {
        let a = area.label();
        let lines = match dominant {
            EmotionKind::Joy => [
                format!("あっ、{}に触れられると嬉しいです！", a),
                format!("{}の感触、とても心地良いです♪", a),
                "もっと触れてもらえますか？".to_string(),
            ],
            EmotionKind::Fun => [
                format!("わぁ！{}がくすぐったいです！", a),
                "ふふっ、なんだか楽しくなってきました！".to_string(),
                format!("{}に触れられると、不思議な感じがします〜", a),
            ],
            EmotionKind::Anger => [
                format!("痛い！{}をそんなに強く触らないでください！", a),
                "もう少し優しくしてもらえませんか？".to_string(),
                format!("{}が痛いです...", a),
            ],
            EmotionKind::Sad => [
                format!("{}に触れられても、今は何も感じません...", a),
                "少し寂しい気持ちです...".to_string(),
                "もう少し優しく触れてもらえますか？".to_string(),
            ],
        };
        let idx = self.rng.gen_range(0..lines.len());
        lines[idx].clone()
    }
}
