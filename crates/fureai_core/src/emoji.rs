//! Emoji decoration for replies.
//!
//! The dominant emotion picks one emoji by level, and up to two other
//! emotions at or above level 3 add their own.

use crate::emotion::{EmotionKind, EmotionState};

/// Other strong emotions shown after the dominant one.
const MAX_EXTRA_EMOJI: usize = 2;

const EXTRA_EMOJI_LEVEL: f32 = 3.0;

fn palette(kind: EmotionKind) -> [&'static str; 6] {
    match kind {
        EmotionKind::Joy => ["😊", "😄", "😃", "😁", "🥰", "😍"],
        EmotionKind::Fun => ["🎉", "🎊", "✨", "🌟", "🎈", "🎯"],
        EmotionKind::Anger => ["😠", "😡", "💢", "😤", "🔥", "⚡"],
        EmotionKind::Sad => ["😢", "😭", "💔", "😞", "😔", "🥺"],
    }
}

/// Emoji for one emotion at `level`, or `None` below half a level.
///
/// Levels round to the nearest whole step; level 1 is the first palette
/// entry and anything past 6 stays on the last.
pub fn emoji_for(kind: EmotionKind, level: f32) -> Option<&'static str> {
    if level.is_nan() {
        return None;
    }
    let whole = level.round();
    if whole < 1.0 {
        return None;
    }
    let palette = palette(kind);
    let index = ((whole as usize) - 1).min(palette.len() - 1);
    Some(palette[index])
}

/// Emoji string for an emotion state. Empty when every axis is (near) zero.
pub fn add_emoji(emotion: &EmotionState) -> String {
    let (dominant, level) = emotion.dominant();
    let Some(head) = emoji_for(dominant, level) else {
        return String::new();
    };

    let mut out = head.to_string();
    EmotionKind::ALL
        .into_iter()
        .filter(|k| *k != dominant && emotion.get(*k) >= EXTRA_EMOJI_LEVEL)
        .filter_map(|k| emoji_for(k, emotion.get(k)))
        .take(MAX_EXTRA_EMOJI)
        .for_each(|e| out.push_str(e));
    out
}
