//! Touch input: one sensed contact per conversational turn.
//!
//! A turn carries a normalized intensity and the body area that was touched.
//! When the turn was synthesized by a hand-tracking gesture translator rather
//! than typed in by hand, it also carries where the hand was and how sure the
//! tracker was about it. Those provenance fields are informational only; the
//! emotion transform looks at intensity and area alone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Body area a touch landed on.
///
/// Labels parse from English names as well as the Japanese labels the rig's
/// front-ends send (頭, 胸, 腹, 足, ...). Anything unrecognised is kept
/// verbatim as `Other` so it can still be echoed back in replies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TouchArea {
    Head,
    Cheek,
    Shoulder,
    Arm,
    Hand,
    Chest,
    Stomach,
    Foot,
    Other(String),
}

impl TouchArea {
    /// Magnitude modulation applied to emotion deltas for this area.
    ///
    /// Weights scale how strongly a touch registers; they never flip the
    /// direction of the effect.
    pub fn weight(&self) -> f32 {
        match self {
            TouchArea::Head | TouchArea::Cheek => 1.2,
            TouchArea::Hand => 1.0,
            TouchArea::Shoulder | TouchArea::Arm => 0.9,
            TouchArea::Chest => 0.8,
            TouchArea::Stomach => 0.7,
            TouchArea::Foot => 0.6,
            TouchArea::Other(_) => 1.0,
        }
    }

    /// Human-facing label used in reply lines.
    pub fn label(&self) -> &str {
        match self {
            TouchArea::Head => "頭",
            TouchArea::Cheek => "頬",
            TouchArea::Shoulder => "肩",
            TouchArea::Arm => "腕",
            TouchArea::Hand => "手",
            TouchArea::Chest => "胸",
            TouchArea::Stomach => "お腹",
            TouchArea::Foot => "足",
            TouchArea::Other(label) => label,
        }
    }

    fn canonical_name(&self) -> &str {
        match self {
            TouchArea::Head => "head",
            TouchArea::Cheek => "cheek",
            TouchArea::Shoulder => "shoulder",
            TouchArea::Arm => "arm",
            TouchArea::Hand => "hand",
            TouchArea::Chest => "chest",
            TouchArea::Stomach => "stomach",
            TouchArea::Foot => "foot",
            TouchArea::Other(label) => label,
        }
    }
}

impl FromStr for TouchArea {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let area = match trimmed.to_lowercase().as_str() {
            "head" | "頭" | "あたま" => TouchArea::Head,
            "cheek" | "頬" | "ほっぺ" => TouchArea::Cheek,
            "shoulder" | "肩" => TouchArea::Shoulder,
            "arm" | "腕" => TouchArea::Arm,
            "hand" | "手" => TouchArea::Hand,
            "chest" | "胸" => TouchArea::Chest,
            "stomach" | "belly" | "腹" | "お腹" => TouchArea::Stomach,
            "foot" | "leg" | "足" => TouchArea::Foot,
            _ => TouchArea::Other(trimmed.to_string()),
        };
        Ok(area)
    }
}

impl From<String> for TouchArea {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(area) => area,
            Err(never) => match never {},
        }
    }
}

impl From<TouchArea> for String {
    fn from(area: TouchArea) -> Self {
        area.canonical_name().to_string()
    }
}

impl fmt::Display for TouchArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Palm position reported by a hand tracker, in tracker millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HandPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One touch turn.
///
/// Wire names follow what the rig's front-ends already send: the intensity
/// travels as `data`, the confidence as `leap_confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchInput {
    /// Touch intensity (0.0 - 1.0). Clamped on use, never rejected.
    #[serde(rename = "data", alias = "intensity")]
    pub intensity: f32,

    pub touched_area: TouchArea,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gesture_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_position: Option<HandPosition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_velocity: Option<f32>,

    #[serde(
        default,
        alias = "leap_confidence",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f32>,
}

impl TouchInput {
    /// A manually entered touch with no gesture provenance.
    pub fn new(intensity: f32, touched_area: TouchArea) -> Self {
        Self {
            intensity,
            touched_area,
            gesture_type: None,
            hand_position: None,
            hand_velocity: None,
            confidence: None,
        }
    }

    /// Attach gesture-translator provenance.
    pub fn with_gesture(
        mut self,
        gesture_type: impl Into<String>,
        hand_position: HandPosition,
        hand_velocity: f32,
        confidence: f32,
    ) -> Self {
        self.gesture_type = Some(gesture_type.into());
        self.hand_position = Some(hand_position);
        self.hand_velocity = Some(hand_velocity);
        self.confidence = Some(confidence);
        self
    }

    /// Intensity forced into [0, 1]. NaN reads as no touch at all.
    pub fn clamped_intensity(&self) -> f32 {
        if self.intensity.is_nan() {
            tracing::debug!("NaN touch intensity, treating as 0");
            return 0.0;
        }
        let clamped = self.intensity.clamp(0.0, 1.0);
        if clamped != self.intensity {
            tracing::debug!("Touch intensity {} clamped to {}", self.intensity, clamped);
        }
        clamped
    }

    /// Whether this turn came from a gesture translator.
    pub fn is_gesture(&self) -> bool {
        self.gesture_type.is_some()
    }
}
