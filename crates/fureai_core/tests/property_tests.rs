//! Property-based tests for fureai_core.
//!
//! Verifies that the emotion transform and the pattern generator keep their
//! documented bounds for ALL inputs, not just the hand-picked unit cases.

use fureai_core::{
    generate, generate_with, summarize, transform, ArchetypeBounds, EmotionState,
    GeneratorConfig, TouchArea, TouchInput, VibrationPattern, VibrationStep, EMOTION_MAX,
    MAX_STEPS,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_level() -> impl Strategy<Value = f32> {
    0.0f32..=EMOTION_MAX
}

fn arb_emotion() -> impl Strategy<Value = EmotionState> {
    (arb_level(), arb_level(), arb_level(), arb_level())
        .prop_map(|(joy, fun, anger, sad)| EmotionState::new(joy, fun, anger, sad))
}

fn arb_area() -> impl Strategy<Value = TouchArea> {
    prop_oneof![
        Just(TouchArea::Head),
        Just(TouchArea::Cheek),
        Just(TouchArea::Shoulder),
        Just(TouchArea::Arm),
        Just(TouchArea::Hand),
        Just(TouchArea::Chest),
        Just(TouchArea::Stomach),
        Just(TouchArea::Foot),
        "[a-z]{1,8}".prop_map(TouchArea::Other),
    ]
}

fn arb_touch() -> impl Strategy<Value = TouchInput> {
    (0.0f32..=1.0, arb_area()).prop_map(|(x, area)| TouchInput::new(x, area))
}

fn arb_bounds() -> impl Strategy<Value = ArchetypeBounds> {
    (
        any::<f32>(),
        any::<f32>(),
        any::<u32>(),
        any::<u32>(),
        any::<u32>(),
    )
        .prop_map(
            |(min_intensity, max_intensity, min_duration_ms, max_duration_ms, repeat_count)| {
                ArchetypeBounds {
                    min_intensity,
                    max_intensity,
                    min_duration_ms,
                    max_duration_ms,
                    repeat_count,
                }
            },
        )
}

fn arb_generator_config() -> impl Strategy<Value = GeneratorConfig> {
    (arb_bounds(), arb_bounds(), arb_bounds(), arb_bounds()).prop_map(
        |(pulse, wave, burst, fade)| GeneratorConfig {
            pulse,
            wave,
            burst,
            fade,
        },
    )
}

fn in_bounds(s: &EmotionState) -> bool {
    [s.joy, s.fun, s.anger, s.sad]
        .iter()
        .all(|v| v.is_finite() && (0.0..=EMOTION_MAX).contains(v))
}

// ============================================================================
// Emotion Transform Properties
// ============================================================================

proptest! {
    /// **Core invariant**: for any intensity in [0, 1] and any area, every
    /// component of the result stays in [0, 5].
    #[test]
    fn transform_stays_in_bounds(prev in arb_emotion(), input in arb_touch()) {
        let next = transform(&prev, &input);
        prop_assert!(in_bounds(&next), "out of bounds: {:?}", next);
    }

    /// Garbage intensities (any f32, including NaN and infinities) are
    /// clamped, never propagated.
    #[test]
    fn transform_survives_any_intensity(prev in arb_emotion(), x in any::<f32>(), area in arb_area()) {
        let next = transform(&prev, &TouchInput::new(x, area));
        prop_assert!(in_bounds(&next), "out of bounds for x={}: {:?}", x, next);
    }

    #[test]
    fn transform_is_deterministic(prev in arb_emotion(), input in arb_touch()) {
        prop_assert_eq!(transform(&prev, &input), transform(&prev, &input));
    }

    /// Pleasant touches never make anger or sadness worse.
    #[test]
    fn pleasant_band_never_hurts(prev in arb_emotion(), x in 0.3f32..=0.7, area in arb_area()) {
        let next = transform(&prev, &TouchInput::new(x, area));
        prop_assert!(next.joy >= prev.joy);
        prop_assert!(next.fun >= prev.fun);
        prop_assert!(next.anger <= prev.anger);
        prop_assert!(next.sad <= prev.sad);
    }

    /// Painful touches never make the companion happier.
    #[test]
    fn pain_band_never_pleases(prev in arb_emotion(), x in 0.71f32..=1.0, area in arb_area()) {
        let next = transform(&prev, &TouchInput::new(x, area));
        prop_assert!(next.joy <= prev.joy);
        prop_assert!(next.anger >= prev.anger);
    }
}

// ============================================================================
// Generator Properties
// ============================================================================

proptest! {
    /// The generator always produces something the player will accept.
    #[test]
    fn generated_patterns_are_playable(emotion in arb_emotion()) {
        let p = generate(&emotion);
        prop_assert!(!p.is_empty());
        prop_assert!(p.steps().len() <= MAX_STEPS);
        prop_assert!(p.repeat_count() >= 1);
        prop_assert!(p.steps().iter().all(|s| s.intensity <= 100));
    }

    /// Any raw step list ends up within the board limits after construction.
    #[test]
    fn pattern_constructor_clamps(
        raw in prop::collection::vec((any::<u8>(), 0u32..2000), 0..30),
        interval in 0u32..500,
        repeat in 0u32..10,
    ) {
        let steps = raw
            .into_iter()
            .map(|(intensity, duration)| VibrationStep { intensity, duration })
            .collect();
        let p = VibrationPattern::new(steps, interval, repeat);
        prop_assert!(p.steps().len() <= MAX_STEPS);
        prop_assert!(p.repeat_count() >= 1);
        prop_assert!(p.steps().iter().all(|s| s.intensity <= 100));
        let cycle: u64 = p.steps().iter().map(|s| (s.duration + interval) as u64).sum();
        prop_assert_eq!(p.total_duration_ms(), cycle * p.repeat_count() as u64);
    }

    /// Full u32 durations, interval and repeats never overflow the timing math.
    #[test]
    fn extreme_patterns_saturate(
        raw in prop::collection::vec((any::<u8>(), any::<u32>()), 0..=MAX_STEPS),
        interval in any::<u32>(),
        repeat in any::<u32>(),
    ) {
        let steps = raw
            .into_iter()
            .map(|(intensity, duration)| VibrationStep { intensity, duration })
            .collect();
        let p = VibrationPattern::new(steps, interval, repeat);
        let cycle = p.cycle_ms();
        let total = p.total_duration_ms();
        prop_assert!(total >= cycle || p.is_empty());
        prop_assert_eq!(
            total,
            cycle.checked_mul(p.repeat_count() as u64).unwrap_or(u64::MAX)
        );
    }

    /// Any configured bounds, however extreme, still generate a playable
    /// pattern and a summary.
    #[test]
    fn any_generator_config_is_safe(emotion in arb_emotion(), config in arb_generator_config()) {
        let p = generate_with(&emotion, &config);
        prop_assert!(!p.is_empty());
        prop_assert!(p.repeat_count() >= 1);
        prop_assert!(p.steps().iter().all(|s| s.intensity <= 100));
        let summary = summarize(&emotion, p);
        prop_assert!(summary.intensity >= 0.0 && summary.intensity <= 1.0);
    }
}
