use thiserror::Error;

/// Reasons a pattern can be refused by a player.
///
/// Out-of-range numbers are never an error anywhere in this crate: they are
/// clamped where they enter. The only thing a player cannot do anything with
/// is a pattern that has no steps at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("vibration pattern has no steps")]
    EmptyPattern,
}
