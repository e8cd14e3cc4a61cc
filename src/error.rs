//! Error type for notation parsing and link resolution.

/// Diagnostics for malformed notation. Every variant names the character
/// position it refers to so callers can point at the offending input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
    #[error("nested group opened at position {position}")]
    NestedGroup { position: usize },
    #[error("unmatched ']' at position {position}")]
    UnmatchedClose { position: usize },
    #[error("group opened at position {position} is never closed")]
    UnclosedGroup { position: usize },
    #[error("sender {character:?} at position {position} has no numeric value")]
    UndefinedValue { character: char, position: usize },
    #[error("{senders} sender(s) but no receivers to target")]
    EmptyReceivers { senders: usize },
    #[error("sender at position {position} anchors to {anchor}, which is not a receiver")]
    AnchorNotReceiver { position: usize, anchor: usize },
}

impl NotationError {
    /// Character position the diagnostic refers to, if it has one.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::InvalidCharacter { position, .. }
            | Self::NestedGroup { position }
            | Self::UnmatchedClose { position }
            | Self::UnclosedGroup { position }
            | Self::UndefinedValue { position, .. }
            | Self::AnchorNotReceiver { position, .. } => Some(*position),
            Self::EmptyReceivers { .. } => None,
        }
    }
}
