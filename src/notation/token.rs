//! Token types for the bracketed send/receive notation.

use serde::Serialize;

/// The closed set of token shapes a character can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Any character other than a bracket. Usually a base-36 digit.
    Digit,
    /// `[`
    GroupOpen,
    /// `]`
    GroupClose,
}

impl TokenKind {
    #[must_use]
    pub fn of(character: char) -> Self {
        match character {
            '[' => Self::GroupOpen,
            ']' => Self::GroupClose,
            _ => Self::Digit,
        }
    }
}

/// Which link roles a token may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub sender: bool,
    pub receiver: bool,
}

impl Capabilities {
    pub const NONE: Self = Self { sender: false, receiver: false };
    pub const SENDER: Self = Self { sender: true, receiver: false };
    pub const RECEIVER: Self = Self { sender: false, receiver: true };
    pub const BOTH: Self = Self { sender: true, receiver: true };
}

/// One classified character of the input.
///
/// `position` is always the character offset in the input string. Offsets
/// into the sender or receiver lists are called indices elsewhere and never
/// stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub character: char,
    /// Base-36 value; `None` for brackets and non-digit characters.
    pub value: Option<u32>,
    pub position: usize,
    pub kind: TokenKind,
    pub capabilities: Capabilities,
    /// Position of the `[` that opened the enclosing group, or the token's
    /// own position when ungrouped.
    pub group_id: usize,
    pub in_group: bool,
}

impl Token {
    #[must_use]
    pub fn is_sender(&self) -> bool {
        self.capabilities.sender
    }

    #[must_use]
    pub fn is_receiver(&self) -> bool {
        self.capabilities.receiver
    }

    /// Group id used as the resolution base for this token.
    #[must_use]
    pub fn anchor(&self) -> usize {
        if self.in_group { self.group_id } else { self.position }
    }
}

/// A resolved link between two token positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Position of the sending token.
    pub sender: usize,
    /// Position of the receiving token.
    pub receiver: usize,
    /// Index of the receiving token within [`Resolution::receivers`].
    pub receiver_index: usize,
}

/// Sender and receiver lists plus one link per sender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Sender token positions in input order.
    pub senders: Vec<usize>,
    /// Receiver token positions in input order.
    pub receivers: Vec<usize>,
    pub links: Vec<Link>,
}
