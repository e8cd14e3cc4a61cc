//! Left-to-right scanner that classifies each character of the notation.

use super::token::{Capabilities, Token, TokenKind};
use crate::error::NotationError;

const RADIX: u32 = 36;

/// Group bookkeeping carried from one character to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ScanState {
    group_id: usize,
    in_group: bool,
}

impl ScanState {
    /// Classify `character` at `position`, returning the token and the state
    /// for the next character.
    fn step(self, character: char, position: usize) -> (Token, ScanState) {
        let kind = TokenKind::of(character);
        match kind {
            TokenKind::GroupClose => {
                let token = Token {
                    character,
                    value: None,
                    position,
                    kind,
                    capabilities: Capabilities::NONE,
                    group_id: self.group_id,
                    in_group: false,
                };
                let next = ScanState { group_id: self.group_id + 1, in_group: false };
                (token, next)
            }
            TokenKind::GroupOpen => {
                let token = Token {
                    character,
                    value: None,
                    position,
                    kind,
                    capabilities: Capabilities::RECEIVER,
                    group_id: position,
                    in_group: true,
                };
                (token, ScanState { group_id: position, in_group: true })
            }
            TokenKind::Digit if self.in_group => {
                let token = Token {
                    character,
                    value: character.to_digit(RADIX),
                    position,
                    kind,
                    capabilities: Capabilities::SENDER,
                    group_id: self.group_id,
                    in_group: true,
                };
                (token, self)
            }
            TokenKind::Digit => {
                let token = Token {
                    character,
                    value: character.to_digit(RADIX),
                    position,
                    kind,
                    capabilities: Capabilities::BOTH,
                    group_id: position,
                    in_group: false,
                };
                (token, ScanState { group_id: position + 1, in_group: false })
            }
        }
    }
}

/// Classify every character of `input` without rejecting anything.
///
/// Characters that are not base-36 digits become [`TokenKind::Digit`] tokens
/// with `value: None`; the resolver reports them if they end up as senders.
/// Unbalanced brackets are accepted and classified as they are scanned.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let (tokens, _) = input.chars().enumerate().fold(
        (Vec::new(), ScanState::default()),
        |(mut tokens, state), (position, character)| {
            let (token, next) = state.step(character, position);
            tokens.push(token);
            (tokens, next)
        },
    );
    tokens
}

/// Tokenize `input` and reject anything outside the notation's grammar.
///
/// # Errors
///
/// Returns the first [`NotationError`] found scanning left to right: a
/// character that is neither a bracket nor a base-36 digit, a `[` inside an
/// open group, a `]` without an open group, or a group left open at the end.
pub fn parse(input: &str) -> Result<Vec<Token>, NotationError> {
    let tokens = tokenize(input);
    validate(&tokens)?;
    Ok(tokens)
}

/// Check bracket balance and the digit alphabet over an already scanned
/// token list.
///
/// # Errors
///
/// See [`parse`].
pub fn validate(tokens: &[Token]) -> Result<(), NotationError> {
    let mut open: Option<usize> = None;
    for token in tokens {
        match token.kind {
            TokenKind::GroupOpen => {
                if open.is_some() {
                    return Err(NotationError::NestedGroup { position: token.position });
                }
                open = Some(token.position);
            }
            TokenKind::GroupClose => {
                if open.take().is_none() {
                    return Err(NotationError::UnmatchedClose { position: token.position });
                }
            }
            TokenKind::Digit => {
                if token.value.is_none() {
                    return Err(NotationError::InvalidCharacter {
                        character: token.character,
                        position: token.position,
                    });
                }
            }
        }
    }
    match open {
        Some(position) => Err(NotationError::UnclosedGroup { position }),
        None => Ok(()),
    }
}
