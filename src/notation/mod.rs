//! Bracketed send/receive notation: tokenizer and link resolver.
//!
//! A notation string is a run of base-36 digits with optional `[...]`
//! groups. Each digit is a sender whose value is an offset along the list of
//! receivers; ungrouped digits are also receivers, and a group is received
//! by its opening bracket.

pub mod parse;
pub mod resolve;
pub mod token;

pub use parse::{parse, tokenize, validate};
pub use resolve::{resolve, resolve_str};
pub use token::{Capabilities, Link, Resolution, Token, TokenKind};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
