//! Resolves each sender to the receiver it targets.

use super::parse::parse;
use super::token::{Link, Resolution, Token};
use crate::error::NotationError;

/// Compute sender and receiver lists and one link per sender.
///
/// A sender anchors at its group's opening `[` when grouped and at itself
/// otherwise. Its target is the receiver `value` places further along the
/// receiver list from the anchor, wrapping at the end of the list.
///
/// # Errors
///
/// - [`NotationError::EmptyReceivers`] if there are senders but no receivers.
/// - [`NotationError::UndefinedValue`] if a sender is not a base-36 digit.
/// - [`NotationError::AnchorNotReceiver`] if a sender's anchor is missing from
///   the receiver list (only reachable with hand-built tokens).
pub fn resolve(tokens: &[Token]) -> Result<Resolution, NotationError> {
    let senders: Vec<usize> = tokens.iter().filter(|t| t.is_sender()).map(|t| t.position).collect();
    let receivers: Vec<usize> = tokens.iter().filter(|t| t.is_receiver()).map(|t| t.position).collect();

    if senders.is_empty() {
        return Ok(Resolution { senders, receivers, links: Vec::new() });
    }
    if receivers.is_empty() {
        return Err(NotationError::EmptyReceivers { senders: senders.len() });
    }

    let links = tokens
        .iter()
        .filter(|t| t.is_sender())
        .map(|sender| resolve_sender(sender, &receivers))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(senders = senders.len(), receivers = receivers.len(), "resolved links");

    Ok(Resolution { senders, receivers, links })
}

/// Parse `input` strictly and resolve it.
///
/// # Errors
///
/// Any error from [`parse`] or [`resolve`].
pub fn resolve_str(input: &str) -> Result<(Vec<Token>, Resolution), NotationError> {
    let tokens = parse(input)?;
    let resolution = resolve(&tokens)?;
    Ok((tokens, resolution))
}

fn resolve_sender(sender: &Token, receivers: &[usize]) -> Result<Link, NotationError> {
    let anchor = sender.anchor();
    let base_index = receivers
        .iter()
        .position(|&p| p == anchor)
        .ok_or(NotationError::AnchorNotReceiver { position: sender.position, anchor })?;
    let undefined = NotationError::UndefinedValue { character: sender.character, position: sender.position };
    let value = sender.value.ok_or(undefined.clone())?;
    let offset = usize::try_from(value).map_err(|_| undefined)?;

    let receiver_index = wrap(base_index, offset, receivers.len());
    Ok(Link { sender: sender.position, receiver: receivers[receiver_index], receiver_index })
}

/// `(base + offset) mod len`, always in `0..len`. `len` must be non-zero.
pub(super) fn wrap(base: usize, offset: usize, len: usize) -> usize {
    (base % len + offset % len) % len
}
