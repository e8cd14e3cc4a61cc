//! Diagrams for a bracketed send/receive notation.
//!
//! A notation string such as `[34]1[5]2` is classified character by
//! character, every sender is resolved to the receiver it targets, and the
//! result is laid out as labels on a horizontal axis joined by arrows.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`notation`] | Tokenizer, strict validation and link resolution |
//! | [`layout`] | Draw instructions for labels, group boxes and connectors |
//! | [`svg`] | SVG rendering adapter |
//! | [`routes`] | Stateless HTTP endpoints |
//! | [`config`] | Env-backed defaults |
//! | [`error`] | [`NotationError`] diagnostics |

pub mod config;
pub mod error;
pub mod layout;
pub mod notation;
pub mod routes;
pub mod svg;

pub use error::NotationError;
pub use layout::{ConnectorStyle, Diagram, DrawInstruction, LayoutOptions};

/// Failure anywhere between notation text and a finished SVG document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error("failed to write svg: {0}")]
    Write(#[from] std::fmt::Error),
}

/// Parse, resolve and lay out `input`.
///
/// # Errors
///
/// Returns a [`NotationError`] if the notation is malformed.
pub fn build_diagram(input: &str, options: &LayoutOptions) -> Result<Diagram, NotationError> {
    let (tokens, resolution) = notation::resolve_str(input)?;
    Ok(layout::render_to_instructions(&tokens, &resolution, options))
}

/// Parse, resolve, lay out and render `input` to an SVG document.
///
/// # Errors
///
/// Returns [`RenderError::Notation`] for malformed notation.
pub fn render(input: &str, options: &LayoutOptions) -> Result<String, RenderError> {
    let diagram = build_diagram(input, options)?;
    Ok(svg::render_svg(&diagram)?)
}
