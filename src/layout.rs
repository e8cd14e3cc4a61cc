//! Layout engine: turns classified tokens and resolved links into draw
//! instructions for a rendering adapter.
//!
//! Characters sit on a horizontal axis at evenly spaced slots across the
//! canvas. Connectors run just off the axis: links whose sender lies right of
//! the receiver are drawn on the `+y` side, all others on the `-y` side.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::notation::{Resolution, Token};

/// Height of a character cell, used to size group boxes.
pub const CHAR_HEIGHT: f64 = 20.0;
/// Gap between adjacent group boxes.
const BOX_INSET: f64 = 2.0;
/// Horizontal nudge applied to a curve's start point.
const CURVE_START_NUDGE: f64 = 3.0;
/// Vertical nudge applied to a curve's start point.
const CURVE_START_LIFT: f64 = 7.5;
/// Multiplier on the square root of the horizontal span for curve depth.
const CURVE_DEPTH_SCALE: f64 = 8.0;
/// Radius of the loop drawn for a self-link in arc style.
pub const SELF_LOOP_RADIUS: f64 = 8.0;

/// How connectors between sender and receiver are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorStyle {
    /// Cubic Bézier whose depth grows with the square root of the span.
    Curve,
    /// Semicircle whose radius is half the span.
    Arc,
}

impl ConnectorStyle {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Curve => "curve",
            Self::Arc => "arc",
        }
    }
}

impl fmt::Display for ConnectorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectorStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "curve" => Ok(Self::Curve),
            "arc" => Ok(Self::Arc),
            other => Err(format!("unknown connector style '{other}' (expected 'curve' or 'arc')")),
        }
    }
}

// Same case-insensitive spelling as `FromStr`, so query strings and env agree.
impl<'de> Deserialize<'de> for ConnectorStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Whether `value` can be used as a canvas width or height.
#[must_use]
pub fn is_valid_size(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Parse a canvas width or height, rejecting non-finite and non-positive
/// values.
///
/// # Errors
///
/// Returns a readable message when `raw` is not a number or is not a usable
/// size.
pub fn parse_size(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.trim().parse().map_err(|e| format!("invalid size '{raw}': {e}"))?;
    if is_valid_size(value) {
        Ok(value)
    } else {
        Err(format!("size must be a finite number greater than zero, got '{raw}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub width: f64,
    pub height: f64,
    pub style: ConnectorStyle,
    /// Draw a box around every token inside a bracket group, opening `[`
    /// included.
    pub group_boxes: bool,
    /// Distance of connector endpoints from the label axis.
    pub pad: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: crate::config::DEFAULT_WIDTH,
            height: crate::config::DEFAULT_HEIGHT,
            style: ConnectorStyle::Curve,
            group_boxes: true,
            pad: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry of one connector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ConnectorPath {
    Cubic { start: Point, control1: Point, control2: Point, end: Point },
    /// Half circle from `start` to `end`. `positive_side` is true when it
    /// bulges toward `+y`.
    Arc { start: Point, end: Point, radius: f64, positive_side: bool },
    /// Near-full circle leaving and re-entering `anchor`, on the `-y` side.
    Loop { anchor: Point, radius: f64 },
}

impl ConnectorPath {
    /// SVG path data (`d` attribute) for this connector.
    #[must_use]
    pub fn to_path_data(&self) -> String {
        match *self {
            Self::Cubic { start, control1, control2, end } => format!(
                "M{:.2},{:.2} C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
                start.x, start.y, control1.x, control1.y, control2.x, control2.y, end.x, end.y
            ),
            Self::Arc { start, end, radius, .. } => {
                // With y pointing down, sweep=1 places a right-to-left arc on
                // the +y side and a left-to-right arc on the -y side.
                format!("M{:.2},{:.2} A{radius:.2},{radius:.2} 0 0,1 {:.2},{:.2}", start.x, start.y, end.x, end.y)
            }
            Self::Loop { anchor, radius } => format!(
                "M{:.2},{:.2} A{radius:.2},{radius:.2} 0 1,1 {:.2},{:.2}",
                anchor.x,
                anchor.y,
                anchor.x + 0.01,
                anchor.y
            ),
        }
    }
}

/// One primitive for the rendering adapter to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawInstruction {
    Label { position: usize, x: f64, y: f64, text: String },
    GroupBox { position: usize, group_id: usize, x: f64, y: f64, width: f64, height: f64 },
    Connector { sender: usize, receiver: usize, from_x: f64, to_x: f64, y: f64, path: ConnectorPath },
}

/// A laid-out diagram ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    pub width: f64,
    pub height: f64,
    pub instructions: Vec<DrawInstruction>,
}

impl Diagram {
    pub fn labels(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.instructions
            .iter()
            .filter(|i| matches!(i, DrawInstruction::Label { .. }))
    }

    pub fn group_boxes(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.instructions
            .iter()
            .filter(|i| matches!(i, DrawInstruction::GroupBox { .. }))
    }

    pub fn connectors(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.instructions
            .iter()
            .filter(|i| matches!(i, DrawInstruction::Connector { .. }))
    }
}

/// Lay out labels, group boxes and connectors.
///
/// Instructions are ordered labels first, then boxes, then connectors, which
/// is also the paint order.
#[must_use]
pub fn render_to_instructions(tokens: &[Token], resolution: &Resolution, options: &LayoutOptions) -> Diagram {
    let axis = Axis::new(tokens.len(), options);
    let mut instructions = Vec::with_capacity(tokens.len() * 2 + resolution.links.len());

    // --- Labels ---
    for token in tokens {
        instructions.push(DrawInstruction::Label {
            position: token.position,
            x: axis.x(token.position),
            y: axis.mid_y,
            text: token.character.to_string(),
        });
    }

    // --- Group boxes ---
    if options.group_boxes {
        let box_width = (axis.slot - 2.0 * BOX_INSET).max(0.0);
        for token in tokens.iter().filter(|t| t.in_group) {
            instructions.push(DrawInstruction::GroupBox {
                position: token.position,
                group_id: token.group_id,
                x: axis.x(token.position) - box_width / 2.0,
                y: axis.mid_y - CHAR_HEIGHT / 2.0,
                width: box_width,
                height: CHAR_HEIGHT,
            });
        }
    }

    // --- Connectors ---
    for link in &resolution.links {
        let from_x = axis.x(link.sender);
        let to_x = axis.x(link.receiver);
        let side = if from_x > to_x { 1.0 } else { -1.0 };
        let y = axis.mid_y + options.pad * side;
        let path = match options.style {
            ConnectorStyle::Curve => curve(from_x, to_x, y),
            ConnectorStyle::Arc => arc(from_x, to_x, y),
        };
        instructions.push(DrawInstruction::Connector {
            sender: link.sender,
            receiver: link.receiver,
            from_x,
            to_x,
            y,
            path,
        });
    }

    Diagram { width: options.width, height: options.height, instructions }
}

struct Axis {
    slot: f64,
    mid_y: f64,
}

impl Axis {
    fn new(len: usize, options: &LayoutOptions) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let slots = (len + 1) as f64;
        Self { slot: options.width / slots, mid_y: options.height / 2.0 }
    }

    fn x(&self, position: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let index = (position + 1) as f64;
        self.slot * index
    }
}

/// Bézier that leaves the sender slightly off-axis, dives away from the axis
/// and lands on the receiver.
fn curve(from_x: f64, to_x: f64, y: f64) -> ConnectorPath {
    let pm = if from_x < to_x { -1.0 } else { 1.0 };
    let start = Point::new(from_x - pm * CURVE_START_NUDGE, y + pm * CURVE_START_LIFT);
    let end = Point::new(to_x, y);
    let depth = pm * (start.x - end.x).abs().sqrt() * CURVE_DEPTH_SCALE;
    let control1 = Point::new(start.x, start.y + depth);
    let control2 = Point::new(end.x, control1.y);
    ConnectorPath::Cubic { start, control1, control2, end }
}

fn arc(from_x: f64, to_x: f64, y: f64) -> ConnectorPath {
    let radius = (from_x - to_x).abs() / 2.0;
    if radius <= f64::EPSILON {
        return ConnectorPath::Loop { anchor: Point::new(from_x, y), radius: SELF_LOOP_RADIUS };
    }
    ConnectorPath::Arc {
        start: Point::new(from_x, y),
        end: Point::new(to_x, y),
        radius,
        positive_side: from_x > to_x,
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
