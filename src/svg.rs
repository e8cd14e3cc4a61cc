//! SVG rendering adapter.
//!
//! This is the only module that knows about SVG. It consumes a laid-out
//! [`Diagram`] and produces a standalone document; it never looks at tokens
//! or links directly.

use std::fmt::{self, Write};

use crate::layout::{Diagram, DrawInstruction};

const ARROW_MARKER_ID: &str = "marker_arrow";
const CONNECTOR_STROKE: &str = "grey";
const ARROW_FILL: &str = "darkgrey";
const BOX_STROKE: &str = "#78909C";
const LABEL_FONT_SIZE: f64 = 16.0;

/// Render `diagram` as an SVG document.
///
/// # Errors
///
/// Only fails if writing into the output buffer fails.
pub fn render_svg(diagram: &Diagram) -> Result<String, fmt::Error> {
    let mut svg = String::new();
    write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="monospace">
  <defs>
    <marker id="{ARROW_MARKER_ID}" markerHeight="5" markerWidth="5" markerUnits="strokeWidth" orient="auto" refX="0" refY="0" viewBox="-5 -5 10 10">
      <path d="M 0,0 m -5,-5 L 5,0 L -5,5 Z" fill="{ARROW_FILL}" />
    </marker>
  </defs>
"#,
        w = diagram.width,
        h = diagram.height,
    )?;

    for instruction in &diagram.instructions {
        match instruction {
            DrawInstruction::Label { x, y, text, .. } => {
                writeln!(
                    svg,
                    r#"  <text x="{x:.1}" y="{y:.1}" font-size="{LABEL_FONT_SIZE:.0}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                    escape_xml(text)
                )?;
            }
            DrawInstruction::GroupBox { x, y, width, height, group_id, .. } => {
                writeln!(
                    svg,
                    r#"  <rect class="group" data-group="{group_id}" x="{x:.1}" y="{y:.1}" width="{width:.1}" height="{height:.1}" fill="none" stroke="{BOX_STROKE}" stroke-width="1" />"#
                )?;
            }
            DrawInstruction::Connector { sender, receiver, path, .. } => {
                writeln!(
                    svg,
                    r#"  <path class="link" data-sender="{sender}" data-receiver="{receiver}" d="{}" stroke="{CONNECTOR_STROKE}" stroke-width="2" fill="none" stroke-linecap="round" marker-end="url(#{ARROW_MARKER_ID})" />"#,
                    path.to_path_data()
                )?;
            }
        }
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "svg_test.rs"]
mod tests;
