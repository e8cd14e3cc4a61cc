//! Runtime configuration.
//!
//! DESIGN
//! ======
//! Every setting has a compiled default and may be overridden through the
//! environment. The CLI layers its own flags on top (clap reads the same
//! variable names), so the env helpers here only matter for the server and
//! for library callers that want the process-wide defaults.

use std::str::FromStr;

use crate::layout::{self, ConnectorStyle, LayoutOptions};

pub const DEFAULT_WIDTH: f64 = 600.0;
pub const DEFAULT_HEIGHT: f64 = 300.0;
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub width: f64,
    pub height: f64,
    pub style: ConnectorStyle,
    pub group_boxes: bool,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            style: ConnectorStyle::Curve,
            group_boxes: true,
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset or unparsable
    /// values fall back to the defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            width: size_or(&lookup, "THROWLINE_WIDTH", defaults.width),
            height: size_or(&lookup, "THROWLINE_HEIGHT", defaults.height),
            style: parse_or(&lookup, "THROWLINE_STYLE", defaults.style),
            group_boxes: parse_or(&lookup, "THROWLINE_GROUP_BOXES", defaults.group_boxes),
            port: parse_or(&lookup, "PORT", defaults.port),
        }
    }

    #[must_use]
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            width: self.width,
            height: self.height,
            style: self.style,
            group_boxes: self.group_boxes,
            ..LayoutOptions::default()
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match lookup(key).map(|v| v.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            tracing::warn!(%key, "ignoring unparsable config value");
            default
        }
        None => default,
    }
}

fn size_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    match lookup(key).map(|v| layout::parse_size(&v)) {
        Some(Ok(value)) => value,
        Some(Err(reason)) => {
            tracing::warn!(%key, %reason, "ignoring invalid size");
            default
        }
        None => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
