//! Line graph tuning.

use serde::{Deserialize, Serialize};

/// RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form for SVG/HTML output.
    pub fn to_hex(self) -> String {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Sampling and scaling parameters of [`crate::graph::LineGraph`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Number of sampling steps across the global domain.
    pub resolution: usize,
    /// Vertical scale = max sampled value * headroom.
    pub headroom: f64,
    /// Offset of the synthetic zero points outside each function's domain.
    pub edge_epsilon: f64,
    /// Horizontal extent shown when no function is registered.
    pub empty_domain_max: f64,
    /// Vertical extent shown when no function is registered.
    pub empty_range_max: f64,
    /// Series colors, assigned in registration order and cycled.
    pub palette: Vec<Color>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            resolution: 500,
            headroom: 1.05,
            edge_epsilon: 1e-5,
            empty_domain_max: 40.0,
            empty_range_max: 20.0,
            palette: vec![
                Color::rgb(1.0, 0.0, 0.0),
                Color::rgb(0.0, 1.0, 0.0),
                Color::rgb(0.0, 0.0, 1.0),
                Color::rgb(1.0, 1.0, 0.0),
                Color::rgb(0.0, 1.0, 1.0),
                Color::rgb(1.0, 0.0, 1.0),
            ],
        }
    }
}
