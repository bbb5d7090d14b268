//! Color primitives for the sprite renderers
//!
//! Colors are plain 8-bit RGB triples; alpha is chosen per region by the
//! renderer, never carried by the color itself.

use anyhow::{Context, Result};
use image::Rgba;
use std::{fmt, str::FromStr};

/// An opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Combine with a region alpha into an `image` pixel
    pub fn with_alpha(self, alpha: u8) -> Rgba<u8> {
        let [r, g, b] = self.0;
        Rgba([r, g, b, alpha])
    }

    /// Parse any CSS color string (`#323237`, `rgb(50, 35, 55)`, ...)
    ///
    /// The alpha component of the CSS color is ignored.
    pub fn parse_css(value: &str) -> Result<Self> {
        let color = css_color::Srgb::from_str(value)
            .map_err(|_| anyhow::anyhow!("Invalid CSS color: {value:?}"))?;

        Ok(Self([
            channel_from_unit(color.red),
            channel_from_unit(color.green),
            channel_from_unit(color.blue),
        ]))
    }
}

fn channel_from_unit(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Linearly interpolate between two colors
///
/// Each channel is `c1 + (c2 - c1) * t` truncated toward zero. `t` is expected
/// in `[0, 1]` and is not clamped.
pub fn lerp_color(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    let mut out = [0u8; 3];
    for (i, channel) in out.iter_mut().enumerate() {
        let from = f64::from(c1.0[i]);
        let to = f64::from(c2.0[i]);
        *channel = (from + (to - from) * t) as u8;
    }
    Rgb(out)
}

/// Snap `t` to one of `steps + 1` evenly spaced levels
///
/// Halves round to the even level.
pub fn quantize_t(t: f64, steps: u32) -> Result<f64> {
    if steps == 0 {
        anyhow::bail!("Gradient needs at least one step");
    }
    let steps = f64::from(steps);
    Ok((t * steps).round_ties_even() / steps)
}

/// A banded two-stop gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub top: Rgb,
    pub bottom: Rgb,
    pub steps: u32,
}

impl Gradient {
    pub fn new(top: Rgb, bottom: Rgb, steps: u32) -> Self {
        Self { top, bottom, steps }
    }

    /// Color at an already quantized position
    pub fn at(&self, t: f64) -> Rgb {
        lerp_color(self.top, self.bottom, t)
    }

    /// Banded diagonal color of pixel `(x, y)` in a `size`-wide tile
    pub fn sample(&self, x: u32, y: u32, size: u32) -> Result<Rgb> {
        Ok(self.at(diagonal_t(x, y, size, self.steps)?))
    }
}

/// Quantized position of `(x, y)` along the top-left to bottom-right diagonal
pub fn diagonal_t(x: u32, y: u32, size: u32, steps: u32) -> Result<f64> {
    let max_diag = f64::from(size.saturating_sub(1)) * 2.0;
    let t = if max_diag > 0.0 {
        (f64::from(x) + f64::from(y)) / max_diag
    } else {
        0.0
    };
    quantize_t(t, steps).context("Can't quantize diagonal gradient")
}
