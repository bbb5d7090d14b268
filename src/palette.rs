//! Sprite variants and palette file loading
//!
//! A palette is the ordered list of color schemes to render. The built-in one
//! covers the gray, gold and red bars; the extended set adds the green
//! (sheltered) and amber (dawn warning) bars.

use crate::color::Rgb;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_SOCKET_SIZE: u32 = 10;
pub const DEFAULT_FILL_SIZE: u32 = 8;

/// Sprites are square; edges outside this range are rejected.
pub const MIN_SPRITE_SIZE: u32 = 2;
pub const MAX_SPRITE_SIZE: u32 = 1024;

/// Border tint of a socket tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocketStyle {
    pub border_top: Rgb,
    pub border_bottom: Rgb,
}

/// Colors of a fill gem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillStyle {
    pub top: Rgb,
    pub bottom: Rgb,
    pub highlight: Rgb,
}

/// A named socket + fill pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub socket: SocketStyle,
    pub fill: FillStyle,
}

impl Variant {
    pub fn socket_file_name(&self) -> String {
        format!("SanitySocket{}.png", self.name)
    }

    pub fn fill_file_name(&self) -> String {
        format!("Sanity{}.png", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub socket_size: u32,
    pub fill_size: u32,
    pub variants: Vec<Variant>,
}

// On-disk layout; colors stay CSS strings until `into_variant` parses them.
#[derive(Debug, Deserialize)]
struct PaletteFile {
    #[serde(default = "default_socket_size")]
    socket_size: u32,
    #[serde(default = "default_fill_size")]
    fill_size: u32,
    variants: Vec<VariantEntry>,
}

#[derive(Debug, Deserialize)]
struct VariantEntry {
    name: String,
    socket: SocketEntry,
    fill: FillEntry,
}

#[derive(Debug, Deserialize)]
struct SocketEntry {
    border_top: String,
    border_bottom: String,
}

#[derive(Debug, Deserialize)]
struct FillEntry {
    top: String,
    bottom: String,
    highlight: String,
}

impl VariantEntry {
    fn color(&self, field: &str, value: &str) -> Result<Rgb> {
        Rgb::parse_css(value)
            .with_context(|| format!("variant {:?}: field {}", self.name, field))
    }

    fn into_variant(self) -> Result<Variant> {
        let socket = SocketStyle {
            border_top: self.color("socket.border_top", &self.socket.border_top)?,
            border_bottom: self.color("socket.border_bottom", &self.socket.border_bottom)?,
        };
        let fill = FillStyle {
            top: self.color("fill.top", &self.fill.top)?,
            bottom: self.color("fill.bottom", &self.fill.bottom)?,
            highlight: self.color("fill.highlight", &self.fill.highlight)?,
        };

        Ok(Variant {
            name: self.name,
            socket,
            fill,
        })
    }
}

fn default_socket_size() -> u32 {
    DEFAULT_SOCKET_SIZE
}

fn default_fill_size() -> u32 {
    DEFAULT_FILL_SIZE
}

/// Fail unless `size` is a renderable sprite edge
pub fn check_sprite_size(field: &str, size: u32) -> Result<()> {
    if !(MIN_SPRITE_SIZE..=MAX_SPRITE_SIZE).contains(&size) {
        anyhow::bail!(
            "{field} must be between {MIN_SPRITE_SIZE} and {MAX_SPRITE_SIZE} pixels, got {size}"
        );
    }
    Ok(())
}

fn variant(name: &str, socket: [Rgb; 2], fill: [Rgb; 3]) -> Variant {
    Variant {
        name: name.to_string(),
        socket: SocketStyle {
            border_top: socket[0],
            border_bottom: socket[1],
        },
        fill: FillStyle {
            top: fill[0],
            bottom: fill[1],
            highlight: fill[2],
        },
    }
}

impl Palette {
    /// Gray, gold and red variants
    pub fn builtin() -> Self {
        Self {
            socket_size: DEFAULT_SOCKET_SIZE,
            fill_size: DEFAULT_FILL_SIZE,
            variants: vec![
                // pinky-purple, brain-like
                variant(
                    "Gray",
                    [Rgb::new(50, 35, 55), Rgb::new(35, 22, 40)],
                    [Rgb::new(180, 120, 170), Rgb::new(140, 85, 130), Rgb::new(220, 180, 210)],
                ),
                variant(
                    "Gold",
                    [Rgb::new(50, 40, 25), Rgb::new(30, 25, 15)],
                    [Rgb::new(255, 210, 80), Rgb::new(220, 170, 40), Rgb::new(255, 245, 200)],
                ),
                // suffocating
                variant(
                    "Red",
                    [Rgb::new(60, 25, 15), Rgb::new(40, 15, 10)],
                    [Rgb::new(200, 80, 40), Rgb::new(160, 50, 20), Rgb::new(240, 140, 80)],
                ),
            ],
        }
    }

    /// Built-in variants plus green and amber
    pub fn extended() -> Self {
        let mut palette = Self::builtin();
        palette.variants.extend([
            // sheltered
            variant(
                "Green",
                [Rgb::new(25, 50, 30), Rgb::new(15, 35, 20)],
                [Rgb::new(110, 200, 120), Rgb::new(70, 160, 85), Rgb::new(190, 245, 195)],
            ),
            // dawn approaching
            variant(
                "Amber",
                [Rgb::new(60, 40, 15), Rgb::new(40, 25, 10)],
                [Rgb::new(240, 150, 50), Rgb::new(205, 115, 25), Rgb::new(255, 215, 150)],
            ),
        ]);
        palette
    }

    /// Load a palette from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read palette file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid palette file {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: PaletteFile = serde_json::from_str(content)?;
        let palette = Palette {
            socket_size: file.socket_size,
            fill_size: file.fill_size,
            variants: file
                .variants
                .into_iter()
                .map(VariantEntry::into_variant)
                .collect::<Result<_>>()?,
        };
        palette.validate()?;
        Ok(palette)
    }

    fn validate(&self) -> Result<()> {
        check_sprite_size("socket_size", self.socket_size)?;
        check_sprite_size("fill_size", self.fill_size)?;
        if self.variants.is_empty() {
            anyhow::bail!("Palette has no variants");
        }
        for variant in &self.variants {
            if variant.name.is_empty()
                || !variant.name.chars().all(|c| c.is_ascii_alphanumeric())
            {
                anyhow::bail!(
                    "Variant name {:?} must be non-empty and alphanumeric",
                    variant.name
                );
            }
        }
        for (i, variant) in self.variants.iter().enumerate() {
            if self.variants[..i].iter().any(|v| v.name == variant.name) {
                anyhow::bail!("Duplicate variant name {:?}", variant.name);
            }
        }
        Ok(())
    }
}
