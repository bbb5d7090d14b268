//! sprites.json data model
//!
//! Lists every sprite written in a run so that asset tooling can pick the
//! files up without hardcoding names.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

pub const MANIFEST_FILE_NAME: &str = "sprites.json";

/// Root structure of a sprites.json file
#[derive(Serialize, Debug, Clone)]
pub struct SpriteManifest {
    /// One entry per generated PNG, in generation order
    pub sprites: Vec<SpriteEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// Which renderer produced a sprite
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpriteKind {
    Socket,
    Fill,
}

/// A single generated sprite
#[derive(Serialize, Debug, Clone)]
pub struct SpriteEntry {
    /// File name relative to the output directory
    pub filename: String,

    pub kind: SpriteKind,

    /// Palette variant the sprite belongs to (e.g. "Gray", "Gold")
    pub variant: String,

    /// Edge length in pixels; sprites are always square
    pub size: u32,
}

#[derive(Serialize, Debug, Clone)]
pub struct Info {
    pub version: u8,
    pub author: String,
}

impl SpriteManifest {
    pub fn new(author: String) -> Self {
        Self {
            sprites: Vec::new(),
            info: Info { version: 1, author },
        }
    }

    pub fn add_sprite(&mut self, sprite: SpriteEntry) {
        self.sprites.push(sprite);
    }
}

impl SpriteEntry {
    pub fn new(filename: String, kind: SpriteKind, variant: String, size: u32) -> Self {
        Self {
            filename,
            kind,
            variant,
            size,
        }
    }
}

impl Default for SpriteManifest {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME").to_string())
    }
}

/// Serialize `manifest` as pretty JSON into `dir/sprites.json`
pub fn write_manifest(dir: &Path, manifest: &SpriteManifest) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    let path = dir.join(MANIFEST_FILE_NAME);
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write manifest {}", path.display()))
}
