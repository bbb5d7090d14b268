use crate::color::{diagonal_t, Gradient, Rgb};
use crate::manifest::{write_manifest, SpriteEntry, SpriteKind, SpriteManifest};
use crate::mask::{is_fill_corner, is_socket_border, is_socket_corner};
use crate::palette::{check_sprite_size, Palette, Variant};
use crate::preview;
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbaImage,
};
use log::{debug, info};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Alpha of the socket's outer ring
pub const SOCKET_BORDER_ALPHA: u8 = 180;
/// Alpha of the socket's inner well
pub const SOCKET_FILL_ALPHA: u8 = 140;
pub const FILL_ALPHA: u8 = 255;

const SOCKET_BANDS: u32 = 3;
const FILL_BANDS: u32 = 2;

// Every socket shares the same neutral dark well.
const SOCKET_FILL_TOP: Rgb = Rgb::new(20, 20, 25);
const SOCKET_FILL_BOTTOM: Rgb = Rgb::new(10, 10, 15);

const HIGHLIGHT_POS: (u32, u32) = (2, 2);
const HIGHLIGHT_MIN_SIZE: u32 = 6;

pub const PREVIEW_FILE_NAME: &str = "SanityPreview.png";

/// Everything one generation run needs
#[derive(Debug)]
pub struct Options {
    pub output: PathBuf,
    pub palette: Palette,
    pub manifest: bool,
    pub preview: Option<f32>,
}

/// Dark socket with rounded corners, translucent, diagonal banded gradient
pub fn create_socket(size: u32, border_top: Rgb, border_bot: Rgb) -> Result<RgbaImage> {
    check_sprite_size("Sprite size", size)?;

    let border = Gradient::new(border_top, border_bot, SOCKET_BANDS);
    let well = Gradient::new(SOCKET_FILL_TOP, SOCKET_FILL_BOTTOM, SOCKET_BANDS);
    let mut img = RgbaImage::new(size, size);

    for y in 0..size {
        for x in 0..size {
            if is_socket_corner(x, y, size) {
                continue;
            }

            // both regions band on the same diagonal position
            let t = diagonal_t(x, y, size, SOCKET_BANDS)?;
            let pixel = if is_socket_border(x, y, size) {
                border.at(t).with_alpha(SOCKET_BORDER_ALPHA)
            } else {
                well.at(t).with_alpha(SOCKET_FILL_ALPHA)
            };
            img.put_pixel(x, y, pixel);
        }
    }

    Ok(img)
}

/// Opaque fill gem with chamfered corners, banded gradient and a sparkle
pub fn create_fill(size: u32, top: Rgb, bot: Rgb, highlight: Rgb) -> Result<RgbaImage> {
    check_sprite_size("Sprite size", size)?;

    let gradient = Gradient::new(top, bot, FILL_BANDS);
    let mut img = RgbaImage::new(size, size);

    for y in 0..size {
        for x in 0..size {
            if is_fill_corner(x, y, size) {
                continue;
            }
            img.put_pixel(x, y, gradient.sample(x, y, size)?.with_alpha(FILL_ALPHA));
        }
    }

    if size >= HIGHLIGHT_MIN_SIZE {
        let (x, y) = HIGHLIGHT_POS;
        img.put_pixel(x, y, highlight.with_alpha(FILL_ALPHA));
    }

    Ok(img)
}

pub fn generate_sprites(options: Options) -> Result<()> {
    let palette = &options.palette;

    // Ensure the output directory exists
    create_dir_all(&options.output).with_context(|| {
        format!(
            "Can't create output directory {}",
            options.output.display()
        )
    })?;

    info!(
        "Generating {} variant(s) into {}",
        palette.variants.len(),
        options.output.display()
    );

    let mut manifest = SpriteManifest::default();

    for variant in &palette.variants {
        let sprite = render_socket(variant, palette.socket_size)?;
        let file_name = variant.socket_file_name();
        save_png(&sprite, &options.output.join(&file_name))?;
        println!("  ✓ Generated {file_name}");
        manifest.add_sprite(SpriteEntry::new(
            file_name,
            SpriteKind::Socket,
            variant.name.clone(),
            palette.socket_size,
        ));
    }

    for variant in &palette.variants {
        let sprite = render_fill(variant, palette.fill_size)?;
        let file_name = variant.fill_file_name();
        save_png(&sprite, &options.output.join(&file_name))?;
        println!("  ✓ Generated {file_name}");
        manifest.add_sprite(SpriteEntry::new(
            file_name,
            SpriteKind::Fill,
            variant.name.clone(),
            palette.fill_size,
        ));
    }

    if options.manifest {
        write_manifest(&options.output, &manifest)?;
        println!("  ✓ Generated {}", crate::manifest::MANIFEST_FILE_NAME);
    }

    if let Some(fraction) = options.preview {
        generate_preview(palette, fraction, &options.output)?;
    }

    println!("Created sprites in {}/", options.output.display());
    Ok(())
}

fn render_socket(variant: &Variant, size: u32) -> Result<RgbaImage> {
    debug!(
        "socket {}: {}px border {} -> {}",
        variant.name, size, variant.socket.border_top, variant.socket.border_bottom
    );
    create_socket(size, variant.socket.border_top, variant.socket.border_bottom)
        .with_context(|| format!("Failed to render socket for {}", variant.name))
}

fn render_fill(variant: &Variant, size: u32) -> Result<RgbaImage> {
    let fill = &variant.fill;
    debug!(
        "fill {}: {}px {} -> {}, highlight {}",
        variant.name, size, fill.top, fill.bottom, fill.highlight
    );
    create_fill(size, fill.top, fill.bottom, fill.highlight)
        .with_context(|| format!("Failed to render fill for {}", variant.name))
}

fn generate_preview(palette: &Palette, fraction: f32, out_dir: &Path) -> Result<()> {
    let mut rows = Vec::with_capacity(palette.variants.len());
    for variant in &palette.variants {
        rows.push((
            render_socket(variant, palette.socket_size)?,
            render_fill(variant, palette.fill_size)?,
        ));
    }

    let sheet = preview::render_preview(&rows, fraction)?;
    save_png(&sheet, &out_dir.join(PREVIEW_FILE_NAME))?;
    println!("  ✓ Generated {PREVIEW_FILE_NAME}");
    Ok(())
}

/// Write `image` to `path` as an RGBA PNG
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_png(image.as_raw(), &mut writer, image.width(), image.height())
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    writer.flush().context("Failed to flush PNG")?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, width: u32, height: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, width, height, ColorType::Rgba8)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::MAX_SPRITE_SIZE;
    use image::Rgba;

    const GRAY_TOP: Rgb = Rgb::new(50, 35, 55);
    const GRAY_BOT: Rgb = Rgb::new(35, 22, 40);

    fn gray_fill() -> RgbaImage {
        create_fill(
            8,
            Rgb::new(180, 120, 170),
            Rgb::new(140, 85, 130),
            Rgb::new(220, 180, 210),
        )
        .unwrap()
    }

    #[test]
    fn socket_cuts_corners_and_keeps_translucent_well() {
        let socket = create_socket(10, GRAY_TOP, GRAY_BOT).unwrap();
        assert_eq!(socket.dimensions(), (10, 10));

        assert_eq!(socket.get_pixel(0, 0)[3], 0);
        assert_eq!(socket.get_pixel(1, 0)[3], 0);
        assert_eq!(socket.get_pixel(9, 8)[3], 0);
        assert_eq!(socket.get_pixel(5, 5)[3], SOCKET_FILL_ALPHA);
        assert_eq!(socket.get_pixel(2, 0)[3], SOCKET_BORDER_ALPHA);
        assert_eq!(socket.get_pixel(1, 1)[3], SOCKET_FILL_ALPHA);
    }

    #[test]
    fn socket_alphas_are_region_constants() {
        let socket = create_socket(10, GRAY_TOP, GRAY_BOT).unwrap();
        for (x, y, pixel) in socket.enumerate_pixels() {
            let expected = if is_socket_corner(x, y, 10) {
                0
            } else if is_socket_border(x, y, 10) {
                SOCKET_BORDER_ALPHA
            } else {
                SOCKET_FILL_ALPHA
            };
            assert_eq!(pixel[3], expected, "({x}, {y})");
        }
    }

    #[test]
    fn socket_border_bands_from_top_to_bottom() {
        let socket = create_socket(10, GRAY_TOP, GRAY_BOT).unwrap();
        // x + y = 2 quantizes to level 0
        assert_eq!(*socket.get_pixel(2, 0), Rgba([50, 35, 55, SOCKET_BORDER_ALPHA]));
        // x + y = 3 sits on a half and rounds down to the even level 0
        assert_eq!(*socket.get_pixel(3, 0), Rgba([50, 35, 55, SOCKET_BORDER_ALPHA]));
        // x + y = 15 sits on a half and rounds down to level 2
        assert_eq!(*socket.get_pixel(9, 6), Rgba([40, 26, 45, SOCKET_BORDER_ALPHA]));
        // x + y = 16 quantizes to level 3
        assert_eq!(*socket.get_pixel(9, 7), Rgba([35, 22, 40, SOCKET_BORDER_ALPHA]));
        // the well starts at its own top color
        assert_eq!(*socket.get_pixel(1, 1), Rgba([20, 20, 25, SOCKET_FILL_ALPHA]));
    }

    #[test]
    fn fill_has_sparkle_and_chamfered_corners() {
        let fill = gray_fill();
        assert_eq!(fill.dimensions(), (8, 8));
        assert_eq!(*fill.get_pixel(2, 2), Rgba([220, 180, 210, 255]));

        for (x, y) in [(0, 0), (7, 0), (0, 7), (7, 7)] {
            assert_eq!(fill.get_pixel(x, y)[3], 0);
        }
        assert_eq!(fill.get_pixel(1, 0)[3], 255);
        assert_eq!(*fill.get_pixel(7, 6), Rgba([140, 85, 130, 255]));
        assert_eq!(*fill.get_pixel(1, 0), Rgba([180, 120, 170, 255]));
    }

    #[test]
    fn small_fill_has_no_sparkle() {
        let highlight = Rgb::new(255, 255, 255);
        let fill = create_fill(5, Rgb::new(10, 10, 10), Rgb::new(10, 10, 10), highlight).unwrap();
        assert!(fill.pixels().all(|p| p[0] != 255));
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(create_socket(1, GRAY_TOP, GRAY_BOT).is_err());
        assert!(create_fill(0, GRAY_TOP, GRAY_BOT, GRAY_TOP).is_err());
        assert!(create_socket(MAX_SPRITE_SIZE + 1, GRAY_TOP, GRAY_BOT).is_err());

        let message = format!("{:#}", create_fill(u32::MAX, GRAY_TOP, GRAY_BOT, GRAY_TOP).unwrap_err());
        assert!(message.contains("Sprite size"), "{message}");
    }

    #[test]
    fn png_output_is_deterministic() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let first = temp_dir.path().join("a.png");
        let second = temp_dir.path().join("b.png");

        save_png(&gray_fill(), &first).unwrap();
        save_png(&gray_fill(), &second).unwrap();

        assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());

        let decoded = image::open(&first).unwrap().to_rgba8();
        assert_eq!(decoded, gray_fill());
    }
}
