//! Bar preview sheet
//!
//! Lays the sprites out the way the in-game sanity bar draws them: ten
//! sockets in a row, each fill centered in its socket and faded by how full
//! that segment is, the whole bar drawn at 2x with point sampling.

use anyhow::Result;
use image::{imageops, imageops::FilterType, RgbaImage};

pub const SEGMENT_COUNT: u32 = 10;
pub const SPACING: u32 = 2;
pub const SCALE: u32 = 2;

/// How full segment `index` is when the bar is at `fraction`
pub fn segment_fill(fraction: f32, index: u32) -> f32 {
    (fraction * SEGMENT_COUNT as f32 - index as f32).clamp(0.0, 1.0)
}

/// Scale the alpha channel by `amount`, leaving color untouched
fn fade(img: &RgbaImage, amount: f32) -> RgbaImage {
    let mut faded = img.clone();
    for pixel in faded.pixels_mut() {
        pixel[3] = (pixel[3] as f32 * amount) as u8;
    }
    faded
}

/// Render one bar at 1x
pub fn render_bar(socket: &RgbaImage, fill: &RgbaImage, fraction: f32) -> RgbaImage {
    let socket_size = socket.width();
    let offset = socket_size.saturating_sub(fill.width()) / 2;
    let width = SEGMENT_COUNT * socket_size + (SEGMENT_COUNT - 1) * SPACING;
    let mut bar = RgbaImage::new(width, socket_size);

    for i in 0..SEGMENT_COUNT {
        let x = i * (socket_size + SPACING);
        imageops::overlay(&mut bar, socket, x.into(), 0);

        let amount = segment_fill(fraction, i);
        if amount > 0.0 {
            let fill = fade(fill, amount);
            imageops::overlay(&mut bar, &fill, (x + offset).into(), offset.into());
        }
    }

    bar
}

/// Stack one bar per `(socket, fill)` pair and upscale the sheet
pub fn render_preview(rows: &[(RgbaImage, RgbaImage)], fraction: f32) -> Result<RgbaImage> {
    if !(0.0..=1.0).contains(&fraction) {
        anyhow::bail!("Preview fill must be between 0 and 1, got {fraction}");
    }
    if rows.is_empty() {
        anyhow::bail!("Nothing to preview");
    }

    let bars: Vec<RgbaImage> = rows
        .iter()
        .map(|(socket, fill)| render_bar(socket, fill, fraction))
        .collect();

    let width = bars.iter().map(|b| b.width()).max().unwrap_or(0);
    let height = bars.iter().map(|b| b.height()).sum::<u32>()
        + (bars.len() as u32 - 1) * SPACING;
    let mut sheet = RgbaImage::new(width, height);

    let mut y = 0;
    for bar in &bars {
        imageops::overlay(&mut sheet, bar, 0, y.into());
        y += bar.height() + SPACING;
    }

    Ok(imageops::resize(
        &sheet,
        width * SCALE,
        height * SCALE,
        FilterType::Nearest,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::sprite_gen::{create_fill, create_socket};

    fn gray_row() -> (RgbaImage, RgbaImage) {
        (
            create_socket(10, Rgb::new(50, 35, 55), Rgb::new(35, 22, 40)).unwrap(),
            create_fill(
                8,
                Rgb::new(180, 120, 170),
                Rgb::new(140, 85, 130),
                Rgb::new(220, 180, 210),
            )
            .unwrap(),
        )
    }

    fn assert_close(drawn: &image::Rgba<u8>, expected: [u8; 4]) {
        for channel in 0..4 {
            assert!(
                drawn[channel].abs_diff(expected[channel]) <= 1,
                "{drawn:?} vs {expected:?}"
            );
        }
    }

    #[test]
    fn segments_fill_left_to_right() {
        assert_eq!(segment_fill(1.0, 0), 1.0);
        assert_eq!(segment_fill(1.0, 9), 1.0);
        assert_eq!(segment_fill(0.0, 0), 0.0);
        assert_eq!(segment_fill(0.5, 4), 1.0);
        assert_eq!(segment_fill(0.5, 5), 0.0);
        assert!((segment_fill(0.55, 5) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn bar_layout_matches_ingame_geometry() {
        let (socket, fill) = gray_row();
        let bar = render_bar(&socket, &fill, 1.0);
        assert_eq!(bar.dimensions(), (118, 10));

        // the highlight lands one pixel in from the socket's edge
        assert_close(bar.get_pixel(3, 3), [220, 180, 210, 255]);
        // spacing between sockets stays empty
        assert_eq!(bar.get_pixel(10, 5)[3], 0);
        assert_eq!(bar.get_pixel(11, 5)[3], 0);
    }

    #[test]
    fn empty_bar_shows_only_sockets() {
        let (socket, fill) = gray_row();
        let bar = render_bar(&socket, &fill, 0.0);
        assert_close(bar.get_pixel(5, 5), socket.get_pixel(5, 5).0);
    }

    #[test]
    fn preview_stacks_rows_and_scales() {
        let sheet = render_preview(&[gray_row(), gray_row()], 0.5).unwrap();
        assert_eq!(sheet.dimensions(), (118 * SCALE, 22 * SCALE));
    }

    #[test]
    fn preview_rejects_out_of_range_fill() {
        assert!(render_preview(&[gray_row()], 1.5).is_err());
        assert!(render_preview(&[], 0.5).is_err());
    }
}
