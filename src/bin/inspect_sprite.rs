use anyhow::{Context, Result};

// Prints a sprite's pixels as an RGBA grid, one row per line.
fn main() -> Result<()> {
    let Some(path) = std::env::args().nth(1) else {
        anyhow::bail!("Usage: inspect_sprite <SPRITE.png>");
    };

    let img = image::open(&path)
        .with_context(|| format!("Failed to open {path}"))?
        .to_rgba8();

    println!("Inspecting sprite: {}", path);
    println!("Dimensions: {}x{}", img.width(), img.height());

    let mut transparent = 0;
    for y in 0..img.height() {
        let row: Vec<String> = (0..img.width())
            .map(|x| {
                let [r, g, b, a] = img.get_pixel(x, y).0;
                if a == 0 {
                    transparent += 1;
                    "   ....    ".to_string()
                } else {
                    format!("{r:02x}{g:02x}{b:02x}/{a:<3} ")
                }
            })
            .collect();
        println!("{}", row.join(""));
    }

    println!("\n{} transparent pixel(s)", transparent);
    Ok(())
}
