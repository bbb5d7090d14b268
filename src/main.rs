use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod color;
mod logging;
mod manifest;
mod mask;
mod palette;
mod preview;
mod sprite_gen;

use palette::Palette;

#[derive(Debug, Parser)]
#[clap(
    name = "sanity-sprites",
    about = "Generate the sanity bar socket and fill sprites"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "Assets/UI")]
    output: PathBuf,

    /// Also generate the Green (sheltered) and Amber (dawn warning) variants
    #[clap(long)]
    extended: bool,

    /// JSON palette file replacing the built-in variants (CSS color strings)
    #[clap(long, value_name = "FILE", conflicts_with = "extended")]
    palette: Option<PathBuf>,

    /// Write sprites.json listing the generated files
    #[clap(long)]
    manifest: bool,

    /// Write SanityPreview.png showing each bar filled to FRACTION (0 to 1)
    #[clap(long, value_name = "FRACTION")]
    preview: Option<f32>,

    /// Log every sprite's colors
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.verbose);

    let palette = match &args.palette {
        Some(path) => Palette::load(path)?,
        None if args.extended => Palette::extended(),
        None => Palette::builtin(),
    };

    sprite_gen::generate_sprites(sprite_gen::Options {
        output: args.output,
        palette,
        manifest: args.manifest,
        preview: args.preview,
    })
}
