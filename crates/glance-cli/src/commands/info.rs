use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use glance_core::document::{decode_bytes, sniff_format};

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let format = sniff_format(&bytes)?;
    let raster = decode_bytes(&bytes, format)
        .with_context(|| format!("Failed to decode {}", args.file.display()))?;

    println!("File:        {}", args.file.display());
    println!("Format:      {:?}", format);
    println!("Dimensions:  {}x{}", raster.width(), raster.height());
    println!("Alpha:       {}", if raster.has_alpha { "yes" } else { "no" });

    let file_kb = bytes.len() as f64 / 1024.0;
    let pixel_mb = raster.data.len() as f64 / (1024.0 * 1024.0);
    println!("File size:   {:.1} KB", file_kb);
    println!("Decoded:     {:.1} MB (RGBA8)", pixel_mb);

    Ok(())
}
