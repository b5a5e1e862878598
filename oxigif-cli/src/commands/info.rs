//! Info command implementation.

use crate::utils::{CliResult, format_savings, read_gif};
use oxigif_container::Extension;
use std::collections::BTreeMap;
use std::path::Path;

pub fn cmd_info(file: &Path) -> CliResult {
    let gif = read_gif(file, false)?;
    let metadata = std::fs::metadata(file)?;
    let screen = &gif.screen;

    println!("GIF Information");
    println!("===============");
    println!("File: {}", file.display());
    println!("Version: {}", gif.version);
    println!("Size: {} bytes", metadata.len());
    println!("Canvas: {}x{}", screen.width, screen.height);
    println!("Color resolution: {} bits", screen.color_resolution + 1);
    match &gif.global_color_table {
        Some(table) => println!(
            "Global color table: {} colors{}",
            table.len(),
            if screen.sorted { " (sorted)" } else { "" }
        ),
        None => println!("Global color table: none"),
    }
    println!("Background index: {}", screen.background_color_index);
    if let Some(ratio) = screen.aspect_ratio() {
        println!("Pixel aspect ratio: {:.3}", ratio);
    }

    println!();
    println!("Frames: {}", gif.frames.len());
    match gif.loop_count() {
        Some(0) => println!("Looping: forever"),
        Some(n) => println!("Looping: {} times", n),
        None => {}
    }

    let total_pixels: usize = gif.frames.iter().map(|f| f.indices.len()).sum();
    let total_compressed: usize = gif
        .frames
        .iter()
        .filter_map(|f| f.image_data)
        .map(|info| info.payload_len)
        .sum();
    let total_delay: u32 = gif.frames.iter().map(|f| f.delay() as u32).sum();
    println!("Total pixels: {}", total_pixels);
    println!("Compressed image data: {} bytes", total_compressed);
    println!("Space savings: {}", format_savings(total_pixels, total_compressed));
    if total_delay > 0 {
        println!("Duration: {:.2}s", total_delay as f64 / 100.0);
    }

    let mut extensions: BTreeMap<&str, usize> = BTreeMap::new();
    for ext in gif
        .frames
        .iter()
        .flat_map(|f| &f.extensions)
        .chain(&gif.trailing_extensions)
    {
        *extensions.entry(ext.name()).or_default() += 1;
    }
    if !extensions.is_empty() {
        println!();
        println!("Extensions:");
        for (name, count) in &extensions {
            println!("  {}: {}", name, count);
        }
    }

    let comments: Vec<String> = gif
        .frames
        .iter()
        .flat_map(|f| &f.extensions)
        .chain(&gif.trailing_extensions)
        .filter_map(|ext| match ext {
            Extension::Comment(text) => Some(String::from_utf8_lossy(text).into_owned()),
            _ => None,
        })
        .collect();
    for comment in comments {
        println!("  comment: {}", comment);
    }

    println!();
    for (i, frame) in gif.frames.iter().enumerate() {
        let desc = &frame.descriptor;
        println!(
            "  #{:<4} {}x{} at ({}, {}), {} colors{}",
            i,
            desc.width,
            desc.height,
            desc.left,
            desc.top,
            frame.palette_size(gif.global_color_table.as_ref()),
            if desc.interlaced { ", interlaced" } else { "" }
        );
    }

    Ok(())
}
