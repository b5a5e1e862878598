//! Frames command implementation.

use crate::utils::{CliResult, format_savings, read_gif};
use oxigif_container::{DisposalMethod, Frame};
use serde::Serialize;
use std::path::Path;

/// JSON serializable data of one frame.
#[derive(Debug, Serialize)]
struct FrameJson {
    index: usize,
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    interlaced: bool,
    local_color_table: bool,
    palette_size: usize,
    pixels: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_data: Option<ImageDataJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delay: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disposal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transparent_index: Option<u8>,
}

#[derive(Debug, Serialize)]
struct ImageDataJson {
    code_size: u8,
    compressed_size: usize,
    codes: usize,
    clears: usize,
    max_bits: u8,
    table_size: usize,
    bits_per_pixel: f64,
    ratio: f64,
}

/// JSON output for the frame listing.
#[derive(Debug, Serialize)]
struct FramesJson {
    file: String,
    version: String,
    width: u16,
    height: u16,
    frames: Vec<FrameJson>,
}

impl FrameJson {
    fn from_frame(index: usize, frame: &Frame, palette_size: usize) -> Self {
        let desc = &frame.descriptor;
        let gce = frame.graphic_control();

        Self {
            index,
            left: desc.left,
            top: desc.top,
            width: desc.width,
            height: desc.height,
            interlaced: desc.interlaced,
            local_color_table: frame.local_color_table.is_some(),
            palette_size,
            pixels: frame.indices.len(),
            image_data: frame.image_data.map(|info| ImageDataJson {
                code_size: info.code_size,
                compressed_size: info.payload_len,
                codes: info.stats.codes,
                clears: info.stats.clears,
                max_bits: info.stats.max_bits_used,
                table_size: info.stats.table_size,
                bits_per_pixel: info.stats.bits_per_index(info.payload_len),
                ratio: info.compression_ratio(),
            }),
            delay: gce.map(|g| g.delay),
            disposal: gce.map(|g| disposal_name(g.disposal)),
            transparent_index: gce.and_then(|g| g.transparent()),
        }
    }
}

fn disposal_name(disposal: DisposalMethod) -> String {
    match disposal {
        DisposalMethod::Unspecified => "unspecified".to_string(),
        DisposalMethod::Keep => "keep".to_string(),
        DisposalMethod::Background => "background".to_string(),
        DisposalMethod::Previous => "previous".to_string(),
        DisposalMethod::Reserved(n) => format!("reserved({})", n),
    }
}

pub fn cmd_frames(file: &Path, json: bool, lenient: bool) -> CliResult {
    let gif = read_gif(file, lenient)?;
    let global = gif.global_color_table.as_ref();

    let frames: Vec<FrameJson> = gif
        .frames
        .iter()
        .enumerate()
        .map(|(i, frame)| FrameJson::from_frame(i, frame, frame.palette_size(global)))
        .collect();

    if json {
        let output = FramesJson {
            file: file.display().to_string(),
            version: gif.version.to_string(),
            width: gif.screen.width,
            height: gif.screen.height,
            frames,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{:>5} {:>11} {:>11} {:>7} {:>5} {:>10} {:>7} {:>6} {:>8}",
        "Frame", "Size", "Offset", "Colors", "Code", "Compressed", "Clears", "Delay", "Savings"
    );
    println!("{}", "-".repeat(80));

    for frame in &frames {
        let (code_size, compressed, clears) = frame
            .image_data
            .as_ref()
            .map_or((0, 0, 0), |d| (d.code_size, d.compressed_size, d.clears));
        println!(
            "{:>5} {:>11} {:>11} {:>7} {:>5} {:>10} {:>7} {:>6} {:>8}",
            frame.index,
            format!("{}x{}", frame.width, frame.height),
            format!("{},{}", frame.left, frame.top),
            frame.palette_size,
            code_size,
            compressed,
            clears,
            frame.delay.map_or("-".to_string(), |d| d.to_string()),
            format_savings(frame.pixels, compressed)
        );
    }

    Ok(())
}
