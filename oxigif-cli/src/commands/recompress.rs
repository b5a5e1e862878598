//! Recompress command implementation.

use crate::utils::{CliResult, read_gif};
use oxigif_container::EncoderOptions;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn cmd_recompress(input: &Path, output: &Path, preserve_code_size: bool) -> CliResult {
    let gif = read_gif(input, false)?;
    let before: usize = gif
        .frames
        .iter()
        .filter_map(|f| f.image_data)
        .map(|info| info.payload_len)
        .sum();

    let options = EncoderOptions {
        preserve_code_size,
        ..EncoderOptions::default()
    };
    gif.write_with_options(BufWriter::new(File::create(output)?), options)?;

    let input_len = std::fs::metadata(input)?.len();
    let output_len = std::fs::metadata(output)?.len();
    println!(
        "{} -> {}: {} frames, {} -> {} bytes (image data before: {} bytes)",
        input.display(),
        output.display(),
        gif.frames.len(),
        input_len,
        output_len,
        before
    );
    Ok(())
}
