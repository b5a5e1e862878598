//! Compress and decompress commands: raw indices <-> image data blocks.

use crate::utils::{CliResult, codec_options, format_savings};
use oxigif_lzw::{CodecOptions, read_image_data, write_image_data};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub fn cmd_compress(input: &Path, output: &Path, palette_size: usize) -> CliResult {
    let indices = fs::read(input)?;

    let mut writer = BufWriter::new(File::create(output)?);
    let info = write_image_data(&mut writer, &indices, palette_size, CodecOptions::default())?;
    writer.flush()?;

    println!(
        "{} -> {}: {} indices, code size {}, {} bytes ({} saved), {} clears",
        input.display(),
        output.display(),
        indices.len(),
        info.code_size,
        info.payload_len,
        format_savings(indices.len(), info.payload_len),
        info.stats.clears
    );
    Ok(())
}

pub fn cmd_decompress(input: &Path, output: &Path, lenient: bool) -> CliResult {
    let mut reader = BufReader::new(File::open(input)?);
    let (indices, info) = read_image_data(&mut reader, codec_options(lenient))?;
    fs::write(output, &indices)?;

    println!(
        "{} -> {}: code size {}, {} bytes -> {} indices, widest code {} bits",
        input.display(),
        output.display(),
        info.code_size,
        info.payload_len,
        indices.len(),
        info.stats.max_bits_used
    );
    Ok(())
}
