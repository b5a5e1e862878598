//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use oxigif_container::{DecoderOptions, Gif};
use oxigif_lzw::CodecOptions;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Boxed error returned by every command.
pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb
}

/// Codec options for the `--lenient` flag.
pub fn codec_options(lenient: bool) -> CodecOptions {
    if lenient {
        CodecOptions::LENIENT
    } else {
        CodecOptions::default()
    }
}

/// Read a whole GIF file.
pub fn read_gif(path: &Path, lenient: bool) -> CliResult<Gif> {
    let reader = BufReader::new(File::open(path)?);
    let options = DecoderOptions {
        codec: codec_options(lenient),
        ..DecoderOptions::default()
    };
    Ok(Gif::read_with_options(reader, options)?)
}

/// File name of the raw indices of frame `index`.
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{:03}.idx", index)
}

/// Space savings of `compressed` bytes over `indices` one-byte pixels.
pub fn format_savings(indices: usize, compressed: usize) -> String {
    if indices == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", (1.0 - compressed as f64 / indices as f64) * 100.0)
}
