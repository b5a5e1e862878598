//! Extract command implementation.

use crate::utils::{CliResult, create_progress_bar, frame_file_name, read_gif};
use std::fs;
use std::path::Path;

pub fn cmd_extract(file: &Path, output: &Path, progress: bool, lenient: bool) -> CliResult {
    let gif = read_gif(file, lenient)?;
    fs::create_dir_all(output)?;

    let pb = create_progress_bar(gif.frames.len() as u64, progress);
    let mut total_bytes = 0usize;

    for (i, frame) in gif.frames.iter().enumerate() {
        let name = frame_file_name(i);
        pb.set_message(name.clone());

        fs::write(output.join(&name), &frame.indices)?;
        total_bytes += frame.indices.len();

        if !progress {
            println!(
                "  {} ({}x{}, {} colors)",
                name,
                frame.descriptor.width,
                frame.descriptor.height,
                frame.palette_size(gif.global_color_table.as_ref())
            );
        }
        pb.inc(1);
    }

    pb.finish_with_message("done");
    println!(
        "Extracted {} frames ({} bytes) to {}",
        gif.frames.len(),
        total_bytes,
        output.display()
    );
    Ok(())
}
