//! OxiGif CLI - GIF image data inspection and recompression
//!
//! A Pure Rust utility for looking inside GIF files and exercising the LZW codec.

mod commands;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{
    cmd_compress, cmd_decompress, cmd_extract, cmd_frames, cmd_info, cmd_recompress, cmd_test,
};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxigif")]
#[command(author, version, about = "Pure Rust GIF image data utility")]
#[command(long_about = "
OxiGif reads GIF files and their LZW-compressed image data.

Examples:
  oxigif info image.gif
  oxigif frames animation.gif --json
  oxigif extract animation.gif -o frames/
  oxigif compress frame_000.idx -o frame.lzw --palette-size 16
  oxigif decompress frame.lzw -o frame_000.idx
  oxigif test *.gif
  oxigif recompress input.gif output.gif
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show file information
    #[command(alias = "i")]
    Info {
        /// GIF file
        file: PathBuf,
    },

    /// List frames with their image data statistics
    #[command(alias = "l")]
    Frames {
        /// GIF file
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Accept image data without an End of Information code
        #[arg(long)]
        lenient: bool,
    },

    /// Extract decoded pixel indices of every frame
    #[command(alias = "x")]
    Extract {
        /// GIF file
        file: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,

        /// Accept image data without an End of Information code
        #[arg(long)]
        lenient: bool,
    },

    /// Compress raw pixel indices into an image data block
    Compress {
        /// Raw index file, one byte per pixel
        input: PathBuf,

        /// Output image data block
        #[arg(short, long)]
        output: PathBuf,

        /// Number of palette colors the indices refer to
        #[arg(short, long, default_value_t = 256)]
        palette_size: usize,
    },

    /// Decompress an image data block into raw pixel indices
    Decompress {
        /// Image data block: code size byte followed by sub-blocks
        input: PathBuf,

        /// Output raw index file
        #[arg(short, long)]
        output: PathBuf,

        /// Accept image data without an End of Information code
        #[arg(long)]
        lenient: bool,
    },

    /// Decode, re-encode and compare every frame
    #[command(alias = "t")]
    Test {
        /// GIF files to test
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Rewrite a GIF with freshly encoded image data
    Recompress {
        /// Input GIF file
        input: PathBuf,

        /// Output GIF file
        output: PathBuf,

        /// Keep each frame's original minimum code size
        #[arg(long)]
        preserve_code_size: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG, when set, overrides the flag.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Info { file } => cmd_info(&file),
        Commands::Frames {
            file,
            json,
            lenient,
        } => cmd_frames(&file, json, lenient),
        Commands::Extract {
            file,
            output,
            progress,
            lenient,
        } => cmd_extract(&file, &output, progress, lenient),
        Commands::Compress {
            input,
            output,
            palette_size,
        } => cmd_compress(&input, &output, palette_size),
        Commands::Decompress {
            input,
            output,
            lenient,
        } => cmd_decompress(&input, &output, lenient),
        Commands::Test { files } => cmd_test(&files),
        Commands::Recompress {
            input,
            output,
            preserve_code_size,
        } => cmd_recompress(&input, &output, preserve_code_size),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "oxigif", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["oxigif", "-vv", "info", "a.gif"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Info { .. }));
    }

    #[test]
    fn test_compress_defaults() {
        let cli = Cli::try_parse_from(["oxigif", "compress", "in.idx", "-o", "out.lzw"]).unwrap();
        let Commands::Compress { palette_size, .. } = cli.command else {
            panic!("expected compress");
        };
        assert_eq!(palette_size, 256);
    }

    #[test]
    fn test_requires_files() {
        assert!(Cli::try_parse_from(["oxigif", "test"]).is_err());
    }
}
