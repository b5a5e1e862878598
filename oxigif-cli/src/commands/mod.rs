//! Command implementations for OxiGif CLI.

pub mod codec;
pub mod extract;
pub mod frames;
pub mod info;
pub mod recompress;

pub use codec::{cmd_compress, cmd_decompress};
pub use extract::cmd_extract;
pub use frames::cmd_frames;
pub use info::cmd_info;
pub use recompress::cmd_recompress;
pub use test::cmd_test;
