//! # OxiGif Container
//!
//! GIF file structure on top of the [`oxigif_lzw`] image data codec.
//!
//! This crate reads and writes the blocks around the compressed pixels:
//!
//! - **Header**: `GIF87a` / `GIF89a` signature detection
//! - **Logical screen**: canvas size, global color table flags
//! - **Color tables**: global and per-frame local palettes
//! - **Extensions**: graphic control, application (looping), comment and
//!   any other label kept verbatim, dispatched through an
//!   [`ExtensionRegistry`]
//! - **Frames**: image descriptor, local table and decoded indices
//!
//! Rows are kept in stored order; interlaced frames are not reordered and
//! nothing is composited onto a canvas.
//!
//! ## Example
//!
//! ```rust
//! use oxigif_container::{ColorTable, Frame, Gif, Rgb};
//!
//! let mut gif = Gif::new(2, 2);
//! gif.global_color_table = Some(ColorTable::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap());
//! gif.frames.push(Frame::new(2, 2, vec![0, 1, 1, 0]));
//!
//! let bytes = gif.to_bytes().unwrap();
//! assert_eq!(&bytes[..6], b"GIF89a");
//!
//! let decoded = Gif::from_bytes(&bytes).unwrap();
//! assert_eq!(decoded.frames[0].indices, [0, 1, 1, 0]);
//! ```
//!
//! ## Streaming
//!
//! [`GifDecoder`] yields one frame at a time and [`GifEncoder`] writes them
//! as they come, for animations too large to hold at once.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod color_table;
pub mod descriptor;
pub mod extension;
pub mod frame;
pub mod gif;
pub mod header;
pub mod reader;
pub mod registry;
pub mod writer;

pub use color_table::{ColorTable, Rgb};
pub use descriptor::ImageDescriptor;
pub use extension::{
    ApplicationData, ApplicationExtension, DisposalMethod, Extension, GraphicControl,
};
pub use frame::Frame;
pub use gif::Gif;
pub use header::{GifVersion, LogicalScreenDescriptor};
pub use oxigif_core::error::{OxiGifError, Result};
pub use reader::{DecoderOptions, GifDecoder, TRAILER};
pub use registry::{ApplicationParser, ExtensionParser, ExtensionRegistry};
pub use writer::{EncoderOptions, GifEncoder};
