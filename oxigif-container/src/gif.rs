//! Whole GIF files in memory.

use crate::color_table::ColorTable;
use crate::extension::{ApplicationData, Extension};
use crate::frame::Frame;
use crate::header::{GifVersion, LogicalScreenDescriptor};
use crate::reader::{DecoderOptions, GifDecoder};
use crate::writer::{EncoderOptions, GifEncoder};
use oxigif_core::error::Result;
use std::io::{Read, Write};

/// A decoded GIF file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gif {
    /// Format version.
    pub version: GifVersion,
    /// Logical screen descriptor.
    pub screen: LogicalScreenDescriptor,
    /// Global color table.
    pub global_color_table: Option<ColorTable>,
    /// Frames in stream order.
    pub frames: Vec<Frame>,
    /// Extensions between the last image and the trailer.
    pub trailing_extensions: Vec<Extension>,
}

impl Gif {
    /// Create an empty GIF89a canvas.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            screen: LogicalScreenDescriptor::new(width, height),
            ..Self::default()
        }
    }

    /// Read a whole stream.
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        GifDecoder::new(reader)?.decode()
    }

    /// Read a whole stream with explicit options.
    pub fn read_with_options<R: Read>(reader: R, options: DecoderOptions) -> Result<Self> {
        GifDecoder::with_options(reader, options)?.decode()
    }

    /// Parse a GIF from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::read(data)
    }

    /// Write the whole stream.
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        self.write_with_options(writer, EncoderOptions::default())
    }

    /// Write the whole stream with explicit options.
    pub fn write_with_options<W: Write>(&self, writer: W, options: EncoderOptions) -> Result<()> {
        let mut encoder = GifEncoder::with_options(writer, options);
        encoder.write_header(self.version, &self.screen, self.global_color_table.as_ref())?;
        for frame in &self.frames {
            encoder.write_frame(frame)?;
        }
        for extension in &self.trailing_extensions {
            encoder.write_extension(extension)?;
        }
        encoder.write_trailer()
    }

    /// Serialize to memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        Ok(out)
    }

    /// Whether the file holds more than one frame.
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// Loop count from a looping application extension (0 = forever).
    pub fn loop_count(&self) -> Option<u16> {
        self.frames
            .iter()
            .flat_map(|frame| &frame.extensions)
            .chain(&self.trailing_extensions)
            .find_map(|ext| match ext {
                Extension::Application(app) => match app.data {
                    ApplicationData::Looping { loops } => Some(loops),
                    ApplicationData::Generic(_) => None,
                },
                _ => None,
            })
    }

    /// Palette size the indices of frame `index` refer to.
    pub fn palette_size(&self, index: usize) -> Option<usize> {
        self.frames
            .get(index)
            .map(|frame| frame.palette_size(self.global_color_table.as_ref()))
    }
}
