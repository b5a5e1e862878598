//! GIF stream writer.

use crate::color_table::{ColorTable, MAX_COLORS};
use crate::extension::Extension;
use crate::frame::Frame;
use crate::header::{GifVersion, LogicalScreenDescriptor};
use crate::reader::TRAILER;
use log::{debug, warn};
use oxigif_core::error::{OxiGifError, Result};
use oxigif_lzw::{CodecOptions, ImageDataInfo, write_image_data, write_image_data_with_code_size};
use std::io::Write;

/// Options for writing a GIF stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncoderOptions {
    /// Options passed to the LZW encoder of every frame.
    pub codec: CodecOptions,
    /// Reuse the minimum code size a frame was read with instead of deriving
    /// it from the palette.
    pub preserve_code_size: bool,
}

/// Streaming GIF writer.
///
/// Call [`write_header`](Self::write_header) once, then any number of
/// [`write_frame`](Self::write_frame) and
/// [`write_extension`](Self::write_extension), then
/// [`write_trailer`](Self::write_trailer).
pub struct GifEncoder<W: Write> {
    writer: W,
    options: EncoderOptions,
    global_palette_size: usize,
    header_written: bool,
    frames_written: usize,
}

impl<W: Write> GifEncoder<W> {
    /// Create a writer with default options.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, EncoderOptions::default())
    }

    /// Create a writer with explicit options.
    pub fn with_options(writer: W, options: EncoderOptions) -> Self {
        Self {
            writer,
            options,
            global_palette_size: MAX_COLORS,
            header_written: false,
            frames_written: 0,
        }
    }

    /// Write the header, logical screen and global color table.
    ///
    /// The table flag and size field of `screen` are taken from `global`.
    pub fn write_header(
        &mut self,
        version: GifVersion,
        screen: &LogicalScreenDescriptor,
        global: Option<&ColorTable>,
    ) -> Result<()> {
        if self.header_written {
            return Err(OxiGifError::invalid_header("header already written"));
        }

        let mut screen = screen.clone();
        screen.has_global_color_table = global.is_some();
        if let Some(table) = global {
            screen.color_table_size = table.size_field();
        }

        version.write(&mut self.writer)?;
        screen.write(&mut self.writer)?;
        if let Some(table) = global {
            table.write(&mut self.writer)?;
            self.global_palette_size = table.padded_len();
        }

        self.header_written = true;
        Ok(())
    }

    /// Write a standalone extension block.
    pub fn write_extension(&mut self, extension: &Extension) -> Result<()> {
        self.ensure_header()?;
        extension.write(&mut self.writer)
    }

    /// Write a frame: its extensions, descriptor, local table and image data.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<ImageDataInfo> {
        self.ensure_header()?;

        for extension in &frame.extensions {
            extension.write(&mut self.writer)?;
        }

        let mut descriptor = frame.descriptor.clone();
        descriptor.has_local_color_table = frame.local_color_table.is_some();
        if let Some(table) = &frame.local_color_table {
            descriptor.color_table_size = table.size_field();
        }
        if frame.indices.len() != descriptor.pixel_count() {
            warn!(
                "frame {} holds {} indices for a {}x{} descriptor",
                self.frames_written,
                frame.indices.len(),
                descriptor.width,
                descriptor.height
            );
        }

        descriptor.write(&mut self.writer)?;
        if let Some(table) = &frame.local_color_table {
            table.write(&mut self.writer)?;
        }

        let preserved = frame
            .image_data
            .filter(|_| self.options.preserve_code_size)
            .map(|info| info.code_size);
        let info = match preserved {
            Some(code_size) => write_image_data_with_code_size(
                &mut self.writer,
                &frame.indices,
                code_size,
                self.options.codec,
            )?,
            None => {
                let palette_size = frame
                    .local_color_table
                    .as_ref()
                    .map_or(self.global_palette_size, ColorTable::padded_len);
                write_image_data(&mut self.writer, &frame.indices, palette_size, self.options.codec)?
            }
        };

        self.frames_written += 1;
        Ok(info)
    }

    /// Write the trailer and flush.
    pub fn write_trailer(&mut self) -> Result<()> {
        self.ensure_header()?;
        self.writer.write_all(&[TRAILER])?;
        self.writer.flush()?;
        debug!("wrote {} frames", self.frames_written);
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Get the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ensure_header(&self) -> Result<()> {
        if self.header_written {
            Ok(())
        } else {
            Err(OxiGifError::invalid_header("header not written yet"))
        }
    }
}
