//! Decoded frames.

use crate::color_table::{ColorTable, MAX_COLORS};
use crate::descriptor::ImageDescriptor;
use crate::extension::{Extension, GraphicControl};
use oxigif_lzw::ImageDataInfo;

/// One image of a GIF stream with the extensions that precede it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Extensions read between the previous image and this one, in order.
    pub extensions: Vec<Extension>,
    /// Image descriptor.
    pub descriptor: ImageDescriptor,
    /// Local color table, if the frame has one.
    pub local_color_table: Option<ColorTable>,
    /// Decoded pixel indices, in stored row order.
    pub indices: Vec<u8>,
    /// Image data block summary, present on frames read from a stream.
    pub image_data: Option<ImageDataInfo>,
}

impl Frame {
    /// Create a frame at the canvas origin.
    pub fn new(width: u16, height: u16, indices: Vec<u8>) -> Self {
        Self {
            descriptor: ImageDescriptor::new(width, height),
            indices,
            ..Self::default()
        }
    }

    /// Attach a local color table.
    pub fn with_local_color_table(mut self, table: ColorTable) -> Self {
        self.local_color_table = Some(table);
        self
    }

    /// Append an extension written before the image.
    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Palette size the pixel indices refer to.
    ///
    /// The local table wins over the global one; without either, indices
    /// may use the whole byte range.
    pub fn palette_size(&self, global: Option<&ColorTable>) -> usize {
        self.local_color_table
            .as_ref()
            .or(global)
            .map_or(MAX_COLORS, ColorTable::padded_len)
    }

    /// The frame's graphic control extension, if any.
    ///
    /// The last one wins when several precede the image.
    pub fn graphic_control(&self) -> Option<&GraphicControl> {
        self.extensions.iter().rev().find_map(|ext| match ext {
            Extension::GraphicControl(gce) => Some(gce),
            _ => None,
        })
    }

    /// Delay before the next frame, in hundredths of a second.
    pub fn delay(&self) -> u16 {
        self.graphic_control().map_or(0, |gce| gce.delay)
    }
}
