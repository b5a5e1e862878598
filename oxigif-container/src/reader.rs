//! GIF stream reader.
//!
//! The reader walks the block sequence that follows the logical screen:
//!
//! ```text
//! header, screen, [global table],
//!   { extension* , image descriptor, [local table], image data }*,
//!   extension*, trailer
//! ```
//!
//! Frames are produced one at a time by [`GifDecoder::next_frame`], so large
//! animations never need to be held in memory at once.

use crate::color_table::ColorTable;
use crate::descriptor::{IMAGE_SEPARATOR, ImageDescriptor};
use crate::extension::{EXTENSION_INTRODUCER, Extension};
use crate::frame::Frame;
use crate::gif::Gif;
use crate::header::{GifVersion, LogicalScreenDescriptor};
use crate::registry::ExtensionRegistry;
use log::{debug, trace, warn};
use oxigif_core::error::{OxiGifError, Result};
use oxigif_core::subblock::read_sub_blocks;
use oxigif_lzw::{CodecOptions, read_image_data};
use std::io::{self, Read};

/// Trailer byte ending a GIF stream (`;`).
pub const TRAILER: u8 = 0x3B;

/// Reader wrapper tracking the byte offset, for error reports.
#[derive(Debug)]
struct CountingReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }
}

impl<R: Read> CountingReader<R> {
    /// Read one byte, or `None` at end of input.
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Options for reading a GIF stream.
#[derive(Debug, Clone, Default)]
pub struct DecoderOptions {
    /// Options passed to the LZW decoder of every frame.
    pub codec: CodecOptions,
    /// Parsers for extension blocks.
    pub registry: ExtensionRegistry,
}

impl DecoderOptions {
    /// Options tolerating image data that ends without End of Information.
    pub fn lenient() -> Self {
        Self {
            codec: CodecOptions::LENIENT,
            ..Self::default()
        }
    }
}

/// Streaming GIF reader.
pub struct GifDecoder<R: Read> {
    reader: CountingReader<R>,
    options: DecoderOptions,
    version: GifVersion,
    screen: LogicalScreenDescriptor,
    global_color_table: Option<ColorTable>,
    pending: Vec<Extension>,
    frames_read: usize,
    finished: bool,
}

impl<R: Read> GifDecoder<R> {
    /// Read the header, logical screen and global color table.
    pub fn new(reader: R) -> Result<Self> {
        Self::with_options(reader, DecoderOptions::default())
    }

    /// Read the header with explicit options.
    pub fn with_options(reader: R, options: DecoderOptions) -> Result<Self> {
        let mut reader = CountingReader {
            inner: reader,
            position: 0,
        };

        let version = GifVersion::read(&mut reader)?;
        let screen = LogicalScreenDescriptor::read(&mut reader)?;
        let global_color_table = if screen.has_global_color_table {
            Some(ColorTable::read(&mut reader, screen.color_table_size)?)
        } else {
            None
        };

        debug!(
            "{} {}x{}, global color table: {}",
            version,
            screen.width,
            screen.height,
            global_color_table.as_ref().map_or(0, ColorTable::len)
        );

        Ok(Self {
            reader,
            options,
            version,
            screen,
            global_color_table,
            pending: Vec::new(),
            frames_read: 0,
            finished: false,
        })
    }

    /// Format version from the header.
    pub fn version(&self) -> GifVersion {
        self.version
    }

    /// Logical screen descriptor.
    pub fn screen(&self) -> &LogicalScreenDescriptor {
        &self.screen
    }

    /// Global color table, if present.
    pub fn global_color_table(&self) -> Option<&ColorTable> {
        self.global_color_table.as_ref()
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.reader.position
    }

    /// Whether the trailer (or the end of input) has been reached.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Read the next frame, or `None` once the stream has ended.
    ///
    /// Extensions after the last image are kept and returned by
    /// [`GifDecoder::take_trailing_extensions`].
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        while !self.finished {
            let offset = self.reader.position;
            let Some(introducer) = self.reader.next_byte()? else {
                warn!("stream ends at offset {} without a trailer", offset);
                self.finished = true;
                break;
            };

            match introducer {
                EXTENSION_INTRODUCER => self.read_extension()?,
                IMAGE_SEPARATOR => return self.read_frame().map(Some),
                TRAILER => {
                    debug!("trailer at offset {} after {} frames", offset, self.frames_read);
                    self.finished = true;
                }
                other => return Err(OxiGifError::unknown_block(other, offset)),
            }
        }
        Ok(None)
    }

    /// Extensions read since the last image.
    pub fn take_trailing_extensions(&mut self) -> Vec<Extension> {
        std::mem::take(&mut self.pending)
    }

    /// Read every remaining frame into a [`Gif`].
    pub fn decode(mut self) -> Result<Gif> {
        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame()? {
            frames.push(frame);
        }

        Ok(Gif {
            version: self.version,
            screen: self.screen,
            global_color_table: self.global_color_table,
            frames,
            trailing_extensions: self.pending,
        })
    }

    fn read_extension(&mut self) -> Result<()> {
        let label = self.reader.next_byte()?.ok_or_else(|| {
            OxiGifError::invalid_header("stream ends inside an extension introducer")
        })?;
        let data = read_sub_blocks(&mut self.reader)?;
        let extension = self.options.registry.parse(label, data)?;
        trace!("{} extension ({:#04x})", extension.name(), label);
        self.pending.push(extension);
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Frame> {
        let descriptor = ImageDescriptor::read_body(&mut self.reader)?;
        let local_color_table = if descriptor.has_local_color_table {
            Some(ColorTable::read(&mut self.reader, descriptor.color_table_size)?)
        } else {
            None
        };

        let (indices, info) = read_image_data(&mut self.reader, self.options.codec)?;
        if indices.len() != descriptor.pixel_count() {
            warn!(
                "frame {} decodes to {} indices, descriptor announces {}x{}",
                self.frames_read,
                indices.len(),
                descriptor.width,
                descriptor.height
            );
        }

        trace!(
            "frame {}: {}x{} at ({}, {}), code size {}",
            self.frames_read,
            descriptor.width,
            descriptor.height,
            descriptor.left,
            descriptor.top,
            info.code_size
        );
        self.frames_read += 1;

        Ok(Frame {
            extensions: std::mem::take(&mut self.pending),
            descriptor,
            local_color_table,
            indices,
            image_data: Some(info),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_gif(body: &[u8]) -> Vec<u8> {
        let mut data = b"GIF89a".to_vec();
        data.extend_from_slice(&[0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]);
        data.extend_from_slice(body);
        data
    }

    const ONE_BY_ONE: [u8; 10] = [0x2C, 0, 0, 0, 0, 1, 0, 1, 0, 0x00];

    #[test]
    fn test_no_frames() {
        let gif = GifDecoder::new(&minimal_gif(&[TRAILER])[..]).unwrap().decode().unwrap();
        assert!(gif.frames.is_empty());
        assert!(gif.global_color_table.is_none());
    }

    #[test]
    fn test_one_frame() {
        // Clear, 0, EOI at 3 bits
        let mut body = ONE_BY_ONE.to_vec();
        body.extend_from_slice(&[0x02, 0x02, 0x44, 0x01, 0x00, TRAILER]);

        let data = minimal_gif(&body);
        let mut decoder = GifDecoder::new(&data[..]).unwrap();
        let frame = decoder.next_frame().unwrap().unwrap();
        assert_eq!(frame.indices, [0]);
        assert_eq!(frame.image_data.unwrap().code_size, 2);
        assert!(decoder.next_frame().unwrap().is_none());
        assert!(decoder.is_finished());
        assert_eq!(decoder.position(), 13 + body.len() as u64);
    }

    #[test]
    fn test_unknown_block_offset() {
        let data = minimal_gif(&[0x21, 0xFE, 0x00, 0x42]);
        let err = GifDecoder::new(&data[..]).unwrap().decode().unwrap_err();
        assert!(matches!(
            err,
            OxiGifError::UnknownBlock {
                introducer: 0x42,
                offset: 16
            }
        ));
    }

    #[test]
    fn test_missing_trailer() {
        let data = minimal_gif(&[0x21, 0xFE, 0x01, b'a', 0x00]);
        let gif = GifDecoder::new(&data[..]).unwrap().decode().unwrap();
        assert_eq!(gif.trailing_extensions, [Extension::Comment(b"a".to_vec())]);
    }

    #[test]
    fn test_truncated_extension() {
        let data = minimal_gif(&[0x21]);
        assert!(GifDecoder::new(&data[..]).unwrap().decode().is_err());

        let data = minimal_gif(&[0x21, 0xFE, 0x05, b'a']);
        assert!(GifDecoder::new(&data[..]).unwrap().decode().is_err());
    }
}
