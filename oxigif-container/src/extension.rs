//! GIF89a extension blocks.
//!
//! Every extension is the introducer `0x21`, a label byte and a sub-block
//! chain. Payloads are kept as raw bytes except for the few blocks whose
//! layout matters to tools: graphic control, looping and comments.

use oxigif_core::error::{OxiGifError, Result};
use oxigif_core::subblock::{BLOCK_TERMINATOR, write_sub_blocks};
use std::io::Write;

/// Extension introducer (`!`).
pub const EXTENSION_INTRODUCER: u8 = 0x21;

/// Well-known extension labels.
pub mod labels {
    /// Plain text extension.
    pub const PLAIN_TEXT: u8 = 0x01;
    /// Graphic control extension.
    pub const GRAPHIC_CONTROL: u8 = 0xF9;
    /// Comment extension.
    pub const COMMENT: u8 = 0xFE;
    /// Application extension.
    pub const APPLICATION: u8 = 0xFF;
}

/// Size of the graphic control extension block.
pub const GRAPHIC_CONTROL_SIZE: usize = 4;

/// Size of the application identifier plus authentication code.
pub const APPLICATION_ID_SIZE: usize = 11;

/// Application identifier of the Netscape looping extension.
pub const NETSCAPE_IDENTIFIER: [u8; 8] = *b"NETSCAPE";
/// Authentication code of the Netscape looping extension.
pub const NETSCAPE_AUTH_CODE: [u8; 3] = *b"2.0";
/// Application identifier of the AnimExts looping extension.
pub const ANIMEXTS_IDENTIFIER: [u8; 8] = *b"ANIMEXTS";
/// Authentication code of the AnimExts looping extension.
pub const ANIMEXTS_AUTH_CODE: [u8; 3] = *b"1.0";

/// Sub-block id of the looping data.
const LOOPING_SUB_BLOCK_ID: u8 = 1;

/// What happens to a frame once its delay has passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisposalMethod {
    /// No disposal specified.
    #[default]
    Unspecified,
    /// Leave the frame in place.
    Keep,
    /// Restore the area to the background color.
    Background,
    /// Restore the area to what it was before the frame.
    Previous,
    /// Values 4-7, undefined by the format.
    Reserved(u8),
}

impl DisposalMethod {
    /// Decode the 3-bit disposal field.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => DisposalMethod::Unspecified,
            1 => DisposalMethod::Keep,
            2 => DisposalMethod::Background,
            3 => DisposalMethod::Previous,
            n => DisposalMethod::Reserved(n),
        }
    }

    /// Encode to the 3-bit disposal field.
    pub fn to_bits(self) -> u8 {
        match self {
            DisposalMethod::Unspecified => 0,
            DisposalMethod::Keep => 1,
            DisposalMethod::Background => 2,
            DisposalMethod::Previous => 3,
            DisposalMethod::Reserved(n) => n & 0x07,
        }
    }
}

/// Graphic control extension (0xF9).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphicControl {
    /// Disposal method.
    pub disposal: DisposalMethod,
    /// Whether the viewer should wait for user input.
    pub user_input: bool,
    /// Whether `transparent_index` is in use.
    pub has_transparency: bool,
    /// Delay before the next frame, in hundredths of a second.
    pub delay: u16,
    /// Color index treated as transparent.
    pub transparent_index: u8,
}

impl GraphicControl {
    /// Parse the 4-byte block.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let [packed, lo, hi, transparent_index, ..] = *data else {
            return Err(OxiGifError::invalid_extension(
                labels::GRAPHIC_CONTROL,
                format!("expected {} bytes, found {}", GRAPHIC_CONTROL_SIZE, data.len()),
            ));
        };

        Ok(Self {
            disposal: DisposalMethod::from_bits(packed >> 2),
            user_input: packed & 0x02 != 0,
            has_transparency: packed & 0x01 != 0,
            delay: u16::from_le_bytes([lo, hi]),
            transparent_index,
        })
    }

    /// Serialize to the 4-byte block.
    pub fn to_bytes(&self) -> [u8; GRAPHIC_CONTROL_SIZE] {
        let mut packed = self.disposal.to_bits() << 2;
        if self.user_input {
            packed |= 0x02;
        }
        if self.has_transparency {
            packed |= 0x01;
        }
        let [lo, hi] = self.delay.to_le_bytes();
        [packed, lo, hi, self.transparent_index]
    }

    /// Transparent color index, if any.
    pub fn transparent(&self) -> Option<u8> {
        self.has_transparency.then_some(self.transparent_index)
    }
}

/// Payload of an application extension after its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationData {
    /// Animation loop count (0 = forever).
    Looping {
        /// Number of loops.
        loops: u16,
    },
    /// Anything else, kept verbatim.
    Generic(Vec<u8>),
}

impl ApplicationData {
    /// Parse looping data: sub-block id 1 and a little-endian loop count.
    pub fn parse_looping(data: &[u8]) -> Result<Self> {
        match *data {
            [LOOPING_SUB_BLOCK_ID, lo, hi, ..] => Ok(ApplicationData::Looping {
                loops: u16::from_le_bytes([lo, hi]),
            }),
            _ => Err(OxiGifError::invalid_extension(
                labels::APPLICATION,
                "looping data must be sub-block id 1 and a 16-bit loop count",
            )),
        }
    }

    /// Serialize the payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            ApplicationData::Looping { loops } => {
                let [lo, hi] = loops.to_le_bytes();
                vec![LOOPING_SUB_BLOCK_ID, lo, hi]
            }
            ApplicationData::Generic(data) => data.clone(),
        }
    }
}

/// Application extension (0xFF).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationExtension {
    /// Application identifier.
    pub identifier: [u8; 8],
    /// Application authentication code.
    pub auth_code: [u8; 3],
    /// Payload.
    pub data: ApplicationData,
}

impl ApplicationExtension {
    /// Netscape 2.0 looping extension.
    pub fn netscape_looping(loops: u16) -> Self {
        Self {
            identifier: NETSCAPE_IDENTIFIER,
            auth_code: NETSCAPE_AUTH_CODE,
            data: ApplicationData::Looping { loops },
        }
    }

    /// Identifier and authentication code as one string, e.g. `NETSCAPE2.0`.
    pub fn application_id(&self) -> String {
        let mut id = String::from_utf8_lossy(&self.identifier).into_owned();
        id.push_str(&String::from_utf8_lossy(&self.auth_code));
        id
    }
}

/// A parsed extension block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    /// Graphic control extension.
    GraphicControl(GraphicControl),
    /// Application extension.
    Application(ApplicationExtension),
    /// Comment extension text, usually 7-bit ASCII.
    Comment(Vec<u8>),
    /// Any extension without a registered parser.
    Generic {
        /// Extension label.
        label: u8,
        /// Concatenated sub-block payload.
        data: Vec<u8>,
    },
}

impl Extension {
    /// Label byte of this extension.
    pub fn label(&self) -> u8 {
        match self {
            Extension::GraphicControl(_) => labels::GRAPHIC_CONTROL,
            Extension::Application(_) => labels::APPLICATION,
            Extension::Comment(_) => labels::COMMENT,
            Extension::Generic { label, .. } => *label,
        }
    }

    /// Short human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Extension::GraphicControl(_) => "graphic control",
            Extension::Application(_) => "application",
            Extension::Comment(_) => "comment",
            Extension::Generic {
                label: labels::PLAIN_TEXT,
                ..
            } => "plain text",
            Extension::Generic { .. } => "unknown",
        }
    }

    /// Write the whole block: introducer, label and sub-blocks.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[EXTENSION_INTRODUCER, self.label()])?;

        match self {
            Extension::GraphicControl(gce) => {
                writer.write_all(&[GRAPHIC_CONTROL_SIZE as u8])?;
                writer.write_all(&gce.to_bytes())?;
                writer.write_all(&[BLOCK_TERMINATOR])?;
            }
            Extension::Application(app) => {
                // The identifier always travels in its own 11-byte sub-block.
                writer.write_all(&[APPLICATION_ID_SIZE as u8])?;
                writer.write_all(&app.identifier)?;
                writer.write_all(&app.auth_code)?;
                write_sub_blocks(writer, &app.data.to_bytes())?;
            }
            Extension::Comment(text) => write_sub_blocks(writer, text)?,
            Extension::Generic { data, .. } => write_sub_blocks(writer, data)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphic_control() {
        let gce = GraphicControl::parse(&[0x0D, 0x0A, 0x00, 0x07]).unwrap();
        assert_eq!(gce.disposal, DisposalMethod::Previous);
        assert!(!gce.user_input);
        assert_eq!(gce.transparent(), Some(7));
        assert_eq!(gce.delay, 10);
        assert_eq!(gce.to_bytes(), [0x0D, 0x0A, 0x00, 0x07]);

        let err = GraphicControl::parse(&[0x00, 0x01]).unwrap_err();
        assert!(matches!(err, OxiGifError::InvalidExtension { label: 0xF9, .. }));
    }

    #[test]
    fn test_disposal_bits() {
        for bits in 0..8 {
            assert_eq!(DisposalMethod::from_bits(bits).to_bits(), bits);
        }
        assert_eq!(DisposalMethod::from_bits(5), DisposalMethod::Reserved(5));
    }

    #[test]
    fn test_write_graphic_control() {
        let ext = Extension::GraphicControl(GraphicControl::default());
        let mut out = Vec::new();
        ext.write(&mut out).unwrap();
        assert_eq!(out, [0x21, 0xF9, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_write_netscape_looping() {
        let ext = Extension::Application(ApplicationExtension::netscape_looping(0));
        let mut out = Vec::new();
        ext.write(&mut out).unwrap();

        let mut expected = vec![0x21, 0xFF, 0x0B];
        expected.extend_from_slice(b"NETSCAPE2.0");
        expected.extend_from_slice(&[0x03, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_looping_data() {
        assert_eq!(
            ApplicationData::parse_looping(&[1, 0x10, 0x00]).unwrap(),
            ApplicationData::Looping { loops: 16 }
        );
        assert!(ApplicationData::parse_looping(&[2, 0, 0]).is_err());
        assert!(ApplicationData::parse_looping(&[1, 0]).is_err());
    }

    #[test]
    fn test_comment_and_generic() {
        let mut out = Vec::new();
        Extension::Comment(b"hi".to_vec()).write(&mut out).unwrap();
        assert_eq!(out, [0x21, 0xFE, 0x02, b'h', b'i', 0x00]);

        let plain = Extension::Generic {
            label: labels::PLAIN_TEXT,
            data: vec![],
        };
        assert_eq!(plain.name(), "plain text");
        let mut out = Vec::new();
        plain.write(&mut out).unwrap();
        assert_eq!(out, [0x21, 0x01, 0x00]);
    }
}
