//! Extension parser registry.
//!
//! Maps extension labels, and application identifiers within the application
//! extension, to parsers. A registry is a plain value: build it once, adjust
//! it with [`ExtensionRegistry::register`] and hand it to the decoder.

use crate::extension::{
    ANIMEXTS_AUTH_CODE, ANIMEXTS_IDENTIFIER, APPLICATION_ID_SIZE, ApplicationData,
    ApplicationExtension, Extension, GraphicControl, NETSCAPE_AUTH_CODE, NETSCAPE_IDENTIFIER,
    labels,
};
use oxigif_core::error::{OxiGifError, Result};
use std::collections::HashMap;

/// Parses the concatenated sub-block payload of an extension.
pub type ExtensionParser = fn(&ExtensionRegistry, u8, Vec<u8>) -> Result<Extension>;

/// Parses the payload of an application extension after its identifier.
pub type ApplicationParser = fn(&[u8]) -> Result<ApplicationData>;

/// Application identifier followed by authentication code.
pub type ApplicationKey = [u8; APPLICATION_ID_SIZE];

/// Label and application identifier dispatch for extension parsing.
#[derive(Debug, Clone)]
pub struct ExtensionRegistry {
    parsers: HashMap<u8, ExtensionParser>,
    applications: HashMap<ApplicationKey, ApplicationParser>,
}

impl Default for ExtensionRegistry {
    /// Registry with graphic control, comment and application parsing, and
    /// the NETSCAPE2.0 and ANIMEXTS1.0 looping extensions.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(labels::GRAPHIC_CONTROL, parse_graphic_control);
        registry.register(labels::COMMENT, parse_comment);
        registry.register(labels::APPLICATION, parse_application);
        registry.register_application(
            NETSCAPE_IDENTIFIER,
            NETSCAPE_AUTH_CODE,
            ApplicationData::parse_looping,
        );
        registry.register_application(
            ANIMEXTS_IDENTIFIER,
            ANIMEXTS_AUTH_CODE,
            ApplicationData::parse_looping,
        );
        registry
    }
}

impl ExtensionRegistry {
    /// Registry without any parser: every extension stays generic.
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
            applications: HashMap::new(),
        }
    }

    /// Register a parser for `label`, returning the one it replaces.
    pub fn register(&mut self, label: u8, parser: ExtensionParser) -> Option<ExtensionParser> {
        self.parsers.insert(label, parser)
    }

    /// Register a parser for one application identifier and auth code.
    pub fn register_application(
        &mut self,
        identifier: [u8; 8],
        auth_code: [u8; 3],
        parser: ApplicationParser,
    ) -> Option<ApplicationParser> {
        self.applications
            .insert(application_key(&identifier, &auth_code), parser)
    }

    /// Remove the parser for `label`.
    pub fn unregister(&mut self, label: u8) -> Option<ExtensionParser> {
        self.parsers.remove(&label)
    }

    /// Whether `label` has a parser.
    pub fn is_registered(&self, label: u8) -> bool {
        self.parsers.contains_key(&label)
    }

    /// Parse an extension payload, falling back to [`Extension::Generic`].
    pub fn parse(&self, label: u8, data: Vec<u8>) -> Result<Extension> {
        match self.parsers.get(&label) {
            Some(parser) => parser(self, label, data),
            None => Ok(Extension::Generic { label, data }),
        }
    }

    /// Parse the payload of an application extension, identifier included.
    pub fn parse_application(&self, data: &[u8]) -> Result<ApplicationExtension> {
        if data.len() < APPLICATION_ID_SIZE {
            return Err(OxiGifError::invalid_extension(
                labels::APPLICATION,
                format!("identifier needs {} bytes, found {}", APPLICATION_ID_SIZE, data.len()),
            ));
        }

        let (key, payload) = data.split_at(APPLICATION_ID_SIZE);
        let mut identifier = [0u8; 8];
        let mut auth_code = [0u8; 3];
        identifier.copy_from_slice(&key[..8]);
        auth_code.copy_from_slice(&key[8..]);

        let app_data = match self.applications.get(&application_key(&identifier, &auth_code)) {
            Some(parser) => parser(payload)?,
            None => ApplicationData::Generic(payload.to_vec()),
        };

        Ok(ApplicationExtension {
            identifier,
            auth_code,
            data: app_data,
        })
    }
}

fn application_key(identifier: &[u8; 8], auth_code: &[u8; 3]) -> ApplicationKey {
    let mut key = [0u8; APPLICATION_ID_SIZE];
    key[..8].copy_from_slice(identifier);
    key[8..].copy_from_slice(auth_code);
    key
}

fn parse_graphic_control(_: &ExtensionRegistry, _: u8, data: Vec<u8>) -> Result<Extension> {
    GraphicControl::parse(&data).map(Extension::GraphicControl)
}

fn parse_comment(_: &ExtensionRegistry, _: u8, data: Vec<u8>) -> Result<Extension> {
    Ok(Extension::Comment(data))
}

fn parse_application(registry: &ExtensionRegistry, _: u8, data: Vec<u8>) -> Result<Extension> {
    registry.parse_application(&data).map(Extension::Application)
}
