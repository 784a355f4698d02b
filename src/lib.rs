// FTM400-RS: Yaesu FTM-400DR channel list importer
//
// Converts an XML channel document into the radio's 25,600-byte memory dump
// so the result can be flashed back onto the device.

pub mod codec;
pub mod core;
pub mod document;
pub mod image;
pub mod layout;

// Re-export commonly used types
pub use codec::{encode_channel, FieldRecord, TagRecord};
pub use core::{Channel, TAG_SIZE};
pub use document::{import_channels, DocumentError, SCHEMA_NS_URI};
pub use image::{Image, ImageError};
pub use layout::{resolve, Destination, Region, SlotCounter, CHANNEL_SIZE, IMAGE_SIZE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
