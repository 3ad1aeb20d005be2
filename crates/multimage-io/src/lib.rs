#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access, encoding/decoding failures
/// and metadata errors.
pub mod error;

/// The display image: pixels together with their encoding format and metadata.
pub mod display;

/// High-level image decoding and writing functions.
///
/// See [`functional::decode_image_any_rgb8`] for automatic format detection.
pub mod functional;

/// JPEG image encoding and decoding.
pub mod jpeg;

/// EXIF metadata attached to display images.
pub mod metadata;

/// PNG image encoding.
pub mod png;

/// Display backends to look at images.
///
/// The `rerun` feature enables [`viz::RerunViewer`].
pub mod viz;

pub use crate::display::{DisplayImage, EncodingFormat};
pub use crate::error::IoError;
pub use crate::metadata::{ImageMetadata, MetadataKey, MetadataValue};
