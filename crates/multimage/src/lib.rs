#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error type of the [`MultiImage`] operations.
pub mod error;

/// The inputs a [`MultiImage`] can be built from.
pub mod source;

mod multi_image;

pub use crate::error::MultiImageError;
pub use crate::multi_image::{MultiImage, DEFAULT_COMPRESSION_QUALITY};
pub use crate::source::ImageSource;

#[doc(inline)]
pub use multimage_image as image;

#[doc(inline)]
pub use multimage_imgproc as imgproc;

#[doc(inline)]
pub use multimage_io as io;
