use std::path::Path;

use little_exif::filetype::FileExtension;
use multimage_image::{Image, ImageError, ImageSize};

use crate::{
    error::IoError,
    functional, jpeg,
    metadata::{self, ImageMetadata, MetadataKey, MetadataValue},
    png,
};

/// JPEG quality used when none is known.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// How a display image is turned into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EncodingFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// Lossy JPEG at the given quality in [0, 100].
    Jpeg {
        /// The quality of the encoding.
        quality: u8,
    },
}

impl EncodingFormat {
    fn exif_file_type(&self) -> FileExtension {
        match self {
            EncodingFormat::Png => FileExtension::PNG {
                as_zTXt_chunk: false,
            },
            EncodingFormat::Jpeg { .. } => FileExtension::JPEG,
        }
    }
}

/// An RGB image as it is shown, encoded and saved.
///
/// Besides its pixels, a display image knows the format it encodes to and the
/// metadata embedded in the encoded bytes.
///
/// # Example
///
/// ```
/// use multimage_image::Image;
/// use multimage_io::{DisplayImage, EncodingFormat, MetadataKey};
///
/// let rgb = Image::<u8, 3>::from_size_val([8, 4].into(), 100).unwrap();
/// let display = DisplayImage::from_rgb(rgb)
///     .unwrap()
///     .with_metadata(MetadataKey::Artist, "jane")
///     .unwrap();
///
/// assert_eq!(display.format(), EncodingFormat::Png);
/// assert_eq!(display.encoded_size().unwrap(), display.encode_bytes().unwrap().len());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayImage {
    pixels: image::RgbImage,
    format: EncodingFormat,
    metadata: ImageMetadata,
}

impl DisplayImage {
    /// Wrap RGB pixels, encoded as PNG and without metadata.
    pub fn new(pixels: image::RgbImage) -> Self {
        Self {
            pixels,
            format: EncodingFormat::default(),
            metadata: ImageMetadata::default(),
        }
    }

    /// Create a display image from an RGB8 image.
    pub fn from_rgb(image: Image<u8, 3>) -> Result<Self, IoError> {
        let size = image.size();
        let expected = size.area() * 3;
        let data = image.into_vec();
        let len = data.len();

        let pixels = image::RgbImage::from_raw(size.width as u32, size.height as u32, data)
            .ok_or(ImageError::InvalidChannelShape(len, expected))?;

        Ok(Self::new(pixels))
    }

    /// Open an image file.
    ///
    /// Any format the image crate decodes is supported. JPEG files keep
    /// encoding as JPEG at [`DEFAULT_JPEG_QUALITY`], everything else encodes as
    /// PNG. The EXIF metadata of JPEG, PNG and TIFF files is kept.
    ///
    /// # Errors
    ///
    /// Fails with [`IoError::FileDoesNotExist`] if there is no file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let bytes = functional::read_image_bytes(path)?;
        let rgb = functional::decode_image_any_rgb8(&bytes)?;

        let format = match metadata::file_type_from_path(path) {
            Some(FileExtension::JPEG) => EncodingFormat::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            },
            _ => EncodingFormat::Png,
        };

        let metadata = metadata::file_type_from_path(path)
            .map(|file_type| metadata::decode_metadata(&bytes, file_type))
            .unwrap_or_default();

        log::debug!(
            "opened {} ({}, {:?}, {} metadata entries)",
            path.display(),
            rgb.size(),
            format,
            metadata.len()
        );

        Ok(Self::from_rgb(rgb)?
            .with_format(format)
            .with_metadata_map(metadata))
    }

    /// The pixels.
    pub fn pixels(&self) -> &image::RgbImage {
        &self.pixels
    }

    /// The size of the image.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.pixels.width() as usize,
            height: self.pixels.height() as usize,
        }
    }

    /// The encoding format.
    pub fn format(&self) -> EncodingFormat {
        self.format
    }

    /// The metadata.
    pub fn metadata(&self) -> &ImageMetadata {
        &self.metadata
    }

    /// Copy the pixels into an RGB8 image.
    pub fn to_rgb(&self) -> Result<Image<u8, 3>, IoError> {
        Ok(Image::new(self.size(), self.pixels.as_raw().clone())?)
    }

    /// Change the encoding format.
    pub fn with_format(mut self, format: EncodingFormat) -> Self {
        self.format = format;
        self
    }

    /// Replace all the metadata.
    pub fn with_metadata_map(mut self, metadata: ImageMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set one metadata entry.
    ///
    /// # Errors
    ///
    /// Fails with [`IoError::InvalidMetadata`] if the value does not fit the key.
    pub fn with_metadata(
        mut self,
        key: MetadataKey,
        value: impl Into<MetadataValue>,
    ) -> Result<Self, IoError> {
        self.metadata.insert(key, value)?;
        Ok(self)
    }

    /// Encode the image in its own format, metadata included.
    pub fn encode_bytes(&self) -> Result<Vec<u8>, IoError> {
        self.encode_as(self.format)
    }

    /// Size in bytes of [`DisplayImage::encode_bytes`].
    pub fn encoded_size(&self) -> Result<usize, IoError> {
        Ok(self.encode_bytes()?.len())
    }

    /// Re-encode the image as JPEG and decode it back.
    ///
    /// The result carries the compression artifacts, encodes as JPEG at the
    /// same quality and keeps the metadata.
    ///
    /// # Errors
    ///
    /// Fails with [`IoError::InvalidQuality`] for a quality above 100.
    pub fn compress(&self, quality: u8) -> Result<Self, IoError> {
        let bytes = jpeg::encode_image_jpeg_rgb8(&self.to_rgb()?, quality)?;
        let decoded = jpeg::decode_image_jpeg_rgb8(&bytes)?;

        log::debug!(
            "compressed {} at quality {} into {} bytes",
            self.size(),
            quality,
            bytes.len()
        );

        Ok(Self::from_rgb(decoded)?
            .with_format(EncodingFormat::Jpeg { quality })
            .with_metadata_map(self.metadata.clone()))
    }

    /// Write the image in the format implied by the file extension.
    ///
    /// PNG and JPEG files carry the metadata. A PNG display image saved as JPEG
    /// uses [`DEFAULT_JPEG_QUALITY`]. Any other extension the image crate
    /// knows is written without metadata.
    ///
    /// # Errors
    ///
    /// Fails with [`IoError::InvalidFileExtension`] for unknown extensions.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let path = path.as_ref();

        let format = match metadata::file_type_from_path(path) {
            Some(FileExtension::PNG { .. }) => Some(EncodingFormat::Png),
            Some(FileExtension::JPEG) => Some(match self.format {
                EncodingFormat::Jpeg { quality } => EncodingFormat::Jpeg { quality },
                EncodingFormat::Png => EncodingFormat::Jpeg {
                    quality: DEFAULT_JPEG_QUALITY,
                },
            }),
            _ => None,
        };

        match format {
            Some(format) => std::fs::write(path, self.encode_as(format)?)?,
            None => functional::write_image_any_rgb8(path, &self.to_rgb()?)?,
        }

        Ok(())
    }

    fn encode_as(&self, format: EncodingFormat) -> Result<Vec<u8>, IoError> {
        let rgb = self.to_rgb()?;
        let mut bytes = match format {
            EncodingFormat::Png => png::encode_image_png_rgb8(&rgb)?,
            EncodingFormat::Jpeg { quality } => jpeg::encode_image_jpeg_rgb8(&rgb, quality)?,
        };

        metadata::embed_metadata(&mut bytes, format.exif_file_type(), &self.metadata)?;

        log::trace!("encoded {} as {:?}: {} bytes", self.size(), format, bytes.len());

        Ok(bytes)
    }
}
