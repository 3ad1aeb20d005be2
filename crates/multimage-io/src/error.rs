/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode the JPEG image.
    #[error("Error with Jpeg decoding. {0}")]
    JpegDecodingError(#[from] zune_jpeg::errors::DecodeErrors),

    /// Error to encode the JPEG image.
    #[error("Error with Jpeg encoding. {0}")]
    JpegEncodingError(#[from] jpeg_encoder::EncodingError),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] multimage_image::ImageError),

    /// Error to decode or encode the image through the image crate.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error to encode the PNG image.
    #[error("Failed to encode the png image. {0}")]
    PngEncodingError(String),

    /// The JPEG quality is outside of [0, 100].
    #[error("Invalid JPEG quality {0}, expected a value in [0, 100]")]
    InvalidQuality(u8),

    /// The metadata value does not fit the key.
    #[error("Invalid metadata value for {0}: {1}")]
    InvalidMetadata(String, String),

    /// The EXIF block could not be read or written.
    #[error("Failed to process the image metadata. {0}")]
    MetadataError(String),

    /// The display backend failed.
    #[error("Failed to view the image. {0}")]
    ViewerError(String),
}
