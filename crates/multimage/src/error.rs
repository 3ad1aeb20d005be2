use multimage_image::ImageError;
use multimage_io::IoError;

/// An error type for the multimage operations.
#[derive(thiserror::Error, Debug)]
pub enum MultiImageError {
    /// The input cannot be turned into an RGB image.
    #[error("The type {0} is not supported as a multimage input")]
    InvalidInputType(String),

    /// The file to load does not exist or cannot be read.
    #[error("Image resource not found: {0}")]
    ResourceNotFound(std::path::PathBuf),

    /// The crop rectangle or the resize target is not valid for the image.
    #[error("Invalid geometry. {0}")]
    InvalidGeometry(ImageError),

    /// Error from an image operation.
    #[error(transparent)]
    Image(ImageError),

    /// Error from an I/O operation.
    #[error(transparent)]
    Io(IoError),
}

impl From<ImageError> for MultiImageError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::CropOutOfBounds(..) | ImageError::InvalidTargetSize(..) => {
                MultiImageError::InvalidGeometry(err)
            }
            _ => MultiImageError::Image(err),
        }
    }
}

impl From<IoError> for MultiImageError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::FileDoesNotExist(path) => MultiImageError::ResourceNotFound(path),
            IoError::ImageCreationError(err) => err.into(),
            _ => MultiImageError::Io(err),
        }
    }
}
