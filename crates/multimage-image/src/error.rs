/// An error type for the image crates.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when the image data is not contiguous.
    #[error("Image data is not contiguous")]
    ImageDataNotContiguous,

    /// Error when the array shape cannot back an image.
    #[error("Invalid shape. {0}")]
    InvalidShape(#[from] ndarray::ShapeError),

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the number of channels does not match the image type.
    #[error("Expected {1} channels, got {0}")]
    InvalidChannelCount(usize, usize),

    /// Error when two images are expected to have the same size.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a pixel value cannot be represented in the target type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds for an image with {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a crop rectangle is empty or does not fit inside the image.
    #[error("Crop area (x: {0}, y: {1}, width: {2}, height: {3}) does not fit in a {4}x{5} image")]
    CropOutOfBounds(usize, usize, usize, usize, usize, usize),

    /// Error when a resize would produce an image without pixels.
    #[error("Invalid target size {0}x{1}, both sides must be positive")]
    InvalidTargetSize(usize, usize),

    /// Error when the resize backend rejects the operation.
    #[error("Failed to resize the image. {0}")]
    ResizeFailed(String),

    /// Error when the hue shift is outside of [-1, 1].
    #[error("Hue delta must be a finite value in [-1, 1], got {0}")]
    InvalidHueDelta(f32),

    /// Error when a normalization range is empty or not finite.
    #[error("Invalid value range [{0}, {1}]")]
    InvalidValueRange(f32, f32),
}
