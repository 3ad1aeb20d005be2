use std::path::{Path, PathBuf};

use multimage_image::Image;
use multimage_io::DisplayImage;
use ndarray::Array3;

/// The inputs a [`MultiImage`](crate::MultiImage) can be built from.
///
/// Every payload converts into a source with `From`, so the constructor and
/// `update` accept them directly.
///
/// # Example
///
/// ```
/// use multimage::ImageSource;
/// use multimage::image::Image;
///
/// let source: ImageSource = Image::<u8, 3>::from_size_val([2, 2].into(), 0).unwrap().into();
/// assert!(matches!(source, ImageSource::Rgb8(_)));
///
/// let source: ImageSource = "photo.jpg".into();
/// assert!(matches!(source, ImageSource::Path(_)));
/// ```
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A display image, taken as is.
    Display(DisplayImage),
    /// RGB pixels with 8 bits per channel.
    Rgb8(Image<u8, 3>),
    /// RGB pixels with 16 bits per channel, saturated to 255.
    Rgb16(Image<u16, 3>),
    /// RGB pixels with float values in [0, 1].
    Rgb32F(Image<f32, 3>),
    /// An array with shape (H, W, C) of 8-bit values.
    ArrayU8(Array3<u8>),
    /// An array with shape (H, W, C) of 16-bit values.
    ArrayU16(Array3<u16>),
    /// An array with shape (H, W, C) of float values in [0, 1].
    ArrayF32(Array3<f32>),
    /// A decoded image of any pixel type.
    Dynamic(image::DynamicImage),
    /// The path of an image file.
    Path(PathBuf),
}

impl ImageSource {
    /// A short name of the kind of input, for logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ImageSource::Display(_) => "display image",
            ImageSource::Rgb8(_) => "rgb8 image",
            ImageSource::Rgb16(_) => "rgb16 image",
            ImageSource::Rgb32F(_) => "rgb32f image",
            ImageSource::ArrayU8(_) => "u8 array",
            ImageSource::ArrayU16(_) => "u16 array",
            ImageSource::ArrayF32(_) => "f32 array",
            ImageSource::Dynamic(_) => "dynamic image",
            ImageSource::Path(_) => "path",
        }
    }
}

impl From<DisplayImage> for ImageSource {
    fn from(image: DisplayImage) -> Self {
        ImageSource::Display(image)
    }
}

impl From<Image<u8, 3>> for ImageSource {
    fn from(image: Image<u8, 3>) -> Self {
        ImageSource::Rgb8(image)
    }
}

impl From<Image<u16, 3>> for ImageSource {
    fn from(image: Image<u16, 3>) -> Self {
        ImageSource::Rgb16(image)
    }
}

impl From<Image<f32, 3>> for ImageSource {
    fn from(image: Image<f32, 3>) -> Self {
        ImageSource::Rgb32F(image)
    }
}

impl From<Array3<u8>> for ImageSource {
    fn from(array: Array3<u8>) -> Self {
        ImageSource::ArrayU8(array)
    }
}

impl From<Array3<u16>> for ImageSource {
    fn from(array: Array3<u16>) -> Self {
        ImageSource::ArrayU16(array)
    }
}

impl From<Array3<f32>> for ImageSource {
    fn from(array: Array3<f32>) -> Self {
        ImageSource::ArrayF32(array)
    }
}

impl From<image::DynamicImage> for ImageSource {
    fn from(image: image::DynamicImage) -> Self {
        ImageSource::Dynamic(image)
    }
}

impl From<image::RgbImage> for ImageSource {
    fn from(image: image::RgbImage) -> Self {
        ImageSource::Display(DisplayImage::new(image))
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

impl From<&str> for ImageSource {
    fn from(path: &str) -> Self {
        ImageSource::Path(PathBuf::from(path))
    }
}

impl From<String> for ImageSource {
    fn from(path: String) -> Self {
        ImageSource::Path(PathBuf::from(path))
    }
}
