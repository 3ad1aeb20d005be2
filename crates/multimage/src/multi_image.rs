use std::path::Path;

use base64::Engine;
use multimage_image::{ops, Image, ImageError, ImageSize};
use multimage_imgproc::{
    color,
    crop::{self, CropArea},
    normalize,
    resize::{FastResizer, ResizeOptions, Resizer},
};
use multimage_io::{
    viz::{ImageViewer, ViewOptions},
    DisplayImage, IoError, MetadataKey, MetadataValue,
};
use ndarray::ArrayView3;

use crate::{error::MultiImageError, source::ImageSource};

/// JPEG quality used by [`MultiImage::compress`] when the caller has no preference.
pub const DEFAULT_COMPRESSION_QUALITY: u8 = 65;

/// One image held in four synchronized representations.
///
/// * the display image, used for encoding, metadata and saving.
/// * the RGB8 image, the source of truth after every mutation.
/// * the BGR8 image, the channel swap of the RGB8 image.
/// * the float image, the RGB8 image divided by 255.
///
/// Every mutation rebuilds the four representations from the new content and
/// swaps them in only once all of them are ready, so a failed operation leaves
/// the image untouched.
///
/// Mutators take `&mut self`: sharing an image between threads requires the
/// caller to hold a lock around them.
///
/// # Example
///
/// ```
/// use multimage::{imgproc::resize::ResizeOptions, MultiImage};
/// use multimage::image::Image;
///
/// let rgb = Image::<u8, 3>::from_size_val([64, 32].into(), 200).unwrap();
/// let mut image = MultiImage::new(rgb).unwrap();
///
/// image.resize(&ResizeOptions::new().with_max_dimension(16)).unwrap();
///
/// assert_eq!(image.size().width, 16);
/// assert_eq!(image.size().height, 8);
/// assert_eq!(image.bgr().size(), image.rgb().size());
/// ```
#[derive(Debug, PartialEq)]
pub struct MultiImage {
    display: DisplayImage,
    rgb: Image<u8, 3>,
    bgr: Image<u8, 3>,
    float: Image<f32, 3>,
    encoded: Vec<u8>,
}

impl MultiImage {
    /// Create a new image from any supported source.
    ///
    /// # Errors
    ///
    /// * [`MultiImageError::InvalidInputType`] if the source is not a three channel image
    ///   or has no pixels.
    /// * [`MultiImageError::ResourceNotFound`] if a path source cannot be read.
    pub fn new(source: impl Into<ImageSource>) -> Result<Self, MultiImageError> {
        Self::synchronize(source.into(), None)
    }

    /// Replace the content of the image and re-derive all the representations.
    ///
    /// Array sources keep the encoding format and the metadata of the current
    /// display image. On error the image is left unchanged.
    pub fn update(&mut self, source: impl Into<ImageSource>) -> Result<(), MultiImageError> {
        let next = Self::synchronize(source.into(), Some(&self.display))?;
        *self = next;
        Ok(())
    }

    /// The display image.
    pub fn display_image(&self) -> &DisplayImage {
        &self.display
    }

    /// The RGB8 image.
    pub fn rgb(&self) -> &Image<u8, 3> {
        &self.rgb
    }

    /// The BGR8 image.
    pub fn bgr(&self) -> &Image<u8, 3> {
        &self.bgr
    }

    /// The RGB image with float values in [0, 1].
    pub fn float(&self) -> &Image<f32, 3> {
        &self.float
    }

    /// The RGB8 image as an array with shape (H, W, 3).
    pub fn rgb_array(&self) -> Result<ArrayView3<'_, u8>, MultiImageError> {
        Ok(self.rgb.to_array_view()?)
    }

    /// The BGR8 image as an array with shape (H, W, 3).
    pub fn bgr_array(&self) -> Result<ArrayView3<'_, u8>, MultiImageError> {
        Ok(self.bgr.to_array_view()?)
    }

    /// The float image as an array with shape (H, W, 3).
    pub fn float_array(&self) -> Result<ArrayView3<'_, f32>, MultiImageError> {
        Ok(self.float.to_array_view()?)
    }

    /// The size of the image.
    pub fn size(&self) -> ImageSize {
        self.rgb.size()
    }

    /// The encoded bytes of the display image.
    pub fn encoded_bytes(&self) -> &[u8] {
        &self.encoded
    }

    /// Size in bytes of the encoded display image.
    pub fn byte_size(&self) -> usize {
        self.encoded.len()
    }

    /// The encoded display image as base64 text.
    pub fn encode(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.encoded)
    }

    /// Resize the image with the default [`FastResizer`] backend.
    ///
    /// # Errors
    ///
    /// Fails with [`MultiImageError::InvalidGeometry`] if the options resolve to
    /// an empty image.
    pub fn resize(&mut self, options: &ResizeOptions) -> Result<(), MultiImageError> {
        self.resize_with(options, &FastResizer)
    }

    /// Resize the image with the given backend.
    pub fn resize_with<R>(&mut self, options: &ResizeOptions, resizer: &R) -> Result<(), MultiImageError>
    where
        R: Resizer + ?Sized,
    {
        let new_size = options.target_size(self.size())?;
        let resized = resizer.resize(&self.rgb, new_size, options.interpolation)?;

        if resized.size() != new_size {
            return Err(ImageError::InvalidImageSize(
                resized.width(),
                resized.height(),
                new_size.width,
                new_size.height,
            )
            .into());
        }

        log::debug!("resized {} -> {}", self.size(), new_size);

        self.update(resized)
    }

    /// Keep only the given region of the image.
    ///
    /// # Errors
    ///
    /// Fails with [`MultiImageError::InvalidGeometry`] if the region is empty or
    /// does not fit inside the image. Regions are never clamped.
    pub fn crop(&mut self, area: impl Into<CropArea>) -> Result<(), MultiImageError> {
        let cropped = crop::crop(&self.rgb, area.into())?;
        self.update(cropped)
    }

    /// Re-encode the display image as JPEG at the given quality in [0, 100].
    ///
    /// Pixels take the compression artifacts and the display image keeps
    /// encoding as JPEG at that quality. See [`DEFAULT_COMPRESSION_QUALITY`].
    pub fn compress(&mut self, quality: u8) -> Result<(), MultiImageError> {
        let compressed = self.display.compress(quality)?;
        self.update(compressed)
    }

    /// An independent image built from a copy of the RGB8 pixels.
    ///
    /// The copy starts over with default encoding and no metadata.
    pub fn copy(&self) -> Result<MultiImage, MultiImageError> {
        MultiImage::new(self.rgb.clone())
    }

    /// Set a metadata entry of the display image. Pixels are unchanged.
    pub fn set_metadata(
        &mut self,
        key: MetadataKey,
        value: impl Into<MetadataValue>,
    ) -> Result<(), MultiImageError> {
        let display = self.display.clone().with_metadata(key, value)?;
        self.update(display)
    }

    /// Rotate the hue of the image by `delta` turns of the colour wheel, in [-1, 1].
    pub fn adjust_hue(&mut self, delta: f32) -> Result<(), MultiImageError> {
        let mut adjusted = Image::from_size_val(self.size(), 0u8)?;
        color::adjust_hue(&self.rgb, &mut adjusted, delta)?;
        self.update(adjusted)
    }

    /// Write the display image in the format implied by the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MultiImageError> {
        self.display.save(path.as_ref())?;
        log::debug!("saved {} to {}", self.size(), path.as_ref().display());
        Ok(())
    }

    /// Show the RGB8 image through a display backend.
    pub fn view<V>(&self, viewer: &V, options: &ViewOptions) -> Result<(), MultiImageError>
    where
        V: ImageViewer + ?Sized,
    {
        match options.value_range {
            Some((min, max)) => {
                let mut stretched = Image::from_size_val(self.size(), 0u8)?;
                normalize::normalize_range(&self.rgb, &mut stretched, min, max)?;
                viewer.show(&options.name, &stretched)?;
            }
            None => viewer.show(&options.name, &self.rgb)?,
        }
        Ok(())
    }

    fn synchronize(
        source: ImageSource,
        current: Option<&DisplayImage>,
    ) -> Result<Self, MultiImageError> {
        let kind = source.kind();

        let (display, rgb) = match source {
            ImageSource::Display(display) => {
                let rgb = display.to_rgb()?;
                (display, rgb)
            }
            ImageSource::Path(path) => {
                let display = DisplayImage::open(&path).map_err(|err| match err {
                    IoError::FileError(_) => MultiImageError::ResourceNotFound(path.clone()),
                    err => err.into(),
                })?;
                let rgb = display.to_rgb()?;
                (display, rgb)
            }
            ImageSource::Dynamic(image::DynamicImage::ImageRgb8(pixels)) => {
                let display = DisplayImage::new(pixels);
                let rgb = display.to_rgb()?;
                (display, rgb)
            }
            source => {
                let rgb = rgb8_from_array(source)?;
                let mut display = DisplayImage::from_rgb(rgb.clone())?;
                if let Some(current) = current {
                    display = display
                        .with_format(current.format())
                        .with_metadata_map(current.metadata().clone());
                }
                (display, rgb)
            }
        };

        if rgb.width() == 0 || rgb.height() == 0 {
            return Err(MultiImageError::InvalidInputType(format!(
                "empty {} of size {}",
                kind,
                rgb.size()
            )));
        }

        let mut bgr = Image::from_size_val(rgb.size(), 0u8)?;
        color::bgr_from_rgb(&rgb, &mut bgr)?;

        let mut float = Image::from_size_val(rgb.size(), 0.0f32)?;
        ops::cast_and_scale(&rgb, &mut float, 1.0 / 255.0)?;

        let encoded = display.encode_bytes()?;

        log::debug!(
            "synchronized {} image from {} ({:?}, {} bytes)",
            rgb.size(),
            kind,
            display.format(),
            encoded.len()
        );

        Ok(Self {
            display,
            rgb,
            bgr,
            float,
            encoded,
        })
    }
}

// array sources, converted to the canonical RGB8 image
fn rgb8_from_array(source: ImageSource) -> Result<Image<u8, 3>, MultiImageError> {
    match source {
        ImageSource::Rgb8(image) => Ok(image),
        ImageSource::Rgb16(image) => {
            let mut rgb = Image::from_size_val(image.size(), 0u8)?;
            ops::scale_and_convert(&image, &mut rgb, 1.0)?;
            Ok(rgb)
        }
        ImageSource::Rgb32F(image) => {
            let mut rgb = Image::from_size_val(image.size(), 0u8)?;
            ops::scale_and_convert(&image, &mut rgb, 255.0)?;
            Ok(rgb)
        }
        ImageSource::ArrayU8(array) => rgb8_from_array(ImageSource::Rgb8(three_channels(array)?)),
        ImageSource::ArrayU16(array) => {
            rgb8_from_array(ImageSource::Rgb16(three_channels(array)?))
        }
        ImageSource::ArrayF32(array) => {
            rgb8_from_array(ImageSource::Rgb32F(three_channels(array)?))
        }
        ImageSource::Dynamic(image::DynamicImage::ImageRgb16(pixels)) => {
            let size = ImageSize {
                width: pixels.width() as usize,
                height: pixels.height() as usize,
            };
            rgb8_from_array(ImageSource::Rgb16(Image::new(size, pixels.into_raw())?))
        }
        ImageSource::Dynamic(image::DynamicImage::ImageRgb32F(pixels)) => {
            let size = ImageSize {
                width: pixels.width() as usize,
                height: pixels.height() as usize,
            };
            rgb8_from_array(ImageSource::Rgb32F(Image::new(size, pixels.into_raw())?))
        }
        ImageSource::Dynamic(image) => Err(MultiImageError::InvalidInputType(format!(
            "image with color type {:?}",
            image.color()
        ))),
        source @ (ImageSource::Display(_) | ImageSource::Path(_)) => Err(
            MultiImageError::InvalidInputType(format!("{} as array", source.kind())),
        ),
    }
}

fn three_channels<T: Clone>(array: ndarray::Array3<T>) -> Result<Image<T, 3>, MultiImageError> {
    let shape = array.shape().to_vec();
    Image::try_from(array).map_err(|err| match err {
        ImageError::InvalidChannelCount(..) => MultiImageError::InvalidInputType(format!(
            "array with shape {:?} and {} channels",
            shape,
            std::any::type_name::<T>()
        )),
        err => err.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::MultiImage;
    use crate::error::MultiImageError;
    use multimage_image::Image;

    #[test]
    fn float_source_rounds() -> Result<(), MultiImageError> {
        let image = Image::<f32, 3>::new([2, 1].into(), vec![0.0, 0.5, 1.0, -0.2, 1.4, 0.2])?;
        let multi = MultiImage::new(image)?;
        assert_eq!(multi.rgb().as_slice(), &[0, 128, 255, 0, 255, 51]);
        Ok(())
    }

    #[test]
    fn rgb16_source_saturates() -> Result<(), MultiImageError> {
        let image = Image::<u16, 3>::new([1, 1].into(), vec![7, 255, 1000])?;
        let multi = MultiImage::new(image)?;
        assert_eq!(multi.rgb().as_slice(), &[7, 255, 255]);
        Ok(())
    }

    #[test]
    fn wrong_channel_count() {
        let array = ndarray::Array3::<u8>::zeros((4, 4, 4));
        let res = MultiImage::new(array);
        assert!(matches!(res, Err(MultiImageError::InvalidInputType(_))));
    }
}
