use crate::interpolation::{
    area_weights, bilinear_interpolation, nearest_neighbor_interpolation, AxisWeights,
    InterpolationMode,
};
use crate::parallel;
use fast_image_resize as fr;
use multimage_image::{ops, Image, ImageError, ImageSize};

/// Sizing policy and interpolation of a resize operation.
///
/// Only one sizing mode applies, checked in this order:
///
/// 1. `max_dimension`: the larger side is bounded by the given length and the
///    aspect ratio is preserved. Images already within the bound keep their size.
/// 2. `keep_aspect_ratio`: the missing side is derived from the given one. With
///    both sides given, the image is fit inside the `width` x `height` box.
/// 3. explicit `width` and `height`: a missing side keeps its current length.
///
/// # Example
///
/// ```
/// use multimage_image::ImageSize;
/// use multimage_imgproc::resize::ResizeOptions;
///
/// let options = ResizeOptions::new().with_width(50).with_keep_aspect_ratio(true);
/// let size = options.target_size(ImageSize { width: 200, height: 100 }).unwrap();
///
/// assert_eq!(size, ImageSize { width: 50, height: 25 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeOptions {
    /// Target width in pixels.
    pub width: Option<usize>,
    /// Target height in pixels.
    pub height: Option<usize>,
    /// Derive the missing side from the aspect ratio of the source.
    pub keep_aspect_ratio: bool,
    /// Upper bound for the larger side of the image.
    pub max_dimension: Option<usize>,
    /// Interpolation used to compute the new pixels.
    pub interpolation: InterpolationMode,
}

impl ResizeOptions {
    /// Options that keep the image size, with area interpolation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both target sides.
    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.width = Some(size.width);
        self.height = Some(size.height);
        self
    }

    /// Set the target width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the target height.
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    /// Preserve the aspect ratio of the source.
    pub fn with_keep_aspect_ratio(mut self, keep_aspect_ratio: bool) -> Self {
        self.keep_aspect_ratio = keep_aspect_ratio;
        self
    }

    /// Bound the larger side of the image.
    pub fn with_max_dimension(mut self, max_dimension: usize) -> Self {
        self.max_dimension = Some(max_dimension);
        self
    }

    /// Set the interpolation mode.
    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Resolve the size of the resized image for a source of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidTargetSize`] if the source or the resolved
    /// size has a zero side.
    pub fn target_size(&self, src: ImageSize) -> Result<ImageSize, ImageError> {
        if src.width == 0 || src.height == 0 {
            return Err(ImageError::InvalidTargetSize(src.width, src.height));
        }

        let size = if let Some(max_dimension) = self.max_dimension {
            let larger = src.width.max(src.height);
            if max_dimension == 0 {
                return Err(ImageError::InvalidTargetSize(0, 0));
            } else if larger <= max_dimension {
                src
            } else {
                scale_size(src, max_dimension as f64 / larger as f64)
            }
        } else if self.keep_aspect_ratio {
            let (w, h) = (src.width as f64, src.height as f64);
            match (self.width, self.height) {
                (Some(width), Some(height)) => {
                    scale_size(src, (width as f64 / w).min(height as f64 / h))
                }
                (Some(width), None) => ImageSize {
                    width,
                    height: scale_side(src.height, width as f64 / w),
                },
                (None, Some(height)) => ImageSize {
                    width: scale_side(src.width, height as f64 / h),
                    height,
                },
                (None, None) => src,
            }
        } else {
            ImageSize {
                width: self.width.unwrap_or(src.width),
                height: self.height.unwrap_or(src.height),
            }
        };

        if size.width == 0 || size.height == 0 {
            return Err(ImageError::InvalidTargetSize(size.width, size.height));
        }

        Ok(size)
    }
}

// a zero scale keeps zero so that the final check rejects it
fn scale_side(len: usize, scale: f64) -> usize {
    if scale <= 0.0 {
        return 0;
    }
    ((len as f64 * scale).round() as usize).max(1)
}

fn scale_size(size: ImageSize, scale: f64) -> ImageSize {
    ImageSize {
        width: scale_side(size.width, scale),
        height: scale_side(size.height, scale),
    }
}

/// A resize backend for RGB8 images.
///
/// Implementations compute a new image of exactly `new_size` pixels from `src`.
/// Closures with the same signature as [`Resizer::resize`] are resizers too,
/// which allows plugging any other backend.
///
/// # Example
///
/// ```
/// use multimage_image::{Image, ImageError, ImageSize};
/// use multimage_imgproc::interpolation::InterpolationMode;
/// use multimage_imgproc::resize::Resizer;
///
/// // a backend that paints every pixel black
/// let black = |_: &Image<u8, 3>, size: ImageSize, _: InterpolationMode| {
///     Image::<u8, 3>::from_size_val(size, 0)
/// };
///
/// let image = Image::<u8, 3>::from_size_val([4, 4].into(), 255).unwrap();
/// let resized = black.resize(&image, [2, 2].into(), InterpolationMode::Area).unwrap();
///
/// assert_eq!(resized.as_slice(), &[0u8; 12]);
/// ```
pub trait Resizer {
    /// Resize `src` to `new_size` using the given interpolation.
    fn resize(
        &self,
        src: &Image<u8, 3>,
        new_size: ImageSize,
        interpolation: InterpolationMode,
    ) -> Result<Image<u8, 3>, ImageError>;
}

impl<F> Resizer for F
where
    F: Fn(&Image<u8, 3>, ImageSize, InterpolationMode) -> Result<Image<u8, 3>, ImageError>,
{
    fn resize(
        &self,
        src: &Image<u8, 3>,
        new_size: ImageSize,
        interpolation: InterpolationMode,
    ) -> Result<Image<u8, 3>, ImageError> {
        self(src, new_size, interpolation)
    }
}

/// Resizer backed by the SIMD accelerated [fast_image_resize](https://crates.io/crates/fast_image_resize) crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastResizer;

impl Resizer for FastResizer {
    fn resize(
        &self,
        src: &Image<u8, 3>,
        new_size: ImageSize,
        interpolation: InterpolationMode,
    ) -> Result<Image<u8, 3>, ImageError> {
        let mut dst = Image::from_size_val(new_size, 0u8)?;
        resize_fast(src, &mut dst, interpolation)?;
        Ok(dst)
    }
}

/// Pure Rust resizer running the interpolation kernels of this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeResizer;

impl Resizer for NativeResizer {
    fn resize(
        &self,
        src: &Image<u8, 3>,
        new_size: ImageSize,
        interpolation: InterpolationMode,
    ) -> Result<Image<u8, 3>, ImageError> {
        let mut src_f32 = Image::<f32, 3>::from_size_val(src.size(), 0.0)?;
        ops::cast_and_scale(src, &mut src_f32, 1.0)?;

        let mut dst_f32 = Image::<f32, 3>::from_size_val(new_size, 0.0)?;
        resize_native(&src_f32, &mut dst_f32, interpolation)?;

        let mut dst = Image::<u8, 3>::from_size_val(new_size, 0)?;
        ops::scale_and_convert(&dst_f32, &mut dst, 1.0)?;
        Ok(dst)
    }
}

/// Resize an image to a new size.
///
/// The function resizes an image to the size of `dst` using the specified
/// interpolation mode. It supports any number of channels.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use multimage_image::{Image, ImageSize};
/// use multimage_imgproc::resize::resize_native;
/// use multimage_imgproc::interpolation::InterpolationMode;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0).unwrap();
///
/// resize_native(&image, &mut image_resized, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize_native<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    check_sizes(src.size(), dst.size())?;

    log::trace!(
        "resize_native {} -> {} ({:?})",
        src.size(),
        dst.size(),
        interpolation
    );

    let kernel: fn(&Image<f32, C>, f32, f32) -> [f32; C] = match interpolation {
        InterpolationMode::Nearest => nearest_neighbor_interpolation,
        InterpolationMode::Bilinear => bilinear_interpolation,
        InterpolationMode::Area => {
            resize_area(src, dst);
            return Ok(());
        }
    };

    // map the destination pixel centers onto the source grid
    let scale_x = src.width() as f32 / dst.width() as f32;
    let scale_y = src.height() as f32 / dst.height() as f32;

    parallel::par_iter_rows_indexed(dst, |x, y, dst_pixel| {
        let u = (x as f32 + 0.5) * scale_x - 0.5;
        let v = (y as f32 + 0.5) * scale_y - 0.5;
        dst_pixel.copy_from_slice(&kernel(src, u, v));
    });

    Ok(())
}

fn resize_area<const C: usize>(src: &Image<f32, C>, dst: &mut Image<f32, C>) {
    let weights_x: AxisWeights = area_weights(src.width(), dst.width());
    let weights_y: AxisWeights = area_weights(src.height(), dst.height());

    let cols = src.cols();
    let data = src.as_slice();

    parallel::par_iter_rows_indexed(dst, |x, y, dst_pixel| {
        let mut acc = [0.0f32; C];
        for &(sy, wy) in &weights_y[y] {
            for &(sx, wx) in &weights_x[x] {
                let base = (sy * cols + sx) * C;
                let w = wy * wx;
                acc.iter_mut()
                    .zip(&data[base..base + C])
                    .for_each(|(a, &p)| *a += w * p);
            }
        }
        dst_pixel.copy_from_slice(&acc);
    });
}

/// Resize an image to a new size using the [fast_image_resize](https://crates.io/crates/fast_image_resize) crate.
///
/// The function resizes an image to the size of `dst` using the specified
/// interpolation mode. It supports only 3-channel images and u8 data type.
///
/// # Example
///
/// ```
/// use multimage_image::{Image, ImageSize};
/// use multimage_imgproc::resize::resize_fast;
/// use multimage_imgproc::interpolation::InterpolationMode;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0u8; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut image_resized = Image::<_, 3>::from_size_val([2, 3].into(), 0).unwrap();
///
/// resize_fast(&image, &mut image_resized, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
///
/// # Errors
///
/// The function returns an error if the image cannot be resized.
pub fn resize_fast(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    check_sizes(src.size(), dst.size())?;

    log::trace!(
        "resize_fast {} -> {} ({:?})",
        src.size(),
        dst.size(),
        interpolation
    );

    // prepare the input image for the fast_image_resize crate
    let src_image = fr::images::ImageRef::new(
        src.width() as u32,
        src.height() as u32,
        src.as_slice(),
        fr::PixelType::U8x3,
    )
    .map_err(|e| ImageError::ResizeFailed(e.to_string()))?;

    // prepare the output image for the fast_image_resize crate
    let (dst_width, dst_height) = (dst.width() as u32, dst.height() as u32);
    let mut dst_image = fr::images::Image::from_slice_u8(
        dst_width,
        dst_height,
        dst.as_slice_mut(),
        fr::PixelType::U8x3,
    )
    .map_err(|e| ImageError::ResizeFailed(e.to_string()))?;

    let algorithm = match interpolation {
        InterpolationMode::Nearest => fr::ResizeAlg::Nearest,
        InterpolationMode::Bilinear => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
        // a box filter on the convolution path averages the covered pixels
        InterpolationMode::Area => fr::ResizeAlg::Convolution(fr::FilterType::Box),
    };

    let mut resizer = fr::Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &fr::ResizeOptions::new().resize_alg(algorithm),
        )
        .map_err(|e| ImageError::ResizeFailed(e.to_string()))?;

    Ok(())
}

fn check_sizes(src: ImageSize, dst: ImageSize) -> Result<(), ImageError> {
    if src.area() == 0 {
        return Err(ImageError::InvalidTargetSize(src.width, src.height));
    }
    if dst.area() == 0 {
        return Err(ImageError::InvalidTargetSize(dst.width, dst.height));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{FastResizer, NativeResizer, ResizeOptions, Resizer};
    use crate::interpolation::InterpolationMode;
    use multimage_image::{Image, ImageError, ImageSize};

    fn gradient(size: ImageSize) -> Result<Image<u8, 3>, ImageError> {
        let mut data = Vec::with_capacity(size.area() * 3);
        for y in 0..size.height {
            for x in 0..size.width {
                data.extend_from_slice(&[(x * 7 % 256) as u8, (y * 5 % 256) as u8, 128]);
            }
        }
        Image::new(size, data)
    }

    #[test]
    fn resize_smoke_ch3() -> Result<(), ImageError> {
        let image = Image::<_, 3>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            vec![0f32; 4 * 5 * 3],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 3,
        };

        for mode in [
            InterpolationMode::Nearest,
            InterpolationMode::Bilinear,
            InterpolationMode::Area,
        ] {
            let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0)?;
            super::resize_native(&image, &mut image_resized, mode)?;
            assert_eq!(image_resized.size(), new_size);
        }
        Ok(())
    }

    #[test]
    fn resize_smoke_ch1() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            vec![0f32; 4 * 5],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 3,
        };

        let mut image_resized = Image::<_, 1>::from_size_val(new_size, 0.0)?;

        super::resize_native(&image, &mut image_resized, InterpolationMode::Nearest)?;

        assert_eq!(image_resized.num_channels(), 1);
        assert_eq!(image_resized.size(), new_size);
        Ok(())
    }

    #[test]
    fn resize_area_averages() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<f32, 1>::new(
            [4, 2].into(),
            vec![
                0.0, 2.0, 4.0, 6.0,
                2.0, 4.0, 6.0, 8.0,
            ],
        )?;
        let mut resized = Image::<f32, 1>::from_size_val([2, 1].into(), 0.0)?;
        super::resize_native(&image, &mut resized, InterpolationMode::Area)?;
        assert_eq!(resized.as_slice(), &[2.0, 6.0]);
        Ok(())
    }

    #[test]
    fn resize_native_same_size_is_identity() -> Result<(), ImageError> {
        let image = gradient([9, 7].into())?;
        for mode in [
            InterpolationMode::Nearest,
            InterpolationMode::Bilinear,
            InterpolationMode::Area,
        ] {
            let resized = NativeResizer.resize(&image, image.size(), mode)?;
            assert_eq!(resized, image, "{mode:?}");
        }
        Ok(())
    }

    #[test]
    fn resize_fast() -> Result<(), ImageError> {
        let image = gradient([16, 12].into())?;
        let new_size = ImageSize {
            width: 8,
            height: 6,
        };

        for mode in [
            InterpolationMode::Nearest,
            InterpolationMode::Bilinear,
            InterpolationMode::Area,
        ] {
            let resized = FastResizer.resize(&image, new_size, mode)?;
            assert_eq!(resized.size(), new_size);
            // the blue channel is constant and must survive any filter
            assert!(resized.as_slice().chunks_exact(3).all(|p| p[2] == 128));
        }
        Ok(())
    }

    #[test]
    fn resize_backends_agree_on_constant_images() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([10, 10].into(), 77)?;
        let new_size = ImageSize {
            width: 3,
            height: 4,
        };
        let fast = FastResizer.resize(&image, new_size, InterpolationMode::Area)?;
        let native = NativeResizer.resize(&image, new_size, InterpolationMode::Area)?;
        assert_eq!(fast, native);
        assert!(fast.as_slice().iter().all(|&v| v == 77));
        Ok(())
    }

    #[test]
    fn resize_rejects_empty_sizes() -> Result<(), ImageError> {
        let image = gradient([4, 4].into())?;
        let res = FastResizer.resize(&image, [0, 4].into(), InterpolationMode::Area);
        assert!(matches!(res, Err(ImageError::InvalidTargetSize(0, 4))));
        Ok(())
    }

    #[test]
    fn target_size_explicit() -> Result<(), ImageError> {
        let src = ImageSize {
            width: 200,
            height: 100,
        };
        let options = ResizeOptions::new().with_width(30).with_height(40);
        assert_eq!(options.target_size(src)?, [30, 40].into());

        let options = ResizeOptions::new().with_height(40);
        assert_eq!(options.target_size(src)?, [200, 40].into());

        assert_eq!(ResizeOptions::new().target_size(src)?, src);
        Ok(())
    }

    #[test]
    fn target_size_keep_aspect_ratio() -> Result<(), ImageError> {
        let src = ImageSize {
            width: 200,
            height: 100,
        };
        let options = ResizeOptions::new()
            .with_height(50)
            .with_keep_aspect_ratio(true);
        assert_eq!(options.target_size(src)?, [100, 50].into());

        // fit inside the box
        let options = ResizeOptions::new()
            .with_size([100, 100].into())
            .with_keep_aspect_ratio(true);
        assert_eq!(options.target_size(src)?, [100, 50].into());
        Ok(())
    }

    #[test]
    fn target_size_max_dimension() -> Result<(), ImageError> {
        let src = ImageSize {
            width: 300,
            height: 120,
        };
        let options = ResizeOptions::new().with_max_dimension(150).with_width(10);
        assert_eq!(options.target_size(src)?, [150, 60].into());

        let options = ResizeOptions::new().with_max_dimension(500);
        assert_eq!(options.target_size(src)?, src);

        // extremely thin images keep at least one pixel
        let thin = ImageSize {
            width: 1000,
            height: 1,
        };
        let options = ResizeOptions::new().with_max_dimension(10);
        assert_eq!(options.target_size(thin)?, [10, 1].into());
        Ok(())
    }

    #[test]
    fn target_size_invalid() {
        let src = ImageSize {
            width: 20,
            height: 10,
        };
        let invalid = [
            ResizeOptions::new().with_width(0),
            ResizeOptions::new().with_max_dimension(0),
            ResizeOptions::new()
                .with_width(0)
                .with_keep_aspect_ratio(true),
        ];
        for options in invalid {
            assert!(matches!(
                options.target_size(src),
                Err(ImageError::InvalidTargetSize(..))
            ));
        }
    }
}
