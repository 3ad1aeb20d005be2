use crate::parallel;
use multimage_image::{Image, ImageDtype, ImageError};

/// Linearly stretch the values of an image from `[min, max]` to `[0, 255]`.
///
/// Values outside of the range are saturated. The output is rounded to the
/// nearest integer.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
/// * `min` - The value mapped to 0.
/// * `max` - The value mapped to 255.
///
/// # Errors
///
/// Returns [`ImageError::InvalidValueRange`] when the bounds are not finite or
/// `min >= max`.
///
/// # Example
///
/// ```
/// use multimage_image::Image;
/// use multimage_imgproc::normalize::normalize_range;
///
/// let image = Image::<u8, 1>::new([3, 1].into(), vec![10, 20, 30]).unwrap();
/// let mut stretched = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// normalize_range(&image, &mut stretched, 10.0, 30.0).unwrap();
///
/// assert_eq!(stretched.as_slice(), &[0, 128, 255]);
/// ```
pub fn normalize_range<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    min: f32,
    max: f32,
) -> Result<(), ImageError> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(ImageError::InvalidValueRange(min, max));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let scale = 255.0 / (max - min);

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        src_pixel
            .iter()
            .zip(dst_pixel.iter_mut())
            .for_each(|(&s, d)| *d = u8::from_f32((s as f32 - min) * scale));
    });

    Ok(())
}
