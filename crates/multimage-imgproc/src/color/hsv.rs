use crate::parallel;
use multimage_image::{Image, ImageDtype, ImageError};

/// Convert an RGB image to an HSV image.
///
/// The input image is assumed to have 3 channels in the order R, G, B with
/// values in the range [0, 255].
///
/// # Arguments
///
/// * `src` - The input RGB image assumed to have 3 channels.
/// * `dst` - The output HSV image.
///
/// # Returns
///
/// The HSV image with the following channels:
///
/// * H: The hue channel in the range [0, 255] (0-360 degrees).
/// * S: The saturation channel in the range [0, 255].
/// * V: The value channel in the range [0, 255].
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use multimage_image::{Image, ImageSize};
/// use multimage_imgproc::color::hsv_from_rgb;
///
/// let image = Image::<f32, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut hsv = Image::<f32, 3>::from_size_val(image.size(), 0.0).unwrap();
///
/// hsv_from_rgb(&image, &mut hsv).unwrap();
///
/// assert_eq!(hsv.num_channels(), 3);
/// assert_eq!(hsv.size().width, 4);
/// assert_eq!(hsv.size().height, 5);
/// ```
pub fn hsv_from_rgb(src: &Image<f32, 3>, dst: &mut Image<f32, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.copy_from_slice(&hsv_pixel(src_pixel[0], src_pixel[1], src_pixel[2]));
    });

    Ok(())
}

/// Convert an HSV image back to RGB.
///
/// Inverse of [`hsv_from_rgb`]: all channels of the input and the output are
/// in the range [0, 255].
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_hsv(src: &Image<f32, 3>, dst: &mut Image<f32, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.copy_from_slice(&rgb_pixel(src_pixel[0], src_pixel[1], src_pixel[2]));
    });

    Ok(())
}

/// Rotate the hue of an RGB8 image.
///
/// Every pixel is converted to HSV, its hue is shifted by `delta` turns of the
/// colour wheel and wrapped around, then converted back to RGB with rounding.
/// Saturation and value are left untouched.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output RGB image.
/// * `delta` - The hue shift as a fraction of a full turn, in [-1, 1].
///
/// # Errors
///
/// Returns [`ImageError::InvalidHueDelta`] when `delta` is outside of [-1, 1]
/// or not finite.
///
/// # Example
///
/// ```
/// use multimage_image::Image;
/// use multimage_imgproc::color::adjust_hue;
///
/// let red = Image::<u8, 3>::new([1, 1].into(), vec![255, 0, 0]).unwrap();
/// let mut green = Image::<u8, 3>::from_size_val(red.size(), 0).unwrap();
///
/// adjust_hue(&red, &mut green, 1.0 / 3.0).unwrap();
///
/// assert_eq!(green.as_slice(), &[0, 255, 0]);
/// ```
pub fn adjust_hue(src: &Image<u8, 3>, dst: &mut Image<u8, 3>, delta: f32) -> Result<(), ImageError> {
    if !delta.is_finite() || !(-1.0..=1.0).contains(&delta) {
        return Err(ImageError::InvalidHueDelta(delta));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let shift = delta * 255.0;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let [h, s, v] = hsv_pixel(
            src_pixel[0] as f32,
            src_pixel[1] as f32,
            src_pixel[2] as f32,
        );
        let rgb = rgb_pixel((h + shift).rem_euclid(255.0), s, v);
        dst_pixel
            .iter_mut()
            .zip(rgb.iter())
            .for_each(|(d, &x)| *d = u8::from_f32(x));
    });

    Ok(())
}

#[inline]
fn hsv_pixel(r: f32, g: f32, b: f32) -> [f32; 3] {
    // normalize the input to the range [0, 1]
    let r = r / 255.;
    let g = g / 255.;
    let b = b / 255.;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    // ensure h is in the range [0, 360)
    let h = if h < 0.0 { h + 360.0 } else { h };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    [(h / 360.0) * 255.0, s * 255.0, max * 255.0]
}

#[inline]
fn rgb_pixel(h: f32, s: f32, v: f32) -> [f32; 3] {
    // hue sector in [0, 6)
    let h = (h / 255.0) * 6.0;
    let s = s / 255.0;
    let v = v / 255.0;

    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [(r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0]
}

#[cfg(test)]
mod tests {
    use multimage_image::{Image, ImageError, ImageSize};

    #[test]
    fn hsv_from_rgb() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![
                0.0, 128.0, 255.0, 255.0, 128.0, 0.0, 128.0, 255.0, 0.0, 255.0, 0.0, 128.0, 0.0,
                128.0, 255.0, 255.0, 128.0, 0.0,
            ],
        )?;

        let expected = [
            148.66667, 255.0, 255.0, 21.333334, 255.0, 255.0, 63.666668, 255.0, 255.0, 233.66667,
            255.0, 255.0, 148.66667, 255.0, 255.0, 21.333334, 255.0, 255.0,
        ];

        let mut hsv = Image::<f32, 3>::from_size_val(image.size(), 0.0)?;

        super::hsv_from_rgb(&image, &mut hsv)?;

        for (a, b) in hsv.as_slice().iter().zip(expected.iter()) {
            approx::assert_relative_eq!(a, b, epsilon = 1e-3);
        }

        Ok(())
    }

    #[test]
    fn rgb_from_hsv_inverts() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::new(
            [2, 2].into(),
            vec![
                0.0, 128.0, 255.0, 255.0, 128.0, 0.0, 17.0, 17.0, 17.0, 200.0, 30.0, 90.0,
            ],
        )?;
        let mut hsv = Image::<f32, 3>::from_size_val(image.size(), 0.0)?;
        let mut rgb = Image::<f32, 3>::from_size_val(image.size(), 0.0)?;

        super::hsv_from_rgb(&image, &mut hsv)?;
        super::rgb_from_hsv(&hsv, &mut rgb)?;

        for (a, b) in rgb.as_slice().iter().zip(image.as_slice().iter()) {
            approx::assert_abs_diff_eq!(a, b, epsilon = 1e-3);
        }
        Ok(())
    }

    #[test]
    fn adjust_hue_primaries() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([3, 1].into(), vec![255, 0, 0, 0, 255, 0, 0, 0, 255])?;
        let mut shifted = Image::<u8, 3>::from_size_val(image.size(), 0)?;

        super::adjust_hue(&image, &mut shifted, 1.0 / 3.0)?;
        assert_eq!(shifted.as_slice(), &[0, 255, 0, 0, 0, 255, 255, 0, 0]);

        super::adjust_hue(&image, &mut shifted, -1.0 / 3.0)?;
        assert_eq!(shifted.as_slice(), &[0, 0, 255, 255, 0, 0, 0, 255, 0]);

        Ok(())
    }

    #[test]
    fn adjust_hue_identity() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            [4, 1].into(),
            vec![12, 200, 31, 90, 90, 90, 255, 255, 0, 7, 3, 250],
        )?;
        let mut shifted = Image::<u8, 3>::from_size_val(image.size(), 0)?;

        super::adjust_hue(&image, &mut shifted, 0.0)?;
        assert_eq!(shifted, image);

        super::adjust_hue(&image, &mut shifted, 1.0)?;
        assert_eq!(shifted, image);

        Ok(())
    }

    #[test]
    fn adjust_hue_keeps_grays() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([2, 1].into(), vec![0, 0, 0, 128, 128, 128])?;
        let mut shifted = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        super::adjust_hue(&image, &mut shifted, 0.42)?;
        assert_eq!(shifted, image);
        Ok(())
    }

    #[test]
    fn adjust_hue_invalid_delta() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([1, 1].into(), 0)?;
        let mut shifted = image.clone();
        for delta in [1.5, -1.01, f32::NAN, f32::INFINITY] {
            let res = super::adjust_hue(&image, &mut shifted, delta);
            assert!(matches!(res, Err(ImageError::InvalidHueDelta(_))));
        }
        Ok(())
    }
}
