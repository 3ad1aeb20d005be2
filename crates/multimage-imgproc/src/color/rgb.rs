use crate::parallel;
use multimage_image::{Image, ImageError};

/// Convert an RGB image to BGR by reversing the channel order of every pixel.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output BGR image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use multimage_image::{Image, ImageSize};
/// use multimage_imgproc::color::bgr_from_rgb;
///
/// let image = Image::<u8, 3>::new(ImageSize { width: 1, height: 1 }, vec![10, 20, 30]).unwrap();
/// let mut bgr = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// bgr_from_rgb(&image, &mut bgr).unwrap();
///
/// assert_eq!(bgr.as_slice(), &[30, 20, 10]);
/// ```
pub fn bgr_from_rgb<T>(src: &Image<T, 3>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel
            .iter_mut()
            .zip(src_pixel.iter().rev())
            .for_each(|(d, s)| {
                *d = *s;
            });
    });

    Ok(())
}

/// Convert a BGR image back to RGB.
///
/// The swap is its own inverse, so this is [`bgr_from_rgb`] with the roles of
/// the channels exchanged.
pub fn rgb_from_bgr<T>(src: &Image<T, 3>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    bgr_from_rgb(src, dst)
}

#[cfg(test)]
mod tests {
    use multimage_image::{Image, ImageError, ImageSize};

    #[test]
    fn bgr_from_rgb() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::new(
            ImageSize {
                width: 1,
                height: 3,
            },
            vec![
                0.0, 1.0, 2.0,
                3.0, 4.0, 5.0,
                6.0, 7.0, 8.0,
            ],
        )?;

        let mut bgr = Image::<f32, 3>::from_size_val(image.size(), 0.0)?;

        super::bgr_from_rgb(&image, &mut bgr)?;

        #[rustfmt::skip]
        let expected = [
            2.0, 1.0, 0.0,
            5.0, 4.0, 3.0,
            8.0, 7.0, 6.0,
        ];

        assert_eq!(bgr.as_slice(), &expected);

        Ok(())
    }

    #[test]
    fn rgb_from_bgr_roundtrip() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([2, 1].into(), vec![1, 2, 3, 4, 5, 6])?;
        let mut bgr = Image::from_size_val(image.size(), 0)?;
        let mut rgb = Image::from_size_val(image.size(), 0)?;

        super::bgr_from_rgb(&image, &mut bgr)?;
        super::rgb_from_bgr(&bgr, &mut rgb)?;

        assert_eq!(bgr.as_slice(), &[3, 2, 1, 6, 5, 4]);
        assert_eq!(rgb, image);
        Ok(())
    }

    #[test]
    fn bgr_from_rgb_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([2, 2].into(), 0)?;
        let mut bgr = Image::<u8, 3>::from_size_val([2, 3].into(), 0)?;
        let res = super::bgr_from_rgb(&image, &mut bgr);
        assert!(matches!(res, Err(ImageError::InvalidImageSize(2, 2, 2, 3))));
        Ok(())
    }
}
