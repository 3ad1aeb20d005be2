use crate::{Image, ImageDtype, ImageError};

/// Cast the pixel data of an image to a different type and scale it.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
/// * `scale` - The scale to multiply the pixel data with.
///
/// Example:
///
/// ```
/// use multimage_image::{Image, ImageSize};
/// use multimage_image::ops::cast_and_scale;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![0u8, 255],
/// ).unwrap();
///
/// let mut image_f32 = Image::from_size_val(image.size(), 0.0f32).unwrap();
///
/// cast_and_scale(&image, &mut image_f32, 1. / 255.0).unwrap();
///
/// assert_eq!(image_f32.as_slice(), &[0.0f32, 1.0]);
/// ```
pub fn cast_and_scale<T, U, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<U, C>,
    scale: U,
) -> Result<(), ImageError>
where
    T: Copy + num_traits::NumCast,
    U: Copy + num_traits::NumCast + std::ops::Mul<U, Output = U>,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .try_for_each(|(out, &inp)| {
            let x = U::from(inp).ok_or(ImageError::CastError(
                std::any::type_name::<U>().to_string(),
            ))?;
            *out = x * scale;
            Ok::<(), ImageError>(())
        })?;

    Ok(())
}

/// Scale the pixel data of an image and convert it to the destination type.
///
/// Unlike [`cast_and_scale`] the conversion never fails: the scaled value is
/// rounded and saturated to the range of the destination type.
///
/// Example:
///
/// ```
/// use multimage_image::Image;
/// use multimage_image::ops::scale_and_convert;
///
/// let image = Image::<f32, 1>::new([3, 1].into(), vec![0.0, 0.5, 1.2]).unwrap();
/// let mut image_u8 = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// scale_and_convert(&image, &mut image_u8, 255.0).unwrap();
///
/// assert_eq!(image_u8.as_slice(), &[0u8, 128, 255]);
/// ```
pub fn scale_and_convert<T, U, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<U, C>,
    scale: f32,
) -> Result<(), ImageError>
where
    T: Copy + Into<f32>,
    U: ImageDtype,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .for_each(|(out, &inp)| *out = U::from_f32(inp.into() * scale));

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{Image, ImageError, ImageSize};

    #[test]
    fn cast_and_scale_u8_f32() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([1, 1].into(), vec![0, 51, 255])?;
        let mut image_f32 = Image::<f32, 3>::from_size_val(image.size(), 0.0)?;
        super::cast_and_scale(&image, &mut image_f32, 1.0 / 255.0)?;

        let expected = [0.0f32, 0.2, 1.0];
        for (a, b) in image_f32.as_slice().iter().zip(expected.iter()) {
            approx::assert_relative_eq!(a, b, epsilon = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn cast_and_scale_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([2, 2].into(), 0)?;
        let mut dst = Image::<f32, 1>::from_size_val([3, 2].into(), 0.0)?;
        let res = super::cast_and_scale(&image, &mut dst, 1.0);
        assert!(matches!(res, Err(ImageError::InvalidImageSize(2, 2, 3, 2))));
        Ok(())
    }

    #[test]
    fn scale_and_convert_saturates() -> Result<(), ImageError> {
        let image = Image::<u16, 1>::new(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![0, 12, 255, 4096],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(image.size(), 0)?;
        super::scale_and_convert(&image, &mut dst, 1.0)?;
        assert_eq!(dst.as_slice(), &[0, 12, 255, 255]);
        Ok(())
    }
}
