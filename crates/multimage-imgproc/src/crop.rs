use multimage_image::{Image, ImageError, ImageSize};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// A rectangular region of an image, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CropArea {
    /// x-coordinate of the top-left corner.
    pub x: usize,
    /// y-coordinate of the top-left corner.
    pub y: usize,
    /// Width of the region in pixels.
    pub width: usize,
    /// Height of the region in pixels.
    pub height: usize,
}

impl CropArea {
    /// Size of the region.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Check that the region is non empty and lies fully inside an image of the given size.
    pub fn validate(&self, image_size: ImageSize) -> Result<(), ImageError> {
        let fits_x = self
            .x
            .checked_add(self.width)
            .is_some_and(|right| right <= image_size.width);
        let fits_y = self
            .y
            .checked_add(self.height)
            .is_some_and(|bottom| bottom <= image_size.height);

        if self.width == 0 || self.height == 0 || !fits_x || !fits_y {
            return Err(ImageError::CropOutOfBounds(
                self.x,
                self.y,
                self.width,
                self.height,
                image_size.width,
                image_size.height,
            ));
        }

        Ok(())
    }
}

/// `[x, y, width, height]`
impl From<[usize; 4]> for CropArea {
    fn from(area: [usize; 4]) -> Self {
        CropArea {
            x: area[0],
            y: area[1],
            width: area[2],
            height: area[3],
        }
    }
}

/// Crop an image to a specified region.
///
/// The size of the region is the size of `dst`.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `dst` - The destination image to store the cropped image.
/// * `x` - The x-coordinate of the top-left corner of the region to crop.
/// * `y` - The y-coordinate of the top-left corner of the region to crop.
///
/// # Errors
///
/// Returns [`ImageError::CropOutOfBounds`] if the region is empty or does not
/// fit inside `src`.
///
/// # Examples
///
/// ```rust
/// use multimage_image::{Image, ImageSize};
/// use multimage_imgproc::crop::crop_image;
///
/// let image = Image::<_, 1>::new(ImageSize { width: 4, height: 4 }, vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
///     8u8, 9, 10, 11,
///     12u8, 13, 14, 15
/// ]).unwrap();
///
/// let mut cropped = Image::<_, 1>::from_size_val(ImageSize { width: 2, height: 2 }, 0u8).unwrap();
///
/// crop_image(&image, &mut cropped, 1, 1).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5u8, 6, 9, 10]);
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let area = CropArea {
        x,
        y,
        width: dst.cols(),
        height: dst.rows(),
    };
    area.validate(src.size())?;

    let dst_cols = dst.cols();
    let src_cols = src.cols();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            // get the slice at the top left corner
            let offset = (y + i) * src_cols * C + x * C;
            let src_slice = &src_data[offset..offset + dst_cols * C];

            // copy the slice to the destination
            dst_row.copy_from_slice(src_slice);
        });

    Ok(())
}

/// Crop a region out of an image into a newly allocated image.
///
/// # Errors
///
/// Returns [`ImageError::CropOutOfBounds`] if the region is empty or does not
/// fit inside `src`.
pub fn crop<T, const C: usize>(src: &Image<T, C>, area: CropArea) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    area.validate(src.size())?;
    let mut dst = Image::from_size_val(area.size(), T::default())?;
    crop_image(src, &mut dst, area.x, area.y)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::CropArea;
    use multimage_image::{Image, ImageError, ImageSize};

    #[test]
    fn test_crop() -> Result<(), ImageError> {
        let image_size = ImageSize {
            width: 2,
            height: 3,
        };

        #[rustfmt::skip]
        let image = Image::<_, 3>::new(
            image_size,
            vec![
                0u8, 1, 2, 3, 4, 5,
                6u8, 7, 8, 9, 10, 11,
                12u8, 13, 14, 15, 16, 17,
            ],
        )?;

        let data_expected = vec![9u8, 10, 11, 15, 16, 17];

        let crop_size = ImageSize {
            width: 1,
            height: 2,
        };

        let mut cropped = Image::<_, 3>::from_size_val(crop_size, 0u8)?;

        super::crop_image(&image, &mut cropped, 1, 1)?;

        assert_eq!(cropped.as_slice(), &data_expected);

        Ok(())
    }

    #[test]
    fn test_crop_area() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([100, 100].into(), 7)?;
        let cropped = super::crop(&image, [10, 10, 20, 20].into())?;
        assert_eq!(cropped.size(), ImageSize { width: 20, height: 20 });
        assert!(cropped.as_slice().iter().all(|&v| v == 7));
        Ok(())
    }

    #[test]
    fn test_crop_full_image() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([2, 2].into(), vec![1, 2, 3, 4])?;
        let cropped = super::crop(&image, [0, 0, 2, 2].into())?;
        assert_eq!(cropped, image);
        Ok(())
    }

    #[test]
    fn test_crop_out_of_bounds() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([10, 10].into(), 0)?;
        let invalid = [
            CropArea::from([5, 5, 6, 1]),
            CropArea::from([0, 9, 1, 2]),
            CropArea::from([0, 0, 0, 3]),
            CropArea::from([usize::MAX, 0, 2, 2]),
        ];
        for area in invalid {
            let res = super::crop(&image, area);
            assert!(
                matches!(res, Err(ImageError::CropOutOfBounds(..))),
                "{area:?} should be rejected"
            );
        }
        Ok(())
    }
}
