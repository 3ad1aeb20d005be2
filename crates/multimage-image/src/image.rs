use ndarray::{Array3, ArrayView3};

use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use multimage_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<ImageSize> for [u32; 2] {
    fn from(size: ImageSize) -> Self {
        [size.width as u32, size.height as u32]
    }
}

/// Trait for image data types.
///
/// Send and Sync is required to iterate the pixels with rayon.
pub trait ImageDtype: Copy + Default + Into<f32> + Send + Sync {
    /// Convert a f32 value to the image data type.
    fn from_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

impl ImageDtype for u16 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 65535.0) as u16
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored contiguously in row-major order with shape (H, W, C),
/// where H is the height of the image, W the width and C the number of channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use multimage_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        // check if the data length matches the image size
        if data.len() != size.width * size.height * CHANNELS {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.width * size.height * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Examples
    ///
    /// ```
    /// use multimage_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     0u8,
    /// ).unwrap();
    ///
    /// assert_eq!(image.as_slice().len(), 10 * 20 * 3);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// The raw pixel data in (H, W, C) order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The raw pixel data in (H, W, C) order, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a reference to the value at `[row, col, channel]`.
    ///
    /// Returns `None` when the index is out of bounds.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [y, x, c] = index;
        if y >= self.height() || x >= self.width() || c >= CHANNELS {
            return None;
        }
        self.data.get((y * self.width() + x) * CHANNELS + c)
    }

    /// Cast the pixel data of the image to a different type.
    ///
    /// # Errors
    ///
    /// If a value cannot be represented in the target type, an error is returned.
    pub fn cast<U>(&self) -> Result<Image<U, CHANNELS>, ImageError>
    where
        U: num_traits::NumCast,
        T: num_traits::NumCast + Copy,
    {
        let casted_data = self
            .data
            .iter()
            .map(|&x| U::from(x).ok_or(ImageError::CastError(std::any::type_name::<U>().into())))
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, casted_data)
    }

    /// Get a single channel of the image.
    ///
    /// # Errors
    ///
    /// If the channel index is out of bounds, an error is returned.
    pub fn channel(&self, channel: usize) -> Result<Image<T, 1>, ImageError>
    where
        T: Copy,
    {
        if channel >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(channel, CHANNELS));
        }

        let channel_data = self
            .data
            .chunks_exact(CHANNELS)
            .map(|pixel| pixel[channel])
            .collect();

        Image::new(self.size, channel_data)
    }

    /// Borrow the image as an `ndarray` view with shape (H, W, C).
    ///
    /// # Examples
    ///
    /// ```
    /// use multimage_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new([1, 2].into(), vec![0, 1, 2, 3, 4, 5]).unwrap();
    /// let view = image.to_array_view().unwrap();
    ///
    /// assert_eq!(view.dim(), (2, 1, 3));
    /// assert_eq!(view[[1, 0, 2]], 5);
    /// ```
    pub fn to_array_view(&self) -> Result<ArrayView3<'_, T>, ImageError> {
        Ok(ArrayView3::from_shape(
            (self.height(), self.width(), CHANNELS),
            &self.data,
        )?)
    }

    /// Consume the image and turn it into an owned `ndarray` array with shape (H, W, C).
    pub fn into_array(self) -> Result<Array3<T>, ImageError> {
        let shape = (self.height(), self.width(), CHANNELS);
        Ok(Array3::from_shape_vec(shape, self.data)?)
    }
}

impl<T, const CHANNELS: usize> TryFrom<Array3<T>> for Image<T, CHANNELS>
where
    T: Clone,
{
    type Error = ImageError;

    fn try_from(array: Array3<T>) -> Result<Self, Self::Error> {
        let (height, width, channels) = array.dim();
        if channels != CHANNELS {
            return Err(ImageError::InvalidChannelCount(channels, CHANNELS));
        }

        // iterate in logical order so that non standard layouts are copied correctly
        let data = array.iter().cloned().collect();

        Image::new(ImageSize { width, height }, data)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.area(), 200);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_wrong_data_length() {
        let res = Image::<u8, 3>::new([2, 2].into(), vec![0u8; 11]);
        assert!(matches!(res, Err(ImageError::InvalidChannelShape(11, 12))));
    }

    #[test]
    fn image_get() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([2, 1].into(), vec![0, 1, 2, 3, 4, 5])?;
        assert_eq!(image.get([0, 1, 0]), Some(&3));
        assert_eq!(image.get([0, 2, 0]), None);
        assert_eq!(image.get([0, 0, 3]), None);
        Ok(())
    }

    #[test]
    fn image_cast() -> Result<(), ImageError> {
        let data = vec![0, 1, 2, 3, 4, 5];
        let image_u8 = Image::<u8, 3>::new(
            ImageSize {
                height: 2,
                width: 1,
            },
            data,
        )?;
        assert_eq!(image_u8.get([1, 0, 2]), Some(&5u8));

        let image_i32: Image<i32, 3> = image_u8.cast()?;
        assert_eq!(image_i32.get([1, 0, 2]), Some(&5i32));

        Ok(())
    }

    #[test]
    fn image_cast_overflow() -> Result<(), ImageError> {
        let image = Image::<u16, 1>::new([1, 1].into(), vec![300])?;
        assert!(matches!(
            image.cast::<u8>(),
            Err(ImageError::CastError(_))
        ));
        Ok(())
    }

    #[test]
    fn image_channel() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::new(
            ImageSize {
                height: 2,
                width: 1,
            },
            vec![0., 1., 2., 3., 4., 5.],
        )?;

        let channel = image.channel(2)?;
        assert_eq!(channel.as_slice(), &[2.0f32, 5.0]);

        assert!(matches!(
            image.channel(3),
            Err(ImageError::ChannelIndexOutOfBounds(3, 3))
        ));

        Ok(())
    }

    #[test]
    fn image_array_roundtrip() -> Result<(), ImageError> {
        let array = ndarray::Array3::<u8>::from_shape_fn((4, 5, 3), |(y, x, c)| {
            (y * 15 + x * 3 + c) as u8
        });
        let image = Image::<u8, 3>::try_from(array.clone())?;
        assert_eq!(image.size(), ImageSize { width: 5, height: 4 });
        assert_eq!(image.to_array_view()?, array.view());
        assert_eq!(image.into_array()?, array);
        Ok(())
    }

    #[test]
    fn image_from_transposed_array() -> Result<(), ImageError> {
        // a (W, H, C) array permuted to (H, W, C) is not in standard layout
        let array = ndarray::Array3::<u8>::from_shape_fn((3, 2, 3), |(x, y, c)| {
            (10 * y + 3 * x + c) as u8
        });
        let permuted = array.permuted_axes([1, 0, 2]);
        let image = Image::<u8, 3>::try_from(permuted)?;
        assert_eq!(image.get([1, 2, 1]), Some(&(10 + 6 + 1)));
        Ok(())
    }

    #[test]
    fn image_from_array_wrong_channels() {
        let array = ndarray::Array3::<u8>::zeros((2, 2, 4));
        let res = Image::<u8, 3>::try_from(array);
        assert!(matches!(res, Err(ImageError::InvalidChannelCount(4, 3))));
    }
}
