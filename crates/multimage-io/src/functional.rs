use std::path::Path;

use multimage_image::{Image, ImageSize};

use crate::error::IoError;

/// Maps the content of an image file to memory.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Errors
///
/// Fails with [`IoError::FileDoesNotExist`] if there is no file at `file_path`.
pub(crate) fn read_image_bytes(file_path: impl AsRef<Path>) -> Result<memmap2::Mmap, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    log::debug!("mapped {} ({} bytes)", file_path.display(), mmap.len());

    Ok(mmap)
}

/// Decodes the bytes of an image file of any format supported by the image crate as RGB8.
///
/// # Arguments
///
/// * `bytes` - Raw bytes of the image file.
pub fn decode_image_any_rgb8(bytes: &[u8]) -> Result<Image<u8, 3>, IoError> {
    dynamic_into_rgb8(decode_image_dynamic(bytes)?)
}

fn decode_image_dynamic(bytes: &[u8]) -> Result<image::DynamicImage, IoError> {
    // decode the data directly from memory
    let img = image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    Ok(img)
}

fn dynamic_into_rgb8(img: image::DynamicImage) -> Result<Image<u8, 3>, IoError> {
    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };
    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Writes an RGB8 image in the format implied by the file extension.
///
/// Any format the image crate can encode is supported.
///
/// # Arguments
///
/// * `file_path` - The path of the file to write.
/// * `image` - The image to write.
///
/// # Errors
///
/// Fails with [`IoError::InvalidFileExtension`] if the extension does not name
/// a known image format.
pub fn write_image_any_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let format = image::ImageFormat::from_path(file_path)
        .map_err(|_| IoError::InvalidFileExtension(file_path.to_path_buf()))?;

    log::debug!("writing {} as {:?}", file_path.display(), format);

    image::save_buffer_with_format(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ExtendedColorType::Rgb8,
        format,
    )?;

    Ok(())
}
