use multimage_image::{Image, ImageSize};
use png::{BitDepth, ColorType, Encoder};

use crate::error::IoError;

/// Encodes an RGB8 image into the bytes of a PNG file.
///
/// # Arguments
///
/// - `image` - The image to encode.
///
/// # Returns
///
/// The bytes of the PNG file.
pub fn encode_image_png_rgb8(image: &Image<u8, 3>) -> Result<Vec<u8>, IoError> {
    encode_png_impl(image.as_slice(), image.size(), BitDepth::Eight, ColorType::Rgb)
}

fn encode_png_impl(
    image_data: &[u8],
    image_size: ImageSize,
    // Make sure you set `depth` correctly
    depth: BitDepth,
    color_type: ColorType,
) -> Result<Vec<u8>, IoError> {
    let mut buf = Vec::new();

    let mut encoder = Encoder::new(&mut buf, image_size.width as u32, image_size.height as u32);
    encoder.set_color(color_type);
    encoder.set_depth(depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image_data)
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;

    Ok(buf)
}
