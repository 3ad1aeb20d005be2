use crate::error::IoError;
use jpeg_encoder::{ColorType, Encoder};
use multimage_image::{Image, ImageError, ImageSize};

/// Encodes an RGB8 image into the bytes of a JPEG file.
///
/// # Arguments
///
/// - `image` - The image to encode.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
///
/// # Errors
///
/// Fails with [`IoError::InvalidQuality`] for a quality above 100, and when a
/// side of the image does not fit the 16 bits of a JPEG header.
pub fn encode_image_jpeg_rgb8(image: &Image<u8, 3>, quality: u8) -> Result<Vec<u8>, IoError> {
    if quality > 100 {
        return Err(IoError::InvalidQuality(quality));
    }

    let image_size = image.size();
    if image_size.width > u16::MAX as usize || image_size.height > u16::MAX as usize {
        return Err(ImageError::InvalidTargetSize(image_size.width, image_size.height).into());
    }

    let mut buf = Vec::new();
    let encoder = Encoder::new(&mut buf, quality);
    encoder.encode(
        image.as_slice(),
        image_size.width as u16,
        image_size.height as u16,
        ColorType::Rgb,
    )?;

    Ok(buf)
}

/// Decodes a JPEG image with three channel (rgb8) from Raw Bytes.
///
/// # Arguments
///
/// - `src` - Raw bytes of the jpeg file
pub fn decode_image_jpeg_rgb8(src: &[u8]) -> Result<Image<u8, 3>, IoError> {
    let mut decoder = zune_jpeg::JpegDecoder::new(src);
    decoder.decode_headers()?;

    let image_info = decoder.info().ok_or_else(|| {
        IoError::JpegDecodingError(zune_jpeg::errors::DecodeErrors::Format(String::from(
            "Failed to find image info from its metadata",
        )))
    })?;

    let image_size = ImageSize {
        width: image_info.width as usize,
        height: image_info.height as usize,
    };

    let img_data = decoder.decode()?;

    Ok(Image::new(image_size, img_data)?)
}
