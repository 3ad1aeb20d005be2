use multimage_image::Image;

use crate::error::IoError;

/// Options passed through to the display backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    /// Name of the image in the viewer.
    pub name: String,
    /// Bounds `(min, max)` stretched to the full `[0, 255]` range before display.
    pub value_range: Option<(f32, f32)>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            name: "image".to_string(),
            value_range: None,
        }
    }
}

impl ViewOptions {
    /// Default options: the image is named `image` and shown as is.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name of the image in the viewer.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Stretch the values in `[min, max]` to `[0, 255]`.
    pub fn with_value_range(mut self, min: f32, max: f32) -> Self {
        self.value_range = Some((min, max));
        self
    }
}

/// A display backend.
///
/// Closures taking the name and the RGB8 image are viewers too.
///
/// # Example
///
/// ```
/// use multimage_image::Image;
/// use multimage_io::{error::IoError, viz::ImageViewer};
///
/// let print = |name: &str, image: &Image<u8, 3>| -> Result<(), IoError> {
///     println!("{name}: {}", image.size());
///     Ok(())
/// };
///
/// let image = Image::<u8, 3>::from_size_val([2, 2].into(), 0).unwrap();
/// print.show("black", &image).unwrap();
/// ```
pub trait ImageViewer {
    /// Show an RGB8 image under the given name.
    fn show(&self, name: &str, image: &Image<u8, 3>) -> Result<(), IoError>;
}

impl<F> ImageViewer for F
where
    F: Fn(&str, &Image<u8, 3>) -> Result<(), IoError>,
{
    fn show(&self, name: &str, image: &Image<u8, 3>) -> Result<(), IoError> {
        self(name, image)
    }
}

/// Viewer logging images to a [rerun](https://rerun.io) recording.
#[cfg(feature = "rerun")]
pub struct RerunViewer {
    rec: rerun::RecordingStream,
}

#[cfg(feature = "rerun")]
impl RerunViewer {
    /// Spawn a rerun viewer process and record into it.
    pub fn spawn(app_id: &str) -> Result<Self, IoError> {
        let rec = rerun::RecordingStreamBuilder::new(app_id)
            .spawn()
            .map_err(|e| IoError::ViewerError(e.to_string()))?;
        Ok(Self { rec })
    }

    /// Record into an existing stream.
    pub fn new(rec: rerun::RecordingStream) -> Self {
        Self { rec }
    }
}

#[cfg(feature = "rerun")]
impl ImageViewer for RerunViewer {
    fn show(&self, name: &str, image: &Image<u8, 3>) -> Result<(), IoError> {
        self.rec
            .log(
                name,
                &rerun::Image::from_elements(
                    image.as_slice(),
                    image.size().into(),
                    rerun::ColorModel::RGB,
                ),
            )
            .map_err(|e| IoError::ViewerError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageViewer, ViewOptions};
    use crate::error::IoError;
    use multimage_image::Image;
    use std::cell::RefCell;

    #[test]
    fn view_options_builder() {
        let options = ViewOptions::new()
            .with_name("debug/frame")
            .with_value_range(10.0, 20.0);
        assert_eq!(options.name, "debug/frame");
        assert_eq!(options.value_range, Some((10.0, 20.0)));
        assert_eq!(ViewOptions::default().value_range, None);
    }

    #[test]
    fn closure_viewer() -> Result<(), IoError> {
        let shown = RefCell::new(Vec::new());
        let viewer = |name: &str, image: &Image<u8, 3>| -> Result<(), IoError> {
            shown.borrow_mut().push((name.to_string(), image.size()));
            Ok(())
        };

        let image = Image::<u8, 3>::from_size_val([3, 2].into(), 1)?;
        viewer.show("a", &image)?;
        viewer.show("b", &image)?;

        let shown = shown.into_inner();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[1], ("b".to_string(), image.size()));
        Ok(())
    }
}
