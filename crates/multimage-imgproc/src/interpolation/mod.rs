//! Pixel interpolation methods used when resampling images.
//!
//! - **Nearest**: fastest, uses the nearest pixel value
//! - **Bilinear**: linear interpolation between the four adjacent pixels
//! - **Area**: average of the source pixels covered by the destination pixel,
//!   the method of choice for shrinking images

mod area;
mod bilinear;
mod nearest;

pub(crate) use area::{area_weights, AxisWeights};
pub(crate) use bilinear::bilinear_interpolation;
pub(crate) use nearest::nearest_neighbor_interpolation;

/// Interpolation mode for the resize operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    Nearest,
    /// Bilinear interpolation
    Bilinear,
    /// Pixel area relation, averages the covered source pixels
    #[default]
    Area,
}
