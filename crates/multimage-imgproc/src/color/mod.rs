mod hsv;
mod rgb;

pub use hsv::{adjust_hue, hsv_from_rgb, rgb_from_hsv};
pub use rgb::{bgr_from_rgb, rgb_from_bgr};
