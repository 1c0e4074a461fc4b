//! Pixel format conversions for the pipecam pipeline.
//!
//! The conversions are pure functions over byte buffers: they keep no state
//! between frames and are safe to call concurrently on independent frames.

pub mod pixelformat;
pub use pixelformat::{PixelFormat, fourcc_to_string};

pub mod rgb;
pub use rgb::{yu12_to_rgb, yu12_to_rgba};

pub mod yu12;
pub use yu12::bgra_to_yu12;
