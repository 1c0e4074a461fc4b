//! Virtual camera output for the pipecam pipeline.
//!
//! `VideoOut` runs the device on a blocking worker thread behind a bounded
//! channel, with a v4l2loopback backend.

pub mod error;
pub use error::VideoError;

pub mod videoframe;
pub use videoframe::VideoFrame;

pub mod videoout;
pub use videoout::{FrameSink, VideoOut, VideoOutConfig, v4l2::V4l2Config};
