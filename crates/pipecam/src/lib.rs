//! Pipe-to-virtual-camera bridge.
//!
//! A producer writes an unbroken concatenation of fixed-size YU12 frames to
//! stdin; the bridge converts each frame to the pixel format the virtual
//! camera negotiated and delivers it at the configured rate.

pub mod pipeline;
pub mod source;

pub use source::FrameSource;
