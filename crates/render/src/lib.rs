//! rgb-marquee-render: Render surfaces for the scroll loop.
//!
//! [`FrameBuffer`] is an in-memory double buffer drawn with
//! `embedded-graphics` and is always available. [`LedMatrixSurface`] drives a
//! HUB75 panel through `rpi-led-matrix` and needs the `matrix` feature.

mod framebuffer;
#[cfg(feature = "matrix")]
mod matrix;

pub use framebuffer::{FrameBuffer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
#[cfg(feature = "matrix")]
pub use matrix::LedMatrixSurface;
