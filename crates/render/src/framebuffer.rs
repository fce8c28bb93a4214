//! In-memory double-buffered surface.
//!
//! Text is rasterised with the 7x13 mono font, the same glyph cell as the
//! BDF font the LED panel uses, so rendered widths match the hardware.

use core::convert::Infallible;
use embedded_graphics::mono_font::{ascii::FONT_7X13, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use log::trace;
use rgb_marquee_core::RenderSurface;
use rgb_marquee_types::Rgb;

/// Panel width of a single 64x32 HUB75 module
pub const DEFAULT_WIDTH: u32 = 64;

/// Panel height of a single 64x32 HUB75 module
pub const DEFAULT_HEIGHT: u32 = 32;

fn to_rgb888(color: Rgb) -> Rgb888 {
    Rgb888::new(color.r, color.g, color.b)
}

fn from_rgb888(color: Rgb888) -> Rgb {
    Rgb::new(color.r(), color.g(), color.b())
}

/// Heap-backed frame buffer implementing `DrawTarget<Color = Rgb888>`.
///
/// Drawing goes to the back buffer; [`RenderSurface::swap`] makes it the
/// front buffer, which is what [`FrameBuffer::pixel`] reads.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    back: Vec<Rgb888>,
    front: Vec<Rgb888>,
    swaps: u64,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl FrameBuffer {
    /// Allocate a black buffer of `width` x `height` pixels
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            back: vec![Rgb888::BLACK; count],
            front: vec![Rgb888::BLACK; count],
            swaps: 0,
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Colour of a pixel in the presented frame
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| from_rgb888(self.front[i]))
    }

    /// Number of non-black pixels in the presented frame
    pub fn lit_pixels(&self) -> usize {
        self.front.iter().filter(|&&c| c != Rgb888::BLACK).count()
    }

    /// Number of frames presented so far
    pub fn swaps(&self) -> u64 {
        self.swaps
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(i) = self.index(coord.x, coord.y) {
                self.back[i] = color;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        for point in area.points() {
            if let Some(i) = self.index(point.x, point.y) {
                self.back[i] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.back.fill(color);
        Ok(())
    }
}

impl RenderSurface for FrameBuffer {
    fn width(&self) -> i32 {
        self.width as i32
    }

    fn clear(&mut self) {
        self.back.fill(Rgb888::BLACK);
    }

    fn draw_text(&mut self, x: i32, baseline: i32, color: Rgb, text: &str) -> i32 {
        let style = MonoTextStyle::new(&FONT_7X13, to_rgb888(color));
        let origin = Point::new(x, baseline);
        let next = Text::with_baseline(text, origin, style, Baseline::Alphabetic)
            .draw(self)
            .unwrap_or_else(|never| match never {});
        next.x - x
    }

    fn swap(&mut self) {
        std::mem::swap(&mut self.back, &mut self.front);
        self.swaps += 1;
        trace!("Frame {} presented", self.swaps);
    }
}
