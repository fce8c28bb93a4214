//! Render surface trait

use rgb_marquee_types::Rgb;

/// A double-buffered pixel surface the scroll loop draws onto.
///
/// The surface owns its back buffer: `clear` and `draw_text` work on the
/// back buffer and `swap` presents it (on the LED matrix this waits for
/// vsync).
pub trait RenderSurface {
    /// Display width in pixels
    fn width(&self) -> i32;

    /// Clear the back buffer
    fn clear(&mut self);

    /// Draw `text` with its baseline at row `baseline`, starting at column
    /// `x` (which may be negative or past the right edge).
    ///
    /// Returns the rendered width in pixels whether or not any of it was
    /// visible.
    fn draw_text(&mut self, x: i32, baseline: i32, color: Rgb, text: &str) -> i32;

    /// Present the back buffer
    fn swap(&mut self);
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn width(&self) -> i32 {
        (**self).width()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn draw_text(&mut self, x: i32, baseline: i32, color: Rgb, text: &str) -> i32 {
        (**self).draw_text(x, baseline, color, text)
    }

    fn swap(&mut self) {
        (**self).swap()
    }
}
