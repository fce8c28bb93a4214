//! HUB75 LED panel surface via the rpi-rgb-led-matrix bindings.

use anyhow::{anyhow, Context, Result};
use log::info;
use rgb_marquee_core::RenderSurface;
use rgb_marquee_types::Rgb;
use rpi_led_matrix::{LedCanvas, LedColor, LedFont, LedMatrix, LedMatrixOptions, LedRuntimeOptions};
use std::path::Path;

/// Double-buffered LED matrix.
///
/// Drawing goes to an offscreen canvas; `swap` exchanges it with the
/// displayed one on the next vsync.
pub struct LedMatrixSurface {
    matrix: LedMatrix,
    canvas: Option<LedCanvas>,
    font: LedFont,
    width: i32,
}

impl LedMatrixSurface {
    /// Open the panel and load the BDF font used for both lines.
    ///
    /// `hardware_mapping` names the GPIO wiring, e.g. `"regular"` or
    /// `"adafruit-hat"`.
    pub fn open(width: u32, height: u32, hardware_mapping: &str, font_path: &Path) -> Result<Self> {
        let mut options = LedMatrixOptions::new();
        options.set_cols(width);
        options.set_rows(height);
        options.set_hardware_mapping(hardware_mapping);

        let matrix = LedMatrix::new(Some(options), Some(LedRuntimeOptions::new()))
            .map_err(|e| anyhow!("Failed to open LED matrix: {}", e))?;
        let font = LedFont::new(font_path)
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("Failed to load font {}", font_path.display()))?;
        let canvas = matrix.offscreen_canvas();
        let (canvas_width, canvas_height) = canvas.canvas_size();
        info!(
            "LED matrix opened ({}x{}, {} mapping, font {})",
            canvas_width,
            canvas_height,
            hardware_mapping,
            font_path.display()
        );

        Ok(Self {
            matrix,
            canvas: Some(canvas),
            font,
            width: canvas_width,
        })
    }
}

impl RenderSurface for LedMatrixSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn clear(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.clear();
        }
    }

    fn draw_text(&mut self, x: i32, baseline: i32, color: Rgb, text: &str) -> i32 {
        let Some(canvas) = self.canvas.as_mut() else {
            return 0;
        };
        let color = LedColor {
            red: color.r,
            green: color.g,
            blue: color.b,
        };
        canvas.draw_text(&self.font, text, x, baseline, &color, 0, false)
    }

    fn swap(&mut self) {
        if let Some(canvas) = self.canvas.take() {
            self.canvas = Some(self.matrix.swap(canvas));
        }
    }
}
