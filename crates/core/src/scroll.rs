//! Scroll scheduler - the fixed-rate animation loop
//!
//! Two independent cursors walk the top and bottom sequences. Each frame the
//! current message of each line is drawn at the cursor's pixel position and
//! the cursor moves one pixel left. Once a message has scrolled fully off
//! the left edge the cursor jumps back to the right edge and moves to the
//! next message; wrapping past the end of a sequence asks the aggregator for
//! a rebuild of that line.

use crate::aggregator::Aggregator;
use crate::constants::{
    BOTTOM_BASELINE, BOTTOM_DEFAULT_COLOR, BOTTOM_PLACEHOLDER, FRAME_INTERVAL, TOP_BASELINE,
    TOP_DEFAULT_COLOR, TOP_PLACEHOLDER,
};
use crate::surface::RenderSurface;
use log::{debug, trace};
use rgb_marquee_types::{Message, Rgb};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Which of the two display lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Top,
    Bottom,
}

/// Static layout of one line
#[derive(Debug, Clone)]
struct LineStyle {
    baseline: i32,
    placeholder: &'static str,
    placeholder_color: Rgb,
}

impl LineStyle {
    fn top() -> Self {
        Self {
            baseline: TOP_BASELINE,
            placeholder: TOP_PLACEHOLDER,
            placeholder_color: TOP_DEFAULT_COLOR,
        }
    }

    fn bottom() -> Self {
        Self {
            baseline: BOTTOM_BASELINE,
            placeholder: BOTTOM_PLACEHOLDER,
            placeholder_color: BOTTOM_DEFAULT_COLOR,
        }
    }
}

/// Scroll state of one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Index of the message being scrolled
    pub index: usize,
    /// Column of the message's left edge
    pub position: i32,
}

impl Cursor {
    fn at_right_edge(width: i32) -> Self {
        Self {
            index: 0,
            position: width,
        }
    }

    /// Draw the current message and move one pixel left.
    ///
    /// Returns true when the index wrapped back to 0, i.e. the line's
    /// sequence should be rebuilt. An empty sequence shows the placeholder;
    /// the index stays at 0 and every completed placeholder pass counts as a
    /// wrap so the line picks up content as soon as some arrives.
    fn step<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        messages: &[Message],
        style: &LineStyle,
    ) -> bool {
        let (color, text) = match messages.get(self.index) {
            Some(message) => (message.color(), message.text()),
            None => (style.placeholder_color, style.placeholder),
        };

        let rendered = surface.draw_text(self.position, style.baseline, color, text);
        self.position -= 1;

        if self.position + rendered >= 0 {
            return false;
        }

        // Scroll complete, restart at the right edge with the next message
        self.position = surface.width();
        self.index += 1;
        if self.index >= messages.len() {
            self.index = 0;
            return true;
        }
        false
    }

    /// Keep the index inside a freshly rebuilt sequence
    fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = 0;
        }
    }
}

/// Drives the render surface from the aggregator's sequences
pub struct ScrollScheduler<S: RenderSurface> {
    surface: S,
    aggregator: Aggregator,
    top: Vec<Message>,
    bottom: Arc<[Message]>,
    top_cursor: Cursor,
    bottom_cursor: Cursor,
    top_style: LineStyle,
    bottom_style: LineStyle,
    frame_interval: Duration,
    frames: u64,
}

impl<S: RenderSurface> ScrollScheduler<S> {
    /// Build the initial sequences and park both cursors at the right edge
    pub fn new(surface: S, mut aggregator: Aggregator) -> Self {
        let width = surface.width();
        let top = aggregator.rebuild_top();
        let bottom = aggregator.rebuild_bottom();
        Self {
            surface,
            aggregator,
            top,
            bottom,
            top_cursor: Cursor::at_right_edge(width),
            bottom_cursor: Cursor::at_right_edge(width),
            top_style: LineStyle::top(),
            bottom_style: LineStyle::bottom(),
            frame_interval: FRAME_INTERVAL,
            frames: 0,
        }
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn cursor(&self, line: Line) -> Cursor {
        match line {
            Line::Top => self.top_cursor,
            Line::Bottom => self.bottom_cursor,
        }
    }

    pub fn messages(&self, line: Line) -> &[Message] {
        match line {
            Line::Top => &self.top,
            Line::Bottom => &self.bottom,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Render one frame without sleeping
    pub fn tick(&mut self) {
        self.surface.clear();

        if self
            .top_cursor
            .step(&mut self.surface, &self.top, &self.top_style)
        {
            self.top = self.aggregator.rebuild_top();
            self.top_cursor.clamp(self.top.len());
            trace!("Top line rebuilt");
        }

        if self
            .bottom_cursor
            .step(&mut self.surface, &self.bottom, &self.bottom_style)
        {
            self.bottom = self.aggregator.rebuild_bottom();
            self.bottom_cursor.clamp(self.bottom.len());
            trace!("Bottom line rebuilt ({} messages)", self.bottom.len());
        }

        self.surface.swap();
        self.frames += 1;
    }

    /// Run forever at the fixed frame rate
    pub fn run(&mut self) {
        self.run_frames(None);
    }

    /// Run at the fixed frame rate, stopping after `limit` frames if given
    pub fn run_frames(&mut self, limit: Option<u64>) {
        debug!(
            "Scroll loop starting ({:?} per frame, {}px wide)",
            self.frame_interval,
            self.surface.width()
        );
        let mut remaining = limit;
        loop {
            if let Some(0) = remaining {
                break;
            }

            let start = Instant::now();
            self.tick();
            let elapsed = start.elapsed();
            if elapsed < self.frame_interval {
                std::thread::sleep(self.frame_interval - elapsed);
            }

            if let Some(n) = remaining.as_mut() {
                *n -= 1;
            }
        }
    }
}
