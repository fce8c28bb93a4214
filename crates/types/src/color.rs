//! Foundational colour type used by every message on the panel.
//!
//! The LED matrix has no alpha channel, so unlike a desktop colour this is a
//! plain 8-bit RGB triple.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lowest channel value handed out by [`Rgb::random_bright`].
///
/// Anything darker is hard to read on a HUB75 panel at normal brightness.
pub const BRIGHT_CHANNEL_MIN: u8 = 64;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Random colour with every channel in `64..=255`
    pub fn random_bright() -> Self {
        Self::random_bright_with(&mut rand::thread_rng())
    }

    /// Same as [`Rgb::random_bright`] with a caller-supplied generator
    pub fn random_bright_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.gen_range(BRIGHT_CHANNEL_MIN..=u8::MAX),
            g: rng.gen_range(BRIGHT_CHANNEL_MIN..=u8::MAX),
            b: rng.gen_range(BRIGHT_CHANNEL_MIN..=u8::MAX),
        }
    }

    /// Parse `"r,g,b"` or `"#rrggbb"`.
    ///
    /// Returns `None` for anything else, including out-of-range components.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();

        if let Some(hex) = value.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Self::new(channel(0)?, channel(2)?, channel(4)?));
        }

        let mut parts = value.split(',').map(|p| p.trim().parse::<u8>());
        let (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };
        Some(Self::new(r, g, b))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}
