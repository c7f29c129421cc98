//! Color themes shared by the ambient layer.
//!
//! Colors are packed ARGB (`0xAARRGGBB`, always opaque here). One theme
//! is picked at startup from the configured list and never changes for
//! the session.

use rand::seq::SliceRandom;
use rand::Rng;

/// A particle palette plus the ambient surface's background.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub colors: Vec<u32>,
    pub background: u32,
}

/// Pastel palette used by the default theme.
const PASTEL: [u32; 6] = [
    0xFFC7E9B4, // green
    0xFFF7BBBB, // pink
    0xFF89CCD4, // cyan
    0xFF65A2CC, // blue
    0xFF927DC9, // violet
    0xFFFED976, // amber
];

fn pastel_on_white() -> Theme {
    Theme {
        colors: PASTEL.to_vec(),
        background: 0xFFFFFFFF,
    }
}

/// All configured themes. A single entry today; `pick` still chooses
/// randomly so adding themes costs nothing.
fn all() -> Vec<Theme> {
    vec![pastel_on_white()]
}

impl Theme {
    /// Choose the session theme.
    pub fn pick<R: Rng>(rng: &mut R) -> Theme {
        all().choose(rng).cloned().unwrap_or_else(pastel_on_white)
    }

    /// A random color from this theme's palette.
    pub fn random_color<R: Rng>(&self, rng: &mut R) -> u32 {
        *self.colors.choose(rng).unwrap_or(&self.background)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
