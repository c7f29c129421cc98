//! The ambient particle layer — drifting piano-key motifs.
//!
//! A fixed-size field of particles wanders slowly across a viewport
//! padded by [`WANDER_PAD`] on every edge; a particle that drifts out of
//! the padded bounds is re-rolled to a fresh position (its velocity is
//! kept). Each particle renders as four groups of seven key rectangles
//! in its theme color; the geometry lives here as a pure function so the
//! renderer only has to fill rectangles.

use rand::Rng;

use crate::detector::CanvasSize;
use crate::theme::Theme;

/// Default particle count.
pub const PARTICLE_COUNT: usize = 200;

/// Padding beyond each viewport edge a particle may wander into.
pub const WANDER_PAD: f32 = 50.0;

/// Velocity components are rolled uniformly from this range.
pub const DRIFT_RANGE: f32 = 0.5;

// ════════════════════════════════════════════════════════════════════════════
// Particle / ParticleField
// ════════════════════════════════════════════════════════════════════════════

/// One drifting key motif.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Fixed at creation from the session theme.
    pub color: u32,
}

/// The full ambient field.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: CanvasSize,
}

impl ParticleField {
    /// Populate `count` particles over the padded viewport.
    pub fn new<R: Rng>(count: usize, bounds: CanvasSize, theme: &Theme, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                x: rng.gen_range(-WANDER_PAD..=bounds.w + WANDER_PAD),
                y: rng.gen_range(-WANDER_PAD..=bounds.h + WANDER_PAD),
                vx: rng.gen_range(-DRIFT_RANGE..=DRIFT_RANGE),
                vy: rng.gen_range(-DRIFT_RANGE..=DRIFT_RANGE),
                color: theme.random_color(rng),
            })
            .collect();
        ParticleField { particles, bounds }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance every particle one frame.
    ///
    /// Out-of-bounds particles get a fresh random position inside the
    /// padded viewport; velocity and color are untouched.
    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        let bounds = self.bounds;
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;

            if p.x < -WANDER_PAD
                || p.x > bounds.w + WANDER_PAD
                || p.y < -WANDER_PAD
                || p.y > bounds.h + WANDER_PAD
            {
                p.x = rng.gen_range(-WANDER_PAD..=bounds.w + WANDER_PAD);
                p.y = rng.gen_range(-WANDER_PAD..=bounds.h + WANDER_PAD);
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Key motif geometry
// ════════════════════════════════════════════════════════════════════════════

/// White-key width and height in pixels.
pub const KEY_SIZE: f32 = 30.0;
/// Gap between adjacent keys.
pub const KEY_GAP: f32 = 4.0;
/// Keys per group (one stylized octave).
pub const KEYS_PER_GROUP: usize = 7;
/// Groups per motif.
pub const KEY_GROUPS: usize = 4;
/// Key indices within a group drawn "black" at 60% size.
pub const BLACK_KEYS: [usize; 3] = [1, 3, 6];

/// A corner-anchored rectangle of the motif.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// The 28 key rectangles of one motif centered on `(cx, cy)`.
pub fn key_motif(cx: f32, cy: f32) -> Vec<KeyRect> {
    let pitch = KEY_SIZE + KEY_GAP;
    let group_span = KEYS_PER_GROUP as f32 * pitch;
    let mut rects = Vec::with_capacity(KEY_GROUPS * KEYS_PER_GROUP);

    for group in 0..KEY_GROUPS {
        let group_x = cx - (KEY_GROUPS - 1) as f32 * group_span / 2.0 + group as f32 * group_span;
        for key in 0..KEYS_PER_GROUP {
            let black = BLACK_KEYS.contains(&key);
            let size = if black { KEY_SIZE * 0.6 } else { KEY_SIZE };
            rects.push(KeyRect {
                x: group_x + key as f32 * pitch,
                y: cy - KEY_SIZE / 2.0,
                w: size,
                h: size,
            });
        }
    }
    rects
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
