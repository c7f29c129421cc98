//! The kick-mark queue — concentric squares that shrink-in-reverse and
//! fade as they age.
//!
//! Every trigger appends a [`KickMark`] whose starting age is seeded from
//! the cycling [`FramePhase`] counter, so fresh marks appear at varying
//! initial sizes. Each rendered frame draws three nested squares per mark
//! at sizes and alphas derived from its age, then ages every mark by one.
//! A mark whose slowest-fading layer has reached zero alpha is invisible
//! under any clamping renderer and is evicted on the next advance; while
//! visible, marks are never removed and keep insertion order.

// ════════════════════════════════════════════════════════════════════════════
// FramePhase
// ════════════════════════════════════════════════════════════════════════════

/// Period of the frame-phase counter.
pub const PHASE_PERIOD: u32 = 50;

/// Counter cycling `0..PHASE_PERIOD`, ticked once per rendered frame.
///
/// Its only job is seeding the initial age of new marks, which varies
/// their starting size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FramePhase(u32);

impl FramePhase {
    pub fn new() -> Self {
        FramePhase(0)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Advance one frame, wrapping at [`PHASE_PERIOD`].
    pub fn tick(&mut self) {
        self.0 = (self.0 + 1) % PHASE_PERIOD;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// KickMark and its layers
// ════════════════════════════════════════════════════════════════════════════

/// One recorded pinch event on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KickMark {
    pub x: f32,
    pub y: f32,
    /// Frames of apparent age; seeded from the phase counter at creation
    /// and monotonically increasing by 1 per frame, never reset.
    pub age: u32,
}

/// One of the three nested squares drawn for a mark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KickLayer {
    /// Side length of the centered square, in pixels.
    pub side: f32,
    /// Fill alpha in 0..255 terms; may be negative once the mark is old.
    /// Clamping is the renderer's business.
    pub alpha: f32,
    /// Grayscale fill value (0 = black, 255 = white).
    pub gray: u8,
}

/// The three layers for a mark of the given age, outermost first.
pub fn layers(age: u32) -> [KickLayer; 3] {
    let t = age as f32;
    [
        KickLayer {
            side: t * 1.25,
            alpha: 255.0 - t * 1.87,
            gray: 0,
        },
        KickLayer {
            side: t * 0.8,
            alpha: 255.0 - t * 1.65,
            gray: 255,
        },
        KickLayer {
            side: t * 0.6,
            alpha: 255.0 - t * 1.34,
            gray: 255,
        },
    ]
}

/// True once every layer's alpha has decayed to zero or below.
///
/// The inner layer fades slowest (1.34 per frame), so it alone decides.
pub fn fully_faded(age: u32) -> bool {
    255.0 - age as f32 * 1.34 <= 0.0
}

// ════════════════════════════════════════════════════════════════════════════
// KickQueue
// ════════════════════════════════════════════════════════════════════════════

/// Ordered collection of live kick marks.
#[derive(Debug, Default)]
pub struct KickQueue {
    marks: Vec<KickMark>,
}

impl KickQueue {
    pub fn new() -> Self {
        KickQueue::default()
    }

    /// Record a new mark, seeding its age from the phase counter.
    pub fn push(&mut self, x: f32, y: f32, phase: FramePhase) {
        self.marks.push(KickMark {
            x,
            y,
            age: phase.value(),
        });
    }

    /// Live marks in insertion order.
    pub fn marks(&self) -> &[KickMark] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Age every mark by one frame, evicting the fully faded.
    pub fn advance(&mut self) {
        for mark in &mut self.marks {
            mark.age += 1;
        }
        self.marks.retain(|m| !fully_faded(m.age));
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
