//! Pinch-start detection over the fixed (hand, finger) slot grid.
//!
//! The detector owns eight slots — two hands × four fingertips — each
//! remembering its last-known canvas position across frames. Feeding it
//! one frame's [`HandsSnapshot`] updates every slot that has data and
//! emits a [`GestureTrigger`] exactly for the slots whose phase is
//! [`PinchPhase::Start`] that frame. A `start → held → start` label
//! sequence yields two triggers; there is no dedup window beyond the
//! phase labels themselves.

use crate::snapshot::{HandsSnapshot, NormPoint, PinchPhase, FINGER_COUNT, HAND_COUNT};

// ════════════════════════════════════════════════════════════════════════════
// Canvas geometry
// ════════════════════════════════════════════════════════════════════════════

/// Target canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub w: f32,
    pub h: f32,
}

impl CanvasSize {
    pub fn new(w: f32, h: f32) -> Self {
        CanvasSize { w, h }
    }

    /// Project a normalized landmark into canvas space.
    ///
    /// The x axis is mirrored so on-screen motion matches the performer's
    /// view of themselves: `nx = 0` lands at the right edge, `nx = 1` at
    /// the left.
    pub fn project(&self, p: NormPoint) -> CanvasPoint {
        CanvasPoint {
            x: self.w - p.x * self.w,
            y: p.y * self.h,
        }
    }
}

/// A position in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
}

// ════════════════════════════════════════════════════════════════════════════
// SlotId / GestureTrigger
// ════════════════════════════════════════════════════════════════════════════

/// Fixed identity of one tracked fingertip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotId {
    pub hand: usize,
    pub finger: usize,
}

/// An instantaneous pinch-start event at a canvas position.
///
/// Consumed immediately by the sound mapper and the kick queue; never
/// stored. The slot identity rides along for logging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureTrigger {
    pub slot: SlotId,
    pub x: f32,
    pub y: f32,
}

// ════════════════════════════════════════════════════════════════════════════
// PinchDetector
// ════════════════════════════════════════════════════════════════════════════

/// The eight-slot pinch detector.
///
/// All slots exist for the detector's whole lifetime; positions start at
/// the canvas origin and are only ever overwritten by fresh data.
#[derive(Debug)]
pub struct PinchDetector {
    canvas: CanvasSize,
    last_pos: [[CanvasPoint; FINGER_COUNT]; HAND_COUNT],
}

impl PinchDetector {
    pub fn new(canvas: CanvasSize) -> Self {
        PinchDetector {
            canvas,
            last_pos: [[CanvasPoint::default(); FINGER_COUNT]; HAND_COUNT],
        }
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Last-known canvas position of a slot.
    pub fn last_position(&self, slot: SlotId) -> CanvasPoint {
        self.last_pos[slot.hand][slot.finger]
    }

    /// Ingest one frame of tracking data.
    ///
    /// `None` means tracking produced nothing this frame (capture stopped
    /// or hands lost): every slot keeps its last position and no trigger
    /// fires. Slots missing from a present snapshot are skipped the same
    /// way.
    pub fn process(&mut self, snapshot: Option<&HandsSnapshot>) -> Vec<GestureTrigger> {
        let mut triggers = Vec::new();
        let Some(snap) = snapshot else {
            return triggers;
        };

        for (hand, phases) in snap.pinch_states.iter().enumerate().take(HAND_COUNT) {
            for (finger, &phase) in phases.iter().enumerate().take(FINGER_COUNT) {
                let Some(tip) = snap.fingertip(hand, finger) else {
                    continue;
                };
                let pos = self.canvas.project(tip);
                self.last_pos[hand][finger] = pos;

                if phase == PinchPhase::Start {
                    triggers.push(GestureTrigger {
                        slot: SlotId { hand, finger },
                        x: pos.x,
                        y: pos.y,
                    });
                }
            }
        }
        triggers
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
