//! Per-frame hand-tracking payload.
//!
//! The tracking engine delivers, at most once per rendered frame, a
//! [`HandsSnapshot`]: for each detected hand a row of per-finger pinch
//! phases and a raw landmark list in normalized video coordinates. Every
//! level of the structure may be missing or short — no hands at all, a
//! hand with no pinch row, a landmark list too short for a fingertip —
//! and consumers treat each of those as "no data for that slot", never
//! as an error.

/// Number of hands tracked.
pub const HAND_COUNT: usize = 2;

/// Number of fingertips tracked per hand.
pub const FINGER_COUNT: usize = 4;

/// Landmark-list indices of the four tracked fingertips
/// (index, middle, ring, pinky tips in the 21-point hand model).
pub const FINGERTIP_LANDMARKS: [usize; FINGER_COUNT] = [8, 12, 16, 20];

// ════════════════════════════════════════════════════════════════════════════
// PinchPhase
// ════════════════════════════════════════════════════════════════════════════

/// Discrete per-fingertip gesture phase reported by the tracking engine.
///
/// `Start` marks the single frame on which a pinch begins; that is the
/// only phase that produces a trigger downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinchPhase {
    /// Pinch began this frame.
    Start,
    /// Pinch continuing from an earlier frame.
    Held,
    /// Pinch released this frame.
    End,
    /// No pinch in progress.
    Idle,
}

impl PinchPhase {
    /// The upstream engine's string label for this phase.
    pub fn label(self) -> &'static str {
        match self {
            PinchPhase::Start => "start",
            PinchPhase::Held => "held",
            PinchPhase::End => "end",
            PinchPhase::Idle => "none",
        }
    }

    /// Parse an upstream label. Unknown labels are `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "start" => Some(PinchPhase::Start),
            "held" => Some(PinchPhase::Held),
            "end" => Some(PinchPhase::End),
            "none" => Some(PinchPhase::Idle),
            _ => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// NormPoint / HandsSnapshot
// ════════════════════════════════════════════════════════════════════════════

/// A landmark position normalized to [0, 1] of the source video frame.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct NormPoint {
    pub x: f32,
    pub y: f32,
}

impl NormPoint {
    pub fn new(x: f32, y: f32) -> Self {
        NormPoint { x, y }
    }
}

/// One frame's worth of tracking data.
///
/// `pinch_states[h][f]` is the phase of finger `f` on hand `h`;
/// `landmarks[h]` is that hand's raw landmark list (21 points when
/// complete, possibly shorter). The two structures are indexed by the
/// same hand order but either may be missing entries for a given slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandsSnapshot {
    pub pinch_states: Vec<Vec<PinchPhase>>,
    pub landmarks: Vec<Vec<NormPoint>>,
}

impl HandsSnapshot {
    /// The fingertip landmark for `(hand, finger)`, if present this frame.
    pub fn fingertip(&self, hand: usize, finger: usize) -> Option<NormPoint> {
        let tip_index = *FINGERTIP_LANDMARKS.get(finger)?;
        self.landmarks.get(hand)?.get(tip_index).copied()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for phase in [
            PinchPhase::Start,
            PinchPhase::Held,
            PinchPhase::End,
            PinchPhase::Idle,
        ] {
            assert_eq!(PinchPhase::from_label(phase.label()), Some(phase));
        }
    }

    #[test]
    fn unknown_label_rejected() {
        assert_eq!(PinchPhase::from_label("pinching"), None);
    }

    #[test]
    fn fingertip_present() {
        let mut snap = HandsSnapshot::default();
        snap.landmarks = vec![vec![NormPoint::default(); 21]];
        snap.landmarks[0][8] = NormPoint::new(0.25, 0.75);
        assert_eq!(snap.fingertip(0, 0), Some(NormPoint::new(0.25, 0.75)));
    }

    #[test]
    fn fingertip_absent_cases() {
        // No hands at all
        let empty = HandsSnapshot::default();
        assert_eq!(empty.fingertip(0, 0), None);

        // Hand present but landmark list too short for the pinky tip (20)
        let short = HandsSnapshot {
            pinch_states: vec![vec![PinchPhase::Idle; FINGER_COUNT]],
            landmarks: vec![vec![NormPoint::default(); 9]],
        };
        assert!(short.fingertip(0, 0).is_some());
        assert_eq!(short.fingertip(0, 3), None);

        // Finger index out of range
        assert_eq!(short.fingertip(0, FINGER_COUNT), None);
    }
}
