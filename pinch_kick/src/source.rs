//! Landmark sources and capture control.
//!
//! The public interface is [`HandsSnapshot`] delivered over a `mpsc`
//! channel; consumers don't care whether snapshots come from a real
//! tracking backend or the keyboard/mouse simulator. [`Capture`] wraps
//! the start/stop lifecycle the UI exposes: while stopped the channel is
//! gone and the frame loop simply sees no data.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use kick_pipeline::snapshot::{HandsSnapshot, NormPoint, PinchPhase, FINGER_COUNT};

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for tracking backends
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver per-frame [`HandsSnapshot`]s over a channel.
///
/// A source runs on its own thread and exits when the receiving end is
/// dropped (its sends start failing).
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<HandsSnapshot>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<HandsSnapshot> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// PhaseTracker — pressed/released edges → pinch phase streams
// ════════════════════════════════════════════════════════════════════════════

/// Turns a per-slot pressed flag into the four-phase pinch stream:
/// press edge → `Start`, held → `Held`, release edge → `End`, otherwise
/// `Idle`. One tracker per hand.
#[derive(Debug, Default)]
pub struct PhaseTracker {
    pressed: [bool; FINGER_COUNT],
    previous: [bool; FINGER_COUNT],
}

impl PhaseTracker {
    pub fn set_pressed(&mut self, finger: usize, down: bool) {
        if finger < FINGER_COUNT {
            self.pressed[finger] = down;
        }
    }

    /// Phases for this frame; advances the edge state.
    pub fn step(&mut self) -> Vec<PinchPhase> {
        let phases = (0..FINGER_COUNT)
            .map(|f| match (self.previous[f], self.pressed[f]) {
                (false, true) => PinchPhase::Start,
                (true, true) => PinchPhase::Held,
                (true, false) => PinchPhase::End,
                (false, false) => PinchPhase::Idle,
            })
            .collect();
        self.previous = self.pressed;
        phases
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource — mouse/keyboard simulation
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event forwarded from the window to the simulator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Cursor moved; coordinates normalized to [0, 1] of the window.
    CursorMoved { x: f32, y: f32 },
    /// A simulated pinch (mouse button or number key) went down.
    PinchDown { finger: usize },
    /// The simulated pinch was released.
    PinchUp { finger: usize },
}

/// Landmark source driven by [`SimInput`] events from the window.
///
/// Emits one single-hand snapshot per tick at roughly the render rate.
/// All 21 landmarks sit at the cursor, pre-mirrored so the detector's
/// horizontal flip puts marks back under the pointer.
pub struct SimLandmarkSource {
    pub rx: Receiver<SimInput>,
}

impl LandmarkSource for SimLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<HandsSnapshot>) {
        let mut cursor = NormPoint::new(0.5, 0.5);
        let mut tracker = PhaseTracker::default();

        loop {
            loop {
                match self.rx.try_recv() {
                    Ok(SimInput::CursorMoved { x, y }) => cursor = NormPoint::new(x, y),
                    Ok(SimInput::PinchDown { finger }) => tracker.set_pressed(finger, true),
                    Ok(SimInput::PinchUp { finger }) => tracker.set_pressed(finger, false),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return,
                }
            }

            // Undo the detector's mirror so the mark lands at the cursor.
            let tip = NormPoint::new(1.0 - cursor.x, cursor.y);
            let snapshot = HandsSnapshot {
                pinch_states: vec![tracker.step()],
                landmarks: vec![vec![tip; 21]],
            };
            if tx.send(snapshot).is_err() {
                return;
            }

            thread::sleep(Duration::from_millis(16));
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Capture — start/stop lifecycle around a source
// ════════════════════════════════════════════════════════════════════════════

/// UI-visible capture state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    /// No source running.
    Stopped,
    /// Source spawned, no snapshot seen yet.
    Loading,
    /// Snapshots flowing.
    Started,
}

/// Owns the snapshot channel for the active source, if any.
///
/// `latest()` drains the channel and keeps only the newest snapshot —
/// frames are never queued up, matching the one-snapshot-per-frame
/// contract with the tracking engine.
pub struct Capture {
    state: CaptureState,
    rx: Option<Receiver<HandsSnapshot>>,
    sim_tx: Option<Sender<SimInput>>,
}

impl Capture {
    pub fn new() -> Self {
        Capture {
            state: CaptureState::Stopped,
            rx: None,
            sim_tx: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Spawn the simulation source and begin capturing.
    pub fn start(&mut self) {
        if self.state != CaptureState::Stopped {
            return;
        }
        let (sim_tx, sim_rx) = mpsc::channel();
        self.rx = Some(spawn_landmark_source(SimLandmarkSource { rx: sim_rx }));
        self.sim_tx = Some(sim_tx);
        self.state = CaptureState::Loading;
        log::info!("capture started (simulation source)");
    }

    /// Stop capturing. Dropping the channel ends the source thread.
    pub fn stop(&mut self) {
        self.rx = None;
        self.sim_tx = None;
        self.state = CaptureState::Stopped;
        log::info!("capture stopped");
    }

    pub fn toggle(&mut self) {
        if self.state == CaptureState::Stopped {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Forward a window input event to the simulation source.
    pub fn send_input(&self, input: SimInput) {
        if let Some(tx) = &self.sim_tx {
            let _ = tx.send(input);
        }
    }

    /// Newest snapshot this frame, or `None` when stopped / nothing new.
    pub fn latest(&mut self) -> Option<HandsSnapshot> {
        let mut newest = None;
        let mut disconnected = false;
        match &self.rx {
            None => return None,
            Some(rx) => loop {
                match rx.try_recv() {
                    Ok(snap) => newest = Some(snap),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            },
        }
        if disconnected {
            self.stop();
            return None;
        }
        if newest.is_some() && self.state == CaptureState::Loading {
            self.state = CaptureState::Started;
        }
        newest
    }
}

impl Default for Capture {
    fn default() -> Self {
        Capture::new()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_emits_start_held_end_idle() {
        let mut tracker = PhaseTracker::default();
        tracker.set_pressed(0, true);
        assert_eq!(tracker.step()[0], PinchPhase::Start);
        assert_eq!(tracker.step()[0], PinchPhase::Held);
        tracker.set_pressed(0, false);
        assert_eq!(tracker.step()[0], PinchPhase::End);
        assert_eq!(tracker.step()[0], PinchPhase::Idle);
    }

    #[test]
    fn tracker_fingers_are_independent() {
        let mut tracker = PhaseTracker::default();
        tracker.set_pressed(1, true);
        let phases = tracker.step();
        assert_eq!(phases[0], PinchPhase::Idle);
        assert_eq!(phases[1], PinchPhase::Start);
        assert_eq!(phases.len(), FINGER_COUNT);
    }

    #[test]
    fn tracker_ignores_out_of_range_finger() {
        let mut tracker = PhaseTracker::default();
        tracker.set_pressed(FINGER_COUNT, true);
        assert!(tracker.step().iter().all(|&p| p == PinchPhase::Idle));
    }

    #[test]
    fn capture_lifecycle() {
        let mut capture = Capture::new();
        assert_eq!(capture.state(), CaptureState::Stopped);
        assert!(capture.latest().is_none());

        capture.start();
        assert_eq!(capture.state(), CaptureState::Loading);

        // The sim source ticks every ~16 ms; wait for a snapshot.
        let mut got = None;
        for _ in 0..100 {
            if let Some(snap) = capture.latest() {
                got = Some(snap);
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert!(got.is_some());
        assert_eq!(capture.state(), CaptureState::Started);

        capture.stop();
        assert_eq!(capture.state(), CaptureState::Stopped);
        assert!(capture.latest().is_none());
    }

    #[test]
    fn sim_source_reports_pinch_at_cursor() {
        let mut capture = Capture::new();
        capture.start();
        capture.send_input(SimInput::CursorMoved { x: 0.8, y: 0.5 });
        capture.send_input(SimInput::PinchDown { finger: 0 });

        let mut started = None;
        for _ in 0..200 {
            if let Some(snap) = capture.latest() {
                if snap.pinch_states[0][0] == PinchPhase::Start {
                    started = Some(snap);
                    break;
                }
            }
            thread::sleep(Duration::from_millis(5));
        }
        let snap = started.expect("no Start phase seen");
        // Pre-mirrored: cursor x 0.8 is emitted as landmark x 0.2.
        let tip = snap.fingertip(0, 0).unwrap();
        assert!((tip.x - 0.2).abs() < 1e-6);
        assert!((tip.y - 0.5).abs() < 1e-6);
    }
}
