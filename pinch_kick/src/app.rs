//! Top-level application state and the frame loop.
//!
//! `AppState` is the explicit session context: it owns the detector
//! slots, the frame-phase counter, the kick queue, the particle field
//! and the theme — nothing lives in globals. `run()` drives one strict
//! sequence per rendered frame: advance phase and particles, ingest the
//! newest tracking snapshot, fire the sampler per trigger, render, age
//! the queue. Nothing in the loop can fail a frame; missing data and
//! missing audio both degrade to "nothing happens".

use std::path::PathBuf;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;

use kick_pipeline::detector::{CanvasSize, GestureTrigger, PinchDetector};
use kick_pipeline::kick::{FramePhase, KickQueue};
use kick_pipeline::mapper::shot_params;
use kick_pipeline::particles::{ParticleField, PARTICLE_COUNT};
use kick_pipeline::snapshot::HandsSnapshot;
use kick_pipeline::theme::Theme;

use crate::sampler::{Sampler, SamplerError};
use crate::source::Capture;
use crate::view::{PollOutcome, View, ViewError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    Sampler(#[from] SamplerError),
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for one session.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub width: usize,
    pub height: usize,
    /// Wav file for the percussion voice; silent when absent.
    pub sample: Option<PathBuf>,
    pub particles: usize,
    /// RNG seed; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            width: 800,
            height: 600,
            sample: None,
            particles: PARTICLE_COUNT,
            seed: None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    canvas: CanvasSize,
    detector: PinchDetector,
    phase: FramePhase,
    kicks: KickQueue,
    field: ParticleField,
    theme: Theme,
    rng: SmallRng,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        let mut rng = match cfg.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let canvas = CanvasSize::new(cfg.width as f32, cfg.height as f32);
        let theme = Theme::pick(&mut rng);
        let field = ParticleField::new(cfg.particles, canvas, &theme, &mut rng);

        AppState {
            canvas,
            detector: PinchDetector::new(canvas),
            phase: FramePhase::new(),
            kicks: KickQueue::new(),
            field,
            theme,
            rng,
        }
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn kicks(&self) -> &KickQueue {
        &self.kicks
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Start-of-frame bookkeeping: phase counter, ambient drift.
    pub fn begin_frame(&mut self) {
        self.phase.tick();
        self.field.update(&mut self.rng);
    }

    /// Ingest the frame's tracking snapshot; each trigger is recorded in
    /// the kick queue and returned for the caller to sound.
    pub fn ingest(&mut self, snapshot: Option<&HandsSnapshot>) -> Vec<GestureTrigger> {
        let triggers = self.detector.process(snapshot);
        for t in &triggers {
            self.kicks.push(t.x, t.y, self.phase);
        }
        triggers
    }

    /// End-of-frame bookkeeping: age every drawn mark.
    pub fn end_frame(&mut self) {
        self.kicks.advance();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the instrument until the window closes or the player quits.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let mut view = View::new(cfg.width, cfg.height)?;

    let sampler = match &cfg.sample {
        Some(path) => Sampler::from_wav(path)?,
        None => {
            log::warn!("no sample configured; triggers will be silent");
            Sampler::silent()
        }
    };

    let mut capture = Capture::new();
    let mut state = AppState::new(&cfg);

    while view.is_open() {
        if view.poll_input(&mut capture) == PollOutcome::Quit {
            break;
        }

        let snapshot = capture.latest();

        state.begin_frame();
        let triggers = state.ingest(snapshot.as_ref());
        for t in &triggers {
            let params = shot_params(t.x, state.canvas());
            log::debug!(
                "kick: hand {} finger {} at ({:.0}, {:.0}) rate {:.2} pan {:.2}",
                t.slot.hand,
                t.slot.finger,
                t.x,
                t.y,
                params.rate,
                params.pan
            );
            sampler.trigger(params);
        }

        view.render(&state);
        state.end_frame();
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use kick_pipeline::snapshot::{NormPoint, PinchPhase};

    fn make_state() -> AppState {
        AppState::new(&AppConfig {
            width: 800,
            height: 600,
            sample: None,
            particles: 10,
            seed: Some(42),
        })
    }

    fn start_at(x: f32, y: f32) -> HandsSnapshot {
        HandsSnapshot {
            pinch_states: vec![vec![
                PinchPhase::Start,
                PinchPhase::Idle,
                PinchPhase::Idle,
                PinchPhase::Idle,
            ]],
            landmarks: vec![vec![NormPoint::new(x, y); 21]],
        }
    }

    #[test]
    fn single_pinch_end_to_end() {
        let mut state = make_state();
        let sampler = Sampler::silent();

        state.begin_frame();
        let triggers = state.ingest(Some(&start_at(0.2, 0.5)));
        assert_eq!(triggers.len(), 1);
        assert_approx_eq!(triggers[0].x, 640.0);
        assert_approx_eq!(triggers[0].y, 300.0);

        let params = shot_params(triggers[0].x, state.canvas());
        sampler.trigger(params);
        let (rate, pan, amp) = sampler.params();
        assert!(rate > 1.3); // height-based rate range extrapolates
        assert_approx_eq!(pan, 0.6, 1e-3);
        assert_approx_eq!(amp, 1.0);

        assert_eq!(state.kicks().len(), 1);
        let mark = state.kicks().marks()[0];
        assert_approx_eq!(mark.x, 640.0);
        assert_approx_eq!(mark.y, 300.0);
    }

    #[test]
    fn consecutive_start_frames_stack_marks() {
        let mut state = make_state();
        for _ in 0..2 {
            state.begin_frame();
            let triggers = state.ingest(Some(&start_at(0.5, 0.5)));
            assert_eq!(triggers.len(), 1);
            state.end_frame();
        }
        assert_eq!(state.kicks().len(), 2);
    }

    #[test]
    fn mark_age_is_seeded_from_the_phase_counter() {
        let mut state = make_state();
        for _ in 0..12 {
            state.begin_frame();
            state.end_frame();
        }
        state.begin_frame();
        state.ingest(Some(&start_at(0.5, 0.5)));
        assert_eq!(state.kicks().marks()[0].age, state.phase().value());
        assert_eq!(state.phase().value(), 13);
    }

    #[test]
    fn no_snapshot_means_an_idle_frame() {
        let mut state = make_state();
        state.begin_frame();
        assert!(state.ingest(None).is_empty());
        state.end_frame();
        assert!(state.kicks().is_empty());
    }

    #[test]
    fn end_frame_ages_marks_once() {
        let mut state = make_state();
        state.begin_frame();
        state.ingest(Some(&start_at(0.3, 0.3)));
        let age_before = state.kicks().marks()[0].age;
        state.end_frame();
        assert_eq!(state.kicks().marks()[0].age, age_before + 1);
    }

    #[test]
    fn held_frames_between_starts_do_not_trigger() {
        let mut state = make_state();
        let held = HandsSnapshot {
            pinch_states: vec![vec![
                PinchPhase::Held,
                PinchPhase::Idle,
                PinchPhase::Idle,
                PinchPhase::Idle,
            ]],
            landmarks: vec![vec![NormPoint::new(0.5, 0.5); 21]],
        };
        state.begin_frame();
        assert_eq!(state.ingest(Some(&start_at(0.5, 0.5))).len(), 1);
        state.end_frame();
        state.begin_frame();
        assert!(state.ingest(Some(&held)).is_empty());
        state.end_frame();
        assert_eq!(state.kicks().len(), 1);
    }
}
