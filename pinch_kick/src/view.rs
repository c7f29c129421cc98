//! The instrument window — input polling and frame composition.
//!
//! Owns the minifb window, the main surface, and the reused off-screen
//! ambient surface. Per frame it forwards raw input to the capture's
//! simulation source, then composites: ambient key particles into the
//! off-screen surface, blit, kick layers on top.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use thiserror::Error;

use kick_pipeline::kick::layers;
use kick_pipeline::particles::key_motif;

use crate::app::AppState;
use crate::canvas::Surface;
use crate::source::{Capture, CaptureState, SimInput};

const BG_COLOR: u32 = 0xFF000000;

/// Number keys driving simulated pinches for fingers 0–3.
const FINGER_KEYS: [Key; 4] = [Key::Key1, Key::Key2, Key::Key3, Key::Key4];

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("failed to open window: {0}")]
    Window(#[from] minifb::Error),
}

/// What the poll step asks the frame loop to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Continue,
    Quit,
}

pub struct View {
    window: Window,
    main: Surface,
    /// Reused every frame for the ambient layer.
    ambient: Surface,
    mouse_down: bool,
    finger_keys_down: [bool; 4],
    last_title_state: Option<CaptureState>,
}

impl View {
    pub fn new(width: usize, height: usize) -> Result<Self, ViewError> {
        let mut window = Window::new(
            "pinch kick",
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;
        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(View {
            window,
            main: Surface::new(width, height, BG_COLOR),
            ambient: Surface::new(width, height, BG_COLOR),
            mouse_down: false,
            finger_keys_down: [false; 4],
            last_title_state: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll window input, forwarding pinch/cursor events to the capture.
    pub fn poll_input(&mut self, capture: &mut Capture) -> PollOutcome {
        if !self.window.is_open() {
            return PollOutcome::Quit;
        }
        if self.window.is_key_pressed(Key::Q, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
        {
            return PollOutcome::Quit;
        }

        // The start/stop "webcam" button stand-in.
        if self.window.is_key_pressed(Key::Space, KeyRepeat::No) {
            capture.toggle();
        }

        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            capture.send_input(SimInput::CursorMoved {
                x: mx / self.main.width() as f32,
                y: my / self.main.height() as f32,
            });
        }

        // Mouse button drives finger 0; edges only.
        let down = self.window.get_mouse_down(MouseButton::Left);
        if down != self.mouse_down {
            self.mouse_down = down;
            capture.send_input(if down {
                SimInput::PinchDown { finger: 0 }
            } else {
                SimInput::PinchUp { finger: 0 }
            });
        }

        // Number keys drive all four fingers.
        for (finger, &key) in FINGER_KEYS.iter().enumerate() {
            let down = self.window.is_key_down(key);
            if down != self.finger_keys_down[finger] {
                self.finger_keys_down[finger] = down;
                capture.send_input(if down {
                    SimInput::PinchDown { finger }
                } else {
                    SimInput::PinchUp { finger }
                });
            }
        }

        // Title doubles as the capture-state display.
        let state = capture.state();
        if self.last_title_state != Some(state) {
            self.last_title_state = Some(state);
            let title = match state {
                CaptureState::Stopped => "pinch kick — stopped (Space to start)",
                CaptureState::Loading => "pinch kick — loading…",
                CaptureState::Started => "pinch kick — capturing (Space to stop)",
            };
            self.window.set_title(title);
        }

        PollOutcome::Continue
    }

    /// Compose and present one frame.
    pub fn render(&mut self, state: &AppState) {
        compose(&mut self.main, &mut self.ambient, state);
        self.window
            .update_with_buffer(self.main.buf(), self.main.width(), self.main.height())
            .ok();
    }
}

/// Draw one frame into `main`: background, ambient particles via the
/// off-screen surface, then every kick mark's three layers in insertion
/// order. Pure surface math, shared with the tests.
pub fn compose(main: &mut Surface, ambient: &mut Surface, state: &AppState) {
    main.clear(BG_COLOR);

    ambient.clear(state.theme().background);
    for p in state.field().particles() {
        for key in key_motif(p.x, p.y) {
            ambient.fill_rect(key.x, key.y, key.w, key.h, p.color);
        }
    }
    main.blit(ambient, 0, 0);

    for mark in state.kicks().marks() {
        for layer in layers(mark.age) {
            main.fill_square_centered(mark.x, mark.y, layer.side, layer.gray, layer.alpha);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
