//! # kick_pipeline
//!
//! Core pipeline for a camera-driven percussion instrument: noisy
//! per-frame fingertip tracking data comes in, discrete percussive events
//! come out, and two time-evolving visual layers are maintained.
//!
//! ## Pipeline
//!
//! ```text
//! HandsSnapshot ──▶ PinchDetector ──▶ GestureTrigger ──┬─▶ shot_params ─▶ (audio)
//!  (per frame)        8 slots          (Start only)    └─▶ KickQueue   ─▶ (canvas)
//!
//! ParticleField ── independent ambient layer, composited underneath
//! ```
//!
//! | Module | Responsibility |
//! |---|---|
//! | [`snapshot`]  | Per-frame hand/finger tracking payload |
//! | [`detector`]  | `start`-transition detection per (hand, finger) slot |
//! | [`mapper`]    | Trigger position → playback rate / pan / amplitude |
//! | [`kick`]      | Frame-phase counter and the shrinking/fading mark queue |
//! | [`particles`] | Drifting piano-key particles |
//! | [`theme`]     | Shared palette + background |
//!
//! Everything here is pure state-machine and geometry code: no windowing,
//! no audio device, no globals. The interactive crate (`pinch_kick`) wires
//! these pieces to a landmark source, a sampler, and a framebuffer.

pub mod detector;
pub mod kick;
pub mod mapper;
pub mod particles;
pub mod snapshot;
pub mod theme;
