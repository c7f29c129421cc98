//! # pinch_kick
//!
//! The interactive instrument around [`kick_pipeline`]: a landmark
//! source thread feeds per-frame hand snapshots over a channel, the
//! frame loop turns pinch starts into sample shots and kick marks, and a
//! software canvas composites the ambient key-particle surface under the
//! marks at ~60 fps.
//!
//! ## Controls (simulation source)
//!
//! | Input | Effect |
//! |---|---|
//! | `Space` | Start / stop capture |
//! | Mouse move | Fingertip position (hand 0) |
//! | Left mouse button | Pinch finger 0 |
//! | `1`–`4` | Pinch fingers 0–3 at the cursor |
//! | `Q` / `Escape` | Quit |
//!
//! Real camera hand tracking stays behind the [`source::LandmarkSource`]
//! seam; any backend that can deliver `HandsSnapshot`s over a channel
//! plugs in without touching the rest of the crate.

pub mod app;
pub mod canvas;
pub mod sampler;
pub mod source;
pub mod view;
