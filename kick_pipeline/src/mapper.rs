//! Trigger position → one-shot playback parameters.

use crate::detector::CanvasSize;

/// Unclamped linear interpolation of `v` from `[in_min, in_max]` to
/// `[out_min, out_max]`. Values outside the input range extrapolate.
pub fn map_range(v: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (v - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// Parameters for one shot of the shared sample voice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotParams {
    /// Playback rate multiplier.
    pub rate: f32,
    /// Stereo pan, nominally -1 (left) .. 1 (right).
    pub pan: f32,
    /// Linear amplitude, 0..1.
    pub amplitude: f32,
}

/// Derive shot parameters from a trigger's canvas x position.
///
/// The rate deliberately spans the *height* range rather than the width,
/// giving an inverse-feeling pitch response across most of a landscape
/// canvas; x positions beyond the canvas height extrapolate past 1.3.
pub fn shot_params(x: f32, canvas: CanvasSize) -> ShotParams {
    ShotParams {
        rate: map_range(x, 0.1, canvas.h, 0.5, 1.3),
        pan: map_range(x, 0.1, canvas.w, -1.0, 1.0),
        amplitude: 1.0,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn map_range_endpoints() {
        assert_approx_eq!(map_range(0.0, 0.0, 10.0, -1.0, 1.0), -1.0);
        assert_approx_eq!(map_range(10.0, 0.0, 10.0, -1.0, 1.0), 1.0);
    }

    #[test]
    fn map_range_is_linear_between() {
        assert_approx_eq!(map_range(2.5, 0.0, 10.0, 0.0, 100.0), 25.0);
        assert_approx_eq!(map_range(7.5, 0.0, 10.0, 0.0, 100.0), 75.0);
    }

    #[test]
    fn map_range_extrapolates_unclamped() {
        assert_approx_eq!(map_range(20.0, 0.0, 10.0, 0.0, 1.0), 2.0);
        assert_approx_eq!(map_range(-10.0, 0.0, 10.0, 0.0, 1.0), -1.0);
    }

    #[test]
    fn shot_params_for_landscape_canvas() {
        // Trigger at x = 640 on an 800×600 canvas: the rate range is
        // height-based so 640 extrapolates past the nominal 1.3 top.
        let p = shot_params(640.0, CanvasSize::new(800.0, 600.0));
        assert_approx_eq!(p.rate, 0.5 + (640.0 - 0.1) / (600.0 - 0.1) * 0.8, 1e-4);
        assert!(p.rate > 1.3);
        assert_approx_eq!(p.pan, 0.6, 1e-3);
        assert_approx_eq!(p.amplitude, 1.0);
    }

    #[test]
    fn pan_spans_the_width() {
        let canvas = CanvasSize::new(800.0, 600.0);
        assert_approx_eq!(shot_params(0.1, canvas).pan, -1.0);
        assert_approx_eq!(shot_params(800.0, canvas).pan, 1.0, 1e-3);
    }
}
