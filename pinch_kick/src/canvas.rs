//! Software rendering surface — a plain ARGB framebuffer.
//!
//! Two fill primitives cover everything the instrument draws: opaque
//! corner-anchored rectangles for the ambient key motifs, and
//! alpha-blended center-anchored grayscale squares for kick layers. The
//! pipeline hands this layer *unclamped* alphas; clamping to [0, 255]
//! happens here, so over-aged layers simply stop contributing.

/// An ARGB (`0xAARRGGBB`) pixel buffer.
#[derive(Clone, Debug)]
pub struct Surface {
    width: usize,
    height: usize,
    buf: Vec<u32>,
}

impl Surface {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Surface {
            width,
            height,
            buf: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn buf(&self) -> &[u32] {
        &self.buf
    }

    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.buf[y * self.width + x]
    }

    pub fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    /// Opaque corner-anchored rectangle fill. Portions outside the
    /// surface are clipped; negative coordinates clip the same way.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: u32) {
        let x0 = x.max(0.0) as usize;
        let y0 = y.max(0.0) as usize;
        let x1 = ((x + w).max(0.0) as usize).min(self.width);
        let y1 = ((y + h).max(0.0) as usize).min(self.height);
        for row in y0..y1 {
            for col in x0..x1 {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    /// Alpha-blended grayscale square centered on `(cx, cy)`.
    ///
    /// `alpha` is in 0..255 terms and may arrive outside that range; it
    /// is clamped, so alpha ≤ 0 is a no-op and alpha ≥ 255 paints solid.
    pub fn fill_square_centered(&mut self, cx: f32, cy: f32, side: f32, gray: u8, alpha: f32) {
        let a = alpha.clamp(0.0, 255.0) / 255.0;
        if a <= 0.0 || side <= 0.0 {
            return;
        }
        let half = side / 2.0;
        let x0 = (cx - half).max(0.0) as usize;
        let y0 = (cy - half).max(0.0) as usize;
        let x1 = ((cx + half).max(0.0) as usize).min(self.width);
        let y1 = ((cy + half).max(0.0) as usize).min(self.height);

        let g = gray as f32;
        for row in y0..y1 {
            for col in x0..x1 {
                let dst = self.buf[row * self.width + col];
                self.buf[row * self.width + col] = blend_gray(dst, g, a);
            }
        }
    }

    /// Copy `src` onto this surface with its top-left at `(x, y)`.
    pub fn blit(&mut self, src: &Surface, x: usize, y: usize) {
        let w = src.width.min(self.width.saturating_sub(x));
        let h = src.height.min(self.height.saturating_sub(y));
        for row in 0..h {
            let dst_start = (y + row) * self.width + x;
            let src_start = row * src.width;
            self.buf[dst_start..dst_start + w].copy_from_slice(&src.buf[src_start..src_start + w]);
        }
    }
}

/// Blend a grayscale value over a packed ARGB pixel at opacity `a` (0..1).
fn blend_gray(dst: u32, gray: f32, a: f32) -> u32 {
    let mix = |shift: u32| {
        let d = ((dst >> shift) & 0xFF) as f32;
        ((gray * a + d * (1.0 - a)) as u32) << shift
    };
    0xFF00_0000 | mix(16) | mix(8) | mix(0)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_clips_to_surface() {
        let mut s = Surface::new(4, 4, 0xFF000000);
        s.fill_rect(2.0, 2.0, 10.0, 10.0, 0xFFFFFFFF);
        assert_eq!(s.pixel(1, 1), 0xFF000000);
        assert_eq!(s.pixel(2, 2), 0xFFFFFFFF);
        assert_eq!(s.pixel(3, 3), 0xFFFFFFFF);
    }

    #[test]
    fn centered_square_covers_expected_pixels() {
        let mut s = Surface::new(8, 8, 0xFF000000);
        s.fill_square_centered(4.0, 4.0, 4.0, 255, 255.0);
        assert_eq!(s.pixel(2, 2), 0xFFFFFFFF);
        assert_eq!(s.pixel(5, 5), 0xFFFFFFFF);
        assert_eq!(s.pixel(1, 1), 0xFF000000);
        assert_eq!(s.pixel(6, 6), 0xFF000000);
    }

    #[test]
    fn negative_alpha_is_a_noop() {
        let mut s = Surface::new(4, 4, 0xFF123456);
        s.fill_square_centered(2.0, 2.0, 4.0, 255, -30.0);
        assert_eq!(s.pixel(2, 2), 0xFF123456);
    }

    #[test]
    fn half_alpha_blends_toward_gray() {
        let mut s = Surface::new(2, 2, 0xFF000000);
        s.fill_square_centered(1.0, 1.0, 2.0, 255, 127.5);
        let px = s.pixel(0, 0);
        let r = (px >> 16) & 0xFF;
        assert!((126..=128).contains(&r), "r = {r}");
        assert_eq!(px >> 24, 0xFF);
    }

    #[test]
    fn oversized_alpha_paints_solid() {
        let mut s = Surface::new(2, 2, 0xFF000000);
        s.fill_square_centered(1.0, 1.0, 2.0, 200, 400.0);
        assert_eq!(s.pixel(0, 0), 0xFFC8C8C8);
    }

    #[test]
    fn blit_copies_whole_surface() {
        let mut dst = Surface::new(4, 4, 0xFF000000);
        let mut src = Surface::new(4, 4, 0xFF00FF00);
        src.fill_rect(0.0, 0.0, 1.0, 1.0, 0xFFFF0000);
        dst.blit(&src, 0, 0);
        assert_eq!(dst.pixel(0, 0), 0xFFFF0000);
        assert_eq!(dst.pixel(3, 3), 0xFF00FF00);
    }
}
