//! Primitive rasterisers over a linear byte buffer.
//!
//! Nothing here checks bounds. Callers either validate the shape first
//! (screen drawing) or accept a panic from slice indexing (owned bitmaps).
//! A negative column on a row below the first wraps into the previous row,
//! the same as the flat VRAM addressing these routines come from.

use crate::fixed;

/// A pixel buffer with `stride` bytes per row.
pub(crate) struct Target<'a> {
    pixels: &'a mut [u8],
    stride: usize,
}

impl<'a> Target<'a> {
    pub(crate) fn new(pixels: &'a mut [u8], stride: usize) -> Self {
        Self { pixels, stride }
    }

    fn index(&self, x: isize, y: isize) -> usize {
        (y * self.stride as isize + x) as usize
    }

    pub(crate) fn plot(&mut self, x: isize, y: isize, colour: u8) {
        let i = self.index(x, y);
        self.pixels[i] = colour;
    }

    /// Symmetric Bresenham. The start point is plotted once, then the longer
    /// axis advances one unit per step while the error term on the shorter
    /// axis accumulates.
    pub(crate) fn line(&mut self, x1: isize, y1: isize, x2: isize, y2: isize, colour: u8) {
        let dx = x2 - x1;
        let dy = y2 - y1;
        let dxabs = dx.abs();
        let dyabs = dy.abs();
        let sdx = dx.signum();
        let sdy = dy.signum();
        let mut x_err = dyabs >> 1;
        let mut y_err = dxabs >> 1;
        let mut px = x1;
        let mut py = y1;

        self.plot(px, py, colour);

        if dxabs >= dyabs {
            for _ in 0..dxabs {
                y_err += dyabs;
                if y_err >= dxabs {
                    y_err -= dxabs;
                    py += sdy;
                }
                px += sdx;
                self.plot(px, py, colour);
            }
        } else {
            for _ in 0..dyabs {
                x_err += dxabs;
                if x_err >= dyabs {
                    x_err -= dyabs;
                    px += sdx;
                }
                py += sdy;
                self.plot(px, py, colour);
            }
        }
    }

    /// Outline of a normalised rectangle. Horizontal edges are byte runs,
    /// vertical edges strided writes.
    pub(crate) fn rect(&mut self, left: usize, top: usize, right: usize, bottom: usize, colour: u8) {
        let top_offset = top * self.stride;
        let bottom_offset = bottom * self.stride;

        self.pixels[top_offset + left..=top_offset + right].fill(colour);
        self.pixels[bottom_offset + left..=bottom_offset + right].fill(colour);

        for row in (top_offset..=bottom_offset).step_by(self.stride) {
            self.pixels[row + left] = colour;
            self.pixels[row + right] = colour;
        }
    }

    /// Fill a normalised rectangle one scanline at a time.
    pub(crate) fn filled_rect(
        &mut self,
        left: usize,
        top: usize,
        right: usize,
        bottom: usize,
        colour: u8,
    ) {
        let width = right - left + 1;
        let top_offset = top * self.stride + left;
        let bottom_offset = bottom * self.stride + left;

        for row in (top_offset..=bottom_offset).step_by(self.stride) {
            self.pixels[row..row + width].fill(colour);
        }
    }

    /// Circle outline, eight octant points per step.
    pub(crate) fn circle(&mut self, cx: isize, cy: isize, radius: u16, colour: u8) {
        for (dx, dy) in CircleSteps::new(radius) {
            self.plot(cx + dy, cy - dx, colour);
            self.plot(cx + dx, cy - dy, colour);
            self.plot(cx - dx, cy - dy, colour);
            self.plot(cx - dy, cy - dx, colour);
            self.plot(cx - dy, cy + dx, colour);
            self.plot(cx - dx, cy + dy, colour);
            self.plot(cx + dx, cy + dy, colour);
            self.plot(cx + dy, cy + dx, colour);
        }
    }

    /// Filled circle. Each step fills the octant spans from `dy` inward to
    /// `dx`, which together cover the disc.
    pub(crate) fn filled_circle(&mut self, cx: isize, cy: isize, radius: u16, colour: u8) {
        for (dx, dy) in CircleSteps::new(radius) {
            for i in (dx..=dy).rev() {
                self.plot(cx + i, cy - dx, colour);
                self.plot(cx + dx, cy - i, colour);
                self.plot(cx - dx, cy - i, colour);
                self.plot(cx - i, cy - dx, colour);
                self.plot(cx - i, cy + dx, colour);
                self.plot(cx - dx, cy + i, colour);
                self.plot(cx + dx, cy + i, colour);
                self.plot(cx + i, cy + dx, colour);
            }
        }
    }
}

/// Swap each pair so that `left <= right` and `top <= bottom`.
pub(crate) fn normalise<T: Ord>(left: T, top: T, right: T, bottom: T) -> (T, T, T, T) {
    let (top, bottom) = if top > bottom { (bottom, top) } else { (top, bottom) };
    let (left, right) = if left > right { (right, left) } else { (left, right) };
    (left, top, right, bottom)
}

/// The `(dx, dy)` pairs of the first octant, from the top of the circle
/// (`dx = 0`) until the octant boundary (`dx > dy`).
///
/// `dy` starts at `radius - 1`. After each step `dx` grows by one, the
/// Q16.16 accumulator `n` grows by `1 / radius`, and `dy` becomes
/// `radius * sin(acos(n))` from the lookup table.
pub(crate) struct CircleSteps {
    radius: u16,
    step: fixed::Fixed,
    n: fixed::Fixed,
    dx: isize,
    dy: isize,
}

impl CircleSteps {
    pub(crate) fn new(radius: u16) -> Self {
        let step = if radius == 0 { 0 } else { fixed::reciprocal(radius) };
        Self {
            radius,
            step,
            n: 0,
            dx: 0,
            dy: radius as isize - 1,
        }
    }
}

impl Iterator for CircleSteps {
    type Item = (isize, isize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.dx > self.dy {
            return None;
        }
        let current = (self.dx, self.dy);
        self.dx += 1;
        self.n += self.step;
        self.dy = fixed::scale(self.radius, fixed::sin_acos(self.n));
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: usize = 32;

    fn lit(pixels: &[u8]) -> Vec<(usize, usize)> {
        pixels
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p != 0)
            .map(|(i, _)| (i % W, i / W))
            .collect()
    }

    #[test]
    fn line_steep_and_shallow() {
        let mut buf = vec![0u8; W * W];
        Target::new(&mut buf, W).line(2, 2, 6, 4, 1);
        assert_eq!(lit(&buf), vec![(2, 2), (3, 3), (4, 3), (5, 4), (6, 4)]);

        let mut buf = vec![0u8; W * W];
        Target::new(&mut buf, W).line(5, 1, 5, 5, 1);
        assert_eq!(lit(&buf).len(), 5);
    }

    #[test]
    fn line_backwards_matches_forwards_endpoints() {
        let mut buf = vec![0u8; W * W];
        Target::new(&mut buf, W).line(10, 10, 0, 0, 1);
        let pixels = lit(&buf);
        assert_eq!(pixels.len(), 11);
        assert!(pixels.iter().all(|&(x, y)| x == y));
    }

    #[test]
    fn normalise_swaps_inverted_pairs() {
        assert_eq!(normalise(9, 50, 3, 10), (3, 10, 9, 50));
        assert_eq!(normalise(1, 2, 3, 4), (1, 2, 3, 4));
    }

    #[test]
    fn zero_radius_has_no_steps() {
        assert_eq!(CircleSteps::new(0).count(), 0);
    }

    #[test]
    fn radius_one_is_a_single_step() {
        assert_eq!(CircleSteps::new(1).collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn circle_steps_stop_at_octant_boundary() {
        let steps: Vec<_> = CircleSteps::new(10).collect();
        assert_eq!(steps[0], (0, 9));
        assert!(steps.iter().all(|&(dx, dy)| dx <= dy));
        let &(last_dx, _) = steps.last().expect("steps");
        // The octant ends near radius / sqrt(2).
        assert!((6..=8).contains(&last_dx));
    }

    #[test]
    fn filled_circle_covers_outline() {
        let mut outline = vec![0u8; W * W];
        let mut filled = vec![0u8; W * W];
        Target::new(&mut outline, W).circle(16, 16, 8, 1);
        Target::new(&mut filled, W).filled_circle(16, 16, 8, 1);
        for (o, f) in outline.iter().zip(&filled) {
            if *o != 0 {
                assert_ne!(*f, 0);
            }
        }
        assert_ne!(filled[16 * W + 16], 0, "centre is filled");
    }
}
