//! Owned indexed-colour bitmaps.

use ibm_vga::{Palette, Rgb};

use crate::error::RasterError;
use crate::raster::{self, Target};

/// Number of glyphs in a font strip: printable ASCII, space through tilde.
pub const GLYPH_COUNT: u16 = 95;

/// A polygon vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vertex {
    pub x: u16,
    pub y: u16,
}

impl Vertex {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A `width` x `height` grid of palette indices with an optional palette.
///
/// Pixels are row-major with row 0 at the visual top. The buffer is always
/// exactly `width * height` bytes.
///
/// # Bounds
///
/// The drawing methods here trust their coordinates. A shape that leaves the
/// bitmap either wraps into a neighbouring row or panics on the slice index;
/// nothing outside the buffer is written. The screen variants in
/// [`crate::screen`] check bounds and return an error instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u16,
    height: u16,
    glyph_width: u16,
    palette: Option<Palette>,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// A zeroed bitmap. `palette_colours` of 0 means no palette.
    pub fn new(width: u16, height: u16, palette_colours: u16) -> Result<Self, RasterError> {
        let len = usize::from(width) * usize::from(height);
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| RasterError::Allocation { bytes: len })?;
        pixels.resize(len, 0);

        let palette = match palette_colours {
            0 => None,
            n => Some(Palette::new(usize::from(n)).map_err(|_| RasterError::Allocation {
                bytes: usize::from(n) * size_of::<Rgb>(),
            })?),
        };

        Ok(Self::assemble(width, height, palette, pixels))
    }

    /// Wrap an existing pixel buffer.
    pub fn from_parts(
        width: u16,
        height: u16,
        palette: Option<Palette>,
        pixels: Vec<u8>,
    ) -> Result<Self, RasterError> {
        let expected = usize::from(width) * usize::from(height);
        if pixels.len() != expected {
            return Err(RasterError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self::assemble(width, height, palette, pixels))
    }

    fn assemble(width: u16, height: u16, palette: Option<Palette>, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            glyph_width: width / GLYPH_COUNT,
            palette,
            pixels,
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Width of one glyph when this bitmap is used as a font strip, 0 when
    /// the bitmap is narrower than 95 pixels.
    #[must_use]
    pub fn glyph_width(&self) -> u16 {
        self.glyph_width
    }

    #[must_use]
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    pub fn palette_mut(&mut self) -> Option<&mut Palette> {
        self.palette.as_mut()
    }

    /// Palette entry `index`, or `None` without a palette or out of range.
    #[must_use]
    pub fn colour(&self, index: u8) -> Option<Rgb> {
        self.palette.as_ref()?.get(usize::from(index))
    }

    /// Change a palette entry. Does nothing if the bitmap has no palette or
    /// `index` is past its end.
    pub fn set_colour(&mut self, index: u8, colour: Rgb) {
        if let Some(palette) = self.palette.as_mut() {
            palette.set(usize::from(index), colour);
        }
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Row `y`, `width` bytes.
    #[must_use]
    pub fn row(&self, y: u16) -> &[u8] {
        let start = usize::from(y) * usize::from(self.width);
        &self.pixels[start..start + usize::from(self.width)]
    }

    pub fn row_mut(&mut self, y: u16) -> &mut [u8] {
        let start = usize::from(y) * usize::from(self.width);
        &mut self.pixels[start..start + usize::from(self.width)]
    }

    fn target(&mut self) -> Target<'_> {
        let stride = usize::from(self.width);
        Target::new(&mut self.pixels, stride)
    }

    #[must_use]
    pub fn pixel(&self, x: u16, y: u16) -> u8 {
        self.pixels[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    pub fn set_pixel(&mut self, x: u16, y: u16, colour: u8) {
        let width = usize::from(self.width);
        self.pixels[usize::from(y) * width + usize::from(x)] = colour;
    }

    pub fn line(&mut self, x1: u16, y1: u16, x2: u16, y2: u16, colour: u8) {
        self.target().line(x1 as isize, y1 as isize, x2 as isize, y2 as isize, colour);
    }

    /// Connect the vertices in order and close the shape back to the first
    /// vertex. An empty slice draws nothing.
    pub fn polygon(&mut self, vertices: &[Vertex], colour: u8) {
        let mut target = self.target();
        polygon(&mut target, vertices, colour);
    }

    /// Rectangle outline. Inverted corners are swapped first.
    pub fn rect(&mut self, left: u16, top: u16, right: u16, bottom: u16, colour: u8) {
        let (left, top, right, bottom) = raster::normalise(left, top, right, bottom);
        self.target().rect(
            usize::from(left),
            usize::from(top),
            usize::from(right),
            usize::from(bottom),
            colour,
        );
    }

    pub fn filled_rect(&mut self, left: u16, top: u16, right: u16, bottom: u16, colour: u8) {
        let (left, top, right, bottom) = raster::normalise(left, top, right, bottom);
        self.target().filled_rect(
            usize::from(left),
            usize::from(top),
            usize::from(right),
            usize::from(bottom),
            colour,
        );
    }

    /// Circle outline around `(cx, cy)`. Radius 0 draws nothing.
    pub fn circle(&mut self, cx: u16, cy: u16, radius: u16, colour: u8) {
        self.target().circle(cx as isize, cy as isize, radius, colour);
    }

    pub fn filled_circle(&mut self, cx: u16, cy: u16, radius: u16, colour: u8) {
        self.target().filled_circle(cx as isize, cy as isize, radius, colour);
    }
}

pub(crate) fn polygon(target: &mut Target<'_>, vertices: &[Vertex], colour: u8) {
    let (Some(first), Some(last)) = (vertices.first(), vertices.last()) else {
        return;
    };
    for pair in vertices.windows(2) {
        target.line(
            pair[0].x as isize,
            pair[0].y as isize,
            pair[1].x as isize,
            pair[1].y as isize,
            colour,
        );
    }
    target.line(first.x as isize, first.y as isize, last.x as isize, last.y as isize, colour);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn lit(bm: &Bitmap) -> BTreeSet<(u16, u16)> {
        let mut set = BTreeSet::new();
        for y in 0..bm.height() {
            for x in 0..bm.width() {
                if bm.pixel(x, y) != 0 {
                    set.insert((x, y));
                }
            }
        }
        set
    }

    #[test]
    fn new_bitmap_is_zeroed() {
        let bm = Bitmap::new(7, 3, 0).expect("alloc");
        assert_eq!(bm.pixels().len(), 21);
        assert!(bm.pixels().iter().all(|&p| p == 0));
        assert!(bm.palette().is_none());
    }

    #[test]
    fn palette_size_follows_request() {
        let bm = Bitmap::new(1, 1, 16).expect("alloc");
        assert_eq!(bm.palette().map(Palette::len), Some(16));
    }

    #[test]
    fn glyph_width_from_strip_width() {
        assert_eq!(Bitmap::new(95 * 8, 1, 0).expect("alloc").glyph_width(), 8);
        assert_eq!(Bitmap::new(94, 1, 0).expect("alloc").glyph_width(), 0);
    }

    #[test]
    fn from_parts_checks_length() {
        let err = Bitmap::from_parts(4, 4, None, vec![0; 15]).expect_err("short buffer");
        assert!(matches!(err, RasterError::SizeMismatch { expected: 16, actual: 15, .. }));
        assert!(Bitmap::from_parts(4, 4, None, vec![0; 16]).is_ok());
    }

    #[test]
    fn colour_without_palette_is_ignored() {
        let mut bm = Bitmap::new(2, 2, 0).expect("alloc");
        bm.set_colour(0, Rgb::WHITE);
        assert_eq!(bm.colour(0), None);
    }

    #[test]
    fn colour_out_of_range_is_ignored() {
        let mut bm = Bitmap::new(2, 2, 4).expect("alloc");
        bm.set_colour(3, Rgb::WHITE);
        bm.set_colour(4, Rgb::WHITE);
        assert_eq!(bm.colour(3), Some(Rgb::WHITE));
        assert_eq!(bm.colour(4), None);
        assert_eq!(bm.palette().map(Palette::len), Some(4));
    }

    #[test]
    fn rows_are_width_sized() {
        let mut bm = Bitmap::new(3, 2, 0).expect("alloc");
        bm.row_mut(1).copy_from_slice(&[1, 2, 3]);
        assert_eq!(bm.row(0), &[0, 0, 0]);
        assert_eq!(bm.row(1), &[1, 2, 3]);
        assert_eq!(bm.pixel(2, 1), 3);
    }

    #[test]
    fn single_point_line() {
        let mut bm = Bitmap::new(16, 16, 0).expect("alloc");
        bm.line(0, 0, 0, 0, 9);
        assert_eq!(lit(&bm), BTreeSet::from([(0, 0)]));
    }

    #[test]
    fn horizontal_line_pixel_count() {
        let mut bm = Bitmap::new(16, 16, 0).expect("alloc");
        bm.line(0, 0, 10, 0, 9);
        let pixels = lit(&bm);
        assert_eq!(pixels.len(), 11);
        assert!(pixels.iter().all(|&(x, y)| y == 0 && x <= 10));
    }

    #[test]
    fn rect_is_normalised() {
        let mut a = Bitmap::new(64, 64, 0).expect("alloc");
        let mut b = Bitmap::new(64, 64, 0).expect("alloc");
        a.rect(5, 50, 40, 10, 3);
        b.rect(5, 10, 40, 50, 3);
        assert_eq!(a, b);

        let mut c = Bitmap::new(64, 64, 0).expect("alloc");
        c.rect(40, 10, 5, 50, 3);
        assert_eq!(a, c);
    }

    #[test]
    fn rect_outline_only() {
        let mut bm = Bitmap::new(8, 8, 0).expect("alloc");
        bm.rect(1, 1, 5, 4, 1);
        // perimeter of a 5x4 box
        assert_eq!(lit(&bm).len(), 2 * 5 + 2 * 2);
        assert_eq!(bm.pixel(3, 2), 0);
    }

    #[test]
    fn filled_rect_area() {
        let mut bm = Bitmap::new(8, 8, 0).expect("alloc");
        bm.filled_rect(6, 5, 2, 3, 1);
        assert_eq!(lit(&bm).len(), 5 * 3);
        assert_eq!(bm.pixel(2, 3), 1);
        assert_eq!(bm.pixel(6, 5), 1);
        assert_eq!(bm.pixel(7, 5), 0);
    }

    #[test]
    fn circle_is_symmetric_under_rotation() {
        let mut bm = Bitmap::new(64, 64, 0).expect("alloc");
        bm.circle(32, 32, 20, 1);
        let offsets: BTreeSet<(i32, i32)> = lit(&bm)
            .into_iter()
            .map(|(x, y)| (i32::from(x) - 32, i32::from(y) - 32))
            .collect();
        let rotated: BTreeSet<(i32, i32)> = offsets.iter().map(|&(dx, dy)| (-dy, dx)).collect();
        assert_eq!(offsets, rotated);
        assert!(offsets.contains(&(0, -19)), "top point sits at radius - 1");
    }

    #[test]
    fn filled_circle_is_symmetric_under_rotation() {
        let mut bm = Bitmap::new(64, 64, 0).expect("alloc");
        bm.filled_circle(30, 30, 12, 1);
        let offsets: BTreeSet<(i32, i32)> = lit(&bm)
            .into_iter()
            .map(|(x, y)| (i32::from(x) - 30, i32::from(y) - 30))
            .collect();
        let rotated: BTreeSet<(i32, i32)> = offsets.iter().map(|&(dx, dy)| (-dy, dx)).collect();
        assert_eq!(offsets, rotated);
        assert!(offsets.contains(&(0, 0)));
    }

    #[test]
    fn zero_radius_circle_draws_nothing() {
        let mut bm = Bitmap::new(8, 8, 0).expect("alloc");
        bm.circle(4, 4, 0, 1);
        bm.filled_circle(4, 4, 0, 1);
        assert!(lit(&bm).is_empty());
    }

    #[test]
    fn polygon_closes_shape() {
        let mut bm = Bitmap::new(16, 16, 0).expect("alloc");
        bm.polygon(&[Vertex::new(1, 1), Vertex::new(8, 1), Vertex::new(8, 8)], 1);
        // closing edge runs along the diagonal
        assert_eq!(bm.pixel(4, 4), 1);
        assert_eq!(bm.pixel(5, 1), 1);
        assert_eq!(bm.pixel(8, 5), 1);
    }

    #[test]
    fn polygon_single_vertex_is_a_point() {
        let mut bm = Bitmap::new(8, 8, 0).expect("alloc");
        bm.polygon(&[Vertex::new(3, 3)], 1);
        assert_eq!(lit(&bm), BTreeSet::from([(3, 3)]));
        bm.polygon(&[], 1);
        assert_eq!(lit(&bm).len(), 1);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn unchecked_pixel_panics_past_the_end() {
        let mut bm = Bitmap::new(4, 4, 0).expect("alloc");
        bm.set_pixel(0, 4, 1);
    }
}
