//! The demo screens.

use ibm_vga::{DeviceSurface, Mode13h, Rgb};
use tracing::debug;
use vga_raster::{Bitmap, Mouse, MouseState, RasterError, Vertex, font, screen};

/// Colours cycled through the DAC for painting.
const PAINT_COLOURS: [Rgb; 8] = [
    Rgb::new(0, 0, 0),
    Rgb::new(255, 255, 255),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
];

/// Colour index used by the paint brush.
pub const BRUSH: u8 = 1;

/// Dot grid and one of each primitive.
pub fn shapes(vga: &mut Mode13h) -> Result<(), RasterError> {
    vga.grayscale_palette();

    for x in (10u16..40).step_by(2) {
        for y in (10u16..40).step_by(2) {
            screen::set_pixel(vga, x, y, (x + y) as u8)?;
        }
    }

    screen::line(vga, 50, 50, 60, 70, 1)?;
    screen::rect(vga, 10, 100, 60, 150, 2)?;
    screen::filled_rect(vga, 100, 100, 150, 150, 3)?;
    screen::circle(vga, 200, 100, 20, 4)?;
    screen::filled_circle(vga, 250, 150, 30, 5)?;

    let triangle = [Vertex::new(100, 10), Vertex::new(120, 30), Vertex::new(90, 30)];
    screen::polygon(vga, &triangle, 4)
}

/// Two single glyphs and a three-line string in `font` at row `y`.
pub fn text(vga: &mut Mode13h, font: &Bitmap, y: u16) {
    vga.grayscale_palette();
    let dollar = font::render_char(vga, font, 100, y, b'$', 63);
    let cross = font::render_char(vga, font, 120, y, b'X', 63);
    let last_line = font::render_string(
        vga,
        font,
        10,
        y + 20,
        "This is a test\nof the emergency\nbroadcast system!",
        127,
    );
    debug!(dollar, cross, last_line, "text drawn");
}

/// Show a loaded image with its own palette.
pub fn view(vga: &mut Mode13h, image: &Bitmap) -> Result<(), RasterError> {
    screen::blit(vga, image, 0, 0, true)
}

/// Fill the DAC with the eight paint colours, repeated.
pub fn paint_palette(vga: &mut Mode13h) {
    for i in 0..=255u8 {
        vga.apply_colour(i, PAINT_COLOURS[usize::from(i) % PAINT_COLOURS.len()]);
    }
}

/// Feed one mouse reading into the paint loop: move the cursor, and while
/// the left button is held, plot a brush pixel under the hotspot.
pub fn paint_step(vga: &mut Mode13h, mouse: &mut Mouse, reading: MouseState) {
    mouse.update(vga, reading, true);
    if reading.left {
        mouse.hide(vga);
        // Readings come from the window and may sit on the far edge.
        if let Err(e) = screen::set_pixel(vga, reading.x, reading.y, BRUSH) {
            debug!(%e, "brush off screen");
        }
        mouse.show(vga);
    }
}

/// A scripted diagonal stroke for headless runs.
pub fn paint_stroke(vga: &mut Mode13h, mouse: &mut Mouse) {
    mouse.show(vga);
    for i in 0..100u16 {
        let mut reading = MouseState::at(60 + i * 2, 40 + i);
        reading.left = true;
        paint_step(vga, mouse, reading);
    }
    paint_step(vga, mouse, MouseState::at(160, 100));
}

#[cfg(test)]
mod tests {
    use super::*;
    use vga_raster::Cursor;

    #[test]
    fn shapes_fit_the_screen() {
        let mut vga = Mode13h::new();
        shapes(&mut vga).expect("all shapes on screen");
        assert_eq!(screen::pixel(&vga, 10, 10), Some(20));
        assert_eq!(screen::pixel(&vga, 125, 125), Some(3));
        assert_eq!(screen::pixel(&vga, 250, 150), Some(5));
    }

    #[test]
    fn text_draws_something() {
        let mut vga = Mode13h::new();
        let mut font = Bitmap::new(95 * 6, 9, 0).expect("alloc");
        font.pixels_mut().fill(1);
        text(&mut vga, &font, 10);
        assert_eq!(screen::pixel(&vga, 100, 10), Some(63));
        assert_eq!(screen::pixel(&vga, 10, 30), Some(127));
    }

    #[test]
    fn paint_leaves_strokes_but_no_cursor_trail() {
        let mut vga = Mode13h::new();
        paint_palette(&mut vga);
        let mut mouse = Mouse::new(Cursor::CROSS);
        paint_stroke(&mut vga, &mut mouse);
        mouse.hide(&mut vga);

        assert_eq!(screen::pixel(&vga, 60, 40), Some(BRUSH));
        assert_eq!(screen::pixel(&vga, 258, 139), Some(BRUSH));
        let painted = vga.vram().iter().filter(|&&p| p != 0).count();
        assert_eq!(painted, 100);
    }

    #[test]
    fn brush_past_the_edge_paints_nothing() {
        let mut vga = Mode13h::new();
        let mut mouse = Mouse::new(Cursor::POINTER);
        let mut reading = MouseState::at(320, 100);
        reading.left = true;
        paint_step(&mut vga, &mut mouse, reading);
        mouse.hide(&mut vga);

        assert_eq!(mouse.state(), &reading);
        assert!(vga.vram().iter().all(|&p| p == 0));
    }

    #[test]
    fn paint_palette_repeats_every_eight() {
        let mut vga = Mode13h::new();
        paint_palette(&mut vga);
        assert_eq!(vga.read_colour(2), vga.read_colour(10));
        assert_eq!(vga.read_colour(1), Rgb::new(252, 252, 252));
    }
}
