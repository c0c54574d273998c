//! Text from bitmap font strips.
//!
//! A font is an ordinary [`Bitmap`] holding the 95 printable ASCII glyphs
//! side by side, space first. Each glyph is `width / 95` pixels wide and the
//! full bitmap height tall. Any non-zero font pixel is drawn in the requested
//! colour; zero pixels are transparent.

use ibm_vga::{DeviceSurface, SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::bitmap::{Bitmap, GLYPH_COUNT};

const FIRST_GLYPH: u8 = b' ';

/// Draw one character with its top-left corner at `(x, y)`.
///
/// Returns the glyph width, or 0 when nothing was drawn: the font has no
/// glyph width, `ch` is not printable ASCII, or the glyph would run past the
/// right or bottom screen edge.
#[must_use = "a zero width means nothing was drawn"]
pub fn render_char<D: DeviceSurface + ?Sized>(
    device: &mut D,
    font: &Bitmap,
    x: u16,
    y: u16,
    ch: u8,
    colour: u8,
) -> u16 {
    let glyph_width = font.glyph_width();
    let Some(index) = ch.checked_sub(FIRST_GLYPH) else {
        return 0;
    };
    let fits = usize::from(x) + usize::from(glyph_width) <= SCREEN_WIDTH
        && usize::from(y) + usize::from(font.height()) <= SCREEN_HEIGHT;
    if glyph_width == 0 || u16::from(index) >= GLYPH_COUNT || !fits {
        return 0;
    }

    let first_column = usize::from(index) * usize::from(glyph_width);
    let vram = device.vram_mut();
    for row in 0..font.height() {
        let glyph = &font.row(row)[first_column..first_column + usize::from(glyph_width)];
        let start = ibm_vga::offset(usize::from(x), usize::from(y + row));
        for (dst, &src) in vram[start..].iter_mut().zip(glyph) {
            if src != 0 {
                *dst = colour;
            }
        }
    }
    glyph_width
}

/// Draw `text` starting at `(x, y)`.
///
/// `\n` returns to column `x` one font height lower and `\r` is skipped.
/// Characters that cannot be drawn take no space. Returns the width of the
/// last line.
#[must_use]
pub fn render_string<D: DeviceSurface + ?Sized>(
    device: &mut D,
    font: &Bitmap,
    x: u16,
    y: u16,
    text: &str,
    colour: u8,
) -> u16 {
    let mut cursor_x = x;
    let mut cursor_y = y;
    for ch in text.bytes() {
        match ch {
            b'\n' => {
                cursor_x = x;
                cursor_y = cursor_y.saturating_add(font.height());
            }
            b'\r' => {}
            _ => {
                cursor_x += render_char(device, font, cursor_x, cursor_y, ch, colour);
            }
        }
    }
    cursor_x - x
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibm_vga::Mode13h;

    /// A 2x3 font where each glyph is a solid block except its top-right
    /// pixel.
    fn block_font() -> Bitmap {
        let mut font = Bitmap::new(2 * GLYPH_COUNT, 3, 0).expect("alloc");
        font.pixels_mut().fill(1);
        for glyph in 0..GLYPH_COUNT {
            font.set_pixel(glyph * 2 + 1, 0, 0);
        }
        font
    }

    fn lit(vga: &Mode13h) -> usize {
        vga.vram().iter().filter(|&&p| p != 0).count()
    }

    #[test]
    fn char_draws_glyph_in_colour() {
        let mut vga = Mode13h::new();
        let font = block_font();
        assert_eq!(render_char(&mut vga, &font, 10, 20, b'A', 7), 2);
        assert_eq!(vga.vram()[ibm_vga::offset(10, 20)], 7);
        assert_eq!(vga.vram()[ibm_vga::offset(11, 20)], 0);
        assert_eq!(vga.vram()[ibm_vga::offset(11, 22)], 7);
        assert_eq!(lit(&vga), 5);
    }

    #[test]
    fn unprintable_chars_draw_nothing() {
        let mut vga = Mode13h::new();
        let font = block_font();
        assert_eq!(render_char(&mut vga, &font, 0, 0, 0x01, 7), 0);
        assert_eq!(render_char(&mut vga, &font, 0, 0, 0x7F, 7), 0);
        assert_eq!(render_char(&mut vga, &font, 0, 0, 0xC3, 7), 0);
        assert_eq!(lit(&vga), 0);
    }

    #[test]
    fn narrow_bitmap_is_not_a_font() {
        let mut vga = Mode13h::new();
        let mut font = Bitmap::new(94, 8, 0).expect("alloc");
        font.pixels_mut().fill(1);
        assert_eq!(render_char(&mut vga, &font, 0, 0, b'!', 7), 0);
        assert_eq!(lit(&vga), 0);
    }

    #[test]
    fn glyph_must_fit_on_screen() {
        let mut vga = Mode13h::new();
        let font = block_font();
        assert_eq!(render_char(&mut vga, &font, 318, 197, b'#', 7), 2);
        assert_eq!(render_char(&mut vga, &font, 319, 0, b'#', 7), 0);
        assert_eq!(render_char(&mut vga, &font, 0, 198, b'#', 7), 0);
        assert_eq!(lit(&vga), 5);
    }

    #[test]
    fn string_width_and_line_advance() {
        let mut vga = Mode13h::new();
        let font = block_font();
        assert_eq!(render_string(&mut vga, &font, 4, 4, "a\nb", 7), 2);
        // 'a' on the first line, 'b' one font height lower
        assert_eq!(vga.vram()[ibm_vga::offset(4, 4)], 7);
        assert_eq!(vga.vram()[ibm_vga::offset(4, 7)], 7);
        assert_eq!(vga.vram()[ibm_vga::offset(6, 4)], 0);
    }

    #[test]
    fn carriage_return_is_ignored() {
        let mut with_cr = Mode13h::new();
        let mut without = Mode13h::new();
        let font = block_font();
        let a = render_string(&mut with_cr, &font, 0, 0, "ab\r\ncd", 3);
        let b = render_string(&mut without, &font, 0, 0, "ab\ncd", 3);
        assert_eq!(a, 4);
        assert_eq!(a, b);
        assert_eq!(with_cr.vram(), without.vram());
    }

    #[test]
    fn empty_string_has_no_width() {
        let mut vga = Mode13h::new();
        assert_eq!(render_string(&mut vga, &block_font(), 9, 9, "", 1), 0);
    }
}
