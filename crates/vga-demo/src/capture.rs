//! Headless capture: PNG screenshots and BMP screen dumps.

use std::error::Error;
use std::fs;
use std::io::BufWriter;
use std::path::Path;

use ibm_vga::{Mode13h, SCREEN_HEIGHT, SCREEN_WIDTH, VRAM_SIZE};
use vga_raster::screen;

/// Save the screen as seen through the DAC as a PNG file.
pub fn save_screenshot(vga: &Mode13h, path: &Path) -> Result<(), Box<dyn Error>> {
    let file = fs::File::create(path)?;
    let w = BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    let mut rgba = vec![0u8; VRAM_SIZE * 4];
    vga.render_rgba(&mut rgba);
    writer.write_image_data(&rgba)?;
    Ok(())
}

/// Copy the whole screen and its palette into an 8-bit BMP.
pub fn save_bmp(vga: &Mode13h, path: &Path) -> Result<(), Box<dyn Error>> {
    let shot = screen::copy_region(
        vga,
        0,
        0,
        SCREEN_WIDTH as u16,
        SCREEN_HEIGHT as u16,
        true,
    )?;
    format_bmp::save(&shot, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibm_vga::{DeviceSurface, Rgb};

    #[test]
    fn screenshot_is_a_png() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("shot.png");
        let mut vga = Mode13h::new();
        vga.apply_colour(1, Rgb::WHITE);
        vga.clear(1);

        save_screenshot(&vga, &path).expect("save");
        let bytes = fs::read(&path).expect("read");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn bmp_dump_reloads() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("screen.bmp");
        let mut vga = Mode13h::new();
        vga.grayscale_palette();
        screen::set_pixel(&mut vga, 12, 34, 200).expect("pixel");

        save_bmp(&vga, &path).expect("save");
        let back = format_bmp::load(&path, true).expect("load");
        assert_eq!(back.pixel(12, 34), 200);
        assert_eq!(back.colour(200), Some(vga.read_colour(200)));
    }
}
