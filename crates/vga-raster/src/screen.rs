//! Drawing straight into a [`DeviceSurface`].
//!
//! These share the rasterisers used by [`Bitmap`], but every call checks the
//! shape's footprint against the 320x200 screen first. A shape that does not
//! fit is rejected with an error and nothing is written.

use ibm_vga::{DAC_ENTRIES, DeviceSurface, Palette, Rgb, SCREEN_HEIGHT, SCREEN_WIDTH};
use tracing::debug;

use crate::bitmap::{self, Bitmap, Vertex};
use crate::error::RasterError;
use crate::raster::{self, Target};

fn target<D: DeviceSurface + ?Sized>(device: &mut D) -> Target<'_> {
    Target::new(device.vram_mut(), SCREEN_WIDTH)
}

/// Bounding box check for shapes. All edges inclusive.
fn check_shape(left: isize, top: isize, right: isize, bottom: isize) -> Result<(), RasterError> {
    let fits = left >= 0
        && top >= 0
        && right < SCREEN_WIDTH as isize
        && bottom < SCREEN_HEIGHT as isize;
    if fits {
        Ok(())
    } else {
        debug!(left, top, right, bottom, "shape rejected");
        Err(RasterError::ShapeOutOfBounds {
            left,
            top,
            right,
            bottom,
        })
    }
}

fn check_region(x: usize, y: usize, width: usize, height: usize) -> Result<(), RasterError> {
    if x + width <= SCREEN_WIDTH && y + height <= SCREEN_HEIGHT {
        Ok(())
    } else {
        debug!(x, y, width, height, "region rejected");
        Err(RasterError::RegionOutOfBounds {
            x,
            y,
            width,
            height,
        })
    }
}

fn check_circle(cx: u16, cy: u16, radius: u16) -> Result<(), RasterError> {
    let (cx, cy, r) = (cx as isize, cy as isize, radius as isize);
    check_shape(cx - r, cy - r, cx + r, cy + r)
}

/// Palette index at `(x, y)`, `None` off screen.
#[must_use]
pub fn pixel<D: DeviceSurface + ?Sized>(device: &D, x: u16, y: u16) -> Option<u8> {
    let (x, y) = (usize::from(x), usize::from(y));
    (x < SCREEN_WIDTH && y < SCREEN_HEIGHT).then(|| device.vram()[ibm_vga::offset(x, y)])
}

pub fn set_pixel<D: DeviceSurface + ?Sized>(
    device: &mut D,
    x: u16,
    y: u16,
    colour: u8,
) -> Result<(), RasterError> {
    check_shape(0, 0, x as isize, y as isize)?;
    target(device).plot(x as isize, y as isize, colour);
    Ok(())
}

pub fn line<D: DeviceSurface + ?Sized>(
    device: &mut D,
    x1: u16,
    y1: u16,
    x2: u16,
    y2: u16,
    colour: u8,
) -> Result<(), RasterError> {
    check_shape(0, 0, x1.max(x2) as isize, y1.max(y2) as isize)?;
    target(device).line(x1 as isize, y1 as isize, x2 as isize, y2 as isize, colour);
    Ok(())
}

/// Closed polygon through `vertices`. Every vertex must be on screen.
pub fn polygon<D: DeviceSurface + ?Sized>(
    device: &mut D,
    vertices: &[Vertex],
    colour: u8,
) -> Result<(), RasterError> {
    let right = vertices.iter().map(|v| v.x).max().unwrap_or(0);
    let bottom = vertices.iter().map(|v| v.y).max().unwrap_or(0);
    check_shape(0, 0, right as isize, bottom as isize)?;
    bitmap::polygon(&mut target(device), vertices, colour);
    Ok(())
}

pub fn rect<D: DeviceSurface + ?Sized>(
    device: &mut D,
    left: u16,
    top: u16,
    right: u16,
    bottom: u16,
    colour: u8,
) -> Result<(), RasterError> {
    let (left, top, right, bottom) = raster::normalise(left, top, right, bottom);
    check_shape(0, 0, right as isize, bottom as isize)?;
    target(device).rect(
        usize::from(left),
        usize::from(top),
        usize::from(right),
        usize::from(bottom),
        colour,
    );
    Ok(())
}

pub fn filled_rect<D: DeviceSurface + ?Sized>(
    device: &mut D,
    left: u16,
    top: u16,
    right: u16,
    bottom: u16,
    colour: u8,
) -> Result<(), RasterError> {
    let (left, top, right, bottom) = raster::normalise(left, top, right, bottom);
    check_shape(0, 0, right as isize, bottom as isize)?;
    target(device).filled_rect(
        usize::from(left),
        usize::from(top),
        usize::from(right),
        usize::from(bottom),
        colour,
    );
    Ok(())
}

/// Circle outline. The square `cx ± radius`, `cy ± radius` must be on
/// screen. Radius 0 draws nothing.
pub fn circle<D: DeviceSurface + ?Sized>(
    device: &mut D,
    cx: u16,
    cy: u16,
    radius: u16,
    colour: u8,
) -> Result<(), RasterError> {
    check_circle(cx, cy, radius)?;
    target(device).circle(cx as isize, cy as isize, radius, colour);
    Ok(())
}

pub fn filled_circle<D: DeviceSurface + ?Sized>(
    device: &mut D,
    cx: u16,
    cy: u16,
    radius: u16,
    colour: u8,
) -> Result<(), RasterError> {
    check_circle(cx, cy, radius)?;
    target(device).filled_circle(cx as isize, cy as isize, radius, colour);
    Ok(())
}

pub fn clear<D: DeviceSurface + ?Sized>(device: &mut D, colour: u8) {
    device.vram_mut().fill(colour);
}

/// Copy a `width` x `height` region at `(x, y)` into a new bitmap. With
/// `with_palette` the bitmap also gets the 256 live DAC colours.
pub fn copy_region<D: DeviceSurface + ?Sized>(
    device: &D,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    with_palette: bool,
) -> Result<Bitmap, RasterError> {
    check_region(
        usize::from(x),
        usize::from(y),
        usize::from(width),
        usize::from(height),
    )?;

    let colours = if with_palette { DAC_ENTRIES as u16 } else { 0 };
    let mut bitmap = Bitmap::new(width, height, colours)?;

    if let Some(palette) = bitmap.palette_mut() {
        read_live_palette(device, palette);
    }

    let vram = device.vram();
    for row in 0..height {
        let start = ibm_vga::offset(usize::from(x), usize::from(y + row));
        bitmap
            .row_mut(row)
            .copy_from_slice(&vram[start..start + usize::from(width)]);
    }
    Ok(bitmap)
}

fn read_live_palette<D: DeviceSurface + ?Sized>(device: &D, palette: &mut Palette) {
    let mut live = [Rgb::BLACK; DAC_ENTRIES];
    device.read_palette(&mut live);
    palette.entries_mut().copy_from_slice(&live);
}

/// Copy `bitmap` to the screen with its top-left corner at `(x, y)`.
///
/// With `apply_palette` and a bitmap palette, the DAC is programmed before any
/// pixel is copied. A bitmap that does not fit leaves both VRAM and DAC
/// untouched.
pub fn blit<D: DeviceSurface + ?Sized>(
    device: &mut D,
    bitmap: &Bitmap,
    x: u16,
    y: u16,
    apply_palette: bool,
) -> Result<(), RasterError> {
    check_region(
        usize::from(x),
        usize::from(y),
        usize::from(bitmap.width()),
        usize::from(bitmap.height()),
    )?;

    if apply_palette {
        if let Some(palette) = bitmap.palette() {
            device.apply_palette(palette.entries());
        }
    }

    let width = usize::from(bitmap.width());
    let vram = device.vram_mut();
    for row in 0..bitmap.height() {
        let start = ibm_vga::offset(usize::from(x), usize::from(y + row));
        vram[start..start + width].copy_from_slice(bitmap.row(row));
    }
    Ok(())
}
