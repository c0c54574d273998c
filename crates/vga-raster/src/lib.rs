//! Raster graphics for VGA mode 13h.
//!
//! [`Bitmap`] is an owned grid of palette indices with an optional palette.
//! The same rasterisers draw lines, rectangles, polygons and circles onto a
//! bitmap or, through [`screen`], straight onto any
//! [`DeviceSurface`](ibm_vga::DeviceSurface). Bitmaps move to and from the
//! screen with [`screen::copy_region`] and [`screen::blit`].
//!
//! On top of that sit a software mouse cursor ([`cursor`]) and text drawn
//! from bitmap font strips ([`font`]).
//!
//! Circles step through one octant with a Q16.16 `sin(acos(x))` table
//! ([`fixed`]) instead of calling trig functions per pixel.

mod bitmap;
pub mod cursor;
mod error;
pub mod fixed;
pub mod font;
mod raster;
pub mod screen;

pub use bitmap::{Bitmap, GLYPH_COUNT, Vertex};
pub use cursor::{Cursor, CursorOverlay, Mouse, MouseState};
pub use error::RasterError;
pub use ibm_vga::{Palette, Rgb};
