//! IBM VGA in mode 13h (320x200, 256 colours).
//!
//! Mode 13h exposes the whole screen as a linear 64,000-byte window at
//! `A000:0000`, one palette index per pixel, addressed as `y * 320 + x`.
//! Colours come from the DAC (ports $3C7-$3C9), and software that wants
//! tear-free updates polls the retrace bit of input status register $3DA.
//!
//! # Standalone device
//!
//! This crate has no dependencies. Drawing code talks to the display through
//! the [`DeviceSurface`] trait; [`Mode13h`] implements it over plain memory so
//! the same code runs in tests, headless captures and a windowed front end.
//!
//! There is no internal locking. A `Mode13h` shared between threads needs an
//! external `Mutex`.

mod dac;
mod palette;

pub use dac::{DAC_ENTRIES, Dac};
pub use palette::{Palette, Rgb};

/// Screen width in pixels.
pub const SCREEN_WIDTH: usize = 320;
/// Screen height in pixels.
pub const SCREEN_HEIGHT: usize = 200;
/// Size of the visible VRAM window in bytes.
pub const VRAM_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Linear VRAM offset of a screen coordinate.
#[must_use]
pub const fn offset(x: usize, y: usize) -> usize {
    y * SCREEN_WIDTH + x
}

/// The display collaborator the raster code draws onto.
///
/// Implementations provide a 320x200 byte frame addressed `y * 320 + x`,
/// the DAC palette registers, and a vertical-retrace wait.
pub trait DeviceSurface {
    /// The visible frame, exactly [`VRAM_SIZE`] bytes.
    fn vram(&self) -> &[u8];

    fn vram_mut(&mut self) -> &mut [u8];

    /// Program DAC registers from index 0. Entries past 255 are ignored.
    fn apply_palette(&mut self, entries: &[Rgb]);

    /// Program a single DAC register.
    fn apply_colour(&mut self, index: u8, colour: Rgb);

    /// Read DAC registers from index 0 into `out`, up to 256 entries.
    fn read_palette(&self, out: &mut [Rgb]);

    fn read_colour(&self, index: u8) -> Rgb;

    /// Block until the start of the next vertical retrace.
    fn wait_vblank(&mut self);
}

/// In-memory mode 13h display: VRAM, DAC and a retrace counter.
#[derive(Debug, Clone)]
pub struct Mode13h {
    vram: Vec<u8>,
    dac: Dac,
    /// Number of retrace waits so far.
    retraces: u64,
}

impl Mode13h {
    /// A cleared screen with every DAC register black.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vram: vec![0; VRAM_SIZE],
            dac: Dac::new(),
            retraces: 0,
        }
    }

    /// The DAC registers as stored, 6 bits per channel.
    #[must_use]
    pub fn dac(&self) -> &Dac {
        &self.dac
    }

    /// Program the grey/red/green/blue ramp palette.
    pub fn grayscale_palette(&mut self) {
        self.dac.load_grayscale();
    }

    /// Fill the whole screen with one colour index.
    pub fn clear(&mut self, colour: u8) {
        self.vram.fill(colour);
    }

    #[must_use]
    pub fn retrace_count(&self) -> u64 {
        self.retraces
    }

    /// Render the frame as RGBA bytes, four per pixel, for `pixels` frames
    /// and PNG encoders.
    pub fn render_rgba(&self, out: &mut [u8]) {
        for (dst, &index) in out.chunks_exact_mut(4).zip(&self.vram) {
            let argb = self.dac.argb(index);
            dst[0] = (argb >> 16) as u8;
            dst[1] = (argb >> 8) as u8;
            dst[2] = argb as u8;
            dst[3] = 0xFF;
        }
    }
}

impl Default for Mode13h {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceSurface for Mode13h {
    fn vram(&self) -> &[u8] {
        &self.vram
    }

    fn vram_mut(&mut self) -> &mut [u8] {
        &mut self.vram
    }

    fn apply_palette(&mut self, entries: &[Rgb]) {
        self.dac.load(entries);
    }

    fn apply_colour(&mut self, index: u8, colour: Rgb) {
        self.dac.write(index, colour);
    }

    fn read_palette(&self, out: &mut [Rgb]) {
        for (i, entry) in out.iter_mut().take(DAC_ENTRIES).enumerate() {
            *entry = self.dac.read(i as u8);
        }
    }

    fn read_colour(&self, index: u8) -> Rgb {
        self.dac.read(index)
    }

    /// Memory has no beam, so the wait returns at once and is only counted.
    fn wait_vblank(&mut self) {
        self.retraces += 1;
    }
}
