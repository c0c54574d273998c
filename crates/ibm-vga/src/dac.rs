//! VGA DAC colour registers.
//!
//! The DAC holds 256 entries of three 6-bit channels. Software writes
//! 8-bit colours shifted right by two (port $3C9) and reads them back shifted
//! left by two, so the bottom two bits of every channel are lost on a round
//! trip.

use crate::palette::Rgb;

/// Number of DAC registers.
pub const DAC_ENTRIES: usize = 256;

/// Shift between 8-bit colours and 6-bit DAC values.
const COLOUR_SHIFT: u8 = 2;

/// Largest 6-bit channel value.
const CHANNEL_MAX: u8 = 0x3F;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dac {
    /// Raw 6-bit values, one `[r, g, b]` triple per register.
    registers: [[u8; 3]; DAC_ENTRIES],
}

impl Dac {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registers: [[0; 3]; DAC_ENTRIES],
        }
    }

    /// Write an 8-bit colour; the two low bits of each channel are dropped.
    pub fn write(&mut self, index: u8, colour: Rgb) {
        self.registers[usize::from(index)] = [
            colour.red >> COLOUR_SHIFT,
            colour.green >> COLOUR_SHIFT,
            colour.blue >> COLOUR_SHIFT,
        ];
    }

    /// Read a register back as an 8-bit colour (low two bits zero).
    #[must_use]
    pub fn read(&self, index: u8) -> Rgb {
        let [r, g, b] = self.registers[usize::from(index)];
        Rgb::new(r << COLOUR_SHIFT, g << COLOUR_SHIFT, b << COLOUR_SHIFT)
    }

    /// Write raw 6-bit channel values. Values above 63 are masked.
    pub fn write_raw(&mut self, index: u8, r: u8, g: u8, b: u8) {
        self.registers[usize::from(index)] = [r & CHANNEL_MAX, g & CHANNEL_MAX, b & CHANNEL_MAX];
    }

    #[must_use]
    pub fn raw(&self, index: u8) -> [u8; 3] {
        self.registers[usize::from(index)]
    }

    /// Load entries starting at register 0. At most 256 entries are used.
    pub fn load(&mut self, entries: &[Rgb]) {
        for (i, &colour) in entries.iter().take(DAC_ENTRIES).enumerate() {
            self.write(i as u8, colour);
        }
    }

    /// Load the four 64-step ramps: grey, red, green, blue.
    pub fn load_grayscale(&mut self) {
        for i in 0..=CHANNEL_MAX {
            self.write_raw(i, i, i, i);
            self.write_raw(0x40 + i, i, 0, 0);
            self.write_raw(0x80 + i, 0, i, 0);
            self.write_raw(0xC0 + i, 0, 0, i);
        }
    }

    /// Register as ARGB32 for display, expanding 6 bits to the full 8-bit range.
    #[must_use]
    pub fn argb(&self, index: u8) -> u32 {
        let [r, g, b] = self.registers[usize::from(index)];
        0xFF00_0000
            | (u32::from(expand(r)) << 16)
            | (u32::from(expand(g)) << 8)
            | u32::from(expand(b))
    }
}

impl Default for Dac {
    fn default() -> Self {
        Self::new()
    }
}

fn expand(channel: u8) -> u8 {
    (channel << 2) | (channel >> 4)
}
