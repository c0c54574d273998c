//! Indexed colour tables.

use std::collections::TryReserveError;

/// An 8-bit-per-channel colour as stored in BMP palettes and bitmaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Grey level with all three channels equal.
    #[must_use]
    pub const fn grey(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

/// A fixed-size table of palette entries.
///
/// The entry count is chosen at creation and never changes. Index `i` maps
/// to DAC register `i` when the palette is applied to a device.
///
/// Out-of-range accesses are not errors: [`get`](Self::get) returns `None`
/// and [`set`](Self::set) does nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Rgb>,
}

impl Palette {
    /// Allocate `count` black entries.
    pub fn new(count: usize) -> Result<Self, TryReserveError> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(count)?;
        entries.resize(count, Rgb::BLACK);
        Ok(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.entries.get(index).copied()
    }

    /// Replace entry `index`. Ignored when `index` is out of range.
    pub fn set(&mut self, index: usize, colour: Rgb) {
        if let Some(entry) = self.entries.get_mut(index) {
            *entry = colour;
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[Rgb] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [Rgb] {
        &mut self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_palette_is_black() {
        let palette = Palette::new(16).expect("alloc");
        assert_eq!(palette.len(), 16);
        assert!(palette.entries().iter().all(|&c| c == Rgb::BLACK));
    }

    #[test]
    fn set_and_get() {
        let mut palette = Palette::new(4).expect("alloc");
        palette.set(2, Rgb::new(10, 20, 30));
        assert_eq!(palette.get(2), Some(Rgb::new(10, 20, 30)));
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut palette = Palette::new(4).expect("alloc");
        palette.set(4, Rgb::WHITE);
        palette.set(1000, Rgb::WHITE);
        assert_eq!(palette.get(4), None);
        assert!(palette.entries().iter().all(|&c| c == Rgb::BLACK));
    }

    #[test]
    fn empty_palette() {
        let palette = Palette::new(0).expect("alloc");
        assert!(palette.is_empty());
        assert_eq!(palette.get(0), None);
    }
}
