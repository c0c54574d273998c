//! Software mouse cursor.
//!
//! Mode 13h has no hardware sprite, so the cursor is drawn into VRAM. Before
//! each cell is overwritten the pixel under it is saved, and hiding the
//! cursor puts those pixels back. Callers pair [`CursorOverlay::show`] and
//! [`CursorOverlay::hide`] at the same position; drawing underneath a shown
//! cursor is lost when it is hidden.

use ibm_vga::{DeviceSurface, SCREEN_HEIGHT, SCREEN_WIDTH};

pub const CURSOR_WIDTH: usize = 12;
pub const CURSOR_HEIGHT: usize = 12;
const CELLS: usize = CURSOR_WIDTH * CURSOR_HEIGHT;

// Button bits in the INT 33h status word.
const BUTTON_LEFT: u16 = 1 << 0;
const BUTTON_RIGHT: u16 = 1 << 1;
const BUTTON_MIDDLE: u16 = 1 << 2;

/// A 12x12 cursor image. Zero cells are transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub hotspot_x: u16,
    pub hotspot_y: u16,
    pub image: [u8; CELLS],
}

#[rustfmt::skip]
const CROSS_IMAGE: [u8; CELLS] = [
    0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0,
    1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const POINTER_IMAGE: [u8; CELLS] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 2, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0,
    0, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0,
    0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 1, 1, 0, 1, 0, 0, 0, 0, 0, 0,
    0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

impl Cursor {
    /// Crosshair centred on its hotspot.
    pub const CROSS: Self = Self {
        hotspot_x: 6,
        hotspot_y: 6,
        image: CROSS_IMAGE,
    };

    /// Arrow with its tip (colour 2) on the hotspot.
    pub const POINTER: Self = Self {
        hotspot_x: 1,
        hotspot_y: 1,
        image: POINTER_IMAGE,
    };
}

impl Default for Cursor {
    fn default() -> Self {
        Self::POINTER
    }
}

/// Position and button state in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseState {
    pub x: u16,
    pub y: u16,
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl MouseState {
    /// No buttons held.
    #[must_use]
    pub const fn at(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            left: false,
            right: false,
            middle: false,
        }
    }

    /// Decode an INT 33h function 3 reading: `cx` is 0..640 and is halved to
    /// screen pixels, `dx` is already 0..200, `bx` holds the button bits.
    #[must_use]
    pub const fn from_driver(cx: u16, dx: u16, bx: u16) -> Self {
        Self {
            x: cx >> 1,
            y: dx,
            left: bx & BUTTON_LEFT != 0,
            right: bx & BUTTON_RIGHT != 0,
            middle: bx & BUTTON_MIDDLE != 0,
        }
    }
}

/// A cursor image plus the pixels it currently covers.
#[derive(Debug, Clone)]
pub struct CursorOverlay {
    cursor: Cursor,
    under: [u8; CELLS],
}

impl CursorOverlay {
    #[must_use]
    pub fn new(cursor: Cursor) -> Self {
        Self {
            cursor,
            under: [0; CELLS],
        }
    }

    #[must_use]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Screen offsets of the on-screen cells, paired with their cell index.
    fn cells(&self, mouse: &MouseState) -> impl Iterator<Item = (usize, usize)> + use<> {
        let left = mouse.x as isize - self.cursor.hotspot_x as isize;
        let top = mouse.y as isize - self.cursor.hotspot_y as isize;
        (0..CELLS).filter_map(move |cell| {
            let x = left + (cell % CURSOR_WIDTH) as isize;
            let y = top + (cell / CURSOR_WIDTH) as isize;
            let on_screen = (0..SCREEN_WIDTH as isize).contains(&x)
                && (0..SCREEN_HEIGHT as isize).contains(&y);
            on_screen.then(|| (cell, ibm_vga::offset(x as usize, y as usize)))
        })
    }

    /// Save what is under the cursor, then draw its non-zero cells.
    pub fn show<D: DeviceSurface + ?Sized>(&mut self, device: &mut D, mouse: &MouseState) {
        let vram = device.vram_mut();
        for (cell, offset) in self.cells(mouse) {
            self.under[cell] = vram[offset];
            let colour = self.cursor.image[cell];
            if colour != 0 {
                vram[offset] = colour;
            }
        }
    }

    /// Wait for retrace, then put the saved pixels back.
    pub fn hide<D: DeviceSurface + ?Sized>(&mut self, device: &mut D, mouse: &MouseState) {
        device.wait_vblank();
        let vram = device.vram_mut();
        for (cell, offset) in self.cells(mouse) {
            vram[offset] = self.under[cell];
        }
    }
}

/// Mouse context: the last reading and the cursor drawn at it.
#[derive(Debug, Clone)]
pub struct Mouse {
    state: MouseState,
    overlay: CursorOverlay,
}

impl Mouse {
    #[must_use]
    pub fn new(cursor: Cursor) -> Self {
        Self {
            state: MouseState::default(),
            overlay: CursorOverlay::new(cursor),
        }
    }

    #[must_use]
    pub fn state(&self) -> &MouseState {
        &self.state
    }

    /// Draw the cursor at the current position.
    pub fn show<D: DeviceSurface + ?Sized>(&mut self, device: &mut D) {
        self.overlay.show(device, &self.state);
    }

    /// Remove the cursor from the current position.
    pub fn hide<D: DeviceSurface + ?Sized>(&mut self, device: &mut D) {
        self.overlay.hide(device, &self.state);
    }

    /// Take a new reading. With `show`, the cursor is hidden at the old
    /// position and redrawn at the new one; otherwise only the state moves.
    pub fn update<D: DeviceSurface + ?Sized>(
        &mut self,
        device: &mut D,
        reading: MouseState,
        show: bool,
    ) {
        if show {
            self.hide(device);
        }
        self.state = reading;
        if show {
            self.show(device);
        }
    }
}
