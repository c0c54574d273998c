//! The 54-byte file + info header.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::FormatError;

pub const MAGIC: [u8; 2] = *b"BM";
/// File header (14) + BITMAPINFOHEADER (40).
pub const HEADER_SIZE: u32 = 54;
pub const INFO_HEADER_SIZE: u32 = 40;
/// Bytes per palette entry: blue, green, red, reserved.
pub const PALETTE_ENTRY_SIZE: u32 = 4;
/// Palette size written on save.
pub const SAVE_COLOURS: u32 = 256;
/// 72 dpi.
pub const PIXELS_PER_METRE: u32 = 0xB12;

/// Bytes of zero padding after a `width`-pixel row.
#[must_use]
pub fn row_padding(width: u16) -> usize {
    (4 - usize::from(width) % 4) % 4
}

/// Header fields in file order. The reserved word is read and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    pub magic: [u8; 2],
    pub file_size: u32,
    pub data_offset: u32,
    pub info_header_size: u32,
    pub width: u32,
    pub height: u32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_m: u32,
    pub y_pixels_per_m: u32,
    pub num_colors: u32,
    pub important_colors: u32,
}

impl BmpHeader {
    /// Header for saving a `width` x `height` image with a 256-colour
    /// palette. The sizes count pixel bytes only, not row padding.
    #[must_use]
    pub fn for_image(width: u16, height: u16) -> Self {
        let pixels = u32::from(width) * u32::from(height);
        let data_offset = HEADER_SIZE + SAVE_COLOURS * PALETTE_ENTRY_SIZE;
        Self {
            magic: MAGIC,
            file_size: data_offset + pixels,
            data_offset,
            info_header_size: INFO_HEADER_SIZE,
            width: u32::from(width),
            height: u32::from(height),
            planes: 1,
            bits_per_pixel: 8,
            compression: 0,
            image_size: pixels,
            x_pixels_per_m: PIXELS_PER_METRE,
            y_pixels_per_m: PIXELS_PER_METRE,
            num_colors: SAVE_COLOURS,
            important_colors: 0,
        }
    }

    pub fn read_from<R: Read + ?Sized>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0; 2];
        r.read_exact(&mut magic)?;
        let file_size = r.read_u32::<LittleEndian>()?;
        let _reserved = r.read_u32::<LittleEndian>()?;
        Ok(Self {
            magic,
            file_size,
            data_offset: r.read_u32::<LittleEndian>()?,
            info_header_size: r.read_u32::<LittleEndian>()?,
            width: r.read_u32::<LittleEndian>()?,
            height: r.read_u32::<LittleEndian>()?,
            planes: r.read_u16::<LittleEndian>()?,
            bits_per_pixel: r.read_u16::<LittleEndian>()?,
            compression: r.read_u32::<LittleEndian>()?,
            image_size: r.read_u32::<LittleEndian>()?,
            x_pixels_per_m: r.read_u32::<LittleEndian>()?,
            y_pixels_per_m: r.read_u32::<LittleEndian>()?,
            num_colors: r.read_u32::<LittleEndian>()?,
            important_colors: r.read_u32::<LittleEndian>()?,
        })
    }

    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.magic)?;
        w.write_u32::<LittleEndian>(self.file_size)?;
        w.write_u32::<LittleEndian>(0)?;
        w.write_u32::<LittleEndian>(self.data_offset)?;
        w.write_u32::<LittleEndian>(self.info_header_size)?;
        w.write_u32::<LittleEndian>(self.width)?;
        w.write_u32::<LittleEndian>(self.height)?;
        w.write_u16::<LittleEndian>(self.planes)?;
        w.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        w.write_u32::<LittleEndian>(self.compression)?;
        w.write_u32::<LittleEndian>(self.image_size)?;
        w.write_u32::<LittleEndian>(self.x_pixels_per_m)?;
        w.write_u32::<LittleEndian>(self.y_pixels_per_m)?;
        w.write_u32::<LittleEndian>(self.num_colors)?;
        w.write_u32::<LittleEndian>(self.important_colors)
    }

    /// Check this is an uncompressed 8-bit image small enough for a bitmap
    /// and return its dimensions.
    pub fn validate(&self) -> Result<(u16, u16), FormatError> {
        if self.magic != MAGIC {
            return Err(FormatError::BadMagic);
        }
        if self.info_header_size != INFO_HEADER_SIZE {
            return Err(FormatError::UnsupportedHeaderSize(self.info_header_size));
        }
        if self.planes != 1 {
            return Err(FormatError::UnsupportedPlanes(self.planes));
        }
        if self.bits_per_pixel != 8 {
            return Err(FormatError::UnsupportedDepth(self.bits_per_pixel));
        }
        if self.compression != 0 {
            return Err(FormatError::Compressed(self.compression));
        }
        if self.num_colors > SAVE_COLOURS {
            return Err(FormatError::TooManyColours(self.num_colors));
        }
        match (u16::try_from(self.width), u16::try_from(self.height)) {
            (Ok(width), Ok(height)) => Ok((width, height)),
            _ => Err(FormatError::TooLarge {
                width: self.width,
                height: self.height,
            }),
        }
    }
}
