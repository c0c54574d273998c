use std::io;

use thiserror::Error;
use vga_raster::RasterError;

/// Why a stream is not a BMP this crate can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("missing 'BM' signature")]
    BadMagic,
    #[error("info header is {0} bytes, expected 40")]
    UnsupportedHeaderSize(u32),
    #[error("{0} colour planes, expected 1")]
    UnsupportedPlanes(u16),
    #[error("{0} bits per pixel, only 8 is supported")]
    UnsupportedDepth(u16),
    #[error("compression method {0}, only uncompressed images are supported")]
    Compressed(u32),
    #[error("{width}x{height} image exceeds 65535 pixels per side")]
    TooLarge { width: u32, height: u32 },
    #[error("palette declares {0} colours, at most 256 allowed")]
    TooManyColours(u32),
}

#[derive(Debug, Error)]
pub enum BmpError {
    #[error("invalid BMP: {0}")]
    Format(#[from] FormatError),

    #[error("BMP I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("saving needs a 256-colour palette, bitmap has {found}")]
    PaletteRequired { found: usize },

    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Broad failure classes, for callers deciding whether to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Allocation,
    Format,
    Io,
    Parameter,
}

impl ErrorKind {
    /// Format and parameter errors fail the same way every time.
    #[must_use]
    pub fn is_permanent(self) -> bool {
        matches!(self, Self::Format | Self::Parameter)
    }
}

impl BmpError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Format(_) => ErrorKind::Format,
            Self::Io(_) => ErrorKind::Io,
            Self::PaletteRequired { .. } => ErrorKind::Parameter,
            Self::Raster(e) if e.is_parameter_error() => ErrorKind::Parameter,
            Self::Raster(_) => ErrorKind::Allocation,
        }
    }
}
