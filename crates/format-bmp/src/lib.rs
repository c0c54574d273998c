//! Windows BMP files, 8 bits per pixel, uncompressed.
//!
//! Layout: a 54-byte little-endian header, `num_colors` palette entries of
//! four bytes each (blue, green, red, reserved), then the pixel rows. Rows are
//! stored bottom row first and each is padded with zeros to a multiple of four
//! bytes.
//!
//! Anything else (other depths, RLE, OS/2 headers, top-down images) is
//! rejected as a [`FormatError`]. Files are written with a full 256-colour
//! palette so that any mode 13h screen can be saved and reloaded.

mod error;
pub mod header;

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use ibm_vga::Rgb;
use tracing::{debug, warn};
use vga_raster::Bitmap;

pub use error::{BmpError, ErrorKind, FormatError};
pub use header::BmpHeader;

use header::{PALETTE_ENTRY_SIZE, SAVE_COLOURS, row_padding};

/// Read a BMP from `reader`.
///
/// With `want_palette` the bitmap gets a palette of exactly the declared
/// `num_colors` entries (none when the file declares 0). Otherwise the palette
/// is skipped. On any error nothing is returned; a short stream is an
/// [`BmpError::Io`] with [`io::ErrorKind::UnexpectedEof`].
pub fn decode<R: Read + Seek>(reader: &mut R, want_palette: bool) -> Result<Bitmap, BmpError> {
    let header = BmpHeader::read_from(reader)?;
    let (width, height) = header.validate()?;
    let colours = header.num_colors as u16;

    let padded_row = u64::from(width) + row_padding(width) as u64;
    let palette_bytes = u64::from(header.num_colors * PALETTE_ENTRY_SIZE);
    ensure_remaining(reader, palette_bytes + padded_row * u64::from(height))?;

    let mut bitmap = Bitmap::new(width, height, if want_palette { colours } else { 0 })?;

    match bitmap.palette_mut() {
        Some(palette) => {
            for entry in palette.entries_mut() {
                let mut bgra = [0; 4];
                reader.read_exact(&mut bgra)?;
                *entry = Rgb::new(bgra[2], bgra[1], bgra[0]);
            }
        }
        None => {
            reader.seek_relative(palette_bytes as i64)?;
        }
    }

    let padding = row_padding(width) as i64;
    for row in (0..height).rev() {
        reader.read_exact(bitmap.row_mut(row))?;
        if padding != 0 {
            reader.seek_relative(padding)?;
        }
    }

    debug!(width, height, colours, want_palette, "decoded BMP");
    Ok(bitmap)
}

/// Fail with `UnexpectedEof` unless `needed` bytes follow the current
/// position. Runs before the pixel buffer is allocated.
fn ensure_remaining<R: Seek + ?Sized>(reader: &mut R, needed: u64) -> io::Result<()> {
    let here = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(here))?;
    if end.saturating_sub(here) < needed {
        debug!(available = end.saturating_sub(here), needed, "BMP data truncated");
        return Err(io::ErrorKind::UnexpectedEof.into());
    }
    Ok(())
}

/// Write `bitmap` as a BMP. The bitmap must carry exactly 256 colours;
/// otherwise [`BmpError::PaletteRequired`] is returned and nothing is
/// written.
pub fn encode<W: Write + ?Sized>(bitmap: &Bitmap, writer: &mut W) -> Result<(), BmpError> {
    let palette = require_palette(bitmap)?;

    BmpHeader::for_image(bitmap.width(), bitmap.height()).write_to(writer)?;

    for colour in palette {
        writer.write_all(&[colour.blue, colour.green, colour.red, 0])?;
    }

    let padding = [0u8; 3];
    let padding = &padding[..row_padding(bitmap.width())];
    for row in (0..bitmap.height()).rev() {
        writer.write_all(bitmap.row(row))?;
        writer.write_all(padding)?;
    }

    debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        "encoded BMP"
    );
    Ok(())
}

fn require_palette(bitmap: &Bitmap) -> Result<&[Rgb], BmpError> {
    match bitmap.palette() {
        Some(p) if p.len() == SAVE_COLOURS as usize => Ok(p.entries()),
        other => Err(BmpError::PaletteRequired {
            found: other.map_or(0, ibm_vga::Palette::len),
        }),
    }
}

/// Read a BMP file.
pub fn load(path: impl AsRef<Path>, want_palette: bool) -> Result<Bitmap, BmpError> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let bitmap = decode(&mut reader, want_palette)?;
    debug!(path = %path.display(), "loaded bitmap");
    Ok(bitmap)
}

/// Write `bitmap` to a BMP file.
///
/// The palette is checked before the file is created. If writing fails part
/// way through, the partial file is removed.
pub fn save(bitmap: &Bitmap, path: impl AsRef<Path>) -> Result<(), BmpError> {
    let path = path.as_ref();
    require_palette(bitmap)?;
    write_or_remove(path, |w| encode(bitmap, w))?;
    debug!(path = %path.display(), "saved bitmap");
    Ok(())
}

/// Create `path`, run `write` against it and flush. Any failure after the
/// file exists deletes it again.
fn write_or_remove<F>(path: &Path, write: F) -> Result<(), BmpError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), BmpError>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    let result = write(&mut writer).and_then(|()| writer.flush().map_err(BmpError::from));
    drop(writer);

    if let Err(e) = result {
        warn!(path = %path.display(), error = %e, "removing partially written file");
        if let Err(remove) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %remove, "could not remove partial file");
        }
        return Err(e);
    }
    Ok(())
}

/// [`decode`] from a byte slice.
pub fn decode_bytes(bytes: &[u8], want_palette: bool) -> Result<Bitmap, BmpError> {
    decode(&mut io::Cursor::new(bytes), want_palette)
}

/// [`encode`] into a new byte vector.
pub fn encode_to_vec(bitmap: &Bitmap) -> Result<Vec<u8>, BmpError> {
    let mut out = Vec::new();
    encode(bitmap, &mut out)?;
    Ok(out)
}
