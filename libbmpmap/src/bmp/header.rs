use std::fmt::Display;

use bon::Builder;
use nom::{bytes::complete::take, sequence::pair};
use tracing::debug;

use crate::Error;

/// Offset of the pixel data offset field (`bfOffBits`)
pub const PIXEL_DATA_OFFSET_FIELD: usize = 0x0A;
/// Offset of the image width field (`biWidth`)
pub const WIDTH_FIELD: usize = 0x12;
/// Offset of the image height field (`biHeight`)
pub const HEIGHT_FIELD: usize = 0x16;
/// Offset of the bits per pixel field (`biBitCount`)
pub const BITS_PER_PIXEL_FIELD: usize = 0x1C;
/// Offset of the pixel data size field (`biSizeImage`)
pub const PIXEL_DATA_SIZE_FIELD: usize = 0x22;

/// The only pixel depth this crate converts
pub const SUPPORTED_BITS_PER_PIXEL: u32 = 8;

/// Returns the `length` bytes of `buf` starting at `offset`
///
/// Every read of the source buffer goes through here.
///
/// # Errors
///
/// Returns [`Error::OutOfBounds`] if any part of the range lies past the end of `buf`
pub(crate) fn slice_at(buf: &[u8], offset: usize, length: usize) -> Result<&[u8], Error> {
    pair(take(offset), take(length))(buf)
        .map(|(_, (_, bytes))| bytes)
        .map_err(|_: nom::Err<nom::error::Error<&[u8]>>| Error::OutOfBounds {
            offset,
            length,
            buffer_len: buf.len(),
        })
}

/// Interprets `length` bytes of `buf` starting at `offset` as an unsigned little-endian integer
///
/// # Errors
///
/// - [`Error::InvalidFieldLength`] if `length` is not between 1 and 4
/// - [`Error::OutOfBounds`] if `offset + length` exceeds the length of `buf`
pub fn read_le(buf: &[u8], offset: usize, length: usize) -> Result<u32, Error> {
    if !(1..=4).contains(&length) {
        return Err(Error::InvalidFieldLength(length));
    }
    let bytes = slice_at(buf, offset, length)?;
    Ok(bytes
        .iter()
        .enumerate()
        .fold(0, |sum, (i, &byte)| sum + (u32::from(byte) << (8 * i))))
}

pub(crate) fn to_usize(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// The subset of a BMP file header needed to locate 8-bit pixel data
///
/// ## Note
///
/// Only [`BmpHeader::bits_per_pixel`] and the geometry are validated, and only when
/// converting. The remaining fields are taken as found in the file.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Builder)]
#[non_exhaustive]
pub struct BmpHeader {
    /// Byte offset where the pixel data begins (offset `0x0A`)
    #[builder(default)]
    pub pixel_data_offset: u32,
    /// Image width in pixels (offset `0x12`)
    #[builder(default)]
    pub width: u32,
    /// Image height in pixels (offset `0x16`)
    #[builder(default)]
    pub height: u32,
    /// Bits per pixel (offset `0x1C`, 2 bytes)
    #[builder(default)]
    pub bits_per_pixel: u32,
    /// Byte length of the pixel data including row padding (offset `0x22`)
    #[builder(default)]
    pub pixel_data_size: u32,
}

impl BmpHeader {
    /// Decodes the header fields from the start of a BMP file
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `buf` is too short to hold the header fields
    pub fn parse(buf: &[u8]) -> Result<Self, Error> {
        let header = Self {
            pixel_data_offset: read_le(buf, PIXEL_DATA_OFFSET_FIELD, 4)?,
            width: read_le(buf, WIDTH_FIELD, 4)?,
            height: read_le(buf, HEIGHT_FIELD, 4)?,
            bits_per_pixel: read_le(buf, BITS_PER_PIXEL_FIELD, 2)?,
            pixel_data_size: read_le(buf, PIXEL_DATA_SIZE_FIELD, 4)?,
        };
        debug!("Parsed BMP header: {:?}", &header);
        Ok(header)
    }

    /// Returns `width * height`
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateGeometry`] if either dimension is zero or the product overflows
    pub fn pixel_count(&self) -> Result<usize, Error> {
        let degenerate = || Error::DegenerateGeometry {
            width: self.width,
            height: self.height,
        };
        if self.width == 0 || self.height == 0 {
            return Err(degenerate());
        }
        to_usize(self.width)
            .checked_mul(to_usize(self.height))
            .ok_or_else(degenerate)
    }

    /// Returns the number of filler bytes after each row, derived as
    /// `(pixel_data_size - width * height) / height`
    ///
    /// # Errors
    ///
    /// - [`Error::DegenerateGeometry`] if the width or height is zero
    /// - [`Error::PixelDataTooSmall`] if `pixel_data_size < width * height`
    pub fn padding_per_row(&self) -> Result<usize, Error> {
        let pixel_count = self.pixel_count()?;
        let spare = to_usize(self.pixel_data_size)
            .checked_sub(pixel_count)
            .ok_or(Error::PixelDataTooSmall {
                pixel_data_size: self.pixel_data_size,
                pixel_count,
            })?;
        Ok(spare / to_usize(self.height))
    }

    /// Returns the padding needed to align a row of [`Self::width`] bytes to 4 bytes
    #[must_use]
    pub const fn aligned_padding(&self) -> usize {
        ((4 - self.width % 4) % 4) as usize
    }
}

impl Display for BmpHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "pixel data offset: {:#x}", self.pixel_data_offset)?;
        writeln!(f, "width:             {}", self.width)?;
        writeln!(f, "height:            {}", self.height)?;
        writeln!(f, "bits per pixel:    {}", self.bits_per_pixel)?;
        write!(f, "pixel data size:   {}", self.pixel_data_size)
    }
}
