use tracing::trace;

use super::header::{slice_at, to_usize, BmpHeader};
use crate::{map::symbol::Symbol, Error, TileMap};

/// Copies the pixel rows of `raw` into a [`TileMap`], top row first
///
/// BMP rows are stored bottom-up, so output row `r` is read from
/// `pixel_data_offset + pixel_data_size - (r + 1) * (width + padding)`.
/// The `padding` bytes at the end of each stored row are skipped.
///
/// The whole pixel data region must lie inside `raw` before the map is allocated.
pub(crate) fn extract_rows(raw: &[u8], header: &BmpHeader, padding: usize) -> Result<TileMap, Error> {
    let offset = to_usize(header.pixel_data_offset);
    let region = slice_at(raw, offset, to_usize(header.pixel_data_size))?;
    let width = to_usize(header.width);
    let stride = width.saturating_add(padding);

    let mut map = TileMap::empty(header.width, header.height);
    for (row, dst) in (0..header.height).zip(map.rows_mut()) {
        let back = (to_usize(row) + 1).saturating_mul(stride);
        let start = region.len().checked_sub(back).ok_or(Error::OutOfBounds {
            offset,
            length: back,
            buffer_len: raw.len(),
        })?;
        trace!("output row {row} <- source offset {:#x}", offset + start);
        dst.copy_from_slice(slice_at(region, start, width)?);
    }
    Ok(map)
}

/// Replaces every raw palette index in `pixels` with its [`Symbol`] byte
pub(crate) fn remap_in_place(pixels: &mut [u8]) {
    for pixel in pixels {
        *pixel = Symbol::from_index(*pixel).into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: u32, height: u32, pixel_data_size: u32) -> BmpHeader {
        BmpHeader::builder()
            .pixel_data_offset(2)
            .width(width)
            .height(height)
            .bits_per_pixel(8)
            .pixel_data_size(pixel_data_size)
            .build()
    }

    #[test]
    fn rows_are_read_bottom_up() {
        // two prefix bytes, then rows stored bottom first
        let raw = [0xEE, 0xEE, 1, 2, 3, 4, 5, 6];
        let map = extract_rows(&raw, &header(2, 3, 6), 0).unwrap();
        assert_eq!(map.symbols(), [5, 6, 3, 4, 1, 2]);
    }

    #[test]
    fn padding_is_skipped() {
        let raw = [0xEE, 0xEE, 1, 2, 3, 0xAA, 4, 5, 6, 0xAA];
        let map = extract_rows(&raw, &header(3, 2, 8), 1).unwrap();
        assert_eq!(map.symbols(), [4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn truncated_pixel_data_is_out_of_bounds() {
        let raw = [0xEE, 0xEE, 1, 2, 3];
        assert!(matches!(
            extract_rows(&raw, &header(2, 2, 4), 0),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn row_before_pixel_data_is_out_of_bounds() {
        // a stride larger than the data region pushes the second row before the region start
        let raw = [0u8; 16];
        assert!(matches!(
            extract_rows(&raw, &header(2, 3, 6), 2),
            Err(Error::OutOfBounds {
                offset: 2,
                length: 8,
                buffer_len: 16
            })
        ));
    }

    #[test]
    fn huge_geometry_on_tiny_buffer_is_out_of_bounds() {
        let raw = [0u8; 0x36];
        let header = BmpHeader::builder()
            .pixel_data_offset(0x36)
            .width(0xFFFF)
            .height(0xFFFF)
            .bits_per_pixel(8)
            .pixel_data_size(u32::MAX)
            .build();
        assert!(matches!(
            extract_rows(&raw, &header, 0),
            Err(Error::OutOfBounds { offset: 0x36, .. })
        ));
    }

    #[test]
    fn remap_classifies_every_byte() {
        let mut pixels = [0xFF, 0x00, 0x10, 0x01, 0xFE];
        remap_in_place(&mut pixels);
        assert_eq!(pixels, [0x00, 0x01, 0x02, 0x02, 0x02]);
    }
}
