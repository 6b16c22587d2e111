#![allow(dead_code)]

use image::{codecs::bmp::BmpEncoder, ExtendedColorType, GrayImage};

pub const FILE_HEADER_LEN: usize = 14;
pub const INFO_HEADER_LEN: usize = 40;
pub const PALETTE_LEN: usize = 256 * 4;

/// Builds an uncompressed BMP with a 256 entry grayscale palette
///
/// `rows` are given top row first, the way they should come out of the converter
pub fn bmp_8bit(width: u32, rows: &[&[u8]], padding: usize) -> Vec<u8> {
    let height = u32::try_from(rows.len()).expect("too many rows");
    let stride = width as usize + padding;
    let pixel_data_size = u32::try_from(stride * rows.len()).expect("image too large");
    let offset = FILE_HEADER_LEN + INFO_HEADER_LEN + PALETTE_LEN;

    let mut bmp = Vec::with_capacity(offset + stride * rows.len());
    bmp.extend_from_slice(b"BM");
    bmp.extend_from_slice(&(offset as u32 + pixel_data_size).to_le_bytes());
    bmp.extend_from_slice(&[0; 4]);
    bmp.extend_from_slice(&(offset as u32).to_le_bytes());

    bmp.extend_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
    bmp.extend_from_slice(&width.to_le_bytes());
    bmp.extend_from_slice(&height.to_le_bytes());
    bmp.extend_from_slice(&1u16.to_le_bytes());
    bmp.extend_from_slice(&8u16.to_le_bytes());
    bmp.extend_from_slice(&0u32.to_le_bytes());
    bmp.extend_from_slice(&pixel_data_size.to_le_bytes());
    bmp.extend_from_slice(&[0; 16]);

    for i in 0..=255u8 {
        bmp.extend_from_slice(&[i, i, i, 0]);
    }

    for row in rows.iter().rev() {
        assert_eq!(row.len(), width as usize);
        bmp.extend_from_slice(row);
        bmp.extend(std::iter::repeat(0xCC).take(padding));
    }
    bmp
}

/// Overwrites the 2 byte bits per pixel field
pub fn set_bits_per_pixel(bmp: &mut [u8], bits_per_pixel: u16) {
    bmp[0x1C..0x1E].copy_from_slice(&bits_per_pixel.to_le_bytes());
}

/// Overwrites a 4 byte header field
pub fn set_u32(bmp: &mut [u8], offset: usize, value: u32) {
    bmp[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Encodes a grayscale image with the `image` crate, which writes L8 as an 8-bit paletted BMP
pub fn encode_gray(img: &GrayImage) -> anyhow::Result<Vec<u8>> {
    let mut bmp = Vec::new();
    BmpEncoder::new(&mut bmp).encode(
        img.as_raw(),
        img.width(),
        img.height(),
        ExtendedColorType::L8,
    )?;
    Ok(bmp)
}
