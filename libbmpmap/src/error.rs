use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
/// Possible `libbmpmap` errors
pub enum Error {
    /// Error returned if the bitmap is not 8 bits per pixel (256 colors)
    #[error("needs to be 256 colors: expected 8 bits per pixel, found {bits_per_pixel}")]
    UnsupportedDepth {
        /// bits per pixel read from the header
        bits_per_pixel: u32,
    },
    /// Error returned if the header describes an image with no pixels,
    /// or one whose pixel count does not fit in memory
    #[error("degenerate image geometry: width {width}, height {height}")]
    DegenerateGeometry {
        /// header width
        width: u32,
        /// header height
        height: u32,
    },
    /// Error returned if the pixel data region is smaller than `width * height`
    #[error("pixel data size {pixel_data_size} is smaller than the pixel count {pixel_count}")]
    PixelDataTooSmall {
        /// pixel data size read from the header
        pixel_data_size: u32,
        /// `width * height`
        pixel_count: usize,
    },
    /// Error returned in strict mode if the padding derived from the header
    /// does not match 4-byte row alignment
    #[error("row padding derived from header ({derived}) does not match 4-byte alignment ({expected})")]
    PaddingMismatch {
        /// padding computed from the header fields
        derived: usize,
        /// padding required by 4-byte row alignment
        expected: usize,
    },
    /// Error returned if a read would fall outside the source buffer
    #[error("read of {length} bytes at offset {offset} is out of bounds for a buffer of {buffer_len} bytes")]
    OutOfBounds {
        /// start of the read
        offset: usize,
        /// number of bytes requested
        length: usize,
        /// length of the source buffer
        buffer_len: usize,
    },
    /// Error returned if a header field is read with a width other than 1 to 4 bytes
    #[error("header fields are 1 to 4 bytes long, requested {0}")]
    InvalidFieldLength(usize),
    /// Error returned if the source cannot be read or the sink cannot be written
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}
