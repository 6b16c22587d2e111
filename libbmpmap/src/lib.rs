//! # libbmpmap
//!
//!
//! This library turns 256-color (8 bits per pixel) BMP images into flat tile map files:
//! one byte per pixel, each byte a [`Symbol`] classifying the pixel's palette index.
//! Maps like these hold background or collision layouts drawn by an artist in any paint program.
//!
//! Only the handful of header fields needed to find the pixel data are read. Everything else in
//! the file (the color table, compression, color space information) is ignored.
//!
//! ### Conversion
//!
//! | palette index | symbol byte |
//! |---------------|-------------|
//! | `0xFF`        | `0x00`      |
//! | `0x00`        | `0x01`      |
//! | anything else | `0x02`      |
//!
//! BMP rows are stored bottom-up with each row padded. The map is written top-down without
//! padding, so a `width` x `height` image always produces exactly `width * height` bytes.
//!
//! ### Limitations
//!
//! - Only 8 bits per pixel is supported. Other depths are rejected.
//! - The compression field is never inspected, so RLE8 files will produce garbage or a bounds error.
//! - Top-down BMPs (negative height) are not supported.
//!
//! ### Usage
//!
//! ```rust,no_run
//! use libbmpmap::{ConvertOptions, TileMap};
//!
//! fn main() -> anyhow::Result<()> {
//!     let map = TileMap::from_bmp_file("level1.bmp", &ConvertOptions::default())?;
//!     println!("{}x{} map: {}", map.width(), map.height(), map.counts());
//!     map.into_file("level1.map")?;
//!     Ok(())
//! }
//! ```
//!
//! Row padding is trusted as found in the header by default. To require that it matches
//! the usual 4-byte row alignment:
//!
//! ```rust
//! use libbmpmap::{convert, ConvertOptions, Error, PaddingPolicy};
//!
//! // A 3x1 image claiming no padding
//! let mut bmp = vec![0u8; 0x36];
//! bmp[0x0A] = 0x36;
//! bmp[0x12] = 3;
//! bmp[0x16] = 1;
//! bmp[0x1C] = 8;
//! bmp[0x22] = 3;
//! bmp.extend([0xFF, 0x00, 0x42]);
//!
//! assert_eq!(convert(&bmp, &ConvertOptions::default()).unwrap().symbols(), [0, 1, 2]);
//!
//! let strict = ConvertOptions::builder().padding(PaddingPolicy::RequireAligned).build();
//! assert!(matches!(convert(&bmp, &strict), Err(Error::PaddingMismatch { .. })));
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

/// Module containing BMP header decoding and the conversion pipeline
pub mod bmp;
mod error;
/// Module containing the converted tile map
pub mod map;

pub use bmp::convert;
pub use bmp::header::{read_le, BmpHeader};
pub use bmp::ConvertOptions;
pub use bmp::PaddingPolicy;
pub use error::Error;
pub use map::symbol::{Symbol, SymbolCounts};
pub use map::TileMap;
