pub(crate) mod extract;
pub(crate) mod header;

use crate::{Error, TileMap};
use bon::Builder;
use extract::{extract_rows, remap_in_place};
use header::{BmpHeader, SUPPORTED_BITS_PER_PIXEL};
use strum::{Display, EnumString};
use tracing::{debug, warn};

/// How the row padding derived from the header is checked
#[derive(Default, Debug, Eq, PartialEq, Copy, Clone, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum PaddingPolicy {
    /// Use `(pixel_data_size - width * height) / height` as found
    #[default]
    TrustHeader,
    /// Additionally require the derived padding to match 4-byte row alignment
    RequireAligned,
}

/// Options for [`convert`]
#[derive(Default, Debug, Eq, PartialEq, Copy, Clone, Builder)]
#[non_exhaustive]
pub struct ConvertOptions {
    /// Row padding check, see [`PaddingPolicy`]
    #[builder(default)]
    pub padding: PaddingPolicy,
}

/// Converts the full contents of an 8-bit BMP file into a [`TileMap`]
///
/// Nothing is returned unless every row was extracted and remapped.
///
/// # Errors
///
/// This function will error if:
/// - the header cannot be read from `raw`
/// - the image is not 8 bits per pixel
/// - the width or height is zero
/// - the pixel data size is smaller than `width * height`
/// - the padding does not match 4-byte alignment under [`PaddingPolicy::RequireAligned`]
/// - any row lies outside of `raw`
pub fn convert(raw: &[u8], options: &ConvertOptions) -> Result<TileMap, Error> {
    let header = BmpHeader::parse(raw)?;
    if header.bits_per_pixel != SUPPORTED_BITS_PER_PIXEL {
        return Err(Error::UnsupportedDepth {
            bits_per_pixel: header.bits_per_pixel,
        });
    }

    let padding = header.padding_per_row()?;
    let expected = header.aligned_padding();
    debug!("Row padding: {padding} (aligned: {expected})");
    if padding != expected {
        match options.padding {
            PaddingPolicy::TrustHeader => {
                warn!("header padding {padding} differs from 4-byte alignment {expected}");
            }
            PaddingPolicy::RequireAligned => {
                return Err(Error::PaddingMismatch {
                    derived: padding,
                    expected,
                });
            }
        }
    }

    let mut map = extract_rows(raw, &header, padding)?;
    remap_in_place(map.symbols_mut());
    debug!("Converted {}x{} map: {}", map.width(), map.height(), map.counts());
    Ok(map)
}
