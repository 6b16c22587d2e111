#![allow(clippy::module_name_repetitions)]

pub(crate) mod symbol;

use crate::{
    bmp::{convert, header::to_usize, ConvertOptions},
    Error,
};
use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
};
use symbol::{Symbol, SymbolCounts};
use tracing::{debug, info, warn};

/// Flat tile map converted from an 8-bit BMP: one [`Symbol`] byte per pixel,
/// row-major from the top-left corner
#[derive(Debug, Clone, Eq, PartialEq, PartialOrd, Ord)]
pub struct TileMap {
    /// The width of the map
    width: u32,
    /// The height of the map
    height: u32,
    /// Symbol bytes, `width * height` long
    symbols: Vec<u8>,
}

impl TileMap {
    /// Creates a zeroed [`TileMap`]
    ///
    /// Callers must have validated that `width * height` is non-zero and fits in memory.
    pub(crate) fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            symbols: vec![0; to_usize(width) * to_usize(height)],
        }
    }

    /// Returns the width of the map
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the map
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the symbol bytes of the map
    #[must_use]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub(crate) fn symbols_mut(&mut self) -> &mut [u8] {
        &mut self.symbols
    }

    /// Consumes the map, returning the symbol bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.symbols
    }

    /// Returns an iterator over the rows of the map, top row first
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.symbols.chunks_exact(to_usize(self.width))
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
        self.symbols.chunks_exact_mut(to_usize(self.width))
    }

    /// Returns the symbol at column `x` of row `y`, counted from the top-left corner
    #[must_use]
    pub fn symbol_at(&self, x: u32, y: u32) -> Option<Symbol> {
        if x < self.width && y < self.height {
            let index = to_usize(y) * to_usize(self.width) + to_usize(x);
            Symbol::from_repr(self.symbols[index])
        } else {
            None
        }
    }

    /// Counts the cells holding each [`Symbol`]
    #[must_use]
    pub fn counts(&self) -> SymbolCounts {
        SymbolCounts::tally(&self.symbols)
    }

    /// Reads a whole BMP from `r` and converts it
    ///
    /// # Errors
    ///
    /// This function errors if the reader fails, or for any of the reasons listed in [`convert`]
    pub fn from_bmp_reader(mut r: impl Read, options: &ConvertOptions) -> Result<Self, Error> {
        let mut raw = Vec::new();
        let read = r.read_to_end(&mut raw)?;
        debug!("read {read} bytes of bmp data");
        convert(&raw, options)
    }

    /// Tries to read and convert the BMP at the provided file path
    ///
    /// # Errors
    ///
    /// This function will error if the file cannot be read or if it contains invalid data.
    /// See [`convert`] for potential errors
    pub fn from_bmp_file<P: AsRef<Path>>(filename: P, options: &ConvertOptions) -> Result<Self, Error> {
        let raw = fs::read(filename.as_ref())?;
        debug!("read {} bytes from {}", raw.len(), filename.as_ref().display());
        convert(&raw, options)
    }

    /// Writes the symbol bytes, and nothing else, to `w`
    ///
    /// # Errors
    ///
    /// This will error if the writer fails
    pub fn write_to(&self, mut w: impl Write) -> Result<(), Error> {
        w.write_all(&self.symbols)?;
        w.flush()?;
        Ok(())
    }

    /// Saves the map at the provided path
    ///
    /// The bytes are first written to a sibling `.part` file which is then renamed over
    /// `filename`, so a failed write never leaves a truncated map behind.
    ///
    /// # Errors
    ///
    /// This will error if unable to create, write, or rename the file
    pub fn into_file(self, filename: impl AsRef<Path>) -> Result<(), Error> {
        let filename = filename.as_ref();
        let part = part_path(filename);
        let written = self
            .write_part(&part)
            .and_then(|()| fs::rename(&part, filename));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&part) {
                warn!("unable to remove {}: {cleanup}", part.display());
            }
            return Err(e.into());
        }
        info!(
            "Wrote {}x{} map to {}",
            self.width,
            self.height,
            filename.display()
        );
        Ok(())
    }

    fn write_part(&self, part: &Path) -> io::Result<()> {
        let f = File::options()
            .create(true)
            .write(true)
            .truncate(true)
            .open(part)?;
        let mut f = BufWriter::new(f);
        f.write_all(&self.symbols)?;
        f.into_inner().map_err(io::IntoInnerError::into_error)?.sync_all()
    }
}

fn part_path(filename: &Path) -> PathBuf {
    let mut name = filename
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".part");
    filename.with_file_name(name)
}
