use std::fmt::Display;

use strum::{EnumIter, FromRepr, IntoEnumIterator, IntoStaticStr};

/// A tile map cell, derived from the palette index of one BMP pixel
///
/// | palette index | symbol           | byte   |
/// |---------------|------------------|--------|
/// | `0xFF`        | [`Symbol::Blank`] | `0x00` |
/// | `0x00`        | [`Symbol::Solid`] | `0x01` |
/// | anything else | [`Symbol::Other`] | `0x02` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, FromRepr, IntoStaticStr)]
#[repr(u8)]
pub enum Symbol {
    /// Written for palette index `0xFF`
    #[strum(serialize = "blank")]
    Blank = 0x00,
    /// Written for palette index `0x00`
    #[strum(serialize = "solid")]
    Solid = 0x01,
    /// Written for every other palette index
    #[strum(serialize = "other")]
    Other = 0x02,
}

impl Symbol {
    /// Classifies a raw palette index
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index {
            0xFF => Self::Blank,
            0x00 => Self::Solid,
            _ => Self::Other,
        }
    }
}

impl From<Symbol> for u8 {
    fn from(value: Symbol) -> Self {
        value as Self
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.into())
    }
}

/// Number of cells of each [`Symbol`] in a tile map
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolCounts {
    /// cells holding [`Symbol::Blank`]
    pub blank: usize,
    /// cells holding [`Symbol::Solid`]
    pub solid: usize,
    /// cells holding [`Symbol::Other`]
    pub other: usize,
}

impl SymbolCounts {
    pub(crate) fn tally(symbols: &[u8]) -> Self {
        symbols
            .iter()
            .filter_map(|&b| Symbol::from_repr(b))
            .fold(Self::default(), |mut counts, symbol| {
                *counts.get_mut(symbol) += 1;
                counts
            })
    }

    /// Returns the count for a single symbol
    #[must_use]
    pub const fn get(&self, symbol: Symbol) -> usize {
        match symbol {
            Symbol::Blank => self.blank,
            Symbol::Solid => self.solid,
            Symbol::Other => self.other,
        }
    }

    fn get_mut(&mut self, symbol: Symbol) -> &mut usize {
        match symbol {
            Symbol::Blank => &mut self.blank,
            Symbol::Solid => &mut self.solid,
            Symbol::Other => &mut self.other,
        }
    }
}

impl Display for SymbolCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for symbol in Symbol::iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{symbol}: {}", self.get(symbol))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_table() {
        assert_eq!(Symbol::from_index(0xFF), Symbol::Blank);
        assert_eq!(Symbol::from_index(0x00), Symbol::Solid);
        for index in 0x01..0xFF {
            assert_eq!(Symbol::from_index(index), Symbol::Other, "index {index:#x}");
        }
    }

    #[test]
    fn every_index_maps_into_the_symbol_range() {
        for index in 0..=u8::MAX {
            let byte = u8::from(Symbol::from_index(index));
            assert!(byte <= 0x02);
            assert!(Symbol::from_repr(byte).is_some());
        }
    }

    #[test]
    fn symbol_range_maps_onto_itself() {
        // Reapplying the table to its own output shifts codes rather than fixing them
        let twice: Vec<_> = Symbol::iter()
            .map(|s| Symbol::from_index(s.into()))
            .collect();
        assert_eq!(twice, [Symbol::Solid, Symbol::Other, Symbol::Other]);
    }

    #[test]
    fn counts_display() {
        let counts = SymbolCounts::tally(&[0, 1, 1, 2, 2, 2]);
        assert_eq!(
            counts,
            SymbolCounts {
                blank: 1,
                solid: 2,
                other: 3
            }
        );
        assert_eq!(counts.to_string(), "blank: 1, solid: 2, other: 3");
    }
}
