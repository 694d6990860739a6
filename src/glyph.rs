//! Built-in bitmap fonts: digits `0`–`9` (4×6) and letters `a`–`z` (5×5).
//!
//! Each [`Glyph`] stores one bitmask per row; the most significant of the glyph's
//! `width` bits is the leftmost column. The tables are `static`, built at compile time,
//! and shared read-only by every render.
//!
//! ```rust
//! use matrix_envoy::glyph::{glyph_for, GlyphKind};
//!
//! let five = glyph_for('5').expect("digits are in the atlas");
//! assert_eq!(five.kind(), GlyphKind::Digit);
//! assert!(five.is_set(0, 0));
//! assert!(glyph_for('?').is_none());
//! ```

use crate::matrix::rotation::Rotation;

/// Tallest glyph in the atlas.
const MAX_GLYPH_HEIGHT: usize = 6;

/// Font family a glyph belongs to. Width and height follow from the family.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlyphKind {
    /// 4×6 digit font.
    Digit,
    /// 5×5 letter font.
    Letter,
}

impl GlyphKind {
    /// Columns per glyph.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Digit => 4,
            Self::Letter => 5,
        }
    }

    /// Rows per glyph.
    #[must_use]
    pub const fn height(self) -> usize {
        match self {
            Self::Digit => 6,
            Self::Letter => 5,
        }
    }

    /// Rotation used by [`Renderer::draw_char`](crate::matrix::Renderer::draw_char).
    ///
    /// Both fonts are drawn for a panel mounted a quarter turn counter-clockwise.
    #[must_use]
    pub const fn default_rotation(self) -> Rotation {
        match self {
            Self::Digit | Self::Letter => Rotation::Cw270,
        }
    }
}

/// A fixed-size bitmap for one character.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Glyph {
    character: char,
    kind: GlyphKind,
    rows: [u8; MAX_GLYPH_HEIGHT],
}

impl Glyph {
    const fn digit(character: char, rows: [u8; 6]) -> Self {
        Self {
            character,
            kind: GlyphKind::Digit,
            rows,
        }
    }

    const fn letter(character: char, rows: [u8; 5]) -> Self {
        Self {
            character,
            kind: GlyphKind::Letter,
            rows: [rows[0], rows[1], rows[2], rows[3], rows[4], 0],
        }
    }

    /// The (lowercase) character this glyph draws.
    #[must_use]
    pub const fn character(&self) -> char {
        self.character
    }

    /// Font family.
    #[must_use]
    pub const fn kind(&self) -> GlyphKind {
        self.kind
    }

    /// Columns in this glyph.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.kind.width()
    }

    /// Rows in this glyph.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.kind.height()
    }

    /// Whether the cell at `(row, col)` is lit. Cells outside the glyph are unlit.
    #[must_use]
    pub const fn is_set(&self, row: usize, col: usize) -> bool {
        if row >= self.height() || col >= self.width() {
            return false;
        }
        let shift = self.width() - 1 - col;
        (self.rows[row] >> shift) & 1 == 1
    }

    /// Lit cells as `(row, col)`, row by row.
    pub fn lit_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height())
            .flat_map(move |row| (0..self.width()).map(move |col| (row, col)))
            .filter(|&(row, col)| self.is_set(row, col))
    }
}

/// Digit glyphs indexed by value.
pub static DIGITS: [Glyph; 10] = [
    Glyph::digit('0', [0b0110, 0b1001, 0b1001, 0b1001, 0b1001, 0b0110]),
    Glyph::digit('1', [0b0010, 0b0110, 0b1010, 0b0010, 0b0010, 0b1111]),
    Glyph::digit('2', [0b0110, 0b1001, 0b0001, 0b0010, 0b0100, 0b1111]),
    Glyph::digit('3', [0b1110, 0b0001, 0b0010, 0b0001, 0b1001, 0b0110]),
    Glyph::digit('4', [0b0010, 0b0110, 0b1010, 0b1111, 0b0010, 0b0010]),
    Glyph::digit('5', [0b1111, 0b1000, 0b1110, 0b0001, 0b1001, 0b0110]),
    Glyph::digit('6', [0b0110, 0b1001, 0b1000, 0b1110, 0b1001, 0b0110]),
    Glyph::digit('7', [0b1111, 0b0001, 0b0010, 0b0100, 0b0100, 0b0100]),
    Glyph::digit('8', [0b0110, 0b1001, 0b0110, 0b1001, 0b1001, 0b0110]),
    Glyph::digit('9', [0b0110, 0b1001, 0b1001, 0b0111, 0b0001, 0b0110]),
];

/// Letter glyphs indexed from `'a'`.
pub static LETTERS: [Glyph; 26] = [
    Glyph::letter('a', [0b01110, 0b10001, 0b11111, 0b10001, 0b10001]),
    Glyph::letter('b', [0b11110, 0b10001, 0b11110, 0b10001, 0b11110]),
    Glyph::letter('c', [0b01110, 0b10001, 0b10000, 0b10001, 0b01110]),
    Glyph::letter('d', [0b11110, 0b10001, 0b10001, 0b10001, 0b11110]),
    Glyph::letter('e', [0b11111, 0b10000, 0b11110, 0b10000, 0b11111]),
    Glyph::letter('f', [0b11111, 0b10000, 0b11110, 0b10000, 0b10000]),
    Glyph::letter('g', [0b01110, 0b10000, 0b10011, 0b10001, 0b01110]),
    Glyph::letter('h', [0b10001, 0b10001, 0b11111, 0b10001, 0b10001]),
    Glyph::letter('i', [0b11111, 0b00100, 0b00100, 0b00100, 0b11111]),
    Glyph::letter('j', [0b00011, 0b00001, 0b00001, 0b10001, 0b01110]),
    Glyph::letter('k', [0b10010, 0b10100, 0b11000, 0b11000, 0b10110]),
    Glyph::letter('l', [0b10000, 0b10000, 0b10000, 0b10000, 0b11111]),
    Glyph::letter('m', [0b10001, 0b11011, 0b10101, 0b10001, 0b10001]),
    Glyph::letter('n', [0b10001, 0b11001, 0b10101, 0b10011, 0b10001]),
    Glyph::letter('o', [0b01110, 0b10001, 0b10001, 0b10001, 0b01110]),
    Glyph::letter('p', [0b11110, 0b10001, 0b11110, 0b10000, 0b10000]),
    Glyph::letter('q', [0b01110, 0b10001, 0b10101, 0b10011, 0b01111]),
    Glyph::letter('r', [0b11110, 0b10001, 0b11110, 0b10010, 0b10001]),
    Glyph::letter('s', [0b01111, 0b10000, 0b01110, 0b00001, 0b11110]),
    Glyph::letter('t', [0b11111, 0b00100, 0b00100, 0b00100, 0b00100]),
    Glyph::letter('u', [0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
    Glyph::letter('v', [0b10001, 0b10001, 0b10001, 0b01010, 0b00100]),
    Glyph::letter('w', [0b10001, 0b10001, 0b10101, 0b11011, 0b10001]),
    Glyph::letter('x', [0b10001, 0b01010, 0b00100, 0b01010, 0b10001]),
    Glyph::letter('y', [0b10001, 0b01010, 0b00100, 0b00100, 0b00100]),
    Glyph::letter('z', [0b11111, 0b00010, 0b00100, 0b01000, 0b11111]),
];

/// Look up the glyph for `character`.
///
/// Digits map to the 4×6 font and ASCII letters (either case) to the 5×5 font.
/// Everything else returns `None`; callers draw nothing for it.
#[must_use]
pub fn glyph_for(character: char) -> Option<&'static Glyph> {
    match character {
        '0'..='9' => DIGITS.get(usize::from(character as u8 - b'0')),
        'a'..='z' | 'A'..='Z' => {
            LETTERS.get(usize::from(character.to_ascii_lowercase() as u8 - b'a'))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_in_character_order() {
        for (glyph, expected) in DIGITS.iter().zip('0'..='9') {
            assert_eq!(glyph.character(), expected);
        }
        for (glyph, expected) in LETTERS.iter().zip('a'..='z') {
            assert_eq!(glyph.character(), expected);
        }
    }

    #[test]
    fn rows_fit_their_width() {
        for glyph in DIGITS.iter().chain(LETTERS.iter()) {
            for row in 0..MAX_GLYPH_HEIGHT {
                assert!(u32::from(glyph.rows[row]) < (1 << glyph.width()));
            }
            // Padding rows stay empty.
            for row in glyph.height()..MAX_GLYPH_HEIGHT {
                assert_eq!(glyph.rows[row], 0);
            }
        }
    }

    #[test]
    fn letters_are_case_folded() {
        assert_eq!(glyph_for('Q'), glyph_for('q'));
        assert_eq!(glyph_for('Z').map(Glyph::kind), Some(GlyphKind::Letter));
    }

    #[test]
    fn unknown_characters_have_no_glyph() {
        for character in [' ', '!', '\n', 'é', '中', '/', ':'] {
            assert!(glyph_for(character).is_none(), "{character:?}");
        }
    }

    #[test]
    fn lit_cells_match_bitmap() {
        let one = glyph_for('1').expect("digit");
        let cells: heapless::Vec<(usize, usize), 24> = one.lit_cells().collect();
        assert_eq!(cells.first(), Some(&(0, 2)));
        assert_eq!(cells.len(), 11);
        assert!(!one.is_set(0, 4));
        assert!(!one.is_set(6, 0));
    }
}
