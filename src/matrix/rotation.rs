//! Quarter-turn placement of glyph cells.
//!
//! [`Rotation::apply`] maps a glyph-local `(row, col)` to an `(x, y)` offset from the
//! glyph's base coordinate. `width` and `height` are always the glyph's own dimensions,
//! whatever the rotation.
//!
//! ```text
//! None:  (col, row)
//! Cw90:  (height-1-row, col)
//! Cw180: (width-1-col, height-1-row)
//! Cw270: (row, height-1-col)
//! ```
//!
//! Every rotation sends the `width × height` cells to distinct offsets, so no lit cell
//! ever overwrites another.

/// One of four 90° steps applied when placing a glyph.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Upright.
    #[default]
    None,
    /// A quarter turn clockwise.
    Cw90,
    /// A half turn.
    Cw180,
    /// Three quarter turns clockwise.
    Cw270,
}

impl Rotation {
    /// Every rotation, in clockwise order.
    pub const ALL: [Self; 4] = [Self::None, Self::Cw90, Self::Cw180, Self::Cw270];

    /// Offset `(x, y)` of glyph cell `(row, col)` in a `width × height` glyph.
    #[must_use]
    pub const fn apply(self, row: usize, col: usize, width: usize, height: usize) -> (i32, i32) {
        let row = row as i32;
        let col = col as i32;
        let width = width as i32;
        let height = height as i32;
        match self {
            Self::None => (col, row),
            Self::Cw90 => (height - 1 - row, col),
            Self::Cw180 => (width - 1 - col, height - 1 - row),
            Self::Cw270 => (row, height - 1 - col),
        }
    }

    /// The rotation one quarter turn further clockwise.
    #[must_use]
    pub const fn next_cw(self) -> Self {
        match self {
            Self::None => Self::Cw90,
            Self::Cw90 => Self::Cw180,
            Self::Cw180 => Self::Cw270,
            Self::Cw270 => Self::None,
        }
    }
}
