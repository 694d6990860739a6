//! Matrix geometry and wiring: how a logical `(x, y)` becomes a chain index.
//!
//! A [`Grid`] fixes the panel size and how many panels are chained. An [`Addressing`]
//! fixes how the chain snakes through them. Both are chosen once, at configuration
//! time, and never change per call.
//!
//! Two conventions are supported:
//!
//! - [`Addressing::RowMajor`]: 0-based, `index = y * width + x`. Panels stack vertically,
//!   so the logical extent is `width × (height * panel_count)`.
//! - [`Addressing::ColumnMajorFlipped`]: 1-based, for chains wired column-first and
//!   entering from the right edge. Slot `((width + 1 - x) - 1) * height + y` is 1-based, so
//!   the buffer index is one less. Panels chain horizontally, so the logical extent is
//!   `(width * panel_count) × height`.
//!
//! ```text
//! RowMajor, 3×2:          ColumnMajorFlipped, 3×2 (x, y are 1-based):
//!   LED0  LED1  LED2        LED4  LED2  LED0
//!   LED3  LED4  LED5        LED5  LED3  LED1
//! ```
//!
//! ```rust
//! use matrix_envoy::matrix::layout::{Addressing, Grid};
//!
//! const GRID: Grid = Grid::new(3, 2, 1);
//! assert_eq!(Addressing::RowMajor.index(&GRID, 1, 1), Some(4));
//! assert_eq!(Addressing::ColumnMajorFlipped.index(&GRID, 1, 1), Some(4));
//! assert_eq!(Addressing::ColumnMajorFlipped.index(&GRID, 0, 1), None);
//! ```

use crate::{Error, Result};

/// Immutable matrix geometry: `width × height` LEDs per panel, `panel_count` panels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Grid {
    width: u16,
    height: u16,
    panel_count: u16,
}

impl Grid {
    /// Create a grid, panicking (at compile time when used in a `const`) on bad geometry.
    ///
    /// ```rust
    /// use matrix_envoy::matrix::layout::Grid;
    ///
    /// const GRID: Grid = Grid::new(8, 16, 1);
    /// const _: () = assert!(GRID.len() == 128);
    /// ```
    #[must_use]
    pub const fn new(width: u16, height: u16, panel_count: u16) -> Self {
        match Self::try_new(width, height, panel_count) {
            Ok(grid) => grid,
            Err(_) => panic!("grid dimensions must be positive and total LEDs must fit in u16"),
        }
    }

    /// Create a grid, reporting bad geometry as [`Error::InvalidGrid`].
    ///
    /// # Errors
    ///
    /// Fails when any dimension is zero or the LED count exceeds `u16::MAX`.
    pub const fn try_new(width: u16, height: u16, panel_count: u16) -> Result<Self> {
        let total = width as u32 * height as u32 * panel_count as u32;
        if width == 0 || height == 0 || panel_count == 0 || total > u16::MAX as u32 {
            return Err(Error::InvalidGrid {
                width,
                height,
                panel_count,
            });
        }
        Ok(Self {
            width,
            height,
            panel_count,
        })
    }

    /// Columns per panel.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Rows per panel.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of chained panels.
    #[must_use]
    pub const fn panel_count(&self) -> u16 {
        self.panel_count
    }

    /// Total LEDs in the chain: `width * height * panel_count`.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width as usize * self.height as usize * self.panel_count as usize
    }

    /// Always `false`; grids have at least one LED.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Inclusive rectangle of valid logical coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    /// Leftmost valid `x`.
    pub min_x: i32,
    /// Rightmost valid `x`.
    pub max_x: i32,
    /// Topmost valid `y`.
    pub min_y: i32,
    /// Bottommost valid `y`.
    pub max_y: i32,
}

impl Bounds {
    /// Whether `(x, y)` lies inside.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// How the LED chain is wired through the grid.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Addressing {
    /// 0-based, `index = y * width + x`.
    #[default]
    RowMajor,
    /// 1-based, column-first chain entering at the rightmost column.
    ColumnMajorFlipped,
}

impl Addressing {
    /// Smallest valid coordinate on either axis.
    #[must_use]
    pub const fn origin(self) -> i32 {
        match self {
            Self::RowMajor => 0,
            Self::ColumnMajorFlipped => 1,
        }
    }

    /// Logical `(columns, rows)` for `grid` under this wiring.
    #[must_use]
    pub const fn extent(self, grid: &Grid) -> (usize, usize) {
        let width = grid.width as usize;
        let height = grid.height as usize;
        let panels = grid.panel_count as usize;
        match self {
            Self::RowMajor => (width, height * panels),
            Self::ColumnMajorFlipped => (width * panels, height),
        }
    }

    /// Valid coordinates for `grid` under this wiring.
    #[must_use]
    pub const fn bounds(self, grid: &Grid) -> Bounds {
        let (columns, rows) = self.extent(grid);
        let origin = self.origin();
        Bounds {
            min_x: origin,
            max_x: origin + columns as i32 - 1,
            min_y: origin,
            max_y: origin + rows as i32 - 1,
        }
    }

    /// Chain index of `(x, y)`, or `None` when the coordinate is off the grid.
    #[must_use]
    pub const fn index(self, grid: &Grid, x: i32, y: i32) -> Option<usize> {
        if !self.bounds(grid).contains(x, y) {
            return None;
        }
        let (columns, rows) = self.extent(grid);
        // In bounds, so both are non-negative.
        let x = x as usize;
        let y = y as usize;
        match self {
            Self::RowMajor => Some(y * grid.width as usize + x),
            Self::ColumnMajorFlipped => {
                let slot = ((columns + 1 - x) - 1) * rows + y;
                Some(slot - 1)
            }
        }
    }

    /// Logical `(x, y)` of chain index `index`, or `None` past the end of the chain.
    #[must_use]
    pub const fn xy(self, grid: &Grid, index: usize) -> Option<(i32, i32)> {
        if index >= grid.len() {
            return None;
        }
        let (columns, rows) = self.extent(grid);
        match self {
            Self::RowMajor => {
                let width = grid.width as usize;
                Some(((index % width) as i32, (index / width) as i32))
            }
            Self::ColumnMajorFlipped => {
                let x = columns - index / rows;
                let y = index % rows + 1;
                Some((x as i32, y as i32))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_major_corners() {
        // 16 columns by 8 rows, chain starts top-right and runs down each column.
        const GRID: Grid = Grid::new(16, 8, 1);
        let addressing = Addressing::ColumnMajorFlipped;
        assert_eq!(addressing.index(&GRID, 16, 1), Some(0));
        assert_eq!(addressing.index(&GRID, 16, 8), Some(7));
        assert_eq!(addressing.index(&GRID, 15, 1), Some(8));
        assert_eq!(addressing.index(&GRID, 1, 8), Some(127));
    }

    #[test]
    fn panels_extend_the_chained_axis() {
        let grid = Grid::new(4, 2, 3);
        assert_eq!(Addressing::RowMajor.extent(&grid), (4, 6));
        assert_eq!(Addressing::ColumnMajorFlipped.extent(&grid), (12, 2));
        assert_eq!(Addressing::RowMajor.index(&grid, 3, 5), Some(23));
        assert_eq!(Addressing::ColumnMajorFlipped.index(&grid, 1, 2), Some(23));
    }

    #[test]
    fn try_new_rejects_bad_geometry() {
        assert!(Grid::try_new(0, 8, 1).is_err());
        assert!(Grid::try_new(8, 0, 1).is_err());
        assert!(Grid::try_new(8, 8, 0).is_err());
        assert_eq!(
            Grid::try_new(256, 256, 1),
            Err(Error::InvalidGrid {
                width: 256,
                height: 256,
                panel_count: 1
            })
        );
    }
}
