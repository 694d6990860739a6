//! In-memory frame buffer and the renderer that draws glyphs and shapes into it.
//!
//! A [`Renderer`] owns exactly one [`FrameBuffer`] for its whole life, so there is a single
//! writer by construction. Drawing never fails: any pixel that lands off the grid is
//! dropped, which is how glyphs get clipped at the edges.
//!
//! # Example: Draw a digit and a letter
//!
//! ```rust
//! use matrix_envoy::{
//!     color::blend_rgba,
//!     matrix::{MatrixConfig, Renderer, layout::Grid},
//! };
//!
//! const CONFIG: MatrixConfig = MatrixConfig::new(Grid::new(8, 16, 1));
//!
//! let mut renderer = Renderer::<128>::from_config(&CONFIG)?;
//! let color = blend_rgba(50, 100, 150, 10);
//! renderer.draw_char('4', 0, 2, color);
//! renderer.draw_char('x', 1, 8, color);
//! renderer.draw_char('?', 1, 8, color); // no glyph: nothing drawn
//! assert!(renderer.frame().iter().any(|word| !word.is_black()));
//!
//! renderer.clear();
//! assert!(renderer.frame().iter().all(|word| word.is_black()));
//! # Ok::<(), matrix_envoy::Error>(())
//! ```
//!
//! # Example: Use `embedded-graphics`
//!
//! [`Renderer`] is an `embedded-graphics` [`DrawTarget`]. Its points are 0-based from the
//! top-left whatever the wiring, and every pixel goes through the configured
//! [`Addressing`](layout::Addressing).
//!
//! ```rust
//! use embedded_graphics::{
//!     pixelcolor::Rgb888,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use matrix_envoy::matrix::{MatrixConfig, Renderer, layout::{Addressing, Grid}};
//!
//! const CONFIG: MatrixConfig =
//!     MatrixConfig::new(Grid::new(16, 8, 1)).with_addressing(Addressing::ColumnMajorFlipped);
//!
//! let mut renderer = Renderer::<128>::from_config(&CONFIG)?;
//! Rectangle::new(Point::zero(), Size::new(16, 8))
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb888::RED, 1))
//!     .draw(&mut renderer)
//!     .expect("drawing into a renderer cannot fail");
//! assert!(!renderer.pixel(1, 1).expect("on grid").is_black());
//! # Ok::<(), matrix_envoy::Error>(())
//! ```

pub mod layout;
pub mod rotation;

use core::{
    convert::Infallible,
    ops::{Deref, DerefMut},
};

use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::Rgb888,
    prelude::{OriginDimensions, Pixel, Size},
};

use crate::{
    Error, Result,
    animation::Square,
    color::{ColorWord, Current, GAMMA_DEFAULT, Gamma, MAX_CURRENT_DEFAULT, ToColorWord},
    glyph::{Glyph, glyph_for},
};
use layout::{Addressing, Bounds, Grid};
use rotation::Rotation;

/// Default animation frame rate, in frames per second.
pub const FRAME_RATE_DEFAULT: u32 = 60;

// ============================================================================
// Configuration
// ============================================================================

/// Everything fixed about a matrix at start-up.
///
/// Built in a `const` with the `with_*` methods; unset fields take the `*_DEFAULT` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixConfig {
    grid: Grid,
    addressing: Addressing,
    frame_rate: u32,
    gamma: Gamma,
    max_current: Current,
}

impl MatrixConfig {
    /// Row-major wiring at [`FRAME_RATE_DEFAULT`], [`GAMMA_DEFAULT`] and [`MAX_CURRENT_DEFAULT`].
    #[must_use]
    pub const fn new(grid: Grid) -> Self {
        Self {
            grid,
            addressing: Addressing::RowMajor,
            frame_rate: FRAME_RATE_DEFAULT,
            gamma: GAMMA_DEFAULT,
            max_current: MAX_CURRENT_DEFAULT,
        }
    }

    /// Select the chain wiring.
    #[must_use]
    pub const fn with_addressing(self, addressing: Addressing) -> Self {
        Self { addressing, ..self }
    }

    /// Select the target frame rate.
    #[must_use]
    pub const fn with_frame_rate(self, frame_rate: u32) -> Self {
        Self { frame_rate, ..self }
    }

    /// Select the gamma curve applied by the hardware transport.
    #[must_use]
    pub const fn with_gamma(self, gamma: Gamma) -> Self {
        Self { gamma, ..self }
    }

    /// Select the power budget applied by the hardware transport.
    #[must_use]
    pub const fn with_max_current(self, max_current: Current) -> Self {
        Self {
            max_current,
            ..self
        }
    }

    /// Matrix geometry.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Chain wiring.
    #[must_use]
    pub const fn addressing(&self) -> Addressing {
        self.addressing
    }

    /// Target frames per second.
    #[must_use]
    pub const fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Gamma curve.
    #[must_use]
    pub const fn gamma(&self) -> Gamma {
        self.gamma
    }

    /// Power budget.
    #[must_use]
    pub const fn max_current(&self) -> Current {
        self.max_current
    }
}

// ============================================================================
// Frame buffer
// ============================================================================

/// One [`ColorWord`] per LED, in chain order.
///
/// Frames deref to `[ColorWord; N]`, so they can be read and iterated directly. The
/// length is fixed by `N` and never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBuffer<const N: usize>(pub [ColorWord; N]);

impl<const N: usize> FrameBuffer<N> {
    /// Number of LEDs in this frame.
    pub const LEN: usize = N;

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([ColorWord::BLACK; N])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: ColorWord) -> Self {
        Self([color; N])
    }

    /// Write `color` at `index`. Returns `false`, leaving the frame untouched, when
    /// `index` is past the end.
    pub fn set(&mut self, index: usize, color: ColorWord) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        }
    }

    /// Color at `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ColorWord> {
        self.0.get(index).copied()
    }

    /// Set every LED to black.
    pub fn clear(&mut self) {
        self.0.fill(ColorWord::BLACK);
    }

    /// Set the first `count` LEDs to black. Counts past the end clear everything.
    pub fn clear_prefix(&mut self, count: usize) {
        let count = count.min(N);
        if let Some(prefix) = self.0.get_mut(..count) {
            prefix.fill(ColorWord::BLACK);
        }
    }
}

impl<const N: usize> Deref for FrameBuffer<N> {
    type Target = [ColorWord; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for FrameBuffer<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[ColorWord; N]> for FrameBuffer<N> {
    fn from(array: [ColorWord; N]) -> Self {
        Self(array)
    }
}

impl<const N: usize> From<FrameBuffer<N>> for [ColorWord; N] {
    fn from(frame: FrameBuffer<N>) -> Self {
        frame.0
    }
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Draws glyphs, squares and pixels into the frame buffer it owns.
///
/// Coordinates are in the [`Addressing`]'s own space: 0-based for
/// [`Addressing::RowMajor`], 1-based for [`Addressing::ColumnMajorFlipped`]. See the
/// [module documentation](mod@crate::matrix) for examples.
#[derive(Clone, Debug)]
pub struct Renderer<const N: usize> {
    grid: Grid,
    addressing: Addressing,
    frame: FrameBuffer<N>,
}

impl<const N: usize> Renderer<N> {
    /// Create a renderer with a blank frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GridLengthMismatch`] when `N` is not the grid's LED count.
    pub const fn new(grid: Grid, addressing: Addressing) -> Result<Self> {
        if grid.len() != N {
            return Err(Error::GridLengthMismatch {
                expected: grid.len(),
                actual: N,
            });
        }
        Ok(Self {
            grid,
            addressing,
            frame: FrameBuffer::new(),
        })
    }

    /// Create a renderer from the grid and wiring in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GridLengthMismatch`] when `N` is not the grid's LED count.
    pub const fn from_config(config: &MatrixConfig) -> Result<Self> {
        Self::new(config.grid(), config.addressing())
    }

    /// Matrix geometry.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Chain wiring.
    #[must_use]
    pub const fn addressing(&self) -> Addressing {
        self.addressing
    }

    /// Valid coordinates.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.addressing.bounds(&self.grid)
    }

    /// The frame, in chain order, ready to flush.
    #[must_use]
    pub const fn frame(&self) -> &FrameBuffer<N> {
        &self.frame
    }

    /// Color at logical `(x, y)`, or `None` off the grid.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<ColorWord> {
        self.addressing
            .index(&self.grid, x, y)
            .and_then(|index| self.frame.get(index))
    }

    /// Write `color` at logical `(x, y)`. Returns `false` when the pixel is off the grid.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: ColorWord) -> bool {
        match self.addressing.index(&self.grid, x, y) {
            Some(index) => self.frame.set(index, color),
            None => false,
        }
    }

    /// Draw every lit cell of `glyph`, rotated, offset from `(base_x, base_y)`.
    ///
    /// Cells that land off the grid are dropped, so glyphs clip at the edges.
    pub fn draw_glyph(
        &mut self,
        glyph: &Glyph,
        base_x: i32,
        base_y: i32,
        color: ColorWord,
        rotation: Rotation,
    ) {
        let (width, height) = (glyph.width(), glyph.height());
        for (row, col) in glyph.lit_cells() {
            let (offset_x, offset_y) = rotation.apply(row, col, width, height);
            self.set_pixel(
                base_x.saturating_add(offset_x),
                base_y.saturating_add(offset_y),
                color,
            );
        }
    }

    /// Draw `character` with its font's default rotation. Characters without a glyph
    /// draw nothing.
    pub fn draw_char(&mut self, character: char, base_x: i32, base_y: i32, color: ColorWord) {
        if let Some(glyph) = glyph_for(character) {
            self.draw_glyph(glyph, base_x, base_y, color, glyph.kind().default_rotation());
        }
    }

    /// Draw `text` one character per `advance` step, starting at `(base_x, base_y)`.
    ///
    /// Spacing is fixed and there is no wrapping. Characters without a glyph still
    /// take up their step.
    pub fn draw_text(
        &mut self,
        text: &str,
        base_x: i32,
        base_y: i32,
        advance: (i32, i32),
        color: ColorWord,
    ) {
        let (mut x, mut y) = (base_x, base_y);
        for character in text.chars() {
            self.draw_char(character, x, y, color);
            x = x.saturating_add(advance.0);
            y = y.saturating_add(advance.1);
        }
    }

    /// Fill `square`'s cells. Squares are axis-aligned; no rotation applies.
    pub fn draw_filled_square(&mut self, square: &Square) {
        let size = i32::from(square.size);
        for offset_y in 0..size {
            for offset_x in 0..size {
                self.set_pixel(
                    square.x.saturating_add(offset_x),
                    square.y.saturating_add(offset_y),
                    square.color,
                );
            }
        }
    }

    /// Set every LED to black.
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Set the first `count` LEDs in chain order to black.
    pub fn clear_prefix(&mut self, count: usize) {
        self.frame.clear_prefix(count);
    }
}

impl<const N: usize> OriginDimensions for Renderer<N> {
    fn size(&self) -> Size {
        let (columns, rows) = self.addressing.extent(&self.grid);
        // Grid::try_new keeps the LED count within u16.
        Size::new(columns as u32, rows as u32)
    }
}

impl<const N: usize> DrawTarget for Renderer<N> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let origin = self.addressing.origin();
        for Pixel(point, color) in pixels {
            self.set_pixel(
                point.x.saturating_add(origin),
                point.y.saturating_add(origin),
                color.to_color_word(),
            );
        }
        Ok(())
    }
}
