//! Frame-by-frame animations driven by [`FrameScheduler`](crate::scheduler::FrameScheduler).
//!
//! An [`Animation`] is advanced by a whole number of motion steps, then rendered. After
//! the frame is flushed the scheduler clears the buffer according to the animation's
//! [`ClearPolicy`].
//!
//! Two animations ship with the crate:
//!
//! - [`Bounce`]: filled squares moving diagonally and reflecting off the grid edges.
//! - [`Countdown`]: a two-digit counter stepping down once per `frames_per_count` frames.
//!
//! ```rust
//! use matrix_envoy::{
//!     animation::{Animation, AxisSign, Bounce, Square},
//!     color::blend_rgba,
//!     matrix::{Renderer, layout::{Addressing, Grid}},
//! };
//!
//! let mut renderer = Renderer::<128>::new(Grid::new(16, 8, 1), Addressing::ColumnMajorFlipped)?;
//! let square = Square::new(1, 1, 1, blend_rgba(50, 50, 50, 10));
//! let mut bounce = Bounce::<1>::new([square]);
//!
//! bounce.advance(3, renderer.bounds());
//! bounce.render(&mut renderer);
//! assert!(!renderer.pixel(4, 4).expect("on grid").is_black());
//! assert_eq!(bounce.squares()[0].dx, AxisSign::Positive);
//! # Ok::<(), matrix_envoy::Error>(())
//! ```

use heapless::Vec;

use crate::{
    color::ColorWord,
    matrix::{Renderer, layout::Bounds},
};

/// Direction of travel along one axis.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisSign {
    /// Toward larger coordinates.
    #[default]
    Positive,
    /// Toward smaller coordinates.
    Negative,
}

impl AxisSign {
    /// `1` or `-1`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

/// An axis-aligned filled square moving one cell per step on each axis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Square {
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Side length in cells.
    pub size: u16,
    /// Fill color.
    pub color: ColorWord,
    /// Horizontal direction.
    pub dx: AxisSign,
    /// Vertical direction.
    pub dy: AxisSign,
}

impl Square {
    /// A square at `(x, y)` moving right and down.
    #[must_use]
    pub const fn new(x: i32, y: i32, size: u16, color: ColorWord) -> Self {
        Self {
            x,
            y,
            size,
            color,
            dx: AxisSign::Positive,
            dy: AxisSign::Positive,
        }
    }

    /// Replace both directions of travel.
    #[must_use]
    pub const fn with_velocity(self, dx: AxisSign, dy: AxisSign) -> Self {
        Self { dx, dy, ..self }
    }

    /// Move `steps` cells along each axis, stopping against any wall in the way.
    ///
    /// Reaching a wall flips that axis's direction, so the next step leaves it. There is
    /// no sub-cell correction: a square that would have travelled past the wall stops
    /// against it.
    pub fn integrate(&mut self, steps: u32, bounds: &Bounds) {
        let steps = i32::try_from(steps).unwrap_or(i32::MAX);
        let size = i32::from(self.size);
        (self.x, self.dx) = integrate_axis(self.x, self.dx, steps, size, bounds.min_x, bounds.max_x);
        (self.y, self.dy) = integrate_axis(self.y, self.dy, steps, size, bounds.min_y, bounds.max_y);
    }

    /// Whether every cell of the square lies inside `bounds`.
    #[must_use]
    pub const fn fits(&self, bounds: &Bounds) -> bool {
        let far = self.size as i32 - 1;
        bounds.contains(self.x, self.y)
            && bounds.contains(self.x.saturating_add(far), self.y.saturating_add(far))
    }
}

fn integrate_axis(
    position: i32,
    sign: AxisSign,
    steps: i32,
    size: i32,
    min: i32,
    max: i32,
) -> (i32, AxisSign) {
    // A square wider than the grid rests against the near wall.
    let last_start = (max - size + 1).max(min);
    let next = position
        .saturating_add(sign.as_i32().saturating_mul(steps))
        .clamp(min, last_start);
    let at_wall = match sign {
        AxisSign::Positive => next >= last_start,
        AxisSign::Negative => next <= min,
    };
    (next, if at_wall { sign.flipped() } else { sign })
}

/// What the scheduler clears after flushing a frame.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClearPolicy {
    /// Clear every LED.
    #[default]
    Full,
    /// Clear the first `n` LEDs in chain order.
    Prefix(usize),
    /// Leave the frame as drawn.
    Keep,
}

/// Something the scheduler advances and draws once per frame.
pub trait Animation {
    /// Advance by `steps` whole motion steps within `bounds`.
    fn advance(&mut self, steps: u32, bounds: Bounds);

    /// Draw the current state.
    fn render<const N: usize>(&self, renderer: &mut Renderer<N>);

    /// What to clear after the frame is flushed.
    fn clear_policy(&self) -> ClearPolicy {
        ClearPolicy::Full
    }
}

/// Up to `MAX` squares bouncing off the grid edges.
#[derive(Clone, Debug)]
pub struct Bounce<const MAX: usize> {
    squares: Vec<Square, MAX>,
}

impl<const MAX: usize> Bounce<MAX> {
    /// Create a bounce animation from a fixed set of squares.
    #[must_use]
    pub fn new(squares: [Square; MAX]) -> Self {
        Self {
            squares: Vec::from_iter(squares),
        }
    }

    /// The squares, in drawing order.
    #[must_use]
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }
}

impl<const MAX: usize> Animation for Bounce<MAX> {
    fn advance(&mut self, steps: u32, bounds: Bounds) {
        for square in &mut self.squares {
            square.integrate(steps, &bounds);
        }
    }

    fn render<const N: usize>(&self, renderer: &mut Renderer<N>) {
        for square in &self.squares {
            renderer.draw_filled_square(square);
        }
    }
}

/// Tens digit position for [`Countdown`], for an 8×16 row-major panel.
pub const COUNTDOWN_TENS_BASE: (i32, i32) = (0, 2);
/// Ones digit position for [`Countdown`]. The top rows clip off the grid.
pub const COUNTDOWN_ONES_BASE: (i32, i32) = (1, -2);

/// A two-digit counter stepping from `start` down to 1, then starting over.
///
/// Each value is shown for `frames_per_count` frames. Only the digit region is cleared
/// between frames.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Countdown {
    start: u8,
    value: u8,
    frames_per_count: u32,
    elapsed_frames: u32,
    color: ColorWord,
    clear_len: usize,
}

impl Countdown {
    /// Largest start value that fits in two digits.
    pub const MAX_START: u8 = 99;

    /// Create a countdown. `start` is clamped to `1..=99` and `frames_per_count` to at
    /// least 1.
    #[must_use]
    pub const fn new(start: u8, frames_per_count: u32, color: ColorWord, clear_len: usize) -> Self {
        let start = if start > Self::MAX_START {
            Self::MAX_START
        } else if start == 0 {
            1
        } else {
            start
        };
        Self {
            start,
            value: start,
            frames_per_count: if frames_per_count == 0 { 1 } else { frames_per_count },
            elapsed_frames: 0,
            color,
            clear_len,
        }
    }

    /// Value currently shown.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Value shown after wrapping around.
    #[must_use]
    pub const fn start(&self) -> u8 {
        self.start
    }
}

impl Animation for Countdown {
    fn advance(&mut self, steps: u32, _bounds: Bounds) {
        self.elapsed_frames = self.elapsed_frames.saturating_add(steps);
        while self.elapsed_frames >= self.frames_per_count {
            self.elapsed_frames -= self.frames_per_count;
            self.value = if self.value <= 1 { self.start } else { self.value - 1 };
        }
    }

    fn render<const N: usize>(&self, renderer: &mut Renderer<N>) {
        let tens = char::from(b'0' + self.value / 10);
        let ones = char::from(b'0' + self.value % 10);
        let (tens_x, tens_y) = COUNTDOWN_TENS_BASE;
        let (ones_x, ones_y) = COUNTDOWN_ONES_BASE;
        renderer.draw_char(tens, tens_x, tens_y, self.color);
        renderer.draw_char(ones, ones_x, ones_y, self.color);
    }

    fn clear_policy(&self) -> ClearPolicy {
        ClearPolicy::Prefix(self.clear_len)
    }
}
