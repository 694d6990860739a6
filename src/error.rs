use derive_more::{Debug, Display, Error};

/// Result type for this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while configuring a matrix.
///
/// Drawing never fails: out-of-range pixels are dropped and unknown characters are
/// skipped. Only configuration and start-up can go wrong, and those failures are fatal.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A grid dimension was zero or the LED count does not fit in `u16`.
    #[display("invalid grid {width}x{height} with {panel_count} panel(s)")]
    InvalidGrid {
        /// Columns per panel.
        width: u16,
        /// Rows per panel.
        height: u16,
        /// Number of chained panels.
        panel_count: u16,
    },

    /// The frame buffer length does not match the grid's LED count.
    #[display("frame buffer holds {actual} LEDs but the grid needs {expected}")]
    GridLengthMismatch {
        /// LEDs required by the grid.
        expected: usize,
        /// LEDs the buffer was built for.
        actual: usize,
    },

    /// The frame rate was zero or above one frame per microsecond.
    #[display("frame rate {_0} fps is out of range")]
    InvalidFrameRate(#[error(not(source))] u32),
}
