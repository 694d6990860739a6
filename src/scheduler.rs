//! Fixed-rate frame loop: advance, render, flush, clear, sleep.
//!
//! [`FrameScheduler`] owns the [`Renderer`] and talks to the hardware only through two
//! traits, [`PixelTransport`] and [`FrameClock`], so the same loop runs on a Pico and in
//! host tests with a fake clock.
//!
//! Each [`tick`](FrameScheduler::tick):
//!
//! 1. reads the clock and measures the (wrapping) time since the previous tick,
//! 2. advances the animation by that time in whole frame intervals, rounded to nearest,
//! 3. renders, flushes every LED in chain order, and clears per the animation's
//!    [`ClearPolicy`],
//! 4. sleeps for whatever is left of the frame interval. A frame that overran sleeps
//!    for zero and the next one starts at once, with no catch-up.
//!
//! The clock is a 32-bit microsecond counter that wraps about every 71 minutes; all
//! differences use wrapping subtraction.

use crate::{
    Error, Result,
    animation::{Animation, ClearPolicy},
    color::ColorWord,
    matrix::Renderer,
};

const MICROS_PER_SECOND: u32 = 1_000_000;

/// Accepts one color word per call, in chain order.
///
/// Implementations treat every write as successful.
pub trait PixelTransport {
    /// Send the next LED's color.
    async fn write_word(&mut self, word: ColorWord);
}

/// Monotonic wrapping microsecond clock with best-effort sleep.
pub trait FrameClock {
    /// Microseconds since an arbitrary epoch, wrapping at `u32::MAX`.
    fn now_us(&self) -> u32;

    /// Wait at least `us` microseconds. May overshoot.
    async fn sleep_us(&mut self, us: u32);
}

/// What the scheduler is doing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerState {
    /// Between frames.
    #[default]
    Idle,
    /// Advancing, rendering or flushing a frame.
    Rendering,
}

/// Timing of one completed [`tick`](FrameScheduler::tick).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameReport {
    /// Time since the previous tick started.
    pub elapsed_us: u32,
    /// Motion steps the animation was advanced by.
    pub steps: u32,
    /// Time spent advancing, rendering, flushing and clearing.
    pub busy_us: u32,
    /// Sleep requested after the frame. Zero when the frame overran.
    pub slept_us: u32,
}

/// Frame interval in microseconds for `frame_rate` frames per second (truncating).
///
/// # Errors
///
/// Returns [`Error::InvalidFrameRate`] for 0 or for rates faster than one frame per
/// microsecond.
pub const fn frame_interval_us(frame_rate: u32) -> Result<u32> {
    if frame_rate == 0 || frame_rate > MICROS_PER_SECOND {
        return Err(Error::InvalidFrameRate(frame_rate));
    }
    Ok(MICROS_PER_SECOND / frame_rate)
}

/// `elapsed_us / target_us`, rounded to nearest. A zero target yields zero steps.
#[must_use]
pub const fn steps_for(elapsed_us: u32, target_us: u32) -> u32 {
    if target_us == 0 {
        return 0;
    }
    let elapsed = elapsed_us as u64;
    let target = target_us as u64;
    // Rounding adds less than one step, so the quotient never exceeds u32::MAX.
    ((elapsed + target / 2) / target) as u32
}

/// Paces an [`Animation`] at a fixed frame rate. See the [module documentation](self).
///
/// ```rust
/// use core::cell::Cell;
/// use matrix_envoy::{
///     animation::Countdown,
///     color::{ColorWord, blend_rgba},
///     matrix::{Renderer, layout::{Addressing, Grid}},
///     scheduler::{FrameClock, FrameScheduler, PixelTransport},
/// };
///
/// struct Count(usize);
/// impl PixelTransport for Count {
///     async fn write_word(&mut self, _word: ColorWord) {
///         self.0 += 1;
///     }
/// }
///
/// struct Still(Cell<u32>);
/// impl FrameClock for Still {
///     fn now_us(&self) -> u32 {
///         self.0.get()
///     }
///     async fn sleep_us(&mut self, us: u32) {
///         self.0.set(self.0.get().wrapping_add(us));
///     }
/// }
///
/// let renderer = Renderer::<128>::new(Grid::new(8, 16, 1), Addressing::RowMajor)?;
/// let mut scheduler = FrameScheduler::new(renderer, Count(0), Still(Cell::new(0)), 60)?;
/// let mut countdown = Countdown::new(60, 6, blend_rgba(50, 100, 150, 10), 64);
///
/// let report = embassy_futures::block_on(scheduler.tick(&mut countdown));
/// assert_eq!(scheduler.transport().0, 128);
/// assert_eq!(report.slept_us, 16_666);
/// # Ok::<(), matrix_envoy::Error>(())
/// ```
pub struct FrameScheduler<const N: usize, T, C> {
    renderer: Renderer<N>,
    transport: T,
    clock: C,
    target_interval_us: u32,
    last_tick_us: u32,
    state: SchedulerState,
}

impl<const N: usize, T, C> FrameScheduler<N, T, C>
where
    T: PixelTransport,
    C: FrameClock,
{
    /// Take ownership of the renderer, transport and clock.
    ///
    /// The first tick measures its elapsed time from this call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrameRate`] when `frame_rate` has no whole-microsecond
    /// interval.
    pub fn new(renderer: Renderer<N>, transport: T, clock: C, frame_rate: u32) -> Result<Self> {
        let target_interval_us = frame_interval_us(frame_rate)?;
        let last_tick_us = clock.now_us();
        info!(
            "FrameScheduler: {} LEDs, {} fps, {} us per frame",
            N,
            frame_rate,
            target_interval_us
        );
        Ok(Self {
            renderer,
            transport,
            clock,
            target_interval_us,
            last_tick_us,
            state: SchedulerState::Idle,
        })
    }

    /// Target frame interval in microseconds.
    #[must_use]
    pub const fn target_interval_us(&self) -> u32 {
        self.target_interval_us
    }

    /// Idle between frames, Rendering during one.
    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// The renderer, for inspecting the frame.
    #[must_use]
    pub const fn renderer(&self) -> &Renderer<N> {
        &self.renderer
    }

    /// The renderer, for drawing outside an animation.
    pub const fn renderer_mut(&mut self) -> &mut Renderer<N> {
        &mut self.renderer
    }

    /// The transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// The clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Send every LED's word to the transport in chain order.
    pub async fn flush(&mut self) {
        for word in self.renderer.frame().iter() {
            self.transport.write_word(*word).await;
        }
    }

    /// Run one frame and sleep out the rest of its interval.
    pub async fn tick<A: Animation>(&mut self, animation: &mut A) -> FrameReport {
        self.state = SchedulerState::Rendering;
        let start_us = self.clock.now_us();
        let elapsed_us = start_us.wrapping_sub(self.last_tick_us);
        self.last_tick_us = start_us;

        let steps = steps_for(elapsed_us, self.target_interval_us);
        animation.advance(steps, self.renderer.bounds());
        animation.render(&mut self.renderer);
        self.flush().await;
        match animation.clear_policy() {
            ClearPolicy::Full => self.renderer.clear(),
            ClearPolicy::Prefix(count) => self.renderer.clear_prefix(count),
            ClearPolicy::Keep => {}
        }

        let busy_us = self.clock.now_us().wrapping_sub(start_us);
        self.state = SchedulerState::Idle;
        let slept_us = if busy_us < self.target_interval_us {
            let remaining_us = self.target_interval_us - busy_us;
            trace!(
                "FrameScheduler: frame took {} us, sleeping {} us",
                busy_us,
                remaining_us
            );
            self.clock.sleep_us(remaining_us).await;
            remaining_us
        } else {
            debug!(
                "FrameScheduler: frame overran ({} us > {} us)",
                busy_us,
                self.target_interval_us
            );
            0
        };

        FrameReport {
            elapsed_us,
            steps,
            busy_us,
            slept_us,
        }
    }

    /// Tick forever.
    pub async fn run<A: Animation>(&mut self, animation: &mut A) -> ! {
        info!("FrameScheduler: running");
        loop {
            self.tick(animation).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_truncates() {
        assert_eq!(frame_interval_us(60), Ok(16_666));
        assert_eq!(frame_interval_us(1), Ok(1_000_000));
        assert_eq!(frame_interval_us(0), Err(Error::InvalidFrameRate(0)));
        assert_eq!(
            frame_interval_us(2_000_000),
            Err(Error::InvalidFrameRate(2_000_000))
        );
    }

    #[test]
    fn steps_round_to_nearest() {
        assert_eq!(steps_for(0, 16_666), 0);
        assert_eq!(steps_for(8_332, 16_666), 0);
        assert_eq!(steps_for(8_333, 16_666), 1);
        assert_eq!(steps_for(16_666, 16_666), 1);
        assert_eq!(steps_for(41_665, 16_666), 3);
        assert_eq!(steps_for(u32::MAX, 1), u32::MAX);
        assert_eq!(steps_for(5, 0), 0);
    }
}
