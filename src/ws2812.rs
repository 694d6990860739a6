//! WS2812 transport and clock for the Pico, on top of `embassy-rp`'s PIO driver.
//!
//! [`Ws2812Transport`] collects one word per LED and hands the whole chain to the PIO
//! state machine (via DMA) once the last LED of a frame arrives. Gamma and the current
//! budget are applied to each word on the way in.
//!
//! See `demos/bounce.rs` for a complete program.

use embassy_rp::pio::Instance;
use embassy_rp::pio_programs::ws2812::{PioWs2812, RgbColorOrder};
use embassy_time::{Instant, Timer};
use smart_leds::RGB8;

use crate::{
    color::{ColorWord, Current, Gamma, generate_combo_table},
    matrix::MatrixConfig,
    scheduler::{FrameClock, PixelTransport},
};

/// Streams color words to a WS2812 chain of `N` LEDs.
pub struct Ws2812Transport<'d, PIO, const SM: usize, const N: usize, ORDER>
where
    PIO: Instance,
    ORDER: RgbColorOrder,
{
    driver: PioWs2812<'d, PIO, SM, N, ORDER>,
    staging: [RGB8; N],
    cursor: usize,
    combo_table: [u8; 256],
}

impl<'d, PIO, const SM: usize, const N: usize, ORDER> Ws2812Transport<'d, PIO, SM, N, ORDER>
where
    PIO: Instance,
    ORDER: RgbColorOrder,
{
    /// Wrap a PIO driver, correcting every word with `gamma` and capping brightness to
    /// `max_current` for `N` LEDs.
    ///
    /// # Panics
    ///
    /// Panics if `N` is zero. Size `N` from a [`Grid`](crate::matrix::layout::Grid),
    /// which is never empty.
    #[must_use]
    pub fn new(driver: PioWs2812<'d, PIO, SM, N, ORDER>, gamma: Gamma, max_current: Current) -> Self {
        let max_brightness = max_current.max_brightness(N);
        info!(
            "Ws2812Transport: {} LEDs, max brightness {}/255",
            N,
            max_brightness
        );
        Self {
            driver,
            staging: [RGB8::default(); N],
            cursor: 0,
            combo_table: generate_combo_table(gamma, max_brightness),
        }
    }

    /// Wrap a PIO driver using the gamma and current budget in `config`.
    #[must_use]
    pub fn from_config(driver: PioWs2812<'d, PIO, SM, N, ORDER>, config: &MatrixConfig) -> Self {
        Self::new(driver, config.gamma(), config.max_current())
    }
}

impl<PIO, const SM: usize, const N: usize, ORDER> PixelTransport
    for Ws2812Transport<'_, PIO, SM, N, ORDER>
where
    PIO: Instance,
    ORDER: RgbColorOrder,
{
    async fn write_word(&mut self, word: ColorWord) {
        if let Some(slot) = self.staging.get_mut(self.cursor) {
            *slot = word.corrected(&self.combo_table).to_rgb8();
        }
        self.cursor += 1;
        if self.cursor >= N {
            self.driver.write(&self.staging).await;
            self.cursor = 0;
        }
    }
}

/// [`FrameClock`] backed by `embassy-time`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

impl FrameClock for EmbassyClock {
    fn now_us(&self) -> u32 {
        // Keep the low 32 bits; the scheduler only uses wrapping differences.
        Instant::now().as_micros() as u32
    }

    async fn sleep_us(&mut self, us: u32) {
        Timer::after_micros(u64::from(us)).await;
    }
}
