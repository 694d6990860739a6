#![allow(missing_docs)]
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_rp::{
    bind_interrupts,
    peripherals::PIO0,
    pio::{InterruptHandler, Pio},
    pio_programs::ws2812::{PioWs2812, PioWs2812Program},
};
use matrix_envoy::{
    Result,
    animation::Countdown,
    color::{Current, blend_rgba},
    matrix::{MatrixConfig, Renderer, layout::Grid},
    scheduler::FrameScheduler,
    ws2812::{EmbassyClock, Ws2812Transport},
};
use {defmt_rtt as _, panic_probe as _};

// 8 columns by 16 rows, row-major. Digits are drawn a quarter turn round, so they read
// upright with the panel mounted on its side.
const CONFIG: MatrixConfig = MatrixConfig::new(Grid::new(8, 16, 1))
    .with_frame_rate(10)
    .with_max_current(Current::Milliamps(500));
const LED_COUNT: usize = CONFIG.grid().len();

// Both digits sit in the first 8 rows.
const DIGIT_REGION_LEN: usize = 64;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let err = inner_main().await.unwrap_err();
    panic!("{err}");
}

async fn inner_main() -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let driver: PioWs2812<'_, PIO0, 0, LED_COUNT> =
        PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_2, &program);

    let renderer = Renderer::<LED_COUNT>::from_config(&CONFIG)?;
    let transport = Ws2812Transport::from_config(driver, &CONFIG);
    let mut scheduler =
        FrameScheduler::new(renderer, transport, EmbassyClock, CONFIG.frame_rate())?;

    // 60 down to 1, one count per frame at 10 fps.
    let mut countdown = Countdown::new(60, 1, blend_rgba(50, 100, 150, 10), DIGIT_REGION_LEN);
    scheduler.run(&mut countdown).await
}
