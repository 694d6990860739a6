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
    animation::{Bounce, Square},
    color::blend_rgba,
    matrix::{
        MatrixConfig, Renderer,
        layout::{Addressing, Grid},
    },
    scheduler::FrameScheduler,
    ws2812::{EmbassyClock, Ws2812Transport},
};
use {defmt_rtt as _, panic_probe as _};

// 16 columns by 8 rows, chained column-first from the right edge.
const CONFIG: MatrixConfig =
    MatrixConfig::new(Grid::new(16, 8, 1)).with_addressing(Addressing::ColumnMajorFlipped);
const LED_COUNT: usize = CONFIG.grid().len();

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

    let mut bounce = Bounce::new([Square::new(1, 1, 1, blend_rgba(50, 50, 50, 10))]);
    scheduler.run(&mut bounce).await
}
