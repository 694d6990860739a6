#![allow(missing_docs)]
//! Host-level tests for frame pacing, driven by a fake clock.

use std::{cell::Cell, rc::Rc};

use embassy_futures::block_on;
use matrix_envoy::{
    animation::{Animation, AxisSign, Bounce, ClearPolicy, Square},
    color::{ColorWord, pack_rgb},
    matrix::{
        Renderer,
        layout::{Addressing, Bounds, Grid},
    },
    scheduler::{FrameClock, FrameScheduler, PixelTransport, SchedulerState},
};

const TARGET_US: u32 = 16_666;

/// Shared microsecond counter; the transport advances it to simulate write time.
type Now = Rc<Cell<u32>>;

struct FakeClock {
    now: Now,
    sleeps: Vec<u32>,
}

impl FrameClock for FakeClock {
    fn now_us(&self) -> u32 {
        self.now.get()
    }

    async fn sleep_us(&mut self, us: u32) {
        self.sleeps.push(us);
        self.now.set(self.now.get().wrapping_add(us));
    }
}

struct RecordingTransport {
    now: Now,
    cost_per_word_us: u32,
    words: Vec<ColorWord>,
}

impl PixelTransport for RecordingTransport {
    async fn write_word(&mut self, word: ColorWord) {
        self.words.push(word);
        self.now.set(self.now.get().wrapping_add(self.cost_per_word_us));
    }
}

type TestScheduler = FrameScheduler<128, RecordingTransport, FakeClock>;

fn new_scheduler(start_us: u32, cost_per_word_us: u32, addressing: Addressing) -> (TestScheduler, Now) {
    let now = Rc::new(Cell::new(start_us));
    let grid = match addressing {
        Addressing::RowMajor => Grid::new(8, 16, 1),
        Addressing::ColumnMajorFlipped => Grid::new(16, 8, 1),
    };
    let renderer = Renderer::new(grid, addressing).expect("grid matches buffer");
    let transport = RecordingTransport {
        now: Rc::clone(&now),
        cost_per_word_us,
        words: Vec::new(),
    };
    let clock = FakeClock {
        now: Rc::clone(&now),
        sleeps: Vec::new(),
    };
    let scheduler = FrameScheduler::new(renderer, transport, clock, 60).expect("valid frame rate");
    (scheduler, now)
}

/// Draws one fixed pixel and keeps or clears per its policy.
struct Marker {
    policy: ClearPolicy,
    advanced_by: Vec<u32>,
}

const MARKER: ColorWord = pack_rgb(1, 2, 3);

impl Animation for Marker {
    fn advance(&mut self, steps: u32, _bounds: Bounds) {
        self.advanced_by.push(steps);
    }

    fn render<const N: usize>(&self, renderer: &mut Renderer<N>) {
        renderer.set_pixel(1, 0, MARKER);
    }

    fn clear_policy(&self) -> ClearPolicy {
        self.policy
    }
}

fn marker(policy: ClearPolicy) -> Marker {
    Marker {
        policy,
        advanced_by: Vec::new(),
    }
}

#[test]
fn fast_frames_sleep_out_the_interval() {
    let (mut scheduler, now) = new_scheduler(1_000, 10, Addressing::RowMajor);
    let mut animation = marker(ClearPolicy::Full);

    let report = block_on(scheduler.tick(&mut animation));
    assert_eq!(report.busy_us, 128 * 10);
    assert_eq!(report.slept_us, TARGET_US - 128 * 10);
    assert_eq!(now.get(), 1_000 + TARGET_US);
    assert_eq!(scheduler.clock().sleeps, vec![TARGET_US - 1_280]);
    assert_eq!(scheduler.state(), SchedulerState::Idle);

    // The next tick sees exactly one interval and advances one step.
    let report = block_on(scheduler.tick(&mut animation));
    assert_eq!(report.elapsed_us, TARGET_US);
    assert_eq!(report.steps, 1);
    assert_eq!(animation.advanced_by, vec![0, 1]);
}

#[test]
fn overrunning_frames_add_no_sleep() {
    let (mut scheduler, now) = new_scheduler(0, 200, Addressing::RowMajor);
    let mut animation = marker(ClearPolicy::Full);

    let report = block_on(scheduler.tick(&mut animation));
    assert_eq!(report.busy_us, 128 * 200);
    assert_eq!(report.slept_us, 0);
    assert!(scheduler.clock().sleeps.is_empty());

    // No catch-up: the next frame starts right away and rounds 25.6 ms to 2 steps.
    let report = block_on(scheduler.tick(&mut animation));
    assert_eq!(report.elapsed_us, 25_600);
    assert_eq!(report.steps, 2);
    assert_eq!(now.get(), 2 * 25_600);
}

#[test]
fn timing_survives_clock_wraparound() {
    let (mut scheduler, now) = new_scheduler(u32::MAX - 100, 10, Addressing::RowMajor);
    let mut animation = marker(ClearPolicy::Full);

    let report = block_on(scheduler.tick(&mut animation));
    assert_eq!(report.elapsed_us, 0);
    assert_eq!(report.busy_us, 1_280);
    assert_eq!(report.slept_us, TARGET_US - 1_280);
    assert_eq!(now.get(), (u32::MAX - 100).wrapping_add(TARGET_US));

    let report = block_on(scheduler.tick(&mut animation));
    assert_eq!(report.elapsed_us, TARGET_US);
    assert_eq!(report.steps, 1);
}

#[test]
fn flush_sends_every_word_in_chain_order() {
    let (mut scheduler, _now) = new_scheduler(0, 0, Addressing::RowMajor);
    let mut animation = marker(ClearPolicy::Keep);

    block_on(scheduler.tick(&mut animation));
    let words = &scheduler.transport().words;
    assert_eq!(words.len(), 128);
    assert_eq!(words[1], MARKER);
    assert!(words.iter().enumerate().all(|(index, word)| index == 1 || word.is_black()));
    assert_eq!(words.as_slice(), scheduler.renderer().frame().as_slice());
}

#[test]
fn clear_policy_applies_after_flush() {
    let (mut scheduler, _now) = new_scheduler(0, 0, Addressing::RowMajor);

    block_on(scheduler.tick(&mut marker(ClearPolicy::Keep)));
    assert_eq!(scheduler.renderer().pixel(1, 0), Some(MARKER));

    block_on(scheduler.tick(&mut marker(ClearPolicy::Prefix(1))));
    assert_eq!(scheduler.renderer().pixel(1, 0), Some(MARKER));

    block_on(scheduler.tick(&mut marker(ClearPolicy::Prefix(2))));
    assert_eq!(scheduler.renderer().pixel(1, 0), Some(ColorWord::BLACK));

    scheduler.renderer_mut().set_pixel(1, 0, MARKER);
    block_on(scheduler.tick(&mut marker(ClearPolicy::Full)));
    assert!(scheduler.renderer().frame().iter().all(|word| word.is_black()));
    // Each tick still flushed the drawn frame.
    assert_eq!(scheduler.transport().words.len(), 4 * 128);
}

#[test]
fn bounce_moves_by_elapsed_frames() {
    let (mut scheduler, now) = new_scheduler(0, 0, Addressing::ColumnMajorFlipped);
    let mut bounce = Bounce::new([Square::new(1, 1, 1, MARKER)]);

    block_on(scheduler.tick(&mut bounce));
    assert_eq!((bounce.squares()[0].x, bounce.squares()[0].y), (1, 1));

    // Stall for two more intervals: three have passed, so the square moves three cells.
    now.set(now.get() + 2 * TARGET_US);
    block_on(scheduler.tick(&mut bounce));
    let square = bounce.squares()[0];
    assert_eq!((square.x, square.y), (4, 4));
    assert_eq!((square.dx, square.dy), (AxisSign::Positive, AxisSign::Positive));
    let lit = scheduler.transport().words.iter().filter(|word| !word.is_black()).count();
    assert_eq!(lit, 2);
}

#[test]
fn invalid_frame_rate_is_rejected() {
    let now = Rc::new(Cell::new(0));
    let renderer = Renderer::<128>::new(Grid::new(8, 16, 1), Addressing::RowMajor)
        .expect("grid matches buffer");
    let transport = RecordingTransport {
        now: Rc::clone(&now),
        cost_per_word_us: 0,
        words: Vec::new(),
    };
    let clock = FakeClock {
        now,
        sleeps: Vec::new(),
    };
    let result = FrameScheduler::new(renderer, transport, clock, 0);
    assert!(matches!(
        result,
        Err(matrix_envoy::Error::InvalidFrameRate(0))
    ));
}
