//! Glyph and shape rendering for NeoPixel-style (WS2812) LED matrices on Pico 1 and 2.
//!
//! A matrix is a grid of LEDs wired as one serial chain. This crate keeps an in-memory
//! [`FrameBuffer`](crate::matrix::FrameBuffer) with one color word per LED, draws digits,
//! letters, squares and single pixels into it through a wiring-aware
//! [`Addressing`](crate::matrix::layout::Addressing), and streams it to the chain at a
//! fixed frame rate with [`FrameScheduler`](crate::scheduler::FrameScheduler).
//!
//! # Glossary
//!
//! - **Grid:** logical 2-D arrangement of LEDs: `width × height × panel_count`.
//! - **Frame buffer:** one color word per physical LED, in chain order.
//! - **Glyph:** a fixed-size bitmap for one renderable character (digits 4×6, letters 5×5).
//! - **Rotation:** one of four 90° steps applied when placing a glyph.
//! - **Addressing:** the formula mapping logical `(x, y)` to a chain index, fixed by wiring.
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):**
//!   drives the WS2812 signal. Pico 1 has 2. Pico 2 has 3.
#![cfg_attr(not(any(test, feature = "host")), no_std)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: a board must be selected whenever the hardware transport is built
#[cfg(all(
    any(feature = "arm", feature = "riscv"),
    not(any(feature = "pico1", feature = "pico2"))
))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

#[cfg(all(feature = "arm", feature = "riscv"))]
compile_error!("Cannot enable both 'arm' and 'riscv' features simultaneously");

// Compile-time check: pico1 only supports ARM
#[cfg(all(feature = "pico1", feature = "riscv"))]
compile_error!("Pico 1 (RP2040) only supports ARM architecture, not RISC-V");

// Must come first so the logging macros are visible to every module below.
#[macro_use]
mod fmt;

pub mod animation;
pub mod color;
mod error;
pub mod glyph;
pub mod matrix;
pub mod scheduler;
#[cfg(feature = "host")]
pub mod to_png;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub mod ws2812;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
