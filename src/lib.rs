//! Core of a driver for HUB75 "dumb" RGB LED matrix panels.
//!
//! ## How HUB75 panels work
//!
//! HUB75 panels carry no frame memory: they behave like a shift register
//! that must be continuously re-scanned, one row pair at a time, while the
//! host drives six serial colour lanes, a shared pixel clock, a latch, an
//! output-enable, and row-address lines.
//!
//! ### Signal names
//! - **R1 G1 B1 / R2 G2 B2** — serial colour data for the upper and lower
//!   halves of the active scan line.
//! - **CLK** — shift-register clock; every rising edge pushes the six
//!   colour bits one pixel to the right.
//! - **LAT** — latch; copies the shift register into the row currently
//!   selected by the address lines.
//! - **OE** — output-enable, active low; LEDs are lit while OE is low.
//! - **A B C D (E)** — row-address select lines.
//!
//! ### Brightness (Binary Code Modulation)
//!
//! Grayscale comes from BCM: each colour bit of each pixel is displayed for
//! a sub-frame ("bitplane") whose on-time is proportional to the bit's
//! weight. Rather than replaying `2^depth - 1` full bitplane passes, this
//! crate compresses the low bitplanes into a single descriptor and repeats
//! only the high-bitplane suffix, so one linear pass of a DMA descriptor
//! ring reproduces the correct BCM weighting — see [`descriptor`].
//!
//! ## Module map
//!
//! - [`geometry`] — the supported panel width/height/scan combinations.
//! - [`gamma`] — perceptual correction applied before bit-testing.
//! - [`encoder`] — builds the 16-bit control word for one pixel clock.
//! - [`descriptor`] — chooses the transition bit and builds the ring.
//! - [`brightness`] — the percent/cutoff brightness state.
//! - [`plain`] — the bitplane buffer and pixel-API drawing operations.
//! - [`frame`] — the plain RGB staging frame and frame-API operations.
//! - [`sync`] — the ISR-releasable flip semaphore.
//! - [`stream`] — the external parallel-output engine contract.
//! - [`config`] — the configuration surface passed to `init`.
//! - [`driver`] — `Hub75Driver`, tying all of the above together.
//! - [`error`] — `DriverError`, returned only from `init`.
//!
//! ## Cargo features
//!
//! ### `defmt`
//! Implements `defmt::Format` for the crate's public types, for logging on
//! `no_std` targets. No functional change; purely adds a trait impl.
//!
//! ### `esp-dma` / `esp32` / `esp32s3` / `esp32c6`
//! Pull in `esp-hal` and switch [`plain::BitplaneBuffer`]'s `ReadBuffer`
//! implementation from `embedded-dma` to `esp-hal::dma`, and enable the
//! `stream::esp` adapter. `esp32` additionally enables `esp32-ordering`.
//!
//! ### `esp32-ordering`
//! Reorders bytes to match the original ESP32's I²S peripheral in 8/16-bit
//! modes; not needed on S2/S3/C3/C6 variants.
#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod brightness;
pub mod config;
pub mod descriptor;
pub mod driver;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod gamma;
pub mod geometry;
pub mod plain;
pub mod stream;
pub mod sync;

pub use config::{DriverConfig, GpioAssignment, MemoryBudget, PixelClock};
pub use driver::{DmaMemoryReport, Hub75Driver};
pub use encoder::Rgb888;
pub use error::DriverError;
pub use frame::StagingFrame;
pub use gamma::GammaMode;
pub use geometry::PanelGeometry;
pub use plain::BitplaneBuffer;
