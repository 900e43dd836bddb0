//! Plain-data configuration surface: everything an integrator supplies to
//! `Hub75Driver::init`. No parsing lives here — values are already resolved
//! by the time they reach this struct.

use crate::gamma::GammaMode;
use crate::geometry::PanelGeometry;

/// Supported pixel-clock frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClock {
    /// 13.33 MHz.
    Mhz13_33,
    /// 16 MHz.
    Mhz16,
    /// 20 MHz.
    Mhz20,
    /// 26.67 MHz.
    Mhz26_67,
}

impl PixelClock {
    /// Frequency in Hz.
    #[must_use]
    pub const fn hz(self) -> u32 {
        match self {
            PixelClock::Mhz13_33 => 13_330_000,
            PixelClock::Mhz16 => 16_000_000,
            PixelClock::Mhz20 => 20_000_000,
            PixelClock::Mhz26_67 => 26_670_000,
        }
    }
}

/// GPIO role assignment for the thirteen output lanes plus clock.
///
/// Pin numbers are opaque `u8`s — this crate stays hardware-agnostic at
/// this layer; the `esp-dma` feature's adapter is the only place pin
/// numbers turn into real peripheral routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioAssignment {
    /// Top-half red lane.
    pub r1: u8,
    /// Top-half green lane.
    pub g1: u8,
    /// Top-half blue lane.
    pub b1: u8,
    /// Bottom-half red lane.
    pub r2: u8,
    /// Bottom-half green lane.
    pub g2: u8,
    /// Bottom-half blue lane.
    pub b2: u8,
    /// Row-address bit 0.
    pub a: u8,
    /// Row-address bit 1.
    pub b: u8,
    /// Row-address bit 2.
    pub c: u8,
    /// Row-address bit 3.
    pub d: u8,
    /// Row-address bit 4, for panels requiring the fifth address line.
    pub e: Option<u8>,
    /// Pixel shift clock.
    pub clk: u8,
    /// Latch.
    pub lat: u8,
    /// Output-enable, active low.
    pub oe: u8,
}

/// Memory and refresh-rate budget the descriptor planner searches within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBudget {
    /// Minimum acceptable refresh rate, Hz.
    pub min_refresh_hz: u32,
    /// Amount of total free DMA-capable memory to keep unallocated.
    pub reserve_bytes: u64,
}

/// Full configuration passed to `Hub75Driver::init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Panel width/height/scan combination.
    pub geometry: PanelGeometry,
    /// Pixel-clock frequency.
    pub clock: PixelClock,
    /// Memory and refresh-rate budget for the descriptor planner.
    pub budget: MemoryBudget,
    /// Gamma correction mode applied by the encoder.
    pub gamma: GammaMode,
    /// GPIO role assignment for the output lanes.
    pub gpio: GpioAssignment,
}

impl DriverConfig {
    #[must_use]
    pub const fn new(
        geometry: PanelGeometry,
        clock: PixelClock,
        budget: MemoryBudget,
        gamma: GammaMode,
        gpio: GpioAssignment,
    ) -> Self {
        DriverConfig {
            geometry,
            clock,
            budget,
            gamma,
            gpio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_clock_values() {
        assert_eq!(PixelClock::Mhz13_33.hz(), 13_330_000);
        assert_eq!(PixelClock::Mhz16.hz(), 16_000_000);
        assert_eq!(PixelClock::Mhz20.hz(), 20_000_000);
        assert_eq!(PixelClock::Mhz26_67.hz(), 26_670_000);
    }
}
