//! Error kinds returned by driver initialization.
//!
//! Runtime drawing calls never fail: out-of-range coordinates are silently
//! ignored and publish blocks rather than returning a timeout. Only `init`
//! can fail, and it fails with one of the specific reasons below.

/// Reason `Hub75Driver::init` declined to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// The DMA-capable allocator could not provide the bitplane buffers or
    /// descriptor rings within the reserved-RAM budget.
    OutOfMemory,
    /// No transition bit `t` in `0..DEPTH` satisfies the minimum refresh
    /// rate within the memory budget.
    RefreshUnachievable {
        /// Best refresh rate (Hz) achieved at the memory-tightest `t`.
        best_hz: u32,
    },
    /// The stream engine's `setup` call returned an error.
    HardwareFail,
    /// The requested geometry/frequency combination is not one of the
    /// supported panel configurations.
    InvalidConfig,
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DriverError::OutOfMemory => write!(f, "out of DMA-capable memory"),
            DriverError::RefreshUnachievable { best_hz } => {
                write!(f, "refresh rate unachievable (best {best_hz} Hz)")
            }
            DriverError::HardwareFail => write!(f, "stream engine setup failed"),
            DriverError::InvalidConfig => write!(f, "unsupported geometry/frequency combination"),
        }
    }
}

impl core::error::Error for DriverError {}

#[cfg(feature = "defmt")]
impl defmt::Format for DriverError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            DriverError::OutOfMemory => defmt::write!(f, "OutOfMemory"),
            DriverError::RefreshUnachievable { best_hz } => {
                defmt::write!(f, "RefreshUnachievable {{ best_hz: {} }}", best_hz)
            }
            DriverError::HardwareFail => defmt::write!(f, "HardwareFail"),
            DriverError::InvalidConfig => defmt::write!(f, "InvalidConfig"),
        }
    }
}
