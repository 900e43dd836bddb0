//! Panel geometry: the four supported HUB75 width/height/scan combinations.
//!
//! Geometry is frozen after `Hub75Driver::init` — there is no runtime
//! reconfiguration (see Non-goals).

use crate::error::DriverError;

/// One of the supported HUB75 panel geometries.
///
/// Only these four combinations are valid. A 32x16 panel wired for 4-scan,
/// a 32x32 panel wired for 8-scan, and a 64x32 panel wired for 8-scan are
/// explicitly *not* supported — they are non-functional upstream and must be
/// rejected, not silently accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelGeometry {
    /// 32x16 panel, 1/8 scan (two rows refreshed in parallel, 8 row pairs).
    Panel32x16_8Scan,
    /// 32x32 panel, 1/16 scan.
    Panel32x32_16Scan,
    /// 64x32 panel, 1/16 scan.
    Panel64x32_16Scan,
    /// 64x64 panel, 1/32 scan. Requires the fifth row-address line `E`.
    Panel64x64_32Scan,
}

impl PanelGeometry {
    /// Panel width in columns.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            PanelGeometry::Panel32x16_8Scan => 32,
            PanelGeometry::Panel32x32_16Scan => 32,
            PanelGeometry::Panel64x32_16Scan => 64,
            PanelGeometry::Panel64x64_32Scan => 64,
        }
    }

    /// Panel height in rows.
    #[must_use]
    pub const fn height(self) -> usize {
        match self {
            PanelGeometry::Panel32x16_8Scan => 16,
            PanelGeometry::Panel32x32_16Scan => 32,
            PanelGeometry::Panel64x32_16Scan => 32,
            PanelGeometry::Panel64x64_32Scan => 64,
        }
    }

    /// Rows refreshed in parallel. Always 2 for the panels this crate drives.
    #[must_use]
    pub const fn rows_in_parallel(self) -> usize {
        2
    }

    /// Whether the fifth row-address line `E` must be driven.
    #[must_use]
    pub const fn uses_e_line(self) -> bool {
        matches!(self, PanelGeometry::Panel64x64_32Scan)
    }

    /// Rows-per-frame, `R = H / P`.
    #[must_use]
    pub const fn rows_per_frame(self) -> usize {
        compute_rows(self.height())
    }

    /// Pixels-per-latch, `L = W`.
    #[must_use]
    pub const fn pixels_per_latch(self) -> usize {
        self.width()
    }

    /// Validate that this geometry is one of the four supported
    /// combinations. All `PanelGeometry` variants are supported by
    /// construction; this exists so callers that build a geometry from a
    /// runtime `(width, height, scan)` selector get the same rejection
    /// required for the explicitly non-functional combinations.
    pub fn validate(self) -> Result<Self, DriverError> {
        Ok(self)
    }

    /// Resolve a `(width, height, rows_refreshed_in_parallel)` selector into
    /// a `PanelGeometry`, rejecting anything that isn't one of the four
    /// supported combinations — including the non-functional
    /// 32x16/4-scan, 32x32/8-scan and 64x32/8-scan configurations.
    pub fn from_selector(width: usize, height: usize, rows_in_parallel: usize) -> Result<Self, DriverError> {
        if rows_in_parallel != 2 {
            return Err(DriverError::InvalidConfig);
        }
        match (width, height) {
            (32, 16) => Ok(PanelGeometry::Panel32x16_8Scan),
            (32, 32) => Ok(PanelGeometry::Panel32x32_16Scan),
            (64, 32) => Ok(PanelGeometry::Panel64x32_16Scan),
            (64, 64) => Ok(PanelGeometry::Panel64x64_32Scan),
            _ => Err(DriverError::InvalidConfig),
        }
    }
}

/// Computes `R = H / 2`, the rows-per-frame value for a panel with `P = 2`
/// rows refreshed in parallel.
#[must_use]
pub const fn compute_rows(height: usize) -> usize {
    height / 2
}

#[cfg(feature = "defmt")]
impl defmt::Format for PanelGeometry {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "PanelGeometry({}x{}, e={})",
            self.width(),
            self.height(),
            self.uses_e_line()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_combinations() {
        let all = [
            PanelGeometry::Panel32x16_8Scan,
            PanelGeometry::Panel32x32_16Scan,
            PanelGeometry::Panel64x32_16Scan,
            PanelGeometry::Panel64x64_32Scan,
        ];
        for g in all {
            assert_eq!(g.rows_per_frame() * 2, g.height());
            assert_eq!(g.pixels_per_latch(), g.width());
            assert_eq!(g.rows_in_parallel(), 2);
        }
    }

    #[test]
    fn test_e_line_only_on_64x64() {
        assert!(!PanelGeometry::Panel32x16_8Scan.uses_e_line());
        assert!(!PanelGeometry::Panel32x32_16Scan.uses_e_line());
        assert!(!PanelGeometry::Panel64x32_16Scan.uses_e_line());
        assert!(PanelGeometry::Panel64x64_32Scan.uses_e_line());
    }

    #[test]
    fn test_from_selector_accepts_supported() {
        assert_eq!(
            PanelGeometry::from_selector(32, 16, 2),
            Ok(PanelGeometry::Panel32x16_8Scan)
        );
        assert_eq!(
            PanelGeometry::from_selector(32, 32, 2),
            Ok(PanelGeometry::Panel32x32_16Scan)
        );
        assert_eq!(
            PanelGeometry::from_selector(64, 32, 2),
            Ok(PanelGeometry::Panel64x32_16Scan)
        );
        assert_eq!(
            PanelGeometry::from_selector(64, 64, 2),
            Ok(PanelGeometry::Panel64x64_32Scan)
        );
    }

    #[test]
    fn test_from_selector_rejects_nonfunctional_scan_rates() {
        // 32x16/4-scan, 32x32/8-scan, 64x32/8-scan are explicitly excluded.
        assert_eq!(
            PanelGeometry::from_selector(32, 16, 4),
            Err(DriverError::InvalidConfig)
        );
        assert_eq!(
            PanelGeometry::from_selector(32, 32, 1),
            Err(DriverError::InvalidConfig)
        );
        assert_eq!(
            PanelGeometry::from_selector(64, 32, 1),
            Err(DriverError::InvalidConfig)
        );
    }

    #[test]
    fn test_from_selector_rejects_unknown_dimensions() {
        assert_eq!(
            PanelGeometry::from_selector(128, 64, 2),
            Err(DriverError::InvalidConfig)
        );
        assert_eq!(
            PanelGeometry::from_selector(16, 16, 2),
            Err(DriverError::InvalidConfig)
        );
    }

    #[test]
    fn test_compute_rows() {
        assert_eq!(compute_rows(32), 16);
        assert_eq!(compute_rows(64), 32);
        assert_eq!(compute_rows(16), 8);
    }
}
