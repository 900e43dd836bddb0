//! Gamma correction applied to incoming 8-bit color channels before they are
//! bit-sliced into the encoder's bitplanes.
//!
//! The descriptor planner and encoder both operate on post-gamma 8-bit
//! values; this module is the only place a perceptual curve is applied.

/// Selects which gamma curve `pwm` applies, or bypasses correction entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GammaMode {
    /// No correction: `pwm(v) == v`.
    Off,
    /// Standard perceptual curve (`gamma ~= 2.8`), suitable for dark rooms.
    #[default]
    Strict,
    /// A gentler curve tuned for brighter, indoor viewing conditions.
    Modified,
}

impl GammaMode {
    /// Map an 8-bit input channel value to its corrected on-time value.
    #[must_use]
    pub fn pwm(self, value: u8) -> u8 {
        match self {
            GammaMode::Off => value,
            GammaMode::Strict => STRICT_TABLE[value as usize],
            GammaMode::Modified => MODIFIED_TABLE[value as usize],
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for GammaMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            GammaMode::Off => defmt::write!(f, "Off"),
            GammaMode::Strict => defmt::write!(f, "Strict"),
            GammaMode::Modified => defmt::write!(f, "Modified"),
        }
    }
}

/// Standard gamma-2.8-ish correction table.
#[rustfmt::skip]
static STRICT_TABLE: [u8; 256] = [
    0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
    0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
    0,   0,   0,   0,   0,   0,   0,   1,   1,   1,   1,   1,   1,   1,   1,   1,
    1,   1,   1,   2,   2,   2,   2,   2,   2,   2,   3,   3,   3,   3,   3,   4,
    4,   4,   4,   4,   5,   5,   5,   5,   6,   6,   6,   7,   7,   7,   7,   8,
    8,   8,   9,   9,   9,  10,  10,  11,  11,  11,  12,  12,  13,  13,  13,  14,
   14,  15,  15,  16,  16,  17,  17,  18,  18,  19,  19,  20,  20,  21,  21,  22,
   23,  23,  24,  24,  25,  26,  26,  27,  28,  28,  29,  30,  30,  31,  32,  32,
   33,  34,  35,  35,  36,  37,  38,  39,  39,  40,  41,  42,  43,  44,  45,  46,
   46,  47,  48,  49,  50,  51,  52,  53,  54,  55,  57,  58,  59,  60,  61,  62,
   63,  64,  66,  67,  68,  69,  70,  72,  73,  74,  75,  77,  78,  79,  81,  82,
   83,  85,  86,  87,  89,  90,  92,  93,  95,  96,  98,  99, 101, 102, 104, 105,
  107, 109, 110, 112, 114, 115, 117, 119, 120, 122, 124, 126, 127, 129, 131, 133,
  135, 137, 138, 140, 142, 144, 146, 148, 150, 152, 154, 156, 158, 160, 162, 164,
  167, 169, 171, 173, 175, 177, 180, 182, 184, 186, 189, 191, 193, 196, 198, 200,
  203, 205, 208, 210, 212, 215, 218, 220, 223, 225, 228, 231, 233, 236, 239, 241,
];

/// Gentler curve for indoor/bright ambient use: compresses the table toward
/// a higher floor so low channel values stay visibly above black.
#[rustfmt::skip]
static MODIFIED_TABLE: [u8; 256] = [
    0,   1,   2,   3,   4,   5,   6,   7,   8,   9,  10,  11,  12,  13,  14,  15,
   16,  17,  18,  19,  20,  21,  22,  23,  24,  25,  26,  27,  28,  29,  30,  31,
   32,  33,  34,  35,  36,  37,  38,  39,  40,  41,  42,  43,  44,  45,  46,  47,
   48,  49,  50,  51,  52,  53,  54,  55,  56,  57,  58,  59,  60,  61,  62,  63,
   64,  65,  66,  67,  68,  69,  70,  71,  72,  73,  75,  76,  77,  78,  79,  80,
   81,  83,  84,  85,  86,  87,  89,  90,  91,  92,  94,  95,  96,  98,  99, 100,
  102, 103, 104, 106, 107, 109, 110, 112, 113, 115, 116, 118, 119, 121, 122, 124,
  125, 127, 128, 130, 132, 133, 135, 137, 138, 140, 142, 143, 145, 147, 149, 150,
  152, 154, 156, 158, 159, 161, 163, 165, 167, 169, 171, 173, 175, 177, 179, 181,
  183, 185, 187, 189, 191, 193, 195, 197, 199, 202, 204, 206, 208, 210, 213, 215,
  217, 219, 222, 224, 226, 229, 231, 233, 236, 238, 240, 243, 245, 248, 250, 253,
  255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
  255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
  255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
  255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
  255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_is_identity() {
        for v in 0..=255u8 {
            assert_eq!(GammaMode::Off.pwm(v), v);
        }
    }

    #[test]
    fn test_strict_endpoints() {
        assert_eq!(GammaMode::Strict.pwm(0), 0);
        assert_eq!(GammaMode::Strict.pwm(255), STRICT_TABLE[255]);
    }

    #[test]
    fn test_strict_monotonic() {
        let mut prev = 0u8;
        for v in 0..=255u8 {
            let out = GammaMode::Strict.pwm(v);
            assert!(out >= prev);
            prev = out;
        }
    }

    #[test]
    fn test_modified_floor_above_strict_at_low_input() {
        // The modified curve is tuned to keep low channel values visible,
        // so it should never sit below the strict curve.
        assert!(GammaMode::Modified.pwm(10) >= GammaMode::Strict.pwm(10));
    }

    #[test]
    fn test_default_is_strict() {
        assert_eq!(GammaMode::default(), GammaMode::Strict);
    }
}
