//! Per-pixel 16-bit control word encoder.
//!
//! Builds the word sent down the sixteen output lanes for one pixel clock:
//! row address, latch, output-enable (brightness gating) and the six color
//! bits for the two physical rows a single word drives.
//!
//! Bit layout (contractual — matches the stream engine's lane mapping):
//!
//! | Bit | 0  | 1  | 2  | 3  | 4  | 5  | 6   | 7  | 8 | 9 | 10 | 11 | 12 |
//! |-----|----|----|----|----|----|----|-----|----|---|---|----|----|----|
//! | Sig | R1 | G1 | B1 | R2 | G2 | B2 | LAT | OE | A | B | C  | D  | E  |

use crate::gamma::GammaMode;

/// Color depth in bits. Fixed: every supported panel is 8 bits per channel.
pub const DEPTH: u8 = 8;

/// Top-half red lane bit.
pub const BIT_R1: u16 = 1 << 0;
/// Top-half green lane bit.
pub const BIT_G1: u16 = 1 << 1;
/// Top-half blue lane bit.
pub const BIT_B1: u16 = 1 << 2;
/// Bottom-half red lane bit.
pub const BIT_R2: u16 = 1 << 3;
/// Bottom-half green lane bit.
pub const BIT_G2: u16 = 1 << 4;
/// Bottom-half blue lane bit.
pub const BIT_B2: u16 = 1 << 5;
/// Latch bit.
pub const BIT_LAT: u16 = 1 << 6;
/// Output-enable bit (active high in this encoding: set means blanked).
pub const BIT_OE: u16 = 1 << 7;
const ADDR_SHIFT: u32 = 8;

/// Mask of the top half's three color bits (R1, G1, B1).
pub const TOP_COLOR_MASK: u16 = BIT_R1 | BIT_G1 | BIT_B1;
/// Mask of the bottom half's three color bits (R2, G2, B2).
pub const BOTTOM_COLOR_MASK: u16 = BIT_R2 | BIT_G2 | BIT_B2;

/// An RGB triple, pre-gamma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb888 {
    /// Red channel, 0..=255.
    pub r: u8,
    /// Green channel, 0..=255.
    pub g: u8,
    /// Blue channel, 0..=255.
    pub b: u8,
}

impl Rgb888 {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb888 { r, g, b }
    }

    fn gamma_corrected(self, gamma: GammaMode) -> Self {
        Rgb888 {
            r: gamma.pwm(self.r),
            g: gamma.pwm(self.g),
            b: gamma.pwm(self.b),
        }
    }
}

/// Per-row parameters shared by every word encoded within one bitplane pass
/// over a given row — everything the encoder needs that isn't per-pixel.
#[derive(Debug, Clone, Copy)]
pub struct RowContext {
    /// Rows-per-frame, `R = H/2`.
    pub rows: u16,
    /// Pixels-per-latch, `L = W`.
    pub cols: u16,
    /// Transition bit chosen by the descriptor planner.
    pub transition_bit: u8,
    /// Current brightness cutoff column, `0..=cols`.
    pub cutoff: u16,
    /// Whether the fifth row-address line `E` is driven.
    pub e_enabled: bool,
    /// Gamma mode applied to incoming colors before bit-testing.
    pub gamma: GammaMode,
}

/// Build the address/LAT/OE bits common to both halves of word `(x, y, i)`.
/// Carries no color information, so it never needs a preservation read.
#[must_use]
pub fn encode_common(ctx: &RowContext, x: u16, y: u16, i: u8) -> u16 {
    debug_assert!(x < ctx.cols);
    debug_assert!(y < ctx.rows);
    debug_assert!(i < DEPTH);

    let mut word = 0u16;

    let row_addr = if i == 0 {
        if y == 0 {
            ctx.rows - 1
        } else {
            y - 1
        }
    } else {
        y
    };
    let addr_bits = row_addr & 0x1F;
    let addr_mask: u16 = if ctx.e_enabled { 0x1F } else { 0x0F };
    word |= (addr_bits & addr_mask) << ADDR_SHIFT;

    if x == ctx.cols - 1 {
        word |= BIT_LAT;
    }

    let blank_edge = x == 0 || x == ctx.cols - 1;
    let is_high_plane = i == 0 || i > ctx.transition_bit;
    let gated = if is_high_plane {
        x >= ctx.cutoff
    } else {
        let shift = ctx.transition_bit - i + 1;
        x >= (ctx.cutoff >> shift)
    };
    if blank_edge || gated {
        word |= BIT_OE;
    }

    word
}

/// Which physical half a color belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    /// Rows `0..R`.
    Top,
    /// Rows `R..2R`.
    Bottom,
}

/// The three color bits for bitplane `i` of `color` (gamma-corrected per
/// `gamma`), placed at the lane positions for `half`.
#[must_use]
pub fn half_color_bits(color: Rgb888, gamma: GammaMode, i: u8, half: Half) -> u16 {
    let c = color.gamma_corrected(gamma);
    let (r_bit, g_bit, b_bit) = match half {
        Half::Top => (BIT_R1, BIT_G1, BIT_B1),
        Half::Bottom => (BIT_R2, BIT_G2, BIT_B2),
    };
    let mut bits = 0u16;
    if (c.r >> i) & 1 != 0 {
        bits |= r_bit;
    }
    if (c.g >> i) & 1 != 0 {
        bits |= g_bit;
    }
    if (c.b >> i) & 1 != 0 {
        bits |= b_bit;
    }
    bits
}

/// Encode the full control word for column `x` of half-row `y` on bitplane
/// `i`, given both halves' pre-gamma colors. Used when both halves are
/// known from scratch (fill, whole-frame flush) and no preservation read
/// of the previous word is needed.
///
/// Caller is responsible for the `x XOR 1` storage swap (see `plain`); this
/// function only builds the word's bit pattern.
#[must_use]
pub fn encode_word(ctx: &RowContext, x: u16, y: u16, i: u8, top: Rgb888, bot: Rgb888) -> u16 {
    encode_common(ctx, x, y, i)
        | half_color_bits(top, ctx.gamma, i, Half::Top)
        | half_color_bits(bot, ctx.gamma, i, Half::Bottom)
}
