//! The bitplane buffer: the `[R][D][L]` word array the descriptor ring
//! reads from, plus the pixel-API drawing operations that write into it
//! directly.

use core::convert::Infallible;

#[cfg(not(feature = "esp-dma"))]
use embedded_dma::ReadBuffer;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::{Rgb888 as EgRgb888, RgbColor};
use embedded_graphics::Pixel;
#[cfg(feature = "esp-dma")]
use esp_hal::dma::ReadBuffer;

use crate::encoder::{self, Half, Rgb888, RowContext, BOTTOM_COLOR_MASK, DEPTH, TOP_COLOR_MASK};
use crate::gamma::GammaMode;

/// One buffer's bitplane words: `[NROWS][DEPTH][COLS]` of `u16`.
///
/// `ROWS` is the panel's full height, `COLS` its width, `NROWS = ROWS / 2`
/// the rows-per-frame value; `NROWS` is a separate const generic (not
/// derived) so it can be supplied directly at the call site, matching
/// `geometry::compute_rows`.
pub struct BitplaneBuffer<const ROWS: usize, const COLS: usize, const NROWS: usize> {
    words: [[[u16; COLS]; DEPTH as usize]; NROWS],
    ctx: RowContext,
}

impl<const ROWS: usize, const COLS: usize, const NROWS: usize> BitplaneBuffer<ROWS, COLS, NROWS> {
    /// A freshly black buffer using `ctx` for geometry/brightness/gamma
    /// parameters. `ctx.rows`/`ctx.cols` must equal `NROWS`/`COLS`.
    #[must_use]
    pub fn new(ctx: RowContext) -> Self {
        let mut buffer = BitplaneBuffer {
            words: [[[0u16; COLS]; DEPTH as usize]; NROWS],
            ctx,
        };
        buffer.fill_internal(Rgb888::default());
        buffer
    }

    /// Update the brightness cutoff used by subsequent encodes.
    pub fn set_cutoff(&mut self, cutoff: u16) {
        self.ctx.cutoff = cutoff;
    }

    /// Update the gamma mode used by subsequent encodes.
    pub fn set_gamma(&mut self, gamma: GammaMode) {
        self.ctx.gamma = gamma;
    }

    /// Read-only access to the active row context.
    #[must_use]
    pub fn ctx(&self) -> &RowContext {
        &self.ctx
    }

    fn half_row(y: usize) -> (usize, Half) {
        if y < NROWS {
            (y, Half::Top)
        } else {
            (y - NROWS, Half::Bottom)
        }
    }

    /// Set one pixel. Out-of-range coordinates are silently ignored. The
    /// opposite half's color bits at this column are preserved verbatim.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb888) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= COLS || y >= ROWS {
            return;
        }
        let (row, half) = Self::half_row(y);
        let storage_x = x ^ 1;

        for i in 0..DEPTH {
            let common = encoder::encode_common(&self.ctx, x as u16, row as u16, i);
            let new_bits = encoder::half_color_bits(color, self.ctx.gamma, i, half);
            let preserve_mask = match half {
                Half::Top => BOTTOM_COLOR_MASK,
                Half::Bottom => TOP_COLOR_MASK,
            };
            let existing = self.words[row][i as usize][storage_x];
            let preserved = existing & preserve_mask;
            self.words[row][i as usize][storage_x] = common | new_bits | preserved;
        }
    }

    /// Fill every pixel with `color`; both halves written from known data,
    /// so no preservation read is needed.
    pub fn fill(&mut self, color: Rgb888) {
        self.fill_internal(color);
    }

    /// Zero the buffer to black.
    pub fn erase(&mut self) {
        self.fill_internal(Rgb888::default());
    }

    fn fill_internal(&mut self, color: Rgb888) {
        for row in 0..NROWS {
            for i in 0..DEPTH {
                for x in 0..COLS {
                    let word = encoder::encode_word(&self.ctx, x as u16, row as u16, i, color, color);
                    self.words[row][i as usize][x ^ 1] = word;
                }
            }
        }
    }

    /// Read back one encoded word, for tests and for the stream engine
    /// adapter's descriptor slicing.
    #[must_use]
    pub fn word_at(&self, row: usize, plane: u8, storage_x: usize) -> u16 {
        self.words[row][plane as usize][storage_x]
    }

    /// Total word count across the whole buffer (`NROWS * DEPTH * COLS`).
    #[must_use]
    pub const fn word_count() -> usize {
        NROWS * DEPTH as usize * COLS
    }
}

impl<const ROWS: usize, const COLS: usize, const NROWS: usize> OriginDimensions
    for BitplaneBuffer<ROWS, COLS, NROWS>
{
    fn size(&self) -> Size {
        Size::new(COLS as u32, ROWS as u32)
    }
}

impl<const ROWS: usize, const COLS: usize, const NROWS: usize> DrawTarget
    for BitplaneBuffer<ROWS, COLS, NROWS>
{
    type Color = EgRgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, Rgb888::new(color.r(), color.g(), color.b()));
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(Rgb888::new(color.r(), color.g(), color.b()));
        Ok(())
    }
}

// SAFETY: the backing array is a single contiguous, fixed-size allocation
// of `u16` for the lifetime of the buffer; `read_buffer` reports exactly
// that slice.
unsafe impl<const ROWS: usize, const COLS: usize, const NROWS: usize> ReadBuffer
    for BitplaneBuffer<ROWS, COLS, NROWS>
{
    type Word = u16;

    unsafe fn read_buffer(&self) -> (*const u16, usize) {
        (self.words.as_ptr().cast::<u16>(), Self::word_count())
    }
}

// SAFETY: as above; this impl lets the stream engine borrow the buffer for
// the duration of a DMA transfer instead of taking ownership of it.
unsafe impl<const ROWS: usize, const COLS: usize, const NROWS: usize> ReadBuffer
    for &mut BitplaneBuffer<ROWS, COLS, NROWS>
{
    type Word = u16;

    unsafe fn read_buffer(&self) -> (*const u16, usize) {
        (self.words.as_ptr().cast::<u16>(), BitplaneBuffer::<ROWS, COLS, NROWS>::word_count())
    }
}

#[cfg(feature = "defmt")]
impl<const ROWS: usize, const COLS: usize, const NROWS: usize> defmt::Format
    for BitplaneBuffer<ROWS, COLS, NROWS>
{
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "BitplaneBuffer({}x{})", COLS, ROWS);
    }
}
