//! Perceptual brightness curve.
//!
//! Pattern programs adjust brightness linearly; the LED response is not
//! linear, so the stored level runs through a piecewise-linear curve
//! before it scales the base color. Inputs are quantized to
//! ten-thousandths and interpolated between twelve breakpoints.

/// Breakpoints as `(linear, perceptual)` pairs in ten-thousandths.
///
/// Both columns are monotone non-decreasing and pinned to 0 and 10000 at
/// the ends, so `curve(0.0) == 0.0` and `curve(1.0) == 1.0` hold exactly.
const BREAKPOINTS: [(u16, u16); 12] = [
    (0, 0),
    (500, 20),
    (1000, 70),
    (2000, 250),
    (3000, 600),
    (4000, 1150),
    (5000, 1900),
    (6000, 2900),
    (7000, 4250),
    (8000, 5800),
    (9000, 7700),
    (10000, 10000),
];

/// Map a linear brightness level in `[0, 1]` to its perceptual scale
/// factor in `[0, 1]`.
pub fn curve(level: f32) -> f32 {
    let quantized = quantize(level);
    for window in BREAKPOINTS.windows(2) {
        let (x0, y0) = window[0];
        let (x1, y1) = window[1];
        if quantized <= u32::from(x1) {
            let span = u32::from(x1 - x0);
            let rise = u32::from(y1 - y0);
            let offset = quantized - u32::from(x0);
            return (u32::from(y0) + (rise * offset) / span) as f32 / 10_000.0;
        }
    }
    1.0
}

/// Clamp to `[0, 1]` and round to ten-thousandths.
fn quantize(level: f32) -> u32 {
    let clamped = level.clamp(0.0, 1.0);
    (clamped * 10_000.0 + 0.5) as u32
}
