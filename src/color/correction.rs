//! Output color correction.
//!
//! Every color a pattern sets runs through a per-channel white-balance
//! scale followed by a full 3x3 gamut mix before it lands in the
//! pattern's base color. Both stages work in 12-bit units and truncate
//! on assignment.

use crate::color::Rgb12;
use crate::error::{Error, Result};

const IDENTITY_GAMUT: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
const IDENTITY_BALANCE: [f32; 3] = [1.0, 1.0, 1.0];

/// White-balance vector plus gamut matrix.
///
/// Invariant: every white-balance entry is in `[0, 1]`, every gamut entry
/// is in `[0, 1]` and every gamut row sums to at most one, so corrected
/// channels never leave the 12-bit range.
#[derive(Debug, Clone, Copy)]
pub struct ColorCorrection {
    white_balance: [f32; 3],
    gamut: [[f32; 3]; 3],
}

impl Default for ColorCorrection {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorCorrection {
    /// Identity correction: colors pass through untouched.
    pub const fn new() -> Self {
        Self {
            white_balance: IDENTITY_BALANCE,
            gamut: IDENTITY_GAMUT,
        }
    }

    /// Replace the white-balance vector.
    ///
    /// Entries are clamped to `[0, 1]`. Non-finite entries reset the
    /// vector to identity and report [`Error::TypeMismatch`].
    pub fn set_white_balance(&mut self, balance: [f32; 3]) -> Result<()> {
        if balance.iter().any(|v| !v.is_finite()) {
            self.white_balance = IDENTITY_BALANCE;
            return Err(Error::TypeMismatch);
        }
        for (slot, value) in self.white_balance.iter_mut().zip(balance) {
            *slot = value.clamp(0.0, 1.0);
        }
        Ok(())
    }

    /// Replace the gamut matrix.
    ///
    /// Entries are clamped to `[0, 1]` and assigned, then each row sum is
    /// checked against 1.0; any violation resets the matrix to identity
    /// and reports [`Error::InvalidGamut`]. Non-finite entries reset to
    /// identity and report [`Error::TypeMismatch`].
    pub fn set_gamut(&mut self, gamut: [[f32; 3]; 3]) -> Result<()> {
        if gamut.iter().flatten().any(|v| !v.is_finite()) {
            self.gamut = IDENTITY_GAMUT;
            return Err(Error::TypeMismatch);
        }
        for (row, values) in self.gamut.iter_mut().zip(gamut) {
            for (slot, value) in row.iter_mut().zip(values) {
                *slot = value.clamp(0.0, 1.0);
            }
        }
        if self.gamut.iter().any(|row| row.iter().sum::<f32>() > 1.0) {
            self.gamut = IDENTITY_GAMUT;
            return Err(Error::InvalidGamut);
        }
        Ok(())
    }

    /// Run one color through white balance, then the gamut mix.
    pub fn apply(&self, color: Rgb12) -> Rgb12 {
        let balanced = [
            (f32::from(color.r) * self.white_balance[0]) as u16 as f32,
            (f32::from(color.g) * self.white_balance[1]) as u16 as f32,
            (f32::from(color.b) * self.white_balance[2]) as u16 as f32,
        ];
        let mut mixed = [0u16; 3];
        for (channel, row) in mixed.iter_mut().zip(&self.gamut) {
            let value = row[0] * balanced[0] + row[1] * balanced[1] + row[2] * balanced[2];
            *channel = value as u16;
        }
        Rgb12::new(mixed[0], mixed[1], mixed[2])
    }
}
