//! Logical-to-physical LED remapping.
//!
//! Hosts address LEDs by logical index 1 through 8; the map translates
//! each to a physical shift-register channel, or marks it absent so the
//! driver rejects it. Defaults to identity (logical n on channel n - 1).

use crate::error::{Error, Result};
use crate::frame::LED_COUNT;

/// Entry value that marks a logical LED as absent.
const ABSENT: i8 = -1;

/// Remap table from logical LED index to physical channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMap {
    slots: [i8; LED_COUNT],
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self::identity()
    }
}

impl ChannelMap {
    /// Logical LED n drives channel n - 1.
    pub const fn identity() -> Self {
        Self {
            slots: [0, 1, 2, 3, 4, 5, 6, 7],
        }
    }

    /// Install a new table.
    ///
    /// Each entry is a channel in `0..=8` or `-1` for absent. Anything
    /// else resets the table to identity and reports
    /// [`Error::TypeMismatch`].
    pub fn assign(&mut self, entries: [i8; LED_COUNT]) -> Result<()> {
        if entries.iter().any(|&e| !(ABSENT..=8).contains(&e)) {
            *self = Self::identity();
            return Err(Error::TypeMismatch);
        }
        self.slots = entries;
        Ok(())
    }

    /// Translate a logical LED index (1-based) to its physical channel.
    ///
    /// Absent entries, indexes outside `1..=8`, and entries naming a
    /// channel the device does not have all report
    /// [`Error::LedNotInMap`].
    pub fn resolve(&self, logical: u8) -> Result<u8> {
        let slot = match logical {
            1..=8 => self.slots[usize::from(logical) - 1],
            _ => return Err(Error::LedNotInMap),
        };
        match slot {
            0..=7 => Ok(slot as u8),
            _ => Err(Error::LedNotInMap),
        }
    }
}
