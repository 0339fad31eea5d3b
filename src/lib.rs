#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod channel_map;
pub mod color;
pub mod composer;
pub mod driver;
pub mod error;
pub mod frame;
pub mod guard;
pub mod pattern;
pub mod scheduler;

mod registry;

pub use channel_map::ChannelMap;
pub use color::{brightness_curve, format_hex, parse_hex, ColorCorrection, HexColor, Rgb12, Rgb8};
pub use composer::{Composer, ComposerConfig};
pub use driver::Tlc5947;
pub use error::{Error, Result};
pub use frame::{Frame, FRAME_SIZE, LED_COUNT};
pub use pattern::{parse, Pattern, PatternId, Token};
pub use scheduler::{TickReport, TickScheduler};

pub use embassy_time::{Duration, Instant};

/// Anything that consumes periodic ticks.
///
/// Implemented by the driver so host timing code can stay generic over
/// what it paces.
pub trait TickHandler {
    /// Advance by one tick.
    fn tick(&mut self);
}
