//! Device facade.
//!
//! Binds a [`Composer`] to the wire: a byte-oriented bus for the 36-byte
//! grayscale frame plus the XLAT latch and BLANK output-enable lines.
//! `tick` is meant to be invoked from a host timer; it swallows bus
//! errors, as a timer callback has nowhere to report them.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::color::HexColor;
use crate::composer::{Composer, ComposerConfig};
use crate::error::Result;
use crate::frame::LED_COUNT;
use crate::pattern::PatternId;
use crate::TickHandler;

/// Pattern-programmed driver for one 24-channel grayscale sink.
pub struct Tlc5947<SPI, XLAT, BLANK> {
    composer: Composer,
    spi: SPI,
    xlat: XLAT,
    blank: BLANK,
    blanked: bool,
}

impl<SPI, XLAT, BLANK> Tlc5947<SPI, XLAT, BLANK>
where
    SPI: SpiBus,
    XLAT: OutputPin,
    BLANK: OutputPin,
{
    /// Take ownership of the bus and control lines.
    pub fn new(spi: SPI, xlat: XLAT, blank: BLANK) -> Self {
        Self {
            composer: Composer::new(),
            spi,
            xlat,
            blank,
            blanked: false,
        }
    }

    /// Like [`Tlc5947::new`], with an initial engine configuration.
    pub fn with_config(spi: SPI, xlat: XLAT, blank: BLANK, config: &ComposerConfig) -> Result<Self> {
        Ok(Self {
            composer: Composer::with_config(config)?,
            spi,
            xlat,
            blank,
            blanked: false,
        })
    }

    /// Advance all patterns and, if the frame changed, shift it out and
    /// latch the new grayscale values.
    ///
    /// Register this with a periodic timer; every call is one tick of
    /// pattern time.
    pub fn tick(&mut self) {
        let Some(frame) = self.composer.tick() else {
            return;
        };
        let bytes = *frame.as_bytes();
        if self.blanked {
            // Keep the change pending so un-blanking retransmits it.
            self.composer.mark_changed();
            return;
        }
        self.spi.write(&bytes).ok();
        self.xlat.set_low().ok();
        self.xlat.set_high().ok();
    }

    /// Drive the BLANK line. While blanked, outputs are forced off and
    /// frame transmission is withheld; un-blanking re-emits the current
    /// frame on the next tick.
    pub fn blank(&mut self, enabled: bool) {
        if enabled {
            self.blank.set_high().ok();
        } else {
            self.blank.set_low().ok();
            self.composer.mark_changed();
        }
        self.blanked = enabled;
    }

    /// See [`Composer::set`].
    pub fn set(&mut self, leds: &[u8], source: &str) -> Result<PatternId> {
        self.composer.set(leds, source)
    }

    /// See [`Composer::replace`].
    pub fn replace(&mut self, id: PatternId, source: &str) -> Result<PatternId> {
        self.composer.replace(id, source)
    }

    /// See [`Composer::delete`].
    pub fn delete(&mut self, id: PatternId) -> bool {
        self.composer.delete(id)
    }

    /// See [`Composer::get`].
    pub fn get(&self, led: u8) -> Result<HexColor> {
        self.composer.get(led)
    }

    /// See [`Composer::exists`].
    pub fn exists(&self, id: PatternId) -> bool {
        self.composer.exists(id)
    }

    /// See [`Composer::set_white_balance`].
    pub fn set_white_balance(&mut self, balance: [f32; 3]) -> Result<()> {
        self.composer.set_white_balance(balance)
    }

    /// See [`Composer::set_gamut`].
    pub fn set_gamut(&mut self, gamut: [[f32; 3]; 3]) -> Result<()> {
        self.composer.set_gamut(gamut)
    }

    /// See [`Composer::set_id_map`].
    pub fn set_id_map(&mut self, entries: [i8; LED_COUNT]) -> Result<()> {
        self.composer.set_id_map(entries)
    }

    /// Tear the driver down and hand the bus and pins back.
    pub fn release(self) -> (SPI, XLAT, BLANK) {
        (self.spi, self.xlat, self.blank)
    }

    /// The engine behind this driver.
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Mutable access to the engine behind this driver.
    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }
}

impl<SPI, XLAT, BLANK> TickHandler for Tlc5947<SPI, XLAT, BLANK>
where
    SPI: SpiBus,
    XLAT: OutputPin,
    BLANK: OutputPin,
{
    fn tick(&mut self) {
        Tlc5947::tick(self);
    }
}
