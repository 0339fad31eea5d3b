//! The composition engine.
//!
//! Owns every pattern, the per-channel layering, the color correction
//! and the packed output frame, with no hardware attached: one `tick`
//! advances all pattern programs, recomposes the frame if anything
//! observable changed, and hands the frame back for transmission. The
//! driver facade wraps this with a bus and pins; hosts and tests can run
//! the engine bare.

use crate::channel_map::ChannelMap;
use crate::color::{format_hex, ColorCorrection, HexColor, Rgb12};
use crate::error::{Error, Result};
use crate::frame::{Frame, LED_COUNT};
use crate::guard::TickGuard;
use crate::pattern::{parse, Pattern, PatternId, StepOutcome};
use crate::registry::PatternRegistry;

/// Initial configuration for a [`Composer`].
#[derive(Debug, Clone, Copy)]
pub struct ComposerConfig {
    /// Per-channel white-balance scale, each in `[0, 1]`.
    pub white_balance: [f32; 3],
    /// Gamut mixing matrix; rows must each sum to at most one.
    pub gamut: [[f32; 3]; 3],
    /// Logical-to-physical LED map entries.
    pub id_map: [i8; LED_COUNT],
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            white_balance: [1.0, 1.0, 1.0],
            gamut: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            id_map: [0, 1, 2, 3, 4, 5, 6, 7],
        }
    }
}

/// Pattern store, compositor and color pipeline behind one tick.
pub struct Composer {
    registry: PatternRegistry,
    correction: ColorCorrection,
    channels: ChannelMap,
    frame: Frame,
    guard: TickGuard,
    changed: bool,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    /// Engine with identity correction and identity LED map.
    ///
    /// Starts dirty so the first tick composes and emits an all-black
    /// frame.
    pub fn new() -> Self {
        Self {
            registry: PatternRegistry::new(),
            correction: ColorCorrection::new(),
            channels: ChannelMap::identity(),
            frame: Frame::new(),
            guard: TickGuard::new(),
            changed: true,
        }
    }

    /// Engine with the given initial configuration.
    pub fn with_config(config: &ComposerConfig) -> Result<Self> {
        let mut composer = Self::new();
        composer.set_white_balance(config.white_balance)?;
        composer.set_gamut(config.gamut)?;
        composer.set_id_map(config.id_map)?;
        Ok(composer)
    }

    /// Advance every pattern by one step and recompose.
    ///
    /// Returns the freshly packed frame when it needs transmitting, and
    /// `None` when nothing changed or a mutator currently holds the
    /// guard.
    pub fn tick(&mut self) -> Option<&Frame> {
        if self.guard.is_held() {
            return None;
        }
        self.advance_patterns();
        if !self.changed {
            return None;
        }
        self.compose();
        self.changed = false;
        Some(&self.frame)
    }

    /// Compile a pattern and layer it onto the given logical LEDs.
    ///
    /// Any failure after the pattern entered the list cascades: the
    /// pattern and every map entry it gained are removed again before
    /// the error returns.
    pub fn set(&mut self, leds: &[u8], source: &str) -> Result<PatternId> {
        let tokens = parse(source)?;
        let hold = self.guard.hold();
        let id = self.registry.allocate_id()?;
        self.registry.insert(Pattern::new(id, tokens))?;
        let mut failure = None;
        for &led in leds {
            let attached = self
                .channels
                .resolve(led)
                .and_then(|channel| self.registry.attach(usize::from(channel), id));
            if let Err(error) = attached {
                failure = Some(error);
                break;
            }
        }
        drop(hold);
        if let Some(error) = failure {
            self.delete(id);
            return Err(error);
        }
        self.changed = true;
        log::debug!("set: pattern {} layered on {} led(s)", id, leds.len());
        Ok(id)
    }

    /// Swap a live pattern's program, keeping its id and every layer
    /// entry that references it.
    pub fn replace(&mut self, id: PatternId, source: &str) -> Result<PatternId> {
        let tokens = parse(source)?;
        let hold = self.guard.hold();
        let Some(pattern) = self.registry.find_mut(id) else {
            return Err(Error::InvalidPatternId);
        };
        pattern.reinitialize(tokens);
        drop(hold);
        self.changed = true;
        log::debug!("replace: pattern {}", id);
        Ok(id)
    }

    /// Remove a pattern and all of its layer entries.
    ///
    /// Returns whether the id named a live pattern.
    pub fn delete(&mut self, id: PatternId) -> bool {
        let hold = self.guard.hold();
        let found = self.registry.remove(id);
        drop(hold);
        if found {
            self.changed = true;
            log::debug!("delete: pattern {}", id);
        }
        found
    }

    /// Whether a pattern with this id is still live.
    pub fn exists(&self, id: PatternId) -> bool {
        self.registry.find(id).is_some()
    }

    /// Borrow a live pattern for inspection.
    pub fn pattern(&self, id: PatternId) -> Option<&Pattern> {
        self.registry.find(id)
    }

    /// The current frame color of a logical LED, as `#RRGGBB`.
    pub fn get(&self, led: u8) -> Result<HexColor> {
        let channel = self.channels.resolve(led)?;
        let color = self.frame.get(usize::from(channel)).to_rgb8();
        Ok(format_hex(color))
    }

    /// Replace the white-balance vector; applies to colors patterns set
    /// from now on.
    pub fn set_white_balance(&mut self, balance: [f32; 3]) -> Result<()> {
        let _hold = self.guard.hold();
        self.correction.set_white_balance(balance)
    }

    /// Replace the gamut matrix; applies to colors patterns set from
    /// now on.
    pub fn set_gamut(&mut self, gamut: [[f32; 3]; 3]) -> Result<()> {
        let _hold = self.guard.hold();
        self.correction.set_gamut(gamut)
    }

    /// Replace the logical-to-physical LED map.
    pub fn set_id_map(&mut self, entries: [i8; LED_COUNT]) -> Result<()> {
        let _hold = self.guard.hold();
        self.channels.assign(entries)
    }

    /// Suppress tick processing until [`Composer::resume`] is called.
    ///
    /// Nests like the mutators' own holds; useful around multi-call
    /// updates that must land on the same tick boundary.
    pub fn suspend(&mut self) {
        self.guard.acquire();
    }

    /// Give back one [`Composer::suspend`] hold.
    pub fn resume(&mut self) {
        self.guard.release();
    }

    /// Whether tick processing is currently suppressed.
    pub fn is_suspended(&self) -> bool {
        self.guard.is_held()
    }

    /// Force the next tick to recompose and re-emit the frame.
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    fn advance_patterns(&mut self) {
        let mut index = 0;
        while let Some(pattern) = self.registry.at_mut(index) {
            match pattern.step(&self.correction) {
                StepOutcome::Yielded { dirty } => {
                    if dirty {
                        self.changed = true;
                    }
                    index += 1;
                }
                StepOutcome::Terminated => {
                    let id = pattern.id();
                    self.registry.remove(id);
                    self.changed = true;
                }
            }
        }
    }

    fn compose(&mut self) {
        for channel in 0..LED_COUNT {
            let color = self.resolve(channel);
            self.frame.set(channel, color);
        }
    }

    /// Walk one channel's layer stack from the top, settling on the
    /// first visible pattern; the bottom layer counts even when it is
    /// transparent. An empty stack is black.
    fn resolve(&self, channel: usize) -> Rgb12 {
        for (layer, &id) in self.registry.stack(channel).iter().enumerate().rev() {
            if let Some(pattern) = self.registry.find(id) {
                if pattern.visible() || layer == 0 {
                    return pattern.current_color();
                }
            }
        }
        Rgb12::BLACK
    }
}
