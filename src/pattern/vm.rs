//! Pattern execution.
//!
//! Each tick a pattern runs as many tokens as it can until one of them
//! yields: an armed or counting sleep, a taken backwards jump, or the
//! terminal hold. Everything else executes back to back within the tick.

use super::{Pattern, Token, TokenSeq};
use crate::color::{brightness_curve, ColorCorrection};

/// What one tick's worth of execution did to a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// The pattern paused and stays alive. `dirty` reports whether its
    /// observable color state changed.
    Yielded { dirty: bool },
    /// The pattern ran off its program or faulted and must be removed.
    Terminated,
}

impl Pattern {
    /// Advance the pattern by one tick.
    ///
    /// Stack faults terminate the pattern, never the tick loop.
    pub(crate) fn step(&mut self, correction: &ColorCorrection) -> StepOutcome {
        let mut dirty = false;
        loop {
            let pc = usize::from(self.pc);
            let token = match &self.tokens {
                TokenSeq::Forever => return StepOutcome::Yielded { dirty },
                TokenSeq::Owned(tokens) => match tokens.get(pc) {
                    Some(token) => *token,
                    None => return StepOutcome::Terminated,
                },
            };
            match token {
                Token::Color(color) => {
                    let corrected = correction.apply(color);
                    self.base_color = corrected;
                    self.current_color = corrected;
                    self.brightness = 1.0;
                    dirty = true;
                    self.pc += 1;
                }
                Token::Transparent => {
                    self.visible = !self.visible;
                    dirty = true;
                    self.pc += 1;
                }
                Token::Sleep { duration, remaining } => {
                    if remaining == 0 {
                        // Arm the hold; a zero duration re-arms forever.
                        self.write_sleep(pc, duration);
                        return StepOutcome::Yielded { dirty };
                    }
                    let left = remaining - 1;
                    self.write_sleep(pc, left);
                    if left == 0 {
                        self.pc += 1;
                        continue;
                    }
                    return StepOutcome::Yielded { dirty };
                }
                Token::Brightness(delta) => {
                    self.brightness = (self.brightness + delta).clamp(0.0, 1.0);
                    self.current_color = self.base_color.scaled(brightness_curve(self.brightness));
                    dirty = true;
                    self.pc += 1;
                }
                Token::Increment => {
                    self.adjust_top(1);
                    self.pc += 1;
                }
                Token::Decrement => {
                    self.adjust_top(-1);
                    self.pc += 1;
                }
                Token::Push(value) => {
                    if self.stack.push(value).is_err() {
                        log::warn!("pattern {}: stack overflow, terminating", self.id);
                        return StepOutcome::Terminated;
                    }
                    self.pc += 1;
                }
                Token::Pop => {
                    if self.stack.len() == 1 {
                        log::warn!("pattern {}: stack underflow, terminating", self.id);
                        return StepOutcome::Terminated;
                    }
                    self.stack.pop();
                    self.pc += 1;
                }
                Token::Mark => {
                    self.pc += 1;
                }
                Token::JumpNonZero(target) => {
                    if self.stack_top() != 0 {
                        self.pc = target;
                        return StepOutcome::Yielded { dirty };
                    }
                    self.pc += 1;
                }
                Token::Forever => {
                    // Park and hand the token allocation back; every
                    // collapsed pattern shares one static program.
                    self.tokens = TokenSeq::Forever;
                    self.pc = 0;
                    return StepOutcome::Yielded { dirty };
                }
            }
        }
    }

    fn stack_top(&self) -> i16 {
        self.stack.last().copied().unwrap_or(0)
    }

    fn adjust_top(&mut self, delta: i16) {
        if let Some(top) = self.stack.last_mut() {
            *top = top.wrapping_add(delta);
        }
    }

    fn write_sleep(&mut self, index: usize, remaining: u32) {
        if let TokenSeq::Owned(tokens) = &mut self.tokens {
            if let Some(Token::Sleep { remaining: slot, .. }) = tokens.get_mut(index) {
                *slot = remaining;
            }
        }
    }
}
