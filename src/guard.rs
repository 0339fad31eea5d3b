//! Tick suppression guard.
//!
//! Mutators restructure the pattern list and the per-LED maps while a
//! timer-driven tick may preempt them. The guard is a nonnegative hold
//! counter: every mutator holds it for the duration of its structural
//! work, and `tick` returns without touching anything while at least one
//! hold is alive. The counter lives behind a critical section so reading
//! and writing it is sound from interrupt context.

use core::cell::Cell;

use critical_section::Mutex;

/// Counts live mutator holds; nonzero suppresses `tick`.
pub struct TickGuard {
    holds: Mutex<Cell<u8>>,
}

impl TickGuard {
    pub const fn new() -> Self {
        Self {
            holds: Mutex::new(Cell::new(0)),
        }
    }

    /// Take a hold for the duration of a structural change.
    ///
    /// Holds nest; the guard releases when the last one drops.
    pub fn hold(&self) -> GuardHold<'_> {
        self.acquire();
        GuardHold { guard: self }
    }

    /// Whether any mutator currently holds the guard.
    pub fn is_held(&self) -> bool {
        critical_section::with(|cs| self.holds.borrow(cs).get() != 0)
    }

    /// Take a hold without a release token.
    ///
    /// Pair every call with [`TickGuard::release`].
    pub fn acquire(&self) {
        critical_section::with(|cs| {
            let holds = self.holds.borrow(cs);
            holds.set(holds.get().saturating_add(1));
        });
    }

    /// Give back a hold taken with [`TickGuard::acquire`].
    ///
    /// Releasing more often than acquiring leaves the guard open rather
    /// than underflowing.
    pub fn release(&self) {
        critical_section::with(|cs| {
            let holds = self.holds.borrow(cs);
            holds.set(holds.get().saturating_sub(1));
        });
    }
}

/// Live hold on a [`TickGuard`]; releases on drop.
#[must_use = "the guard releases as soon as the hold is dropped"]
pub struct GuardHold<'a> {
    guard: &'a TickGuard,
}

impl Drop for GuardHold<'_> {
    fn drop(&mut self) {
        self.guard.release();
    }
}
