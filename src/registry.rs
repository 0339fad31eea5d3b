//! Pattern bookkeeping.
//!
//! Owns the insertion-ordered pattern list, the id allocator, and the
//! per-LED stacks that layer pattern ids onto physical channels. Removal
//! cascades: deleting a pattern purges every reference to its id so a
//! channel stack can never name a pattern that no longer exists.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::frame::LED_COUNT;
use crate::pattern::{Pattern, PatternId};

#[derive(Debug)]
pub(crate) struct PatternRegistry {
    list: Vec<Pattern>,
    maps: [Vec<PatternId>; LED_COUNT],
    last_id: u16,
}

impl PatternRegistry {
    pub(crate) fn new() -> Self {
        Self {
            list: Vec::new(),
            maps: core::array::from_fn(|_| Vec::new()),
            last_id: 0,
        }
    }

    pub(crate) fn at_mut(&mut self, index: usize) -> Option<&mut Pattern> {
        self.list.get_mut(index)
    }

    /// Hand out the next free id, skipping zero and wrapping after
    /// 65535. Probes past ids still carried by live patterns, so ids are
    /// unique among them; reuse after deletion is allowed.
    pub(crate) fn allocate_id(&mut self) -> Result<PatternId> {
        for _ in 0..u16::MAX {
            self.last_id = match self.last_id {
                u16::MAX => 1,
                id => id + 1,
            };
            let candidate = PatternId(self.last_id);
            if self.find(candidate).is_none() {
                return Ok(candidate);
            }
        }
        Err(Error::AllocationFailure)
    }

    pub(crate) fn find(&self, id: PatternId) -> Option<&Pattern> {
        self.list.iter().find(|pattern| pattern.id() == id)
    }

    pub(crate) fn find_mut(&mut self, id: PatternId) -> Option<&mut Pattern> {
        self.list.iter_mut().find(|pattern| pattern.id() == id)
    }

    /// Append a pattern to the list.
    pub(crate) fn insert(&mut self, pattern: Pattern) -> Result<()> {
        self.list
            .try_reserve(1)
            .map_err(|_| Error::AllocationFailure)?;
        self.list.push(pattern);
        Ok(())
    }

    /// Layer a pattern id on top of one channel's stack.
    pub(crate) fn attach(&mut self, channel: usize, id: PatternId) -> Result<()> {
        let map = &mut self.maps[channel];
        map.try_reserve(1).map_err(|_| Error::AllocationFailure)?;
        map.push(id);
        Ok(())
    }

    /// The id stack layered on one channel, bottom first.
    pub(crate) fn stack(&self, channel: usize) -> &[PatternId] {
        &self.maps[channel]
    }

    /// Remove a pattern and every channel reference to it.
    ///
    /// Returns whether the id named anything at all.
    pub(crate) fn remove(&mut self, id: PatternId) -> bool {
        let mut found = false;
        for map in &mut self.maps {
            map.retain(|&layered| layered != id);
            if map.is_empty() {
                // Release the map allocation, as the stack does not
                // shrink on its own.
                *map = Vec::new();
            }
        }
        if let Some(index) = self.list.iter().position(|pattern| pattern.id() == id) {
            self.list.remove(index);
            found = true;
        }
        found
    }
}
