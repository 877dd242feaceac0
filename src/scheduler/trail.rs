//! Undo trail for tentative placements.
//!
//! Every mutation made during a backtracking search is recorded together
//! with what is needed to invert it. A frame marks the trail length at a
//! decision point; [`SearchTrail::backtrack`] undoes everything recorded
//! since the innermost frame, in reverse order.

use super::state::SearchState;

/// One recorded mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) enum TrailEntry {
    /// `matchup` was placed into `slot`.
    Placed { matchup: usize, slot: usize },
    /// `matchup` was evicted from `slot`.
    Evicted { matchup: usize, slot: usize },
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SearchTrail {
    entries: Vec<TrailEntry>,
    frames: Vec<usize>,
}

impl SearchTrail {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Opens a frame at the current trail length.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Places `matchup` into `slot` and records it.
    pub fn place(&mut self, state: &mut SearchState<'_, '_>, matchup: usize, slot: usize) {
        state.assign(matchup, slot);
        self.entries.push(TrailEntry::Placed { matchup, slot });
    }

    /// Evicts `matchup` from its slot and records it.
    pub fn evict(&mut self, state: &mut SearchState<'_, '_>, matchup: usize) -> Option<usize> {
        let slot = state.unassign(matchup)?;
        self.entries.push(TrailEntry::Evicted { matchup, slot });
        Some(slot)
    }

    /// Undoes every entry of the innermost frame and closes it.
    pub fn backtrack(&mut self, state: &mut SearchState<'_, '_>) {
        let Some(start) = self.frames.pop() else {
            return;
        };
        while self.entries.len() > start {
            match self.entries.pop() {
                Some(TrailEntry::Placed { matchup, .. }) => {
                    state.unassign(matchup);
                }
                Some(TrailEntry::Evicted { matchup, slot }) => state.assign(matchup, slot),
                None => break,
            }
        }
    }

    /// Closes the innermost frame, keeping its entries in the parent frame.
    #[inline]
    pub fn commit(&mut self) {
        self.frames.pop();
        if self.frames.is_empty() {
            self.entries.clear();
        }
    }
}
