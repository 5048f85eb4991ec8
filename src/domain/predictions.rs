use std::collections::HashSet;

use crate::errors::ValidationError;

use super::models::{Pick, PredictionEntry};

pub const SLOT_COUNT: usize = 5;

/// One (match, pick) selector; `match_id` is `None` until a match is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredictionSlot {
    pub match_id: Option<i64>,
    pub pick: Pick,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionForm {
    slots: [PredictionSlot; SLOT_COUNT],
}

impl PredictionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a form from operator picks, filling slots in order.
    pub fn from_picks(team: &str, picks: &[PredictionEntry]) -> Result<Self, ValidationError> {
        if picks.len() > SLOT_COUNT {
            return Err(ValidationError::WrongPickCount {
                team: team.to_string(),
                chosen: picks.len(),
            });
        }
        let mut form = Self::new();
        form.fill(picks);
        Ok(form)
    }

    pub fn slots(&self) -> &[PredictionSlot; SLOT_COUNT] {
        &self.slots
    }

    pub fn set_slot(&mut self, index: usize, slot: PredictionSlot) -> bool {
        match self.slots.get_mut(index) {
            Some(existing) => {
                *existing = slot;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    /// Reset, then pre-fill from stored entries in the order given; anything
    /// past the fifth entry is ignored.
    pub fn fill(&mut self, entries: &[PredictionEntry]) {
        self.clear();
        for (slot, entry) in self.slots.iter_mut().zip(entries) {
            *slot = PredictionSlot {
                match_id: Some(entry.match_id),
                pick: entry.pick,
            };
        }
    }

    pub fn chosen(&self) -> Vec<PredictionEntry> {
        self.slots
            .iter()
            .filter_map(|slot| {
                slot.match_id.map(|match_id| PredictionEntry {
                    match_id,
                    pick: slot.pick,
                })
            })
            .collect()
    }

    /// The submission for this form: exactly five chosen, pairwise distinct matches.
    pub fn validate(&self, team: &str) -> Result<Vec<PredictionEntry>, ValidationError> {
        let chosen = self.chosen();

        if chosen.len() != SLOT_COUNT {
            return Err(ValidationError::WrongPickCount {
                team: team.to_string(),
                chosen: chosen.len(),
            });
        }

        let unique: HashSet<i64> = chosen.iter().map(|entry| entry.match_id).collect();
        if unique.len() != SLOT_COUNT {
            return Err(ValidationError::DuplicateMatch {
                team: team.to_string(),
            });
        }

        Ok(chosen)
    }
}

/// Parse a `MATCH_ID:PICK` argument, e.g. `123:X`.
pub fn parse_pick_arg(input: &str) -> Result<PredictionEntry, ValidationError> {
    let malformed = || ValidationError::MalformedArgument {
        input: input.to_string(),
        expected: "MATCH_ID:PICK",
    };

    let (id, pick) = input.split_once(':').ok_or_else(malformed)?;
    let match_id = id.trim().parse::<i64>().map_err(|_| malformed())?;
    let pick = pick.parse::<Pick>()?;

    Ok(PredictionEntry { match_id, pick })
}
