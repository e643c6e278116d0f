// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Handling of participants a strategy could not seat.
//!
//! After a strategy drafts a round, some participants may be left over
//! because every table either was full or already held somebody they had
//! met. `UnseatedPolicy` decides what happens to them.

use crate::strategy::RoundDraft;
use roundtable_model::{
    encounter::EncounterSet,
    index::{ParticipantIndex, TableIndex},
    model::{Model, ParticipantId},
};
use serde::{Deserialize, Serialize};

/// What to do with participants left over after a round was drafted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnseatedPolicy {
    /// Leftovers sit the round out.
    #[default]
    Drop,
    /// Leftovers take any free seat, preferring the table where they know the
    /// fewest people. Leftovers for which no seat is free sit the round out.
    AllowRepeat,
    /// Leftovers take a free seat the way `AllowRepeat` picks one. Once every
    /// table is full they join the least occupied table anyway, preferring
    /// the one where they know the fewest people.
    Overflow,
}

impl std::fmt::Display for UnseatedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnseatedPolicy::Drop => write!(f, "Drop"),
            UnseatedPolicy::AllowRepeat => write!(f, "AllowRepeat"),
            UnseatedPolicy::Overflow => write!(f, "Overflow"),
        }
    }
}

/// Counts produced by applying a policy to one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementCounts {
    /// Participants that sat the round out.
    pub dropped: usize,
    /// Pairs seated together again although they had already met.
    pub repeat_encounters: usize,
    /// Participants seated beyond a table's capacity.
    pub overflow_seatings: usize,
}

impl UnseatedPolicy {
    /// Returns `true` if the policy may seat more people than a table holds.
    #[inline]
    pub fn may_exceed_capacity(&self) -> bool {
        matches!(self, UnseatedPolicy::Overflow)
    }

    /// Applies the policy to the leftovers of `draft`.
    ///
    /// Afterwards `draft.leftovers()` holds exactly the participants that
    /// sit the round out.
    pub fn apply<P>(
        &self,
        model: &Model<P>,
        encounters: &EncounterSet,
        draft: &mut RoundDraft,
    ) -> PlacementCounts
    where
        P: ParticipantId,
    {
        let leftovers = draft.take_leftovers();
        let mut counts = PlacementCounts::default();

        for participant in leftovers {
            let target = match self {
                UnseatedPolicy::Drop => None,
                UnseatedPolicy::AllowRepeat => {
                    least_acquainted_free_table(model, encounters, draft, participant)
                }
                UnseatedPolicy::Overflow => {
                    least_acquainted_free_table(model, encounters, draft, participant)
                        .or_else(|| least_occupied_table(encounters, draft, participant))
                }
            };

            match target {
                Some(table_index) => {
                    let group = draft.group(table_index);
                    counts.repeat_encounters += encounters.count_met(participant, group);
                    if group.len() >= model.table_seats(table_index) {
                        counts.overflow_seatings += 1;
                    }
                    draft.seat(table_index, participant);
                }
                None => {
                    counts.dropped += 1;
                    draft.leave_out(participant);
                }
            }
        }

        counts
    }
}

/// Picks the table with a free seat where `participant` knows the fewest
/// people, breaking ties by occupancy and then by table order.
fn least_acquainted_free_table<P>(
    model: &Model<P>,
    encounters: &EncounterSet,
    draft: &RoundDraft,
    participant: ParticipantIndex,
) -> Option<TableIndex>
where
    P: ParticipantId,
{
    TableIndex::range(draft.num_tables())
        .filter(|&t| draft.group(t).len() < model.table_seats(t))
        .min_by_key(|&t| {
            let group = draft.group(t);
            (encounters.count_met(participant, group), group.len())
        })
}

/// Picks the least occupied table regardless of capacity, breaking ties by
/// acquaintances and then by table order.
fn least_occupied_table(
    encounters: &EncounterSet,
    draft: &RoundDraft,
    participant: ParticipantIndex,
) -> Option<TableIndex> {
    TableIndex::range(draft.num_tables()).min_by_key(|&t| {
        let group = draft.group(t);
        (group.len(), encounters.count_met(participant, group))
    })
}
