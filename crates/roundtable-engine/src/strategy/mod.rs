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

//! # Round Strategies
//!
//! A round strategy decides who sits where in the next round. It receives the
//! encounters of all previous rounds as a read-only snapshot and writes its
//! proposal into a `RoundDraft`: one group per table (in table walking order)
//! and the participants it could not seat.
//!
//! Strategies never record encounters themselves. The engine applies the
//! unseated policy to the draft, records the new pairs and turns the draft
//! into a `Round`.
//!
//! ## Submodules
//!
//! - `greedy`: shuffle, then fill tables with participants who have not met
//!   anybody already at the table.
//! - `rotation`: deterministic seat rotation over a tables x seats grid.

pub mod greedy;
pub mod rotation;

use roundtable_model::{
    encounter::EncounterSet,
    index::{ParticipantIndex, TableIndex},
    model::{Model, ParticipantId},
    plan::{Round, TableSeating},
};
use smallvec::SmallVec;

/// Participants of one table in a draft. Tables rarely exceed eight seats.
pub type Group = SmallVec<[ParticipantIndex; 8]>;

/// A proposed round, expressed in dense participant indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundDraft {
    groups: Vec<Group>,
    leftovers: Vec<ParticipantIndex>,
}

impl RoundDraft {
    /// Creates an empty draft for `num_tables` tables.
    #[inline]
    pub fn new(num_tables: usize) -> Self {
        Self {
            groups: vec![Group::new(); num_tables],
            leftovers: Vec::new(),
        }
    }

    /// Empties all groups and leftovers, resizing to `num_tables` tables.
    #[inline]
    pub fn reset(&mut self, num_tables: usize) {
        self.groups.resize_with(num_tables, Group::new);
        for group in &mut self.groups {
            group.clear();
        }
        self.leftovers.clear();
    }

    /// Returns the number of tables in the draft.
    #[inline]
    pub fn num_tables(&self) -> usize {
        self.groups.len()
    }

    /// Returns the participants drafted for a table.
    ///
    /// # Panics
    ///
    /// Panics if `table_index` is not in `0..num_tables()`.
    #[inline]
    pub fn group(&self, table_index: TableIndex) -> &[ParticipantIndex] {
        debug_assert!(
            table_index.get() < self.groups.len(),
            "called `RoundDraft::group` with table index out of bounds: the len is {} but the index is {}",
            self.groups.len(),
            table_index.get()
        );

        &self.groups[table_index.get()]
    }

    /// Returns all groups in table order.
    #[inline]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Seats a participant at a table.
    #[inline]
    pub fn seat(&mut self, table_index: TableIndex, participant: ParticipantIndex) {
        debug_assert!(
            table_index.get() < self.groups.len(),
            "called `RoundDraft::seat` with table index out of bounds: the len is {} but the index is {}",
            self.groups.len(),
            table_index.get()
        );

        self.groups[table_index.get()].push(participant);
    }

    /// Marks a participant as not seated in this round.
    #[inline]
    pub fn leave_out(&mut self, participant: ParticipantIndex) {
        self.leftovers.push(participant);
    }

    /// Returns the participants nobody seated.
    #[inline]
    pub fn leftovers(&self) -> &[ParticipantIndex] {
        &self.leftovers
    }

    /// Removes and returns the participants nobody seated.
    #[inline]
    pub fn take_leftovers(&mut self) -> Vec<ParticipantIndex> {
        std::mem::take(&mut self.leftovers)
    }

    /// Returns the number of seated participants.
    #[inline]
    pub fn seated_count(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }

    /// Returns the number of pairs the draft would add to `encounters`.
    #[inline]
    pub fn new_pairs(&self, encounters: &EncounterSet) -> usize {
        self.groups
            .iter()
            .map(|g| encounters.count_new_pairs(g))
            .sum()
    }

    /// Returns `true` if no participant is drafted twice (seated or left out).
    pub fn is_partition(&self, num_participants: usize) -> bool {
        let mut seen = vec![false; num_participants];
        self.groups
            .iter()
            .flat_map(|g| g.iter())
            .chain(self.leftovers.iter())
            .all(|p| {
                let slot = &mut seen[p.get()];
                !std::mem::replace(slot, true)
            })
    }

    /// Converts the draft into a round numbered `number`, translating dense
    /// indices back to the caller's ids.
    pub fn to_round<P>(&self, model: &Model<P>, number: usize) -> Round<P>
    where
        P: ParticipantId,
    {
        debug_assert!(
            self.groups.len() == model.num_tables(),
            "called `RoundDraft::to_round` with inconsistent table count: draft has {}, model has {}",
            self.groups.len(),
            model.num_tables()
        );

        let seatings = self
            .groups
            .iter()
            .zip(model.tables())
            .map(|(group, table)| {
                TableSeating::new(
                    table.id,
                    group.iter().map(|&p| model.participant(p).clone()).collect(),
                )
            })
            .collect();
        Round::new(number, seatings)
    }
}

/// Builds the seating of a single round.
pub trait RoundStrategy<P>
where
    P: ParticipantId,
{
    /// Returns the name of the strategy.
    fn name(&self) -> &str;

    /// Called before the first round of every run (including restarts).
    fn on_start(&mut self, _model: &Model<P>) {}

    /// Returns `true` if the strategy produces the same plan on every run.
    /// The engine does not restart deterministic strategies.
    fn is_deterministic(&self) -> bool {
        false
    }

    /// Drafts round `round_index` (0-based) into `draft`.
    ///
    /// `draft` arrives reset to `model.num_tables()` empty groups. Every
    /// participant must end up in at most one group or in the leftovers.
    fn build_round(
        &mut self,
        model: &Model<P>,
        round_index: usize,
        encounters: &EncounterSet,
        draft: &mut RoundDraft,
    );
}

impl<P> std::fmt::Debug for dyn RoundStrategy<P>
where
    P: ParticipantId,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RoundStrategy({})", self.name())
    }
}
