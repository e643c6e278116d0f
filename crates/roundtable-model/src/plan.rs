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

//! Allocation plans.
//!
//! A `Plan` is the complete output of one allocation run: an ordered list of
//! `Round`s numbered `1..=n` without gaps. Each round lists, per table in
//! walking order, the participants seated there (`TableSeating`). Participants
//! are reported with the caller's ids, not the engine's dense indices.

use crate::{
    encounter::EncounterSet,
    index::ParticipantIndex,
    model::{Model, ParticipantId},
    table::TableId,
};
use serde::Serialize;

/// The participants seated at one table during one round, in seating order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableSeating<P> {
    pub table: TableId,
    pub participants: Vec<P>,
}

impl<P> TableSeating<P> {
    #[inline]
    pub fn new(table: TableId, participants: Vec<P>) -> Self {
        Self {
            table,
            participants,
        }
    }

    /// Returns the number of occupied seats.
    #[inline]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Returns `true` if nobody sits at the table.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// One round: a numbered mapping from table to seated participants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Round<P> {
    number: usize,
    seatings: Vec<TableSeating<P>>,
}

impl<P> Round<P>
where
    P: ParticipantId,
{
    /// Creates a round. Round numbers start at 1.
    ///
    /// # Panics
    ///
    /// Panics if `number` is zero.
    #[inline]
    pub fn new(number: usize, seatings: Vec<TableSeating<P>>) -> Self {
        assert!(number > 0, "called `Round::new` with round number 0");
        Self { number, seatings }
    }

    /// Returns the 1-based round number.
    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    /// Returns the seatings in table walking order.
    #[inline]
    pub fn seatings(&self) -> &[TableSeating<P>] {
        &self.seatings
    }

    /// Returns the seating of a table, if the table takes part in the round.
    #[inline]
    pub fn seating(&self, table: TableId) -> Option<&TableSeating<P>> {
        self.seatings.iter().find(|s| s.table == table)
    }

    /// Returns the table a participant sits at in this round.
    pub fn table_of(&self, participant: &P) -> Option<TableId> {
        self.seatings
            .iter()
            .find(|s| s.participants.contains(participant))
            .map(|s| s.table)
    }

    /// Returns the number of seated participants over all tables.
    #[inline]
    pub fn seated_count(&self) -> usize {
        self.seatings.iter().map(TableSeating::len).sum()
    }

    /// Iterates over all seated participants, table by table.
    #[inline]
    pub fn participants(&self) -> impl Iterator<Item = &P> + '_ {
        self.seatings.iter().flat_map(|s| s.participants.iter())
    }
}

/// The ordered sequence of rounds produced by one allocation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Plan<P> {
    rounds: Vec<Round<P>>,
}

impl<P> Default for Plan<P> {
    fn default() -> Self {
        Self { rounds: Vec::new() }
    }
}

impl<P> Plan<P>
where
    P: ParticipantId,
{
    /// Creates an empty plan.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a round. Its number must follow the last round's number.
    ///
    /// # Panics
    ///
    /// Panics if the round number is not `num_rounds() + 1`.
    #[inline]
    pub fn push(&mut self, round: Round<P>) {
        assert_eq!(
            round.number(),
            self.rounds.len() + 1,
            "called `Plan::push` with a non-contiguous round number: expected {} but got {}",
            self.rounds.len() + 1,
            round.number()
        );

        self.rounds.push(round);
    }

    /// Returns the number of rounds.
    #[inline]
    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Returns `true` if the plan contains no rounds.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Returns all rounds in order.
    #[inline]
    pub fn rounds(&self) -> &[Round<P>] {
        &self.rounds
    }

    /// Returns the round with the given 1-based number.
    #[inline]
    pub fn round(&self, number: usize) -> Option<&Round<P>> {
        number.checked_sub(1).and_then(|i| self.rounds.get(i))
    }

    /// Iterates over the rounds in order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Round<P>> {
        self.rounds.iter()
    }

    /// Returns the total number of seat assignments over all rounds.
    #[inline]
    pub fn seated_count(&self) -> usize {
        self.rounds.iter().map(Round::seated_count).sum()
    }

    /// Returns the table of `participant` in round `number`, if seated.
    #[inline]
    pub fn table_of(&self, number: usize, participant: &P) -> Option<TableId> {
        self.round(number).and_then(|r| r.table_of(participant))
    }

    /// Recomputes the encounter set of this plan against `model`.
    /// Participants unknown to the model are ignored.
    pub fn encounter_set(&self, model: &Model<P>) -> EncounterSet {
        let mut encounters = EncounterSet::new(model.num_participants());
        let mut group: Vec<ParticipantIndex> = Vec::with_capacity(model.seats_per_table());
        for round in &self.rounds {
            for seating in round.seatings() {
                group.clear();
                group.extend(
                    seating
                        .participants
                        .iter()
                        .filter_map(|id| model.participant_index(id)),
                );
                encounters.record_group(&group);
            }
        }
        encounters
    }

    /// Consumes the plan and returns its rounds.
    #[inline]
    pub fn into_rounds(self) -> Vec<Round<P>> {
        self.rounds
    }
}

impl<'a, P> IntoIterator for &'a Plan<P>
where
    P: ParticipantId,
{
    type Item = &'a Round<P>;
    type IntoIter = std::slice::Iter<'a, Round<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P> std::fmt::Display for Plan<P>
where
    P: ParticipantId,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Plan Summary")?;
        writeln!(f, "   Rounds: {}", self.num_rounds())?;

        if self.is_empty() {
            writeln!(f)?;
            writeln!(f, "   (No rounds planned)")?;
            return Ok(());
        }

        for round in &self.rounds {
            writeln!(f)?;
            writeln!(f, "   Round {}", round.number())?;
            writeln!(f, "   {:<10} | {}", "Table", "Participants")?;
            writeln!(f, "   {:-<10}-+-{:-<12}", "", "")?;
            for seating in round.seatings() {
                let names = seating
                    .participants
                    .iter()
                    .map(|p| format!("{:?}", p))
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(f, "   {:<10} | {}", seating.table, names)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableDescriptor;

    fn seating(table: u64, participants: &[u32]) -> TableSeating<u32> {
        TableSeating::new(TableId::new(table), participants.to_vec())
    }

    fn two_round_plan() -> Plan<u32> {
        let mut plan = Plan::new();
        plan.push(Round::new(1, vec![seating(1, &[1, 2]), seating(2, &[3, 4])]));
        plan.push(Round::new(2, vec![seating(1, &[1, 3]), seating(2, &[2])]));
        plan
    }

    #[test]
    fn test_round_queries() {
        let plan = two_round_plan();
        let round = plan.round(2).unwrap();

        assert_eq!(round.number(), 2);
        assert_eq!(round.seated_count(), 3);
        assert_eq!(round.table_of(&3), Some(TableId::new(1)));
        assert_eq!(round.table_of(&4), None);
        assert_eq!(round.seating(TableId::new(2)).unwrap().participants, vec![2]);
        assert_eq!(round.participants().copied().collect::<Vec<_>>(), vec![1, 3, 2]);
    }

    #[test]
    fn test_plan_queries() {
        let plan = two_round_plan();

        assert_eq!(plan.num_rounds(), 2);
        assert!(!plan.is_empty());
        assert!(plan.round(0).is_none());
        assert!(plan.round(3).is_none());
        assert_eq!(plan.seated_count(), 7);
        assert_eq!(plan.table_of(1, &4), Some(TableId::new(2)));
        assert_eq!(plan.table_of(2, &4), None);
        assert_eq!((&plan).into_iter().count(), 2);
    }

    #[test]
    #[should_panic(expected = "called `Plan::push` with a non-contiguous round number")]
    fn test_push_rejects_gaps() {
        let mut plan = Plan::<u32>::new();
        plan.push(Round::new(2, Vec::new()));
    }

    #[test]
    #[should_panic(expected = "called `Round::new` with round number 0")]
    fn test_round_zero_is_rejected() {
        let _ = Round::<u32>::new(0, Vec::new());
    }

    #[test]
    fn test_encounter_set_is_recomputed_from_seatings() {
        let plan = two_round_plan();
        let model = Model::new(vec![1u32, 2, 3, 4], TableDescriptor::uniform(1, 2, 2)).unwrap();

        let encounters = plan.encounter_set(&model);
        // {1,2}, {3,4}, {1,3}
        assert_eq!(encounters.len(), 3);
        assert_eq!(encounters.possible_pairs(), 6);
    }

    #[test]
    fn test_display_empty_plan() {
        let plan = Plan::<u32>::new();
        let rendered = format!("{}", plan);
        assert!(rendered.contains("Rounds: 0"));
        assert!(rendered.contains("(No rounds planned)"));
    }

    #[test]
    fn test_display_lists_tables() {
        let plan = two_round_plan();
        let rendered = format!("{}", plan);

        assert!(rendered.starts_with("Plan Summary\n"));
        assert!(rendered.contains("   Round 1\n"));
        assert!(rendered.contains("   1          | 1, 2\n"));
        assert!(rendered.contains("   2          | 2\n"));
    }
}
