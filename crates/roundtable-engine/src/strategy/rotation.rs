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

//! Deterministic seat rotation.
//!
//! Participants are laid into a grid with one row per table and one column
//! per seat, in model order. Seat column `s` advances by `s` tables every
//! round, so the occupant of `(t, s)` sits at table `(t + s * r) mod m` in
//! round `r`. Column zero never moves.
//!
//! Two participants meet again only after a full cycle of `m` rounds when
//! the table count `m` is prime and at least the seat count. For other shapes
//! the schedule still respects capacity but pairs may repeat earlier.
//! Participants that do not fit in the grid are left over every round.

use crate::strategy::{RoundDraft, RoundStrategy};
use roundtable_model::{
    encounter::EncounterSet,
    index::{ParticipantIndex, TableIndex},
    model::{Model, ParticipantId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationStrategy;

impl RotationStrategy {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Returns the table of the participant at grid position `(table, seat)`
    /// in round `round_index`.
    #[inline]
    pub fn table_in_round(
        table: usize,
        seat: usize,
        round_index: usize,
        num_tables: usize,
    ) -> usize {
        debug_assert!(
            table < num_tables,
            "called `RotationStrategy::table_in_round` with table out of bounds: the len is {} but the index is {}",
            num_tables,
            table
        );

        let shift = ((seat % num_tables) * (round_index % num_tables)) % num_tables;
        (table + shift) % num_tables
    }

    /// Returns `true` if no pair repeats within `num_tables` rounds.
    pub fn is_repeat_free(num_tables: usize, seats: usize) -> bool {
        seats <= 1 || (num_tables >= seats && is_prime(num_tables))
    }
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

impl<P> RoundStrategy<P> for RotationStrategy
where
    P: ParticipantId,
{
    fn name(&self) -> &str {
        "RotationStrategy"
    }

    fn is_deterministic(&self) -> bool {
        true
    }

    fn build_round(
        &mut self,
        model: &Model<P>,
        round_index: usize,
        _encounters: &EncounterSet,
        draft: &mut RoundDraft,
    ) {
        let num_tables = model.num_tables();
        let seats = model.seats_per_table();
        let grid = model.total_capacity();

        for participant in ParticipantIndex::range(model.num_participants()) {
            let p = participant.get();
            if p >= grid {
                draft.leave_out(participant);
                continue;
            }
            let table = Self::table_in_round(p / seats, p % seats, round_index, num_tables);
            draft.seat(TableIndex::new(table), participant);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_model::table::TableDescriptor;

    fn model(participants: usize, tables: usize, seats: usize) -> Model<usize> {
        Model::new(0..participants, TableDescriptor::uniform(1, tables, seats)).unwrap()
    }

    fn run(model: &Model<usize>, rounds: usize) -> (Vec<RoundDraft>, EncounterSet) {
        let mut strategy = RotationStrategy::new();
        let mut encounters = EncounterSet::new(model.num_participants());
        let mut drafts = Vec::new();
        for r in 0..rounds {
            let mut draft = RoundDraft::new(model.num_tables());
            strategy.build_round(model, r, &encounters, &mut draft);
            for group in draft.groups() {
                encounters.record_group(group);
            }
            drafts.push(draft);
        }
        (drafts, encounters)
    }

    #[test]
    fn test_first_round_is_row_major() {
        let model = model(6, 3, 2);
        let (drafts, _) = run(&model, 1);
        let groups: Vec<Vec<usize>> = drafts[0]
            .groups()
            .iter()
            .map(|g| g.iter().map(|p| p.get()).collect())
            .collect();
        assert_eq!(groups, vec![vec![0, 1], vec![2, 3], vec![4, 5]]);
    }

    #[test]
    fn test_prime_tables_never_repeat_within_cycle() {
        // 5 tables x 3 seats: 15 participants, 5 rounds
        let model = model(15, 5, 3);
        let (drafts, encounters) = run(&model, 5);

        let added: usize = drafts.len() * 5 * 3;
        assert_eq!(encounters.len(), added);
        assert!(drafts.iter().all(|d| d.groups().iter().all(|g| g.len() == 3)));
        assert!(RotationStrategy::is_repeat_free(5, 3));
    }

    #[test]
    fn test_overflowing_participants_are_left_over() {
        let model = model(8, 2, 3);
        let (drafts, _) = run(&model, 2);
        for draft in &drafts {
            assert_eq!(draft.seated_count(), 6);
            assert_eq!(
                draft.leftovers(),
                &[ParticipantIndex::new(6), ParticipantIndex::new(7)]
            );
        }
    }

    #[test]
    fn test_capacity_respected_for_non_prime_shape() {
        let model = model(16, 4, 4);
        let (drafts, _) = run(&model, 4);
        assert!(drafts.iter().all(|d| d.groups().iter().all(|g| g.len() == 4)));
        assert!(!RotationStrategy::is_repeat_free(4, 4));
    }

    #[test]
    fn test_is_prime() {
        let primes: Vec<usize> = (0..20).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19]);
    }
}
