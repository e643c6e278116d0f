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

//! Summary views of a plan.
//!
//! - `by_round`: every round with the participant ids per table.
//! - `by_participant`: the table number a participant sits at, per round.
//! - `by_event`: every round, every table, with attendee names.
//!
//! Keyed views use `IndexMap` so rounds and tables keep plan order when
//! serialized.

use crate::roster::Roster;
use indexmap::IndexMap;
use roundtable_model::{
    model::ParticipantId,
    plan::Plan,
    table::{TableDescriptor, TableId},
};
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableAllocationSummary<P> {
    pub table_id: TableId,
    pub participant_ids: Vec<P>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary<P> {
    pub round_number: usize,
    pub allocations: Vec<TableAllocationSummary<P>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TableNumber {
    pub table_number: u64,
}

/// Maps table ids to the numbers printed on the tables.
///
/// Tables missing from the directory are labeled with their id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDirectory {
    numbers: FxHashMap<TableId, u64>,
}

impl TableDirectory {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Numbers tables from 1 in descriptor order.
    pub fn from_tables(tables: &[TableDescriptor]) -> Self {
        let numbers = tables
            .iter()
            .zip(1u64..)
            .map(|(table, number)| (table.id, number))
            .collect();
        Self { numbers }
    }

    #[inline]
    pub fn insert(&mut self, table: TableId, number: u64) -> Option<u64> {
        self.numbers.insert(table, number)
    }

    #[inline]
    pub fn number_of(&self, table: TableId) -> u64 {
        self.numbers.get(&table).copied().unwrap_or(table.get())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

#[inline]
fn round_key(number: usize) -> String {
    format!("Round {}", number)
}

#[inline]
fn table_key(number: u64) -> String {
    format!("Table {}", number)
}

pub fn by_round<P>(plan: &Plan<P>) -> Vec<RoundSummary<P>>
where
    P: ParticipantId,
{
    plan.iter()
        .map(|round| RoundSummary {
            round_number: round.number(),
            allocations: round
                .seatings()
                .iter()
                .map(|seating| TableAllocationSummary {
                    table_id: seating.table,
                    participant_ids: seating.participants.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Returns `"Round N" -> table number` for every round `participant` sits in.
/// Rounds the participant sat out are absent.
pub fn by_participant<P>(
    plan: &Plan<P>,
    participant: &P,
    directory: &TableDirectory,
) -> IndexMap<String, TableNumber>
where
    P: ParticipantId,
{
    plan.iter()
        .filter_map(|round| {
            round.table_of(participant).map(|table| {
                (
                    round_key(round.number()),
                    TableNumber {
                        table_number: directory.number_of(table),
                    },
                )
            })
        })
        .collect()
}

/// Returns `"Round N" -> "Table M" -> names` for the whole plan.
///
/// Participants without a roster entry are rendered with `Debug`.
pub fn by_event<P>(
    plan: &Plan<P>,
    roster: &Roster<P>,
    directory: &TableDirectory,
) -> IndexMap<String, IndexMap<String, Vec<String>>>
where
    P: ParticipantId,
{
    plan.iter()
        .map(|round| {
            let tables = round
                .seatings()
                .iter()
                .map(|seating| {
                    let names = seating
                        .participants
                        .iter()
                        .map(|p| match roster.name_of(p) {
                            Some(name) => name.to_string(),
                            None => format!("{:?}", p),
                        })
                        .collect();
                    (table_key(directory.number_of(seating.table)), names)
                })
                .collect();
            (round_key(round.number()), tables)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_model::plan::{Round, TableSeating};

    fn plan() -> Plan<u32> {
        let mut plan = Plan::new();
        plan.push(Round::new(
            1,
            vec![
                TableSeating::new(TableId::new(10), vec![1, 2]),
                TableSeating::new(TableId::new(11), vec![3, 4]),
            ],
        ));
        plan.push(Round::new(
            2,
            vec![
                TableSeating::new(TableId::new(10), vec![1, 3]),
                TableSeating::new(TableId::new(11), vec![2]),
            ],
        ));
        plan
    }

    fn directory() -> TableDirectory {
        TableDirectory::from_tables(&TableDescriptor::uniform(10, 2, 2))
    }

    #[test]
    fn test_by_round_serializes_like_round_summaries() {
        let summaries = by_round(&plan());
        assert_eq!(summaries.len(), 2);

        let json = serde_json::to_value(&summaries[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "round_number": 1,
                "allocations": [
                    {"table_id": 10, "participant_ids": [1, 2]},
                    {"table_id": 11, "participant_ids": [3, 4]}
                ]
            })
        );
    }

    #[test]
    fn test_by_participant_skips_rounds_sat_out() {
        let view = by_participant(&plan(), &4, &directory());
        assert_eq!(view.len(), 1);
        assert_eq!(view["Round 1"], TableNumber { table_number: 2 });

        let json = serde_json::to_string(&by_participant(&plan(), &2, &directory())).unwrap();
        assert_eq!(
            json,
            r#"{"Round 1":{"table_number":1},"Round 2":{"table_number":2}}"#
        );
    }

    #[test]
    fn test_by_participant_never_seated_is_empty() {
        assert!(by_participant(&plan(), &99, &directory()).is_empty());
    }

    #[test]
    fn test_by_event_uses_names_and_falls_back_to_ids() {
        let mut roster = Roster::new();
        roster.register(1, "Ada").unwrap();
        roster.register(2, "Grace").unwrap();
        roster.register(3, "Linus").unwrap();

        let view = by_event(&plan(), &roster, &directory());
        assert_eq!(view.keys().collect::<Vec<_>>(), vec!["Round 1", "Round 2"]);
        assert_eq!(view["Round 1"]["Table 1"], vec!["Ada", "Grace"]);
        assert_eq!(view["Round 1"]["Table 2"], vec!["Linus", "4"]);
        assert_eq!(view["Round 2"]["Table 2"], vec!["Grace"]);
    }

    #[test]
    fn test_directory_falls_back_to_table_id() {
        let mut directory = TableDirectory::new();
        assert_eq!(directory.number_of(TableId::new(42)), 42);
        directory.insert(TableId::new(42), 3);
        assert_eq!(directory.number_of(TableId::new(42)), 3);
        assert_eq!(directory.len(), 1);
    }
}
