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

//! Handing a plan to storage.
//!
//! `persist_plan` walks a plan and, per round, creates one round record
//! followed by one seat record per seated participant, then commits once.
//! Storage backends implement `PlanSink`. `MemorySink` keeps the records in
//! memory and can rebuild the plan from them.

use crate::error::ReportError;
use roundtable_model::{
    model::ParticipantId,
    plan::{Plan, Round, TableSeating},
    table::TableId,
};
use serde::Serialize;

/// Handle of a round record created by a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoundKey(u64);

impl RoundKey {
    #[inline]
    pub const fn new(key: u64) -> Self {
        Self(key)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RoundKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Receives the records of a plan.
pub trait PlanSink<P>
where
    P: ParticipantId,
{
    type Error;

    /// Creates the record for round `number` and returns its key.
    fn begin_round(&mut self, number: usize) -> Result<RoundKey, Self::Error>;

    /// Records that `participant` sits at `table` in `round`.
    fn seat(&mut self, round: RoundKey, table: TableId, participant: &P) -> Result<(), Self::Error>;

    /// Makes all records written so far durable.
    fn commit(&mut self) -> Result<(), Self::Error>;
}

/// Number of records written by `persist_plan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersistSummary {
    pub rounds: usize,
    pub seats: usize,
}

/// Writes every round and seat of `plan` to `sink` and commits.
///
/// Stops at the first sink error without committing.
pub fn persist_plan<P, S>(plan: &Plan<P>, sink: &mut S) -> Result<PersistSummary, S::Error>
where
    P: ParticipantId,
    S: PlanSink<P> + ?Sized,
{
    let mut summary = PersistSummary::default();

    for round in plan {
        let key = sink.begin_round(round.number())?;
        summary.rounds += 1;

        for seating in round.seatings() {
            for participant in &seating.participants {
                sink.seat(key, seating.table, participant)?;
                summary.seats += 1;
            }
        }
    }

    sink.commit()?;
    Ok(summary)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    pub key: RoundKey,
    pub round_number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatRecord<P> {
    pub round: RoundKey,
    pub table_id: TableId,
    pub participant_id: P,
}

/// A sink that keeps records in memory.
///
/// Keys are assigned from 1 in creation order. Rounds must be begun in order
/// starting at 1. Writes after `commit` fail.
#[derive(Debug, Clone)]
pub struct MemorySink<P> {
    rounds: Vec<RoundRecord>,
    seats: Vec<SeatRecord<P>>,
    committed: bool,
}

impl<P> Default for MemorySink<P> {
    fn default() -> Self {
        Self {
            rounds: Vec::new(),
            seats: Vec::new(),
            committed: false,
        }
    }
}

impl<P> MemorySink<P>
where
    P: ParticipantId,
{
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    #[inline]
    pub fn seats(&self) -> &[SeatRecord<P>] {
        &self.seats
    }

    #[inline]
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Rebuilds a plan from the stored records.
    ///
    /// Tables appear in the order their first seat was written. Tables
    /// nobody sat at in a round have no records and are absent. Use
    /// `to_plan_with_tables` to keep them.
    pub fn to_plan(&self) -> Plan<P> {
        self.rebuild(&[])
    }

    /// Rebuilds a plan listing every table of `tables` in each round, in the
    /// given order, with an empty seating where nobody sat. Seats at tables
    /// missing from `tables` follow in the order they were written.
    ///
    /// ```rust
    /// use roundtable_model::{
    ///     plan::{Plan, Round, TableSeating},
    ///     table::TableId,
    /// };
    /// use roundtable_report::sink::{MemorySink, persist_plan};
    ///
    /// let tables = [TableId::new(1), TableId::new(2)];
    /// let mut plan = Plan::new();
    /// plan.push(Round::new(
    ///     1,
    ///     vec![
    ///         TableSeating::new(tables[0], vec!["a"]),
    ///         TableSeating::new(tables[1], vec![]),
    ///     ],
    /// ));
    ///
    /// let mut sink = MemorySink::new();
    /// persist_plan(&plan, &mut sink).unwrap();
    /// assert_eq!(sink.to_plan_with_tables(&tables), plan);
    /// ```
    pub fn to_plan_with_tables(&self, tables: &[TableId]) -> Plan<P> {
        self.rebuild(tables)
    }

    fn rebuild(&self, tables: &[TableId]) -> Plan<P> {
        let mut plan = Plan::new();

        for record in &self.rounds {
            let mut seatings: Vec<TableSeating<P>> = tables
                .iter()
                .map(|&table| TableSeating::new(table, Vec::new()))
                .collect();
            for seat in self.seats.iter().filter(|s| s.round == record.key) {
                match seatings.iter_mut().find(|s| s.table == seat.table_id) {
                    Some(seating) => seating.participants.push(seat.participant_id.clone()),
                    None => seatings.push(TableSeating::new(
                        seat.table_id,
                        vec![seat.participant_id.clone()],
                    )),
                }
            }
            plan.push(Round::new(record.round_number, seatings));
        }

        plan
    }

    fn ensure_open(&self) -> Result<(), ReportError> {
        if self.committed {
            return Err(ReportError::AlreadyCommitted);
        }
        Ok(())
    }
}

impl<P> PlanSink<P> for MemorySink<P>
where
    P: ParticipantId,
{
    type Error = ReportError;

    fn begin_round(&mut self, number: usize) -> Result<RoundKey, Self::Error> {
        self.ensure_open()?;
        let expected = self.rounds.len() + 1;
        if number != expected {
            return Err(ReportError::NonContiguousRound {
                expected,
                found: number,
            });
        }
        let key = RoundKey::new(self.rounds.len() as u64 + 1);
        self.rounds.push(RoundRecord {
            key,
            round_number: number,
        });
        Ok(key)
    }

    fn seat(&mut self, round: RoundKey, table: TableId, participant: &P) -> Result<(), Self::Error> {
        self.ensure_open()?;
        if !self.rounds.iter().any(|r| r.key == round) {
            return Err(ReportError::UnknownRound { round });
        }
        self.seats.push(SeatRecord {
            round,
            table_id: table,
            participant_id: participant.clone(),
        });
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.ensure_open()?;
        self.committed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> Plan<&'static str> {
        let mut plan = Plan::new();
        plan.push(Round::new(
            1,
            vec![
                TableSeating::new(TableId::new(1), vec!["a", "b"]),
                TableSeating::new(TableId::new(2), vec!["c"]),
            ],
        ));
        plan.push(Round::new(
            2,
            vec![
                TableSeating::new(TableId::new(1), vec!["a", "c"]),
                TableSeating::new(TableId::new(2), vec!["b"]),
            ],
        ));
        plan
    }

    #[test]
    fn test_persist_writes_one_record_per_round_and_seat() {
        let mut sink = MemorySink::new();
        let summary = persist_plan(&plan(), &mut sink).unwrap();

        assert_eq!(summary, PersistSummary { rounds: 2, seats: 6 });
        assert_eq!(sink.rounds().len(), 2);
        assert_eq!(sink.rounds()[1].round_number, 2);
        assert_eq!(sink.seats().len(), 6);
        assert_eq!(
            sink.seats()[2],
            SeatRecord {
                round: RoundKey::new(1),
                table_id: TableId::new(2),
                participant_id: "c"
            }
        );
        assert!(sink.is_committed());
    }

    #[test]
    fn test_records_rebuild_the_plan() {
        let original = plan();
        let mut sink = MemorySink::new();
        persist_plan(&original, &mut sink).unwrap();
        assert_eq!(sink.to_plan(), original);
    }

    #[test]
    fn test_empty_tables_survive_when_tables_are_given() {
        let tables = [TableId::new(1), TableId::new(2)];
        let mut original = Plan::new();
        for number in 1..=2 {
            original.push(Round::new(
                number,
                vec![
                    TableSeating::new(tables[0], vec!["a"]),
                    TableSeating::new(tables[1], vec![]),
                ],
            ));
        }

        let mut sink = MemorySink::new();
        persist_plan(&original, &mut sink).unwrap();

        assert_eq!(sink.to_plan_with_tables(&tables), original);
        assert_ne!(sink.to_plan(), original);
        assert_eq!(sink.to_plan().rounds()[0].seatings().len(), 1);
    }

    #[test]
    fn test_seats_at_unlisted_tables_are_kept() {
        let mut sink = MemorySink::new();
        persist_plan(&plan(), &mut sink).unwrap();

        let rebuilt = sink.to_plan_with_tables(&[TableId::new(2)]);
        let tables: Vec<_> = rebuilt.rounds()[0].seatings().iter().map(|s| s.table).collect();
        assert_eq!(tables, vec![TableId::new(2), TableId::new(1)]);
        assert_eq!(rebuilt.seated_count(), 6);
    }

    #[test]
    fn test_round_zero_is_rejected() {
        let mut sink = MemorySink::<&str>::new();
        assert_eq!(
            sink.begin_round(0),
            Err(ReportError::NonContiguousRound {
                expected: 1,
                found: 0
            })
        );
        assert!(sink.rounds().is_empty());
        assert!(sink.to_plan().is_empty());
    }

    #[test]
    fn test_round_gap_is_rejected() {
        let mut sink = MemorySink::<&str>::new();
        assert_eq!(
            sink.begin_round(2),
            Err(ReportError::NonContiguousRound {
                expected: 1,
                found: 2
            })
        );

        let key = sink.begin_round(1).unwrap();
        sink.seat(key, TableId::new(1), &"a").unwrap();
        assert_eq!(
            sink.begin_round(3),
            Err(ReportError::NonContiguousRound {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(sink.to_plan().num_rounds(), 1);
    }

    #[test]
    fn test_writes_after_commit_fail() {
        let mut sink = MemorySink::<&str>::new();
        persist_plan(&plan(), &mut sink).unwrap();
        assert_eq!(sink.begin_round(3), Err(ReportError::AlreadyCommitted));
        assert_eq!(persist_plan(&plan(), &mut sink), Err(ReportError::AlreadyCommitted));
    }

    #[test]
    fn test_seat_in_unknown_round_fails() {
        let mut sink = MemorySink::new();
        let err = sink.seat(RoundKey::new(7), TableId::new(1), &"a").unwrap_err();
        assert_eq!(err, ReportError::UnknownRound { round: RoundKey::new(7) });
    }

    struct FailingSink {
        fail_at_seat: usize,
        seats: usize,
        committed: bool,
    }

    impl PlanSink<&'static str> for FailingSink {
        type Error = String;

        fn begin_round(&mut self, number: usize) -> Result<RoundKey, Self::Error> {
            Ok(RoundKey::new(number as u64))
        }

        fn seat(&mut self, _r: RoundKey, _t: TableId, _p: &&'static str) -> Result<(), Self::Error> {
            self.seats += 1;
            if self.seats == self.fail_at_seat {
                return Err("disk full".to_string());
            }
            Ok(())
        }

        fn commit(&mut self) -> Result<(), Self::Error> {
            self.committed = true;
            Ok(())
        }
    }

    #[test]
    fn test_sink_error_aborts_without_commit() {
        let mut sink = FailingSink {
            fail_at_seat: 4,
            seats: 0,
            committed: false,
        };
        assert_eq!(persist_plan(&plan(), &mut sink), Err("disk full".to_string()));
        assert_eq!(sink.seats, 4);
        assert!(!sink.committed);
    }
}
