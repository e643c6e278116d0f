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

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use roundtable_engine::allocate;
use roundtable_model::table::TableDescriptor;
use roundtable_report::{
    roster::Roster,
    sink::{MemorySink, persist_plan},
    summary::{TableDirectory, by_event, by_participant, by_round},
};

#[test]
fn test_checked_in_attendees_are_allocated_and_persisted() {
    let mut roster = Roster::new();
    let attendees = [
        (1u32, "Ada"),
        (2, "Grace"),
        (3, "Linus"),
        (4, "Barbara"),
        (5, "Ken"),
        (6, "Dennis"),
        (7, "Frances"),
    ];
    for (id, name) in attendees {
        roster.register(id, name).unwrap();
    }
    for id in [1, 2, 3, 4, 5, 6] {
        roster.check_in(&id).unwrap();
    }

    let tables = TableDescriptor::uniform(100, 3, 2);
    let directory = TableDirectory::from_tables(&tables);
    let outcome = allocate(
        roster.checked_in_ids(),
        tables,
        Some(5),
        ChaCha8Rng::seed_from_u64(21),
    )
    .unwrap();
    let plan = outcome.plan();

    // Frances never checked in.
    assert!(by_participant(plan, &7, &directory).is_empty());
    assert_eq!(by_participant(plan, &1, &directory).len(), plan.num_rounds());

    let rounds = by_round(plan);
    assert_eq!(rounds.len(), plan.num_rounds());
    assert!(rounds.iter().all(|r| r.allocations.len() == 3));

    let event = by_event(plan, &roster, &directory);
    for tables in event.values() {
        assert_eq!(
            tables.keys().collect::<Vec<_>>(),
            vec!["Table 1", "Table 2", "Table 3"]
        );
        assert!(tables.values().flatten().all(|name| name != "Frances"));
    }

    let mut sink = MemorySink::new();
    let summary = persist_plan(plan, &mut sink).unwrap();
    assert_eq!(summary.rounds, plan.num_rounds());
    assert_eq!(summary.seats, plan.seated_count());
    assert_eq!(&sink.to_plan(), plan);
}

#[test]
fn test_lone_attendee_plan_round_trips_with_empty_tables() {
    let tables = TableDescriptor::uniform(1, 2, 4);
    let ids: Vec<_> = tables.iter().map(|t| t.id).collect();
    let outcome = allocate(vec![7u32], tables, None, ChaCha8Rng::seed_from_u64(3)).unwrap();
    let plan = outcome.plan();
    assert!(plan.num_rounds() >= 1);

    let mut sink = MemorySink::new();
    persist_plan(plan, &mut sink).unwrap();

    assert_eq!(&sink.to_plan_with_tables(&ids), plan);
    assert!(
        sink.to_plan_with_tables(&ids)
            .iter()
            .all(|round| round.seatings().len() == 2)
    );
}
