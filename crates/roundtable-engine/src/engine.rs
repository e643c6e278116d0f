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

//! Round-based allocation driver.
//!
//! The engine threads an `EncounterSet` through the round loop. Every round
//! the strategy drafts a seating from a read-only view of the encounters so
//! far, the unseated policy places or drops the leftovers, and the new pairs
//! are recorded before the round is appended to the plan. A run stops when
//! every pair has met, when the round cap is reached, or when a monitor asks
//! it to.
//!
//! Randomized strategies can be unlucky. With `restarts > 0` an incomplete
//! run is discarded and the allocation starts over from an empty encounter
//! set, keeping the best plan seen. Deterministic strategies are run once.

use crate::{
    config::DEFAULT_RESTARTS,
    error::EngineError,
    monitor::{
        allocation_monitor::{AllocationMonitor, SearchCommand},
        no_op::NoOpMonitor,
    },
    policy::UnseatedPolicy,
    result::{AllocationOutcome, TerminationReason},
    stats::AllocationStatistics,
    strategy::{RoundDraft, RoundStrategy, greedy::GreedyStrategy},
};
use rand::Rng;
use roundtable_model::{
    coverage::Coverage,
    encounter::EncounterSet,
    model::{Model, ParticipantId},
    plan::Plan,
    table::TableDescriptor,
};
use std::{cmp::Reverse, time::Instant};
use tracing::{debug, info};

/// A finished run, kept while the engine decides whether to restart.
struct RunRecord<P> {
    plan: Plan<P>,
    reason: TerminationReason,
    coverage: Coverage,
    statistics: AllocationStatistics,
}

impl<P> RunRecord<P> {
    /// Complete runs first, then more pairs, fewer people left out, fewer rounds.
    #[inline]
    fn rank(&self) -> (bool, usize, Reverse<u64>, Reverse<u64>) {
        (
            self.coverage.is_complete(),
            self.coverage.encountered,
            Reverse(self.statistics.dropped_seatings),
            Reverse(self.statistics.rounds),
        )
    }
}

/// Allocation engine.
///
/// The engine holds only its settings; every call to `allocate` starts from
/// a fresh encounter set, so one engine can serve many independent runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationEngine {
    policy: UnseatedPolicy,
    restarts: usize,
}

impl Default for AllocationEngine {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationEngine {
    /// Creates an engine with the `Drop` policy and the default restart budget.
    #[inline]
    pub fn new() -> Self {
        Self {
            policy: UnseatedPolicy::default(),
            restarts: DEFAULT_RESTARTS,
        }
    }

    #[inline]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    #[inline]
    pub fn policy(&self) -> UnseatedPolicy {
        self.policy
    }

    /// Returns the number of reruns allowed after an incomplete run.
    #[inline]
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// Allocates `model` into rounds.
    ///
    /// `max_rounds` caps the plan length and defaults to the table count. A
    /// plan that misses pairs is still returned; see
    /// `AllocationOutcome::is_incomplete`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ZeroMaxRounds` if `max_rounds` is `Some(0)`.
    pub fn allocate<P, S, M>(
        &self,
        model: &Model<P>,
        strategy: &mut S,
        monitor: &mut M,
        max_rounds: Option<usize>,
    ) -> Result<AllocationOutcome<P>, EngineError>
    where
        P: ParticipantId,
        S: RoundStrategy<P> + ?Sized,
        M: AllocationMonitor<P> + ?Sized,
    {
        if max_rounds == Some(0) {
            return Err(EngineError::ZeroMaxRounds);
        }

        let start_time = Instant::now();
        let max_rounds = max_rounds.unwrap_or(model.num_tables());
        let mut stats = AllocationStatistics::default();

        monitor.on_enter_allocation(model, max_rounds);

        if model.is_empty() {
            stats.set_total_time(start_time.elapsed());
            let outcome = AllocationOutcome::empty(model.num_participants(), self.policy, stats);
            monitor.on_exit_allocation(
                outcome.termination_reason(),
                outcome.coverage(),
                outcome.statistics(),
            );
            return Ok(outcome);
        }

        let runs = if strategy.is_deterministic() {
            1
        } else {
            self.restarts.saturating_add(1)
        };

        let mut draft = RoundDraft::new(model.num_tables());
        let mut best: Option<RunRecord<P>> = None;
        let mut abort: Option<String> = None;

        for run in 0..runs {
            if let Some(best) = &best {
                stats.on_restart();
                monitor.on_restart(run, best.coverage, &stats);
            }

            let record = self.run_once(model, strategy, monitor, max_rounds, &mut draft, &mut stats);
            debug!(
                run,
                strategy = strategy.name(),
                rounds = record.plan.num_rounds(),
                encountered = record.coverage.encountered,
                possible = record.coverage.possible,
                "run finished"
            );

            let complete = record.coverage.is_complete();
            if let TerminationReason::Aborted(msg) = &record.reason {
                abort = Some(msg.clone());
            }

            best = match best {
                Some(current) if current.rank() >= record.rank() => Some(current),
                _ => Some(record),
            };

            if complete || abort.is_some() {
                break;
            }
        }

        let Some(best) = best else {
            // `runs` is at least one, so a record always exists.
            stats.set_total_time(start_time.elapsed());
            return Ok(AllocationOutcome::empty(0, self.policy, stats));
        };

        stats.adopt_plan_counters(&best.statistics);
        stats.set_total_time(start_time.elapsed());

        let reason = match abort {
            Some(msg) => TerminationReason::Aborted(msg),
            None => best.reason,
        };

        info!(
            strategy = strategy.name(),
            policy = %self.policy,
            rounds = best.plan.num_rounds(),
            restarts = stats.restarts,
            %reason,
            "allocation selected"
        );

        monitor.on_exit_allocation(&reason, best.coverage, &stats);

        Ok(AllocationOutcome::new(
            best.plan,
            reason,
            best.coverage,
            self.policy,
            stats,
        ))
    }

    fn run_once<P, S, M>(
        &self,
        model: &Model<P>,
        strategy: &mut S,
        monitor: &mut M,
        max_rounds: usize,
        draft: &mut RoundDraft,
        stats: &mut AllocationStatistics,
    ) -> RunRecord<P>
    where
        P: ParticipantId,
        S: RoundStrategy<P> + ?Sized,
        M: AllocationMonitor<P> + ?Sized,
    {
        strategy.on_start(model);

        let mut encounters = EncounterSet::new(model.num_participants());
        let mut plan = Plan::new();

        // At least one round is built, even when no pair is possible.
        let reason = loop {
            if plan.num_rounds() >= max_rounds {
                break TerminationReason::RoundLimit;
            }

            if let SearchCommand::Terminate(msg) = monitor.search_command(stats) {
                break TerminationReason::Aborted(msg);
            }

            let round_index = plan.num_rounds();
            draft.reset(model.num_tables());
            strategy.build_round(model, round_index, &encounters, draft);

            let counts = self.policy.apply(model, &encounters, draft);

            debug_assert!(
                draft.is_partition(model.num_participants()),
                "called `AllocationEngine::run_once` with a strategy that seated a participant twice in round {}",
                round_index + 1
            );
            debug_assert!(
                self.policy.may_exceed_capacity()
                    || draft
                        .groups()
                        .iter()
                        .all(|g| g.len() <= model.seats_per_table()),
                "called `AllocationEngine::run_once` with a strategy that exceeded table capacity {} in round {}",
                model.seats_per_table(),
                round_index + 1
            );

            for group in draft.groups() {
                encounters.record_group(group);
            }

            let round = draft.to_round(model, round_index + 1);
            stats.on_round(
                draft.seated_count(),
                counts.dropped,
                counts.repeat_encounters,
                counts.overflow_seatings,
            );
            monitor.on_round(&round, encounters.coverage(), stats);
            plan.push(round);

            if encounters.is_complete() {
                break TerminationReason::FullCoverage;
            }
        };

        RunRecord {
            plan,
            reason,
            coverage: encounters.coverage(),
            statistics: stats.clone(),
        }
    }
}

/// Builder for `AllocationEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineBuilder {
    policy: UnseatedPolicy,
    restarts: usize,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            policy: UnseatedPolicy::default(),
            restarts: DEFAULT_RESTARTS,
        }
    }

    #[inline]
    pub fn with_policy(mut self, policy: UnseatedPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    #[inline]
    pub fn build(self) -> AllocationEngine {
        AllocationEngine {
            policy: self.policy,
            restarts: self.restarts,
        }
    }
}

/// Allocates `participants` to `tables` in one call.
///
/// Uses the greedy strategy with the `Drop` policy and the default restart
/// budget. All randomness is drawn from `rng`.
///
/// # Errors
///
/// Fails before any round is built if the input does not form a valid model
/// or if `max_rounds` is `Some(0)`.
///
/// # Examples
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use roundtable_engine::allocate;
/// use roundtable_model::table::TableDescriptor;
///
/// let outcome = allocate(
///     1..=6,
///     TableDescriptor::uniform(1, 3, 2),
///     Some(5),
///     ChaCha8Rng::seed_from_u64(7),
/// )
/// .unwrap();
/// assert!(outcome.plan().num_rounds() <= 5);
/// ```
pub fn allocate<P, I, J, R>(
    participants: I,
    tables: J,
    max_rounds: Option<usize>,
    rng: R,
) -> Result<AllocationOutcome<P>, EngineError>
where
    P: ParticipantId,
    I: IntoIterator<Item = P>,
    J: IntoIterator<Item = TableDescriptor>,
    R: Rng,
{
    let model = Model::new(participants, tables)?;
    let mut strategy = GreedyStrategy::new(rng);
    AllocationEngine::new().allocate(&model, &mut strategy, &mut NoOpMonitor::new(), max_rounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::rotation::RotationStrategy;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use roundtable_model::error::ModelError;

    fn model(participants: u32, tables: usize, seats: usize) -> Model<u32> {
        Model::new(1..=participants, TableDescriptor::uniform(1, tables, seats)).unwrap()
    }

    fn greedy(seed: u64) -> GreedyStrategy<ChaCha8Rng> {
        GreedyStrategy::new(ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_zero_max_rounds_is_rejected() {
        let result = AllocationEngine::new().allocate(
            &model(4, 2, 2),
            &mut greedy(0),
            &mut NoOpMonitor::new(),
            Some(0),
        );
        assert_eq!(result.unwrap_err(), EngineError::ZeroMaxRounds);
    }

    #[test]
    fn test_invalid_tables_fail_fast() {
        let err = allocate(
            1..=4,
            vec![TableDescriptor::new(1, 0)],
            None,
            ChaCha8Rng::seed_from_u64(0),
        )
        .unwrap_err();
        assert_eq!(
            err,
            EngineError::Model(ModelError::ZeroSeats {
                table: 1.into()
            })
        );
    }

    #[test]
    fn test_max_rounds_defaults_to_table_count() {
        let outcome = AllocationEngine::new()
            .allocate(&model(20, 4, 4), &mut greedy(1), &mut NoOpMonitor::new(), None)
            .unwrap();
        assert_eq!(outcome.plan().num_rounds(), 4);
        assert_eq!(outcome.termination_reason(), &TerminationReason::RoundLimit);
    }

    #[test]
    fn test_single_participant_gets_one_round() {
        let outcome = AllocationEngine::new()
            .allocate(&model(1, 2, 2), &mut greedy(2), &mut NoOpMonitor::new(), None)
            .unwrap();
        assert_eq!(outcome.plan().num_rounds(), 1);
        assert_eq!(outcome.plan().seated_count(), 1);
        assert_eq!(outcome.termination_reason(), &TerminationReason::FullCoverage);
        assert!(!outcome.is_incomplete());
    }

    #[test]
    fn test_everybody_fits_in_one_round() {
        let outcome = AllocationEngine::new()
            .allocate(&model(5, 1, 10), &mut greedy(3), &mut NoOpMonitor::new(), None)
            .unwrap();
        assert_eq!(outcome.plan().num_rounds(), 1);
        assert_eq!(outcome.plan().rounds()[0].seatings()[0].len(), 5);
        assert_eq!(outcome.coverage(), Coverage::new(10, 10));
    }

    #[test]
    fn test_rotation_runs_once() {
        let engine = AllocationEngine::builder().with_restarts(5).build();
        let outcome = engine
            .allocate(
                &model(15, 5, 3),
                &mut RotationStrategy::new(),
                &mut NoOpMonitor::new(),
                Some(5),
            )
            .unwrap();
        assert_eq!(outcome.statistics().restarts, 0);
        assert_eq!(outcome.plan().num_rounds(), 5);
        assert_eq!(outcome.coverage().encountered, 75);
        assert_eq!(outcome.statistics().repeat_encounters, 0);
    }

    #[test]
    fn test_restarts_are_bounded() {
        // 9 people at 3 tables of 3 cannot meet everybody in 2 rounds.
        let engine = AllocationEngine::builder().with_restarts(3).build();
        let outcome = engine
            .allocate(&model(9, 3, 3), &mut greedy(4), &mut NoOpMonitor::new(), Some(2))
            .unwrap();
        assert_eq!(outcome.statistics().restarts, 3);
        assert_eq!(outcome.statistics().rounds_evaluated, 8);
        assert_eq!(outcome.statistics().rounds, 2);
        assert!(outcome.is_incomplete());
    }

    #[test]
    fn test_overflow_policy_seats_everybody() {
        let engine = AllocationEngine::builder()
            .with_policy(UnseatedPolicy::Overflow)
            .with_restarts(0)
            .build();
        let outcome = engine
            .allocate(&model(7, 2, 3), &mut greedy(5), &mut NoOpMonitor::new(), Some(2))
            .unwrap();
        for round in outcome.plan() {
            assert_eq!(round.seated_count(), 7);
        }
        assert!(!outcome.respects_capacity());
        assert_eq!(outcome.policy(), UnseatedPolicy::Overflow);
    }

    #[test]
    fn test_builder_defaults() {
        let engine = AllocationEngine::builder().build();
        assert_eq!(engine, AllocationEngine::default());
        assert_eq!(engine.restarts(), DEFAULT_RESTARTS);
        assert_eq!(engine.policy(), UnseatedPolicy::Drop);
    }
}
