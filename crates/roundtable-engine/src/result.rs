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

//! Allocation outcome and termination reporting.
//!
//! `AllocationOutcome` bundles the plan with the coverage it reached, the run
//! statistics and the reason the run stopped. A plan that misses pairs or
//! leaves people out is not an error: `is_incomplete` reports it instead.

use crate::{policy::UnseatedPolicy, stats::AllocationStatistics};
use roundtable_model::{
    coverage::Coverage,
    model::{ParticipantId, pair_count},
    plan::Plan,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// Every pair of participants shared a table at least once.
    FullCoverage,

    /// The round cap was reached before every pair met.
    RoundLimit,

    /// There were no participants or no tables to allocate.
    EmptyInput,

    /// A monitor stopped the run. The string explains why.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::FullCoverage => write!(f, "Full Coverage"),
            TerminationReason::RoundLimit => write!(f, "Round Limit Reached"),
            TerminationReason::EmptyInput => write!(f, "Empty Input"),
            TerminationReason::Aborted(msg) => write!(f, "Aborted: {}", msg),
        }
    }
}

/// Result of the engine after termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome<P> {
    termination_reason: TerminationReason,
    plan: Plan<P>,
    coverage: Coverage,
    policy: UnseatedPolicy,
    statistics: AllocationStatistics,
}

impl<P> AllocationOutcome<P> {
    #[inline]
    pub fn new(
        plan: Plan<P>,
        termination_reason: TerminationReason,
        coverage: Coverage,
        policy: UnseatedPolicy,
        statistics: AllocationStatistics,
    ) -> Self {
        Self {
            termination_reason,
            plan,
            coverage,
            policy,
            statistics,
        }
    }

    /// Creates the outcome for a run without participants or tables.
    #[inline]
    pub fn empty(
        num_participants: usize,
        policy: UnseatedPolicy,
        statistics: AllocationStatistics,
    ) -> Self {
        let possible = pair_count(num_participants);
        Self::new(
            Plan::default(),
            TerminationReason::EmptyInput,
            Coverage::new(0, possible),
            policy,
            statistics,
        )
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn plan(&self) -> &Plan<P> {
        &self.plan
    }

    /// Consumes the outcome and returns the plan.
    #[inline]
    pub fn into_plan(self) -> Plan<P> {
        self.plan
    }

    /// Returns the pair coverage reached by the plan.
    #[inline]
    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    /// Returns the unseated policy the plan was built with.
    #[inline]
    pub fn policy(&self) -> UnseatedPolicy {
        self.policy
    }

    #[inline]
    pub fn statistics(&self) -> &AllocationStatistics {
        &self.statistics
    }

    /// Returns `true` if some pair never met or somebody sat a round out.
    #[inline]
    pub fn is_incomplete(&self) -> bool {
        !self.coverage.is_complete() || self.statistics.dropped_seatings > 0
    }

    /// Returns `true` unless some table holds more people than it has seats.
    #[inline]
    pub fn respects_capacity(&self) -> bool {
        self.statistics.overflow_seatings == 0
    }
}

impl<P> std::fmt::Display for AllocationOutcome<P>
where
    P: ParticipantId,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Termination: {}", self.termination_reason)?;
        writeln!(f, "Coverage:    {}", self.coverage)?;
        writeln!(f, "Policy:      {}", self.policy)?;
        write!(f, "{}", self.statistics)?;
        write!(f, "{}", self.plan)
    }
}
