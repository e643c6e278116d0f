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

//! Statistics collected during an allocation run.
//!
//! Counters use saturating arithmetic and are cheap enough to update once per
//! round. The same struct is handed to monitors while the run is in progress
//! and ends up in the `AllocationOutcome`.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AllocationStatistics {
    /// Rounds in the returned plan.
    pub rounds: u64,

    /// Rounds built across all runs, restarts included.
    pub rounds_evaluated: u64,

    /// Seats filled in the returned plan.
    pub seated: u64,

    /// Participant-rounds sat out in the returned plan.
    pub dropped_seatings: u64,

    /// Pairs seated together again in the returned plan.
    pub repeat_encounters: u64,

    /// Seats filled beyond capacity in the returned plan.
    pub overflow_seatings: u64,

    /// Number of restarts performed.
    pub restarts: u64,

    /// Total time taken by the allocation.
    pub time_total: Duration,
}

impl AllocationStatistics {
    /// Called after a round has been appended to the plan of the current run.
    #[inline]
    pub fn on_round(&mut self, seated: usize, dropped: usize, repeats: usize, overflow: usize) {
        self.rounds = self.rounds.saturating_add(1);
        self.rounds_evaluated = self.rounds_evaluated.saturating_add(1);
        self.seated = self.seated.saturating_add(seated as u64);
        self.dropped_seatings = self.dropped_seatings.saturating_add(dropped as u64);
        self.repeat_encounters = self.repeat_encounters.saturating_add(repeats as u64);
        self.overflow_seatings = self.overflow_seatings.saturating_add(overflow as u64);
    }

    /// Called when the engine discards the current run and starts over.
    /// Per-plan counters are reset; totals across runs are kept.
    #[inline]
    pub fn on_restart(&mut self) {
        self.restarts = self.restarts.saturating_add(1);
        self.reset_plan_counters();
    }

    /// Replaces the per-plan counters with those of `other`.
    #[inline]
    pub fn adopt_plan_counters(&mut self, other: &AllocationStatistics) {
        self.rounds = other.rounds;
        self.seated = other.seated;
        self.dropped_seatings = other.dropped_seatings;
        self.repeat_encounters = other.repeat_encounters;
        self.overflow_seatings = other.overflow_seatings;
    }

    #[inline]
    fn reset_plan_counters(&mut self) {
        self.rounds = 0;
        self.seated = 0;
        self.dropped_seatings = 0;
        self.repeat_encounters = 0;
        self.overflow_seatings = 0;
    }

    /// Sets the total time taken by the allocation.
    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for AllocationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Roundtable Allocation Statistics:")?;
        writeln!(f, "   Rounds:              {}", self.rounds)?;
        writeln!(f, "   Rounds Evaluated:    {}", self.rounds_evaluated)?;
        writeln!(f, "   Seated:              {}", self.seated)?;
        writeln!(f, "   Dropped Seatings:    {}", self.dropped_seatings)?;
        writeln!(f, "   Repeat Encounters:   {}", self.repeat_encounters)?;
        writeln!(f, "   Overflow Seatings:   {}", self.overflow_seatings)?;
        writeln!(f, "   Restarts:            {}", self.restarts)?;
        writeln!(f, "   Total Time:          {:?}", self.time_total)?;
        Ok(())
    }
}
