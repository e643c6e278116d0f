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

use crate::{
    monitor::allocation_monitor::{AllocationMonitor, SearchCommand},
    result::TerminationReason,
    stats::AllocationStatistics,
};
use roundtable_model::{
    coverage::Coverage,
    model::{Model, ParticipantId},
    plan::Round,
};
use std::time::{Duration, Instant};

/// A monitor that stops the allocation after a wall-clock duration.
///
/// The clock is read every `check_interval` rounds. The limit spans all
/// restarts of one allocation.
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor {
    time_limit: Duration,
    start_time: Option<Instant>,
    check_interval: u64,
    rounds_since_last_check: u64,
}

impl TimeLimitMonitor {
    /// Creates a new `TimeLimitMonitor` with the specified duration and check interval.
    /// A check interval of zero is treated as one.
    pub fn new(duration: Duration, check_interval: u64) -> Self {
        Self {
            time_limit: duration,
            start_time: None,
            check_interval: check_interval.max(1),
            rounds_since_last_check: 0,
        }
    }

    /// Creates a new `TimeLimitMonitor` that reads the clock before every round.
    pub fn with_default_check_interval(duration: Duration) -> Self {
        Self::new(duration, 1)
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<P> AllocationMonitor<P> for TimeLimitMonitor
where
    P: ParticipantId,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_allocation(&mut self, _model: &Model<P>, _max_rounds: usize) {
        self.start_time = Some(Instant::now());
        self.rounds_since_last_check = 0;
    }

    fn on_round(&mut self, _round: &Round<P>, _coverage: Coverage, _statistics: &AllocationStatistics) {
    }

    fn on_restart(&mut self, _restart: usize, _best: Coverage, _statistics: &AllocationStatistics) {}

    fn on_exit_allocation(
        &mut self,
        _reason: &TerminationReason,
        _coverage: Coverage,
        _statistics: &AllocationStatistics,
    ) {
        self.start_time = None;
    }

    fn search_command(&mut self, _statistics: &AllocationStatistics) -> SearchCommand {
        self.rounds_since_last_check = self.rounds_since_last_check.saturating_add(1);

        if self.rounds_since_last_check >= self.check_interval {
            self.rounds_since_last_check = 0;

            if let Some(start) = self.start_time
                && start.elapsed() > self.time_limit
            {
                return SearchCommand::Terminate(format!(
                    "Time limit of {} ms exceeded",
                    self.time_limit.as_millis()
                ));
            }
        }

        SearchCommand::Continue
    }
}
