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

//! Structured progress logging through `tracing`.
//!
//! Run boundaries are logged at `info`, rounds and restarts at `debug`. A run
//! that ends without full coverage or with people left out logs a `warn`.

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
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_encountered: usize,
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LogMonitor {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            last_encountered: 0,
        }
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogMonitor")
    }
}

impl<P> AllocationMonitor<P> for LogMonitor
where
    P: ParticipantId,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_allocation(&mut self, model: &Model<P>, max_rounds: usize) {
        self.start_time = Instant::now();
        self.last_encountered = 0;
        info!(
            participants = model.num_participants(),
            tables = model.num_tables(),
            seats_per_table = model.seats_per_table(),
            possible_pairs = model.possible_pairs(),
            max_rounds,
            "allocation started"
        );
    }

    fn on_round(&mut self, round: &Round<P>, coverage: Coverage, _statistics: &AllocationStatistics) {
        let new_pairs = coverage.encountered.saturating_sub(self.last_encountered);
        self.last_encountered = coverage.encountered;
        debug!(
            round = round.number(),
            seated = round.seated_count(),
            new_pairs,
            encountered = coverage.encountered,
            possible = coverage.possible,
            "round built"
        );
    }

    fn on_restart(&mut self, restart: usize, best: Coverage, statistics: &AllocationStatistics) {
        self.last_encountered = 0;
        debug!(
            restart,
            best_encountered = best.encountered,
            possible = best.possible,
            rounds_evaluated = statistics.rounds_evaluated,
            "restarting allocation"
        );
    }

    fn on_exit_allocation(
        &mut self,
        reason: &TerminationReason,
        coverage: Coverage,
        statistics: &AllocationStatistics,
    ) {
        let elapsed_ms = self.start_time.elapsed().as_millis() as u64;
        info!(
            %reason,
            rounds = statistics.rounds,
            encountered = coverage.encountered,
            possible = coverage.possible,
            restarts = statistics.restarts,
            elapsed_ms,
            "allocation finished"
        );

        if !coverage.is_complete() || statistics.dropped_seatings > 0 {
            warn!(
                missing_pairs = coverage.missing(),
                dropped_seatings = statistics.dropped_seatings,
                "allocation incomplete"
            );
        }
    }

    fn search_command(&mut self, _statistics: &AllocationStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_model::{plan::TableSeating, table::{TableDescriptor, TableId}};

    #[test]
    fn test_log_monitor_runs_under_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let model = Model::new(vec![1u32, 2, 3], TableDescriptor::uniform(1, 1, 2)).unwrap();
            let mut monitor = LogMonitor::new();
            let mut stats = AllocationStatistics::default();

            AllocationMonitor::<u32>::on_enter_allocation(&mut monitor, &model, 2);
            let round = Round::new(1, vec![TableSeating::new(TableId::new(1), vec![1u32, 2])]);
            stats.on_round(2, 1, 0, 0);
            monitor.on_round(&round, Coverage::new(1, 3), &stats);
            assert_eq!(monitor.last_encountered, 1);

            AllocationMonitor::<u32>::on_exit_allocation(
                &mut monitor,
                &TerminationReason::RoundLimit,
                Coverage::new(1, 3),
                &stats,
            );
            assert_eq!(
                AllocationMonitor::<u32>::search_command(&mut monitor, &stats),
                SearchCommand::Continue
            );
        });
    }
}
