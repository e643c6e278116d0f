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

use crate::{result::TerminationReason, stats::AllocationStatistics};
use roundtable_model::{
    coverage::Coverage,
    model::{Model, ParticipantId},
    plan::Round,
};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Observer of an allocation run.
///
/// The engine calls `on_enter_allocation` once, then `search_command` before
/// every round and `on_round` after it. `on_restart` fires when the engine
/// discards an incomplete run and starts over. `on_exit_allocation` is called
/// once with the final reason, even for empty input.
pub trait AllocationMonitor<P>
where
    P: ParticipantId,
{
    fn name(&self) -> &str;

    fn on_enter_allocation(&mut self, model: &Model<P>, max_rounds: usize);

    fn on_round(&mut self, round: &Round<P>, coverage: Coverage, statistics: &AllocationStatistics);

    fn on_restart(&mut self, restart: usize, best: Coverage, statistics: &AllocationStatistics);

    fn on_exit_allocation(
        &mut self,
        reason: &TerminationReason,
        coverage: Coverage,
        statistics: &AllocationStatistics,
    );

    fn search_command(&mut self, statistics: &AllocationStatistics) -> SearchCommand;
}

impl<P> std::fmt::Debug for dyn AllocationMonitor<P>
where
    P: ParticipantId,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllocationMonitor({})", self.name())
    }
}

impl<P> std::fmt::Display for dyn AllocationMonitor<P>
where
    P: ParticipantId,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllocationMonitor({})", self.name())
    }
}
