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

//! Fan‑out monitor.
//!
//! `CompositeMonitor` forwards every event to its children in insertion
//! order. `search_command` returns the first non‑`Continue` answer, so put
//! stricter stop conditions first.

use crate::{
    monitor::allocation_monitor::{AllocationMonitor, SearchCommand},
    result::TerminationReason,
    stats::AllocationStatistics,
};
use roundtable_model::{
    coverage::Coverage,
    index::MonitorIndex,
    model::{Model, ParticipantId},
    plan::Round,
};

pub struct CompositeMonitor<'a, P>
where
    P: ParticipantId,
{
    monitors: Vec<Box<dyn AllocationMonitor<P> + 'a>>,
}

impl<'a, P> Default for CompositeMonitor<'a, P>
where
    P: ParticipantId,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, P> CompositeMonitor<'a, P>
where
    P: ParticipantId,
{
    /// Creates a new empty `CompositeMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a monitor and returns its index.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M) -> MonitorIndex
    where
        M: AllocationMonitor<P> + 'a,
    {
        self.add_monitor_boxed(Box::new(monitor))
    }

    /// Adds a boxed monitor and returns its index.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn AllocationMonitor<P> + 'a>) -> MonitorIndex {
        let index = MonitorIndex::new(self.monitors.len());
        self.monitors.push(monitor);
        index
    }

    /// Returns the monitor at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..len()`.
    #[inline(always)]
    pub fn monitor(&self, index: MonitorIndex) -> &(dyn AllocationMonitor<P> + 'a) {
        debug_assert!(
            index.get() < self.monitors.len(),
            "called `CompositeMonitor::monitor` with monitor index out of bounds: the len is {} but the index is {}",
            self.monitors.len(),
            index.get()
        );

        self.monitors[index.get()].as_ref()
    }

    /// Returns a slice of the monitors.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn AllocationMonitor<P> + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.monitors.clear();
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, P> FromIterator<Box<dyn AllocationMonitor<P> + 'a>> for CompositeMonitor<'a, P>
where
    P: ParticipantId,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn AllocationMonitor<P> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, P> AllocationMonitor<P> for CompositeMonitor<'a, P>
where
    P: ParticipantId,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    #[inline(always)]
    fn on_enter_allocation(&mut self, model: &Model<P>, max_rounds: usize) {
        for monitor in &mut self.monitors {
            monitor.on_enter_allocation(model, max_rounds);
        }
    }

    #[inline(always)]
    fn on_round(&mut self, round: &Round<P>, coverage: Coverage, statistics: &AllocationStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_round(round, coverage, statistics);
        }
    }

    #[inline(always)]
    fn on_restart(&mut self, restart: usize, best: Coverage, statistics: &AllocationStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_restart(restart, best, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_allocation(
        &mut self,
        reason: &TerminationReason,
        coverage: Coverage,
        statistics: &AllocationStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_exit_allocation(reason, coverage, statistics);
        }
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &AllocationStatistics) -> SearchCommand {
        for monitor in &mut self.monitors {
            let cmd = monitor.search_command(statistics);
            if !matches!(cmd, SearchCommand::Continue) {
                return cmd;
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Default)]
    struct Events {
        enters: usize,
        rounds: usize,
        restarts: usize,
        exits: usize,
        commands: usize,
    }

    struct Recording {
        name: &'static str,
        events: Rc<RefCell<Events>>,
        stop_after: Option<usize>,
    }

    impl AllocationMonitor<u32> for Recording {
        fn name(&self) -> &str {
            self.name
        }

        fn on_enter_allocation(&mut self, _model: &Model<u32>, _max_rounds: usize) {
            self.events.borrow_mut().enters += 1;
        }

        fn on_round(&mut self, _round: &Round<u32>, _c: Coverage, _s: &AllocationStatistics) {
            self.events.borrow_mut().rounds += 1;
        }

        fn on_restart(&mut self, _restart: usize, _b: Coverage, _s: &AllocationStatistics) {
            self.events.borrow_mut().restarts += 1;
        }

        fn on_exit_allocation(
            &mut self,
            _r: &TerminationReason,
            _c: Coverage,
            _s: &AllocationStatistics,
        ) {
            self.events.borrow_mut().exits += 1;
        }

        fn search_command(&mut self, _s: &AllocationStatistics) -> SearchCommand {
            let mut events = self.events.borrow_mut();
            events.commands += 1;
            match self.stop_after {
                Some(limit) if events.commands > limit => {
                    SearchCommand::Terminate(format!("{} stopped", self.name))
                }
                _ => SearchCommand::Continue,
            }
        }
    }

    fn recording(
        name: &'static str,
        stop_after: Option<usize>,
    ) -> (Recording, Rc<RefCell<Events>>) {
        let events = Rc::new(RefCell::new(Events::default()));
        (
            Recording {
                name,
                events: Rc::clone(&events),
                stop_after,
            },
            events,
        )
    }

    #[test]
    fn test_events_fan_out_in_order() {
        let model = Model::new(
            vec![1u32, 2],
            roundtable_model::table::TableDescriptor::uniform(1, 1, 2),
        )
        .unwrap();
        let (a, a_events) = recording("a", None);
        let (b, b_events) = recording("b", None);

        let mut composite = CompositeMonitor::new();
        let first = composite.add_monitor(a);
        let second = composite.add_monitor(b);
        assert_eq!(composite.len(), 2);
        assert_eq!(composite.monitor(first).name(), "a");
        assert_eq!(composite.monitor(second).name(), "b");

        let stats = AllocationStatistics::default();
        let round = Round::new(1, Vec::new());
        composite.on_enter_allocation(&model, 3);
        composite.on_round(&round, Coverage::new(1, 1), &stats);
        composite.on_restart(1, Coverage::new(1, 1), &stats);
        composite.on_exit_allocation(&TerminationReason::FullCoverage, Coverage::new(1, 1), &stats);

        for events in [a_events, b_events] {
            let events = events.borrow();
            assert_eq!(events.enters, 1);
            assert_eq!(events.rounds, 1);
            assert_eq!(events.restarts, 1);
            assert_eq!(events.exits, 1);
        }
    }

    #[test]
    fn test_search_command_short_circuits() {
        let (a, _) = recording("a", Some(0));
        let (b, b_events) = recording("b", None);

        let mut composite = CompositeMonitor::new();
        composite.add_monitor(a);
        composite.add_monitor(b);

        let cmd = composite.search_command(&AllocationStatistics::default());
        assert_eq!(cmd, SearchCommand::Terminate("a stopped".to_string()));
        assert_eq!(b_events.borrow().commands, 0);
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut composite: CompositeMonitor<'_, u32> = CompositeMonitor::default();
        assert!(composite.is_empty());
        assert_eq!(
            composite.search_command(&AllocationStatistics::default()),
            SearchCommand::Continue
        );
    }
}
