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

//! Randomized greedy seating.
//!
//! Each round starts from a fresh shuffle of all participants. Tables are
//! walked in model order and filled from the front of the shuffled queue: a
//! candidate is accepted only if nobody already at the table has met them in
//! an earlier round. A rejected candidate keeps its queue position and is
//! offered to the next table. Whoever is still queued after the last table
//! is left over for the unseated policy.
//!
//! A single shuffle is cheap but noisy, so the strategy drafts `attempts`
//! shuffles per round and keeps the one that adds the most new pairs,
//! breaking ties by the number of seated participants.

use crate::strategy::{RoundDraft, RoundStrategy};
use rand::{Rng, seq::SliceRandom};
use roundtable_model::{
    encounter::EncounterSet,
    index::{ParticipantIndex, TableIndex},
    model::{Model, ParticipantId},
};

/// Number of shuffles drafted per round unless configured otherwise.
pub const DEFAULT_ROUND_ATTEMPTS: usize = 8;

#[derive(Debug, Clone)]
pub struct GreedyStrategy<R>
where
    R: Rng,
{
    rng: R,
    attempts: usize,
    queue: Vec<ParticipantIndex>,
    rejected: Vec<ParticipantIndex>,
    candidate: RoundDraft,
}

impl<R> GreedyStrategy<R>
where
    R: Rng,
{
    /// Creates a greedy strategy drawing its shuffles from `rng`.
    #[inline]
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            attempts: DEFAULT_ROUND_ATTEMPTS,
            queue: Vec::new(),
            rejected: Vec::new(),
            candidate: RoundDraft::default(),
        }
    }

    /// Sets the number of shuffles drafted per round. Zero is treated as one.
    #[inline]
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Returns the number of shuffles drafted per round.
    #[inline]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Drafts a single shuffle into `draft`.
    fn draft_once<P>(&mut self, model: &Model<P>, encounters: &EncounterSet, draft: &mut RoundDraft)
    where
        P: ParticipantId,
    {
        self.queue.clear();
        self.queue
            .extend(ParticipantIndex::range(model.num_participants()));
        self.queue.shuffle(&mut self.rng);

        for table_index in TableIndex::range(model.num_tables()) {
            let seats = model.table_seats(table_index);
            self.rejected.clear();

            for &candidate in &self.queue {
                let group = draft.group(table_index);
                if group.len() < seats && encounters.meets_none(candidate, group) {
                    draft.seat(table_index, candidate);
                } else {
                    self.rejected.push(candidate);
                }
            }

            std::mem::swap(&mut self.queue, &mut self.rejected);
            if self.queue.is_empty() {
                break;
            }
        }

        for &participant in &self.queue {
            draft.leave_out(participant);
        }
    }
}

impl<P, R> RoundStrategy<P> for GreedyStrategy<R>
where
    P: ParticipantId,
    R: Rng,
{
    fn name(&self) -> &str {
        "GreedyStrategy"
    }

    fn on_start(&mut self, model: &Model<P>) {
        self.queue.reserve(model.num_participants());
        self.rejected.reserve(model.num_participants());
    }

    fn build_round(
        &mut self,
        model: &Model<P>,
        _round_index: usize,
        encounters: &EncounterSet,
        draft: &mut RoundDraft,
    ) {
        self.draft_once(model, encounters, draft);
        let mut best_key = (draft.new_pairs(encounters), draft.seated_count());

        for _ in 1..self.attempts {
            let mut candidate = std::mem::take(&mut self.candidate);
            candidate.reset(model.num_tables());
            self.draft_once(model, encounters, &mut candidate);

            let key = (candidate.new_pairs(encounters), candidate.seated_count());
            if key > best_key {
                best_key = key;
                std::mem::swap(draft, &mut candidate);
            }
            self.candidate = candidate;
        }
    }
}
