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

//! Encounter bookkeeping.
//!
//! `EncounterSet` records which unordered participant pairs already shared a
//! table. Pairs are stored in a triangular bit matrix: the pair `(a, b)` with
//! `a < b` lives at bit `b * (b - 1) / 2 + a`, so `C(n, 2)` bits cover every
//! pair of `n` participants and a lookup is a single bit test.
//!
//! The set only ever grows during a run. The allocation loop owns it and
//! hands round builders a shared reference, so a round is always planned
//! against the encounters of all previous rounds.

use crate::{coverage::Coverage, index::ParticipantIndex, model::pair_count};
use fixedbitset::FixedBitSet;

#[inline(always)]
fn pair_bit(a: usize, b: usize) -> usize {
    let (low, high) = if a < b { (a, b) } else { (b, a) };
    high * (high - 1) / 2 + low
}

/// The set of participant pairs that have shared a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterSet {
    bits: FixedBitSet,
    num_participants: usize,
    len: usize,
}

impl EncounterSet {
    /// Creates an empty set for `num_participants` participants.
    #[inline]
    pub fn new(num_participants: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(pair_count(num_participants)),
            num_participants,
            len: 0,
        }
    }

    /// Returns the number of participants this set was sized for.
    #[inline]
    pub fn num_participants(&self) -> usize {
        self.num_participants
    }

    /// Returns the number of recorded pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no pair has been recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of pairs that can exist, `C(n, 2)`.
    #[inline]
    pub fn possible_pairs(&self) -> usize {
        pair_count(self.num_participants)
    }

    /// Returns `true` once every possible pair has been recorded.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.len == self.possible_pairs()
    }

    /// Returns the current coverage.
    #[inline]
    pub fn coverage(&self) -> Coverage {
        Coverage::new(self.len, self.possible_pairs())
    }

    /// Returns `true` if `a` and `b` already shared a table.
    /// A participant never "meets" itself.
    #[inline]
    pub fn contains(&self, a: ParticipantIndex, b: ParticipantIndex) -> bool {
        let (a, b) = (a.get(), b.get());
        if a == b {
            return false;
        }
        debug_assert!(
            a < self.num_participants && b < self.num_participants,
            "called `EncounterSet::contains` with participant index out of bounds: the len is {} but the indices are {} and {}",
            self.num_participants,
            a,
            b
        );

        self.bits.contains(pair_bit(a, b))
    }

    /// Returns `true` if `candidate` has met none of `group`.
    #[inline]
    pub fn meets_none(&self, candidate: ParticipantIndex, group: &[ParticipantIndex]) -> bool {
        !group.iter().any(|&member| self.contains(candidate, member))
    }

    /// Counts how many members of `group` `candidate` has already met.
    #[inline]
    pub fn count_met(&self, candidate: ParticipantIndex, group: &[ParticipantIndex]) -> usize {
        group
            .iter()
            .filter(|&&member| self.contains(candidate, member))
            .count()
    }

    /// Records the pair `(a, b)`. Returns `true` if the pair is new.
    /// Self pairs are ignored.
    #[inline]
    pub fn insert(&mut self, a: ParticipantIndex, b: ParticipantIndex) -> bool {
        let (a, b) = (a.get(), b.get());
        if a == b {
            return false;
        }
        debug_assert!(
            a < self.num_participants && b < self.num_participants,
            "called `EncounterSet::insert` with participant index out of bounds: the len is {} but the indices are {} and {}",
            self.num_participants,
            a,
            b
        );

        if self.bits.put(pair_bit(a, b)) {
            return false;
        }
        self.len += 1;
        true
    }

    /// Records every pair within `group` (one table of one round).
    /// Returns the number of pairs that were new.
    pub fn record_group(&mut self, group: &[ParticipantIndex]) -> usize {
        let mut fresh = 0;
        for (i, &a) in group.iter().enumerate() {
            for &b in &group[i + 1..] {
                if self.insert(a, b) {
                    fresh += 1;
                }
            }
        }
        fresh
    }

    /// Counts the pairs within `group` that are not recorded yet,
    /// without modifying the set.
    pub fn count_new_pairs(&self, group: &[ParticipantIndex]) -> usize {
        let mut fresh = 0;
        for (i, &a) in group.iter().enumerate() {
            for &b in &group[i + 1..] {
                if a != b && !self.contains(a, b) {
                    fresh += 1;
                }
            }
        }
        fresh
    }

    /// Iterates over the recorded pairs as `(low, high)` with `low < high`.
    pub fn pairs(&self) -> impl Iterator<Item = (ParticipantIndex, ParticipantIndex)> + '_ {
        (1..self.num_participants).flat_map(move |high| {
            (0..high).filter_map(move |low| {
                self.bits
                    .contains(pair_bit(low, high))
                    .then(|| (ParticipantIndex::new(low), ParticipantIndex::new(high)))
            })
        })
    }

    /// Forgets every recorded pair.
    #[inline]
    pub fn clear(&mut self) {
        self.bits.clear();
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pi(i: usize) -> ParticipantIndex {
        ParticipantIndex::new(i)
    }

    #[test]
    fn test_pair_bits_are_unique_and_dense() {
        let n = 7;
        let mut seen = vec![false; pair_count(n)];
        for high in 1..n {
            for low in 0..high {
                let bit = pair_bit(low, high);
                assert!(!seen[bit], "bit {} assigned twice", bit);
                seen[bit] = true;
                assert_eq!(bit, pair_bit(high, low));
            }
        }
        assert!(seen.into_iter().all(|b| b));
    }

    #[test]
    fn test_insert_is_symmetric_and_idempotent() {
        let mut set = EncounterSet::new(4);
        assert!(set.insert(pi(3), pi(1)));
        assert!(set.contains(pi(1), pi(3)));
        assert!(set.contains(pi(3), pi(1)));
        assert!(!set.insert(pi(1), pi(3)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_self_pairs_are_ignored() {
        let mut set = EncounterSet::new(3);
        assert!(!set.insert(pi(2), pi(2)));
        assert!(!set.contains(pi(2), pi(2)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_record_group_counts_only_new_pairs() {
        let mut set = EncounterSet::new(5);
        assert_eq!(set.count_new_pairs(&[pi(0), pi(1), pi(2)]), 3);
        assert_eq!(set.record_group(&[pi(0), pi(1), pi(2)]), 3);
        assert_eq!(set.count_new_pairs(&[pi(1), pi(2), pi(3)]), 2);
        assert_eq!(set.record_group(&[pi(1), pi(2), pi(3)]), 2);
        assert_eq!(set.len(), 5);
        assert_eq!(set.record_group(&[pi(4)]), 0);
        assert_eq!(set.record_group(&[]), 0);
    }

    #[test]
    fn test_meets_none_and_count_met() {
        let mut set = EncounterSet::new(4);
        set.insert(pi(0), pi(1));

        assert!(!set.meets_none(pi(0), &[pi(2), pi(1)]));
        assert!(set.meets_none(pi(0), &[pi(2), pi(3)]));
        assert!(set.meets_none(pi(0), &[]));
        assert_eq!(set.count_met(pi(1), &[pi(0), pi(2)]), 1);
    }

    #[test]
    fn test_completion_and_coverage() {
        let mut set = EncounterSet::new(3);
        assert!(!set.is_complete());
        set.record_group(&[pi(0), pi(1), pi(2)]);
        assert!(set.is_complete());
        assert_eq!(set.coverage(), Coverage::new(3, 3));
    }

    #[test]
    fn test_degenerate_sizes_are_complete() {
        assert!(EncounterSet::new(0).is_complete());
        assert!(EncounterSet::new(1).is_complete());
        assert!(!EncounterSet::new(2).is_complete());
    }

    #[test]
    fn test_pairs_iterates_recorded_pairs() {
        let mut set = EncounterSet::new(4);
        set.insert(pi(2), pi(0));
        set.insert(pi(3), pi(1));

        let pairs: Vec<_> = set.pairs().collect();
        assert_eq!(pairs, vec![(pi(0), pi(2)), (pi(1), pi(3))]);
    }

    #[test]
    fn test_clear_resets() {
        let mut set = EncounterSet::new(3);
        set.record_group(&[pi(0), pi(1)]);
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(pi(0), pi(1)));
    }
}
