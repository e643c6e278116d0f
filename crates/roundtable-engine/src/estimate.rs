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

//! # Round-Count Estimator
//!
//! A quick preview of how many rounds an event needs, used by organizers
//! before confirming an allocation and as a default cap.
//!
//! If everybody fits at the tables at once, one round suffices. Otherwise the
//! estimate counts the full groups the participants form
//! (`participants / seats`, rounded down) and spreads them over the tables
//! (`ceil(groups / tables)`).
//!
//! The figure is optimistic on purpose: it is a lower bound, never a promise
//! that the allocator reaches full coverage within that many rounds.
//!
//! ```rust
//! use roundtable_engine::estimate::estimate_rounds;
//!
//! assert_eq!(estimate_rounds(5, 10, 1), Ok(1));
//! assert_eq!(estimate_rounds(16, 4, 4), Ok(1));
//! assert_eq!(estimate_rounds(40, 4, 4), Ok(3));
//! ```

use roundtable_model::model::{Model, ParticipantId};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("seats per table must be at least 1")]
    ZeroSeats,

    #[error("table count must be at least 1")]
    ZeroTables,
}

/// Estimates the rounds needed to seat `participant_count` participants at
/// `table_count` tables of `seats_per_table` seats.
///
/// # Errors
///
/// Returns `EstimateError::ZeroSeats` or `EstimateError::ZeroTables` for
/// non-positive seat or table counts.
pub fn estimate_rounds(
    participant_count: usize,
    seats_per_table: usize,
    table_count: usize,
) -> Result<usize, EstimateError> {
    if seats_per_table == 0 {
        return Err(EstimateError::ZeroSeats);
    }
    if table_count == 0 {
        return Err(EstimateError::ZeroTables);
    }

    if participant_count <= seats_per_table.saturating_mul(table_count) {
        return Ok(1);
    }

    let groups_needed = participant_count / seats_per_table;
    Ok(groups_needed.div_ceil(table_count))
}

/// Estimates the rounds needed for a model's participants and tables.
#[inline]
pub fn estimate_model_rounds<P>(model: &Model<P>) -> Result<usize, EstimateError>
where
    P: ParticipantId,
{
    estimate_rounds(
        model.num_participants(),
        model.seats_per_table(),
        model.num_tables(),
    )
}
