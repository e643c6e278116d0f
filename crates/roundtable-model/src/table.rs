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

//! Table identifiers and descriptors.
//!
//! A `TableDescriptor` is what the caller hands to the engine for every table
//! of the event: the table's external id and its seat count. Descriptors are
//! supplied fresh for each allocation run and never retained by the engine.

use serde::{Deserialize, Serialize};

/// The caller-facing identifier of a table (usually a database key).
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(u64);

impl TableId {
    #[inline(always)]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for TableId {
    #[inline]
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<TableId> for u64 {
    #[inline]
    fn from(id: TableId) -> Self {
        id.0
    }
}

/// A table taking part in an allocation run.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// External identifier of the table.
    pub id: TableId,
    /// Number of seats at the table.
    pub seats: usize,
}

impl TableDescriptor {
    #[inline]
    pub fn new<I>(id: I, seats: usize) -> Self
    where
        I: Into<TableId>,
    {
        Self {
            id: id.into(),
            seats,
        }
    }

    /// Creates `quantity` descriptors with ids `first_id..first_id + quantity`,
    /// all with the same seat count. This mirrors how an organizer creates the
    /// tables of an event in one go. Ids stop at `u64::MAX`, so fewer than
    /// `quantity` descriptors are returned when the range would wrap.
    ///
    /// ```rust
    /// use roundtable_model::table::TableDescriptor;
    ///
    /// let tables = TableDescriptor::uniform(1, 3, 4);
    /// assert_eq!(tables.len(), 3);
    /// assert_eq!(tables[2].id.get(), 3);
    /// assert!(tables.iter().all(|t| t.seats == 4));
    /// ```
    pub fn uniform(first_id: u64, quantity: usize, seats: usize) -> Vec<Self> {
        (0..quantity as u64)
            .map_while(|offset| first_id.checked_add(offset))
            .map(|id| Self::new(id, seats))
            .collect()
    }
}

impl std::fmt::Display for TableDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Table(id: {}, seats: {})", self.id, self.seats)
    }
}
