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

//! # Typed Indices
//!
//! Participants and tables are addressed by dense `usize` positions inside the
//! engine. `TypedIndex<T>` wraps such a position together with a phantom tag so
//! a `TableIndex` can never be passed where a `ParticipantIndex` is expected.
//!
//! ```rust
//! use roundtable_model::index::{ParticipantIndex, TableIndex};
//!
//! let p = ParticipantIndex::new(3);
//! let t = TableIndex::new(0);
//! assert_eq!(p.get(), 3);
//! assert_eq!(format!("{}", t), "TableIndex(0)");
//! ```

/// Names a family of typed indices for `Debug`/`Display` output.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A dense `usize` position tagged with the index space it belongs to.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new index at position `index`.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying position.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns the index directly after this one.
    #[inline(always)]
    pub const fn next(&self) -> Self {
        Self::new(self.index + 1)
    }

    /// Iterates over all indices `0..len` of this index space.
    ///
    /// ```rust
    /// use roundtable_model::index::ParticipantIndex;
    ///
    /// let all: Vec<usize> = ParticipantIndex::range(3).map(|p| p.get()).collect();
    /// assert_eq!(all, vec![0, 1, 2]);
    /// ```
    #[inline]
    pub fn range(len: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..len).map(Self::new)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline]
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

/// A tag type for participant indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ParticipantIndexTag;

impl TypedIndexTag for ParticipantIndexTag {
    const NAME: &'static str = "ParticipantIndex";
}

/// A typed index for participants.
pub type ParticipantIndex = TypedIndex<ParticipantIndexTag>;

/// A tag type for table indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TableIndexTag;

impl TypedIndexTag for TableIndexTag {
    const NAME: &'static str = "TableIndex";
}

/// A typed index for tables.
pub type TableIndex = TypedIndex<TableIndexTag>;

/// A tag type for monitor indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct MonitorIndexTag;

impl TypedIndexTag for MonitorIndexTag {
    const NAME: &'static str = "MonitorIndex";
}

/// A typed index for monitors registered in a composite monitor.
pub type MonitorIndex = TypedIndex<MonitorIndexTag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_get_and_next() {
        let idx = ParticipantIndex::new(4);
        assert_eq!(idx.get(), 4);
        assert_eq!(idx.next().get(), 5);
    }

    #[test]
    fn test_conversions() {
        let idx: TableIndex = 7.into();
        assert_eq!(idx.get(), 7);

        let raw: usize = idx.into();
        assert_eq!(raw, 7);
    }

    #[test]
    fn test_debug_and_display_use_tag_name() {
        assert_eq!(format!("{}", ParticipantIndex::new(2)), "ParticipantIndex(2)");
        assert_eq!(format!("{:?}", TableIndex::new(1)), "TableIndex(1)");
        assert_eq!(format!("{}", MonitorIndex::new(0)), "MonitorIndex(0)");
    }

    #[test]
    fn test_range_is_dense_and_ordered() {
        let indices: Vec<TableIndex> = TableIndex::range(4).collect();
        assert_eq!(indices.len(), 4);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(TableIndex::range(0).len(), 0);
    }
}
