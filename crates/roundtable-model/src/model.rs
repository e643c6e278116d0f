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
    error::ModelError,
    index::{ParticipantIndex, TableIndex},
    table::{TableDescriptor, TableId},
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

/// Requirements on caller-provided participant identifiers.
///
/// The engine never looks inside an identifier; it only needs to copy it,
/// compare it and hash it. Integers and strings both qualify.
pub trait ParticipantId: Clone + Eq + Hash + std::fmt::Debug {}

impl<T> ParticipantId for T where T: Clone + Eq + Hash + std::fmt::Debug {}

/// Number of unordered pairs among `n` participants, `C(n, 2)`.
#[inline]
pub const fn pair_count(n: usize) -> usize {
    if n < 2 { 0 } else { n * (n - 1) / 2 }
}

/// The immutable input of one allocation run.
///
/// Participants and tables are stored in input order and addressed by dense
/// indices:
/// - `participants[p]`: the caller's id of participant `p`.
/// - `tables[t]`: the descriptor of table `t`. Tables are walked in this order
///   every round.
///
/// All tables share one seat count (`seats_per_table`).
///
/// Construction:
/// - Use `ModelBuilder` and call `ModelBuilder::build`, or `Model::new`.
#[derive(Clone, Debug)]
pub struct Model<P>
where
    P: ParticipantId,
{
    participants: Vec<P>,                             // len = num_participants
    participant_lookup: FxHashMap<P, ParticipantIndex>, // id -> index
    tables: Vec<TableDescriptor>,                     // len = num_tables
    seats_per_table: usize,
}

impl<P> Model<P>
where
    P: ParticipantId,
{
    /// Builds and validates a model from participant ids and table descriptors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roundtable_model::{model::Model, table::TableDescriptor};
    ///
    /// let model = Model::new(vec![1, 2, 3, 4], TableDescriptor::uniform(1, 2, 2)).unwrap();
    /// assert_eq!(model.num_participants(), 4);
    /// assert_eq!(model.total_capacity(), 4);
    /// ```
    pub fn new<I, J>(participants: I, tables: J) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = P>,
        J: IntoIterator<Item = TableDescriptor>,
    {
        let mut builder = ModelBuilder::new();
        builder.add_participants(participants);
        builder.add_tables(tables);
        builder.build()
    }

    /// Returns the number of participants in the model.
    #[inline]
    pub fn num_participants(&self) -> usize {
        self.participants.len()
    }

    /// Returns the number of tables in the model.
    #[inline]
    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    /// Returns the shared seat count of all tables, or `0` without tables.
    #[inline]
    pub fn seats_per_table(&self) -> usize {
        self.seats_per_table
    }

    /// Returns how many participants can be seated in a single round.
    #[inline]
    pub fn total_capacity(&self) -> usize {
        self.seats_per_table.saturating_mul(self.tables.len())
    }

    /// Returns the number of distinct unordered participant pairs, `C(n, 2)`.
    #[inline]
    pub fn possible_pairs(&self) -> usize {
        pair_count(self.participants.len())
    }

    /// Returns `true` if nothing can be allocated: no participants or no tables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty() || self.tables.is_empty()
    }

    /// Returns all participant ids in input order.
    #[inline]
    pub fn participants(&self) -> &[P] {
        &self.participants
    }

    /// Returns all table descriptors in walking order.
    #[inline]
    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    /// Returns the id of the specified participant.
    ///
    /// # Panics
    ///
    /// Panics if `participant_index` is not in `0..num_participants()`.
    #[inline]
    pub fn participant(&self, participant_index: ParticipantIndex) -> &P {
        let index = participant_index.get();
        debug_assert!(
            index < self.num_participants(),
            "called `Model::participant` with participant index out of bounds: the len is {} but the index is {}",
            self.num_participants(),
            index
        );

        &self.participants[index]
    }

    /// Looks up the dense index of a participant id.
    #[inline]
    pub fn participant_index(&self, id: &P) -> Option<ParticipantIndex> {
        self.participant_lookup.get(id).copied()
    }

    /// Returns the descriptor of the specified table.
    ///
    /// # Panics
    ///
    /// Panics if `table_index` is not in `0..num_tables()`.
    #[inline]
    pub fn table(&self, table_index: TableIndex) -> &TableDescriptor {
        let index = table_index.get();
        debug_assert!(
            index < self.num_tables(),
            "called `Model::table` with table index out of bounds: the len is {} but the index is {}",
            self.num_tables(),
            index
        );

        &self.tables[index]
    }

    /// Returns the seat count of the specified table.
    #[inline]
    pub fn table_seats(&self, table_index: TableIndex) -> usize {
        self.table(table_index).seats
    }

    /// Looks up the dense index of a table id.
    #[inline]
    pub fn table_index(&self, id: TableId) -> Option<TableIndex> {
        self.tables
            .iter()
            .position(|t| t.id == id)
            .map(TableIndex::new)
    }
}

impl<P> std::fmt::Display for Model<P>
where
    P: ParticipantId,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model(participants: {}, tables: {}, seats per table: {}, possible pairs: {})",
            self.num_participants(),
            self.num_tables(),
            self.seats_per_table,
            self.possible_pairs()
        )
    }
}

/// Mutable builder collecting the inputs of a `Model`.
///
/// Nothing is validated while adding; `build` checks the whole input at once
/// and reports the first problem it finds.
#[derive(Clone, Debug)]
pub struct ModelBuilder<P> {
    participants: Vec<P>,
    tables: Vec<TableDescriptor>,
}

impl<P> Default for ModelBuilder<P>
where
    P: ParticipantId,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ModelBuilder<P>
where
    P: ParticipantId,
{
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Creates an empty builder with room for the given number of participants and tables.
    #[inline]
    pub fn with_capacity(num_participants: usize, num_tables: usize) -> Self {
        Self {
            participants: Vec::with_capacity(num_participants),
            tables: Vec::with_capacity(num_tables),
        }
    }

    /// Adds a participant and returns the index it will have in the model.
    #[inline]
    pub fn add_participant(&mut self, id: P) -> ParticipantIndex {
        self.participants.push(id);
        ParticipantIndex::new(self.participants.len() - 1)
    }

    /// Adds several participants in iteration order.
    #[inline]
    pub fn add_participants<I>(&mut self, ids: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
    {
        self.participants.extend(ids);
        self
    }

    /// Adds a table and returns the index it will have in the model.
    #[inline]
    pub fn add_table(&mut self, table: TableDescriptor) -> TableIndex {
        self.tables.push(table);
        TableIndex::new(self.tables.len() - 1)
    }

    /// Adds several tables in iteration order.
    #[inline]
    pub fn add_tables<I>(&mut self, tables: I) -> &mut Self
    where
        I: IntoIterator<Item = TableDescriptor>,
    {
        self.tables.extend(tables);
        self
    }

    /// Returns the number of participants added so far.
    #[inline]
    pub fn num_participants(&self) -> usize {
        self.participants.len()
    }

    /// Returns the number of tables added so far.
    #[inline]
    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    /// Validates the collected input and builds the model.
    ///
    /// # Errors
    ///
    /// - `ModelError::ZeroSeats` if a table has no seats.
    /// - `ModelError::DuplicateTable` if a table id appears twice.
    /// - `ModelError::HeterogeneousCapacity` if seat counts differ between tables.
    /// - `ModelError::DuplicateParticipant` if a participant id appears twice.
    pub fn build(self) -> Result<Model<P>, ModelError> {
        let seats_per_table = self.validate_tables()?;

        let mut participant_lookup =
            FxHashMap::with_capacity_and_hasher(self.participants.len(), Default::default());
        for (position, id) in self.participants.iter().enumerate() {
            if participant_lookup
                .insert(id.clone(), ParticipantIndex::new(position))
                .is_some()
            {
                return Err(ModelError::DuplicateParticipant { position });
            }
        }

        Ok(Model {
            participants: self.participants,
            participant_lookup,
            tables: self.tables,
            seats_per_table,
        })
    }

    fn validate_tables(&self) -> Result<usize, ModelError> {
        let Some(first) = self.tables.first() else {
            return Ok(0);
        };

        let expected = first.seats;
        let mut seen = FxHashSet::default();
        for table in &self.tables {
            if table.seats == 0 {
                return Err(ModelError::ZeroSeats { table: table.id });
            }
            if !seen.insert(table.id) {
                return Err(ModelError::DuplicateTable { table: table.id });
            }
            if table.seats != expected {
                return Err(ModelError::HeterogeneousCapacity {
                    table: table.id,
                    expected,
                    found: table.seats,
                });
            }
        }
        Ok(expected)
    }
}
