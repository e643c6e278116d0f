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

//! # Roundtable Model
//!
//! **The domain model for round-based table allocation.**
//!
//! A networking event seats its participants at a set of equally sized tables
//! for several rounds. Between rounds everybody moves, and the goal is that no
//! two participants share a table twice. This crate describes the inputs and
//! outputs of that problem; the allocation engine lives in `roundtable_engine`.
//!
//! ## Architecture
//!
//! * **`index`**: Strongly typed dense indices (`ParticipantIndex`, `TableIndex`).
//! * **`table`**: Table identifiers and descriptors (`TableId`, `TableDescriptor`).
//! * **`model`**: The validated, immutable `Model` and its `ModelBuilder`.
//! * **`encounter`**: The `EncounterSet`, a triangular bit matrix of pairs that already met.
//! * **`coverage`**: How many of the possible pairs have met (`Coverage`).
//! * **`plan`**: The output: `Plan`, `Round` and `TableSeating`.
//! * **`error`**: `ModelError`, raised when inputs are malformed.
//!
//! ## Design Philosophy
//!
//! 1.  **Dense indices inside, caller ids outside**: the engine works on
//!     `ParticipantIndex` values only; the model translates to and from the
//!     caller's participant ids at the boundary.
//! 2.  **Fail-Fast**: `ModelBuilder::build` rejects malformed descriptors before any
//!     round is computed.

pub mod coverage;
pub mod encounter;
pub mod error;
pub mod index;
pub mod model;
pub mod plan;
pub mod table;
