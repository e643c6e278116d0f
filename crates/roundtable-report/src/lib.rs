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

//! Roundtable Report: views and persistence for allocation plans
//!
//! Everything an event organizer does with a plan once the engine produced
//! it: pick who takes part, look the plan up by round, by participant or for
//! the whole event, and hand it to storage one round at a time.
//!
//! Module map
//! - `roster`: named attendees and check-in state. Only checked-in attendees
//!   are allocated.
//! - `summary`: by-round, by-participant and by-event views, plus the
//!   `TableDirectory` that maps table ids to printed table numbers.
//! - `sink`: the `PlanSink` seam for storage, `persist_plan`, and the
//!   in-memory `MemorySink`.
//! - `error`: error types.

pub mod error;
pub mod roster;
pub mod sink;
pub mod summary;
