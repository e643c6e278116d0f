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

//! Roundtable Engine: round-based table allocation
//!
//! Plans the rounds of a networking event. Every round partitions the
//! checked-in participants over tables of a fixed size; across rounds the
//! engine tries to make sure no two participants share a table twice, and it
//! stops once every pair has met or a round cap is reached.
//!
//! Core flow
//! - Provide a `roundtable_model::model::Model<P>` (participants + tables).
//! - Optionally preview the round count with `estimate::estimate_rounds`.
//! - Choose a `strategy::RoundStrategy` (greedy with encounter tracking, or
//!   deterministic rotation) and an `policy::UnseatedPolicy`.
//! - Run `engine::AllocationEngine::allocate`, or configure everything from
//!   TOML through `config::EngineConfig`, or call the one-shot `allocate`.
//!
//! Design highlights
//! - The encounter set is owned by the round loop and only lent to strategies
//!   as a shared reference; every round is planned against all prior rounds.
//! - Randomness is injected (`rand::Rng`), so a seeded generator makes runs
//!   reproducible.
//! - Coverage shortfalls are not errors. They are reported on the
//!   `result::AllocationOutcome` next to the plan.
//!
//! Module map
//! - `engine`: the round loop, restarts and unseated handling.
//! - `estimate`: the round-count estimator.
//! - `strategy`: round builders (`greedy`, `rotation`) and `RoundDraft`.
//! - `policy`: what happens to participants no table can take.
//! - `monitor`: allocation monitors (log, time limit, composite, no-op).
//! - `result`: outcomes with termination reasons.
//! - `stats`: run counters and timing.
//! - `config`: TOML-backed engine configuration.
//! - `error`: error types.

pub mod config;
pub mod engine;
pub mod error;
pub mod estimate;
pub mod monitor;
pub mod policy;
pub mod result;
pub mod stats;
pub mod strategy;

pub use engine::allocate;
