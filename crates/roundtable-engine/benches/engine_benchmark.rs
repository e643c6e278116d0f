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

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use roundtable_engine::{
    engine::AllocationEngine,
    monitor::no_op::NoOpMonitor,
    strategy::{greedy::GreedyStrategy, rotation::RotationStrategy},
};
use roundtable_model::{model::Model, table::TableDescriptor};
use std::hint::black_box;

/// (participants, tables, seats)
const SHAPES: &[(u32, usize, usize)] = &[(6, 3, 2), (20, 4, 4), (60, 10, 6), (120, 12, 10)];

fn build_model(participants: u32, tables: usize, seats: usize) -> Model<u32> {
    Model::new(1..=participants, TableDescriptor::uniform(1, tables, seats))
        .expect("benchmark shapes are valid")
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_allocation");
    let engine = AllocationEngine::builder().with_restarts(0).build();

    for &(participants, tables, seats) in SHAPES {
        let model = build_model(participants, tables, seats);
        let id = format!("{}p_{}x{}", participants, tables, seats);
        group.throughput(Throughput::Elements(u64::from(participants)));
        group.bench_with_input(BenchmarkId::from_parameter(id), &model, |b, model| {
            let mut strategy = GreedyStrategy::new(ChaCha8Rng::seed_from_u64(42));
            b.iter(|| {
                let outcome = engine
                    .allocate(black_box(model), &mut strategy, &mut NoOpMonitor::new(), None)
                    .expect("allocation succeeds");
                black_box(outcome.coverage())
            })
        });
    }

    group.finish();
}

fn bench_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotation_allocation");
    let engine = AllocationEngine::new();

    for &(participants, tables, seats) in SHAPES {
        let model = build_model(participants, tables, seats);
        let id = format!("{}p_{}x{}", participants, tables, seats);
        group.throughput(Throughput::Elements(u64::from(participants)));
        group.bench_with_input(BenchmarkId::from_parameter(id), &model, |b, model| {
            b.iter(|| {
                let outcome = engine
                    .allocate(
                        black_box(model),
                        &mut RotationStrategy::new(),
                        &mut NoOpMonitor::new(),
                        None,
                    )
                    .expect("allocation succeeds");
                black_box(outcome.coverage())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_greedy, bench_rotation);
criterion_main!(benches);
