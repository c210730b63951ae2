use criterion::{black_box, criterion_group, Criterion};
use pprof::criterion::{Output, PProfProfiler};

use huffcomp::{CodeBook, FrequencyTable, TreeBuilder};

use crate::benchmarks::get_symbols;

fn tree_building_bench(c: &mut Criterion) {
    let symbols = get_symbols();

    let mut group = c.benchmark_group("tree building");
    group.throughput(criterion::Throughput::Elements(symbols.len() as u64));
    group.bench_function("frequency table", |b| {
        b.iter(|| FrequencyTable::from_reader(black_box(&symbols[..])).unwrap())
    });

    let table = FrequencyTable::from_reader(&symbols[..]).unwrap();
    group.bench_function("tree and codebook", |b| {
        b.iter(|| {
            let tree = TreeBuilder::new(black_box(&table)).build();
            CodeBook::from(tree.as_ref())
        })
    });
    group.finish()
}

criterion_group! {
    name = tree_building_benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = tree_building_bench
}
