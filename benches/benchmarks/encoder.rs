use std::io::Cursor;

use criterion::{black_box, criterion_group, BatchSize, Criterion};
use pprof::criterion::{Output, PProfProfiler};

use huffcomp::{CodeBook, Encoder, FrequencyTable, TreeBuilder};

use crate::benchmarks::get_symbols;

fn encoding_bench(c: &mut Criterion) {
    let symbols = get_symbols();
    let table = FrequencyTable::from_reader(&symbols[..]).unwrap();
    let tree = TreeBuilder::new(&table).build();
    let codebook = CodeBook::from(tree.as_ref());

    let mut group = c.benchmark_group("encoder benchmark");
    group.measurement_time(std::time::Duration::from_secs(10));
    group.throughput(criterion::Throughput::Elements(symbols.len() as u64));
    group.sample_size(10);
    group.bench_function("encoding", |b| {
        b.iter_batched(
            || Cursor::new(Vec::with_capacity(symbols.len())),
            |mut sink| {
                Encoder::new(&codebook)
                    .encode(black_box(&symbols[..]), &mut sink)
                    .unwrap()
            },
            BatchSize::SmallInput,
        )
    });
    group.finish()
}

criterion_group! {
    name = encoder_benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = encoding_bench
}
