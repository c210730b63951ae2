use std::io::Cursor;

use criterion::{black_box, criterion_group, Criterion};
use pprof::criterion::{Output, PProfProfiler};

use huffcomp::{CodeBook, Decoder, Encoder, FrequencyTable, TreeBuilder};

use crate::benchmarks::get_symbols;

fn decoding_bench(c: &mut Criterion) {
    let symbols = get_symbols();
    let table = FrequencyTable::from_reader(&symbols[..]).unwrap();
    let tree = TreeBuilder::new(&table).build();
    let codebook = CodeBook::from(tree.as_ref());

    let mut compressed = Cursor::new(Vec::new());
    Encoder::new(&codebook)
        .encode(&symbols[..], &mut compressed)
        .unwrap();
    let compressed = compressed.into_inner();

    let mut group = c.benchmark_group("decoder benchmark");
    group.measurement_time(std::time::Duration::from_secs(10));
    group.throughput(criterion::Throughput::Elements(symbols.len() as u64));
    group.sample_size(10);
    group.bench_function("decoding", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(symbols.len());
            Decoder::new(tree.as_ref())
                .decode(black_box(&compressed[..]), &mut out)
                .unwrap();
            out
        })
    });
    group.finish()
}

criterion_group! {
    name = decoder_benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = decoding_bench
}
