// Run with:  cargo bench --bench erase

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use hub75_bcm_core::encoder::{RowContext, DEPTH};
use hub75_bcm_core::gamma::GammaMode;
use hub75_bcm_core::plain::BitplaneBuffer;
use std::hint::black_box;

const ROWS: usize = 32;
const COLS: usize = 64;
const NROWS: usize = ROWS / 2;

fn erase_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase");
    group.throughput(Throughput::Elements((ROWS * COLS * DEPTH as usize) as u64));

    group.bench_function("plain_bitplane_buffer", |b| {
        let mut fb: BitplaneBuffer<ROWS, COLS, NROWS> = BitplaneBuffer::new(RowContext {
            rows: NROWS as u16,
            cols: COLS as u16,
            transition_bit: 0,
            cutoff: COLS as u16,
            e_enabled: false,
            gamma: GammaMode::Off,
        });
        fb.fill(hub75_bcm_core::Rgb888::new(255, 255, 255));

        b.iter(|| {
            black_box(&mut fb).erase();
        });
    });

    group.finish();
}

criterion_group!(benches, erase_benchmark);
criterion_main!(benches);
