//! Performance benchmarks for the bit packer and sub-block framer
//!
//! This benchmark suite evaluates:
//! - Packing and unpacking throughput at fixed and mixed code widths
//! - Sub-block framing and unframing across payload sizes

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxigif_core::bitstream::{BitReader, BitWriter};
use oxigif_core::subblock::{read_sub_blocks, write_sub_blocks};
use std::hint::black_box;

/// Codes with widths cycling through 3..=12 bits, as an LZW stream produces.
fn mixed_codes(count: usize) -> Vec<(u32, u8)> {
    let mut seed: u64 = 0x123456789ABCDEF0;
    (0..count)
        .map(|i| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let width = 3 + (i % 10) as u8;
            (((seed >> 32) as u32) & ((1 << width) - 1), width)
        })
        .collect()
}

fn pack(codes: &[(u32, u8)]) -> Vec<u8> {
    let mut writer = BitWriter::new(Vec::with_capacity(codes.len() * 2));
    for &(code, width) in codes {
        writer.write_bits(code, width).unwrap();
    }
    writer.into_inner().unwrap()
}

fn bench_bit_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_packing");

    for count in [1_000, 100_000] {
        let codes = mixed_codes(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("write", count), &codes, |b, codes| {
            b.iter(|| black_box(pack(black_box(codes))));
        });

        let packed = pack(&codes);
        group.bench_with_input(BenchmarkId::new("read", count), &packed, |b, packed| {
            b.iter(|| {
                let mut reader = BitReader::new(&packed[..]);
                for &(_, width) in &codes {
                    black_box(reader.read_bits(width).unwrap());
                }
            });
        });
    }

    group.finish();
}

fn bench_sub_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("sub_blocks");

    for size in [255, 64 * 1024, 1024 * 1024] {
        let data = vec![0x5A; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("frame", size), &data, |b, data| {
            b.iter(|| {
                let mut framed = Vec::with_capacity(data.len() + data.len() / 255 + 2);
                write_sub_blocks(&mut framed, black_box(data)).unwrap();
                black_box(framed)
            });
        });

        let mut framed = Vec::new();
        write_sub_blocks(&mut framed, &data).unwrap();
        group.bench_with_input(BenchmarkId::new("unframe", size), &framed, |b, framed| {
            b.iter(|| black_box(read_sub_blocks(&mut &framed[..]).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bit_packing, bench_sub_blocks);
criterion_main!(benches);
