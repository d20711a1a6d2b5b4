use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use typeid::{
    RandSource, RawValue, TimeSource, TypeId, TypedId, UuidV7Generator, decode, define_typeid,
    encode, uuid_v7,
};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource<u64> for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

struct FixedMockRand;

impl RandSource<u128> for FixedMockRand {
    fn rand(&self) -> u128 {
        0x0123_4567_89AB_CDEF_0123_4567_89AB_CDEF
    }
}

define_typeid!(User = "user");

// Number of operations per benchmark iteration.
const TOTAL_IDS: usize = 4096;

fn bench_codec(c: &mut Criterion) {
    let raw: RawValue = core::array::from_fn(|i| i as u8);
    let encoded = encode(&raw);

    let mut group = c.benchmark_group("base32");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("encode/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(encode(black_box(&raw)));
            }
        });
    });
    group.bench_function(format!("decode/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(decode(black_box(&encoded)).unwrap());
            }
        });
    });
    group.finish();
}

fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("mock/elems/{TOTAL_IDS}"), |b| {
        let generator = UuidV7Generator::new(FixedMockTime { millis: 1 }, FixedMockRand);
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.next_raw());
            }
        });
    });
    group.bench_function(format!("system/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(uuid_v7());
            }
        });
    });
    group.finish();
}

fn bench_type_id(c: &mut Criterion) {
    let text = "user_01h2e8kqvbfwea724h75qc655w";
    let id = TypeId::parse(text).unwrap();

    let mut group = c.benchmark_group("type_id");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("new/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(TypeId::new(black_box("user")).unwrap());
            }
        });
    });
    group.bench_function(format!("new_typed/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(TypedId::<User>::new());
            }
        });
    });
    group.bench_function(format!("parse/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(TypeId::parse(black_box(text)).unwrap());
            }
        });
    });
    group.bench_function(format!("format/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(black_box(&id).to_string());
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_codec, bench_generator, bench_type_id);
criterion_main!(benches);
