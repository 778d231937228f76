use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use thumbhash_core::{approximate_aspect_ratio, average_rgba, decode, encode};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn gradient_image(width: usize, height: usize, alpha: bool) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let r = ((x as f64 / width as f64) * 255.0) as u8;
            let g = ((y as f64 / height as f64) * 255.0) as u8;
            let a = if alpha { ((x + y) * 255 / (width + height)) as u8 } else { 255 };
            pixels.extend_from_slice(&[r, g, 128, a]);
        }
    }
    pixels
}

// ---------------------------------------------------------------------------
// Encode benchmarks
// ---------------------------------------------------------------------------

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for &(w, h) in &[(16u32, 16u32), (32, 32), (64, 48), (100, 100)] {
        let label = format!("{w}x{h}");
        group.throughput(Throughput::Elements((w as u64) * (h as u64)));

        let opaque = gradient_image(w as usize, h as usize, false);
        group.bench_with_input(BenchmarkId::new("opaque", &label), &opaque, |b, img| {
            b.iter(|| encode(w, h, img).unwrap());
        });

        let translucent = gradient_image(w as usize, h as usize, true);
        group.bench_with_input(BenchmarkId::new("alpha", &label), &translucent, |b, img| {
            b.iter(|| encode(w, h, img).unwrap());
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Decode benchmarks
// ---------------------------------------------------------------------------

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for &(w, h) in &[(100u32, 100u32), (100, 50), (100, 10)] {
        let label = format!("{w}x{h}");
        for (kind, alpha) in [("opaque", false), ("alpha", true)] {
            let img = gradient_image(w as usize, h as usize, alpha);
            let hash = encode(w, h, &img).expect("encode ok");
            group.bench_with_input(BenchmarkId::new(kind, &label), &hash, |b, hash| {
                b.iter(|| decode(hash).unwrap());
            });
        }
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Header-only fast paths
// ---------------------------------------------------------------------------

fn bench_fast_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_paths");

    let img = gradient_image(64, 64, true);
    let hash = encode(64, 64, &img).expect("encode ok");

    group.bench_function("average_rgba", |b| {
        b.iter(|| average_rgba(black_box(&hash)).unwrap());
    });

    group.bench_function("approximate_aspect_ratio", |b| {
        b.iter(|| approximate_aspect_ratio(black_box(&hash)).unwrap());
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_encode, bench_decode, bench_fast_paths);
criterion_main!(benches);
