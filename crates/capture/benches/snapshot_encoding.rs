use capture::{Camera, SnapshotExtractor, StreamConstraints, SyntheticDevice, encode_jpeg};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Gradient pattern; closer to camera output than a flat colour.
fn gradient_pixels(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push(((x * 255) / width) as u8);
            data.push(((y * 255) / height) as u8);
            data.push((((x + y) * 127) / (width + height)) as u8);
        }
    }
    data
}

fn benchmark_jpeg_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("jpeg_encoding");

    let sizes = [(640, 480, "VGA"), (1280, 720, "HD"), (1920, 1080, "Full HD")];

    for (width, height, label) in sizes {
        let pixels = gradient_pixels(width, height);
        group.throughput(Throughput::Elements((width * height) as u64));

        group.bench_with_input(BenchmarkId::new("q92", label), &pixels, |b, pixels| {
            b.iter(|| encode_jpeg(black_box(pixels), width, height, 92))
        });
    }

    group.finish();
}

fn benchmark_snapshot(c: &mut Criterion) {
    let mut camera = Camera::new(SyntheticDevice::new(), StreamConstraints::default());
    let handle = camera.start().expect("synthetic camera always starts");
    let extractor = SnapshotExtractor::default();

    c.bench_function("snapshot_vga", |b| {
        b.iter(|| extractor.capture(black_box(&mut camera), handle))
    });
}

criterion_group!(benches, benchmark_jpeg_encoding, benchmark_snapshot);
criterion_main!(benches);
