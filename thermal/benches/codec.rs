use bytes::Bytes;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use thermal_metadata::{CamAngle, Quaternion, ThermalMetadata, MAX_CAM_ANGLES};

/// A record at the format's capacity: 50 camera angle samples and a 4 KiB
/// payload.
fn full_record() -> ThermalMetadata {
    ThermalMetadata {
        cam_angles: (0..MAX_CAM_ANGLES)
            .map(|i| CamAngle {
                orientation: Quaternion {
                    x: i as f32,
                    y: 0.5,
                    z: -0.5,
                    w: 1.0,
                },
                timestamp_us: i as u64 * 33_333,
            })
            .collect(),
        jpeg_data: Bytes::from(vec![0xab; 4096]),
        ..Default::default()
    }
}

fn bench_encode(c: &mut Criterion) {
    let meta = full_record();
    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Bytes(meta.encode_size() as u64));
    group.bench_function("full", |b| b.iter(|| meta.encode().unwrap()));
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let encoded = full_record().encode().unwrap();
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(encoded.len() as u64));
    group.bench_function("full", |b| {
        b.iter(|| ThermalMetadata::decode(encoded.clone()).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
