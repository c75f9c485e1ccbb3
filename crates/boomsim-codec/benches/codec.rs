//! Codec benchmarks at realistic run lengths.
//!
//! 3200 steps is a 16 s run sampled every 5 ms.

use boomsim_codec::{ChannelSet, decode, encode};
use boomsim_layout::ChannelLayout;
use boomsim_types::{ArmMode, BodyModel, Channel, StepCount};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn dual_arm_input(n: usize) -> (ChannelLayout, ChannelSet) {
    let layout =
        ChannelLayout::input(StepCount::new(n), ArmMode::DualArm, BodyModel::Rigid).unwrap();
    let ramp: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let channels = ChannelSet::new()
        .with_series(Channel::Control1, ramp.clone())
        .with_series(Channel::Control2, ramp.clone())
        .with_series(Channel::PumpPressure, ramp)
        .with_scalar(Channel::Theta1, 0.25)
        .with_scalar(Channel::Theta2, -1.0);
    (layout, channels)
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_encode");

    for n in [320, 3200, 32_000] {
        let (layout, channels) = dual_arm_input(n);
        group.throughput(Throughput::Elements(layout.total_len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| encode(black_box(&layout), black_box(&channels)).unwrap());
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_decode");

    for n in [320, 3200, 32_000] {
        let layout =
            ChannelLayout::output(StepCount::new(n), ArmMode::SingleArm, BodyModel::Flexible)
                .unwrap();
        let buffer = vec![1.0; layout.total_len()];
        group.throughput(Throughput::Elements(layout.total_len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| decode(black_box(&buffer), black_box(&layout)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
