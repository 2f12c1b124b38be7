//! Benchmarks for full measure/layout passes.

use bubblekit_core::Size;
use bubblekit_layout::{AvoidanceMode, BubbleConfig, BubbleLayoutAlgorithm, Placement, PopupTheme, TargetId};
use bubblekit_test_utils::{FakeChild, FakeViewport};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use glam::Vec2;

const TARGET: TargetId = TargetId(1);

fn pass(viewport: &FakeViewport, config: BubbleConfig, child: Size<f32>) {
    let mut bubble = BubbleLayoutAlgorithm::new(TARGET, config, PopupTheme::default());
    let mut child = FakeChild::new(child.width, child.height);
    bubble.measure(viewport, Some(&mut child));
    black_box(bubble.layout(viewport, Some(&mut child)));
}

fn bench_first_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_fit");

    for placement in [Placement::Bottom, Placement::Right, Placement::TopLeft] {
        let viewport = FakeViewport::new(720.0, 1280.0).with_target(TARGET, Vec2::new(300.0, 600.0), Size::new(120.0, 48.0));
        let config = BubbleConfig::default().with_placement(placement);
        group.bench_with_input(BenchmarkId::new("placement", placement), &config, |b, &config| {
            b.iter(|| pass(&viewport, config, Size::new(200.0, 80.0)));
        });
    }

    group.finish();
}

fn bench_fallbacks(c: &mut Criterion) {
    let mut group = c.benchmark_group("fallbacks");
    let viewport = FakeViewport::new(720.0, 1280.0).with_target(TARGET, Vec2::new(7.0, 500.0), Size::new(706.0, 100.0));

    group.bench_function("cover", |b| {
        b.iter(|| pass(&viewport, BubbleConfig::default(), Size::new(700.0, 1200.0)));
    });

    let avoid = BubbleConfig::default()
        .with_placement(Placement::Bottom)
        .with_avoidance(AvoidanceMode::AvoidAroundTarget);
    group.bench_function("avoid", |b| {
        b.iter(|| pass(&viewport, avoid, Size::new(700.0, 1200.0)));
    });

    group.finish();
}

criterion_group!(benches, bench_first_fit, bench_fallbacks);
criterion_main!(benches);
