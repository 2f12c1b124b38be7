//! Outline continuity across arrow sizes and corner radii.
//!
//! Every outline is serialised, parsed back and walked segment by segment.

use bubblekit_core::{Dimension, Size};
use bubblekit_geometry::Path;
use bubblekit_layout::*;
use bubblekit_test_utils::{FakeChild, FakeViewport};
use glam::Vec2;

const TARGET: TargetId = TargetId(3);
const TOLERANCE: f32 = 1e-2;
const BOUNDS_TOLERANCE: f32 = 0.1;

fn layout(placement: Placement, config: BubbleConfig) -> (BubbleLayoutResult, FakeChild) {
    let viewport = FakeViewport::new(720.0, 1280.0).with_target(TARGET, Vec2::new(300.0, 600.0), Size::new(120.0, 48.0));
    let mut child = FakeChild::new(200.0, 90.0);
    let mut bubble = BubbleLayoutAlgorithm::new(TARGET, config.with_placement(placement), PopupTheme::default());
    bubble.measure(&viewport, Some(&mut child));
    let result = bubble.layout(&viewport, Some(&mut child)).cloned().unwrap();
    (result, child)
}

fn assert_continuous(path: &Path, context: &str) {
    assert!(path.is_closed(), "{}", context);
    let reparsed = Path::from_svg(&path.to_string()).unwrap();
    let segments: Vec<_> = reparsed.segments().collect();
    for pair in segments.windows(2) {
        assert!((pair[0].to - pair[1].from).length() <= TOLERANCE, "{}", context);
    }
}

// ============================================================================
// Sweeps
// ============================================================================

#[test]
fn test_outline_continuous_for_arrow_sizes() {
    for width in [8.0, 12.0, 16.0, 20.0, 24.0] {
        for height in [4.0, 6.0, 8.0, 10.0] {
            for radius in [0.0, 4.0, 12.0, 20.0] {
                let config = BubbleConfig::default()
                    .with_arrow_size(Dimension::vp(width), Dimension::vp(height))
                    .with_radius(Dimension::vp(radius));
                for placement in [Placement::Bottom, Placement::Top, Placement::Left, Placement::Right] {
                    let (result, _) = layout(placement, config);
                    let context = format!("{} {}x{} r{}", placement, width, height, radius);
                    assert_eq!(result.arrow_placement, placement, "{}", context);
                    assert_continuous(&result.clip_path, &context);
                }
            }
        }
    }
}

#[test]
fn test_outline_stays_inside_child_frame() {
    for placement in [Placement::Bottom, Placement::Top, Placement::Left, Placement::Right] {
        for offset in [None, Some(Dimension::percent(0.0)), Some(Dimension::percent(1.0)), Some(Dimension::px(500.0))] {
            let mut config = BubbleConfig::default();
            config.arrow_offset = offset;
            let (result, child) = layout(placement, config);
            let context = format!("{} {:?}", placement, offset);
            assert!(result.show_arrow, "{}", context);
            assert_continuous(&result.clip_path, &context);

            let bounds = result.clip_path.lyon_bounds().unwrap();
            let frame = child.frame_size;
            assert!(bounds.left() >= -BOUNDS_TOLERANCE, "{} {}", context, bounds);
            assert!(bounds.top() >= -BOUNDS_TOLERANCE, "{} {}", context, bounds);
            assert!(bounds.right() <= frame.width + BOUNDS_TOLERANCE, "{} {}", context, bounds);
            assert!(bounds.bottom() <= frame.height + BOUNDS_TOLERANCE, "{} {}", context, bounds);
        }
    }
}

#[test]
fn test_percent_radius_rounds_short_side() {
    let config = BubbleConfig::default().with_radius(Dimension::percent(1.0));
    let (result, _) = layout(Placement::Left, config);
    assert_eq!(result.radius, 45.0);
    assert!(!result.show_arrow);
    assert_continuous(&result.clip_path, "percent radius");
}
