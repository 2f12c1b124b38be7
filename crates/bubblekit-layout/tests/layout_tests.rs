//! Integration tests for bubble placement.
//!
//! Every test runs a full measure and layout pass against a 720x1280 fake
//! window at density 1 unless noted. With the stock theme the viewport keeps
//! 7px at the sides and 1px at the top and bottom, the arrow is 16x8 and the
//! gap to the target is 8.

use bubblekit_core::{Rect, Size};
use bubblekit_layout::*;
use bubblekit_test_utils::{FakeChild, FakeViewport};
use glam::Vec2;

const TARGET: TargetId = TargetId(1);

fn window() -> FakeViewport {
    FakeViewport::new(720.0, 1280.0)
}

fn run(viewport: &FakeViewport, config: BubbleConfig, child: &mut FakeChild) -> BubbleLayoutResult {
    run_with_theme(viewport, config, PopupTheme::default(), child)
}

fn run_with_theme(
    viewport: &FakeViewport,
    config: BubbleConfig,
    theme: PopupTheme,
    child: &mut FakeChild,
) -> BubbleLayoutResult {
    let mut bubble = BubbleLayoutAlgorithm::new(TARGET, config, theme);
    bubble.measure(viewport, Some(child));
    bubble
        .layout(viewport, Some(child))
        .cloned()
        .expect("layout produced no result")
}

// ============================================================================
// Preferred placement
// ============================================================================

#[test]
fn test_default_places_below_target() {
    let viewport = window().with_target(TARGET, Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
    let mut child = FakeChild::new(200.0, 60.0);
    let result = run(&viewport, BubbleConfig::default(), &mut child);

    assert_eq!(result.arrow_placement, Placement::Bottom);
    assert_eq!(result.stage, SearchStage::Accepted);
    assert_eq!(result.child_offset, Vec2::new(260.0, 464.0));
    assert_eq!(result.child_size, Size::new(200.0, 60.0));
    assert!(result.show_arrow);
    assert_eq!(result.radius, 20.0);
}

#[test]
fn test_frame_includes_arrow_margin() {
    let viewport = window().with_target(TARGET, Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
    let mut child = FakeChild::new(200.0, 60.0);
    let result = run(&viewport, BubbleConfig::default(), &mut child);

    assert_eq!(child.frame_size, Size::new(216.0, 76.0));
    assert_eq!(child.frame_offset, Vec2::new(252.0, 456.0));
    assert_eq!(result.frame_offset, child.frame_offset);
    assert_eq!(child.measure_count(), 1);
}

#[test]
fn test_arrow_points_at_target_centre() {
    let viewport = window().with_target(TARGET, Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
    let mut child = FakeChild::new(200.0, 60.0);
    let result = run(&viewport, BubbleConfig::default(), &mut child);

    // Target centre x is 360, the bubble starts at 260.
    assert_eq!(result.arrow_offset, 100.0);
    assert_eq!(result.arrow_position, Vec2::new(288.0, 456.0));
}

#[test]
fn test_flips_above_target_near_bottom() {
    let viewport = window().with_target(TARGET, Vec2::new(300.0, 1200.0), Size::new(120.0, 48.0));
    let mut child = FakeChild::new(200.0, 60.0);
    let result = run(&viewport, BubbleConfig::default(), &mut child);

    assert_eq!(result.arrow_placement, Placement::Top);
    assert_eq!(result.child_offset, Vec2::new(260.0, 1124.0));
    assert_eq!(result.touch_region, Rect::new(260.0, 1124.0, 200.0, 68.0));
}

#[test]
fn test_right_placement_falls_back_to_left() {
    let viewport = window().with_target(TARGET, Vec2::new(650.0, 400.0), Size::new(60.0, 48.0));
    let mut child = FakeChild::new(200.0, 60.0);
    let config = BubbleConfig::default().with_placement(Placement::Right);
    let result = run(&viewport, config, &mut child);

    assert_eq!(result.arrow_placement, Placement::Left);
    assert_eq!(result.child_offset, Vec2::new(434.0, 394.0));
    assert_eq!(result.touch_region, Rect::new(434.0, 394.0, 208.0, 60.0));
}

#[test]
fn test_accepted_bubble_stays_inside_margins() {
    let child_size = Size::new(160.0, 80.0);
    for x in (0..=660).step_by(60) {
        for y in (0..=1220).step_by(110) {
            let viewport = window().with_target(TARGET, Vec2::new(x as f32, y as f32), Size::new(60.0, 40.0));
            let mut child = FakeChild::new(child_size.width, child_size.height);
            let result = run(&viewport, BubbleConfig::default(), &mut child);
            if result.stage != SearchStage::Accepted {
                continue;
            }
            let rect = Rect::from_origin_size(result.child_offset, result.child_size);
            assert!(rect.left() >= 7.0 && rect.right() <= 713.0, "{} for target at ({}, {})", rect, x, y);
            assert!(rect.top() >= 1.0 && rect.bottom() <= 1279.0, "{} for target at ({}, {})", rect, x, y);
        }
    }
}

// ============================================================================
// Offsets
// ============================================================================

#[test]
fn test_position_offset_is_added() {
    let viewport = window().with_target(TARGET, Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
    let mut child = FakeChild::new(200.0, 60.0);
    let config = BubbleConfig::default().with_position_offset(Vec2::new(10.0, 20.0));
    let result = run(&viewport, config, &mut child);
    assert_eq!(result.child_offset, Vec2::new(270.0, 484.0));
}

#[test]
fn test_double_border_rounds_offset() {
    let viewport = window().with_target(TARGET, Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
    let mut child = FakeChild::new(200.0, 60.0);
    let config = BubbleConfig::default().with_position_offset(Vec2::new(0.4, 0.6));
    let theme = PopupTheme {
        double_border_enable: true,
        ..PopupTheme::default()
    };
    let result = run_with_theme(&viewport, config, theme, &mut child);
    assert_eq!(result.child_offset, Vec2::new(260.0, 465.0));
}

#[test]
fn test_overlay_offset_moves_anchor() {
    let viewport = window()
        .with_target(TARGET, Vec2::new(300.0, 400.0), Size::new(120.0, 48.0))
        .with_overlay_offset(Vec2::new(0.0, 100.0));
    let mut child = FakeChild::new(200.0, 60.0);
    let mut bubble = BubbleLayoutAlgorithm::new(TARGET, BubbleConfig::default(), PopupTheme::default());

    // The offset must not pile up across passes.
    for _ in 0..3 {
        bubble.measure(&viewport, Some(&mut child));
        let result = bubble.layout(&viewport, Some(&mut child)).unwrap();
        assert_eq!(result.child_offset, Vec2::new(260.0, 364.0));
    }
}

#[test]
fn test_density_scales_everything() {
    let viewport = FakeViewport::new(1440.0, 2560.0)
        .with_density(2.0)
        .with_target(TARGET, Vec2::new(600.0, 800.0), Size::new(240.0, 96.0));
    let mut child = FakeChild::new(400.0, 120.0);
    let result = run(&viewport, BubbleConfig::default(), &mut child);

    assert_eq!(result.child_offset, Vec2::new(520.0, 928.0));
    assert_eq!(result.radius, 40.0);
    assert_eq!(child.frame_size, Size::new(432.0, 152.0));
    assert_eq!(result.frame_offset, Vec2::new(504.0, 912.0));
    assert_eq!(result.padding, 24.0);
}

// ============================================================================
// Caret
// ============================================================================

#[test]
fn test_caret_anchors_below_caret() {
    let viewport = window()
        .with_target(TARGET, Vec2::new(100.0, 300.0), Size::new(400.0, 48.0))
        .with_caret(TARGET, Vec2::new(150.0, 310.0), 20.0);
    let mut child = FakeChild::new(200.0, 60.0);
    let config = BubbleConfig::default()
        .with_placement(Placement::Left)
        .with_position_offset(Vec2::new(10.0, 10.0));
    let result = run(&viewport, config, &mut child);

    assert_eq!(result.arrow_placement, Placement::Bottom);
    assert_eq!(result.child_offset, Vec2::new(50.0, 346.0));
    assert_eq!(result.arrow_position, Vec2::new(150.0, 338.0));
    assert_eq!(result.arrow_offset, 100.0);
}

#[test]
fn test_caret_ignored_when_caret_mode_is_off() {
    let viewport = window()
        .with_target(TARGET, Vec2::new(100.0, 300.0), Size::new(400.0, 48.0))
        .with_caret(TARGET, Vec2::new(150.0, 310.0), 20.0);
    let mut child = FakeChild::new(200.0, 60.0);
    let config = BubbleConfig::default().with_caret_mode(false);
    let result = run(&viewport, config, &mut child);
    assert_eq!(result.child_offset, Vec2::new(200.0, 364.0));
}

// ============================================================================
// Keyboard and folds
// ============================================================================

#[test]
fn test_keyboard_pushes_bubble_above_target() {
    let viewport = window()
        .with_target(TARGET, Vec2::new(300.0, 800.0), Size::new(120.0, 48.0))
        .with_keyboard(400.0);
    let mut child = FakeChild::new(200.0, 60.0);
    let config = BubbleConfig::default().with_avoid_keyboard(true);
    let result = run(&viewport, config, &mut child);

    assert_eq!(child.last_constraint().unwrap().max_size.height, 870.0);
    assert_eq!(result.arrow_placement, Placement::Top);
    assert_eq!(result.child_offset, Vec2::new(260.0, 724.0));
}

#[test]
fn test_keyboard_ignored_without_avoidance() {
    let viewport = window()
        .with_target(TARGET, Vec2::new(300.0, 800.0), Size::new(120.0, 48.0))
        .with_keyboard(400.0);
    let mut child = FakeChild::new(200.0, 60.0);
    let result = run(&viewport, BubbleConfig::default(), &mut child);
    assert_eq!(result.arrow_placement, Placement::Bottom);
    assert_eq!(result.child_offset.y, 864.0);
}

#[test]
fn test_hover_mode_keeps_bubble_on_target_half() {
    let viewport = window()
        .with_target(TARGET, Vec2::new(300.0, 700.0), Size::new(120.0, 48.0))
        .with_fold(Rect::new(0.0, 600.0, 720.0, 40.0));
    let mut child = FakeChild::new(200.0, 60.0);
    let config = BubbleConfig::default().with_hover_mode(true);
    let result = run(&viewport, config, &mut child);

    assert_eq!(child.last_constraint().unwrap().max_size.height, 639.0);
    assert_eq!(result.child_offset, Vec2::new(260.0, 764.0));
    assert!(result.child_offset.y >= 640.0);
}

// ============================================================================
// Nothing fits
// ============================================================================

#[test]
fn test_oversized_bubble_covers_target() {
    let viewport = window().with_target(TARGET, Vec2::new(7.0, 500.0), Size::new(706.0, 100.0));
    let mut child = FakeChild::new(700.0, 1300.0);
    let result = run(&viewport, BubbleConfig::default(), &mut child);

    assert_eq!(child.last_constraint().unwrap().max_size.height, 1200.0);
    assert_eq!(result.stage, SearchStage::Covered);
    assert_eq!(result.arrow_placement, Placement::None);
    assert!(!result.show_arrow);
    assert_eq!(result.child_offset, Vec2::new(10.0, 1.0));
    assert_eq!(result.touch_region, Rect::new(10.0, 1.0, 700.0, 1200.0));
}

#[test]
fn test_avoidance_compresses_below_target() {
    let viewport = window().with_target(TARGET, Vec2::new(7.0, 500.0), Size::new(706.0, 100.0));
    let mut child = FakeChild::new(700.0, 1200.0);
    let config = BubbleConfig::default()
        .with_placement(Placement::Bottom)
        .with_avoidance(AvoidanceMode::AvoidAroundTarget);
    let result = run(&viewport, config, &mut child);

    assert_eq!(result.stage, SearchStage::Avoided);
    assert_eq!(result.arrow_placement, Placement::Bottom);
    assert_eq!(result.compressed_size, Some(Size::new(700.0, 663.0)));
    assert_eq!(result.child_size, Size::new(700.0, 663.0));
    assert_eq!(result.child_offset, Vec2::new(10.0, 616.0));
    assert!(result.show_arrow);

    assert_eq!(child.measure_count(), 2);
    assert_eq!(child.frame_size, Size::new(716.0, 679.0));
}

#[test]
fn test_custom_content_narrows_beside_target() {
    let viewport = window().with_target(TARGET, Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
    let mut child = FakeChild::new(710.0, 60.0);
    let config = BubbleConfig::default()
        .with_placement(Placement::Right)
        .with_use_custom(true);
    let result = run(&viewport, config, &mut child);

    assert_eq!(child.measure_count(), 2);
    assert_eq!(child.last_constraint().unwrap().max_size.width, 704.0);
    assert_eq!(result.child_size, Size::new(704.0, 60.0));
    assert_eq!(result.arrow_placement, Placement::Bottom);
}

#[test]
fn test_custom_content_narrows_above_and_below_target() {
    let viewport = window().with_target(TARGET, Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
    let mut child = FakeChild::new(710.0, 60.0);
    let config = BubbleConfig::default()
        .with_placement(Placement::Bottom)
        .with_use_custom(true);
    let result = run(&viewport, config, &mut child);

    assert_eq!(child.measure_count(), 2);
    assert_eq!(child.last_constraint().unwrap().max_size.width, 704.0);
    assert_eq!(result.child_size, Size::new(704.0, 60.0));
    assert_eq!(result.arrow_placement, Placement::Bottom);
}

#[test]
fn test_custom_content_remeasured_for_vertical_placement() {
    let viewport = window().with_target(TARGET, Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
    let mut child = FakeChild::new(200.0, 60.0);
    let config = BubbleConfig::default()
        .with_placement(Placement::Top)
        .with_use_custom(true);
    run(&viewport, config, &mut child);

    assert_eq!(child.measure_count(), 2);
    assert_eq!(child.last_constraint().unwrap().max_size.width, 704.0);
    assert_eq!(child.frame_size, Size::new(216.0, 76.0));
}

// ============================================================================
// Pass lifecycle
// ============================================================================

#[test]
fn test_missing_child_skips_passes() {
    let viewport = window().with_target(TARGET, Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
    let mut bubble = BubbleLayoutAlgorithm::new(TARGET, BubbleConfig::default(), PopupTheme::default());
    bubble.measure::<_, FakeChild>(&viewport, None);
    assert!(bubble.layout::<_, FakeChild>(&viewport, None).is_none());
}

#[test]
fn test_missing_target_keeps_previous_result() {
    let mut viewport = window().with_target(TARGET, Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
    let mut child = FakeChild::new(200.0, 60.0);
    let mut bubble = BubbleLayoutAlgorithm::new(TARGET, BubbleConfig::default(), PopupTheme::default());
    bubble.measure(&viewport, Some(&mut child));
    let first = bubble.layout(&viewport, Some(&mut child)).cloned();
    assert!(first.is_some());

    viewport.remove_target(TARGET);
    bubble.measure(&viewport, Some(&mut child));
    let second = bubble.layout(&viewport, Some(&mut child)).cloned();
    assert_eq!(first, second);
}

#[test]
fn test_detached_target_keeps_previous_anchor() {
    let mut viewport = window().with_target(TARGET, Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
    let mut child = FakeChild::new(200.0, 60.0);
    let mut bubble = BubbleLayoutAlgorithm::new(TARGET, BubbleConfig::default(), PopupTheme::default());
    bubble.measure(&viewport, Some(&mut child));
    bubble.layout(&viewport, Some(&mut child));

    if let Some(info) = viewport.target_mut(TARGET) {
        info.offset = Vec2::new(0.0, 0.0);
        info.on_main_tree = false;
        info.visible = false;
    }
    bubble.measure(&viewport, Some(&mut child));
    let result = bubble.layout(&viewport, Some(&mut child)).unwrap();
    assert_eq!(result.child_offset, Vec2::new(260.0, 464.0));
}

#[test]
fn test_exiting_bubble_keeps_geometry() {
    let mut viewport = window().with_target(TARGET, Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
    let mut child = FakeChild::new(200.0, 60.0);
    let mut bubble = BubbleLayoutAlgorithm::new(TARGET, BubbleConfig::default(), PopupTheme::default());
    bubble.measure(&viewport, Some(&mut child));
    bubble.layout(&viewport, Some(&mut child));

    bubble.set_exiting(true);
    viewport.set_target(TARGET, TargetInfo::new(Vec2::new(300.0, 100.0), Size::new(120.0, 48.0)));
    bubble.measure(&viewport, Some(&mut child));
    let result = bubble.layout(&viewport, Some(&mut child)).unwrap();
    assert_eq!(result.child_offset, Vec2::new(260.0, 464.0));
}

#[test]
fn test_follow_transform_uses_transformed_rect() {
    let mut info = TargetInfo::new(Vec2::new(300.0, 400.0), Size::new(120.0, 48.0));
    info.transformed_rect = Some(Rect::new(300.0, 200.0, 120.0, 48.0));
    let viewport = window().with_target_info(TARGET, info);

    let mut child = FakeChild::new(200.0, 60.0);
    let config = BubbleConfig::default().with_follow_transform(true);
    assert_eq!(run(&viewport, config, &mut child).child_offset, Vec2::new(260.0, 264.0));

    let mut child = FakeChild::new(200.0, 60.0);
    assert_eq!(run(&viewport, BubbleConfig::default(), &mut child).child_offset, Vec2::new(260.0, 464.0));
}
