//! Path serialisation and lyon conversion tests.
//!
//! These tests exercise the public path API the way the layout engine and
//! painters use it.

use bubblekit_geometry::{Path, PathBuilder, PathCommand};
use glam::Vec2;

// ============================================================================
// Serialisation
// ============================================================================

#[test]
fn test_rounded_rect_reparses() {
    let mut builder = PathBuilder::new();
    builder.rounded_rect(Vec2::new(8.0, 8.0), Vec2::new(120.0, 48.0), 8.0);
    let path = builder.build();

    let text = path.to_string();
    assert!(text.starts_with("M16 8 L120 8 A8 8 0 0 1 128 16"));
    assert!(text.ends_with(" Z"));
    assert_eq!(Path::from_svg(&text).unwrap(), path);
}

#[test]
fn test_large_arc_flag_is_serialised() {
    let mut builder = PathBuilder::new();
    builder
        .move_to(Vec2::ZERO)
        .arc_to(Vec2::splat(2.0), 0.0, true, true, Vec2::new(1.0, 0.0));
    let path = builder.build();

    assert_eq!(path.to_string(), "M0 0 A2 2 0 1 1 1 0");
}

#[test]
fn test_parse_whitespace_tolerant() {
    let path = Path::from_svg("  M 0 0\n L 10 0\tL10 10 Z ").unwrap();
    assert_eq!(path.len(), 4);
    assert_eq!(path.commands()[3], PathCommand::Close);
}

// ============================================================================
// Lyon conversion
// ============================================================================

#[test]
fn test_lyon_bounds_match_rounded_rect() {
    let mut builder = PathBuilder::new();
    builder.rounded_rect(Vec2::new(4.0, 6.0), Vec2::new(100.0, 40.0), 10.0);
    let bounds = builder.build().lyon_bounds().unwrap();

    assert!((bounds.x - 4.0).abs() < 0.05, "left edge: {}", bounds);
    assert!((bounds.y - 6.0).abs() < 0.05, "top edge: {}", bounds);
    assert!((bounds.width - 100.0).abs() < 0.1, "width: {}", bounds);
    assert!((bounds.height - 40.0).abs() < 0.1, "height: {}", bounds);
}

#[test]
fn test_segments_are_continuous() {
    let path = Path::from_svg("M0 0 L10 0 A2 2 0 0 1 12 2 L12 8 Z").unwrap();
    let segments: Vec<_> = path.segments().collect();

    assert_eq!(segments.len(), 4);
    for pair in segments.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
    }
    assert_eq!(segments[3].to, Vec2::ZERO);
}
