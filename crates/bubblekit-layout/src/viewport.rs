//! Viewport and anchor resolution.
//!
//! The layout never reaches into the window system directly. Everything it
//! needs about the screen, the keyboard, folds and the target element comes
//! through a [`ViewportContext`]. [`resolve_viewport`] turns those reports
//! into the usable [`Viewport`] for one pass.

use bubblekit_core::math::{great_not_equal, near_zero};
use bubblekit_core::{Rect, Size};
use glam::Vec2;

/// Margin between the bubble and the window edge, in vp.
const MARGIN_SPACE_VP: f32 = 6.0;
/// Extra edge spacing so the outline is not drawn on the window border.
const DRAW_EDGES_SPACE_VP: f32 = 1.0;
/// Margin used by tips bubbles on every side.
pub(crate) const TIPS_MARGIN_VP: f32 = 8.0;
/// Bottom margin kept above an open keyboard.
pub(crate) const KEYBOARD_SPACE_VP: f32 = 8.0;

/// Identifies the element a bubble points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

/// Caret of a text-input target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CaretInfo {
    /// Top of the caret in window coordinates.
    pub offset: Vec2,
    pub height: f32,
}

/// What the host knows about the target element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    /// Paint offset relative to the window.
    pub offset: Vec2,
    pub size: Size<f32>,
    /// Paint rect after transforms, when the target is transformed.
    pub transformed_rect: Option<Rect<f32>>,
    pub on_main_tree: bool,
    pub visible: bool,
    /// Set when the target is a text input with a caret.
    pub caret: Option<CaretInfo>,
}

impl TargetInfo {
    pub fn new(offset: Vec2, size: Size<f32>) -> Self {
        Self {
            offset,
            size,
            transformed_rect: None,
            on_main_tree: true,
            visible: true,
            caret: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SafeAreaInsets {
    pub top: f32,
    pub bottom: f32,
}

/// A band of the screen covered by a system bar, `start..end` along y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InsetBand {
    pub start: f32,
    pub end: f32,
}

impl InsetBand {
    pub fn len(&self) -> f32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KeyboardInsets {
    /// Keyboard height reported for the main window.
    pub inset: f32,
    /// Keyboard height reported for the bubble's own window.
    pub window_inset: f32,
}

/// Host window of a UI-extension component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UiExtensionHost {
    pub window_rect: Rect<f32>,
    /// Status bar band in screen coordinates.
    pub top_band: InsetBand,
    /// Navigation bar band in screen coordinates.
    pub bottom_band: InsetBand,
}

/// Fold state of a foldable device.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FoldState {
    /// Crease rect in display coordinates.
    pub crease: Rect<f32>,
    /// The device is half folded and content should avoid the crease.
    pub hovering: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayArea {
    /// Part of the display not covered by system decorations.
    pub available: Rect<f32>,
    /// The window's rect on the display.
    pub window_rect: Rect<f32>,
}

/// Reported when the bubble lives in a sub-window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubWindowState {
    /// Sub-window rect on the display.
    pub rect: Rect<f32>,
    /// Offset of the main window on the display.
    pub display_window_offset: Vec2,
    /// Display rect of the parent window, for sub-containers.
    pub parent_display_rect: Option<Rect<f32>>,
    /// Scaled rect of the parent window, for sub-containers.
    pub parent_scaled_rect: Option<Rect<f32>>,
}

/// Everything the layout reads from the window system.
///
/// Production code implements this over the real window manager; tests use
/// an in-memory fake. Most methods have neutral defaults.
pub trait ViewportContext {
    /// Pixels per vp.
    fn density(&self) -> f32 {
        1.0
    }

    /// Ideal size of the overlay root the bubble is laid out in.
    fn wrapper_size(&self) -> Size<f32>;

    /// Offset of the overlay root in the window, safe area included.
    fn wrapper_offset(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn window_height(&self) -> f32 {
        self.wrapper_size().height
    }

    fn device_height(&self) -> f32 {
        self.window_height()
    }

    fn safe_area(&self) -> SafeAreaInsets {
        SafeAreaInsets::default()
    }

    fn keyboard(&self) -> KeyboardInsets {
        KeyboardInsets::default()
    }

    /// Scene-board windows already exclude the bottom margin from keyboard
    /// insets.
    fn is_scene_board(&self) -> bool {
        false
    }

    fn ui_extension(&self) -> Option<UiExtensionHost> {
        None
    }

    fn fold(&self) -> Option<FoldState> {
        None
    }

    fn display_area(&self) -> Option<DisplayArea> {
        None
    }

    fn sub_window(&self) -> Option<SubWindowState> {
        None
    }

    /// Resolves a target, `None` when it is detached.
    fn target(&self, id: TargetId) -> Option<TargetInfo>;

    fn cursor_position(&self) -> Option<Vec2> {
        None
    }

    /// Global offset of the overlay layer.
    fn overlay_offset(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn host_window_rect(&self) -> Rect<f32> {
        Rect::ZERO
    }

    /// Width of `columns` grid columns.
    fn grid_max_width(&self, columns: u32) -> f32 {
        let _ = columns;
        self.wrapper_size().width
    }

    /// Hands hit-test rectangles to the sub-window manager.
    fn post_hot_areas(&self, areas: Vec<Rect<f32>>) {
        let _ = areas;
    }
}

/// Target position and size in the overlay's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorInfo {
    pub offset: Vec2,
    pub size: Size<f32>,
}

impl AnchorInfo {
    pub fn new(offset: Vec2, size: Size<f32>) -> Self {
        Self { offset, size }
    }

    pub fn rect(&self) -> Rect<f32> {
        Rect::from_origin_size(self.offset, self.size)
    }

    pub fn right(&self) -> f32 {
        self.offset.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.offset.y + self.size.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub start: f32,
    pub end: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Margins {
    fn non_negative(self) -> Self {
        Self {
            start: self.start.max(0.0),
            end: self.end.max(0.0),
            top: self.top.max(0.0),
            bottom: self.bottom.max(0.0),
        }
    }
}

/// The space a bubble may use during one pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub size: Size<f32>,
    pub margins: Margins,
    /// Half of a half-folded screen holding the target.
    pub hover_split: Option<Rect<f32>>,
}

impl Viewport {
    pub fn new(size: Size<f32>, margins: Margins) -> Self {
        Self {
            size,
            margins,
            hover_split: None,
        }
    }

    /// Viewport minus margins.
    pub fn usable_rect(&self) -> Rect<f32> {
        let m = &self.margins;
        Rect::new(
            m.start,
            m.top,
            self.size.width - m.start - m.end,
            self.size.height - m.top - m.bottom,
        )
    }

    fn span_width(&self) -> f32 {
        self.size.width - self.margins.end - self.margins.start
    }

    fn span_height(&self) -> f32 {
        self.size.height - self.margins.bottom - self.margins.top
    }

    /// Free space below the target, `space` away from it.
    pub fn bottom_rect(&self, anchor: &AnchorInfo, space: f32) -> Rect<f32> {
        let m = &self.margins;
        let below = anchor.offset.y + space + anchor.size.height;
        let (top, height) = match self.hover_split {
            Some(split) => (below.max(split.top()), (split.bottom() - below).min(self.span_height())),
            None => (below.max(m.top), (self.size.height - m.bottom - below).min(self.span_height())),
        };
        Rect::new(m.start, top, self.span_width(), height)
    }

    /// Free space above the target, `space` away from it.
    pub fn top_rect(&self, anchor: &AnchorInfo, space: f32) -> Rect<f32> {
        let m = &self.margins;
        let above = anchor.offset.y - space;
        let top = self.hover_split.map_or(m.top, |split| split.top());
        let height = (above - top).min(self.span_height());
        Rect::new(m.start, top, self.span_width(), height)
    }

    /// Free space right of the target, `space` away from it.
    pub fn right_rect(&self, anchor: &AnchorInfo, space: f32) -> Rect<f32> {
        let m = &self.margins;
        let beside = anchor.offset.x + space + anchor.size.width;
        let x = beside.max(m.start);
        let width = (self.size.width - beside - m.end).min(self.span_width());
        let (top, height) = self.vertical_band();
        Rect::new(x, top, width, height)
    }

    /// Free space left of the target, `space` away from it.
    pub fn left_rect(&self, anchor: &AnchorInfo, space: f32) -> Rect<f32> {
        let m = &self.margins;
        let beside = anchor.offset.x - space;
        let width = (beside - m.start).min(self.span_width());
        let (top, height) = self.vertical_band();
        Rect::new(m.start, top, width, height)
    }

    fn vertical_band(&self) -> (f32, f32) {
        match self.hover_split {
            Some(split) => (split.top(), split.height),
            None => (self.margins.top, self.span_height()),
        }
    }
}

/// Bubble properties that shape the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct ViewportRequest {
    pub tips: bool,
    pub follow_cursor: bool,
    pub avoid_keyboard: bool,
    pub in_sub_window: bool,
    pub expand_display: bool,
    pub hover_mode: bool,
    /// Target top in window coordinates, used to pick a fold half.
    pub anchor_y: Option<f32>,
}

/// Computes the usable viewport for this pass.
///
/// Margins come from the style margin and the safe area, then the keyboard
/// inset shrinks the height, a half-folded device restricts the viewport to
/// the target's half and an expanded display clips it to the available rect.
pub(crate) fn resolve_viewport<C: ViewportContext + ?Sized>(ctx: &C, request: &ViewportRequest) -> Viewport {
    let density = ctx.density();
    let safe = ctx.safe_area();
    let (edge, vertical) = if request.tips {
        (TIPS_MARGIN_VP * density, TIPS_MARGIN_VP * density)
    } else {
        ((MARGIN_SPACE_VP + DRAW_EDGES_SPACE_VP) * density, DRAW_EDGES_SPACE_VP * density)
    };

    let mut viewport = Viewport::new(
        ctx.wrapper_size(),
        Margins {
            start: edge,
            end: edge,
            top: safe.top + vertical,
            bottom: safe.bottom + vertical,
        },
    );

    if request.avoid_keyboard {
        apply_keyboard(ctx, request, &mut viewport);
    }
    if request.hover_mode {
        viewport.hover_split = hover_split(ctx, &viewport, request.anchor_y);
    }
    if request.expand_display {
        fit_available_rect(ctx, request, &mut viewport);
    }

    viewport.size = viewport.size.non_negative();
    viewport.margins = viewport.margins.non_negative();
    tracing::trace!(
        "Viewport {} margins {:?} split {:?}",
        viewport.size,
        viewport.margins,
        viewport.hover_split
    );
    viewport
}

fn apply_keyboard<C: ViewportContext + ?Sized>(ctx: &C, request: &ViewportRequest, viewport: &mut Viewport) {
    let density = ctx.density();
    let keyboard = ctx.keyboard();
    let keyboard_space = KEYBOARD_SPACE_VP * density;
    let scene_board = ctx.is_scene_board();
    let height = &mut viewport.size.height;
    let margins = &mut viewport.margins;

    if let Some(host) = ctx.ui_extension() {
        let window = host.window_rect;
        if request.in_sub_window {
            if great_not_equal(keyboard.inset, 0.0) {
                let covered = *height - window.bottom() + keyboard.inset;
                *height -= covered;
                margins.bottom = keyboard_space;
            } else if great_not_equal(keyboard.window_inset, 0.0) {
                margins.bottom = keyboard_space;
                *height -= keyboard.window_inset;
            }
        } else {
            let edge = DRAW_EDGES_SPACE_VP * density;
            margins.top = edge;
            if !host.top_band.is_empty() && window.top() < host.top_band.end {
                margins.top = host.top_band.end - window.top() + edge;
            }
            margins.bottom = edge;
            if great_not_equal(keyboard.inset, 0.0) {
                margins.bottom = keyboard_space;
                *height -= keyboard.inset;
            } else if !host.bottom_band.is_empty() && window.bottom() > host.bottom_band.start {
                margins.bottom = window.bottom() - host.bottom_band.start + edge;
            }
        }
        tracing::debug!("Keyboard inset {} applied through UI extension host", keyboard.inset);
        return;
    }

    if great_not_equal(keyboard.inset, 0.0) {
        if scene_board {
            *height -= keyboard.inset;
        } else {
            let cursor_gap = if request.follow_cursor { TIPS_MARGIN_VP * density } else { 0.0 };
            *height -= keyboard.inset + margins.bottom - cursor_gap;
        }
        margins.bottom = keyboard_space;
        tracing::debug!("Keyboard inset {} shrinks viewport to {}", keyboard.inset, *height);
    } else if request.in_sub_window && great_not_equal(keyboard.window_inset, 0.0) {
        if scene_board {
            *height -= keyboard.window_inset;
        } else {
            *height -= keyboard.window_inset + margins.bottom;
        }
        margins.bottom = keyboard_space;
        tracing::debug!("Sub-window keyboard inset {} shrinks viewport to {}", keyboard.window_inset, *height);
    }
}

fn hover_split<C: ViewportContext + ?Sized>(ctx: &C, viewport: &Viewport, anchor_y: Option<f32>) -> Option<Rect<f32>> {
    let fold = ctx.fold().filter(|fold| fold.hovering)?;
    let anchor_y = anchor_y?;
    let available_top = ctx.display_area().map_or(0.0, |area| area.available.top());
    let crease_top = fold.crease.top() - available_top;
    let crease_bottom = fold.crease.bottom() - available_top;
    let m = &viewport.margins;
    let width = viewport.size.width - m.end - m.start;

    if anchor_y < crease_top {
        Some(Rect::new(m.start, m.top, width, crease_top - m.top))
    } else if anchor_y > crease_bottom {
        Some(Rect::new(
            m.start,
            crease_bottom,
            width,
            viewport.size.height - crease_bottom - m.bottom,
        ))
    } else {
        None
    }
}

fn fit_available_rect<C: ViewportContext + ?Sized>(ctx: &C, request: &ViewportRequest, viewport: &mut Viewport) {
    let Some(area) = ctx.display_area() else {
        return;
    };
    let available = area.available;
    let tips_margin = if request.tips {
        TIPS_MARGIN_VP * ctx.density()
    } else {
        0.0
    };
    let margins = &mut viewport.margins;

    if request.in_sub_window {
        if ctx.is_scene_board() {
            return;
        }
        margins.top = margins.top.max(available.top() + tips_margin);
        margins.bottom = margins
            .bottom
            .max(viewport.size.height - available.bottom() + tips_margin);
    } else {
        let offset = ctx.wrapper_offset();
        let real = Rect::new(
            offset.x + area.window_rect.left(),
            offset.y + area.window_rect.top(),
            viewport.size.width,
            viewport.size.height,
        );
        let Some(common) = available.intersection(&real) else {
            tracing::warn!("Display area {} does not overlap the window {}", available, real);
            return;
        };
        viewport.size = Size::new(common.right() - real.left(), common.bottom() - real.top());
        margins.top = margins.top.max(common.top() - real.top());
        margins.start = margins.start.max(common.left() - real.left() + margins.start);
    }
}

/// Moves a cursor position from the parent window into a scaled
/// sub-container's coordinates.
pub(crate) fn fit_cursor_to_sub_container(position: Vec2, sub_window: &SubWindowState) -> Vec2 {
    let (Some(display), Some(scaled)) = (sub_window.parent_display_rect, sub_window.parent_scaled_rect) else {
        return position;
    };
    let mut position = position - display.origin();
    if !near_zero(display.width) && !near_zero(scaled.width) {
        position.x /= scaled.width / display.width;
    }
    if !near_zero(display.height) && !near_zero(scaled.height) {
        position.y /= scaled.height / display.height;
    }
    position
}

/// Whether the target is still worth re-reading this pass.
pub(crate) fn is_resolvable(info: &TargetInfo) -> bool {
    info.on_main_tree || info.visible
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Screen {
        size: Size<f32>,
        keyboard: KeyboardInsets,
        safe: SafeAreaInsets,
        fold: Option<FoldState>,
    }

    impl Screen {
        fn new(width: f32, height: f32) -> Self {
            Self {
                size: Size::new(width, height),
                keyboard: KeyboardInsets::default(),
                safe: SafeAreaInsets::default(),
                fold: None,
            }
        }
    }

    impl ViewportContext for Screen {
        fn wrapper_size(&self) -> Size<f32> {
            self.size
        }

        fn safe_area(&self) -> SafeAreaInsets {
            self.safe
        }

        fn keyboard(&self) -> KeyboardInsets {
            self.keyboard
        }

        fn fold(&self) -> Option<FoldState> {
            self.fold
        }

        fn target(&self, _id: TargetId) -> Option<TargetInfo> {
            None
        }
    }

    #[test]
    fn test_default_margins() {
        let mut screen = Screen::new(720.0, 1136.0);
        screen.safe = SafeAreaInsets { top: 30.0, bottom: 20.0 };
        let viewport = resolve_viewport(&screen, &ViewportRequest::default());
        assert_eq!(
            viewport.margins,
            Margins {
                start: 7.0,
                end: 7.0,
                top: 31.0,
                bottom: 21.0
            }
        );
        assert_eq!(viewport.usable_rect(), Rect::new(7.0, 31.0, 706.0, 1084.0));

        let tips = resolve_viewport(
            &screen,
            &ViewportRequest {
                tips: true,
                ..Default::default()
            },
        );
        assert_eq!(tips.margins.start, 8.0);
        assert_eq!(tips.margins.top, 38.0);
    }

    #[test]
    fn test_keyboard_shrinks_height() {
        let mut screen = Screen::new(720.0, 1136.0);
        screen.keyboard.inset = 500.0;
        let request = ViewportRequest {
            avoid_keyboard: true,
            ..Default::default()
        };
        let viewport = resolve_viewport(&screen, &request);
        assert_eq!(viewport.size.height, 1136.0 - 500.0 - 1.0);
        assert_eq!(viewport.margins.bottom, 8.0);

        // Ignored without keyboard avoidance.
        let viewport = resolve_viewport(&screen, &ViewportRequest::default());
        assert_eq!(viewport.size.height, 1136.0);
    }

    #[test]
    fn test_hover_split_picks_target_half() {
        let mut screen = Screen::new(800.0, 1000.0);
        screen.fold = Some(FoldState {
            crease: Rect::new(0.0, 480.0, 800.0, 40.0),
            hovering: true,
        });
        let mut request = ViewportRequest {
            hover_mode: true,
            anchor_y: Some(100.0),
            ..Default::default()
        };
        let upper = resolve_viewport(&screen, &request);
        assert_eq!(upper.hover_split, Some(Rect::new(7.0, 1.0, 786.0, 479.0)));

        request.anchor_y = Some(700.0);
        let lower = resolve_viewport(&screen, &request);
        assert_eq!(lower.hover_split, Some(Rect::new(7.0, 520.0, 786.0, 479.0)));

        request.anchor_y = Some(500.0);
        assert_eq!(resolve_viewport(&screen, &request).hover_split, None);
    }

    #[test]
    fn test_side_rects() {
        let viewport = Viewport::new(
            Size::new(400.0, 600.0),
            Margins {
                start: 10.0,
                end: 10.0,
                top: 20.0,
                bottom: 20.0,
            },
        );
        let anchor = AnchorInfo::new(Vec2::new(100.0, 200.0), Size::new(50.0, 40.0));
        assert_eq!(viewport.bottom_rect(&anchor, 8.0), Rect::new(10.0, 248.0, 380.0, 332.0));
        assert_eq!(viewport.top_rect(&anchor, 8.0), Rect::new(10.0, 20.0, 380.0, 172.0));
        assert_eq!(viewport.right_rect(&anchor, 8.0), Rect::new(158.0, 20.0, 232.0, 560.0));
        assert_eq!(viewport.left_rect(&anchor, 8.0), Rect::new(10.0, 20.0, 82.0, 560.0));
    }

    #[test]
    fn test_cursor_in_scaled_sub_container() {
        let sub_window = SubWindowState {
            parent_display_rect: Some(Rect::new(100.0, 50.0, 400.0, 300.0)),
            parent_scaled_rect: Some(Rect::new(0.0, 0.0, 200.0, 150.0)),
            ..Default::default()
        };
        let fitted = fit_cursor_to_sub_container(Vec2::new(200.0, 110.0), &sub_window);
        assert_eq!(fitted, Vec2::new(200.0, 120.0));
    }
}
