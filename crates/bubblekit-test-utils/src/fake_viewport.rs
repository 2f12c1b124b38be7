//! In-memory viewport context.

use bubblekit_core::alloc::HashMap;
use bubblekit_core::{Rect, Size};
use bubblekit_layout::{
    CaretInfo, DisplayArea, FoldState, KeyboardInsets, SafeAreaInsets, SubWindowState, TargetId, TargetInfo,
    UiExtensionHost, ViewportContext,
};
use glam::Vec2;
use parking_lot::Mutex;

/// A window described entirely by plain fields.
///
/// Every report the layout can ask for is a public field, so tests either use
/// the `with_*` builders or poke fields directly. Hot areas posted by the
/// layout are recorded and can be read back with [`FakeViewport::hot_areas`].
#[derive(Debug, Default)]
pub struct FakeViewport {
    pub density: f32,
    pub wrapper_size: Size<f32>,
    pub wrapper_offset: Vec2,
    /// Defaults to the wrapper height when `None`.
    pub window_height: Option<f32>,
    pub device_height: Option<f32>,
    pub safe_area: SafeAreaInsets,
    pub keyboard: KeyboardInsets,
    pub scene_board: bool,
    pub ui_extension: Option<UiExtensionHost>,
    pub fold: Option<FoldState>,
    pub display_area: Option<DisplayArea>,
    pub sub_window: Option<SubWindowState>,
    pub cursor: Option<Vec2>,
    pub overlay_offset: Vec2,
    pub host_window_rect: Rect<f32>,
    /// Width of one grid column; `None` lets a bubble use the full width.
    pub column_width: Option<f32>,
    targets: HashMap<TargetId, TargetInfo>,
    hot_areas: Mutex<Vec<Vec<Rect<f32>>>>,
}

impl FakeViewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            density: 1.0,
            wrapper_size: Size::new(width, height),
            ..Default::default()
        }
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_target(mut self, id: TargetId, offset: Vec2, size: Size<f32>) -> Self {
        self.targets.insert(id, TargetInfo::new(offset, size));
        self
    }

    pub fn with_target_info(mut self, id: TargetId, info: TargetInfo) -> Self {
        self.targets.insert(id, info);
        self
    }

    pub fn with_caret(mut self, id: TargetId, offset: Vec2, height: f32) -> Self {
        if let Some(info) = self.targets.get_mut(&id) {
            info.caret = Some(CaretInfo { offset, height });
        }
        self
    }

    pub fn with_safe_area(mut self, top: f32, bottom: f32) -> Self {
        self.safe_area = SafeAreaInsets { top, bottom };
        self
    }

    pub fn with_keyboard(mut self, inset: f32) -> Self {
        self.keyboard.inset = inset;
        self
    }

    pub fn with_fold(mut self, crease: Rect<f32>) -> Self {
        self.fold = Some(FoldState { crease, hovering: true });
        self
    }

    pub fn with_sub_window(mut self, sub_window: SubWindowState) -> Self {
        self.sub_window = Some(sub_window);
        self
    }

    pub fn with_cursor(mut self, position: Vec2) -> Self {
        self.cursor = Some(position);
        self
    }

    pub fn with_overlay_offset(mut self, offset: Vec2) -> Self {
        self.overlay_offset = offset;
        self
    }

    pub fn with_host_window_rect(mut self, rect: Rect<f32>) -> Self {
        self.host_window_rect = rect;
        self
    }

    /// Replaces a target between passes.
    pub fn set_target(&mut self, id: TargetId, info: TargetInfo) {
        self.targets.insert(id, info);
    }

    pub fn remove_target(&mut self, id: TargetId) -> Option<TargetInfo> {
        self.targets.remove(&id)
    }

    pub fn target_mut(&mut self, id: TargetId) -> Option<&mut TargetInfo> {
        self.targets.get_mut(&id)
    }

    /// Every batch of hot areas posted so far, oldest first.
    pub fn hot_areas(&self) -> Vec<Vec<Rect<f32>>> {
        self.hot_areas.lock().clone()
    }

    pub fn last_hot_areas(&self) -> Option<Vec<Rect<f32>>> {
        self.hot_areas.lock().last().cloned()
    }
}

impl ViewportContext for FakeViewport {
    fn density(&self) -> f32 {
        self.density
    }

    fn wrapper_size(&self) -> Size<f32> {
        self.wrapper_size
    }

    fn wrapper_offset(&self) -> Vec2 {
        self.wrapper_offset
    }

    fn window_height(&self) -> f32 {
        self.window_height.unwrap_or(self.wrapper_size.height)
    }

    fn device_height(&self) -> f32 {
        self.device_height.unwrap_or_else(|| self.window_height())
    }

    fn safe_area(&self) -> SafeAreaInsets {
        self.safe_area
    }

    fn keyboard(&self) -> KeyboardInsets {
        self.keyboard
    }

    fn is_scene_board(&self) -> bool {
        self.scene_board
    }

    fn ui_extension(&self) -> Option<UiExtensionHost> {
        self.ui_extension
    }

    fn fold(&self) -> Option<FoldState> {
        self.fold
    }

    fn display_area(&self) -> Option<DisplayArea> {
        self.display_area
    }

    fn sub_window(&self) -> Option<SubWindowState> {
        self.sub_window
    }

    fn target(&self, id: TargetId) -> Option<TargetInfo> {
        self.targets.get(&id).copied()
    }

    fn cursor_position(&self) -> Option<Vec2> {
        self.cursor
    }

    fn overlay_offset(&self) -> Vec2 {
        self.overlay_offset
    }

    fn host_window_rect(&self) -> Rect<f32> {
        self.host_window_rect
    }

    fn grid_max_width(&self, columns: u32) -> f32 {
        self.column_width
            .map_or(self.wrapper_size.width, |width| width * columns as f32)
    }

    fn post_hot_areas(&self, areas: Vec<Rect<f32>>) {
        self.hot_areas.lock().push(areas);
    }
}
