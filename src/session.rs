use image::{RgbImage, RgbaImage};

use crate::catalog::Catalog;
use crate::compositor;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::gesture::{GestureController, GestureDefaults};
use crate::selection::SelectionState;
use crate::smoothing::LandmarkSmoother;
use crate::types::{LandmarkFrame, Point2D};

/// One try-on session: the smoother, gesture state, selection, and
/// catalog behind a single object. All mutable state lives here rather
/// than at module scope, so independent sessions can coexist and tests
/// can drive one in isolation.
///
/// The session is single-threaded and poll-driven; the three event
/// sources (detection results, touch input, finished image loads)
/// interleave in whatever order the owning loop delivers them, and
/// rendering always reads the latest state.
pub struct TryOnSession {
    catalog: Catalog,
    smoother: LandmarkSmoother,
    gesture: GestureController,
    selection: SelectionState,
}

impl TryOnSession {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            catalog: config.catalog.clone(),
            smoother: LandmarkSmoother::new(
                config.defaults.smoothing_alpha,
                config.defaults.gap_policy,
            ),
            gesture: GestureController::new(GestureDefaults {
                earring_scale: config.defaults.earring_scale,
                necklace_scale: config.defaults.necklace_scale,
            }),
            selection: SelectionState::new(config.defaults.exclusive_slots),
        }
    }

    /// Feed one detection cycle's result (`None` = no face this cycle).
    pub fn observe_frame(&mut self, raw: Option<&LandmarkFrame>) {
        self.smoother.update(raw);
    }

    pub fn has_pose(&self) -> bool {
        self.smoother.pose().is_some()
    }

    /// Feed the current set of active touch contacts.
    pub fn touches(&mut self, touches: &[Point2D]) {
        let active = self.selection.active_kind();
        self.gesture.on_touches(touches, active);
    }

    /// Set the category filter for the type menu; selections stay put.
    pub fn select_category(&mut self, category: &str) {
        self.selection.select_category(category);
    }

    /// Switch accessory type; both selection slots empty immediately.
    pub fn select_type(&mut self, type_id: &str) {
        self.selection.select_type(type_id);
    }

    /// Request an accessory of the active type by catalog index
    /// (asynchronous; last write per slot wins).
    pub fn select_item(&mut self, index: u32) -> Result<()> {
        self.selection.set_item(&self.catalog, index)
    }

    /// Synchronous item load for offline tools; does not change the
    /// active type.
    pub fn load_item_now(&mut self, type_id: &str, index: u32) -> Result<()> {
        self.selection.set_item_blocking(&self.catalog, type_id, index)
    }

    /// Restore default offset and scales.
    pub fn reset_gesture(&mut self) {
        self.gesture.reset();
    }

    /// Redraw the live overlay surface from the latest pose, gesture, and
    /// selection. Finished image loads are committed first; nothing here
    /// blocks.
    pub fn render_overlay(&mut self, canvas: &mut RgbaImage) {
        self.selection.poll_loads();
        compositor::render_overlay(self.smoother.pose(), &self.gesture, &self.selection, canvas);
    }

    /// Composite a still of `frame` with the accessories placed exactly
    /// as the live overlay would place them. Rejected if no face pose is
    /// available.
    pub fn snapshot(&mut self, frame: &RgbImage) -> Result<RgbaImage> {
        self.selection.poll_loads();
        let pose = self.smoother.pose().ok_or(Error::NoFacePose)?;
        Ok(compositor::composite_snapshot(
            pose,
            &self.gesture,
            &self.selection,
            frame,
        ))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }
}
