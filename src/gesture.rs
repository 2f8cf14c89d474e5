use crate::types::Point2D;

/// The two accessory slots. Pinch gestures scale one of them, picked by
/// the active type id at gesture time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Earring,
    Necklace,
}

impl ItemKind {
    /// Category routing: any type id containing "earring" adjusts the
    /// earrings, everything else adjusts the necklace.
    pub fn from_type_id(type_id: &str) -> Self {
        if type_id.contains("earring") {
            ItemKind::Earring
        } else {
            ItemKind::Necklace
        }
    }
}

/// Values restored by [`GestureController::reset`], as fractions of each
/// accessory image's natural pixel size.
#[derive(Debug, Clone, Copy)]
pub struct GestureDefaults {
    pub earring_scale: f32,
    pub necklace_scale: f32,
}

impl Default for GestureDefaults {
    fn default() -> Self {
        Self {
            earring_scale: 0.07,
            necklace_scale: 0.18,
        }
    }
}

/// Touch-count state machine producing a persistent drag offset and
/// per-category scale multipliers.
///
/// One touch drags: every move accumulates the delta since the last
/// contact position and re-anchors, so offsets survive across separate
/// drags. Two touches pinch: every move multiplies the active category's
/// scale by `new_distance / baseline` and re-records the baseline, so
/// scaling compounds per motion step. No inertia; effects are visible on
/// the next render.
pub struct GestureController {
    defaults: GestureDefaults,
    offset: Point2D,
    earring_scale: f32,
    necklace_scale: f32,
    drag_anchor: Option<Point2D>,
    pinch_baseline: Option<f32>,
}

impl GestureController {
    pub fn new(defaults: GestureDefaults) -> Self {
        Self {
            defaults,
            offset: Point2D::default(),
            earring_scale: defaults.earring_scale,
            necklace_scale: defaults.necklace_scale,
            drag_anchor: None,
            pinch_baseline: None,
        }
    }

    /// Feed the current set of active contacts. Call on every touch
    /// start/move/end with whatever contacts remain down; transitions are
    /// driven purely by the contact count.
    pub fn on_touches(&mut self, touches: &[Point2D], active: ItemKind) {
        match touches.len() {
            0 => {
                self.drag_anchor = None;
                self.pinch_baseline = None;
            }
            1 => {
                self.pinch_baseline = None;
                let touch = touches[0];
                if let Some(anchor) = self.drag_anchor {
                    self.offset.x += touch.x - anchor.x;
                    self.offset.y += touch.y - anchor.y;
                }
                self.drag_anchor = Some(touch);
            }
            _ => {
                self.drag_anchor = None;
                let distance = touches[0].distance(touches[1]);
                if let Some(baseline) = self.pinch_baseline {
                    if baseline > f32::EPSILON {
                        let factor = distance / baseline;
                        match active {
                            ItemKind::Earring => self.earring_scale *= factor,
                            ItemKind::Necklace => self.necklace_scale *= factor,
                        }
                    }
                }
                self.pinch_baseline = Some(distance);
            }
        }
    }

    /// Restore the default offset and scales, discarding all gesture
    /// history.
    pub fn reset(&mut self) {
        self.offset = Point2D::default();
        self.earring_scale = self.defaults.earring_scale;
        self.necklace_scale = self.defaults.necklace_scale;
        self.drag_anchor = None;
        self.pinch_baseline = None;
    }

    pub fn offset(&self) -> Point2D {
        self.offset
    }

    pub fn scale_for(&self, kind: ItemKind) -> f32 {
        match kind {
            ItemKind::Earring => self.earring_scale,
            ItemKind::Necklace => self.necklace_scale,
        }
    }
}
