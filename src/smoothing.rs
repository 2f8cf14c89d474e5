use crate::config::GapPolicy;
use crate::types::{LandmarkFrame, Point3D, MESH_POINTS, MESH_POINTS_REFINED};

/// Exponential moving average over an entire landmark set.
///
/// The first accepted frame seeds the state directly; every later frame is
/// blended per index and per component with weight `alpha` on the new
/// sample. The frame length is locked in by the first accepted frame
/// (detector contract: 468 or 478 points); frames that violate it are
/// skipped rather than crashing the render loop.
pub struct LandmarkSmoother {
    alpha: f32,
    gap_policy: GapPolicy,
    expected_len: Option<usize>,
    state: Option<Vec<Point3D>>,
}

impl LandmarkSmoother {
    pub fn new(alpha: f32, gap_policy: GapPolicy) -> Self {
        Self {
            alpha,
            gap_policy,
            expected_len: None,
            state: None,
        }
    }

    /// Feed one detection cycle's result. `None` means no face was
    /// detected this cycle; what happens to the running estimate then is
    /// the configured [`GapPolicy`]. Returns the current smoothed pose.
    pub fn update(&mut self, raw: Option<&LandmarkFrame>) -> Option<&[Point3D]> {
        match raw {
            None => {
                if self.gap_policy == GapPolicy::Clear {
                    self.state = None;
                }
            }
            Some(frame) => {
                if !self.accept_length(frame.len()) {
                    return self.state.as_deref();
                }
                match &mut self.state {
                    None => self.state = Some(frame.points.clone()),
                    Some(prev) => {
                        let a = self.alpha;
                        for (s, r) in prev.iter_mut().zip(&frame.points) {
                            s.x = s.x * (1.0 - a) + r.x * a;
                            s.y = s.y * (1.0 - a) + r.y * a;
                            s.z = s.z * (1.0 - a) + r.z * a;
                        }
                    }
                }
            }
        }
        self.state.as_deref()
    }

    /// The current smoothed pose, if any face has been seen (and the gap
    /// policy has not cleared it).
    pub fn pose(&self) -> Option<&[Point3D]> {
        self.state.as_deref()
    }

    // Validates the detector length contract. Loud in dev builds, a
    // logged skip in release.
    fn accept_length(&mut self, len: usize) -> bool {
        match self.expected_len {
            Some(expected) => {
                if len != expected {
                    debug_assert!(
                        false,
                        "landmark frame length {} violates detector contract of {}",
                        len, expected
                    );
                    log::warn!(
                        "skipping landmark frame: length {} != expected {}",
                        len,
                        expected
                    );
                    return false;
                }
                true
            }
            None => {
                if len != MESH_POINTS && len != MESH_POINTS_REFINED {
                    debug_assert!(
                        false,
                        "initial landmark frame length {} is neither {} nor {}",
                        len, MESH_POINTS, MESH_POINTS_REFINED
                    );
                    log::warn!("rejecting initial landmark frame of length {}", len);
                    return false;
                }
                self.expected_len = Some(len);
                true
            }
        }
    }
}
