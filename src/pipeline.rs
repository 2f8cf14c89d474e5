use anyhow::Result;
use image::{ImageBuffer, Rgb};

use crate::anchors::indices;
use crate::types::{LandmarkFrame, Point3D, MESH_POINTS};

/// The external face-mesh collaborator: one call per video frame, zero or
/// one landmark set back. How the landmarks are produced (which model,
/// which runtime) is not this crate's concern.
pub trait LandmarkSource {
    fn name(&self) -> String;
    fn detect(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<LandmarkFrame>>;
}

/// Stand-in source when no detector is wired up: synthesizes a gently
/// drifting head so the whole overlay path can be exercised end to end.
pub struct SimulatedLandmarkSource {
    frame_count: u32,
}

impl SimulatedLandmarkSource {
    pub fn new() -> Self {
        Self { frame_count: 0 }
    }
}

impl Default for SimulatedLandmarkSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkSource for SimulatedLandmarkSource {
    fn name(&self) -> String {
        "Simulated Face (no detector)".to_string()
    }

    fn detect(&mut self, _frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<LandmarkFrame>> {
        self.frame_count += 1;
        let t = (self.frame_count as f32) * 0.05;

        // Head center drifts in a small ellipse, face about a quarter of
        // the frame wide
        let cx = 0.5 + t.cos() * 0.03;
        let cy = 0.45 + t.sin() * 0.02;
        let half_width = 0.12;

        let mut points = vec![Point3D { x: cx, y: cy, z: 0.0 }; MESH_POINTS];
        points[indices::LEFT_EAR_EDGE] = Point3D {
            x: cx - half_width,
            y: cy + 0.02,
            z: 0.0,
        };
        points[indices::RIGHT_EAR_EDGE] = Point3D {
            x: cx + half_width,
            y: cy + 0.02,
            z: 0.0,
        };
        points[indices::CHIN] = Point3D {
            x: cx,
            y: cy + 0.16,
            z: 0.0,
        };

        Ok(Some(LandmarkFrame::new(points)))
    }
}
