use crate::types::{AnchorSet, Point2D, Point3D};

/// Face mesh landmark indices used for accessory attachment.
pub mod indices {
    /// Left face contour at the earlobe.
    pub const LEFT_EAR_EDGE: usize = 132;
    /// Right face contour at the earlobe.
    pub const RIGHT_EAR_EDGE: usize = 361;
    /// Chin center, bottom of the face contour.
    pub const CHIN: usize = 152;
}

// Empirically tuned pixel offsets from the tracked landmark to the point
// the accessory hangs from (earlobe vs. contour point, chin vs. neckline).
// Changing these changes where every accessory sits.
const LEFT_EAR_OFFSET: (f32, f32) = (-6.0, -16.0);
const RIGHT_EAR_OFFSET: (f32, f32) = (6.0, -16.0);
const NECK_OFFSET: (f32, f32) = (-8.0, 10.0);

/// Map a smoothed landmark set to pixel-space anchors for the given canvas
/// size. Pure: identical inputs always produce identical anchors.
///
/// Callers guarantee the set satisfies the detector length contract (the
/// smoother enforces it), so the attachment indices are always in bounds.
pub fn resolve(points: &[Point3D], canvas_w: f32, canvas_h: f32) -> AnchorSet {
    let project = |index: usize, offset: (f32, f32)| -> Point2D {
        Point2D {
            x: points[index].x * canvas_w + offset.0,
            y: points[index].y * canvas_h + offset.1,
        }
    };
    AnchorSet {
        left_ear: project(indices::LEFT_EAR_EDGE, LEFT_EAR_OFFSET),
        right_ear: project(indices::RIGHT_EAR_EDGE, RIGHT_EAR_OFFSET),
        neck: project(indices::CHIN, NECK_OFFSET),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MESH_POINTS;

    fn pose_with(index: usize, x: f32, y: f32) -> Vec<Point3D> {
        let mut points = vec![Point3D::default(); MESH_POINTS];
        points[index] = Point3D { x, y, z: 0.0 };
        points
    }

    #[test]
    fn left_ear_example_is_exact() {
        let points = pose_with(indices::LEFT_EAR_EDGE, 0.5, 0.5);
        let anchors = resolve(&points, 1280.0, 720.0);
        assert_eq!(anchors.left_ear, Point2D::new(634.0, 344.0));
    }

    #[test]
    fn right_ear_and_neck_offsets() {
        let mut points = vec![Point3D::default(); MESH_POINTS];
        points[indices::RIGHT_EAR_EDGE] = Point3D { x: 0.5, y: 0.5, z: 0.0 };
        points[indices::CHIN] = Point3D { x: 0.5, y: 0.5, z: 0.0 };
        let anchors = resolve(&points, 1280.0, 720.0);
        assert_eq!(anchors.right_ear, Point2D::new(646.0, 344.0));
        assert_eq!(anchors.neck, Point2D::new(632.0, 370.0));
    }

    #[test]
    fn resolution_is_pure() {
        let points = pose_with(indices::CHIN, 0.31, 0.77);
        let a = resolve(&points, 640.0, 480.0);
        let b = resolve(&points, 640.0, 480.0);
        assert_eq!(a, b);
    }
}
