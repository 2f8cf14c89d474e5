#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    use crate::anchors::indices;
    use crate::config::AppConfig;
    use crate::error::Error;
    use crate::gesture::ItemKind;
    use crate::session::TryOnSession;
    use crate::types::{LandmarkFrame, Point2D, Point3D, MESH_POINTS};

    fn face_frame() -> LandmarkFrame {
        let mut points = vec![Point3D { x: 0.2, y: 0.2, z: 0.0 }; MESH_POINTS];
        points[indices::LEFT_EAR_EDGE] = Point3D { x: 0.35, y: 0.5, z: 0.0 };
        points[indices::RIGHT_EAR_EDGE] = Point3D { x: 0.65, y: 0.5, z: 0.0 };
        points[indices::CHIN] = Point3D { x: 0.5, y: 0.5, z: 0.0 };
        LandmarkFrame::new(points)
    }

    fn session_with_necklace() -> TryOnSession {
        let mut session = TryOnSession::new(&AppConfig::default());
        session.selection_mut().install(
            ItemKind::Necklace,
            Arc::new(RgbaImage::from_pixel(60, 60, Rgba([0, 200, 50, 255]))),
        );
        session
    }

    #[test]
    fn snapshot_without_pose_is_rejected() {
        let mut session = session_with_necklace();
        let frame = RgbImage::from_pixel(320, 240, Rgb([5, 5, 5]));
        let result = session.snapshot(&frame);
        assert!(matches!(result, Err(Error::NoFacePose)));
    }

    #[test]
    fn snapshot_survives_detection_gap_under_default_policy() {
        let mut session = session_with_necklace();
        session.observe_frame(Some(&face_frame()));
        session.observe_frame(None); // face lost this cycle
        let frame = RgbImage::from_pixel(320, 240, Rgb([5, 5, 5]));
        assert!(session.snapshot(&frame).is_ok());
    }

    #[test]
    fn drag_offset_accumulates_across_render_calls() {
        let mut session = session_with_necklace();
        session.observe_frame(Some(&face_frame()));
        let mut overlay = RgbaImage::new(320, 240);

        session.touches(&[Point2D::new(100.0, 100.0)]);
        session.render_overlay(&mut overlay);
        session.touches(&[Point2D::new(110.0, 100.0)]);
        session.touches(&[]);
        session.render_overlay(&mut overlay);
        session.touches(&[Point2D::new(50.0, 50.0)]);
        session.touches(&[Point2D::new(47.0, 55.0)]);
        session.touches(&[]);
        session.render_overlay(&mut overlay);

        assert_eq!(session.gesture().offset(), Point2D::new(7.0, 5.0));
    }

    #[test]
    fn live_overlay_and_snapshot_agree_through_the_session() {
        let mut session = session_with_necklace();
        session.observe_frame(Some(&face_frame()));
        session.touches(&[Point2D::new(10.0, 10.0)]);
        session.touches(&[Point2D::new(22.0, 3.0)]);
        session.touches(&[]);

        let mut overlay = RgbaImage::new(320, 240);
        session.render_overlay(&mut overlay);
        let frame = RgbImage::from_pixel(320, 240, Rgb([80, 80, 80]));
        let snapshot = session.snapshot(&frame).unwrap();

        let mut accessory_pixels = 0;
        for (x, y, pixel) in overlay.enumerate_pixels() {
            if pixel[3] == 255 {
                accessory_pixels += 1;
                assert_eq!(snapshot.get_pixel(x, y), pixel);
            }
        }
        assert!(accessory_pixels > 0);
    }

    #[test]
    fn selecting_a_type_clears_loaded_accessories() {
        let mut session = session_with_necklace();
        session.selection_mut().install(
            ItemKind::Earring,
            Arc::new(RgbaImage::from_pixel(40, 40, Rgba([220, 220, 220, 255]))),
        );
        session.observe_frame(Some(&face_frame()));
        session.select_type("diamond_earrings");

        let mut overlay = RgbaImage::new(320, 240);
        session.render_overlay(&mut overlay);
        assert!(overlay.pixels().all(|p| p[3] == 0));
        assert!(session.selection().earring().is_none());
        assert!(session.selection().necklace().is_none());
    }
}
