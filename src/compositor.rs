use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, Rgba, RgbaImage};

use crate::anchors;
use crate::gesture::{GestureController, ItemKind};
use crate::selection::SelectionState;
use crate::types::{Point2D, Point3D};

/// Redraw the live overlay surface. An absent pose clears the surface and
/// draws nothing, so no stale accessories hang over a faceless frame.
pub fn render_overlay(
    pose: Option<&[Point3D]>,
    gesture: &GestureController,
    selection: &SelectionState,
    canvas: &mut RgbaImage,
) {
    clear(canvas);
    if let Some(points) = pose {
        draw_accessories(points, gesture, selection, canvas);
    }
}

/// Produce a still composite: the video freeze-frame with the accessories
/// drawn over it. Placement runs through the same code as the live
/// overlay, so identical pose/gesture/selection give pixel-identical
/// accessory positions on both paths.
pub fn composite_snapshot(
    pose: &[Point3D],
    gesture: &GestureController,
    selection: &SelectionState,
    frame: &RgbImage,
) -> RgbaImage {
    let mut canvas = DynamicImage::ImageRgb8(frame.clone()).to_rgba8();
    draw_accessories(pose, gesture, selection, &mut canvas);
    canvas
}

fn clear(canvas: &mut RgbaImage) {
    for pixel in canvas.pixels_mut() {
        *pixel = Rgba([0, 0, 0, 0]);
    }
}

fn draw_accessories(
    points: &[Point3D],
    gesture: &GestureController,
    selection: &SelectionState,
    canvas: &mut RgbaImage,
) {
    let (width, height) = canvas.dimensions();
    let anchors = anchors::resolve(points, width as f32, height as f32);
    let offset = gesture.offset();

    if let Some(img) = selection.earring() {
        let scale = gesture.scale_for(ItemKind::Earring);
        for anchor in [anchors.left_ear, anchors.right_ear] {
            let at = Point2D::new(anchor.x + offset.x, anchor.y + offset.y);
            draw_scaled(canvas, img, scale, at);
        }
    }

    if let Some(img) = selection.necklace() {
        let scale = gesture.scale_for(ItemKind::Necklace);
        let at = Point2D::new(anchors.neck.x + offset.x, anchors.neck.y + offset.y);
        draw_scaled(canvas, img, scale, at);
    }
}

// Draw `img` scaled by `scale`, centered horizontally on `at.x` with its
// top edge at `at.y`. Alpha-blended; off-canvas parts are clipped.
fn draw_scaled(canvas: &mut RgbaImage, img: &RgbaImage, scale: f32, at: Point2D) {
    let width = (img.width() as f32 * scale).round().max(1.0) as u32;
    let height = (img.height() as f32 * scale).round().max(1.0) as u32;
    let resized = imageops::resize(img, width, height, FilterType::Triangle);
    let x = (at.x - width as f32 / 2.0).round() as i64;
    let y = at.y.round() as i64;
    imageops::overlay(canvas, &resized, x, y);
}
