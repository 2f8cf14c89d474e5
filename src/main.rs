use clap::Parser;
use colored::*;
use image::{imageops, DynamicImage, ImageBuffer, Rgb, RgbaImage};
use minifb::Key;

use rusty_gems::args::Args;
use rusty_gems::camera::CameraSource;
use rusty_gems::config::AppConfig;
use rusty_gems::font;
use rusty_gems::gesture::ItemKind;
use rusty_gems::output::PreviewWindow;
use rusty_gems::pipeline::{LandmarkSource, SimulatedLandmarkSource};
use rusty_gems::session::TryOnSession;
use rusty_gems::types::Point2D;
use rusty_gems::Error;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list {
        let cameras = nokhwa::query(nokhwa::utils::ApiBackend::Auto)?;
        println!("Available Cameras:");
        println!("{:<5} | {:<30} | {:<10}", "Index", "Name", "Misc");
        println!("{}", "-".repeat(60));
        for cam in cameras {
            println!(
                "{:<5} | {:<30} | {:?}",
                cam.index(),
                cam.human_name(),
                cam.misc()
            );
        }
        return Ok(());
    }

    let config = AppConfig::load()?;

    // Frame source: webcam if available, synthetic frames otherwise.
    let mut camera = if args.simulate {
        None
    } else {
        match CameraSource::new(args.cam_index as usize) {
            Ok(cam) => Some(cam),
            Err(e) => {
                log::warn!("camera unavailable ({}); using synthetic frames", e);
                None
            }
        }
    };
    let (width, height) = camera
        .as_ref()
        .map(|c| (c.width(), c.height()))
        .unwrap_or((1280, 720));

    // The face-mesh detector is an external collaborator; this build runs
    // the simulated source so the full overlay path is exercised.
    let mut source = SimulatedLandmarkSource::new();
    println!("{}", format!("Landmark source: {}", source.name()).green());

    let mut window = PreviewWindow::new("Rusty Gems", width as usize, height as usize)?;
    let mut session = TryOnSession::new(&config);

    let type_ids: Vec<String> = session
        .catalog()
        .type_ids()
        .map(str::to_string)
        .collect();
    println!("Accessory types:");
    for (i, id) in type_ids.iter().enumerate() {
        println!("  [{}] {}", i + 1, id);
    }
    println!("Controls: [1-{}] type, arrows item, drag move, wheel scale, [R] reset, [S] snapshot, [C] clear", type_ids.len());

    let mut item_index: Option<u32> = None;
    let mut status: Option<(String, u32)> = None;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        // --- CAPTURE ---
        let mut frame = match &mut camera {
            Some(cam) => match cam.capture() {
                Ok(f) => f,
                Err(e) => {
                    log::warn!("frame capture failed: {}", e);
                    continue;
                }
            },
            None => synthetic_frame(width, height),
        };
        if config.defaults.mirror_mode {
            imageops::flip_horizontal_in_place(&mut frame);
        }

        // --- DETECTION ---
        let raw = source.detect(&frame)?;
        session.observe_frame(raw.as_ref());

        // --- INPUT: mouse as one-finger drag, wheel as pinch step ---
        let mouse = window.mouse_pos();
        if window.mouse_down() {
            if let Some((mx, my)) = mouse {
                session.touches(&[Point2D::new(mx, my)]);
            }
        } else {
            session.touches(&[]);
        }
        if let Some((_, wheel_y)) = window.scroll_delta() {
            if wheel_y.abs() > f32::EPSILON {
                let factor = (1.0 + wheel_y * 0.02).clamp(0.8, 1.25);
                let center = mouse
                    .map(|(mx, my)| Point2D::new(mx, my))
                    .unwrap_or(Point2D::new(width as f32 / 2.0, height as f32 / 2.0));
                pinch_step(&mut session, center, factor);
            }
        }

        for key in window.keys_pressed() {
            match key {
                Key::Key1 | Key::Key2 | Key::Key3 | Key::Key4 | Key::Key5 => {
                    let slot = match key {
                        Key::Key1 => 0,
                        Key::Key2 => 1,
                        Key::Key3 => 2,
                        Key::Key4 => 3,
                        _ => 4,
                    };
                    if let Some(id) = type_ids.get(slot) {
                        session.select_type(id);
                        item_index = None;
                        status = Some((id.to_uppercase().replace('_', " "), 90));
                    }
                }
                Key::Right | Key::Left => {
                    let type_id = session.selection().active_type().to_string();
                    if type_id.is_empty() {
                        status = Some(("PICK A TYPE FIRST".to_string(), 90));
                        continue;
                    }
                    let range = session.catalog().range(&type_id);
                    let next = match (key, item_index) {
                        (_, None) => range.start,
                        (Key::Right, Some(i)) => {
                            if i >= range.end {
                                range.start
                            } else {
                                i + 1
                            }
                        }
                        (_, Some(i)) => {
                            if i <= range.start {
                                range.end
                            } else {
                                i - 1
                            }
                        }
                    };
                    item_index = Some(next);
                    if let Err(e) = session.select_item(next) {
                        log::warn!("item selection failed: {}", e);
                    }
                }
                Key::E => {
                    session.select_category("earrings");
                    status = Some(("CATEGORY: EARRINGS".to_string(), 90));
                }
                Key::N => {
                    session.select_category("necklaces");
                    status = Some(("CATEGORY: NECKLACES".to_string(), 90));
                }
                Key::R => {
                    session.reset_gesture();
                    status = Some(("RESET".to_string(), 90));
                }
                Key::C => {
                    let type_id = session.selection().active_type().to_string();
                    session.select_type(&type_id);
                    item_index = None;
                    status = Some(("CLEARED".to_string(), 90));
                }
                Key::S => {
                    status = Some(take_snapshot(&mut session, &frame, &args.snapshot_dir));
                }
                _ => {}
            }
        }

        // --- DRAWING ---
        let mut canvas = DynamicImage::ImageRgb8(frame.clone()).to_rgba8();
        let mut overlay = RgbaImage::new(canvas.width(), canvas.height());
        session.render_overlay(&mut overlay);
        imageops::overlay(&mut canvas, &overlay, 0, 0);

        if config.ui.show_hud {
            draw_hud(&mut canvas, &session, &config, &type_ids, item_index, &status);
        }
        if let Some((_, ttl)) = &mut status {
            *ttl -= 1;
            if *ttl == 0 {
                status = None;
            }
        }

        window.update(&canvas)?;
    }

    Ok(())
}

/// Snapshot the current frame with the accessories composited in. Returns
/// the HUD status line.
fn take_snapshot(
    session: &mut TryOnSession,
    frame: &ImageBuffer<Rgb<u8>, Vec<u8>>,
    dir: &str,
) -> (String, u32) {
    match session.snapshot(frame) {
        Ok(composite) => {
            let filename = format!("jewelry-tryon-{}.png", chrono::Utc::now().timestamp_millis());
            let path = std::path::Path::new(dir).join(&filename);
            match composite.save(&path) {
                Ok(()) => {
                    log::info!("snapshot saved to {:?}", path);
                    // no share sheet on this platform; the file is the fallback
                    log::info!("sharing not supported here; snapshot kept as a file");
                    (format!("SAVED {}", filename.to_uppercase()), 180)
                }
                Err(e) => {
                    log::warn!("failed to save snapshot: {}", e);
                    ("SNAPSHOT SAVE FAILED".to_string(), 120)
                }
            }
        }
        Err(Error::NoFacePose) => ("FACE NOT DETECTED, TRY AGAIN".to_string(), 120),
        Err(e) => {
            log::warn!("snapshot failed: {}", e);
            ("SNAPSHOT FAILED".to_string(), 120)
        }
    }
}

/// Two synthesized touch contacts spreading by `factor`, run through the
/// real gesture state machine so wheel zoom behaves exactly like a pinch.
fn pinch_step(session: &mut TryOnSession, center: Point2D, factor: f32) {
    let a = Point2D::new(center.x - 50.0, center.y);
    let b = Point2D::new(center.x + 50.0, center.y);
    session.touches(&[a, b]);
    session.touches(&[a, Point2D::new(a.x + 100.0 * factor, center.y)]);
    session.touches(&[]);
}

fn synthetic_frame(width: u32, height: u32) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    ImageBuffer::from_fn(width, height, |_x, y| {
        let v = 30 + (y as f32 / height as f32 * 50.0) as u8;
        Rgb([v, v, v + 12])
    })
}

fn draw_hud(
    canvas: &mut RgbaImage,
    session: &TryOnSession,
    config: &AppConfig,
    type_ids: &[String],
    item_index: Option<u32>,
    status: &Option<(String, u32)>,
) {
    let scale = config.ui.hud_scale;
    let accent = parse_hex(&config.ui.hud_color_hex);
    let white = (255, 255, 255);
    let lh = font::line_height(scale);
    let mut y = 10;

    let category = session.selection().active_category();
    for (i, id) in type_ids.iter().enumerate() {
        let active = session.selection().active_type() == id;
        let in_category = category.is_empty() || id.contains(category);
        let color = if active {
            accent
        } else if in_category {
            white
        } else {
            (110, 110, 110)
        };
        let text = format!("[{}] {}", i + 1, id.to_uppercase().replace('_', " "));
        font::draw_text_line(canvas, 10, y, &text, color, scale);
        y += lh;
    }
    y += lh;

    let item_text = match item_index {
        Some(i) => format!("ITEM: {}", i),
        None => "ITEM: -".to_string(),
    };
    let gesture = session.gesture();
    let offset = gesture.offset();
    let lines = [
        item_text,
        format!("EARRING SCALE: {:.3}", gesture.scale_for(ItemKind::Earring)),
        format!("NECKLACE SCALE: {:.3}", gesture.scale_for(ItemKind::Necklace)),
        format!("OFFSET: {:.0}, {:.0}", offset.x, offset.y),
        format!("POSE: {}", if session.has_pose() { "ON" } else { "OFF" }),
    ];
    for line in &lines {
        font::draw_text_line(canvas, 10, y, line, white, scale);
        y += lh;
    }

    y += lh;
    font::draw_text_line(
        canvas,
        10,
        y,
        "[E/N] CATEGORY  [R] RESET  [S] SNAPSHOT  [C] CLEAR",
        white,
        scale,
    );
    y += lh;

    if let Some((message, _)) = status {
        font::draw_text_line(canvas, 10, y, message, accent, scale);
    }
}

fn parse_hex(hex: &str) -> (u8, u8, u8) {
    if hex.len() == 7 && hex.starts_with('#') {
        let r = u8::from_str_radix(&hex[1..3], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[3..5], 16).unwrap_or(215);
        let b = u8::from_str_radix(&hex[5..7], 16).unwrap_or(0);
        (r, g, b)
    } else {
        (255, 215, 0) // Default Gold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#FF0000"), (255, 0, 0));
        assert_eq!(parse_hex("#00FF00"), (0, 255, 0));
        assert_eq!(parse_hex("#FFD700"), (255, 215, 0));
        assert_eq!(parse_hex("invalid"), (255, 215, 0)); // Fallback
    }
}
