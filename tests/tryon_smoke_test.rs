use std::fs;
use std::path::PathBuf;

use image::{Rgb, RgbImage, Rgba, RgbaImage};

use rusty_gems::config::AppConfig;
use rusty_gems::pipeline::{LandmarkSource, SimulatedLandmarkSource};
use rusty_gems::session::TryOnSession;

fn asset_root(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rusty-gems-{}-{}", tag, std::process::id()))
}

fn write_sprites(root: &PathBuf) {
    let sprite = RgbaImage::from_pixel(80, 80, Rgba([200, 160, 40, 255]));
    for type_id in ["gold_earrings", "gold_necklaces"] {
        fs::create_dir_all(root.join(type_id)).unwrap();
        sprite
            .save(root.join(type_id).join(format!("{}1.png", type_id)))
            .unwrap();
    }
}

#[test]
fn end_to_end_simulated_try_on() {
    let root = asset_root("e2e");
    write_sprites(&root);

    let mut config = AppConfig::default();
    config.catalog.asset_root = root.clone();

    let mut session = TryOnSession::new(&config);
    let mut source = SimulatedLandmarkSource::new();
    let frame = RgbImage::from_pixel(640, 480, Rgb([10, 10, 10]));

    // a few detection cycles to settle the smoother
    for _ in 0..5 {
        let raw = source.detect(&frame).unwrap();
        session.observe_frame(raw.as_ref());
    }

    session.load_item_now("gold_earrings", 1).unwrap();
    session.load_item_now("gold_necklaces", 1).unwrap();

    let mut overlay = RgbaImage::new(640, 480);
    session.render_overlay(&mut overlay);
    assert!(overlay.pixels().any(|p| p[3] > 0), "accessories not rendered");

    let snapshot = session.snapshot(&frame).unwrap();
    assert_eq!(snapshot.dimensions(), (640, 480));
    assert!(
        snapshot.pixels().any(|p| p.0[..3] != [10, 10, 10]),
        "accessories not composited"
    );

    fs::remove_dir_all(&root).ok();
}

#[test]
fn async_item_load_commits_without_blocking_render() {
    let root = asset_root("async");
    write_sprites(&root);

    let mut config = AppConfig::default();
    config.catalog.asset_root = root.clone();

    let mut session = TryOnSession::new(&config);
    let mut source = SimulatedLandmarkSource::new();
    let frame = RgbImage::from_pixel(640, 480, Rgb([10, 10, 10]));
    let raw = source.detect(&frame).unwrap();
    session.observe_frame(raw.as_ref());

    session.select_type("gold_earrings");
    session.select_item(1).unwrap();

    // rendering never blocks; the load lands on a later poll
    let mut overlay = RgbaImage::new(640, 480);
    let mut drawn = false;
    for _ in 0..200 {
        session.render_overlay(&mut overlay);
        if overlay.pixels().any(|p| p[3] > 0) {
            drawn = true;
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }
    assert!(drawn, "async load never committed");

    fs::remove_dir_all(&root).ok();
}

#[test]
fn failed_load_keeps_previous_selection() {
    let root = asset_root("fail");
    write_sprites(&root);

    let mut config = AppConfig::default();
    config.catalog.asset_root = root.clone();

    let mut session = TryOnSession::new(&config);
    session.select_type("gold_earrings");
    session.load_item_now("gold_earrings", 1).unwrap();
    assert!(session.selection().earring().is_some());

    // index 2 has no file on disk; the load fails and the slot keeps
    // its image
    session.select_item(2).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(200));
    let mut overlay = RgbaImage::new(640, 480);
    session.render_overlay(&mut overlay); // drains any results
    assert!(session.selection().earring().is_some());

    fs::remove_dir_all(&root).ok();
}
