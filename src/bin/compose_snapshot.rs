use anyhow::{Context, Result};
use clap::Parser;
use image::ImageReader;

use rusty_gems::config::AppConfig;
use rusty_gems::session::TryOnSession;
use rusty_gems::types::LandmarkFrame;

/// Composite accessories onto a photo using a saved landmark frame.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input photo
    #[arg(long)]
    photo: String,

    /// Landmark frame JSON: {"points": [{"x":..,"y":..,"z":..}, ...]}
    #[arg(long)]
    landmarks: String,

    /// Earring selection, e.g. gold_earrings:3
    #[arg(long)]
    earring: Option<String>,

    /// Necklace selection, e.g. gold_necklaces:1
    #[arg(long)]
    necklace: Option<String>,

    /// Output path
    #[arg(long, default_value = "composite.png")]
    out: String,
}

fn parse_selection(spec: &str) -> Result<(String, u32)> {
    let (type_id, index) = spec
        .split_once(':')
        .with_context(|| format!("expected TYPE:INDEX, got {:?}", spec))?;
    Ok((type_id.to_string(), index.parse()?))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = AppConfig::load()?;

    let photo = ImageReader::open(&args.photo)?.decode()?.to_rgb8();
    let json = std::fs::read_to_string(&args.landmarks)?;
    let frame: LandmarkFrame = serde_json::from_str(&json)?;
    frame.validate()?;

    let mut session = TryOnSession::new(&config);
    session.observe_frame(Some(&frame));

    if let Some(spec) = &args.earring {
        let (type_id, index) = parse_selection(spec)?;
        session.load_item_now(&type_id, index)?;
    }
    if let Some(spec) = &args.necklace {
        let (type_id, index) = parse_selection(spec)?;
        session.load_item_now(&type_id, index)?;
    }

    let composite = session.snapshot(&photo)?;
    composite.save(&args.out)?;
    println!(
        "Wrote {} ({}x{})",
        args.out,
        composite.width(),
        composite.height()
    );
    Ok(())
}
