use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Camera index (default 0)
    #[arg(short, long, default_value_t = 0)]
    pub cam_index: u32,

    /// Run without a webcam: synthetic frames + simulated landmarks
    #[arg(long, default_value_t = false)]
    pub simulate: bool,

    /// List available cameras
    #[arg(long)]
    pub list: bool,

    /// Directory snapshots are saved into
    #[arg(long, default_value = ".")]
    pub snapshot_dir: String,
}
