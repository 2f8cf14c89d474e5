//! # rusty-gems
//!
//! Webcam jewelry try-on: a landmark-driven accessory overlay compositor.
//!
//! An external face-mesh detector (out of scope here, see [`pipeline`])
//! delivers one optional landmark set per video frame. The pipeline:
//!
//! 1. [`smoothing`] stabilizes the raw landmarks with an exponential
//!    moving average and handles detection gaps.
//! 2. [`anchors`] maps the stabilized set to pixel-space attachment points
//!    (left ear, right ear, neck).
//! 3. [`gesture`] accumulates drag offsets and per-category pinch scales
//!    from touch input.
//! 4. [`compositor`] draws the selected accessory images at the anchors,
//!    both for the live overlay and for snapshot stills.
//! 5. [`selection`] tracks which accessories are active and loads their
//!    bitmaps off the render path, with last-write-wins supersession.
//!
//! [`session::TryOnSession`] ties the pieces together; `src/main.rs` is an
//! interactive demo over a webcam (or a simulated face source).

pub mod anchors;
pub mod args;
pub mod camera;
pub mod catalog;
pub mod compositor;
pub mod config;
pub mod error;
pub mod font;
pub mod gesture;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod selection;
pub mod session;
pub mod smoothing;
pub mod types;

mod session_tests;

pub use error::{Error, Result};
pub use session::TryOnSession;
