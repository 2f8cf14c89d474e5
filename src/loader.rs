use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use image::RgbaImage;

use crate::gesture::ItemKind;

/// A decode request, tagged with the slot and the generation that issued
/// it so stale completions can be recognized.
pub(crate) struct LoadRequest {
    pub kind: ItemKind,
    pub request_id: u64,
    pub path: PathBuf,
}

pub(crate) struct LoadResult {
    pub kind: ItemKind,
    pub request_id: u64,
    pub image: Arc<RgbaImage>,
}

/// Background accessory decoder: one worker thread fed over channels, so
/// the render path never blocks on disk or decode. Load failures are
/// logged and produce no result, leaving the slot's previous image in
/// place.
pub struct ImageLoader {
    sender: Option<Sender<LoadRequest>>,
    results: Receiver<LoadResult>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ImageLoader {
    pub fn new() -> Self {
        let (sender, requests) = channel::<LoadRequest>();
        let (result_sender, results) = channel::<LoadResult>();

        let handle = thread::Builder::new()
            .name("accessory-loader".to_string())
            .spawn(move || {
                while let Ok(request) = requests.recv() {
                    match image::open(&request.path) {
                        Ok(img) => {
                            let result = LoadResult {
                                kind: request.kind,
                                request_id: request.request_id,
                                image: Arc::new(img.to_rgba8()),
                            };
                            if result_sender.send(result).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            log::warn!("failed to load {:?}: {}", request.path, e);
                        }
                    }
                }
            })
            .expect("failed to spawn accessory loader thread");

        Self {
            sender: Some(sender),
            results,
            handle: Some(handle),
        }
    }

    pub(crate) fn request(&self, request: LoadRequest) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(request);
        }
    }

    /// Non-blocking poll for one finished load.
    pub(crate) fn try_recv(&self) -> Option<LoadResult> {
        self.results.try_recv().ok()
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ImageLoader {
    fn drop(&mut self) {
        // closing the request channel ends the worker loop
        self.sender = None;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
