use anyhow::Result;
use image::RgbaImage;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode};

/// Preview window showing the composited frame; also the demo's input
/// device (keys, mouse-as-touch, scroll-as-pinch).
pub struct PreviewWindow {
    window: minifb::Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl PreviewWindow {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = minifb::Window::new(
            title,
            width,
            height,
            minifb::WindowOptions {
                resize: true,
                ..minifb::WindowOptions::default()
            },
        )
        .map_err(|e| anyhow::anyhow!("Failed to create window: {}", e))?;

        window.limit_update_rate(Some(std::time::Duration::from_micros(16600))); // ~60 FPS

        Ok(Self {
            window,
            buffer: vec![0; width * height],
            width,
            height,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.window.is_key_down(key)
    }

    pub fn keys_pressed(&self) -> Vec<Key> {
        self.window.get_keys_pressed(KeyRepeat::No)
    }

    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    pub fn scroll_delta(&self) -> Option<(f32, f32)> {
        self.window.get_scroll_wheel()
    }

    /// Show an RGBA canvas. Alpha is ignored here; the canvas is already
    /// fully composited.
    pub fn update(&mut self, canvas: &RgbaImage) -> Result<()> {
        let (w, h) = canvas.dimensions();
        if self.width != w as usize || self.height != h as usize {
            self.width = w as usize;
            self.height = h as usize;
        }
        if self.buffer.len() != self.width * self.height {
            self.buffer.resize(self.width * self.height, 0);
        }

        for (i, chunk) in canvas.as_raw().chunks(4).enumerate() {
            if i >= self.buffer.len() {
                break;
            }
            let r = chunk[0] as u32;
            let g = chunk[1] as u32;
            let b = chunk[2] as u32;
            self.buffer[i] = (r << 16) | (g << 8) | b;
        }

        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| anyhow::anyhow!("Window update failed: {}", e))
    }
}
