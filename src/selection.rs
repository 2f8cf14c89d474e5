use std::sync::Arc;

use image::RgbaImage;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::gesture::ItemKind;
use crate::loader::{ImageLoader, LoadRequest, LoadResult};

/// Which accessory images are active, and for which type. Owns the loaded
/// bitmaps; the compositor borrows them read-only.
///
/// Loads are asynchronous and tagged with a per-slot generation counter:
/// a completion is committed only if no newer request for that slot has
/// been issued since (last write wins), and a failed load leaves the
/// slot's previous image untouched.
pub struct SelectionState {
    earring: Option<Arc<RgbaImage>>,
    necklace: Option<Arc<RgbaImage>>,
    active_category: String,
    active_type: String,
    exclusive_slots: bool,
    earring_request: u64,
    necklace_request: u64,
    loader: ImageLoader,
}

impl SelectionState {
    pub fn new(exclusive_slots: bool) -> Self {
        Self {
            earring: None,
            necklace: None,
            active_category: String::new(),
            active_type: String::new(),
            exclusive_slots,
            earring_request: 0,
            necklace_request: 0,
            loader: ImageLoader::new(),
        }
    }

    pub fn active_type(&self) -> &str {
        &self.active_type
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    /// Set the category filter ("earrings", "necklaces") used by UI
    /// adapters to narrow the type menu. Only a filter: current
    /// selections stay put until the *type* changes.
    pub fn select_category(&mut self, category: &str) {
        self.active_category = category.to_string();
    }

    /// The category a pinch adjusts right now.
    pub fn active_kind(&self) -> ItemKind {
        ItemKind::from_type_id(&self.active_type)
    }

    /// Switch the accessory type. Both slots empty immediately — before
    /// any pending load resolves — and in-flight loads for the old type
    /// are superseded.
    pub fn select_type(&mut self, type_id: &str) {
        self.active_type = type_id.to_string();
        self.earring = None;
        self.necklace = None;
        self.earring_request += 1;
        self.necklace_request += 1;
    }

    /// Request an accessory of the active type by catalog index. The load
    /// runs off the render path; a later call for the same slot
    /// supersedes this one even if this one finishes first.
    pub fn set_item(&mut self, catalog: &Catalog, index: u32) -> Result<()> {
        let kind = self.active_kind();
        let path = catalog.asset_path(&self.active_type, index)?;
        let request_id = self.bump_generation(kind);
        self.loader.request(LoadRequest {
            kind,
            request_id,
            path,
        });
        Ok(())
    }

    /// Load an accessory synchronously, without touching the active type.
    /// For offline tools and tests; the interactive path uses
    /// [`SelectionState::set_item`].
    pub fn set_item_blocking(&mut self, catalog: &Catalog, type_id: &str, index: u32) -> Result<()> {
        let path = catalog.asset_path(type_id, index)?;
        let img = image::open(&path)?.to_rgba8();
        let kind = ItemKind::from_type_id(type_id);
        self.bump_generation(kind);
        self.install(kind, Arc::new(img));
        Ok(())
    }

    /// Drain finished loads, committing those whose generation still
    /// matches. Non-blocking; called from the event loop, never mid-draw.
    /// Returns how many selections changed.
    pub fn poll_loads(&mut self) -> usize {
        let mut applied = 0;
        while let Some(result) = self.loader.try_recv() {
            if self.apply(result) {
                applied += 1;
            }
        }
        applied
    }

    fn apply(&mut self, result: LoadResult) -> bool {
        let current = match result.kind {
            ItemKind::Earring => self.earring_request,
            ItemKind::Necklace => self.necklace_request,
        };
        if result.request_id != current {
            log::debug!(
                "discarding superseded {:?} load (request {} < {})",
                result.kind,
                result.request_id,
                current
            );
            return false;
        }
        self.install(result.kind, result.image);
        true
    }

    pub(crate) fn install(&mut self, kind: ItemKind, image: Arc<RgbaImage>) {
        match kind {
            ItemKind::Earring => {
                if self.exclusive_slots {
                    self.necklace = None;
                }
                self.earring = Some(image);
            }
            ItemKind::Necklace => {
                if self.exclusive_slots {
                    self.earring = None;
                }
                self.necklace = Some(image);
            }
        }
    }

    fn bump_generation(&mut self, kind: ItemKind) -> u64 {
        match kind {
            ItemKind::Earring => {
                self.earring_request += 1;
                self.earring_request
            }
            ItemKind::Necklace => {
                self.necklace_request += 1;
                self.necklace_request
            }
        }
    }

    pub fn earring(&self) -> Option<&RgbaImage> {
        self.earring.as_deref()
    }

    pub fn necklace(&self) -> Option<&RgbaImage> {
        self.necklace.as_deref()
    }
}
