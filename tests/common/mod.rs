#![allow(dead_code)]

use lensforge::prescription::{PrescriptionEntry, RawEyeEntry};
use lensforge::record::OrderRecord;
use lensforge::render::layout::Scene;
use lensforge::render::{RenderError, RenderedImage, SceneRasterizer};
use lensforge::store::{OrderId, OrderStore, StoreError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Barrier, Mutex};

pub fn valid_entry(sphere: &str) -> PrescriptionEntry {
    PrescriptionEntry::builder()
        .right_eye(
            RawEyeEntry::builder()
                .sphere(sphere)
                .cylinder("-1.00")
                .axis("90")
                .addition("+1.50")
                .build(),
        )
        .customer_name("Asha")
        .build()
}

/// Encodes the scene's text ops as the image bytes so tests can see what
/// was drawn.
#[derive(Default)]
pub struct StubRasterizer {
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl StubRasterizer {
    pub fn failing() -> Self {
        let stub = Self::default();
        stub.fail.store(true, Ordering::SeqCst);
        stub
    }
}

fn encode_texts(scene: &Scene) -> RenderedImage {
    let joined: Vec<&str> = scene.texts().map(|(t, _, _)| t).collect();
    RenderedImage {
        bytes: joined.join("|").into_bytes(),
        content_type: RenderedImage::PNG,
        width: scene.width,
        height: scene.height,
    }
}

impl SceneRasterizer for StubRasterizer {
    fn rasterize_png(&self, scene: &Scene) -> Result<RenderedImage, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(RenderError::FontUnavailable("stub".to_string()));
        }
        Ok(encode_texts(scene))
    }
}

/// Blocks its first call between two barriers.
pub struct GatedRasterizer {
    pub entered: Barrier,
    pub release: Barrier,
    first: AtomicBool,
}

impl Default for GatedRasterizer {
    fn default() -> Self {
        Self {
            entered: Barrier::new(2),
            release: Barrier::new(2),
            first: AtomicBool::new(true),
        }
    }
}

impl SceneRasterizer for GatedRasterizer {
    fn rasterize_png(&self, scene: &Scene) -> Result<RenderedImage, RenderError> {
        if self.first.swap(false, Ordering::SeqCst) {
            self.entered.wait();
            self.release.wait();
        }
        Ok(encode_texts(scene))
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub records: Mutex<Vec<OrderRecord>>,
}

impl MemoryStore {
    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl OrderStore for MemoryStore {
    fn insert(&self, record: &OrderRecord) -> Result<OrderId, StoreError> {
        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        Ok(OrderId(format!("order-{}", records.len())))
    }
}

pub struct FailingStore;

impl OrderStore for FailingStore {
    fn insert(&self, _record: &OrderRecord) -> Result<OrderId, StoreError> {
        Err(StoreError::Rejected("store unreachable".to_string()))
    }
}

/// Holds its first insert between two barriers.
pub struct GatedStore {
    pub inner: MemoryStore,
    pub entered: Barrier,
    pub release: Barrier,
    first: AtomicBool,
}

impl Default for GatedStore {
    fn default() -> Self {
        Self {
            inner: MemoryStore::default(),
            entered: Barrier::new(2),
            release: Barrier::new(2),
            first: AtomicBool::new(true),
        }
    }
}

impl OrderStore for GatedStore {
    fn insert(&self, record: &OrderRecord) -> Result<OrderId, StoreError> {
        if self.first.swap(false, Ordering::SeqCst) {
            self.entered.wait();
            self.release.wait();
        }
        self.inner.insert(record)
    }
}
