//! Drives the pipeline for one order form.
//!
//! The form owns the current raw entry; this session owns the view selection
//! and the last successfully generated artifact. Rows are always recomputed
//! from the entry.

use crate::config::Config;
use crate::display::{compute_display, DerivedDisplay};
use crate::error::{LensForgeError, LfResult};
use crate::prescription::{DisplayMode, PrescriptionEntry};
use crate::record::OrderRecord;
use crate::render::layout::OrderSheet;
use crate::render::{render_sheet, RenderedImage, SceneRasterizer};
use crate::store::{OrderId, OrderStore};
use crate::validator::validate;
use chrono::{Local, Utc};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

pub const FOOTER_TIME_FORMAT: &str = "%d %b %Y, %I:%M %p";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewSelection {
    pub mode: DisplayMode,
    pub transpose: bool,
}

/// The last image that rendered successfully and what it was made from.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedArtifact {
    pub entry: PrescriptionEntry,
    pub display: DerivedDisplay,
    pub image: RenderedImage,
}

pub struct OrderSession<R, S> {
    config: Config,
    rasterizer: R,
    store: S,
    view: Mutex<ViewSelection>,
    last_generated: Mutex<Option<GeneratedArtifact>>,
    render_epoch: AtomicU64,
    write_in_flight: AtomicBool,
}

/// Clears the in-flight flag however the write ends.
struct WriteGuard<'a>(&'a AtomicBool);

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<R, S> OrderSession<R, S> {
    pub fn new(config: Config, rasterizer: R, store: S) -> Self {
        Self {
            config,
            rasterizer,
            store,
            view: Mutex::new(ViewSelection::default()),
            last_generated: Mutex::new(None),
            render_epoch: AtomicU64::new(0),
            write_in_flight: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn view(&self) -> ViewSelection {
        *lock(&self.view)
    }

    pub fn set_view(&self, mode: DisplayMode, transpose: bool) {
        *lock(&self.view) = ViewSelection { mode, transpose };
    }

    pub fn last_generated(&self) -> Option<GeneratedArtifact> {
        lock(&self.last_generated).clone()
    }

    pub fn is_saving(&self) -> bool {
        self.write_in_flight.load(Ordering::Acquire)
    }

    /// Live preview under the current view. Never gated by validation.
    pub fn preview(&self, entry: &PrescriptionEntry) -> DerivedDisplay {
        let view = self.view();
        compute_display(entry, view.mode, view.transpose)
    }

    /// Switches the view and recomputes from the entry.
    pub fn switch_view(
        &self,
        entry: &PrescriptionEntry,
        mode: DisplayMode,
        transpose: bool,
    ) -> DerivedDisplay {
        self.set_view(mode, transpose);
        compute_display(entry, mode, transpose)
    }
}

impl<R: SceneRasterizer, S> OrderSession<R, S> {
    /// Validates, renders and installs the image. On any failure the previous
    /// image stays in place. A request overtaken by a newer one returns
    /// `RenderSuperseded` and installs nothing.
    pub fn generate(&self, entry: &PrescriptionEntry) -> LfResult<RenderedImage> {
        let report = validate(entry);
        if !report.is_valid() {
            return Err(LensForgeError::Validation(report));
        }

        let epoch = self.render_epoch.fetch_add(1, Ordering::AcqRel) + 1;
        let display = self.preview(entry);
        let timestamp = Local::now().format(FOOTER_TIME_FORMAT).to_string();
        let sheet = OrderSheet {
            entry,
            display: &display,
            timestamp: &timestamp,
        };

        let image = render_sheet(&self.rasterizer, &sheet, &self.config.layout).map_err(|e| {
            warn!("Render failed, keeping previous image: {}", e);
            LensForgeError::Render(e)
        })?;

        let mut slot = lock(&self.last_generated);
        if self.render_epoch.load(Ordering::Acquire) != epoch {
            info!("Render {} superseded by a newer request", epoch);
            return Err(LensForgeError::RenderSuperseded);
        }
        *slot = Some(GeneratedArtifact {
            entry: entry.clone(),
            display,
            image: image.clone(),
        });
        Ok(image)
    }
}

impl<R, S: OrderStore> OrderSession<R, S> {
    /// Builds the record and writes it once. `ordered_power` mirrors the last
    /// generated image when it was made from this same entry, otherwise the
    /// current view.
    pub fn save(&self, entry: &PrescriptionEntry) -> LfResult<OrderId> {
        let report = validate(entry);
        if !report.is_valid() {
            return Err(LensForgeError::Validation(report));
        }

        if self
            .write_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Save requested while a write is outstanding");
            return Err(LensForgeError::SaveInProgress);
        }
        let _guard = WriteGuard(&self.write_in_flight);

        let derived = match lock(&self.last_generated).as_ref() {
            Some(artifact) if artifact.entry == *entry => artifact.display.clone(),
            _ => self.preview(entry),
        };

        let mut record =
            OrderRecord::build(entry, &derived, &self.config.form, &self.config.shop);
        record.created_at = Some(Utc::now().to_rfc3339());

        match self.store.insert(&record) {
            Ok(id) => {
                info!(
                    "Order {} saved (branch '{}', mode {}, transposed: {})",
                    id, record.branch_name, derived.mode, derived.transpose
                );
                Ok(id)
            }
            Err(source) => {
                warn!("Order save failed: {}", source);
                Err(LensForgeError::SaveFailed {
                    source,
                    record: Box::new(record),
                })
            }
        }
    }
}
