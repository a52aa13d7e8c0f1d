pub mod layout;
pub mod raster;

use self::layout::{compose, OrderSheet, Scene};
use crate::config::LayoutParams;
use thiserror::Error;
use tracing::{debug, info};

pub use self::raster::FontRasterizer;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No usable font: {0}")]
    FontUnavailable(String),

    #[error("Font data could not be parsed")]
    InvalidFont,

    #[error("Canvas has zero area")]
    EmptyCanvas,

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Encoded image plus its content type, ready to download or share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub width: u32,
    pub height: u32,
}

impl RenderedImage {
    pub const PNG: &'static str = "image/png";
}

/// Turns a composed scene into an encoded image.
pub trait SceneRasterizer {
    fn rasterize_png(&self, scene: &Scene) -> Result<RenderedImage, RenderError>;
}

/// Composes the sheet and hands it to a rasterizer. Never returns a blank or
/// truncated image: any rasterizer failure is surfaced as an error.
pub fn render_sheet<R: SceneRasterizer + ?Sized>(
    rasterizer: &R,
    sheet: &OrderSheet<'_>,
    params: &LayoutParams,
) -> Result<RenderedImage, RenderError> {
    let scene = compose(sheet, params);
    debug!(
        "Composed scene: {}x{}, {} ops",
        scene.width,
        scene.height,
        scene.ops.len()
    );
    let image = rasterizer.rasterize_png(&scene)?;
    info!(
        "Rendered prescription image ({} bytes, {})",
        image.bytes.len(),
        image.content_type
    );
    Ok(image)
}
