use super::layout::{DrawOp, Scene};
use super::{RenderError, RenderedImage, SceneRasterizer};
use crate::config::LayoutParams;
use image::{ImageFormat, Rgb, RgbImage};
use rusttype::{point, Font, Scale};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Searched in order when no font is configured.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const RULE_THICKNESS: u32 = 2;

/// Draws scenes with a TrueType font and encodes them as PNG.
pub struct FontRasterizer {
    font: Font<'static>,
}

impl std::fmt::Debug for FontRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRasterizer").finish_non_exhaustive()
    }
}

impl FontRasterizer {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, RenderError> {
        let font = Font::try_from_vec(bytes).ok_or(RenderError::InvalidFont)?;
        Ok(Self { font })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|_| RenderError::FontUnavailable(path.display().to_string()))?;
        Self::from_bytes(bytes)
    }

    /// Uses `font_path` when set, otherwise the first system font found.
    pub fn from_config(params: &LayoutParams) -> Result<Self, RenderError> {
        if let Some(path) = &params.font_path {
            return Self::from_file(path);
        }
        let found = SYSTEM_FONT_CANDIDATES
            .iter()
            .find(|p| Path::new(p).exists())
            .ok_or_else(|| RenderError::FontUnavailable("no system font found".to_string()))?;
        debug!("Using system font {}", found);
        Self::from_file(found)
    }

    pub fn rasterize(&self, scene: &Scene) -> Result<RgbImage, RenderError> {
        if scene.width == 0 || scene.height == 0 {
            return Err(RenderError::EmptyCanvas);
        }
        let mut img = RgbImage::from_pixel(scene.width, scene.height, scene.background);

        for op in &scene.ops {
            match op {
                DrawOp::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => fill_rect(&mut img, *x, *y, *width, *height, *color),
                DrawOp::Text {
                    x,
                    y,
                    size,
                    text,
                    color,
                } => self.draw_text(&mut img, *x, *y, *size, text, *color),
                DrawOp::Rule { y, color } => {
                    let top = *y - RULE_THICKNESS as f32 / 2.0;
                    fill_rect(
                        &mut img,
                        0.0,
                        top,
                        scene.width as f32,
                        RULE_THICKNESS as f32,
                        *color,
                    );
                }
            }
        }
        Ok(img)
    }

    fn draw_text(&self, img: &mut RgbImage, x: f32, baseline: f32, size: f32, text: &str, color: Rgb<u8>) {
        let (w, h) = img.dimensions();
        let scale = Scale::uniform(size);
        for glyph in self.font.layout(text, scale, point(x, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px >= 0 && py >= 0 && (px as u32) < w && (py as u32) < h {
                    let dst = img.get_pixel_mut(px as u32, py as u32);
                    *dst = blend(*dst, color, coverage);
                }
            });
        }
    }
}

impl SceneRasterizer for FontRasterizer {
    fn rasterize_png(&self, scene: &Scene) -> Result<RenderedImage, RenderError> {
        let img = self.rasterize(scene)?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(RenderedImage {
            bytes,
            content_type: RenderedImage::PNG,
            width: scene.width,
            height: scene.height,
        })
    }
}

fn fill_rect(img: &mut RgbImage, x: f32, y: f32, width: f32, height: f32, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    let x0 = x.max(0.0).round() as u32;
    let y0 = y.max(0.0).round() as u32;
    let x1 = ((x + width).round().max(0.0) as u32).min(w);
    let y1 = ((y + height).round().max(0.0) as u32).min(h);
    for py in y0..y1 {
        for px in x0..x1 {
            img.put_pixel(px, py, color);
        }
    }
}

fn blend(dst: Rgb<u8>, src: Rgb<u8>, alpha: f32) -> Rgb<u8> {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |d: u8, s: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
    Rgb([mix(dst[0], src[0]), mix(dst[1], src[1]), mix(dst[2], src[2])])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints() {
        let white = Rgb([255, 255, 255]);
        let black = Rgb([0, 0, 0]);
        assert_eq!(blend(white, black, 1.0), black);
        assert_eq!(blend(white, black, 0.0), white);
    }

    #[test]
    fn fill_rect_clips_to_canvas() {
        let mut img = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        fill_rect(&mut img, -5.0, 8.0, 100.0, 100.0, Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(0, 9), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(9, 7), Rgb([255, 255, 255]));
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        let err = FontRasterizer::from_bytes(vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, RenderError::InvalidFont));
    }
}
