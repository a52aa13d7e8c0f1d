//! Top-to-bottom composition of the prescription sheet into a display list.
//!
//! The cursor advances by fixed multiples of the line height; the only reflow
//! is word-wrapping the lens description. Keeping this separate from the
//! rasterizer makes the geometry testable without a font.

use crate::config::LayoutParams;
use crate::display::DerivedDisplay;
use crate::prescription::PrescriptionEntry;
use image::Rgb;

pub const WHITE: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);
pub const BLACK: Rgb<u8> = Rgb([0x00, 0x00, 0x00]);
pub const ALERT_PINK: Rgb<u8> = Rgb([0xFF, 0xCC, 0xCC]);
pub const BANNER_RED: Rgb<u8> = Rgb([0xC6, 0x28, 0x28]);

pub const TITLE: &str = "Specs Power";
pub const URGENT_BANNER: &str = "Urgent!!!";
pub const ADDITION_HEADER: &str = "ADDITION";
pub const EMPTY_CELL: &str = "-";

/// Highlight box drawn behind an error cell, relative to the text baseline.
const CELL_PAD_X: f32 = 10.0;
const CELL_RISE: f32 = 25.0;
const CELL_WIDTH: f32 = 130.0;
const CELL_HEIGHT: f32 = 35.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb<u8>,
    },
    /// `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        size: f32,
        text: String,
        color: Rgb<u8>,
    },
    /// Full-width rule.
    Rule { y: f32, color: Rgb<u8> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
    pub ops: Vec<DrawOp>,
}

impl Scene {
    pub fn texts(&self) -> impl Iterator<Item = (&str, f32, f32)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
    }

    pub fn find_text(&self, needle: &str) -> Option<(f32, f32)> {
        self.texts()
            .find(|(t, _, _)| *t == needle)
            .map(|(_, x, y)| (x, y))
    }

    pub fn rules(&self) -> Vec<f32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rule { y, .. } => Some(*y),
                _ => None,
            })
            .collect()
    }

    pub fn highlights(&self) -> Vec<(f32, f32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }
}

/// Everything the sheet shows.
#[derive(Debug, Clone, Copy)]
pub struct OrderSheet<'a> {
    pub entry: &'a PrescriptionEntry,
    pub display: &'a DerivedDisplay,
    pub timestamp: &'a str,
}

struct Composer<'p> {
    params: &'p LayoutParams,
    ops: Vec<DrawOp>,
    y: f32,
}

impl<'p> Composer<'p> {
    fn text(&mut self, x: f32, size: f32, text: impl Into<String>) {
        self.ops.push(DrawOp::Text {
            x,
            y: self.y,
            size,
            text: text.into(),
            color: BLACK,
        });
    }

    fn advance(&mut self, lines: f32) {
        self.y += lines * self.params.line_height;
    }

    fn cell(&mut self, x: f32, text: &str, highlighted: bool) {
        if highlighted {
            self.ops.push(DrawOp::FillRect {
                x: x - CELL_PAD_X,
                y: self.y - CELL_RISE,
                width: CELL_WIDTH,
                height: CELL_HEIGHT,
                color: ALERT_PINK,
            });
        }
        let shown = if text.is_empty() { EMPTY_CELL } else { text };
        self.text(x, self.params.base_font_size, shown);
    }

    fn rule_at(&mut self, y: f32) {
        self.ops.push(DrawOp::Rule { y, color: BLACK });
    }
}

pub fn compose(sheet: &OrderSheet<'_>, params: &LayoutParams) -> Scene {
    let entry = sheet.entry;
    let display = sheet.display;
    let mut c = Composer {
        params,
        ops: Vec::new(),
        y: params.top_margin,
    };

    // 1. Urgency banner
    if entry.urgent {
        c.ops.push(DrawOp::FillRect {
            x: 0.0,
            y: c.y - params.urgent_font_size,
            width: params.canvas_width as f32,
            height: params.urgent_font_size * 1.3,
            color: ALERT_PINK,
        });
        c.ops.push(DrawOp::Text {
            x: params.banner_x,
            y: c.y,
            size: params.urgent_font_size,
            text: URGENT_BANNER.to_string(),
            color: BANNER_RED,
        });
        c.advance(params.section_spacing);
    }

    // 2. Title and branch
    c.text(params.label_x, params.base_font_size, TITLE);
    let branch = entry.branch.trim();
    if branch.is_empty() {
        c.advance(params.section_spacing);
    } else {
        c.advance(params.detail_spacing);
        c.text(
            params.label_x,
            params.detail_font_size,
            format!("Branch: {}", branch.to_uppercase()),
        );
        c.advance(params.row_spacing);
    }

    // 3. Column headers
    c.text(params.spherical_x, params.base_font_size, "Spherical");
    c.text(params.cylindrical_x, params.base_font_size, "Cylindrical");
    c.text(params.axis_x, params.base_font_size, "Axis");
    c.advance(params.row_spacing);

    // 4. Eye rows
    let mut drawn = 0;
    for row in display.rows_with_data() {
        c.text(params.label_x, params.base_font_size, row.label.clone());
        c.cell(params.spherical_x, &row.spherical, false);
        c.cell(params.cylindrical_x, &row.cylindrical, false);
        c.cell(params.axis_x, &row.axis, row.axis_error);
        c.advance(params.row_spacing);
        drawn += 1;
    }
    if drawn == 0 {
        c.advance(params.row_spacing);
    }

    // 5. Addition
    let addition = &display.addition;
    if addition.should_display {
        c.text(params.label_x, params.base_font_size, ADDITION_HEADER);
        if addition.is_combined() {
            c.text(
                params.cylindrical_x - 100.0,
                params.base_font_size,
                format!("{} (Both Eyes)", addition.right),
            );
        } else {
            c.text(
                params.spherical_x,
                params.base_font_size,
                format!("{} (R)", or_dash(&addition.right)),
            );
            c.text(
                params.cylindrical_x,
                params.base_font_size,
                format!("{} (L)", or_dash(&addition.left)),
            );
        }
        c.advance(params.row_spacing);
    }

    // 6. Separator; detail lines below run on a looser rhythm.
    c.y += params.line_height / 1.5;
    let detail_step = params.line_height * params.detail_spacing;
    c.rule_at(c.y - detail_step / 1.2);

    // 7. Lens description
    let lines = wrap_description(&entry.lens_description, params.description_wrap);
    if !lines.is_empty() {
        for line in lines {
            c.text(params.label_x, params.detail_font_size, line);
            c.y += detail_step;
        }
        c.rule_at(c.y - detail_step / 1.5);
        c.y += detail_step / 1.5;
    }

    // 8. Customer / supplier
    let customer = entry.customer_name.trim();
    if !customer.is_empty() {
        c.text(
            params.label_x,
            params.detail_font_size,
            format!("Customer Name: {}", customer),
        );
        c.y += detail_step;
    }
    let supplier = entry.supplier_name.trim();
    if !supplier.is_empty() {
        c.text(
            params.label_x,
            params.detail_font_size,
            format!("Supplier Name: {}", supplier),
        );
        c.y += detail_step;
    }

    // 9. Footer, pinned to the bottom edge
    c.y = params.canvas_height as f32 - params.bottom_margin;
    c.text(params.label_x, params.footer_font_size, sheet.timestamp);

    let background = if entry.urgent { ALERT_PINK } else { WHITE };
    Scene {
        width: params.canvas_width,
        height: params.canvas_height,
        background,
        ops: c.ops,
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        EMPTY_CELL
    } else {
        s
    }
}

/// Greedy word wrap on character count. A word longer than `max_chars` gets a
/// line of its own rather than being split.
pub fn wrap_description(description: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in description.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        if current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
