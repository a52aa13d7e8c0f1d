use crate::error::{LensForgeError, LfResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub layout: LayoutParams,
    #[command(flatten)]
    pub form: FormPolicy,
    #[command(flatten)]
    pub shop: ShopDefinitions,
}

/// Geometry of the prescription image. The 800x900 canvas and the font sizes
/// are relied on by printed layouts downstream.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    // === CANVAS ===
    #[arg(long, default_value_t = 800)]
    pub canvas_width: u32,
    #[arg(long, default_value_t = 900)]
    pub canvas_height: u32,
    #[arg(long, default_value_t = 80.0)]
    pub top_margin: f32,
    #[arg(long, default_value_t = 20.0)]
    pub bottom_margin: f32,

    // === RHYTHM ===
    #[arg(long, default_value_t = 30.0)]
    pub line_height: f32,
    #[arg(long, default_value_t = 2.5)]
    pub section_spacing: f32,
    #[arg(long, default_value_t = 2.0)]
    pub row_spacing: f32,
    #[arg(long, default_value_t = 1.5)]
    pub detail_spacing: f32,

    // === FONTS ===
    #[arg(long, default_value_t = 30.0)]
    pub base_font_size: f32,
    #[arg(long, default_value_t = 60.0)]
    pub urgent_font_size: f32,
    #[arg(long, default_value_t = 27.0)]
    pub detail_font_size: f32,
    #[arg(long, default_value_t = 20.0)]
    pub footer_font_size: f32,
    #[arg(long)]
    pub font_path: Option<String>,

    // === COLUMNS ===
    #[arg(long, default_value_t = 50.0)]
    pub label_x: f32,
    #[arg(long, default_value_t = 200.0)]
    pub spherical_x: f32,
    #[arg(long, default_value_t = 400.0)]
    pub cylindrical_x: f32,
    #[arg(long, default_value_t = 600.0)]
    pub axis_x: f32,
    #[arg(long, default_value_t = 300.0)]
    pub banner_x: f32,

    #[arg(long, default_value_t = 50)]
    pub description_wrap: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 900,
            top_margin: 80.0,
            bottom_margin: 20.0,
            line_height: 30.0,
            section_spacing: 2.5,
            row_spacing: 2.0,
            detail_spacing: 1.5,
            base_font_size: 30.0,
            urgent_font_size: 60.0,
            detail_font_size: 27.0,
            footer_font_size: 20.0,
            font_path: None,
            label_x: 50.0,
            spherical_x: 200.0,
            cylindrical_x: 400.0,
            axis_x: 600.0,
            banner_x: 300.0,
            description_wrap: 50,
        }
    }
}

/// Behaviour of the surrounding order form.
#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormPolicy {
    #[arg(long, default_value_t = false)]
    pub clear_axis_on_zero_cylinder: bool,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopDefinitions {
    #[arg(long, default_value = "sadar,46")]
    pub branches: String,
    #[arg(long, default_value = "sadar")]
    pub default_branch: String,
}

impl Default for ShopDefinitions {
    fn default() -> Self {
        Self {
            branches: "sadar,46".to_string(),
            default_branch: "sadar".to_string(),
        }
    }
}

impl ShopDefinitions {
    pub fn get_branches(&self) -> Vec<String> {
        self.branches
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Falls back to the default branch when the entry carries none.
    pub fn resolve_branch(&self, branch: &str) -> String {
        let trimmed = branch.trim();
        if trimmed.is_empty() {
            self.default_branch.clone()
        } else {
            trimmed.to_string()
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LensForgeError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> LfResult<()> {
        let layout = &self.layout;
        if layout.canvas_width == 0 || layout.canvas_height == 0 {
            return Err(LensForgeError::Config(
                "Canvas dimensions must be non-zero".to_string(),
            ));
        }
        if layout.description_wrap == 0 {
            return Err(LensForgeError::Config(
                "description_wrap must be at least 1".to_string(),
            ));
        }
        if self.shop.default_branch.trim().is_empty() {
            return Err(LensForgeError::Config(
                "default_branch must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Copies onto `self` only the values the user typed on the command line,
    /// so clap defaults never clobber values loaded from a file.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(layout.canvas_width);
        update_if_present!(layout.canvas_height);
        update_if_present!(layout.top_margin);
        update_if_present!(layout.bottom_margin);
        update_if_present!(layout.line_height);
        update_if_present!(layout.section_spacing);
        update_if_present!(layout.row_spacing);
        update_if_present!(layout.detail_spacing);
        update_if_present!(layout.base_font_size);
        update_if_present!(layout.urgent_font_size);
        update_if_present!(layout.detail_font_size);
        update_if_present!(layout.footer_font_size);
        update_if_present!(layout.font_path);
        update_if_present!(layout.label_x);
        update_if_present!(layout.spherical_x);
        update_if_present!(layout.cylindrical_x);
        update_if_present!(layout.axis_x);
        update_if_present!(layout.banner_x);
        update_if_present!(layout.description_wrap);

        update_if_present!(form.clear_axis_on_zero_cylinder);

        update_if_present!(shop.branches);
        update_if_present!(shop.default_branch);
    }
}
