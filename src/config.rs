//! Startup settings loaded from `~/.config/wshapes/config.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine.
//!
//! ```toml
//! [canvas]
//! size = 800
//! background = "#ffffff"
//!
//! [drawing]
//! color = "#ff0000"
//! tool = "select"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::{DEFAULT_BACKGROUND, DEFAULT_DRAW_COLOR, is_hex_color};
use crate::drawing::Tool;
use crate::session::{DEFAULT_CANVAS_SIZE, MAX_CANVAS_SIZE, MIN_CANVAS_SIZE, Session};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub drawing: DrawingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Side length of the square canvas in pixels (400-1200)
    #[serde(default = "default_canvas_size")]
    pub size: u32,

    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: default_canvas_size(),
            background: default_background(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Color given to newly drawn shapes
    #[serde(default = "default_draw_color")]
    pub color: String,

    /// Tool active at startup: select, box, arrow or vector
    #[serde(default = "default_tool")]
    pub tool: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            color: default_draw_color(),
            tool: default_tool(),
        }
    }
}

fn default_canvas_size() -> u32 {
    DEFAULT_CANVAS_SIZE
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

fn default_draw_color() -> String {
    DEFAULT_DRAW_COLOR.to_string()
}

fn default_tool() -> String {
    Tool::Select.name().to_string()
}

impl Config {
    /// Path of the user config file.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;
        Ok(config_dir.join("wshapes").join("config.toml"))
    }

    /// Loads the user config, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate_and_clamp();
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resets anything out of range so the session only ever sees valid values.
    fn validate_and_clamp(&mut self) {
        if !(MIN_CANVAS_SIZE..=MAX_CANVAS_SIZE).contains(&self.canvas.size) {
            log::warn!(
                "Invalid canvas size {}, clamping to {}-{} range",
                self.canvas.size,
                MIN_CANVAS_SIZE,
                MAX_CANVAS_SIZE
            );
            self.canvas.size = self.canvas.size.clamp(MIN_CANVAS_SIZE, MAX_CANVAS_SIZE);
        }

        if !is_hex_color(&self.canvas.background) {
            log::warn!(
                "Invalid background color {:?}, using {}",
                self.canvas.background,
                DEFAULT_BACKGROUND
            );
            self.canvas.background = default_background();
        }

        if !is_hex_color(&self.drawing.color) {
            log::warn!(
                "Invalid drawing color {:?}, using {}",
                self.drawing.color,
                DEFAULT_DRAW_COLOR
            );
            self.drawing.color = default_draw_color();
        }

        if let Err(err) = self.drawing.tool.parse::<Tool>() {
            log::warn!("{}, using select", err);
            self.drawing.tool = default_tool();
        }
    }

    /// A fresh session with these settings applied.
    pub fn new_session(&self) -> Session {
        let mut session = Session::new();
        session.set_canvas_size(self.canvas.size);
        session.set_background(&self.canvas.background);
        session.set_draw_color(&self.drawing.color);
        session.set_tool(self.drawing.tool.parse().unwrap_or_default());
        session
    }
}
