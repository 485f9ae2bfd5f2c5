use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_dir")]
    pub dir: String,
    /// Pixel width of one panel; multi-panel figures scale horizontally.
    #[serde(default = "OutputConfig::default_width")]
    pub width: u32,
    #[serde(default = "OutputConfig::default_height")]
    pub height: u32,
}

impl OutputConfig {
    fn default_dir() -> String {
        "target/plots".to_string()
    }
    fn default_width() -> u32 {
        1024
    }
    fn default_height() -> u32 {
        768
    }

    pub fn panel_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            width: Self::default_width(),
            height: Self::default_height(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "WindowConfig::default_width")]
    pub width: f32,
    #[serde(default = "WindowConfig::default_height")]
    pub height: f32,
    /// Degrees of camera rotation per point dragged.
    #[serde(default = "WindowConfig::default_drag_sensitivity")]
    pub drag_sensitivity: f32,
}

impl WindowConfig {
    fn default_width() -> f32 {
        1100.0
    }
    fn default_height() -> f32 {
        800.0
    }
    fn default_drag_sensitivity() -> f32 {
        0.4
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            drag_sensitivity: Self::default_drag_sensitivity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlotsConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PlotsConfig {
    fn format_f32_compact(x: f32) -> String {
        let mut s = format!("{:.6}", x);
        while s.contains('.') && s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        s
    }

    /// Parse an existing config file.
    pub fn read(path: &Path) -> PlotResult<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|err| PlotError::Config(err.to_string()))
    }

    /// Defaults as a TOML template with every value commented out.
    pub fn commented_template(&self) -> PlotResult<String> {
        let text = toml::to_string_pretty(self).map_err(|err| PlotError::Config(err.to_string()))?;
        let mut commented = String::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                commented.push('\n');
            } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
                commented.push_str(line);
                commented.push('\n');
            } else {
                let mut out_line = line.to_string();
                if let Some((lhs, rhs)) = line.split_once('=') {
                    let rhs_trim = rhs.trim();
                    let has_decimal = rhs_trim.contains('.');
                    if (has_decimal || rhs_trim.contains('e') || rhs_trim.contains('E'))
                        && !rhs_trim.contains('"')
                        && rhs_trim != "true"
                        && rhs_trim != "false"
                    {
                        if let Ok(val) = rhs_trim.parse::<f32>() {
                            let mut formatted = Self::format_f32_compact(val);
                            if has_decimal && !formatted.contains('.') {
                                formatted.push_str(".0");
                            }
                            out_line = format!("{} = {}", lhs.trim(), formatted);
                        }
                    }
                }
                commented.push_str("# ");
                commented.push_str(&out_line);
                commented.push('\n');
            }
        }
        Ok(commented)
    }

    /// Read `path`, or write a commented default template there if it does
    /// not exist. Unreadable or invalid files fall back to defaults.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            return match Self::read(path_obj) {
                Ok(cfg) => cfg,
                Err(err) => {
                    eprintln!("Failed to load config {path}: {err}. Using defaults.");
                    Self::default()
                }
            };
        }

        let default_cfg = Self::default();
        match default_cfg.commented_template() {
            Ok(commented) => {
                if let Err(err) = fs::write(path_obj, commented) {
                    eprintln!("Failed to write default config to {path}: {err}");
                }
            }
            Err(err) => {
                eprintln!("Failed to serialize default config ({err}); continuing with defaults");
            }
        }
        default_cfg
    }
}
