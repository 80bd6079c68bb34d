use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application configuration stored as TOML.
///
/// Every field has a default, so an empty file (or no file at all) yields
/// the stock Cred Management+ layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory receiving `icon.png` and `icon.ico`.
    pub output_dir: PathBuf,
    /// Source logo for the `logo` strategy.
    pub logo_path: PathBuf,
    /// Document pointing users at the manual icon procedure.
    pub manual_guide: PathBuf,
    pub procedural: ProceduralStyle,
    pub installer: InstallerConfig,
}

/// Look of the procedurally drawn icon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProceduralStyle {
    pub background: String,
    pub circle_fill: String,
    pub circle_outline: String,
    pub outline_width: u32,
    /// Distance between the circle and each canvas edge.
    pub circle_margin: u32,
    pub label: String,
    pub label_color: String,
    /// Font file name or path.
    pub font: String,
    /// Font size in pixels per em.
    pub font_size: f32,
    /// Upward shift of the centered label.
    pub label_lift: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Shown in the build banner.
    pub product_name: String,
    pub project_dir: PathBuf,
    pub build_command: String,
    pub package_command: String,
    pub release_dir: PathBuf,
    pub open_release_dir: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("desktop/assets"),
            logo_path: PathBuf::from("desktop/assets/logo.png"),
            manual_guide: PathBuf::from("desktop/assets/README.md"),
            procedural: ProceduralStyle::default(),
            installer: InstallerConfig::default(),
        }
    }
}

impl Default for ProceduralStyle {
    fn default() -> Self {
        Self {
            background: "#1e40af".into(),
            circle_fill: "white".into(),
            circle_outline: "#3b82f6".into(),
            outline_width: 15,
            circle_margin: 80,
            label: "CM+".into(),
            label_color: "#1e40af".into(),
            font: "arial.ttf".into(),
            font_size: 180.0,
            label_lift: 20.0,
        }
    }
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            product_name: "Cred Management+".into(),
            project_dir: PathBuf::from("desktop"),
            build_command: "npm run build".into(),
            package_command: "npx electron-builder --win --config.win.signAndEditExecutable=false"
                .into(),
            release_dir: PathBuf::from("desktop/release"),
            open_release_dir: true,
        }
    }
}

impl AppConfig {
    /// Config file path: ~/.config/iconsmith/config.toml
    pub fn path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("iconsmith");
        config_dir.join("config.toml")
    }

    pub fn png_path(&self) -> PathBuf {
        self.output_dir.join("icon.png")
    }

    pub fn ico_path(&self) -> PathBuf {
        self.output_dir.join("icon.ico")
    }

    /// Load config from the default location, or return defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load config from `path`. A missing or unreadable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }
        Self::default()
    }

    /// Load config from a path the user asked for explicitly. Unlike
    /// [`AppConfig::load_from`], a missing or malformed file is an error.
    pub fn try_load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!("Config loaded from {}", path.display());
        Ok(config)
    }

    /// Save config to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Config saved to {}", path.display());
        Ok(())
    }
}
