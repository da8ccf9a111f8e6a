//! Demo configuration file handling
//!
//! The demo reads an optional `soothing.toml`:
//! - `[simulation]` - frame rate, run length and when to tap buttons
//! - `[palette]` - the four colours every catalog entry is built from

use anyhow::{Context, Result};
use serde::Deserialize;
use soothing_core::Color;
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no `--config` is given
pub const CONFIG_FILE: &str = "soothing.toml";

/// Top-level demo configuration
#[derive(Debug, Default, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
}

/// Headless simulation settings
#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Ticks per simulated second
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Simulated seconds per run
    #[serde(default = "default_seconds")]
    pub seconds: f32,
    /// Seconds after appearing at which buttons are tapped
    #[serde(default = "default_tap_at")]
    pub tap_at: Option<f32>,
}

fn default_fps() -> u32 {
    60
}

fn default_seconds() -> f32 {
    4.0
}

fn default_tap_at() -> Option<f32> {
    Some(0.5)
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            seconds: default_seconds(),
            tap_at: default_tap_at(),
        }
    }
}

/// Colours substituted into the catalog's demo parameters
#[derive(Clone, Debug, Deserialize)]
pub struct PaletteConfig {
    #[serde(default = "default_accent")]
    pub accent: Color,
    #[serde(default = "default_secondary")]
    pub secondary: Color,
    #[serde(default = "default_tertiary")]
    pub tertiary: Color,
    #[serde(default = "default_neutral")]
    pub neutral: Color,
}

fn default_accent() -> Color {
    Color::PINK
}

fn default_secondary() -> Color {
    Color::BLUE
}

fn default_tertiary() -> Color {
    Color::PURPLE
}

fn default_neutral() -> Color {
    Color::GRAY
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            accent: default_accent(),
            secondary: default_secondary(),
            tertiary: default_tertiary(),
            neutral: default_neutral(),
        }
    }
}

impl DemoConfig {
    /// Load from `path`, or from `soothing.toml` in the working directory
    ///
    /// An explicit path must exist. Without one, a missing file means
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    Self::load_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: DemoConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let sim = &self.simulation;
        if sim.fps == 0 {
            anyhow::bail!("simulation.fps must be at least 1");
        }
        if !(sim.seconds.is_finite() && sim.seconds > 0.0) {
            anyhow::bail!("simulation.seconds must be positive, got {}", sim.seconds);
        }
        if let Some(tap_at) = sim.tap_at {
            if !(tap_at.is_finite() && tap_at >= 0.0) {
                anyhow::bail!("simulation.tap_at must not be negative, got {}", tap_at);
            }
        }
        Ok(())
    }
}
