//! Game settings
//!
//! Gameplay tuning plus pacing/presentation preferences. Read once at
//! startup: from LocalStorage in the browser, from a JSON file natively.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay constants
    pub tuning: Tuning,

    // === Pacing ===
    /// Frame rate while playing
    pub running_fps: u32,
    /// Frame rate while paused
    pub paused_fps: u32,

    // === Presentation ===
    /// Draw the background starfield
    pub starfield: bool,
    /// Delay between fade overlay steps at game over / level complete
    pub fade_step_ms: f32,
    /// Hold on the faded frame before the next game starts
    pub hold_ms: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            running_fps: RUNNING_FPS,
            paused_fps: PAUSED_FPS,
            starfield: true,
            fade_step_ms: FADE_STEP_MS,
            hold_ms: HOLD_MS,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "brick_breaker_settings";

    /// Environment variable naming a settings file
    #[cfg(not(target_arch = "wasm32"))]
    const PATH_ENV: &'static str = "BRICK_BREAKER_SETTINGS";

    /// Settings file looked up in the working directory
    #[cfg(not(target_arch = "wasm32"))]
    const DEFAULT_PATH: &'static str = "settings.json";

    /// Parse and validate a JSON settings blob; missing fields use defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).context("malformed settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.tuning.validate().context("invalid tuning")?;
        if self.running_fps == 0 || self.paused_fps == 0 {
            bail!(
                "frame rates must be positive, got running={} paused={}",
                self.running_fps,
                self.paused_fps
            );
        }
        if !(self.fade_step_ms >= 0.0 && self.hold_ms >= 0.0) {
            bail!(
                "fade timings must be non-negative, got step={} hold={}",
                self.fade_step_ms,
                self.hold_ms
            );
        }
        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e:#}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from `$BRICK_BREAKER_SETTINGS` or `./settings.json`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let explicit = std::env::var_os(Self::PATH_ENV).map(std::path::PathBuf::from);
        Self::load_or_default(explicit)
    }

    /// Load from `explicit`, else `./settings.json` if present, else defaults
    #[cfg(not(target_arch = "wasm32"))]
    fn load_or_default(explicit: Option<std::path::PathBuf>) -> Self {
        let path = explicit
            .clone()
            .unwrap_or_else(|| std::path::PathBuf::from(Self::DEFAULT_PATH));

        if explicit.is_none() && !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }

        match Self::load_from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json)
    }
}
