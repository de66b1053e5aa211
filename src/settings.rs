//! Player preferences
//!
//! Persisted apart from the best score: a JSON file on native, LocalStorage
//! in the browser. A missing or unreadable copy falls back to defaults.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};

/// Effects budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Live particle budget
    pub fn particle_cap(self) -> usize {
        match self {
            Self::Low => 100,
            Self::Medium => 500,
            Self::High => 2000,
        }
    }

    pub fn has_starfield(self) -> bool {
        self != Self::Low
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(name)
    }
}

impl FromStr for QualityPreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(anyhow!("unknown quality preset {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub quality: QualityPreset,
    /// Explosion bursts
    pub particles: bool,
    /// Twinkling background stars
    pub starfield: bool,
    pub muted: bool,
    /// 0.0 to 1.0
    pub master_volume: f32,
    /// 0.0 to 1.0, scaled by `master_volume`
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::default(),
            particles: true,
            starfield: true,
            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    pub fn with_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.set_preset(preset);
        settings
    }

    /// Switch preset; Low also turns the starfield toggle off
    pub fn set_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.starfield &= preset.has_starfield();
    }

    /// Particle budget after the particles toggle
    pub fn particle_cap(&self) -> usize {
        if self.particles {
            self.quality.particle_cap()
        } else {
            0
        }
    }

    pub fn starfield_on(&self) -> bool {
        self.starfield && self.quality.has_starfield()
    }

    /// Gain applied to sound effects; `muted` is applied by the sink
    pub fn sfx_gain(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("parsing settings in {}", path.display()))
    }

    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            log::warn!("Falling back to default settings: {e:#}");
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing settings to {}", path.display()))?;
        log::info!("Settings written to {}", path.display());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl Settings {
    const STORAGE_KEY: &'static str = "asteroid_smash_settings";

    fn local_storage() -> anyhow::Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| anyhow!("LocalStorage unavailable"))
    }

    fn read_local() -> anyhow::Result<Option<Self>> {
        let stored = Self::local_storage()?
            .get_item(Self::STORAGE_KEY)
            .map_err(|e| anyhow!("reading settings: {e:?}"))?;
        stored
            .map(|json| serde_json::from_str(&json).context("parsing stored settings"))
            .transpose()
    }

    /// Stored settings, or defaults
    pub fn load() -> Self {
        match Self::read_local() {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Falling back to default settings: {e:#}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string(self)?;
        Self::local_storage()?
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| anyhow!("saving settings: {e:?}"))
    }
}
