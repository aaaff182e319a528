//! Per-session configuration
//!
//! A session is fully described by its seed plus these knobs: two sessions
//! constructed from equal settings produce identical placement, motion and
//! bubbles.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::DISTRACTORS_OMITTED;

/// How base coordinates are chosen at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutMode {
    /// Coordinates verbatim from the slot table
    Static,
    /// Sampled under the minimum-separation constraint
    #[default]
    Randomized,
}

impl LayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Static => "Static",
            LayoutMode::Randomized => "Randomized",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "static" | "fixed" => Some(LayoutMode::Static),
            "randomized" | "random" => Some(LayoutMode::Randomized),
            _ => None,
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Seed for the session RNG
    pub seed: u64,
    /// Placement mode
    pub layout: LayoutMode,
    /// Distractor slots dropped at random before placement
    pub distractors_omitted: usize,

    // === Idle visuals ===
    /// Wander animation between clicks
    pub idle_motion: bool,
    /// Thought-bubble layer
    pub bubbles: bool,

    // === Accessibility ===
    /// Reduced motion (suppress wander and repulsion shake flags)
    pub reduced_motion: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            layout: LayoutMode::Randomized,
            distractors_omitted: DISTRACTORS_OMITTED,

            idle_motion: true,
            bubbles: true,

            reduced_motion: false,
        }
    }
}

impl SessionSettings {
    /// Settings for a fresh session with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Effective wander toggle (respects reduced_motion)
    pub fn effective_idle_motion(&self) -> bool {
        self.idle_motion && !self.reduced_motion
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse settings {}", path.display()))?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }
}
