//! Sprite Hunt - a hidden-sprite seek-and-find scene engine
//!
//! Core modules:
//! - `sheet`: sprite-sheet decoding (grid slicing, white-key matte)
//! - `layout`: slot tables for the classic static layout
//! - `scene`: deterministic scene engine (placement, idle motion, hit-testing)
//! - `settings`: per-session configuration

pub mod layout;
pub mod scene;
pub mod settings;
pub mod sheet;

pub use scene::{Scene, SceneEvent, Session};
pub use settings::{LayoutMode, SessionSettings};
pub use sheet::{SpriteImage, SpritePool};

use glam::Vec2;

/// Engine configuration constants
pub mod consts {
    /// Spritesheet grid (fixed 3x3)
    pub const SHEET_COLS: u32 = 3;
    pub const SHEET_ROWS: u32 = 3;

    /// RGB distance from pure white below which a pixel goes fully transparent
    pub const WHITE_THRESHOLD: f32 = 30.0;
    /// Band above the threshold over which alpha ramps back up
    pub const FADE_RANGE: f32 = 20.0;

    /// Standard sheet series lengths (`to_find/NN.png`, `neutral/NN.png`)
    pub const TO_FIND_SHEET_COUNT: u32 = 1;
    pub const NEUTRAL_SHEET_COUNT: u32 = 4;

    /// Placement domain per axis (percent)
    pub const PLACE_MARGIN_LO: f32 = 8.0;
    pub const PLACE_MARGIN_HI: f32 = 92.0;
    /// Minimum pairwise separation between placed entities (percent)
    pub const MIN_SEPARATION: f32 = 12.0;
    /// Sampling attempts per slot before the separation check is relaxed
    pub const MAX_PLACE_ATTEMPTS: u32 = 50;
    /// Distractor slots dropped at random each session
    pub const DISTRACTORS_OMITTED: usize = 5;

    /// Click-to-entity distance that counts as a hit (percent)
    pub const DETECTION_RADIUS: f32 = 7.0;

    /// Idle wander cadence
    pub const WANDER_PERIOD_MS: u64 = 800;
    /// Fraction of entities perturbed per wander firing
    pub const WANDER_FRACTION: f32 = 0.3;
    /// Max random step per axis per firing (percent)
    pub const WANDER_STEP: f32 = 0.4;
    /// Idle offset clamp per axis (percent)
    pub const WANDER_MAX: f32 = 1.5;

    /// Visible-area clamp for base+offset per axis (percent)
    pub const BOUNDS_LO: f32 = 2.0;
    pub const BOUNDS_HI: f32 = 98.0;

    /// Bubble cadence
    pub const BUBBLE_PERIOD_MS: u64 = 2000;
    /// Chance a visible bubble hides per firing
    pub const BUBBLE_HIDE_CHANCE: f32 = 0.3;

    /// Repulsion radius around a click (percent)
    pub const REPEL_RADIUS: f32 = 22.5;
    /// Push magnitude at zero distance; falls off linearly to the radius
    pub const REPEL_STRENGTH: f32 = 4.0;
    /// Offset clamp while repelled (looser than idle wander)
    pub const REPEL_MAX: f32 = 3.0;

    /// Fast-transition window after a repulsion push
    pub const FAST_TRANSITION_MS: u64 = 150;
    /// Shake window after a miss click
    pub const SHAKE_MS: u64 = 400;
    /// Session-wide hop emphasis window
    pub const JUMP_MS: u64 = 800;
}

/// Clamp a motion offset so each axis stays within `±max` and `base + offset`
/// stays inside the visible area.
#[inline]
pub fn clamp_offset(base: Vec2, offset: Vec2, max: f32) -> Vec2 {
    let dx = offset.x.clamp(-max, max);
    let dy = offset.y.clamp(-max, max);
    Vec2::new(
        dx.clamp(consts::BOUNDS_LO - base.x, consts::BOUNDS_HI - base.x),
        dy.clamp(consts::BOUNDS_LO - base.y, consts::BOUNDS_HI - base.y),
    )
}
