//! Click resolution
//!
//! Converts a device-space pointer event into the normalized scene space,
//! resolves at most one target hit against *current* (animated) positions,
//! falls back to a distractor miss reaction, then applies repulsion around
//! the click point.

use glam::Vec2;

use super::motion::apply_repulsion;
use super::state::{EntityId, Scene, SceneEvent};
use crate::consts::*;

/// The scene's rendered bounding box in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl ViewRect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Device pixels -> scene percent.
    pub fn to_scene(&self, device: Vec2) -> Vec2 {
        (device - self.origin) / self.size * 100.0
    }
}

/// Resolve one click already expressed in scene space.
///
/// 1. The first unfound target (stored order) within the detection radius
///    of its animated position is marked found; later targets and all
///    distractors are not considered.
/// 2. Otherwise the first distractor within the radius emits a miss and
///    starts its shake window.
/// 3. Repulsion always runs, on hits and misses alike. Target matching
///    commits `found` before repulsion reads positions, and the found
///    target is excluded from its own push.
pub fn resolve_click(scene: &mut Scene, click: Vec2, now_ms: u64) -> Vec<SceneEvent> {
    let mut events = Vec::new();
    let mut found = None;

    let hit = scene
        .targets
        .iter()
        .find(|t| !t.found && (t.base + scene.offset(EntityId::Target(t.id))).distance(click) <= DETECTION_RADIUS)
        .map(|t| t.id);
    if let Some(target_id) = hit {
        scene.mark_found(target_id);
        let ordinal = scene.found_count();
        log::info!("target {target_id} found ({ordinal}/{})", scene.total_count());
        events.push(SceneEvent::TargetFound {
            id: target_id,
            ordinal,
        });
        found = Some(EntityId::Target(target_id));
    }

    if found.is_none() {
        let miss = scene
            .distractors
            .iter()
            .find(|d| {
                (d.base + scene.offset(EntityId::Distractor(d.id))).distance(click)
                    <= DETECTION_RADIUS
            })
            .map(|d| d.id);
        if let Some(distractor_id) = miss {
            log::debug!("miss on distractor {distractor_id}");
            events.push(SceneEvent::Miss { id: distractor_id });
            scene
                .flags
                .entry(EntityId::Distractor(distractor_id))
                .or_default()
                .shake_until_ms = now_ms + SHAKE_MS;
        }
    }

    apply_repulsion(scene, click, now_ms, found);
    events
}

/// Resolve a device-space click against the rendered view.
pub fn resolve_device_click(
    scene: &mut Scene,
    device: Vec2,
    view: &ViewRect,
    now_ms: u64,
) -> Vec<SceneEvent> {
    resolve_click(scene, view.to_scene(device), now_ms)
}
