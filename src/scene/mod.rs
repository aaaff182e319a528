//! Deterministic scene engine
//!
//! All gameplay logic lives here. The module is pure and deterministic:
//! - Time supplied by the host in milliseconds
//! - Seeded RNG only
//! - Stable iteration order (targets then distractors, by id)
//! - No rendering or platform dependencies

pub mod interact;
pub mod motion;
pub mod placement;
pub mod state;

pub use interact::{ViewRect, resolve_click, resolve_device_click};
pub use motion::{MotionEngine, apply_repulsion};
pub use placement::{PlacementStats, place_scene};
pub use state::{
    BubbleGlyph, DistractorSlot, EntityFlags, EntityId, Scene, SceneEvent, TargetSlot,
};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::layout::{self, SlotDescriptor};
use crate::settings::SessionSettings;

/// One game session: a placed scene plus its motion engine.
///
/// All timers live inside the engine value, so replacing the session
/// replaces them with it; no stale cadence can ever touch a new scene,
/// including on an error path (the old session is simply dropped).
#[derive(Debug, Clone)]
pub struct Session {
    pub scene: Scene,
    engine: MotionEngine,
    stats: PlacementStats,
}

impl Session {
    /// Place a scene from the standard slot tables and start its engine.
    ///
    /// Pool lengths come from the decoded sprite pools; slots beyond them
    /// are excluded. Everything random in the session derives from
    /// `settings.seed`.
    pub fn new(
        settings: &SessionSettings,
        target_pool_len: usize,
        distractor_pool_len: usize,
    ) -> Self {
        Self::with_slots(
            settings,
            &layout::TARGET_SLOTS,
            &layout::DISTRACTOR_SLOTS,
            target_pool_len,
            distractor_pool_len,
        )
    }

    /// Same as [`Session::new`] with caller-supplied slot tables.
    pub fn with_slots(
        settings: &SessionSettings,
        target_slots: &[SlotDescriptor],
        distractor_slots: &[SlotDescriptor],
        target_pool_len: usize,
        distractor_pool_len: usize,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let (scene, stats) = place_scene(
            target_slots,
            distractor_slots,
            target_pool_len,
            distractor_pool_len,
            settings.layout,
            settings.distractors_omitted,
            &mut rng,
        );
        log::info!(
            "session placed: {} targets, {} distractors ({} layout, seed {})",
            scene.targets.len(),
            scene.distractors.len(),
            settings.layout.as_str(),
            settings.seed
        );
        let engine = MotionEngine::new(rng)
            .with_toggles(settings.effective_idle_motion(), settings.bubbles);
        Self {
            scene,
            engine,
            stats,
        }
    }

    /// Advance the session clock (host timer callback).
    pub fn advance(&mut self, now_ms: u64) {
        self.engine.advance(&mut self.scene, now_ms);
    }

    /// Resolve a click in scene space.
    pub fn click(&mut self, point: Vec2, now_ms: u64) -> Vec<SceneEvent> {
        resolve_click(&mut self.scene, point, now_ms)
    }

    /// Resolve a device-space click against the rendered view.
    pub fn click_device(&mut self, device: Vec2, view: &ViewRect, now_ms: u64) -> Vec<SceneEvent> {
        resolve_device_click(&mut self.scene, device, view, now_ms)
    }

    pub fn is_complete(&self) -> bool {
        self.scene.is_complete()
    }

    /// Placement counters from initialization (testing/diagnostics).
    pub fn placement_stats(&self) -> PlacementStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::LayoutMode;

    #[test]
    fn test_session_places_from_pools() {
        let settings = SessionSettings::with_seed(21);
        let session = Session::new(&settings, 9, 36);
        assert_eq!(session.scene.targets.len(), 9);
        assert_eq!(session.scene.distractors.len(), 36 - DISTRACTORS_OMITTED);
        assert!(!session.is_complete());
    }

    #[test]
    fn test_session_is_reproducible() {
        let settings = SessionSettings::with_seed(4);
        let mut a = Session::new(&settings, 9, 36);
        let mut b = Session::new(&settings, 9, 36);
        for tick in 1..=10u64 {
            a.advance(tick * WANDER_PERIOD_MS);
            b.advance(tick * WANDER_PERIOD_MS);
        }
        assert_eq!(a.scene.offsets, b.scene.offsets);
        assert_eq!(a.scene.bubbles, b.scene.bubbles);
    }

    #[test]
    fn test_new_session_starts_clean() {
        let settings = SessionSettings {
            seed: 8,
            layout: LayoutMode::Static,
            ..SessionSettings::default()
        };
        let mut session = Session::new(&settings, 9, 36);
        session.advance(60_000);
        let click = session.scene.current_position(EntityId::Target(0)).unwrap();
        session.click(click, 60_000);
        assert_eq!(session.scene.found_count(), 1);

        // Re-initialization discards found state, offsets and timers.
        let session = Session::new(&settings, 9, 36);
        assert_eq!(session.scene.found_count(), 0);
        assert!(session.scene.offsets.is_empty());
        assert!(session.scene.bubbles.is_empty());
    }

    #[test]
    fn test_full_playthrough_completes() {
        let settings = SessionSettings::with_seed(13);
        let mut session = Session::new(&settings, 9, 36);
        let mut now = 0u64;
        let mut ordinals = Vec::new();
        for _ in 0..9 {
            now += WANDER_PERIOD_MS;
            session.advance(now);
            // Click exactly on the animated position of the first unfound
            // target; first-match policy resolves to that one.
            let next = session
                .scene
                .targets
                .iter()
                .find(|t| !t.found)
                .map(|t| t.id)
                .unwrap();
            let pos = session
                .scene
                .current_position(EntityId::Target(next))
                .unwrap();
            for event in session.click(pos, now) {
                if let SceneEvent::TargetFound { id, ordinal } = event {
                    assert_eq!(id, next);
                    ordinals.push(ordinal);
                }
            }
        }
        assert_eq!(ordinals, (1..=9).collect::<Vec<_>>());
        assert!(session.is_complete());
    }
}
