//! Idle motion and bubble scheduling
//!
//! Two independent cadences animate the scene between clicks: a wander tick
//! nudges a random subset of entities with a bounded random walk, and a
//! bubble tick toggles decorative thought bubbles. Repulsion is the third
//! writer of offsets, invoked by the interaction resolver rather than a
//! timer. All three apply the same clamps, so `base + offset` never leaves
//! the visible area.
//!
//! The engine owns its cadence state and the session RNG; constructing a
//! fresh engine for a new session abandons any pending firings from the old
//! one. Tick bodies are infallible: an entity that cannot be resolved is
//! skipped with a warning, never a panic.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{BubbleGlyph, EntityId, Scene};
use crate::consts::*;
use crate::clamp_offset;

/// Timer-driven idle animation: wander steps, bubble visibility and expiry
/// of timed presentation flags.
#[derive(Debug, Clone)]
pub struct MotionEngine {
    rng: Pcg32,
    /// Session clock at the last `advance` call
    last_ms: u64,
    wander_acc_ms: u64,
    bubble_acc_ms: u64,
    wander_enabled: bool,
    bubbles_enabled: bool,
}

impl MotionEngine {
    pub fn new(rng: Pcg32) -> Self {
        Self {
            rng,
            last_ms: 0,
            wander_acc_ms: 0,
            bubble_acc_ms: 0,
            wander_enabled: true,
            bubbles_enabled: true,
        }
    }

    /// Disable one or both idle layers (reduced motion, quiet scenes).
    pub fn with_toggles(mut self, wander: bool, bubbles: bool) -> Self {
        self.wander_enabled = wander;
        self.bubbles_enabled = bubbles;
        self
    }

    /// Advance the session clock to `now_ms`, firing every wander and
    /// bubble tick that came due in between, then expiring stale flags.
    /// The host calls this from its timer; each call runs to completion
    /// before any click is resolved.
    pub fn advance(&mut self, scene: &mut Scene, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.last_ms);
        self.last_ms = now_ms;
        self.wander_acc_ms += elapsed;
        self.bubble_acc_ms += elapsed;

        while self.wander_acc_ms >= WANDER_PERIOD_MS {
            self.wander_acc_ms -= WANDER_PERIOD_MS;
            if self.wander_enabled {
                self.wander_tick(scene);
            }
        }
        while self.bubble_acc_ms >= BUBBLE_PERIOD_MS {
            self.bubble_acc_ms -= BUBBLE_PERIOD_MS;
            if self.bubbles_enabled {
                self.bubble_tick(scene);
            }
        }

        expire_flags(scene, now_ms);
    }

    /// One wander firing: nudge ~30% of entities with a bounded random
    /// step. Picks are with replacement, so an entity may move twice or
    /// not at all in one firing (an accepted non-uniformity).
    fn wander_tick(&mut self, scene: &mut Scene) {
        let count = scene.entity_count();
        if count == 0 {
            return;
        }
        let picks = ((count as f32) * WANDER_FRACTION).ceil() as usize;
        for _ in 0..picks {
            let index = self.rng.random_range(0..count);
            let Some(id) = scene.entity_id_at(index) else {
                continue;
            };
            let Some(base) = scene.base_position(id) else {
                log::warn!("wander tick skipped unresolvable entity {id:?}");
                continue;
            };
            let step = Vec2::new(
                self.rng.random_range(-WANDER_STEP..=WANDER_STEP),
                self.rng.random_range(-WANDER_STEP..=WANDER_STEP),
            );
            let next = clamp_offset(base, scene.offset(id) + step, WANDER_MAX);
            scene.offsets.insert(id, next);
        }
    }

    /// One bubble firing: each visible bubble may hide, then one or two
    /// random entities gain a bubble with a random glyph.
    fn bubble_tick(&mut self, scene: &mut Scene) {
        // Snapshot in stable id order so the hide draws pair with the same
        // bubbles for a given seed.
        let visible: Vec<EntityId> = scene.bubbles.keys().copied().collect();
        for id in visible {
            if self.rng.random::<f32>() < BUBBLE_HIDE_CHANCE {
                scene.bubbles.remove(&id);
            }
        }

        let count = scene.entity_count();
        if count == 0 {
            return;
        }
        let show = self.rng.random_range(1..=2usize);
        for _ in 0..show {
            let index = self.rng.random_range(0..count);
            let Some(id) = scene.entity_id_at(index) else {
                continue;
            };
            if scene.bubbles.contains_key(&id) {
                continue;
            }
            let glyph = BubbleGlyph::ALL[self.rng.random_range(0..BubbleGlyph::ALL.len())];
            scene.bubbles.insert(id, glyph);
        }
    }
}

/// Push every entity within `REPEL_RADIUS` of `click` away from it, with
/// magnitude falling off linearly to zero at the radius. Each pushed entity
/// gets a fast-transition flag so the presentation layer can animate the
/// jolt quicker than an idle drift.
///
/// `exclude` skips the entity that resolved the click: a just-found target
/// must not be displaced by its own discovery.
pub fn apply_repulsion(scene: &mut Scene, click: Vec2, now_ms: u64, exclude: Option<EntityId>) {
    let ids: Vec<EntityId> = scene.entity_ids().collect();
    for id in ids {
        if Some(id) == exclude {
            continue;
        }
        let Some(pos) = scene.current_position(id) else {
            continue;
        };
        let delta = pos - click;
        let dist = delta.length();
        if dist >= REPEL_RADIUS {
            continue;
        }
        // An entity exactly on the click point has no away direction.
        let Some(dir) = delta.try_normalize() else {
            continue;
        };
        let magnitude = REPEL_STRENGTH * (1.0 - dist / REPEL_RADIUS);
        let Some(base) = scene.base_position(id) else {
            continue;
        };
        let next = clamp_offset(base, scene.offset(id) + dir * magnitude, REPEL_MAX);
        scene.offsets.insert(id, next);
        scene.flags.entry(id).or_default().fast_until_ms = now_ms + FAST_TRANSITION_MS;
    }
}

/// Drop flag entries whose windows have all passed.
fn expire_flags(scene: &mut Scene, now_ms: u64) {
    scene.flags.retain(|_, f| f.any_active(now_ms));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::placement::place_scene;
    use crate::layout::{DISTRACTOR_SLOTS, TARGET_SLOTS};
    use crate::settings::LayoutMode;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn seeded_scene(seed: u64) -> (Scene, MotionEngine) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let (scene, _) = place_scene(
            &TARGET_SLOTS,
            &DISTRACTOR_SLOTS,
            TARGET_SLOTS.len(),
            DISTRACTOR_SLOTS.len(),
            LayoutMode::Randomized,
            DISTRACTORS_OMITTED,
            &mut rng,
        );
        (scene, MotionEngine::new(rng))
    }

    fn assert_in_bounds(scene: &Scene, max_offset: f32) {
        for id in scene.entity_ids() {
            let offset = scene.offset(id);
            assert!(offset.x.abs() <= max_offset + 1e-4, "offset {offset:?}");
            assert!(offset.y.abs() <= max_offset + 1e-4, "offset {offset:?}");
            let pos = scene.current_position(id).unwrap();
            assert!((BOUNDS_LO..=BOUNDS_HI).contains(&pos.x), "pos {pos:?}");
            assert!((BOUNDS_LO..=BOUNDS_HI).contains(&pos.y), "pos {pos:?}");
        }
    }

    #[test]
    fn test_wander_moves_someone_and_respects_clamps() {
        let (mut scene, mut engine) = seeded_scene(5);
        for tick in 1..=20u64 {
            engine.advance(&mut scene, tick * WANDER_PERIOD_MS);
        }
        assert!(!scene.offsets.is_empty());
        assert_in_bounds(&scene, WANDER_MAX);
    }

    #[test]
    fn test_advance_fires_missed_ticks() {
        let (mut scene, mut engine) = seeded_scene(6);
        // A long stall fires every tick that came due, not just one.
        engine.advance(&mut scene, WANDER_PERIOD_MS * 10);
        assert!(!scene.offsets.is_empty());
    }

    #[test]
    fn test_disabled_wander_never_moves() {
        let (mut scene, engine) = seeded_scene(7);
        let mut engine = engine.with_toggles(false, true);
        engine.advance(&mut scene, WANDER_PERIOD_MS * 50);
        assert!(scene.offsets.is_empty());
    }

    #[test]
    fn test_bubble_tick_shows_at_most_two() {
        let (mut scene, mut engine) = seeded_scene(8);
        engine.advance(&mut scene, BUBBLE_PERIOD_MS);
        assert!((1..=2).contains(&scene.bubbles.len()));
    }

    #[test]
    fn test_bubbles_churn_over_time() {
        let (mut scene, mut engine) = seeded_scene(9);
        for tick in 1..=50u64 {
            engine.advance(&mut scene, tick * BUBBLE_PERIOD_MS);
            // Shows add at most 2 per tick and hides keep the set small; it
            // must never exceed the entity count.
            assert!(scene.bubbles.len() <= scene.entity_count());
        }
        assert!(!scene.bubbles.is_empty());
    }

    #[test]
    fn test_repulsion_pushes_away_with_falloff() {
        let (mut scene, _) = seeded_scene(10);
        let id = EntityId::Target(scene.targets[0].id);
        let pos = scene.current_position(id).unwrap();
        let click = pos - Vec2::new(5.0, 0.0);

        apply_repulsion(&mut scene, click, 0, None);
        let offset = scene.offset(id);
        // Pushed along +x, away from the click.
        assert!(offset.x > 0.0);
        let expected = REPEL_STRENGTH * (1.0 - 5.0 / REPEL_RADIUS);
        assert!((offset.x - expected.min(REPEL_MAX)).abs() < 1e-3);
        assert!(scene.fast_transition_active(id, 100));
    }

    #[test]
    fn test_repulsion_excludes_found_target() {
        let (mut scene, _) = seeded_scene(11);
        let id = EntityId::Target(scene.targets[0].id);
        let click = scene.current_position(id).unwrap();
        apply_repulsion(&mut scene, click + Vec2::new(1.0, 0.0), 0, Some(id));
        assert_eq!(scene.offset(id), Vec2::ZERO);
    }

    #[test]
    fn test_fast_flag_expires() {
        let (mut scene, mut engine) = seeded_scene(12);
        let id = EntityId::Target(scene.targets[0].id);
        let click = scene.current_position(id).unwrap() + Vec2::new(1.0, 0.0);
        apply_repulsion(&mut scene, click, 0, None);
        assert!(scene.fast_transition_active(id, FAST_TRANSITION_MS - 1));

        engine.advance(&mut scene, FAST_TRANSITION_MS + 1);
        assert!(!scene.fast_transition_active(id, FAST_TRANSITION_MS + 1));
        assert!(!scene.flags.contains_key(&id));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// Across 1000+ wander firings nothing ever leaves [2,98] nor
        /// exceeds the idle offset clamp.
        #[test]
        fn prop_wander_bounds_hold(seed in any::<u64>()) {
            let (mut scene, mut engine) = seeded_scene(seed);
            for tick in 1..=1200u64 {
                engine.advance(&mut scene, tick * WANDER_PERIOD_MS);
                assert_in_bounds(&scene, WANDER_MAX);
            }
        }

        /// Repeated same-direction clicks never push an entity past the
        /// repulsion clamp or out of bounds.
        #[test]
        fn prop_repulsion_clamps_hold(seed in any::<u64>()) {
            let (mut scene, _) = seeded_scene(seed);
            let id = EntityId::Target(scene.targets[0].id);
            let base = scene.base_position(id).unwrap();
            // Hammer from the left so the push is always +x, toward the
            // right boundary.
            for _ in 0..40 {
                let click = scene.current_position(id).unwrap() - Vec2::new(3.0, 0.0);
                apply_repulsion(&mut scene, click, 0, None);
                assert_in_bounds(&scene, REPEL_MAX);
                let pos = scene.current_position(id).unwrap();
                prop_assert!((pos - base).length() <= REPEL_MAX * 2.0_f32.sqrt() + 1e-3);
            }
        }
    }
}
