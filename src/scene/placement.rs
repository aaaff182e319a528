//! Separation-constrained placement
//!
//! Builds a scene's base coordinates from slot tables. Randomized layouts
//! sample uniformly inside the margins and retry until the new point is at
//! least `MIN_SEPARATION` away from everything already placed; the retry
//! budget is bounded, and exhaustion falls back to an unchecked sample.
//! Static layouts take the table coordinates verbatim.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::state::{DistractorSlot, Scene, TargetSlot};
use crate::consts::*;
use crate::layout::SlotDescriptor;
use crate::settings::LayoutMode;

/// Counters from one placement run, observable for testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementStats {
    /// Slots placed without a separation check (retry budget exhausted)
    pub relaxed_count: u32,
    /// Slots dropped because their sprite index exceeded the pool
    pub dropped_count: u32,
}

/// Accumulates placed points and samples new ones under the separation
/// constraint. One accumulator spans target and distractor placement, so
/// the constraint holds across both sets.
struct Separator {
    placed: Vec<Vec2>,
}

impl Separator {
    fn new() -> Self {
        Self { placed: Vec::new() }
    }

    /// Record a table-supplied point without sampling.
    fn record(&mut self, p: Vec2) {
        self.placed.push(p);
    }

    /// Sample a point at least `MIN_SEPARATION` from every placed one.
    ///
    /// After `MAX_PLACE_ATTEMPTS` failures the next sample is accepted
    /// unchecked; separation against the fallback point is deliberately not
    /// re-checked (a documented relaxation, observable via the stats).
    fn sample(&mut self, rng: &mut Pcg32, stats: &mut PlacementStats) -> Vec2 {
        for _ in 0..MAX_PLACE_ATTEMPTS {
            let p = random_point(rng);
            if self
                .placed
                .iter()
                .all(|q| q.distance(p) >= MIN_SEPARATION)
            {
                self.placed.push(p);
                return p;
            }
        }
        let fallback = random_point(rng);
        log::warn!(
            "placement retry budget exhausted, accepting unseparated point ({:.1}, {:.1})",
            fallback.x,
            fallback.y
        );
        stats.relaxed_count += 1;
        self.placed.push(fallback);
        fallback
    }
}

fn random_point(rng: &mut Pcg32) -> Vec2 {
    Vec2::new(
        rng.random_range(PLACE_MARGIN_LO..PLACE_MARGIN_HI),
        rng.random_range(PLACE_MARGIN_LO..PLACE_MARGIN_HI),
    )
}

/// Place a scene from slot tables.
///
/// Slots referencing sprites beyond the pool are silently dropped, then a
/// fixed number of distractor slots is omitted at random (shuffle, drop a
/// prefix) to vary density across sessions. Targets are placed first, then
/// distractors, sharing the separation accumulator.
pub fn place_scene(
    target_slots: &[SlotDescriptor],
    distractor_slots: &[SlotDescriptor],
    target_pool_len: usize,
    distractor_pool_len: usize,
    mode: LayoutMode,
    distractors_omitted: usize,
    rng: &mut Pcg32,
) -> (Scene, PlacementStats) {
    let mut stats = PlacementStats::default();
    let mut separator = Separator::new();

    let target_descs: Vec<SlotDescriptor> = target_slots
        .iter()
        .filter(|d| (d.sprite_index as usize) < target_pool_len)
        .copied()
        .collect();
    stats.dropped_count += (target_slots.len() - target_descs.len()) as u32;

    let mut distractor_descs: Vec<SlotDescriptor> = distractor_slots
        .iter()
        .filter(|d| (d.sprite_index as usize) < distractor_pool_len)
        .copied()
        .collect();
    stats.dropped_count += (distractor_slots.len() - distractor_descs.len()) as u32;

    distractor_descs.shuffle(rng);
    let omit = distractors_omitted.min(distractor_descs.len());
    let distractor_descs = &distractor_descs[omit..];

    let mut scene = Scene::default();
    for (i, desc) in target_descs.iter().enumerate() {
        let base = match mode {
            LayoutMode::Static => {
                let p = desc.position();
                separator.record(p);
                p
            }
            LayoutMode::Randomized => separator.sample(rng, &mut stats),
        };
        scene.targets.push(TargetSlot {
            id: i as u32,
            sprite_index: desc.sprite_index,
            base,
            found: false,
        });
    }
    for (i, desc) in distractor_descs.iter().enumerate() {
        let base = match mode {
            LayoutMode::Static => {
                let p = desc.position();
                separator.record(p);
                p
            }
            LayoutMode::Randomized => separator.sample(rng, &mut stats),
        };
        scene.distractors.push(DistractorSlot {
            id: i as u32,
            sprite_index: desc.sprite_index,
            base,
        });
    }

    if stats.dropped_count > 0 {
        log::debug!("{} slots dropped (sprite index beyond pool)", stats.dropped_count);
    }
    (scene, stats)
}
