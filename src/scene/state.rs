//! Scene model and domain events
//!
//! All authoritative per-session state lives here: placed slots, the
//! transient motion offsets, bubble visibility and timed presentation flags.
//! Everything is keyed by [`EntityId`] so side tables never need composite
//! string keys.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Identifies an entity across every per-entity side table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityId {
    Target(u32),
    Distractor(u32),
}

/// A hidden sprite the player must find.
///
/// `found` is the only field mutated after placement, and only false->true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSlot {
    /// Unique within the scene
    pub id: u32,
    /// Flat index into the target pool
    pub sprite_index: u32,
    /// Placement coordinate (percent)
    pub base: Vec2,
    pub found: bool,
}

/// A neutral sprite: never found, but can trigger a miss reaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistractorSlot {
    pub id: u32,
    pub sprite_index: u32,
    pub base: Vec2,
}

/// Decorative glyph shown in an idle thought bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BubbleGlyph {
    Heart,
    Star,
    MusicNote,
    Sparkle,
    Exclaim,
}

impl BubbleGlyph {
    pub const ALL: [BubbleGlyph; 5] = [
        BubbleGlyph::Heart,
        BubbleGlyph::Star,
        BubbleGlyph::MusicNote,
        BubbleGlyph::Sparkle,
        BubbleGlyph::Exclaim,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            BubbleGlyph::Heart => "\u{2665}",
            BubbleGlyph::Star => "\u{2605}",
            BubbleGlyph::MusicNote => "\u{266a}",
            BubbleGlyph::Sparkle => "\u{2726}",
            BubbleGlyph::Exclaim => "!",
        }
    }
}

/// Domain events emitted by the interaction resolver.
///
/// The presentation layer subscribes to these for sound and overlay
/// feedback; the core never touches audio or the DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A target was found. `ordinal` is the 1-based count of finds so far,
    /// for sequenced celebration messages.
    TargetFound { id: u32, ordinal: u32 },
    /// A distractor was clicked
    Miss { id: u32 },
}

/// Timed presentation flags for one entity (ms timestamps on the session
/// clock; a flag is active while `now < until`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EntityFlags {
    /// Fast-transition window after a repulsion push
    pub fast_until_ms: u64,
    /// Shake window after a miss click
    pub shake_until_ms: u64,
}

impl EntityFlags {
    pub fn any_active(&self, now_ms: u64) -> bool {
        now_ms < self.fast_until_ms || now_ms < self.shake_until_ms
    }
}

/// The authoritative scene: slots plus the per-entity side tables.
///
/// Side tables are `BTreeMap`s so every iteration is in stable id order;
/// combined with the seeded session RNG this keeps whole sessions
/// reproducible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub targets: Vec<TargetSlot>,
    pub distractors: Vec<DistractorSlot>,
    /// Transient idle-motion displacement per entity
    pub offsets: BTreeMap<EntityId, Vec2>,
    /// Visible thought bubbles (presence = visible)
    pub bubbles: BTreeMap<EntityId, BubbleGlyph>,
    /// Timed presentation flags
    pub flags: BTreeMap<EntityId, EntityFlags>,
    /// Session-wide hop emphasis window
    pub jump_until_ms: u64,
}

impl Scene {
    /// Every entity id in stored order: targets first, then distractors.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.targets
            .iter()
            .map(|t| EntityId::Target(t.id))
            .chain(self.distractors.iter().map(|d| EntityId::Distractor(d.id)))
    }

    pub fn entity_count(&self) -> usize {
        self.targets.len() + self.distractors.len()
    }

    /// Entity id by position in the stored order (targets, then
    /// distractors). Used by the motion engine's uniform picks.
    pub fn entity_id_at(&self, index: usize) -> Option<EntityId> {
        if index < self.targets.len() {
            Some(EntityId::Target(self.targets[index].id))
        } else {
            self.distractors
                .get(index - self.targets.len())
                .map(|d| EntityId::Distractor(d.id))
        }
    }

    pub fn base_position(&self, id: EntityId) -> Option<Vec2> {
        match id {
            EntityId::Target(tid) => self.targets.iter().find(|t| t.id == tid).map(|t| t.base),
            EntityId::Distractor(did) => self
                .distractors
                .iter()
                .find(|d| d.id == did)
                .map(|d| d.base),
        }
    }

    /// Current motion offset (zero when the entity has never wandered).
    pub fn offset(&self, id: EntityId) -> Vec2 {
        self.offsets.get(&id).copied().unwrap_or(Vec2::ZERO)
    }

    /// Animated position: base plus the transient offset. Hit-testing and
    /// rendering both read this, never the base alone.
    pub fn current_position(&self, id: EntityId) -> Option<Vec2> {
        self.base_position(id).map(|base| base + self.offset(id))
    }

    /// Mark a target found. Idempotent: returns whether state changed.
    /// `found` never reverts, so the found count is monotonic.
    pub fn mark_found(&mut self, target_id: u32) -> bool {
        match self.targets.iter_mut().find(|t| t.id == target_id) {
            Some(t) if !t.found => {
                t.found = true;
                true
            }
            _ => false,
        }
    }

    pub fn found_count(&self) -> u32 {
        self.targets.iter().filter(|t| t.found).count() as u32
    }

    pub fn total_count(&self) -> u32 {
        self.targets.len() as u32
    }

    /// Complete when every target is found and there was something to find.
    /// Recomputed from the slots on every call, never cached.
    pub fn is_complete(&self) -> bool {
        !self.targets.is_empty() && self.targets.iter().all(|t| t.found)
    }

    /// Start the session-wide hop emphasis window.
    pub fn trigger_jump(&mut self, now_ms: u64) {
        self.jump_until_ms = now_ms + JUMP_MS;
    }

    pub fn jump_active(&self, now_ms: u64) -> bool {
        now_ms < self.jump_until_ms
    }

    pub fn fast_transition_active(&self, id: EntityId, now_ms: u64) -> bool {
        self.flags
            .get(&id)
            .is_some_and(|f| now_ms < f.fast_until_ms)
    }

    pub fn shake_active(&self, id: EntityId, now_ms: u64) -> bool {
        self.flags
            .get(&id)
            .is_some_and(|f| now_ms < f.shake_until_ms)
    }
}
