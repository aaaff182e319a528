//! Slot tables
//!
//! The classic layout places every sprite at a fixed, hand-tuned coordinate.
//! Randomized sessions reuse the same descriptor lists for slot-to-sprite
//! assignment but ignore the coordinates, sampling fresh ones under the
//! separation constraint.

use glam::Vec2;

/// One slot-table entry: which pool sprite goes where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotDescriptor {
    /// Flat index into the decoded sprite pool
    pub sprite_index: u32,
    /// Hand-tuned position for the static layout (percent)
    pub x: f32,
    pub y: f32,
}

impl SlotDescriptor {
    pub const fn new(sprite_index: u32, x: f32, y: f32) -> Self {
        Self { sprite_index, x, y }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Target slots: one 3x3 sheet of sprites to find.
pub const TARGET_SLOTS: [SlotDescriptor; 9] = [
    SlotDescriptor::new(0, 15.0, 20.0),
    SlotDescriptor::new(1, 45.0, 35.0),
    SlotDescriptor::new(2, 75.0, 15.0),
    SlotDescriptor::new(3, 25.0, 60.0),
    SlotDescriptor::new(4, 55.0, 70.0),
    SlotDescriptor::new(5, 85.0, 55.0),
    SlotDescriptor::new(6, 10.0, 85.0),
    SlotDescriptor::new(7, 50.0, 90.0),
    SlotDescriptor::new(8, 80.0, 80.0),
];

/// Distractor slots: four sheets of neutral sprites.
pub const DISTRACTOR_SLOTS: [SlotDescriptor; 36] = [
    // Sheet 01 (indices 0-8)
    SlotDescriptor::new(0, 30.0, 25.0),
    SlotDescriptor::new(1, 60.0, 45.0),
    SlotDescriptor::new(2, 20.0, 75.0),
    SlotDescriptor::new(3, 70.0, 65.0),
    SlotDescriptor::new(4, 40.0, 15.0),
    SlotDescriptor::new(5, 90.0, 30.0),
    SlotDescriptor::new(6, 35.0, 85.0),
    SlotDescriptor::new(7, 65.0, 10.0),
    SlotDescriptor::new(8, 5.0, 50.0),
    // Sheet 02 (indices 9-17)
    SlotDescriptor::new(9, 12.0, 40.0),
    SlotDescriptor::new(10, 48.0, 22.0),
    SlotDescriptor::new(11, 82.0, 38.0),
    SlotDescriptor::new(12, 22.0, 58.0),
    SlotDescriptor::new(13, 58.0, 82.0),
    SlotDescriptor::new(14, 92.0, 68.0),
    SlotDescriptor::new(15, 8.0, 12.0),
    SlotDescriptor::new(16, 72.0, 28.0),
    SlotDescriptor::new(17, 38.0, 48.0),
    // Sheet 03 (indices 18-26)
    SlotDescriptor::new(18, 18.0, 32.0),
    SlotDescriptor::new(19, 52.0, 58.0),
    SlotDescriptor::new(20, 88.0, 18.0),
    SlotDescriptor::new(21, 28.0, 88.0),
    SlotDescriptor::new(22, 68.0, 42.0),
    SlotDescriptor::new(23, 95.0, 85.0),
    SlotDescriptor::new(24, 42.0, 68.0),
    SlotDescriptor::new(25, 78.0, 92.0),
    SlotDescriptor::new(26, 15.0, 68.0),
    // Sheet 04 (indices 27-35)
    SlotDescriptor::new(27, 55.0, 12.0),
    SlotDescriptor::new(28, 25.0, 42.0),
    SlotDescriptor::new(29, 85.0, 48.0),
    SlotDescriptor::new(30, 45.0, 78.0),
    SlotDescriptor::new(31, 75.0, 58.0),
    SlotDescriptor::new(32, 5.0, 28.0),
    SlotDescriptor::new(33, 62.0, 32.0),
    SlotDescriptor::new(34, 32.0, 95.0),
    SlotDescriptor::new(35, 95.0, 5.0),
];
