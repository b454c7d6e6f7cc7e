//! Circle Light Pool
//!
//! Circle lights are by far the most common light submission, often several
//! hundred per frame. Slots are reused from frame to frame: a frame only
//! moves a cursor forward, and the end of the frame moves it back to zero.
//! Storage grows one slot at a time on demand and never shrinks.

use crate::foundation::color::PackedColor;

/// A single circular light, identified by its slot index
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CircleLight {
    /// Center x
    pub x: f32,
    /// Center y
    pub y: f32,
    /// Tint with opacity in alpha
    pub color: PackedColor,
    /// Radius, positive for live slots
    pub radius: f32,
}

impl CircleLight {
    /// Overwrite every field
    pub fn set(&mut self, x: f32, y: f32, color: PackedColor, radius: f32) {
        self.x = x;
        self.y = y;
        self.color = color;
        self.radius = radius;
    }
}

/// Growable pool of circle lights with a per-frame live cursor
///
/// Slots at or beyond [`live_count`](Self::live_count) hold data from earlier
/// frames and are never exposed.
#[derive(Debug, Default)]
pub struct CircleLightPool {
    slots: Vec<CircleLight>,
    live: usize,
}

impl CircleLightPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool with `capacity` slots allocated up front
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![CircleLight::default(); capacity],
            live: 0,
        }
    }

    /// Claim the next slot, growing storage by one if every slot is live
    pub fn acquire_slot(&mut self) -> usize {
        if self.live == self.slots.len() {
            self.slots.push(CircleLight::default());
        }

        let index = self.live;
        self.live += 1;
        index
    }

    /// Overwrite the slot at `index`
    ///
    /// `index` must come from [`acquire_slot`](Self::acquire_slot) in the
    /// current frame. Other indices are a debug assertion and are ignored in
    /// release builds.
    pub fn set(&mut self, index: usize, x: f32, y: f32, color: PackedColor, radius: f32) {
        debug_assert!(index < self.live, "circle slot {index} is not live (live count {})", self.live);
        if let Some(slot) = self.slots[..self.live].get_mut(index) {
            slot.set(x, y, color, radius);
        }
    }

    /// Claim a slot and fill it in one step
    pub fn push(&mut self, x: f32, y: f32, color: PackedColor, radius: f32) -> usize {
        let index = self.acquire_slot();
        self.slots[index].set(x, y, color, radius);
        index
    }

    /// Number of slots valid this frame
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Number of allocated slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live slots in submission order
    pub fn live(&self) -> &[CircleLight] {
        &self.slots[..self.live]
    }

    /// Whether no slot is live
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Mark every slot reusable without releasing storage
    pub fn reset(&mut self) {
        self.live = 0;
    }
}
