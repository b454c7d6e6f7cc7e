//! Deferred light queue
//!
//! Commands are appended during the frame and replayed, in submission order,
//! when the light buffer is composited. The backing storage is kept between
//! frames.

use super::commands::DrawCommand;

/// Ordered per-frame list of light draw commands
#[derive(Debug, Default)]
pub struct DeferredLightQueue {
    commands: Vec<DrawCommand>,
}

impl DeferredLightQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Append a command
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Run `execute` on every command in submission order, then empty the queue
    ///
    /// The queue is mutably borrowed for the duration, so nothing can be
    /// queued from inside `execute`. Returns how many commands ran.
    pub fn drain(&mut self, mut execute: impl FnMut(&DrawCommand)) -> usize {
        let count = self.commands.len();
        for command in self.commands.drain(..) {
            execute(&command);
        }
        count
    }

    /// Queued commands in submission order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Allocated command slots
    pub fn capacity(&self) -> usize {
        self.commands.capacity()
    }

    /// Discard every command without running it
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::api::{LightVertex, TextureId};

    fn geometry(id: u64) -> DrawCommand {
        DrawCommand::Geometry {
            texture: TextureId(id),
            vertices: vec![LightVertex::default(); 4],
        }
    }

    fn texture_of(command: &DrawCommand) -> u64 {
        match command {
            DrawCommand::Geometry { texture, .. } => texture.0,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_drain_runs_in_submission_order() {
        let mut queue = DeferredLightQueue::new();
        for id in [3, 1, 2] {
            queue.push(geometry(id));
        }

        let mut seen = Vec::new();
        let ran = queue.drain(|command| seen.push(texture_of(command)));

        assert_eq!(ran, 3);
        assert_eq!(seen, vec![3, 1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_keeps_capacity() {
        let mut queue = DeferredLightQueue::with_capacity(2);
        for id in 0..10 {
            queue.push(geometry(id));
        }
        let capacity = queue.capacity();

        queue.drain(|_| {});

        assert_eq!(queue.len(), 0);
        assert_eq!(queue.capacity(), capacity);
    }

    #[test]
    fn test_each_command_runs_once() {
        let mut queue = DeferredLightQueue::new();
        queue.push(geometry(0));

        let mut runs = 0;
        queue.drain(|_| runs += 1);
        queue.drain(|_| runs += 1);

        assert_eq!(runs, 1);
    }

    #[test]
    fn test_clear_discards_without_running() {
        let mut queue = DeferredLightQueue::new();
        queue.push(geometry(0));
        queue.clear();

        let mut runs = 0;
        assert_eq!(queue.drain(|_| runs += 1), 0);
        assert_eq!(runs, 0);
    }
}
