//! Bounded per-frame display list.
//!
//! The list holds at most [`MAX_POINTS`] commands. Once full, every further
//! append overwrites the final slot and logs a warning, so a runaway vector
//! program can neither grow memory nor disturb what was already recorded.

use crate::types::{DevicePoint, Rgb};

/// Capacity of a display list.
pub const MAX_POINTS: usize = 10_000;

/// One recorded vector command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Move the beam from the previous endpoint to `end`.
    Segment {
        end: DevicePoint,
        color: Rgb,
        /// Intensity, already clamped and jittered.
        intensity: u8,
        /// Set when recorded. Not read by rendering.
        dirty: bool,
    },
    /// Replace the active clip rectangle.
    Clip { from: DevicePoint, to: DevicePoint },
}

impl DrawCommand {
    /// Returns true for [`DrawCommand::Segment`].
    pub fn is_segment(&self) -> bool {
        matches!(self, DrawCommand::Segment { .. })
    }
}

/// Fixed-capacity, append-only list of draw commands for one frame.
#[derive(Debug, Clone)]
pub struct DisplayList {
    commands: Box<[DrawCommand]>,
    total_count: usize,
    segment_count: usize,
    overflow_count: usize,
}

impl DisplayList {
    /// Creates an empty list with room for [`MAX_POINTS`] commands.
    pub fn new() -> Self {
        Self::with_capacity(MAX_POINTS)
    }

    /// Creates an empty list with a custom bound. A capacity of zero is
    /// raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let placeholder = DrawCommand::Clip {
            from: DevicePoint::default(),
            to: DevicePoint::default(),
        };
        Self {
            commands: vec![placeholder; capacity.max(1)].into_boxed_slice(),
            total_count: 0,
            segment_count: 0,
            overflow_count: 0,
        }
    }

    /// Appends a command, overwriting the final slot when the list is full.
    pub fn push(&mut self, command: DrawCommand) {
        let capacity = self.commands.len();
        if self.total_count < capacity {
            self.commands[self.total_count] = command;
            self.total_count += 1;
            if command.is_segment() {
                self.segment_count += 1;
            }
            return;
        }

        let last = &mut self.commands[capacity - 1];
        if last.is_segment() {
            self.segment_count -= 1;
        }
        if command.is_segment() {
            self.segment_count += 1;
        }
        *last = command;

        self.overflow_count += 1;
        log::warn!(
            "Vector list overflow: {} commands dropped into last slot (capacity {})",
            self.overflow_count,
            capacity
        );
    }

    /// Empties the list and resets every counter.
    pub fn clear(&mut self) {
        self.total_count = 0;
        self.segment_count = 0;
        self.overflow_count = 0;
    }

    /// The recorded commands in order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands[..self.total_count]
    }

    /// Iterates over the recorded commands in order.
    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands().iter()
    }

    /// Number of recorded commands, clip updates included.
    pub fn len(&self) -> usize {
        self.total_count
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Number of recorded segments.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Appends that landed after the list was full since the last clear.
    pub fn overflow_count(&self) -> usize {
        self.overflow_count
    }

    /// Maximum number of commands.
    pub fn capacity(&self) -> usize {
        self.commands.len()
    }

    pub fn is_full(&self) -> bool {
        self.total_count == self.commands.len()
    }
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands().iter()
    }
}
