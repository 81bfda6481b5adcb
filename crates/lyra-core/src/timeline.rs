use crate::error::{LyraError, Result};
use crate::frame::{Frame, FrameRecord};

/// One navigable position: a frame record paired with its loaded image.
///
/// Records and images only enter or leave the timeline together, so the two
/// can never drift out of alignment.
#[derive(Clone, Debug)]
pub struct TimelineEntry {
    pub record: FrameRecord,
    pub image: Frame,
}

/// The ordered, navigable frame sequence with a cursor.
///
/// Non-empty from construction onward; the cursor is always a valid index.
#[derive(Clone, Debug)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    cursor: usize,
}

impl Timeline {
    /// Build a timeline positioned at the first entry.
    pub fn new(entries: Vec<TimelineEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(LyraError::EmptyTimeline);
        }
        Ok(Self { entries, cursor: 0 })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &TimelineEntry {
        &self.entries[self.cursor]
    }

    pub fn entry(&self, index: usize) -> Option<&TimelineEntry> {
        self.entries.get(index)
    }

    /// Move the cursor forward, wrapping past the last entry.
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.entries.len();
    }

    /// Move the cursor backward, wrapping past the first entry.
    pub fn retreat(&mut self) {
        self.cursor = (self.cursor + self.entries.len() - 1) % self.entries.len();
    }

    /// Discard every entry after the cursor. Exploring a new direction from
    /// the middle of the timeline abandons the previously generated future.
    pub fn truncate_after_cursor(&mut self) {
        self.entries.truncate(self.cursor + 1);
    }

    /// Append an entry and move the cursor onto it.
    pub fn append(&mut self, entry: TimelineEntry) {
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }
}
