use tracing::{debug, info, warn};

use crate::error::Result;
use crate::frame::FrameRecord;
use crate::image_io::load_png;
use crate::names::StarNames;
use crate::orientation::{Orientation, OrientationRange};
use crate::sequence::{pan_step, sweep, FrameGenerator};
use crate::timeline::{Timeline, TimelineEntry};

/// Right-ascension / declination step per extension command, degrees.
pub const RA_DEC_STEP_DEG: f64 = 2.0;
/// Roll step per roll-adjust command, degrees.
pub const ROLL_STEP_DEG: f64 = 5.0;

/// A discrete command into the session state machine, produced by the input
/// mapping layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionCommand {
    NextFrame,
    PrevFrame,
    AdjustRa(f64),
    AdjustDec(f64),
    AdjustRoll(f64),
}

/// Dense star -> catalog lookup for one frame record.
///
/// One slot per detected star; `None` means unmatched. Correspondence pairs
/// whose star index is out of range are ignored (malformed pipeline output).
pub fn rebuild_star_index(record: &FrameRecord) -> Vec<Option<usize>> {
    let mut index = vec![None; record.stars.len()];
    for pair in &record.correspondences {
        if pair.star < index.len() {
            index[pair.star] = Some(pair.catalog);
        }
    }
    index
}

/// The interactive debug session: owns the timeline, the orientation being
/// tracked across extensions, and the per-frame star index cache.
///
/// Everything here runs synchronously on the event-dispatch thread; an
/// extension blocks until the pipeline has produced the new frame.
#[derive(Debug)]
pub struct Session {
    timeline: Timeline,
    target: Orientation,
    generator: FrameGenerator,
    names: StarNames,
    star_index: Vec<Option<usize>>,
    revision: u64,
}

impl Session {
    /// Run one sweep, load every surviving frame image, and open the session
    /// at frame 0. Fails with `EmptyTimeline` when nothing survived; callers
    /// must not enter the interactive loop in that case.
    pub fn start(
        generator: FrameGenerator,
        range: &OrientationRange,
        frame_count: usize,
        names: StarNames,
    ) -> Result<Self> {
        let range = range.normalized();
        let records = sweep(&generator, &range, frame_count);

        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            match load_png(&record.image_path) {
                Ok(image) => entries.push(TimelineEntry { record, image }),
                // Record and image stand or fall together.
                Err(err) => warn!(%err, "dropping frame"),
            }
        }

        let timeline = Timeline::new(entries)?;
        // Where the sweep left off; extensions continue from here.
        let target = range.at(frame_count.saturating_sub(1), frame_count);
        let star_index = rebuild_star_index(&timeline.current().record);

        info!(frames = timeline.len(), "session started");
        Ok(Self {
            timeline,
            target,
            generator,
            names,
            star_index,
            revision: 0,
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn current(&self) -> &TimelineEntry {
        self.timeline.current()
    }

    pub fn star_index(&self) -> &[Option<usize>] {
        &self.star_index
    }

    pub fn names(&self) -> &StarNames {
        &self.names
    }

    pub fn target(&self) -> Orientation {
        self.target
    }

    /// Bumped on every completed navigation or extension; lets a renderer
    /// tell when its cached texture no longer shows the current entry.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Dispatch one command to completion.
    pub fn handle(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::NextFrame => {
                self.timeline.advance();
                self.refresh();
            }
            SessionCommand::PrevFrame => {
                self.timeline.retreat();
                self.refresh();
            }
            SessionCommand::AdjustRa(delta) => self.extend(self.target.offset_ra(delta)),
            SessionCommand::AdjustDec(delta) => self.extend(self.target.offset_dec(delta)),
            SessionCommand::AdjustRoll(delta) => self.extend(self.target.offset_roll(delta)),
        }
    }

    /// Generate one frame at `target` and make it the new end of the
    /// timeline, discarding any entries past the cursor.
    ///
    /// Record and image are committed as one atomic pair; on any failure the
    /// command is dropped and the session is left exactly as it was.
    fn extend(&mut self, target: Orientation) {
        let frame_index = self.timeline.cursor() + 1;

        let record = match pan_step(&self.generator, frame_index, target) {
            Ok(record) => record,
            Err(err) => {
                debug!(%err, "extend aborted");
                return;
            }
        };
        let image = match load_png(&record.image_path) {
            Ok(image) => image,
            Err(err) => {
                warn!(%err, "extend aborted");
                return;
            }
        };

        self.timeline.truncate_after_cursor();
        self.timeline.append(TimelineEntry { record, image });
        self.target = target;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.star_index = rebuild_star_index(&self.timeline.current().record);
        self.revision += 1;
    }
}
