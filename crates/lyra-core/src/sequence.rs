use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::{LyraError, Result};
use crate::frame::FrameRecord;
use crate::image_io::{frame_image_path, save_png};
use crate::orientation::{Orientation, OrientationRange};
use crate::pipeline::config::EngineConfig;
use crate::pipeline::{compare_outputs, pipeline_input, Pipeline, SyntheticPipeline};

/// Generates one frame record per target orientation: runs the pipeline,
/// persists the rendered image, and packages the analysis.
///
/// Stateless between calls; the same index always writes the same image path,
/// so regeneration overwrites.
pub struct FrameGenerator {
    config: EngineConfig,
    pipeline: Arc<dyn Pipeline>,
    out_dir: PathBuf,
}

impl std::fmt::Debug for FrameGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameGenerator")
            .field("config", &self.config)
            .field("pipeline", &"<dyn Pipeline>")
            .field("out_dir", &self.out_dir)
            .finish()
    }
}

impl FrameGenerator {
    pub fn new(config: EngineConfig, pipeline: Arc<dyn Pipeline>, out_dir: &Path) -> Result<Self> {
        fs::create_dir_all(out_dir)?;
        Ok(Self {
            config,
            pipeline,
            out_dir: out_dir.to_path_buf(),
        })
    }

    /// Generator backed by the built-in synthetic pipeline.
    pub fn synthetic(config: EngineConfig, out_dir: &Path) -> Result<Self> {
        let pipeline = Arc::new(SyntheticPipeline::new(config.clone()));
        Self::new(config, pipeline, out_dir)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generate the frame record for one target orientation.
    ///
    /// A pipeline that yields zero outputs signals `EmptyPipelineResult`;
    /// the caller skips that index rather than inserting a placeholder.
    pub fn generate(&self, frame_index: usize, orientation: Orientation) -> Result<FrameRecord> {
        let inputs = pipeline_input(&self.config, orientation);
        let outputs = self.pipeline.run(&inputs);
        let Some(output) = outputs.first() else {
            return Err(LyraError::EmptyPipelineResult);
        };

        let image_path = frame_image_path(&self.out_dir, frame_index);
        save_png(&inputs[0].image, &image_path)?;

        compare_outputs(&inputs, &outputs, &self.config);

        Ok(FrameRecord {
            attitude: output.attitude,
            stars: output.stars.clone().unwrap_or_default(),
            correspondences: output.correspondences.clone().unwrap_or_default(),
            image_path,
        })
    }
}

/// Batch-generate a frame sequence across an orientation range.
///
/// Frames that fail to generate are skipped, not fatal: the returned sequence
/// keeps index order but may be shorter than `frame_count`.
pub fn sweep(
    generator: &FrameGenerator,
    range: &OrientationRange,
    frame_count: usize,
) -> Vec<FrameRecord> {
    let range = range.normalized();
    let mut records = Vec::with_capacity(frame_count);

    for frame_index in 0..frame_count {
        let orientation = range.at(frame_index, frame_count);
        match generator.generate(frame_index, orientation) {
            Ok(record) => records.push(record),
            Err(err) => debug!(frame_index, %err, "skipping frame"),
        }
    }

    records
}

/// Generate exactly one record at a single target orientation, for appending
/// to an existing sequence during interactive panning.
pub fn pan_step(
    generator: &FrameGenerator,
    frame_index: usize,
    target: Orientation,
) -> Result<FrameRecord> {
    generator.generate(frame_index, target)
}
