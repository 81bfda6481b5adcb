use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::Array2;

use lyra_core::catalog;
use lyra_core::frame::{Correspondence, Frame, FrameRecord, Star};
use lyra_core::orientation::Orientation;
use lyra_core::pipeline::config::EngineConfig;
use lyra_core::pipeline::{Pipeline, PipelineInput, PipelineOutput};
use lyra_core::timeline::TimelineEntry;

/// Engine config small enough to render quickly in tests.
pub fn small_config() -> EngineConfig {
    EngineConfig {
        image_size: 64,
        spot_sigma: 1.2,
        min_spot_area: 2,
        match_tolerance_px: 2.0,
        ..Default::default()
    }
}

pub fn star(x: f32, y: f32) -> Star {
    Star {
        x,
        y,
        radius_x: 1.0,
        radius_y: 1.0,
        magnitude: 3.0,
    }
}

/// Analysis every stub pipeline reports: three stars, of which the first and
/// third are identified.
pub fn canned_output() -> PipelineOutput {
    PipelineOutput {
        attitude: Some(Orientation::new(10.0, 20.0, 30.0)),
        stars: Some(vec![star(10.0, 10.0), star(30.0, 40.0), star(50.0, 20.0)]),
        correspondences: Some(vec![
            Correspondence { star: 0, catalog: 5 },
            Correspondence { star: 2, catalog: 9 },
        ]),
        catalog: catalog::bright_stars(),
    }
}

/// Stub pipeline returning one canned output per input.
pub struct CannedPipeline;

impl Pipeline for CannedPipeline {
    fn run(&self, inputs: &[PipelineInput]) -> Vec<PipelineOutput> {
        inputs.iter().map(|_| canned_output()).collect()
    }
}

/// Stub pipeline yielding zero outputs on selected calls (0-based counter),
/// canned outputs otherwise.
pub struct FailingPipeline {
    fail_calls: Vec<usize>,
    calls: AtomicUsize,
}

impl FailingPipeline {
    pub fn new(fail_calls: &[usize]) -> Self {
        Self {
            fail_calls: fail_calls.to_vec(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl Pipeline for FailingPipeline {
    fn run(&self, inputs: &[PipelineInput]) -> Vec<PipelineOutput> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_calls.contains(&call) {
            Vec::new()
        } else {
            inputs.iter().map(|_| canned_output()).collect()
        }
    }
}

/// Timeline entry with a blank image and a record tagged by path index.
pub fn blank_entry(tag: usize) -> TimelineEntry {
    TimelineEntry {
        record: FrameRecord {
            attitude: None,
            stars: Vec::new(),
            correspondences: Vec::new(),
            image_path: format!("frame_{tag:04}.png").into(),
        },
        image: Frame::new(Array2::zeros((4, 4))),
    }
}
