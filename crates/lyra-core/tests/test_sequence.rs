mod common;

use std::sync::Arc;

use lyra_core::error::LyraError;
use lyra_core::orientation::{Orientation, OrientationRange};
use lyra_core::sequence::{pan_step, sweep, FrameGenerator};

use common::{small_config, CannedPipeline, FailingPipeline};

fn generator(dir: &std::path::Path) -> FrameGenerator {
    FrameGenerator::new(small_config(), Arc::new(CannedPipeline), dir).unwrap()
}

#[test]
fn test_generate_writes_deterministic_image_path() {
    let dir = tempfile::tempdir().unwrap();
    let gen = generator(dir.path());

    let record = gen.generate(3, Orientation::new(10.0, 0.0, 0.0)).unwrap();
    assert_eq!(record.image_path, dir.path().join("frame_0003.png"));
    assert!(record.image_path.exists());
}

#[test]
fn test_generate_packages_pipeline_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let gen = generator(dir.path());

    let record = gen.generate(0, Orientation::new(0.0, 0.0, 0.0)).unwrap();
    assert_eq!(record.attitude, Some(Orientation::new(10.0, 20.0, 30.0)));
    assert_eq!(record.stars.len(), 3);
    assert_eq!(record.correspondences.len(), 2);
}

#[test]
fn test_regeneration_overwrites_the_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let gen = generator(dir.path());

    let first = gen.generate(1, Orientation::new(0.0, 0.0, 0.0)).unwrap();
    let second = gen.generate(1, Orientation::new(40.0, 0.0, 0.0)).unwrap();
    assert_eq!(first.image_path, second.image_path);
}

#[test]
fn test_generate_signals_empty_pipeline_result() {
    let dir = tempfile::tempdir().unwrap();
    let gen = FrameGenerator::new(
        small_config(),
        Arc::new(FailingPipeline::new(&[0])),
        dir.path(),
    )
    .unwrap();

    let err = gen
        .generate(0, Orientation::new(0.0, 0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, LyraError::EmptyPipelineResult), "got: {err}");
    assert!(!dir.path().join("frame_0000.png").exists());
}

#[test]
fn test_sweep_skips_failed_frames_and_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let gen = FrameGenerator::new(
        small_config(),
        Arc::new(FailingPipeline::new(&[2])),
        dir.path(),
    )
    .unwrap();

    let range = OrientationRange {
        ra_min: 0.0,
        ra_max: 40.0,
        ..Default::default()
    };
    let records = sweep(&gen, &range, 5);

    // Frame 2 is simply absent; the rest keep their relative order.
    assert_eq!(records.len(), 4);
    let paths: Vec<_> = records
        .iter()
        .map(|r| r.image_path.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "frame_0000.png",
            "frame_0001.png",
            "frame_0003.png",
            "frame_0004.png"
        ]
    );
}

#[test]
fn test_sweep_full_range_produces_every_frame() {
    let dir = tempfile::tempdir().unwrap();
    let gen = generator(dir.path());

    let range = OrientationRange {
        ra_min: 10.0,
        ..Default::default()
    };
    let records = sweep(&gen, &range, 3);
    assert_eq!(records.len(), 3);
}

#[test]
fn test_pan_step_generates_one_record() {
    let dir = tempfile::tempdir().unwrap();
    let gen = generator(dir.path());

    let record = pan_step(&gen, 7, Orientation::new(123.0, -10.0, 5.0)).unwrap();
    assert_eq!(record.image_path, dir.path().join("frame_0007.png"));
}
