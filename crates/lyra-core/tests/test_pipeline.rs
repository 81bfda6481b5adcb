use approx::assert_abs_diff_eq;
use lyra_core::catalog;
use lyra_core::orientation::Orientation;
use lyra_core::pipeline::config::EngineConfig;
use lyra_core::pipeline::{
    detect_stars, pipeline_input, project_catalog, render_star_field, Pipeline, ProjectedStar,
    SyntheticPipeline,
};

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[test]
fn test_boresight_star_projects_to_image_center() {
    let config = EngineConfig::default();
    let stars = catalog::bright_stars();

    // Point straight at Sirius (catalog index 0).
    let orientation = Orientation::new(101.287, -16.716, 0.0);
    let projected = project_catalog(&stars, orientation, &config);

    let sirius = projected
        .iter()
        .find(|p| p.catalog == 0)
        .expect("Sirius should be in the frame");
    assert_abs_diff_eq!(sirius.x, 512.0, epsilon = 1e-6);
    assert_abs_diff_eq!(sirius.y, 512.0, epsilon = 1e-6);
}

#[test]
fn test_projection_is_ordered_brightest_first() {
    let config = EngineConfig::default();
    let stars = catalog::bright_stars();
    let projected = project_catalog(&stars, Orientation::new(85.0, 0.0, 0.0), &config);

    assert!(projected.len() >= 2);
    for pair in projected.windows(2) {
        assert!(pair[0].magnitude <= pair[1].magnitude);
    }
}

#[test]
fn test_projection_respects_limiting_magnitude() {
    let config = EngineConfig {
        limiting_magnitude: 0.0,
        ..Default::default()
    };
    let stars = catalog::bright_stars();
    let projected = project_catalog(&stars, Orientation::new(85.0, 0.0, 0.0), &config);

    // Orion's belt is fainter than magnitude 0; nothing there survives.
    assert!(projected.iter().all(|p| p.magnitude <= 0.0));
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

fn detection_config() -> EngineConfig {
    EngineConfig {
        image_size: 64,
        spot_sigma: 1.5,
        min_spot_area: 2,
        ..Default::default()
    }
}

#[test]
fn test_detect_recovers_rendered_spot_centroids() {
    let config = detection_config();
    let spots = [
        ProjectedStar {
            catalog: 0,
            x: 20.0,
            y: 30.0,
            magnitude: 0.0,
        },
        ProjectedStar {
            catalog: 1,
            x: 45.0,
            y: 12.0,
            magnitude: 1.0,
        },
    ];
    let frame = render_star_field(&spots, &config);
    let stars = detect_stars(&frame, &config);

    assert_eq!(stars.len(), 2);
    // Largest (brightest) spot comes first.
    assert_abs_diff_eq!(stars[0].x as f64, 20.0, epsilon = 0.5);
    assert_abs_diff_eq!(stars[0].y as f64, 30.0, epsilon = 0.5);
    assert_abs_diff_eq!(stars[1].x as f64, 45.0, epsilon = 0.5);
    assert_abs_diff_eq!(stars[1].y as f64, 12.0, epsilon = 0.5);
}

#[test]
fn test_detect_empty_frame_finds_nothing() {
    let config = detection_config();
    let frame = render_star_field(&[], &config);
    assert!(detect_stars(&frame, &config).is_empty());
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[test]
fn test_pipeline_input_is_a_single_item() {
    let config = EngineConfig {
        image_size: 64,
        ..Default::default()
    };
    let inputs = pipeline_input(&config, Orientation::new(85.0, 0.0, 0.0));
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].image.width(), 64);
}

#[test]
fn test_synthetic_pipeline_recovers_the_generation_attitude() {
    let config = EngineConfig {
        image_size: 256,
        ..Default::default()
    };
    let pipeline = SyntheticPipeline::new(config.clone());

    // Orion: six catalog stars land in a 30 degree frame at (85, 0).
    let requested = Orientation::new(85.0, 0.0, 0.0);
    let inputs = pipeline_input(&config, requested);
    let outputs = pipeline.run(&inputs);
    assert_eq!(outputs.len(), 1);

    let output = &outputs[0];
    let stars = output.stars.as_ref().unwrap();
    let pairs = output.correspondences.as_ref().unwrap();
    assert!(stars.len() >= 4, "detected only {} stars", stars.len());
    assert!(pairs.len() >= 4, "identified only {} stars", pairs.len());

    let attitude = output.attitude.expect("attitude should be known");
    assert_abs_diff_eq!(attitude.ra, 85.0, epsilon = 0.5);
    assert_abs_diff_eq!(attitude.dec, 0.0, epsilon = 0.5);
    assert!(
        attitude.roll < 1.0 || attitude.roll > 359.0,
        "roll should be near zero, got {}",
        attitude.roll
    );
}

#[test]
fn test_correspondences_reference_valid_indices() {
    let config = EngineConfig {
        image_size: 256,
        ..Default::default()
    };
    let pipeline = SyntheticPipeline::new(config.clone());
    let inputs = pipeline_input(&config, Orientation::new(85.0, 0.0, 0.0));
    let output = &pipeline.run(&inputs)[0];

    let stars = output.stars.as_ref().unwrap();
    for pair in output.correspondences.as_ref().unwrap() {
        assert!(pair.star < stars.len());
        assert!(pair.catalog < output.catalog.len());
    }
}

#[test]
fn test_sparse_sky_reports_unknown_attitude() {
    // Shrink the field of view until no stars are visible.
    let config = EngineConfig {
        image_size: 64,
        fov_deg: 1.0,
        ..Default::default()
    };
    let pipeline = SyntheticPipeline::new(config.clone());

    // An empty patch near the south galactic cap.
    let inputs = pipeline_input(&config, Orientation::new(50.0, -30.0, 0.0));
    let output = &pipeline.run(&inputs)[0];

    assert!(output.attitude.is_none());
    assert!(output.correspondences.as_ref().unwrap().is_empty());
}
