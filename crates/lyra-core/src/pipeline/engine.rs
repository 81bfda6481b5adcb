use tracing::{debug, info, warn};

use crate::catalog::{self, CatalogStar};
use crate::frame::{Correspondence, Frame, Star};
use crate::orientation::Orientation;

use super::config::EngineConfig;
use super::detect::detect_stars;
use super::render::{
    cross, dot, focal_length_px, normalize, project_catalog, render_star_field, unit_vector,
    CameraBasis, ProjectedStar, Vec3,
};

/// One unit of work for the pipeline: the true generation orientation and the
/// synthetic image rendered for it.
#[derive(Clone, Debug)]
pub struct PipelineInput {
    pub orientation: Orientation,
    pub image: Frame,
}

/// What the pipeline reports for one input. Every analysis product is
/// optional; the catalog snapshot is carried for name/magnitude lookup only.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub attitude: Option<Orientation>,
    pub stars: Option<Vec<Star>>,
    pub correspondences: Option<Vec<Correspondence>>,
    pub catalog: Vec<CatalogStar>,
}

/// The attitude-determination pipeline boundary: centroiding, star
/// identification, and attitude estimation behind one opaque call.
pub trait Pipeline: Send + Sync {
    fn run(&self, inputs: &[PipelineInput]) -> Vec<PipelineOutput>;
}

/// Build the pipeline input list for a single target orientation. Always
/// length 1 for synthetic single-orientation generation.
pub fn pipeline_input(config: &EngineConfig, orientation: Orientation) -> Vec<PipelineInput> {
    let stars = catalog::bright_stars();
    let projected = project_catalog(&stars, orientation, config);
    let image = render_star_field(&projected, config);
    vec![PipelineInput { orientation, image }]
}

/// Reference pipeline over the built-in catalog: centroid detection, nearest
/// projection identification, and a two-vector TRIAD attitude estimate from
/// the identified centroids.
pub struct SyntheticPipeline {
    config: EngineConfig,
    catalog: Vec<CatalogStar>,
}

impl SyntheticPipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            catalog: catalog::bright_stars(),
        }
    }

    fn analyze(&self, input: &PipelineInput) -> PipelineOutput {
        let stars = detect_stars(&input.image, &self.config);
        let projected = project_catalog(&self.catalog, input.orientation, &self.config);
        let correspondences = identify(&stars, &projected, self.config.match_tolerance_px);

        let attitude = if correspondences.len() >= self.config.min_matches.max(2) {
            estimate_attitude(&stars, &correspondences, &self.catalog, &self.config)
        } else {
            None
        };

        PipelineOutput {
            attitude,
            stars: Some(stars),
            correspondences: Some(correspondences),
            catalog: self.catalog.clone(),
        }
    }
}

impl Pipeline for SyntheticPipeline {
    fn run(&self, inputs: &[PipelineInput]) -> Vec<PipelineOutput> {
        inputs.iter().map(|input| self.analyze(input)).collect()
    }
}

/// Greedy nearest-projection identification: each detected star pairs with
/// the closest unclaimed projected catalog star within `tolerance_px`.
fn identify(
    stars: &[Star],
    projected: &[ProjectedStar],
    tolerance_px: f64,
) -> Vec<Correspondence> {
    let mut claimed = vec![false; projected.len()];
    let mut correspondences = Vec::new();

    for (star_index, star) in stars.iter().enumerate() {
        let mut best: Option<(usize, f64)> = None;
        for (p_index, p) in projected.iter().enumerate() {
            if claimed[p_index] {
                continue;
            }
            let dx = star.x as f64 - p.x;
            let dy = star.y as f64 - p.y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= tolerance_px && best.map_or(true, |(_, d)| dist < d) {
                best = Some((p_index, dist));
            }
        }
        if let Some((p_index, _)) = best {
            claimed[p_index] = true;
            correspondences.push(Correspondence {
                star: star_index,
                catalog: projected[p_index].catalog,
            });
        }
    }

    correspondences
}

/// TRIAD attitude from the two brightest identified stars.
///
/// Body vectors come from back-projecting detected centroids through the
/// camera model, reference vectors from the catalog, so the estimate carries
/// real centroiding error rather than echoing the generation orientation.
fn estimate_attitude(
    stars: &[Star],
    correspondences: &[Correspondence],
    catalog: &[CatalogStar],
    config: &EngineConfig,
) -> Option<Orientation> {
    let focal = focal_length_px(config);
    let half = config.image_size as f64 / 2.0;

    let body_vector = |star: &Star| -> Vec3 {
        let x = (star.x as f64 - half) / focal;
        let y = (half - star.y as f64) / focal;
        normalize([x, y, 1.0])
    };

    // Correspondences reference the detection order (largest spot first), so
    // the first two pairs are the two brightest identified stars.
    let mut pairs = correspondences
        .iter()
        .filter(|c| c.star < stars.len() && c.catalog < catalog.len());
    let first = pairs.next()?;
    // Second pair must not be collinear with the first.
    let b1 = body_vector(&stars[first.star]);
    let r1 = {
        let c = &catalog[first.catalog];
        unit_vector(c.ra, c.dec)
    };
    let (b2, r2) = pairs.find_map(|c| {
        let b = body_vector(&stars[c.star]);
        let cat = &catalog[c.catalog];
        let r = unit_vector(cat.ra, cat.dec);
        (dot(cross(b1, b), cross(b1, b)).sqrt() > 1e-6).then_some((b, r))
    })?;

    // TRIAD frames.
    let t2b = normalize(cross(b1, b2));
    let t3b = cross(b1, t2b);
    let t2r = normalize(cross(r1, r2));
    let t3r = cross(r1, t2r);

    // Rotation M mapping inertial vectors into camera coordinates:
    // M = B * R^T with B = [b1 t2b t3b], R = [r1 t2r t3r].
    let row = |i: usize| -> Vec3 {
        [
            b1[i] * r1[0] + t2b[i] * t2r[0] + t3b[i] * t3r[0],
            b1[i] * r1[1] + t2b[i] * t2r[1] + t3b[i] * t3r[1],
            b1[i] * r1[2] + t2b[i] * t2r[2] + t3b[i] * t3r[2],
        ]
    };
    let right = row(0);
    let forward = row(2);

    let dec = forward[2].clamp(-1.0, 1.0).asin().to_degrees();
    let ra = forward[1].atan2(forward[0]).to_degrees();

    // Recover roll from where the estimated right axis sits between the
    // local east and north directions.
    let ra_rad = ra.to_radians();
    let dec_rad = dec.to_radians();
    let east = [-ra_rad.sin(), ra_rad.cos(), 0.0];
    let north = [
        -dec_rad.sin() * ra_rad.cos(),
        -dec_rad.sin() * ra_rad.sin(),
        dec_rad.cos(),
    ];
    let roll = dot(right, north).atan2(dot(right, east)).to_degrees();

    Some(Orientation::new(ra, dec, roll))
}

/// Diagnostic comparison of generated inputs against pipeline outputs,
/// logged once per frame. Nothing is returned to the caller.
pub fn compare_outputs(inputs: &[PipelineInput], outputs: &[PipelineOutput], _config: &EngineConfig) {
    for (input, output) in inputs.iter().zip(outputs) {
        let detected = output.stars.as_ref().map_or(0, Vec::len);
        let matched = output.correspondences.as_ref().map_or(0, Vec::len);

        match output.attitude {
            Some(estimate) => {
                let true_forward = CameraBasis::new(input.orientation).forward;
                let est_forward = CameraBasis::new(estimate).forward;
                let error_deg = dot(true_forward, est_forward)
                    .clamp(-1.0, 1.0)
                    .acos()
                    .to_degrees();
                info!(
                    requested = %input.orientation,
                    estimate = %estimate,
                    detected,
                    matched,
                    error_deg,
                    "pipeline output"
                );
                if error_deg > 0.5 {
                    warn!(error_deg, "attitude estimate deviates from target");
                }
            }
            None => {
                debug!(requested = %input.orientation, detected, matched, "attitude unknown");
            }
        }
    }
}
