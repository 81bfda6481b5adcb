use ndarray::Array2;
use rayon::prelude::*;

use crate::catalog::CatalogStar;
use crate::frame::Frame;
use crate::orientation::Orientation;

use super::config::EngineConfig;

/// Stars at or brighter than this magnitude render at full amplitude.
const SATURATION_MAGNITUDE: f32 = 0.5;

/// Spots contribute to pixels within this many sigmas of their center.
const SPOT_EXTENT_SIGMAS: f32 = 4.0;

pub(super) type Vec3 = [f64; 3];

pub(super) fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(super) fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(super) fn normalize(v: Vec3) -> Vec3 {
    let n = dot(v, v).sqrt();
    [v[0] / n, v[1] / n, v[2] / n]
}

/// Unit vector for a celestial position in degrees.
pub(super) fn unit_vector(ra_deg: f64, dec_deg: f64) -> Vec3 {
    let ra = ra_deg.to_radians();
    let dec = dec_deg.to_radians();
    [dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin()]
}

/// Orthonormal camera basis (right, up, forward) in inertial coordinates.
///
/// At roll 0, right points east (+RA) and up points north (+dec); roll
/// rotates right/up about the boresight.
#[derive(Clone, Copy, Debug)]
pub(super) struct CameraBasis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl CameraBasis {
    pub fn new(orientation: Orientation) -> Self {
        let ra = orientation.ra.to_radians();
        let dec = orientation.dec.to_radians();
        let roll = orientation.roll.to_radians();

        let forward = unit_vector(orientation.ra, orientation.dec);
        let east = [-ra.sin(), ra.cos(), 0.0];
        let north = [-dec.sin() * ra.cos(), -dec.sin() * ra.sin(), dec.cos()];

        let (sr, cr) = roll.sin_cos();
        let right = [
            cr * east[0] + sr * north[0],
            cr * east[1] + sr * north[1],
            cr * east[2] + sr * north[2],
        ];
        let up = [
            -sr * east[0] + cr * north[0],
            -sr * east[1] + cr * north[1],
            -sr * east[2] + cr * north[2],
        ];
        Self { right, up, forward }
    }
}

/// Focal length in pixels for a given frame size and field of view.
pub(super) fn focal_length_px(config: &EngineConfig) -> f64 {
    (config.image_size as f64 / 2.0) / (config.fov_deg.to_radians() / 2.0).tan()
}

/// A catalog star projected into image coordinates.
#[derive(Clone, Copy, Debug)]
pub struct ProjectedStar {
    /// Index into the catalog snapshot.
    pub catalog: usize,
    pub x: f64,
    pub y: f64,
    pub magnitude: f32,
}

/// Gnomonic projection of every catalog star that lands on the frame at the
/// given orientation, brightest first.
pub fn project_catalog(
    catalog: &[CatalogStar],
    orientation: Orientation,
    config: &EngineConfig,
) -> Vec<ProjectedStar> {
    let basis = CameraBasis::new(orientation);
    let focal = focal_length_px(config);
    let half = config.image_size as f64 / 2.0;

    let mut projected: Vec<ProjectedStar> = catalog
        .iter()
        .enumerate()
        .filter(|(_, star)| star.magnitude <= config.limiting_magnitude)
        .filter_map(|(index, star)| {
            let v = unit_vector(star.ra, star.dec);
            let depth = dot(v, basis.forward);
            // Behind the camera or outside a generous cone.
            if depth <= 0.2 {
                return None;
            }
            let x = half + focal * dot(v, basis.right) / depth;
            let y = half - focal * dot(v, basis.up) / depth;
            let margin = (SPOT_EXTENT_SIGMAS * config.spot_sigma) as f64;
            if x < -margin
                || y < -margin
                || x >= config.image_size as f64 + margin
                || y >= config.image_size as f64 + margin
            {
                return None;
            }
            Some(ProjectedStar {
                catalog: index,
                x,
                y,
                magnitude: star.magnitude,
            })
        })
        .collect();

    projected.sort_by(|a, b| a.magnitude.total_cmp(&b.magnitude));
    projected
}

/// Render projected stars as Gaussian spots on a black frame.
pub fn render_star_field(projected: &[ProjectedStar], config: &EngineConfig) -> Frame {
    let size = config.image_size;
    let sigma = config.spot_sigma;
    let extent = SPOT_EXTENT_SIGMAS * sigma;
    let inv_two_sigma_sq = 1.0 / (2.0 * sigma * sigma);

    let pixels: Vec<f32> = (0..size)
        .into_par_iter()
        .flat_map_iter(|row| {
            let y = row as f32;
            let near: Vec<&ProjectedStar> = projected
                .iter()
                .filter(|s| (s.y as f32 - y).abs() <= extent)
                .collect();
            (0..size).map(move |col| {
                let x = col as f32;
                let mut value = 0.0f32;
                for star in &near {
                    let dx = x - star.x as f32;
                    let dy = y - star.y as f32;
                    let d_sq = dx * dx + dy * dy;
                    if d_sq > extent * extent {
                        continue;
                    }
                    let amp = amplitude(star.magnitude);
                    value += amp * (-d_sq * inv_two_sigma_sq).exp();
                }
                value.min(1.0)
            })
        })
        .collect();

    let data = Array2::from_shape_vec((size, size), pixels)
        .expect("row-major pixel buffer matches frame dimensions");
    Frame::new(data)
}

/// Peak spot amplitude for a visual magnitude; bright stars saturate.
fn amplitude(magnitude: f32) -> f32 {
    10f32.powf(-0.4 * (magnitude - SATURATION_MAGNITUDE)).min(1.0)
}
