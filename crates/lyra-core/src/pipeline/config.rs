use serde::{Deserialize, Serialize};

/// Fixed algorithm selections and camera parameters for synthetic frame
/// generation. These are configuration, not computed per frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Width and height of the square generated frames, in pixels.
    #[serde(default = "default_image_size")]
    pub image_size: usize,
    /// Horizontal field of view in degrees.
    #[serde(default = "default_fov_deg")]
    pub fov_deg: f64,
    /// Gaussian spot radius in pixels.
    #[serde(default = "default_spot_sigma")]
    pub spot_sigma: f32,
    /// Faintest catalog magnitude rendered into a frame.
    #[serde(default = "default_limiting_magnitude")]
    pub limiting_magnitude: f32,
    /// Centroiding threshold, in standard deviations above the frame mean.
    #[serde(default = "default_detect_sigma")]
    pub detect_sigma: f32,
    /// Minimum connected-component area (pixels) accepted as a star.
    #[serde(default = "default_min_spot_area")]
    pub min_spot_area: usize,
    /// Maximum centroid-to-projection distance (pixels) for identification.
    #[serde(default = "default_match_tolerance_px")]
    pub match_tolerance_px: f64,
    /// Minimum identified stars required to report a known attitude.
    #[serde(default = "default_min_matches")]
    pub min_matches: usize,
}

fn default_image_size() -> usize {
    1024
}
fn default_fov_deg() -> f64 {
    30.0
}
fn default_spot_sigma() -> f32 {
    1.6
}
fn default_limiting_magnitude() -> f32 {
    3.0
}
fn default_detect_sigma() -> f32 {
    4.0
}
fn default_min_spot_area() -> usize {
    3
}
fn default_match_tolerance_px() -> f64 {
    3.0
}
fn default_min_matches() -> usize {
    4
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            image_size: default_image_size(),
            fov_deg: default_fov_deg(),
            spot_sigma: default_spot_sigma(),
            limiting_magnitude: default_limiting_magnitude(),
            detect_sigma: default_detect_sigma(),
            min_spot_area: default_min_spot_area(),
            match_tolerance_px: default_match_tolerance_px(),
            min_matches: default_min_matches(),
        }
    }
}
