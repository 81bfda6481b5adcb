use ndarray::Array2;

use crate::frame::{Frame, Star};

use super::config::EngineConfig;

/// Statistics for a single connected component.
#[derive(Clone, Debug)]
struct ComponentStats {
    /// Number of pixels in the component.
    area: usize,
    /// Bounding box: (min_row, max_row, min_col, max_col).
    bbox: (usize, usize, usize, usize),
}

/// Centroid every star-like spot in a frame.
///
/// Threshold mask -> connected components -> per-component intensity-weighted
/// centroid with rms elliptical radii and an instrument magnitude from the
/// summed flux. Components smaller than `min_spot_area` are rejected.
/// Results are ordered largest component first.
pub fn detect_stars(frame: &Frame, config: &EngineConfig) -> Vec<Star> {
    let (mean, std) = compute_mean_stddev(&frame.data);
    let threshold = (mean + config.detect_sigma as f64 * std) as f32;
    let mask = frame.data.mapv(|v| v > threshold);

    let components = connected_components(&mask);

    components
        .iter()
        .filter(|c| c.area >= config.min_spot_area)
        .filter_map(|c| centroid_component(&frame.data, &mask, c, mean as f32))
        .collect()
}

fn centroid_component(
    data: &Array2<f32>,
    mask: &Array2<bool>,
    component: &ComponentStats,
    background: f32,
) -> Option<Star> {
    let (min_row, max_row, min_col, max_col) = component.bbox;

    let mut flux = 0.0f64;
    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    for row in min_row..=max_row {
        for col in min_col..=max_col {
            if !mask[[row, col]] {
                continue;
            }
            let w = (data[[row, col]] - background).max(0.0) as f64;
            flux += w;
            sum_x += w * col as f64;
            sum_y += w * row as f64;
        }
    }
    if flux <= 0.0 {
        return None;
    }

    let cx = sum_x / flux;
    let cy = sum_y / flux;

    // Weighted second moments for the elliptical radii.
    let mut var_x = 0.0f64;
    let mut var_y = 0.0f64;
    for row in min_row..=max_row {
        for col in min_col..=max_col {
            if !mask[[row, col]] {
                continue;
            }
            let w = (data[[row, col]] - background).max(0.0) as f64;
            var_x += w * (col as f64 - cx).powi(2);
            var_y += w * (row as f64 - cy).powi(2);
        }
    }

    Some(Star {
        x: cx as f32,
        y: cy as f32,
        radius_x: ((var_x / flux).sqrt() as f32).max(0.5),
        radius_y: ((var_y / flux).sqrt() as f32).max(0.5),
        magnitude: -2.5 * (flux as f32).log10(),
    })
}

/// Compute mean and standard deviation of pixel values.
fn compute_mean_stddev(data: &Array2<f32>) -> (f64, f64) {
    let n = data.len() as f64;
    if n == 0.0 {
        return (0.0, 0.0);
    }
    let sum: f64 = data.iter().map(|&v| v as f64).sum();
    let mean = sum / n;
    let var: f64 = data.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// Perform connected component analysis on a binary mask using two-pass
/// labeling with union-find. Uses 4-connectivity (left and upper neighbors).
///
/// Returns component statistics ordered by area descending, bounding box as
/// the tie-break so the ordering is stable across runs.
fn connected_components(mask: &Array2<bool>) -> Vec<ComponentStats> {
    let (h, w) = mask.dim();
    if h == 0 || w == 0 {
        return Vec::new();
    }

    let mut labels = Array2::<u32>::zeros((h, w));
    let mut next_label: u32 = 1;
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: assign provisional labels.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let up = if row > 0 { labels[[row - 1, col]] } else { 0 };
            let left = if col > 0 { labels[[row, col - 1]] } else { 0 };

            match (up > 0, left > 0) {
                (false, false) => {
                    if next_label as usize >= parent.len() {
                        parent.resize(parent.len() * 2, 0);
                    }
                    parent[next_label as usize] = next_label;
                    labels[[row, col]] = next_label;
                    next_label += 1;
                }
                (true, false) => {
                    labels[[row, col]] = up;
                }
                (false, true) => {
                    labels[[row, col]] = left;
                }
                (true, true) => {
                    let smaller = up.min(left);
                    let larger = up.max(left);
                    labels[[row, col]] = smaller;
                    if smaller != larger {
                        union(&mut parent, smaller, larger);
                    }
                }
            }
        }
    }

    // Flatten parent references.
    for i in 1..next_label as usize {
        parent[i] = find(&parent, i as u32);
    }

    // Pass 2: resolve labels and collect stats.
    let mut stats_map = std::collections::HashMap::<u32, ComponentStats>::new();

    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            let root = parent[lbl as usize];

            let entry = stats_map.entry(root).or_insert(ComponentStats {
                area: 0,
                bbox: (row, row, col, col),
            });

            entry.area += 1;
            entry.bbox.0 = entry.bbox.0.min(row);
            entry.bbox.1 = entry.bbox.1.max(row);
            entry.bbox.2 = entry.bbox.2.min(col);
            entry.bbox.3 = entry.bbox.3.max(col);
        }
    }

    let mut components: Vec<ComponentStats> = stats_map.into_values().collect();
    components.sort_unstable_by(|a, b| b.area.cmp(&a.area).then(a.bbox.cmp(&b.bbox)));
    components
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge larger root into smaller root to keep labels consistent.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
