/// A camera pointing direction: right ascension, declination, and roll about
/// the boresight, all in degrees.
///
/// RA and roll wrap into [0, 360); declination clamps to [-90, 90].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub ra: f64,
    pub dec: f64,
    pub roll: f64,
}

impl Orientation {
    pub fn new(ra: f64, dec: f64, roll: f64) -> Self {
        Self {
            ra: wrap_degrees(ra),
            dec: dec.clamp(-90.0, 90.0),
            roll: wrap_degrees(roll),
        }
    }

    /// New orientation with `delta` degrees added to right ascension.
    pub fn offset_ra(&self, delta: f64) -> Self {
        Self::new(self.ra + delta, self.dec, self.roll)
    }

    /// New orientation with `delta` degrees added to declination.
    pub fn offset_dec(&self, delta: f64) -> Self {
        Self::new(self.ra, self.dec + delta, self.roll)
    }

    /// New orientation with `delta` degrees added to roll.
    pub fn offset_roll(&self, delta: f64) -> Self {
        Self::new(self.ra, self.dec, self.roll + delta)
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RA: {:.3} DE: {:.3} Roll: {:.3}",
            self.ra, self.dec, self.roll
        )
    }
}

fn wrap_degrees(mut v: f64) -> f64 {
    v %= 360.0;
    if v < 0.0 {
        v += 360.0;
    }
    v
}

/// Per-axis [min, max] orientation range for a sweep.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrientationRange {
    pub ra_min: f64,
    pub ra_max: f64,
    pub dec_min: f64,
    pub dec_max: f64,
    pub roll_min: f64,
    pub roll_max: f64,
}

impl OrientationRange {
    /// Collapse unset (zero) axis maxima onto the corresponding minimum, so a
    /// single fixed value sweeps trivially.
    pub fn normalized(&self) -> Self {
        let fix = |min: f64, max: f64| if max == 0.0 { min } else { max };
        Self {
            ra_min: self.ra_min,
            ra_max: fix(self.ra_min, self.ra_max),
            dec_min: self.dec_min,
            dec_max: fix(self.dec_min, self.dec_max),
            roll_min: self.roll_min,
            roll_max: fix(self.roll_min, self.roll_max),
        }
    }

    /// Orientation for frame `frame_index` of a `frame_count`-frame sweep,
    /// linearly interpolated per axis. A single-frame sweep sits at the
    /// minimum (t = 0).
    pub fn at(&self, frame_index: usize, frame_count: usize) -> Orientation {
        let r = self.normalized();
        let t = if frame_count <= 1 {
            0.0
        } else {
            frame_index as f64 / (frame_count - 1) as f64
        };
        let lerp = |min: f64, max: f64| min + t * (max - min);
        Orientation::new(
            lerp(r.ra_min, r.ra_max),
            lerp(r.dec_min, r.dec_max),
            lerp(r.roll_min, r.roll_max),
        )
    }

    /// Degenerate range holding a single target orientation on every axis.
    pub fn fixed(target: Orientation) -> Self {
        Self {
            ra_min: target.ra,
            ra_max: target.ra,
            dec_min: target.dec,
            dec_max: target.dec,
            roll_min: target.roll,
            roll_max: target.roll,
        }
    }
}
