//! Depth fog: splits the color gradient into three zones and maps integer
//! depth (view Z × 1000) to a palette index.
//!
//! - **Zone 1** (`fog_start..=fog_end`): object color fading into fog color
//! - **Zone 2** (`fog_end..=far_plane`): fog color fading into background
//! - **Zone 3** (beyond `far_plane`): flat background color

use crate::types::DEPTH_SCALE;

/// How many gradient entries each fog zone owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneCounts {
    pub near: usize,
    pub fog: usize,
    pub far: usize,
}

impl ZoneCounts {
    /// `near = fog = total / 3`, `far` takes the remainder, then each is
    /// raised to at least 2 (in that order).
    ///
    /// For `total < 6` the clamped counts can sum to more than `total`.
    pub fn split(total: usize) -> Self {
        let mut near = total / 3;
        let mut fog = total / 3;
        let mut far = total.saturating_sub(near + fog);

        if near < 2 {
            near = 2;
        }
        if fog < 2 {
            fog = 2;
        }
        if far < 2 {
            far = 2;
        }

        Self { near, fog, far }
    }

    pub fn sum(&self) -> usize {
        self.near + self.fog + self.far
    }
}

/// Precomputed fog thresholds for the raster inner loop.
#[derive(Debug, Clone, PartialEq)]
pub struct FogModel {
    gradient_steps: usize,
    fog_exp: f64,
    zones: ZoneCounts,

    fog_start_i: f64,
    fog_end_i: f64,
    far_plane_i: f64,
    zone1_span: f64,
    zone2_span: f64,
}

impl FogModel {
    pub fn new(
        gradient_steps: usize,
        fog_start: f64,
        fog_end: f64,
        far_plane: f64,
        fog_exp: f64,
    ) -> Self {
        let zones = ZoneCounts::split(gradient_steps);

        let fog_start_i = fog_start * DEPTH_SCALE;
        let fog_end_i = fog_end * DEPTH_SCALE;
        let far_plane_i = far_plane * DEPTH_SCALE;

        let mut zone1_span = fog_end_i - fog_start_i;
        let mut zone2_span = far_plane_i - fog_end_i;
        if zone1_span <= 0.0 {
            zone1_span = 1.0;
        }
        if zone2_span <= 0.0 {
            zone2_span = 1.0;
        }

        Self {
            gradient_steps,
            fog_exp,
            zones,
            fog_start_i,
            fog_end_i,
            far_plane_i,
            zone1_span,
            zone2_span,
        }
    }

    pub fn gradient_steps(&self) -> usize {
        self.gradient_steps
    }

    pub fn zones(&self) -> ZoneCounts {
        self.zones
    }

    pub fn fog_exp(&self) -> f64 {
        self.fog_exp
    }

    /// Palette index for a depth in buffer units.
    pub fn color_index(&self, depth: f64) -> usize {
        if depth <= self.fog_start_i {
            return 0;
        }

        if depth <= self.fog_end_i {
            let max_idx = self.zones.near - 1;
            return match self.shaped((depth - self.fog_start_i) / self.zone1_span) {
                Some(rel) => scaled_index(rel, max_idx).min(max_idx),
                None => 0,
            };
        }

        if depth <= self.far_plane_i {
            let base = self.zones.near;
            let max_off = self.zones.fog - 1;
            return match self.shaped((depth - self.fog_end_i) / self.zone2_span) {
                Some(rel) => base + scaled_index(rel, max_off).min(max_off),
                None => 0,
            };
        }

        self.gradient_steps.saturating_sub(1)
    }

    /// Apply the fog curve. `None` when the result is not a finite number.
    #[inline]
    fn shaped(&self, rel: f64) -> Option<f64> {
        let v = rel.powf(self.fog_exp);
        v.is_finite().then_some(v)
    }
}

/// `floor(rel * max)` clamped at 0 from below.
#[inline]
fn scaled_index(rel: f64, max: usize) -> usize {
    let v = (rel * max as f64).floor();
    if v <= 0.0 {
        0
    } else {
        v as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(steps: usize, exp: f64) -> FogModel {
        FogModel::new(steps, 3.0, 80.0, 150.0, exp)
    }

    #[test]
    fn zone_split_for_default_steps() {
        assert_eq!(
            ZoneCounts::split(12),
            ZoneCounts {
                near: 4,
                fog: 4,
                far: 4
            }
        );
        assert_eq!(
            ZoneCounts::split(15),
            ZoneCounts {
                near: 5,
                fog: 5,
                far: 5
            }
        );
        assert_eq!(
            ZoneCounts::split(8),
            ZoneCounts {
                near: 2,
                fog: 2,
                far: 4
            }
        );
    }

    #[test]
    fn zone_split_sums_exactly_in_supported_range() {
        for steps in 6..=30 {
            let z = ZoneCounts::split(steps);
            assert!(z.near >= 2 && z.fog >= 2 && z.far >= 2, "steps={steps}");
            assert_eq!(z.sum(), steps, "steps={steps}");
        }
    }

    #[test]
    fn zone_split_clamp_quirk_below_range() {
        // 4 -> 1,1,2 -> clamped 2,2,2 (sum 6 > 4).
        assert_eq!(ZoneCounts::split(4).sum(), 6);
        assert_eq!(ZoneCounts::split(0).sum(), 6);
    }

    #[test]
    fn near_depths_map_to_object_color() {
        let fog = model(12, 0.6);
        assert_eq!(fog.color_index(0.0), 0);
        assert_eq!(fog.color_index(-10.0), 0);
        assert_eq!(fog.color_index(3000.0), 0);
    }

    #[test]
    fn beyond_far_plane_maps_to_last_index() {
        let fog = model(12, 0.6);
        assert_eq!(fog.color_index(150_000.1), 11);
        assert_eq!(fog.color_index(1e9), 11);
    }

    #[test]
    fn zone_boundaries() {
        let fog = model(12, 1.0);
        // End of zone 1 is its last entry.
        assert_eq!(fog.color_index(80_000.0), 3);
        // Just past fog_end starts zone 2.
        assert_eq!(fog.color_index(80_000.5), 4);
        // End of zone 2 is its last entry.
        assert_eq!(fog.color_index(150_000.0), 7);
    }

    #[test]
    fn indices_are_monotonic_in_depth() {
        for exp in [0.3, 0.6, 1.0, 2.5] {
            let fog = model(15, exp);
            let mut last = 0;
            let mut d = 0.0;
            while d < 200_000.0 {
                let idx = fog.color_index(d);
                assert!(idx >= last, "exp={exp} d={d}");
                assert!(idx < 15);
                last = idx;
                d += 250.0;
            }
        }
    }

    #[test]
    fn small_exponent_thickens_fog_early() {
        let linear = model(30, 1.0);
        let curved = model(30, 0.3);
        let d = 10_000.0;
        assert!(curved.color_index(d) > linear.color_index(d));
    }

    #[test]
    fn non_finite_curve_degrades_to_zero() {
        // rel < 1 raised to -inf is +inf.
        let fog = model(12, f64::NEG_INFINITY);
        assert_eq!(fog.color_index(10_000.0), 0);
        assert_eq!(fog.color_index(100_000.0), 0);

        let fog = model(12, f64::NAN);
        assert_eq!(fog.color_index(10_000.0), 0);
        assert_eq!(fog.color_index(100_000.0), 0);
    }

    #[test]
    fn collapsed_spans_do_not_divide_by_zero() {
        let fog = FogModel::new(12, 10.0, 5.0, 1.0, 1.0);
        for d in [0.0, 5_000.0, 10_000.0, 10_000.5, 20_000.0] {
            let idx = fog.color_index(d);
            assert!(idx < 12);
        }
        assert_eq!(fog.color_index(20_000.0), 11);
    }
}
