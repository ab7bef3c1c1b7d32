//! Percentile-based cleaning, clipping and scaling of sample arrays.
//!
//! Every transform in this crate goes through these primitives:
//! - [`clean_non_finite`] replaces NaN and infinities.
//! - [`PercentileClip`] clips to a low/high percentile window and rescales
//!   to [0, 1], with a configurable policy for near-constant input.
//! - [`SymmetricClip`] bounds values by a percentile of their magnitude.
//!
//! Percentiles use linear interpolation between the closest ranks.

use rayon::prelude::*;
use std::cmp::Ordering;

/// Minimum array length before cleaning runs in parallel
const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Added to magnitude bounds so a zero bound never divides.
pub const CLIP_EPSILON: f64 = 1e-6;

/// Floating point sample types the normalizers operate on.
pub trait Sample: Copy + PartialOrd + Send + Sync + Into<f64> {
    const ZERO: Self;

    fn from_f64(v: f64) -> Self;
    fn is_finite(self) -> bool;
    fn is_nan(self) -> bool;
    fn total_order(&self, other: &Self) -> Ordering;
}

impl Sample for f32 {
    const ZERO: Self = 0.0;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }
    #[inline]
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
    #[inline]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
    #[inline]
    fn total_order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Sample for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }
    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
    #[inline]
    fn total_order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

/// Replace NaN and -Infinity with zero and +Infinity with `pos_inf`.
pub fn clean_non_finite<T: Sample>(values: &mut [T], pos_inf: T) {
    let fix = |v: &mut T| {
        if !v.is_finite() {
            *v = if !v.is_nan() && *v > T::ZERO {
                pos_inf
            } else {
                T::ZERO
            };
        }
    };
    if values.len() >= PARALLEL_THRESHOLD {
        values.par_iter_mut().for_each(fix);
    } else {
        values.iter_mut().for_each(fix);
    }
}

/// The `p`-th percentile (0..=100) of `values`, or `None` when empty.
///
/// Values must already be clean; NaN sorts after every number here.
pub fn percentile<T: Sample>(values: &[T], p: f64) -> Option<f64> {
    let mut scratch = values.to_vec();
    percentile_in_place(&mut scratch, p)
}

/// Like [`percentile`] but reorders `values` instead of copying them.
pub fn percentile_in_place<T: Sample>(values: &mut [T], p: f64) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let frac = rank - lo as f64;

    let (_, lo_value, upper) = values.select_nth_unstable_by(lo, T::total_order);
    let lo_value: f64 = (*lo_value).into();
    if frac == 0.0 || upper.is_empty() {
        return Some(lo_value);
    }
    // Everything above the pivot is >= it, so the next rank is its minimum.
    let hi_value: f64 = upper
        .iter()
        .copied()
        .min_by(T::total_order)
        .map(Into::into)
        .unwrap_or(lo_value);
    Some(lo_value + (hi_value - lo_value) * frac)
}

/// Minimum and maximum of `values`, or `None` when empty.
pub fn min_max<T: Sample>(values: &[T]) -> Option<(T, T)> {
    let first = *values.first()?;
    Some(values.iter().fold((first, first), |(lo, hi), &v| {
        (
            if v < lo { v } else { lo },
            if v > hi { v } else { hi },
        )
    }))
}

/// What [`PercentileClip`] does when the percentile window collapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Window narrower than 1e-6: output a constant 0.5.
    MidGray,
    /// Window narrower than 1e-12: widen to `[min, max + 1e-6]` and carry
    /// on. Output is all zeros if even that cannot be represented.
    ExpandToMinMax,
}

/// Outcome of applying a [`PercentileClip`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipOutcome {
    /// Values were clipped to `[lo, hi]` and rescaled.
    Scaled { lo: f64, hi: f64 },
    /// Input was near-constant; values were filled with this constant.
    Filled(f64),
}

/// Percentile window clip followed by a linear rescale to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileClip {
    pub low: f64,
    pub high: f64,
    pub policy: DegeneratePolicy,
}

impl Default for PercentileClip {
    fn default() -> Self {
        Self {
            low: 2.0,
            high: 98.0,
            policy: DegeneratePolicy::MidGray,
        }
    }
}

impl PercentileClip {
    /// The clip used for elevation grids.
    pub fn terrain() -> Self {
        Self {
            policy: DegeneratePolicy::ExpandToMinMax,
            ..Self::default()
        }
    }

    /// Clean, clip and rescale `values` in place.
    pub fn apply<T: Sample>(&self, values: &mut [T]) -> ClipOutcome {
        clean_non_finite(values, T::ZERO);

        let mut scratch = values.to_vec();
        let (Some(mut lo), Some(mut hi)) = (
            percentile_in_place(&mut scratch, self.low),
            percentile_in_place(&mut scratch, self.high),
        ) else {
            return ClipOutcome::Filled(0.0);
        };

        match self.policy {
            DegeneratePolicy::MidGray => {
                if hi - lo < CLIP_EPSILON {
                    return fill(values, 0.5);
                }
            }
            DegeneratePolicy::ExpandToMinMax => {
                if hi - lo < 1e-12 {
                    if let Some((min, max)) = min_max(values) {
                        lo = Into::<f64>::into(min);
                        hi = Into::<f64>::into(max) + CLIP_EPSILON;
                    }
                }
                if hi - lo <= 0.0 {
                    return fill(values, 0.0);
                }
            }
        }

        let range = hi - lo;
        values.iter_mut().for_each(|v| {
            let x: f64 = (*v).into();
            *v = T::from_f64(((x - lo) / range).clamp(0.0, 1.0));
        });
        ClipOutcome::Scaled { lo, hi }
    }
}

fn fill<T: Sample>(values: &mut [T], constant: f64) -> ClipOutcome {
    values.fill(T::from_f64(constant));
    ClipOutcome::Filled(constant)
}

/// Symmetric clip around zero at a percentile of the absolute values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricClip {
    pub percentile: f64,
}

impl SymmetricClip {
    /// 98th percentile, used for density images.
    pub const DENSITY: SymmetricClip = SymmetricClip { percentile: 98.0 };
    /// 99th percentile, used for volume stacks.
    pub const VOLUME: SymmetricClip = SymmetricClip { percentile: 99.0 };

    /// `percentile(|values|) + 1e-6`. Values must already be clean.
    pub fn bound(&self, values: &[f32]) -> f64 {
        let mut magnitudes: Vec<f32> = values.iter().map(|v| v.abs()).collect();
        percentile_in_place(&mut magnitudes, self.percentile).unwrap_or(0.0) + CLIP_EPSILON
    }

    /// Clean, divide by the bound and clip to [-1, 1]. Returns the bound.
    pub fn scale_to_unit(&self, values: &mut [f32]) -> f64 {
        clean_non_finite(values, 0.0);
        let bound = self.bound(values);
        values.iter_mut().for_each(|v| {
            *v = (*v as f64 / bound).clamp(-1.0, 1.0) as f32;
        });
        bound
    }

    /// Clean and clip to [-bound, bound] without rescaling. Returns the bound.
    pub fn clip(&self, values: &mut [f32]) -> f64 {
        clean_non_finite(values, 0.0);
        let bound = self.bound(values);
        let b = bound as f32;
        values.iter_mut().for_each(|v| *v = v.clamp(-b, b));
        bound
    }
}
