use itertools::Itertools;
use num::Float;
use std::cmp::Ordering;
use strum_macros::Display;

/// Construction failures of [`LookupTable`] and [`GridTable`].
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum TableError {
    /// An axis has no breakpoints.
    Empty,
    /// Breakpoint `index` on `axis` is not strictly greater than its predecessor.
    NotStrictlyIncreasing { axis: usize, index: usize },
    /// The number of grid values does not match the product of the axis lengths.
    ShapeMismatch { expected: usize, actual: usize },
}

impl std::error::Error for TableError {}

/// Position of a query inside one breakpoint axis.
///
/// `lower` and `upper` are the bracketing breakpoint indices, `frac` the normalized
/// distance from `lower` towards `upper`. Queries at or beyond the axis ends (and `NaN`)
/// collapse onto the edge breakpoint with `frac == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bracket<T> {
    lower: usize,
    upper: usize,
    frac: T,
}

fn validate_axis<T: Float>(axis: &[T], axis_idx: usize) -> Result<(), TableError> {
    if axis.is_empty() {
        return Err(TableError::Empty);
    }
    if let Some(pos) =
        axis.iter().tuple_windows().position(|(a, b)| a.partial_cmp(b) != Some(Ordering::Less))
    {
        return Err(TableError::NotStrictlyIncreasing { axis: axis_idx, index: pos + 1 });
    }
    if axis.iter().any(|b| !b.is_finite()) {
        return Err(TableError::NotStrictlyIncreasing { axis: axis_idx, index: 0 });
    }
    Ok(())
}

fn bracket<T: Float>(axis: &[T], x: T) -> Bracket<T> {
    let last = axis.len() - 1;
    if x.is_nan() || x <= axis[0] {
        return Bracket { lower: 0, upper: 0, frac: T::zero() };
    }
    if x >= axis[last] {
        return Bracket { lower: last, upper: last, frac: T::zero() };
    }
    // axis[0] < x < axis[last], so the partition point lies in 1..=last
    let upper = axis.partition_point(|b| *b <= x);
    let lower = upper - 1;
    let frac = (x - axis[lower]) / (axis[upper] - axis[lower]);
    Bracket { lower, upper, frac }
}

/// One dimensional piecewise linear table over strictly increasing breakpoints.
///
/// Queries outside the breakpoint range are clamped to the first or last value,
/// the table never extrapolates.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable<T = f64> {
    breakpoints: Vec<T>,
    values: Vec<T>,
}

impl<T: Float> LookupTable<T> {
    /// Builds a table from `(breakpoint, value)` pairs.
    ///
    /// # Errors
    /// - [`TableError::Empty`] for an empty point list.
    /// - [`TableError::NotStrictlyIncreasing`] if the breakpoints are not strictly increasing.
    pub fn new(points: &[(T, T)]) -> Result<Self, TableError> {
        let (breakpoints, values): (Vec<T>, Vec<T>) = points.iter().copied().unzip();
        validate_axis(&breakpoints, 0)?;
        Ok(Self { breakpoints, values })
    }

    /// Evaluates the table at `x`.
    pub fn evaluate(&self, x: T) -> T {
        let b = bracket(&self.breakpoints, x);
        let y0 = self.values[b.lower];
        if b.lower == b.upper {
            return y0;
        }
        let y1 = self.values[b.upper];
        y0 + (y1 - y0) * b.frac
    }

    pub fn breakpoints(&self) -> &[T] { &self.breakpoints }

    pub fn values(&self) -> &[T] { &self.values }
}

/// `D`-dimensional table on a rectilinear grid, evaluated by multilinear interpolation.
///
/// Values are stored row major, the last axis varying fastest. Every axis clamps at its
/// edges independently, like [`LookupTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridTable<const D: usize, T = f64> {
    axes: [Vec<T>; D],
    strides: [usize; D],
    values: Vec<T>,
}

impl<const D: usize, T: Float> GridTable<D, T> {
    /// Builds a grid table from its breakpoint axes and row major values.
    ///
    /// # Errors
    /// - [`TableError::Empty`] if any axis has no breakpoints.
    /// - [`TableError::NotStrictlyIncreasing`] if any axis is not strictly increasing.
    /// - [`TableError::ShapeMismatch`] if `values` does not cover the full grid.
    pub fn new(axes: [Vec<T>; D], values: Vec<T>) -> Result<Self, TableError> {
        for (i, axis) in axes.iter().enumerate() {
            validate_axis(axis, i)?;
        }
        let mut strides = [1; D];
        for i in (0..D.saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * axes[i + 1].len();
        }
        let expected: usize = axes.iter().map(Vec::len).product();
        if values.len() != expected {
            return Err(TableError::ShapeMismatch { expected, actual: values.len() });
        }
        Ok(Self { axes, strides, values })
    }

    /// Evaluates the grid at `coords`, one coordinate per axis.
    pub fn evaluate(&self, coords: [T; D]) -> T {
        let mut brackets = [Bracket { lower: 0, upper: 0, frac: T::zero() }; D];
        for (i, b) in brackets.iter_mut().enumerate() {
            *b = bracket(&self.axes[i], coords[i]);
        }
        // bit `axis` of a corner number selects the upper breakpoint on that axis
        let mut corners: Vec<T> = (0..(1_usize << D))
            .map(|corner| {
                let index: usize = brackets
                    .iter()
                    .enumerate()
                    .map(|(axis, b)| {
                        let i = if corner & (1 << axis) == 0 { b.lower } else { b.upper };
                        i * self.strides[axis]
                    })
                    .sum();
                self.values[index]
            })
            .collect();
        // collapse one axis at a time so equal neighbours stay bit exact
        let mut len = corners.len();
        for b in &brackets {
            len /= 2;
            for k in 0..len {
                let (lo, hi) = (corners[2 * k], corners[2 * k + 1]);
                corners[k] = if b.lower == b.upper { lo } else { lo + (hi - lo) * b.frac };
            }
        }
        corners[0]
    }

    pub fn axis(&self, i: usize) -> &[T] { &self.axes[i] }
}
