//! model/speedup.rs: closed-form parallel performance models.
//!
//! Scalar forms take plain `f64`; the `_array` forms apply the scalar form
//! cellwise after broadcasting their operands together, numpy style, so a
//! column against a row yields the full table. Nothing here guards
//! degenerate inputs: a zero denominator yields inf/NaN and is passed on.

use std::f64::consts::LN_2;

use ndarray::{Array, ArrayBase, ArrayView, Data, DimMax, Dimension, Zip};

/// Speedup of a 2^k-point computation under communication ratio `gamma` when
/// the work is split to depth `q`:
///
/// `F(gamma, q) = gamma (2^k - 1) / (2q + gamma (2^(k-q) - 1 + q))`
#[inline]
pub fn comm_ratio_speedup(gamma: f64, q: f64, k: u32) -> f64 {
    let n = 2f64.powi(k as i32);
    gamma * (n - 1.0) / (2.0 * q + gamma * (2f64.powf(k as f64 - q) - 1.0 + q))
}

/// Split depth maximising [`comm_ratio_speedup`] for a given `gamma` and `n = 2^k`.
#[inline]
pub fn optimal_q(gamma: f64, n: f64) -> f64 {
    (gamma * LN_2 * n / (2.0 + gamma)).log2()
}

/// Speedup with sequential fraction `f` when the parallel workload grows as
/// `p^delta`:
///
/// `S(p) = (f + (1-f) p^delta) / (f + (1-f) p^(delta-1))`
#[inline]
pub fn scaled_speedup(p: f64, f: f64, delta: f64) -> f64 {
    (f + (1.0 - f) * p.powf(delta)) / (f + (1.0 - f) * p.powf(delta - 1.0))
}

/// `E(p) = S(p) / p`.
#[inline]
pub fn scaled_efficiency(p: f64, f: f64, delta: f64) -> f64 {
    scaled_speedup(p, f, delta) / p
}

/// Shape two operands broadcast to: the higher of the two ranks.
pub type Broadcast<D1, D2> = <D1 as DimMax<D2>>::Output;

/// Length of `axis` (counted in a rank-`ndim` result) for an operand of
/// lower or equal rank. Missing leading axes count as length 1.
fn aligned_len(shape: &[usize], ndim: usize, axis: usize) -> usize {
    axis.checked_sub(ndim - shape.len()).map_or(1, |i| shape[i])
}

/// View both operands at their common broadcast shape.
///
/// Shapes are matched from the trailing axis; a length-1 axis stretches to
/// the other operand's length.
///
/// # Panics
/// If some axis differs in length and neither side is 1.
pub fn co_broadcast<'a, 'b, S1, S2, D1, D2>(
    a: &'a ArrayBase<S1, D1>,
    b: &'b ArrayBase<S2, D2>,
) -> (
    ArrayView<'a, f64, Broadcast<D1, D2>>,
    ArrayView<'b, f64, Broadcast<D1, D2>>,
)
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D1: Dimension + DimMax<D2>,
    D2: Dimension,
{
    let (sa, sb) = (a.shape(), b.shape());
    let ndim = sa.len().max(sb.len());
    let mut dim = <Broadcast<D1, D2> as Dimension>::zeros(ndim);
    for (axis, len) in dim.as_array_view_mut().iter_mut().enumerate() {
        *len = match (aligned_len(sa, ndim, axis), aligned_len(sb, ndim, axis)) {
            (la, lb) if la == lb => la,
            (1, lb) => lb,
            (la, 1) => la,
            _ => panic!("cannot broadcast shapes {sa:?} and {sb:?}"),
        };
    }
    match (a.broadcast(dim.clone()), b.broadcast(dim)) {
        (Some(av), Some(bv)) => (av, bv),
        _ => panic!("cannot broadcast shapes {sa:?} and {sb:?}"),
    }
}

/// [`comm_ratio_speedup`] over broadcast `gamma`/`q` cells.
///
/// # Panics
/// If the shapes do not broadcast together.
pub fn comm_ratio_speedup_array<S1, S2, D1, D2>(
    gamma: &ArrayBase<S1, D1>,
    q: &ArrayBase<S2, D2>,
    k: u32,
) -> Array<f64, Broadcast<D1, D2>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D1: Dimension + DimMax<D2>,
    D2: Dimension,
{
    let (gamma, q) = co_broadcast(gamma, q);
    Zip::from(gamma)
        .and(q)
        .map_collect(|&g, &q| comm_ratio_speedup(g, q, k))
}

pub fn optimal_q_array<S, D>(gamma: &ArrayBase<S, D>, n: f64) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    gamma.mapv(|g| optimal_q(g, n))
}

/// [`scaled_speedup`] over broadcast `p`/`delta` cells with a fixed `f`.
///
/// # Panics
/// If the shapes do not broadcast together.
pub fn scaled_speedup_array<S1, S2, D1, D2>(
    p: &ArrayBase<S1, D1>,
    f: f64,
    delta: &ArrayBase<S2, D2>,
) -> Array<f64, Broadcast<D1, D2>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D1: Dimension + DimMax<D2>,
    D2: Dimension,
{
    let (p, delta) = co_broadcast(p, delta);
    Zip::from(p)
        .and(delta)
        .map_collect(|&p, &d| scaled_speedup(p, f, d))
}

/// # Panics
/// If the shapes do not broadcast together.
pub fn scaled_efficiency_array<S1, S2, D1, D2>(
    p: &ArrayBase<S1, D1>,
    f: f64,
    delta: &ArrayBase<S2, D2>,
) -> Array<f64, Broadcast<D1, D2>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D1: Dimension + DimMax<D2>,
    D2: Dimension,
{
    let (p, delta) = co_broadcast(p, delta);
    Zip::from(p)
        .and(delta)
        .map_collect(|&p, &d| scaled_efficiency(p, f, d))
}
