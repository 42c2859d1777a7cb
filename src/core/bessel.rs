//! Bessel functions of the first kind (integer order) and their positive zeros.
//!
//! J_n(x) = (1/2π) ∫₀^{2π} cos(nτ − x·sin τ) dτ.
//!
//! The integrand is periodic, so the N-point trapezoidal rule is exact up to
//! the aliased terms J_{N−n}(x) + J_{N+n}(x). Those vanish faster than any
//! power once N − n exceeds |x| by a few multiples of |x|^(1/3), which sets
//! the node count below.
//!
//! Zeros are bracketed by a forward sign-change scan and refined by
//! bisection. J_n has no zero in (0, n], and consecutive zeros are never
//! closer than j_{0,2} − j_{0,1} ≈ 3.115, so a half-unit step sees each
//! zero exactly once.
//!
//! Before scanning, the requested zero is checked against the lower bound
//! j_{n,m} > max(n + 3(m − 1), π(m − 1/4)). A zero that provably lies past
//! `max_argument` fails at once instead of after a full scan.

use std::f64::consts::PI;

use crate::core::special::{NumericalFailure, SpecialFunctions};

const SCAN_STEP: f64 = 0.5;
/// Lower bound on the gap between consecutive zeros of any J_n.
const MIN_ZERO_GAP: f64 = 3.0;

/// Default [`SpecialFunctions`] implementation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BesselSolver {
    /// Relative bracket width at which a zero counts as converged.
    pub tolerance: f64,
    /// Bisection budget per zero.
    pub max_iterations: u32,
    /// Largest |x| accepted by the evaluator and the zero scan.
    pub max_argument: f64,
}

impl Default for BesselSolver {
    fn default() -> Self {
        Self {
            tolerance: 1e-14,
            max_iterations: 100,
            max_argument: 1.0e4,
        }
    }
}

impl BesselSolver {
    /// Trapezoid nodes needed for J_n(x) to reach double precision.
    fn node_count(order: u32, ax: f64) -> usize {
        let n = order as f64 + ax + 16.0 * (ax + 1.0).cbrt() + 32.0;
        n.ceil() as usize
    }

    /// Guaranteed lower bound on the `count`-th positive zero of J_n.
    pub fn zero_lower_bound(order: u32, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        let m = count as f64;
        (order as f64 + MIN_ZERO_GAP * (m - 1.0)).max(PI * (m - 0.25))
    }

    /// First `count` positive zeros of the function `j`, which must be J_n.
    ///
    /// Shared by every provider that evaluates J_n itself but wants the
    /// same bracketing and failure rules.
    pub fn find_zeros<F>(&self, order: u32, count: usize, j: F) -> Result<Vec<f64>, NumericalFailure>
    where
        F: Fn(f64) -> Result<f64, NumericalFailure>,
    {
        if Self::zero_lower_bound(order, count) > self.max_argument {
            return Err(NumericalFailure::ZeroSearchExhausted {
                order,
                found: 0,
                requested: count,
                limit: self.max_argument,
            });
        }
        let reachable = ((self.max_argument - order as f64) / MIN_ZERO_GAP).max(0.0) as usize + 1;
        let mut zeros = Vec::with_capacity(count.min(reachable));

        let mut a = order as f64;
        let mut fa = if a <= self.max_argument { j(a)? } else { 0.0 };

        while zeros.len() < count {
            let b = a + SCAN_STEP;
            if b > self.max_argument {
                return Err(NumericalFailure::ZeroSearchExhausted {
                    order,
                    found: zeros.len(),
                    requested: count,
                    limit: self.max_argument,
                });
            }
            let fb = j(b)?;

            if fb == 0.0 {
                zeros.push(b);
            } else if fa != 0.0 && fa.is_sign_negative() != fb.is_sign_negative() {
                zeros.push(self.bisect(order, a, b, fa, &j)?);
            }

            a = b;
            fa = fb;
        }

        Ok(zeros)
    }

    fn bisect<F>(&self, order: u32, mut a: f64, mut b: f64, mut fa: f64, j: &F) -> Result<f64, NumericalFailure>
    where
        F: Fn(f64) -> Result<f64, NumericalFailure>,
    {
        for _ in 0..self.max_iterations {
            let mid = 0.5 * (a + b);
            if b - a <= self.tolerance * mid.abs().max(1.0) || mid == a || mid == b {
                return Ok(mid);
            }
            let fm = j(mid)?;
            if fm == 0.0 {
                return Ok(mid);
            }
            if fm.is_sign_negative() == fa.is_sign_negative() {
                a = mid;
                fa = fm;
            } else {
                b = mid;
            }
        }
        Err(NumericalFailure::NoConvergence {
            order,
            iterations: self.max_iterations,
        })
    }
}

impl SpecialFunctions for BesselSolver {
    fn bessel_j(&self, order: u32, x: f64) -> Result<f64, NumericalFailure> {
        if !x.is_finite() {
            return Err(NumericalFailure::NonFinite { order, x });
        }
        let ax = x.abs();
        if ax > self.max_argument {
            return Err(NumericalFailure::ArgumentOutOfRange {
                order,
                x,
                limit: self.max_argument,
            });
        }
        if x == 0.0 {
            return Ok(if order == 0 { 1.0 } else { 0.0 });
        }

        let nodes = Self::node_count(order, ax);
        let n = order as f64;
        let dtheta = 2.0 * PI / nodes as f64;
        let sum: f64 = (0..nodes)
            .map(|k| {
                let theta = k as f64 * dtheta;
                (n * theta - x * theta.sin()).cos()
            })
            .sum();
        Ok(sum / nodes as f64)
    }

    fn bessel_j_zeros(&self, order: u32, count: usize) -> Result<Vec<f64>, NumericalFailure> {
        self.find_zeros(order, count, |x| self.bessel_j(order, x))
    }
}
