//! [`SpecialFunctions`] backed by `scirs2-special`.
//!
//! J_n comes from the library; zeros reuse [`BesselSolver::find_zeros`] so
//! both providers bracket, refine and fail the same way.

use scirs2_special::jn;

use crate::core::bessel::BesselSolver;
use crate::core::special::{NumericalFailure, SpecialFunctions};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScirsBessel {
    /// Range, tolerance and iteration limits of the zero scan.
    pub scan: BesselSolver,
}

impl SpecialFunctions for ScirsBessel {
    fn bessel_j(&self, order: u32, x: f64) -> Result<f64, NumericalFailure> {
        if !x.is_finite() {
            return Err(NumericalFailure::NonFinite { order, x });
        }
        if x.abs() > self.scan.max_argument {
            return Err(NumericalFailure::ArgumentOutOfRange {
                order,
                x,
                limit: self.scan.max_argument,
            });
        }
        let n = i32::try_from(order).map_err(|_| NumericalFailure::OrderOutOfRange {
            order,
            limit: i32::MAX as u32,
        })?;
        let y: f64 = jn(n, x);
        if !y.is_finite() {
            return Err(NumericalFailure::NonFiniteResult { order, x });
        }
        Ok(y)
    }

    fn bessel_j_zeros(&self, order: u32, count: usize) -> Result<Vec<f64>, NumericalFailure> {
        self.scan.find_zeros(order, count, |x| self.bessel_j(order, x))
    }
}
