//! Special-function oracle consumed by the membrane model.
//!
//! The model only needs two things from it: J_n(x) at arbitrary real x and
//! the ascending positive zeros of J_n. Anything implementing this trait can
//! stand in for [`BesselSolver`](crate::core::bessel::BesselSolver).

/// Errors raised when a special function cannot be produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericalFailure {
    /// Argument is NaN or infinite.
    NonFinite { order: u32, x: f64 },
    /// |x| exceeds the range the evaluator accepts.
    ArgumentOutOfRange { order: u32, x: f64, limit: f64 },
    /// The zero scan reached its upper bound before finding enough zeros.
    ZeroSearchExhausted {
        order: u32,
        found: usize,
        requested: usize,
        limit: f64,
    },
    /// Root refinement ran out of iterations.
    NoConvergence { order: u32, iterations: u32 },
    /// Order beyond what the backing library accepts.
    OrderOutOfRange { order: u32, limit: u32 },
    /// The backing library returned NaN or an infinity.
    NonFiniteResult { order: u32, x: f64 },
}

impl std::fmt::Display for NumericalFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            NumericalFailure::NonFinite { order, x } => {
                write!(f, "J_{order} evaluated at non-finite argument {x}")
            }
            NumericalFailure::ArgumentOutOfRange { order, x, limit } => {
                write!(f, "J_{order}({x}) is outside the supported range |x| <= {limit}")
            }
            NumericalFailure::ZeroSearchExhausted {
                order,
                found,
                requested,
                limit,
            } => write!(
                f,
                "found only {found} of {requested} zeros of J_{order} below x = {limit}"
            ),
            NumericalFailure::NoConvergence { order, iterations } => write!(
                f,
                "zero of J_{order} did not converge within {iterations} iterations"
            ),
            NumericalFailure::OrderOutOfRange { order, limit } => {
                write!(f, "Bessel order {order} exceeds the supported maximum {limit}")
            }
            NumericalFailure::NonFiniteResult { order, x } => {
                write!(f, "J_{order}({x}) evaluated to a non-finite value")
            }
        }
    }
}

impl std::error::Error for NumericalFailure {}

/// Bessel functions of the first kind, integer order.
pub trait SpecialFunctions: Send + Sync {
    /// J_n(x).
    fn bessel_j(&self, order: u32, x: f64) -> Result<f64, NumericalFailure>;

    /// The first `count` positive zeros of J_n, ascending. Always exactly
    /// `count` long on success.
    fn bessel_j_zeros(&self, order: u32, count: usize) -> Result<Vec<f64>, NumericalFailure>;
}

impl<T: SpecialFunctions + ?Sized> SpecialFunctions for std::sync::Arc<T> {
    fn bessel_j(&self, order: u32, x: f64) -> Result<f64, NumericalFailure> {
        (**self).bessel_j(order, x)
    }

    fn bessel_j_zeros(&self, order: u32, count: usize) -> Result<Vec<f64>, NumericalFailure> {
        (**self).bessel_j_zeros(order, count)
    }
}

impl<T: SpecialFunctions + ?Sized> SpecialFunctions for &T {
    fn bessel_j(&self, order: u32, x: f64) -> Result<f64, NumericalFailure> {
        (**self).bessel_j(order, x)
    }

    fn bessel_j_zeros(&self, order: u32, count: usize) -> Result<Vec<f64>, NumericalFailure> {
        (**self).bessel_j_zeros(order, count)
    }
}
