//! Modal response of an ideal circular membrane clamped at its rim.
//!
//! Mode (n, m) of a membrane of radius R vibrates at ω = j_{n,m} / R, where
//! j_{n,m} is the m-th positive zero of J_n, with displacement
//!
//!   z(r, φ, t) = J_n(ω r) · cos(n φ) · cos(ω t).
//!
//! Because ω R = j_{n,m}, every mode vanishes on the rim r = R. Several
//! modes are superposed by their arithmetic mean, so the amplitude stays
//! bounded whatever the mode count.
//!
//! Everything here is a pure function of its arguments. Time evolution is
//! re-evaluation at a new `t`; nothing is cached between calls.

mod error;
mod field;
mod mode;
mod sample;

pub use error::{InvalidArgument, MembraneError};
pub use field::{ModalField, ModeTerm};
pub use mode::{Mode, ModeSet};
pub use sample::{FieldSample, FieldSampler, FieldSamples};

use crate::core::bessel::BesselSolver;
use crate::core::special::{NumericalFailure, SpecialFunctions};
use error::ensure_finite;

/// A circular membrane of fixed radius, evaluated through a special-function
/// provider.
#[derive(Debug, Clone)]
pub struct Membrane<S = BesselSolver> {
    radius: f64,
    special: S,
}

impl Membrane {
    /// Membrane backed by the default [`BesselSolver`].
    pub fn new(radius: f64) -> Result<Self, MembraneError> {
        Self::with_special(radius, BesselSolver::default())
    }
}

impl<S: SpecialFunctions> Membrane<S> {
    pub fn with_special(radius: f64, special: S) -> Result<Self, MembraneError> {
        let radius = ensure_finite("radius", radius)?;
        if radius <= 0.0 {
            return Err(InvalidArgument::NonPositiveRadius { radius }.into());
        }
        Ok(Self { radius, special })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn special(&self) -> &S {
        &self.special
    }

    /// j_{n,m}: asks the provider for the first m zeros and keeps the last.
    pub fn bessel_zero(&self, mode: Mode) -> Result<f64, MembraneError> {
        let requested = mode.index() as usize;
        let zeros = self.special.bessel_j_zeros(mode.order(), requested)?;
        match zeros.get(requested - 1) {
            Some(&zero) => Ok(zero),
            None => Err(NumericalFailure::ZeroSearchExhausted {
                order: mode.order(),
                found: zeros.len(),
                requested,
                limit: f64::INFINITY,
            }
            .into()),
        }
    }

    /// ω = j_{n,m} / R.
    pub fn modal_frequency(&self, mode: Mode) -> Result<f64, MembraneError> {
        Ok(self.bessel_zero(mode)? / self.radius)
    }

    /// Single-mode displacement J_n(ω r) · cos(n φ) · cos(ω t).
    pub fn displacement(&self, mode: Mode, r: f64, phi: f64, t: f64) -> Result<f64, MembraneError> {
        self.check_radial(r)?;
        ensure_finite("phi", phi)?;
        check_time(t)?;

        let omega = self.modal_frequency(mode)?;
        let term = field::mode_term(&self.special, mode, omega, (omega * t).cos(), r, phi)?;
        Ok(term)
    }

    /// Radial factor J_n(ω x) of one mode along an arbitrary abscissa.
    ///
    /// Unlike [`displacement`](Self::displacement) the abscissa is not
    /// limited to [0, R]; this traces the Bessel curve itself.
    pub fn radial_profile(&self, mode: Mode, xs: &[f64]) -> Result<Vec<(f64, f64)>, MembraneError> {
        for &x in xs {
            ensure_finite("x", x)?;
        }
        let omega = self.modal_frequency(mode)?;
        xs.iter()
            .map(|&x| -> Result<(f64, f64), MembraneError> {
                let y = self.special.bessel_j(mode.order(), omega * x)?;
                Ok((x, y))
            })
            .collect()
    }

    pub(crate) fn check_radial(&self, r: f64) -> Result<(), InvalidArgument> {
        let r = ensure_finite("r", r)?;
        if r < 0.0 || r > self.radius {
            return Err(InvalidArgument::RadiusOutOfRange {
                r,
                radius: self.radius,
            });
        }
        Ok(())
    }
}

impl<S: SpecialFunctions + Clone> Membrane<S> {
    /// Superposed field (1/k) Σ_i z_i at time `t`, ready to be evaluated at
    /// any (r, φ).
    pub fn field(&self, modes: &ModeSet, t: f64) -> Result<ModalField<S>, MembraneError> {
        ModalField::new(self.clone(), modes, t)
    }

    /// Lazy, restartable samples of the superposed field over the cross
    /// product `radii × angles`.
    pub fn sample_field(
        &self,
        modes: &ModeSet,
        t: f64,
        radii: Vec<f64>,
        angles: Vec<f64>,
    ) -> Result<FieldSampler<S>, MembraneError> {
        let field = self.field(modes, t)?;
        FieldSampler::new(field, radii, angles)
    }
}

pub(crate) fn check_time(t: f64) -> Result<f64, InvalidArgument> {
    let t = ensure_finite("t", t)?;
    if t < 0.0 {
        return Err(InvalidArgument::NegativeTime { t });
    }
    Ok(t)
}

/// ω(R, n, m) with the default provider.
pub fn modal_frequency(radius: f64, order: u32, index: u32) -> Result<f64, MembraneError> {
    let membrane = Membrane::new(radius)?;
    membrane.modal_frequency(Mode::new(order, index)?)
}

/// z(r, φ, t) of a single mode with the default provider.
pub fn displacement(
    radius: f64,
    order: u32,
    index: u32,
    r: f64,
    phi: f64,
    t: f64,
) -> Result<f64, MembraneError> {
    let membrane = Membrane::new(radius)?;
    membrane.displacement(Mode::new(order, index)?, r, phi, t)
}

/// Mean of the mode displacements of `modes` at time `t`, as a field over
/// the disc.
pub fn superposed_displacement(radius: f64, modes: &ModeSet, t: f64) -> Result<ModalField, MembraneError> {
    Membrane::new(radius)?.field(modes, t)
}

/// Samples of [`superposed_displacement`] over `radii × angles`.
pub fn sample_field(
    radius: f64,
    modes: &ModeSet,
    t: f64,
    radii: Vec<f64>,
    angles: Vec<f64>,
) -> Result<FieldSampler, MembraneError> {
    Membrane::new(radius)?.sample_field(modes, t, radii, angles)
}
