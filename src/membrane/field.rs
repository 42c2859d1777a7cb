use crate::core::bessel::BesselSolver;
use crate::core::special::{NumericalFailure, SpecialFunctions};

use super::error::{InvalidArgument, MembraneError, ensure_finite};
use super::{Membrane, Mode, ModeSet, check_time};

/// One superposed mode with its time factor already applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeTerm {
    pub mode: Mode,
    /// ω = j_{n,m} / R.
    pub omega: f64,
    /// cos(ω t) at the field's time.
    pub time_factor: f64,
}

/// Displacement of a set of modes frozen at one instant, as a function of
/// (r, φ). Built anew for every `t`.
#[derive(Debug, Clone)]
pub struct ModalField<S = BesselSolver> {
    membrane: Membrane<S>,
    terms: Vec<ModeTerm>,
    time: f64,
}

impl<S: SpecialFunctions> ModalField<S> {
    pub(crate) fn new(membrane: Membrane<S>, modes: &ModeSet, t: f64) -> Result<Self, MembraneError> {
        if modes.is_empty() {
            return Err(InvalidArgument::EmptyModeSet.into());
        }
        let time = check_time(t)?;

        let terms = modes
            .iter()
            .map(|&mode| -> Result<ModeTerm, MembraneError> {
                let omega = membrane.modal_frequency(mode)?;
                Ok(ModeTerm {
                    mode,
                    omega,
                    time_factor: (omega * time).cos(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            membrane,
            terms,
            time,
        })
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn membrane(&self) -> &Membrane<S> {
        &self.membrane
    }

    pub fn terms(&self) -> &[ModeTerm] {
        &self.terms
    }

    pub fn modes(&self) -> impl Iterator<Item = Mode> + '_ {
        self.terms.iter().map(|term| term.mode)
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.terms.iter().map(|term| term.omega).collect()
    }

    /// z(r, φ) = (1/k) Σ_i J_{n_i}(ω_i r) cos(n_i φ) cos(ω_i t).
    pub fn at(&self, r: f64, phi: f64) -> Result<f64, MembraneError> {
        self.membrane.check_radial(r)?;
        ensure_finite("phi", phi)?;
        Ok(self.eval(r, phi)?)
    }

    /// Cartesian embedding (r cos φ, r sin φ, z).
    pub fn cartesian(&self, r: f64, phi: f64) -> Result<[f64; 3], MembraneError> {
        let z = self.at(r, phi)?;
        Ok([r * phi.cos(), r * phi.sin(), z])
    }

    /// Caller has already validated r and φ.
    pub(crate) fn eval(&self, r: f64, phi: f64) -> Result<f64, NumericalFailure> {
        let mut sum = 0.0;
        for term in &self.terms {
            sum += mode_term(self.membrane.special(), term.mode, term.omega, term.time_factor, r, phi)?;
        }
        Ok(sum / self.terms.len() as f64)
    }
}

/// J_n(ω r) · cos(n φ) · time_factor.
pub(crate) fn mode_term<S: SpecialFunctions>(
    special: &S,
    mode: Mode,
    omega: f64,
    time_factor: f64,
    r: f64,
    phi: f64,
) -> Result<f64, NumericalFailure> {
    let radial = special.bessel_j(mode.order(), omega * r)?;
    Ok(radial * (mode.order() as f64 * phi).cos() * time_factor)
}
