use serde::Serialize;

use crate::core::bessel::BesselSolver;
use crate::core::special::SpecialFunctions;

use super::error::{MembraneError, ensure_finite};
use super::field::ModalField;

/// One point of a sampled field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSample {
    pub r: f64,
    pub phi: f64,
    pub z: f64,
}

impl FieldSample {
    /// (r cos φ, r sin φ, z).
    pub fn cartesian(&self) -> [f64; 3] {
        [self.r * self.phi.cos(), self.r * self.phi.sin(), self.z]
    }
}

/// Cross product `radii × angles` over a [`ModalField`].
///
/// Nothing is evaluated until iteration; each call to [`iter`](Self::iter)
/// restarts from the first point. Points are visited radius-major, with the
/// angles varying fastest.
#[derive(Debug, Clone)]
pub struct FieldSampler<S = BesselSolver> {
    field: ModalField<S>,
    radii: Vec<f64>,
    angles: Vec<f64>,
}

impl<S: SpecialFunctions> FieldSampler<S> {
    /// Validates every coordinate up front so iteration can only fail inside
    /// the special-function provider.
    pub(crate) fn new(field: ModalField<S>, radii: Vec<f64>, angles: Vec<f64>) -> Result<Self, MembraneError> {
        for &r in &radii {
            field.membrane().check_radial(r)?;
        }
        for &phi in &angles {
            ensure_finite("phi", phi)?;
        }
        Ok(Self { field, radii, angles })
    }

    pub fn field(&self) -> &ModalField<S> {
        &self.field
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// |radii| · |angles|.
    pub fn len(&self) -> usize {
        self.radii.len() * self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> FieldSamples<'_, S> {
        FieldSamples {
            sampler: self,
            next: 0,
        }
    }

    /// Evaluates the whole grid, stopping at the first failure.
    pub fn to_vec(&self) -> Result<Vec<FieldSample>, MembraneError> {
        self.iter().collect()
    }
}

impl<'a, S: SpecialFunctions> IntoIterator for &'a FieldSampler<S> {
    type Item = Result<FieldSample, MembraneError>;
    type IntoIter = FieldSamples<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`FieldSampler`].
#[derive(Debug)]
pub struct FieldSamples<'a, S = BesselSolver> {
    sampler: &'a FieldSampler<S>,
    next: usize,
}

impl<S> Clone for FieldSamples<'_, S> {
    fn clone(&self) -> Self {
        Self {
            sampler: self.sampler,
            next: self.next,
        }
    }
}

impl<S: SpecialFunctions> Iterator for FieldSamples<'_, S> {
    type Item = Result<FieldSample, MembraneError>;

    fn next(&mut self) -> Option<Self::Item> {
        let width = self.sampler.angles.len();
        if self.next >= self.sampler.len() {
            return None;
        }
        let r = self.sampler.radii[self.next / width];
        let phi = self.sampler.angles[self.next % width];
        self.next += 1;

        Some(
            self.sampler
                .field
                .eval(r, phi)
                .map(|z| FieldSample { r, phi, z })
                .map_err(MembraneError::from),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sampler.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<S: SpecialFunctions> ExactSizeIterator for FieldSamples<'_, S> {}
