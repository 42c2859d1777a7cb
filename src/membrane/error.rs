use crate::core::special::NumericalFailure;

/// Malformed input, detected before any numeric work.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidArgument {
    /// Boundary radius is zero or negative.
    NonPositiveRadius { radius: f64 },
    /// A coordinate or parameter is NaN or infinite.
    NonFinite { name: &'static str, value: f64 },
    /// Bessel order below zero.
    NegativeOrder { order: i64 },
    /// Mode index below one (zeros are counted from 1).
    NonPositiveModeIndex { index: i64 },
    /// Radial coordinate outside [0, R].
    RadiusOutOfRange { r: f64, radius: f64 },
    /// Time before t = 0.
    NegativeTime { t: f64 },
    /// Superposition over no modes.
    EmptyModeSet,
    /// Integer does not fit the 32-bit order/index range.
    TooLarge { name: &'static str, value: i64 },
    /// Text that does not parse as `order:index`.
    MalformedMode { text: String },
}

impl std::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidArgument::NonPositiveRadius { radius } => {
                write!(f, "membrane radius must be positive, got {radius}")
            }
            InvalidArgument::NonFinite { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            InvalidArgument::NegativeOrder { order } => {
                write!(f, "Bessel order must be >= 0, got {order}")
            }
            InvalidArgument::NonPositiveModeIndex { index } => {
                write!(f, "mode index must be >= 1, got {index}")
            }
            InvalidArgument::RadiusOutOfRange { r, radius } => {
                write!(f, "radial coordinate {r} is outside [0, {radius}]")
            }
            InvalidArgument::NegativeTime { t } => write!(f, "time must be >= 0, got {t}"),
            InvalidArgument::EmptyModeSet => write!(f, "mode set is empty"),
            InvalidArgument::TooLarge { name, value } => {
                write!(f, "{name} {value} does not fit in 32 bits")
            }
            InvalidArgument::MalformedMode { text } => {
                write!(f, "expected a mode as order:index, got {text:?}")
            }
        }
    }
}

impl std::error::Error for InvalidArgument {}

/// Errors returned by the membrane model.
#[derive(Debug, Clone, PartialEq)]
pub enum MembraneError {
    InvalidArgument(InvalidArgument),
    NumericalFailure(NumericalFailure),
}

impl MembraneError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, MembraneError::InvalidArgument(_))
    }

    pub fn is_numerical_failure(&self) -> bool {
        matches!(self, MembraneError::NumericalFailure(_))
    }
}

impl From<InvalidArgument> for MembraneError {
    fn from(err: InvalidArgument) -> Self {
        MembraneError::InvalidArgument(err)
    }
}

impl From<NumericalFailure> for MembraneError {
    fn from(err: NumericalFailure) -> Self {
        MembraneError::NumericalFailure(err)
    }
}

impl std::fmt::Display for MembraneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembraneError::InvalidArgument(err) => write!(f, "invalid argument: {err}"),
            MembraneError::NumericalFailure(err) => write!(f, "numerical failure: {err}"),
        }
    }
}

impl std::error::Error for MembraneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MembraneError::InvalidArgument(err) => Some(err),
            MembraneError::NumericalFailure(err) => Some(err),
        }
    }
}

/// Rejects NaN and infinities.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, InvalidArgument> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidArgument::NonFinite { name, value })
    }
}
