//! Vibration modes (n, m): angular harmonic n, radial harmonic m.

use std::fmt;
use std::str::FromStr;

use super::error::InvalidArgument;

/// One vibration mode. `order` selects J_n and the cos(nφ) harmonic,
/// `index` selects the 1-based zero j_{n,m}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode {
    order: u32,
    index: u32,
}

impl Mode {
    pub fn new(order: u32, index: u32) -> Result<Self, InvalidArgument> {
        if index == 0 {
            return Err(InvalidArgument::NonPositiveModeIndex { index: 0 });
        }
        Ok(Self { order, index })
    }

    #[inline]
    pub fn order(&self) -> u32 {
        self.order
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl TryFrom<(i64, i64)> for Mode {
    type Error = InvalidArgument;

    fn try_from((order, index): (i64, i64)) -> Result<Self, Self::Error> {
        if order < 0 {
            return Err(InvalidArgument::NegativeOrder { order });
        }
        if index < 1 {
            return Err(InvalidArgument::NonPositiveModeIndex { index });
        }
        let order = u32::try_from(order).map_err(|_| InvalidArgument::TooLarge {
            name: "order",
            value: order,
        })?;
        let index = u32::try_from(index).map_err(|_| InvalidArgument::TooLarge {
            name: "index",
            value: index,
        })?;
        Mode::new(order, index)
    }
}

/// Parses `order:index`, e.g. `0:2`.
impl FromStr for Mode {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidArgument::MalformedMode {
            text: s.to_string(),
        };
        let (order, index) = s.trim().split_once(':').ok_or_else(malformed)?;
        let order = order.trim().parse::<i64>().map_err(|_| malformed())?;
        let index = index.trim().parse::<i64>().map_err(|_| malformed())?;
        Mode::try_from((order, index))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.order, self.index)
    }
}

/// Ordered list of modes to superpose. Order only affects iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeSet(Vec<Mode>);

impl ModeSet {
    pub fn new(modes: Vec<Mode>) -> Self {
        Self(modes)
    }

    /// Single-mode set.
    pub fn single(mode: Mode) -> Self {
        Self(vec![mode])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mode> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Mode] {
        &self.0
    }
}

impl From<Vec<Mode>> for ModeSet {
    fn from(modes: Vec<Mode>) -> Self {
        Self(modes)
    }
}

impl FromIterator<Mode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = Mode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ModeSet {
    type Item = &'a Mode;
    type IntoIter = std::slice::Iter<'a, Mode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parses a comma-separated list like `0:1,0:2`.
impl FromStr for ModeSet {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Mode::from_str)
            .collect()
    }
}

/// Renders as `n=[0, 0], m=[1, 2]`.
impl fmt::Display for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let orders: Vec<u32> = self.0.iter().map(Mode::order).collect();
        let indices: Vec<u32> = self.0.iter().map(Mode::index).collect();
        write!(f, "n={orders:?}, m={indices:?}")
    }
}
