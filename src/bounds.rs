//! Scalar-or-range filter bounds and their canonical closed interval.

use crate::error::BoundsError;
use std::fmt;
use std::str::FromStr;

/// Upper end of the default length filter.
pub const MAX_LENGTH: f64 = (i32::MAX) as f64;

/// A bound as the user wrote it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsSpec {
    /// Upper bound only; the lower bound is 0.
    Scalar(f64),
    /// Explicit `(lower, upper)` pair.
    Range(f64, f64),
}

/// Closed interval `[lo, hi]` with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

impl BoundsSpec {
    /// Canonicalize into an inclusive interval.
    ///
    /// `Scalar(v)` becomes `[0, v]`, `Range(a, b)` becomes `[a, b]`.
    /// An infinite upper end is accepted and leaves that side open.
    pub fn normalize(self) -> Result<Interval, BoundsError> {
        let (lo, hi) = match self {
            BoundsSpec::Scalar(v) => {
                if v.is_nan() {
                    return Err(BoundsError::NotANumber);
                }
                if v < 0.0 {
                    return Err(BoundsError::Negative(v));
                }
                (0.0, v)
            }
            BoundsSpec::Range(lo, hi) => {
                if lo.is_nan() || hi.is_nan() {
                    return Err(BoundsError::NotANumber);
                }
                if lo.is_infinite() && lo > 0.0 {
                    return Err(BoundsError::InfiniteLower(lo));
                }
                if lo > hi {
                    return Err(BoundsError::Inverted { lo, hi });
                }
                (lo, hi)
            }
        };
        Ok(Interval { lo, hi })
    }
}

impl From<f64> for BoundsSpec {
    fn from(v: f64) -> Self {
        BoundsSpec::Scalar(v)
    }
}

impl From<(f64, f64)> for BoundsSpec {
    fn from((lo, hi): (f64, f64)) -> Self {
        BoundsSpec::Range(lo, hi)
    }
}

impl TryFrom<BoundsSpec> for Interval {
    type Error = BoundsError;

    fn try_from(spec: BoundsSpec) -> Result<Self, Self::Error> {
        spec.normalize()
    }
}

impl FromStr for BoundsSpec {
    type Err = BoundsError;

    /// Accepts `MAX`, `MIN,MAX` or `MIN..MAX`; `inf` is allowed for the upper end.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| -> Result<f64, BoundsError> {
            match part.trim().to_ascii_lowercase().as_str() {
                "inf" => Ok(f64::INFINITY),
                p => p.parse::<f64>().map_err(|_| BoundsError::Parse(s.to_string())),
            }
        };

        let parts: Vec<&str> = if s.contains("..") {
            s.split("..").collect()
        } else {
            s.split(',').collect()
        };

        match parts.as_slice() {
            [v] => Ok(BoundsSpec::Scalar(parse(v)?)),
            [lo, hi] => Ok(BoundsSpec::Range(parse(lo)?, parse(hi)?)),
            _ => Err(BoundsError::Parse(s.to_string())),
        }
    }
}

impl fmt::Display for BoundsSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundsSpec::Scalar(v) => write!(f, "{v}"),
            BoundsSpec::Range(lo, hi) => write!(f, "{lo},{hi}"),
        }
    }
}

impl Interval {
    /// Whole non-negative range; filters nothing out.
    pub const UNBOUNDED: Interval = Interval {
        lo: 0.0,
        hi: f64::INFINITY,
    };

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        self.lo <= v && v <= self.hi
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}
