//! Call/put flag.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Direction of a vanilla option payoff.
///
/// Parsing is case-insensitive; anything other than `"call"` or `"put"` is
/// rejected with [`InstrumentError::InvalidOptionKind`].
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionKind;
///
/// let kind: OptionKind = "PUT".parse().unwrap();
/// assert_eq!(kind, OptionKind::Put);
/// assert_eq!(kind.intrinsic(90.0, 100.0), 10.0);
/// assert!("straddle".parse::<OptionKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionKind {
    /// Call: max(S - K, 0)
    Call,
    /// Put: max(K - S, 0)
    Put,
}

impl OptionKind {
    /// Intrinsic value at `spot` for `strike`.
    #[inline]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        }
    }

    /// Returns `true` for [`OptionKind::Call`].
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, OptionKind::Call)
    }

    /// Returns `true` for [`OptionKind::Put`].
    #[inline]
    pub fn is_put(self) -> bool {
        matches!(self, OptionKind::Put)
    }

    /// Lowercase name.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKind {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("call") {
            Ok(OptionKind::Call)
        } else if s.eq_ignore_ascii_case("put") {
            Ok(OptionKind::Put)
        } else {
            Err(InstrumentError::InvalidOptionKind {
                value: s.to_string(),
            })
        }
    }
}
