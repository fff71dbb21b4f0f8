//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Floating-point percentage.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(try_from = "Decimal", into = "Decimal")
)]
#[display("{_0}%")]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided values is
    /// greater than `0` and less than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            #[expect(
                clippy::allow_attributes,
                reason = "TODO: Remove once clippy is fixed"
            )]
            #[allow(unsafe_code, reason = "invariants checked already")]
            Some(unsafe { Self::new_unchecked(val) })
        }
    }

    /// Creates a new [`Percent`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must be greater than `0` and less than `100`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }

    /// Creates a new [`Percent`] of the provided whole number, saturating at
    /// `100`.
    #[must_use]
    pub const fn whole(val: u32) -> Self {
        let val = if val > 100 { 100 } else { val };
        Self(Decimal::from_parts(val, 0, 0, false, 0))
    }

    /// Returns the value of this [`Percent`] (`15` for `15%`).
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns this [`Percent`] as a fraction of one (`0.15` for `15%`).
    #[must_use]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<Decimal> for Percent {
    type Error = &'static str;

    fn try_from(val: Decimal) -> Result<Self, Self::Error> {
        Self::new(val).ok_or("percent must be within `0..=100`")
    }
}

impl From<Percent> for Decimal {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.strip_suffix('%').unwrap_or(s))
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn checks_bounds() {
        assert!(Percent::new(Decimal::ZERO).is_some());
        assert!(Percent::new(Decimal::ONE_HUNDRED).is_some());
        assert!(Percent::new(Decimal::NEGATIVE_ONE).is_none());
        assert!(Percent::new(Decimal::from(101)).is_none());
    }

    #[test]
    fn saturates_whole() {
        assert_eq!(Percent::whole(15).value(), Decimal::from(15));
        assert_eq!(Percent::whole(250).value(), Decimal::ONE_HUNDRED);
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Percent::from_str("15").unwrap().fraction(),
            Decimal::new(15, 2),
        );
        assert_eq!(Percent::from_str("98%").unwrap().to_string(), "98%");
        assert!(Percent::from_str("abc").is_err());
        assert!(Percent::from_str("150").is_err());
    }
}
