//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use crate::{define_kind, Percent};

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] of whole Uzbek sums.
    #[must_use]
    pub fn uzs(amount: i64) -> Self {
        Self {
            amount: Decimal::from(amount),
            currency: Currency::Uzs,
        }
    }

    /// Returns the provided [`Percent`] of this [`Money`], rounded to a whole
    /// amount (half away from zero).
    #[must_use]
    pub fn percent(&self, percent: Percent) -> Self {
        Self {
            amount: (self.amount * percent.fraction()).round_dp_with_strategy(
                0,
                RoundingStrategy::MidpointAwayFromZero,
            ),
            currency: self.currency,
        }
    }

    /// Returns a [`Display`] of this [`Money`] grouping thousands with spaces,
    /// like `5 500 000 UZS` or `$1 200`.
    ///
    /// [`Display`]: fmt::Display
    #[must_use]
    pub const fn grouped(&self) -> Grouped<'_> {
        Grouped(self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(
                f,
                "{}{}",
                amount.to_i128().expect("integer"),
                currency.label(),
            )
        } else {
            write!(f, "{amount}{}", currency.label())
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency = Currency::from_str(&currency.to_ascii_lowercase())
            .map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

/// [`Money`] displayed with grouped thousands.
#[derive(Clone, Copy, Debug)]
pub struct Grouped<'m>(&'m Money);

impl fmt::Display for Grouped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Money { amount, currency } = self.0;

        let plain = amount.normalize().to_string();
        let (sign, unsigned) = match plain.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", plain.as_str()),
        };
        let (int, frac) = match unsigned.split_once('.') {
            Some((int, frac)) => (int, Some(frac)),
            None => (unsigned, None),
        };

        let mut digits = String::with_capacity(int.len() + int.len() / 3);
        for (i, c) in int.chars().enumerate() {
            if i > 0 && (int.len() - i) % 3 == 0 {
                digits.push(' ');
            }
            digits.push(c);
        }
        if let Some(frac) = frac {
            digits.push('.');
            digits.push_str(frac);
        }

        match currency {
            Currency::Usd => write!(f, "{sign}${digits}"),
            Currency::Uzs => write!(f, "{sign}{digits} UZS"),
        }
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Uzbekistani Sum."]
        #[label = "UZS"]
        Uzs = 1,

        #[doc = "US Dollar."]
        #[label = "USD"]
        Usd = 2,
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use crate::Percent;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("5500000UZS").unwrap(),
            Money::uzs(5_500_000),
        );

        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            },
        );

        assert!(Money::from_str("123.45usd").is_ok());
        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Us").is_err());
        assert!(Money::from_str("123.45EUR").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(Money::uzs(1_800_000).to_string(), "1800000UZS");
        assert_eq!(
            Money {
                amount: decimal("123.00"),
                currency: Currency::Usd,
            }
            .to_string(),
            "123USD",
        );
        assert_eq!(
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            }
            .to_string(),
            "123.45USD",
        );
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(Money::uzs(5_500_000).grouped().to_string(), "5 500 000 UZS");
        assert_eq!(Money::uzs(950).grouped().to_string(), "950 UZS");
        assert_eq!(Money::uzs(0).grouped().to_string(), "0 UZS");
        assert_eq!(
            Money {
                amount: decimal("12000"),
                currency: Currency::Usd,
            }
            .grouped()
            .to_string(),
            "$12 000",
        );
    }

    #[test]
    fn takes_rounded_percent() {
        let fee = Percent::new(decimal("15")).unwrap();

        assert_eq!(Money::uzs(5_500_000).percent(fee), Money::uzs(825_000));
        assert_eq!(Money::uzs(1_111_111).percent(fee), Money::uzs(166_667));
        assert_eq!(Money::uzs(10).percent(fee), Money::uzs(2));
    }
}
