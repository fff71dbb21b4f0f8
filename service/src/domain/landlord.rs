//! [`Landlord`] definitions.

use std::str::FromStr;

use common::{Date, Percent};
use derive_more::{AsRef, Display, Into};
use rust_decimal::Decimal;

/// Owner of listed properties.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Landlord {
    /// ID of this [`Landlord`].
    pub id: Id,

    /// [`Name`] of this [`Landlord`].
    pub name: Name,

    /// Indicator whether the identity of this [`Landlord`] was verified.
    pub is_verified: bool,

    /// Share of inquiries this [`Landlord`] responds to.
    pub response_rate: Percent,

    /// Typical response time, like `within 1 hour`.
    pub response_time: String,

    /// [`Date`] this [`Landlord`] joined the marketplace.
    pub member_since: Date,

    /// Number of properties this [`Landlord`] has listed.
    pub total_listings: u32,

    /// Average tenant rating from `0` to `5`.
    pub rating: Decimal,

    /// Number of tenant reviews.
    pub review_count: u32,
}

/// ID of a [`Landlord`].
#[derive(
    AsRef, Clone, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[as_ref(forward)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `id` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        !id.is_empty()
            && id.len() <= 64
            && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `landlord::Id`")
    }
}

/// Display name of a [`Landlord`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 100
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `landlord::Name`")
    }
}
