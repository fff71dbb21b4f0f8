//! [`Favorite`] definitions.

use derive_more::{Display, From, Into};

#[cfg(doc)]
use crate::domain::Listing;
use crate::domain::listing;

/// [`Listing`] saved by a visitor for later.
#[derive(
    Clone, Debug, Display, Eq, From, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Favorite(listing::Id);

impl Favorite {
    /// Returns the ID of the favorite [`Listing`].
    #[must_use]
    pub const fn listing_id(&self) -> &listing::Id {
        &self.0
    }
}
