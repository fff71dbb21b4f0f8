//! In-memory [`Database`] implementation.

pub mod fixture;

use std::{collections::BTreeSet, sync::Arc};

use common::operations::{All, By, Delete, Insert, Select};
use derive_more::{Display, Error as StdError};
use tokio::sync::RwLock;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        district, landlord, listing, District, Favorite, Landlord, Listing,
    },
    infra::{database, Database},
};

/// In-memory [`Database`] serving a static catalog.
///
/// [`Listing`]s, [`Landlord`]s and [`district::Info`]s are immutable, while
/// [`Favorite`]s live only as long as the [`Memory`] (and its clones) do.
#[derive(Clone, Debug)]
pub struct Memory {
    /// All the [`Listing`]s in their catalog order.
    listings: Arc<[Listing]>,

    /// All the [`Landlord`]s.
    landlords: Arc<[Landlord]>,

    /// Overviews of the [`District`]s.
    districts: Arc<[district::Info]>,

    /// [`Favorite`] [`Listing`]s of the visitor.
    favorites: Arc<RwLock<BTreeSet<Favorite>>>,
}

impl Memory {
    /// Creates a new [`Memory`] database with the provided data and no
    /// [`Favorite`]s.
    #[must_use]
    pub fn new(
        listings: impl Into<Arc<[Listing]>>,
        landlords: impl Into<Arc<[Landlord]>>,
        districts: impl Into<Arc<[district::Info]>>,
    ) -> Self {
        Self {
            listings: listings.into(),
            landlords: landlords.into(),
            districts: districts.into(),
            favorites: Arc::default(),
        }
    }

    /// Creates a new [`Memory`] database populated with the [`fixture`].
    #[must_use]
    pub fn with_fixture() -> Self {
        Self::new(
            fixture::listings(),
            fixture::landlords(),
            fixture::districts(),
        )
    }

    /// Looks up a [`Listing`] by its ID.
    fn listing(&self, id: &listing::Id) -> Option<&Listing> {
        self.listings.iter().find(|l| &l.id == id)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::with_fixture()
    }
}

/// [`Memory`] database error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),
}

impl Database<Select<By<Vec<Listing>, All>>> for Memory {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Listing>, All>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.listings.to_vec())
    }
}

impl Database<Select<By<Vec<Listing>, District>>> for Memory {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, District>>,
    ) -> Result<Self::Ok, Self::Err> {
        let district = by.into_inner();
        Ok(self
            .listings
            .iter()
            .filter(|l| l.district == district)
            .cloned()
            .collect())
    }
}

impl Database<Select<By<Option<Listing>, listing::Id>>> for Memory {
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.listing(by.inner()).cloned())
    }
}

impl Database<Select<By<Option<Listing>, listing::Slug>>> for Memory {
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        let slug = by.into_inner();
        Ok(self.listings.iter().find(|l| l.slug == slug).cloned())
    }
}

impl Database<Select<By<Option<Landlord>, landlord::Id>>> for Memory {
    type Ok = Option<Landlord>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Landlord>, landlord::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.landlords.iter().find(|l| l.id == id).cloned())
    }
}

impl Database<Select<By<Vec<district::Info>, All>>> for Memory {
    type Ok = Vec<district::Info>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<district::Info>, All>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.districts.to_vec())
    }
}

impl Database<Select<By<Option<district::Info>, District>>> for Memory {
    type Ok = Option<district::Info>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<district::Info>, District>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.districts.iter().find(|d| d.id == id).cloned())
    }
}

impl Database<Select<By<BTreeSet<Favorite>, All>>> for Memory {
    type Ok = BTreeSet<Favorite>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<BTreeSet<Favorite>, All>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.favorites.read().await.clone())
    }
}

impl Database<Insert<Favorite>> for Memory {
    /// Indicator whether the [`Favorite`] was not present before.
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(favorite): Insert<Favorite>,
    ) -> Result<Self::Ok, Self::Err> {
        if self.listing(favorite.listing_id()).is_none() {
            return Err(tracerr::new!(database::Error::from(
                Error::ListingNotExists(favorite.into()),
            )));
        }

        log::debug!("saving `Listing(id: {favorite})` to favorites");
        Ok(self.favorites.write().await.insert(favorite))
    }
}

impl Database<Delete<Favorite>> for Memory {
    /// Indicator whether the [`Favorite`] was present before.
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(favorite): Delete<Favorite>,
    ) -> Result<Self::Ok, Self::Err> {
        log::debug!("removing `Listing(id: {favorite})` from favorites");
        Ok(self.favorites.write().await.remove(&favorite))
    }
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::operations::{All, By, Delete, Insert, Select};

    use crate::{
        domain::{listing, District, Favorite, Listing},
        infra::Database as _,
    };

    use super::Memory;

    fn favorite(id: &str) -> Favorite {
        listing::Id::new(id).unwrap().into()
    }

    #[tokio::test]
    async fn selects_listings_by_district() {
        let db = Memory::with_fixture();

        let found = db
            .execute(Select(By::<Vec<Listing>, _>::new(District::Chilanzar)))
            .await
            .unwrap();

        assert_eq!(
            found.iter().map(|l| l.id.to_string()).collect::<Vec<_>>(),
            ["p5"],
        );
    }

    #[tokio::test]
    async fn keeps_favorites_across_clones() {
        let db = Memory::with_fixture();
        let clone = db.clone();

        assert!(db.execute(Insert(favorite("p2"))).await.unwrap());
        assert!(!db.execute(Insert(favorite("p2"))).await.unwrap());

        let saved = clone
            .execute(Select(By::<BTreeSet<Favorite>, _>::new(All)))
            .await
            .unwrap();
        assert_eq!(saved, BTreeSet::from([favorite("p2")]));

        assert!(clone.execute(Delete(favorite("p2"))).await.unwrap());
        assert!(!db.execute(Delete(favorite("p2"))).await.unwrap());
    }

    #[tokio::test]
    async fn rejects_unknown_favorite() {
        let db = Memory::with_fixture();

        let err = db.execute(Insert(favorite("p99"))).await.unwrap_err();

        assert_eq!(err.to_string(), "`Listing(id: p99)` does not exist");
    }
}
