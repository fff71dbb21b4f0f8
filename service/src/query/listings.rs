//! [`Query`] collection related to multiple [`Listing`]s.

use common::operations::{self, By, Select};
use tracerr::Traced;

use crate::{
    domain::{
        listing::{self, Criteria, SortKey},
        District, Listing,
    },
    infra::{database, Database},
    Query, Service,
};
#[cfg(doc)]
use crate::Config;

use super::DatabaseQuery;

/// Queries all the [`Listing`]s in their catalog order.
pub type All = DatabaseQuery<By<Vec<Listing>, operations::All>>;

/// Queries [`Listing`]s located in a [`District`], in their catalog order.
pub type ByDistrict = DatabaseQuery<By<Vec<Listing>, District>>;

/// [`Query`] searching [`Listing`]s matching the [`Criteria`], ordered by the
/// [`SortKey`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Search {
    /// [`Criteria`] to filter [`Listing`]s with.
    pub criteria: Criteria,

    /// [`SortKey`] to order the matched [`Listing`]s by.
    pub sort: SortKey,
}

impl<Db> Query<Search> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Listing>, operations::All>>,
        Ok = Vec<Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Search { criteria, sort }: Search,
    ) -> Result<Self::Ok, Self::Err> {
        let all = self
            .database()
            .execute(Select(By::new(operations::All)))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(listing::search::query(&all, &criteria, sort))
    }
}

/// [`Query`] of featured [`Listing`]s, limited by the
/// [`Config::featured_limit`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Featured;

impl<Db> Query<Featured> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Listing>, operations::All>>,
        Ok = Vec<Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Featured) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .database()
            .execute(Select(By::new(operations::All)))
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .filter(|l| l.is_featured)
            .take(self.config().featured_limit)
            .collect())
    }
}

/// [`Query`] of the most recently created [`Listing`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Latest {
    /// Maximum number of [`Listing`]s to return.
    ///
    /// [`Config::latest_limit`] is used if [`None`].
    pub limit: Option<usize>,
}

impl<Db> Query<Latest> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Listing>, operations::All>>,
        Ok = Vec<Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Latest { limit }: Latest,
    ) -> Result<Self::Ok, Self::Err> {
        let mut listings = self
            .database()
            .execute(Select(By::new(operations::All)))
            .await
            .map_err(tracerr::wrap!())?;
        SortKey::Newest.sort(&mut listings);
        listings.truncate(limit.unwrap_or(self.config().latest_limit));
        Ok(listings)
    }
}
