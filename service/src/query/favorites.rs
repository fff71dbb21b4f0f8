//! [`Query`] collection related to [`Favorite`]s.

use std::collections::BTreeSet;

use common::operations::{All, By, Select};
use tracerr::Traced;

use crate::{
    domain::{Favorite, Listing},
    infra::{database, Database},
    Query, Service,
};

use super::DatabaseQuery;

/// Queries all the saved [`Favorite`]s.
pub type Ids = DatabaseQuery<By<BTreeSet<Favorite>, All>>;

/// [`Query`] of the [`Favorite`] [`Listing`]s in their catalog order.
#[derive(Clone, Copy, Debug, Default)]
pub struct List;

impl<Db> Query<List> for Service<Db>
where
    Db: Database<
            Select<By<BTreeSet<Favorite>, All>>,
            Ok = BTreeSet<Favorite>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Listing>, All>>,
            Ok = Vec<Listing>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: List) -> Result<Self::Ok, Self::Err> {
        let favorites = self
            .database()
            .execute(Select(By::<BTreeSet<Favorite>, _>::new(All)))
            .await
            .map_err(tracerr::wrap!())?;
        if favorites.is_empty() {
            return Ok(vec![]);
        }

        Ok(self
            .database()
            .execute(Select(By::<Vec<Listing>, _>::new(All)))
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .filter(|l| favorites.contains(&Favorite::from(l.id.clone())))
            .collect())
    }
}
