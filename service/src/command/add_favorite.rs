//! [`Command`] for saving a [`Listing`] to [`Favorite`]s.

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, Favorite, Listing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for saving a [`Listing`] to [`Favorite`]s.
#[derive(Clone, Debug)]
pub struct AddFavorite {
    /// ID of the [`Listing`] to be saved.
    pub listing_id: listing::Id,
}

impl<Db> Command<AddFavorite> for Service<Db>
where
    Db: Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + Database<Insert<Favorite>, Ok = bool, Err = Traced<database::Error>>,
{
    /// Indicator whether the [`Listing`] was not saved before.
    type Ok = bool;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: AddFavorite) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddFavorite { listing_id } = cmd;

        let listing = self
            .database()
            .execute(Select(By::<Option<Listing>, _>::new(listing_id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Insert(Favorite::from(listing.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`AddFavorite`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::listing, infra::Memory, query, Command as _, Config,
        Query as _, Service,
    };

    use super::{AddFavorite, ExecutionError};

    fn id(s: &str) -> listing::Id {
        listing::Id::new(s).unwrap()
    }

    #[tokio::test]
    async fn adds_favorite_once() {
        let svc = Service::new(Config::default(), Memory::with_fixture());

        let first = svc.execute(AddFavorite { listing_id: id("p4") }).await;
        let second = svc.execute(AddFavorite { listing_id: id("p4") }).await;
        _ = svc.execute(AddFavorite { listing_id: id("p1") }).await.unwrap();

        assert!(first.unwrap());
        assert!(!second.unwrap());
        let saved = svc.execute(query::favorites::List).await.unwrap();
        assert_eq!(
            saved.iter().map(|l| l.id.to_string()).collect::<Vec<_>>(),
            ["p1", "p4"],
        );
    }

    #[tokio::test]
    async fn rejects_unknown_listing() {
        let svc = Service::new(Config::default(), Memory::with_fixture());

        let err = svc
            .execute(AddFavorite { listing_id: id("p404") })
            .await
            .unwrap_err();

        let err: &ExecutionError = err.as_ref();
        assert!(matches!(
            err,
            ExecutionError::ListingNotExists(id) if id.to_string() == "p404",
        ));
    }
}
