//! [`Command`] for removing a [`Listing`] from [`Favorite`]s.

use common::operations::{By, Delete, Select};
use tracerr::Traced;

use crate::{
    domain::{listing, Favorite, Listing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for removing a [`Listing`] from [`Favorite`]s.
#[derive(Clone, Debug)]
pub struct RemoveFavorite {
    /// ID of the [`Listing`] to be removed.
    pub listing_id: listing::Id,
}

impl<Db> Command<RemoveFavorite> for Service<Db>
where
    Db: Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + Database<Delete<Favorite>, Ok = bool, Err = Traced<database::Error>>,
{
    /// Indicator whether the [`Listing`] was saved before.
    type Ok = bool;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RemoveFavorite,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RemoveFavorite { listing_id } = cmd;

        let listing = self
            .database()
            .execute(Select(By::<Option<Listing>, _>::new(listing_id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Delete(Favorite::from(listing.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`RemoveFavorite`] [`Command`] execution.
pub type ExecutionError = super::add_favorite::ExecutionError;
