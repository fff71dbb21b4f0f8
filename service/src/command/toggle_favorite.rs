//! [`Command`] for toggling whether a [`Listing`] is a [`Favorite`].

use std::collections::BTreeSet;

use common::operations::{All, By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{listing, Favorite, Listing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for saving a [`Listing`] to [`Favorite`]s if it's not saved
/// yet, or removing it otherwise.
#[derive(Clone, Debug)]
pub struct ToggleFavorite {
    /// ID of the [`Listing`] to be toggled.
    pub listing_id: listing::Id,
}

impl<Db> Command<ToggleFavorite> for Service<Db>
where
    Db: Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<BTreeSet<Favorite>, All>>,
            Ok = BTreeSet<Favorite>,
            Err = Traced<database::Error>,
        > + Database<Insert<Favorite>, Ok = bool, Err = Traced<database::Error>>
        + Database<Delete<Favorite>, Ok = bool, Err = Traced<database::Error>>,
{
    /// Indicator whether the [`Listing`] is a [`Favorite`] now.
    type Ok = bool;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ToggleFavorite,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ToggleFavorite { listing_id } = cmd;

        let listing = self
            .database()
            .execute(Select(By::<Option<Listing>, _>::new(listing_id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())?;
        let favorite = Favorite::from(listing.id);

        let saved = self
            .database()
            .execute(Select(By::<BTreeSet<Favorite>, _>::new(All)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .contains(&favorite);

        if saved {
            self.database()
                .execute(Delete(favorite))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        } else {
            self.database()
                .execute(Insert(favorite))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        Ok(!saved)
    }
}

/// Error of [`ToggleFavorite`] [`Command`] execution.
pub type ExecutionError = super::add_favorite::ExecutionError;
