//! [`Command`] definition.

pub mod add_favorite;
pub mod remove_favorite;
pub mod submit_booking;
pub mod toggle_favorite;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_favorite::AddFavorite, remove_favorite::RemoveFavorite,
    submit_booking::SubmitBooking, toggle_favorite::ToggleFavorite,
};
