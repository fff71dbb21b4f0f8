//! Domain definitions.

pub mod booking;
pub mod district;
pub mod favorite;
pub mod landlord;
pub mod listing;

pub use self::{
    district::District, favorite::Favorite, landlord::Landlord,
    listing::Listing,
};
