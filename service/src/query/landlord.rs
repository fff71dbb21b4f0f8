//! [`Query`] collection related to a single [`Landlord`].

use common::operations::By;

use crate::domain::{landlord, Landlord};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Landlord`] by its [`landlord::Id`].
pub type ById = DatabaseQuery<By<Option<Landlord>, landlord::Id>>;
