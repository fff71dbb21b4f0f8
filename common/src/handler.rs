//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Queries, commands and storage operations are all [`Handler`]s
/// parametrized by the operation they perform, so a single type (like a
/// service or a database) may implement it many times for different `Args`.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
