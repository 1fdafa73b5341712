//! [`Handler`] abstractions.

use std::future::Future;

/// Operation executable against some component (service, catalog, map
/// provider) with the provided arguments.
///
/// Arguments are usually one of the [`operations`] marker types, so a single
/// component may implement [`Handler`] many times, once per operation.
///
/// [`operations`]: crate::operations
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
