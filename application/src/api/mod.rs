//! GraphQL API definitions.

pub mod listing;
pub mod map;
mod query;
pub mod scalar;

use juniper::{EmptyMutation, EmptySubscription};

use crate::{define_error, Context};

pub use self::{listing::Listing, map::Map, query::Query};

/// GraphQL schema.
pub type Schema = juniper::RootNode<
    'static,
    Query,
    EmptyMutation<Context>,
    EmptySubscription<Context>,
>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, EmptyMutation::new(), EmptySubscription::new())
}

define_error! {
    enum ListingError {
        #[code = "LISTING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Listing` with the specified slug does not exist"]
        NotExists,
    }
}

define_error! {
    enum FilterError {
        #[code = "INVALID_SIZE"]
        #[status = BAD_REQUEST]
        #[message = "Invalid `sizeAcres` filter"]
        InvalidSize,
    }
}
