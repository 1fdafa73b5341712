//! [`Query`] collection related to a single [`Listing`].

use common::operations::By;

use crate::domain::{listing, Listing};
#[cfg(doc)]
use crate::Query;

use super::CatalogQuery;

/// Queries a [`Listing`] by its [`listing::Id`].
pub type ById = CatalogQuery<By<Option<Listing>, listing::Id>>;

/// Queries a [`Listing`] by its [`listing::Slug`].
pub type BySlug = CatalogQuery<By<Option<Listing>, listing::Slug>>;

#[cfg(test)]
mod spec {
    use futures::executor::block_on;

    use super::{ById, BySlug};
    use crate::{
        domain::listing,
        query::{spec::service, Query as _},
    };

    #[test]
    fn finds_listing_by_slug() {
        let service = service();

        let found = block_on(service.execute(BySlug::by(
            listing::Slug::new("chumani-beach-view").unwrap(),
        )))
        .unwrap();

        assert_eq!(found.unwrap().id.to_string(), "2");
    }

    #[test]
    fn misses_unknown_listing() {
        let service = service();

        let by_slug = block_on(
            service.execute(BySlug::by(listing::Slug::new("nope").unwrap())),
        )
        .unwrap();
        let by_id = block_on(
            service.execute(ById::by(listing::Id::new("42").unwrap())),
        )
        .unwrap();

        assert!(by_slug.is_none());
        assert!(by_id.is_none());
    }
}
