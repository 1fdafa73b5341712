//! [`Query`] collection related to the multiple [`Listing`]s.

use std::sync::Arc;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Listing,
    infra::{catalog, Catalog},
    read::listing::list::{self, Filter},
    Service,
};

use super::Query;

/// Queries [`Listing`]s passing the provided [`Filter`], in their source
/// order.
#[derive(Clone, Debug, Default)]
pub struct List {
    /// [`Filter`] to apply.
    pub filter: Filter,
}

impl<C, M> Query<List> for Service<C, M>
where
    C: Catalog<
        Select<By<Arc<[Listing]>, ()>>,
        Ok = Arc<[Listing]>,
        Err = Traced<catalog::Error>,
    >,
{
    type Ok = Vec<Listing>;
    type Err = Traced<catalog::Error>;

    async fn execute(
        &self,
        List { filter }: List,
    ) -> Result<Self::Ok, Self::Err> {
        let all = self.all_listings().await.map_err(tracerr::wrap!())?;
        Ok(filter.apply(all.iter()).into_iter().cloned().collect())
    }
}

/// Queries distinct location areas of all the [`Listing`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Locations;

impl<C, M> Query<Locations> for Service<C, M>
where
    C: Catalog<
        Select<By<Arc<[Listing]>, ()>>,
        Ok = Arc<[Listing]>,
        Err = Traced<catalog::Error>,
    >,
{
    type Ok = Vec<String>;
    type Err = Traced<catalog::Error>;

    async fn execute(&self, _: Locations) -> Result<Self::Ok, Self::Err> {
        let all = self.all_listings().await.map_err(tracerr::wrap!())?;
        Ok(list::locations(all.iter())
            .into_iter()
            .map(ToOwned::to_owned)
            .collect())
    }
}

#[cfg(test)]
mod spec {
    use futures::executor::block_on;

    use super::{List, Locations};
    use crate::{
        domain::listing::Status,
        query::{spec::service, Query as _},
        read::listing::list::{Filter, PriceRange, StatusFilter},
    };

    #[test]
    fn lists_everything_by_default() {
        let listings =
            block_on(service().execute(List::default())).unwrap();

        assert_eq!(listings.len(), 3);
    }

    #[test]
    fn lists_filtered() {
        let listings = block_on(service().execute(List {
            filter: Filter {
                price: PriceRange::new(0, 1_000_000),
                status: StatusFilter::Only(Status::Available),
                ..Filter::default()
            },
        }))
        .unwrap();

        let ids = listings.iter().map(|l| l.id.to_string()).collect::<Vec<_>>();
        assert_eq!(ids, ["3"]);
    }

    #[test]
    fn lists_location_areas() {
        let areas = block_on(service().execute(Locations)).unwrap();

        assert_eq!(areas, ["Kilifi", "Malindi"]);
    }
}
