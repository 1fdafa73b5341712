//! [`Query`] definition.

pub mod listing;
pub mod listings;
pub mod map;

use std::sync::Arc;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Listing,
    infra::{catalog, Catalog},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Catalog`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct CatalogQuery<T>(T);

impl<W, B> CatalogQuery<By<W, B>> {
    /// Creates a new [`CatalogQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<C, M, W, B> Query<CatalogQuery<By<W, B>>> for Service<C, M>
where
    C: Catalog<Select<By<W, B>>, Ok = W, Err = Traced<catalog::Error>>,
{
    type Ok = W;
    type Err = Traced<catalog::Error>;

    async fn execute(
        &self,
        CatalogQuery(by): CatalogQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.catalog()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C, M> Service<C, M>
where
    C: Catalog<
        Select<By<Arc<[Listing]>, ()>>,
        Ok = Arc<[Listing]>,
        Err = Traced<catalog::Error>,
    >,
{
    /// Selects all the [`Listing`]s from the [`Catalog`].
    async fn all_listings(
        &self,
    ) -> Result<Arc<[Listing]>, Traced<catalog::Error>> {
        self.catalog()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use std::time::Duration;

    use crate::{
        domain::contact::Channels,
        infra::{catalog, map},
        task, Config, Service,
    };

    const LISTINGS: &str = r#"[
        {
            "id": "1", "slug": "bofa-phase-20", "title": "Bofa Phase 20",
            "location": "Kilifi – Bofa", "priceKES": 1950000,
            "sizeAcres": "1/8", "coords": {"lat": -3.58, "lng": 39.87},
            "status": "available", "images": ["bofa.jpg"],
            "paymentPlan": {"depositKES": 500000, "months": 12}
        },
        {
            "id": "2", "slug": "chumani-beach-view",
            "title": "Chumani Beach View", "location": "Kilifi – Chumani",
            "priceKES": 650000, "sizeAcres": "1/8",
            "coords": {"lat": -3.48, "lng": 39.92},
            "status": "sold", "images": ["chumani.jpg"],
            "paymentPlan": {"depositKES": 250000, "months": 12}
        },
        {
            "id": "3", "slug": "malindi-north", "title": "Malindi North",
            "location": "Malindi", "priceKES": 800000, "sizeAcres": "1/4",
            "status": "available", "images": ["malindi.jpg"],
            "paymentPlan": {"depositKES": 200000, "months": 6}
        }
    ]"#;

    /// Creates a [`Service`] over a few [`Listing`]s with the provided map
    /// provider.
    ///
    /// [`Listing`]: crate::domain::Listing
    pub(crate) fn service_with<M>(map: M) -> Service<catalog::Static, M>
    where
        M: map::Provider + Clone + 'static,
    {
        let (service, _) = Service::new(
            Config {
                contact: Channels {
                    phone: "+254 700 000 000".parse().unwrap(),
                    whatsapp: "+254 700 000 000".parse().unwrap(),
                    email: "sales@example.com".parse().unwrap(),
                },
                initialize_map: task::initialize_map::Config {
                    timeout: Duration::from_secs(5),
                },
            },
            catalog::Static::from_json(LISTINGS.as_bytes()).unwrap(),
            map,
        );
        service
    }

    /// Creates a [`Service`] over a few [`Listing`]s with no map provider.
    ///
    /// [`Listing`]: crate::domain::Listing
    pub(crate) fn service() -> Service<catalog::Static, map::Configured> {
        service_with(map::Configured::default())
    }
}
