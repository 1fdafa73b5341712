//! [`Query`] collection related to the map.

use std::sync::Arc;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    infra::{catalog, map::Provider, Catalog},
    map::Hover,
    read::{self, listing::list::Filter},
    ListingsView, Service,
};

use super::Query;

/// Queries map [`read::map::View`] of the [`Listing`]s passing the provided
/// [`Filter`].
///
/// Never waits for the map [`Provider`] to initialize: the current
/// [`Availability`] is reported instead.
///
/// [`Availability`]: crate::map::Availability
#[derive(Clone, Debug, Default)]
pub struct Markers {
    /// [`Filter`] selecting the [`Listing`]s to put on the map.
    pub filter: Filter,

    /// ID of the hovered [`Listing`], if any.
    pub hovered: Option<listing::Id>,
}

impl<C, M> Query<Markers> for Service<C, M>
where
    C: Catalog<
        Select<By<Arc<[Listing]>, ()>>,
        Ok = Arc<[Listing]>,
        Err = Traced<catalog::Error>,
    >,
    M: Provider,
{
    type Ok = read::map::View;
    type Err = Traced<catalog::Error>;

    async fn execute(
        &self,
        Markers { filter, hovered }: Markers,
    ) -> Result<Self::Ok, Self::Err> {
        let all = self.all_listings().await.map_err(tracerr::wrap!())?;

        let mut view =
            ListingsView::filtered(all, filter, self.availability());
        if let Some(id) = hovered {
            view.hover(Hover::Enter(id));
        }
        Ok(view.map(self.map_provider()))
    }
}

#[cfg(test)]
mod spec {
    use futures::executor::block_on;
    use secrecy::SecretString;

    use super::Markers;
    use crate::{
        domain::listing,
        infra::map::{self, Canvas, MarkerStyle},
        map::{Availability, Variant},
        query::{spec::service_with, Query as _},
        read::listing::list::{Filter, SearchTerm},
    };

    fn mapbox() -> map::Configured {
        map::Mapbox::new(Some(SecretString::from("pk.test".to_owned()))).into()
    }

    #[test]
    fn reports_loading_map_without_markers() {
        let service = service_with(mapbox());

        let view = block_on(service.execute(Markers::default())).unwrap();

        assert_eq!(view.availability, Availability::Loading);
        assert!(view.markers.is_empty());
    }

    #[test]
    fn renders_markers_of_mappable_listings() {
        let service = service_with(mapbox());
        service.set_availability(Availability::Ready(Canvas::kilifi(
            map::Kind::Mapbox,
        )));

        let view = block_on(service.execute(Markers {
            hovered: listing::Id::new("2"),
            ..Markers::default()
        }))
        .unwrap();

        assert!(view.availability.is_ready());
        let markers = view
            .markers
            .iter()
            .map(|m| (m.marker.listing_id.to_string(), m.variant, m.style))
            .collect::<Vec<_>>();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].0, "1");
        assert_eq!(markers[0].1, Variant::Default);
        assert_eq!(markers[1].0, "2");
        assert_eq!(markers[1].1, Variant::Emphasized);
        assert_eq!(markers[1].2.scale, 1.2);
        assert_eq!(markers[1].2.fill_color, MarkerStyle::NEUTRAL);
    }

    #[test]
    fn renders_only_filtered_markers() {
        let service = service_with(mapbox());
        service.set_availability(Availability::Ready(Canvas::kilifi(
            map::Kind::Mapbox,
        )));

        let view = block_on(service.execute(Markers {
            filter: Filter {
                search: SearchTerm::new("bofa"),
                ..Filter::default()
            },
            hovered: None,
        }))
        .unwrap();

        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.markers[0].marker.listing_id.to_string(), "1");
    }
}
