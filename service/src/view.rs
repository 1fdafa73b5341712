//! [`ListingsView`] definitions.

use std::sync::Arc;

use tracing as log;

use crate::{
    domain::{listing, Listing},
    infra::map::Provider,
    map::{Availability, Diff, Hover, Synchronizer, Variant},
    read::{self, listing::list::Filter},
};

/// State of a listings page: the current [`Filter`], the [`Listing`]s it
/// leaves visible, the hovered [`Listing`] and the map [`Marker`]s.
///
/// Every [`Filter`] change re-synchronizes [`Marker`]s with the visible
/// [`Listing`]s, so the list and the map never disagree.
///
/// [`Marker`]: crate::map::Marker
#[derive(Clone, Debug)]
pub struct ListingsView {
    /// All the [`Listing`]s the [`Filter`] is applied to.
    listings: Arc<[Listing]>,

    /// Current [`Filter`].
    filter: Filter,

    /// Indices of the visible [`Listing`]s in `listings`.
    visible: Vec<usize>,

    /// ID of the hovered [`Listing`], if any.
    hovered: Option<listing::Id>,

    /// Map [`Marker`]s of the visible [`Listing`]s.
    ///
    /// [`Marker`]: crate::map::Marker
    map: Synchronizer,
}

impl ListingsView {
    /// Creates a new [`ListingsView`] showing all the provided [`Listing`]s.
    #[must_use]
    pub fn new(listings: Arc<[Listing]>, availability: Availability) -> Self {
        Self::filtered(listings, Filter::default(), availability)
    }

    /// Creates a new [`ListingsView`] showing the provided [`Listing`]s
    /// passing the provided [`Filter`].
    ///
    /// Map markers are synchronized with the visible [`Listing`]s right away.
    #[must_use]
    pub fn filtered(
        listings: Arc<[Listing]>,
        filter: Filter,
        availability: Availability,
    ) -> Self {
        let mut map = Synchronizer::new();
        map.set_availability(availability);
        let mut this = Self {
            listings,
            filter,
            visible: vec![],
            hovered: None,
            map,
        };
        _ = this.refresh();
        this
    }

    /// Returns the current [`Filter`].
    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Replaces the current [`Filter`], returning the [`Diff`] of map
    /// [`Marker`]s.
    ///
    /// [`Marker`]: crate::map::Marker
    pub fn set_filter(&mut self, filter: Filter) -> Diff {
        self.filter = filter;
        self.refresh()
    }

    /// Resets the current [`Filter`] to the default one, showing every
    /// [`Listing`].
    pub fn clear_filters(&mut self) -> Diff {
        self.set_filter(Filter::default())
    }

    /// Iterates over the visible [`Listing`]s in their source order.
    pub fn visible(&self) -> impl Iterator<Item = &Listing> {
        self.visible.iter().map(|&i| &self.listings[i])
    }

    /// Returns the number of the visible [`Listing`]s.
    #[must_use]
    pub fn count(&self) -> usize {
        self.visible.len()
    }

    /// Applies the provided [`Hover`] event.
    pub fn hover(&mut self, event: Hover) {
        event.apply(&mut self.hovered);
    }

    /// Returns ID of the hovered [`Listing`], if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&listing::Id> {
        self.hovered.as_ref()
    }

    /// Returns [`Variant`] of the list card of the [`Listing`] with the
    /// provided ID.
    #[must_use]
    pub fn card_variant(&self, id: &listing::Id) -> Variant {
        Variant::of(id, self.hovered.as_ref())
    }

    /// Sets [`Availability`] of the map.
    pub fn set_availability(&mut self, availability: Availability) {
        self.map.set_availability(availability);
    }

    /// Renders the map with the provided [`Provider`].
    pub fn map(&self, provider: &impl Provider) -> read::map::View {
        read::map::View::render(&self.map, self.hovered.as_ref(), provider)
    }

    /// Re-applies the current [`Filter`] and re-synchronizes the map.
    fn refresh(&mut self) -> Diff {
        let filter = &self.filter;
        self.visible = self
            .listings
            .iter()
            .enumerate()
            .filter_map(|(i, l)| filter.matches(l).then_some(i))
            .collect();

        let diff = self.map.sync(
            self.visible.iter().map(|&i| &self.listings[i]),
        );
        log::debug!(
            "{} listings visible, {} markers added, {} removed",
            self.visible.len(),
            diff.added.len(),
            diff.removed.len(),
        );

        if let Some(id) = &self.hovered {
            if !self.visible().any(|l| l.id == *id) {
                self.hovered = None;
            }
        }

        diff
    }
}

#[cfg(test)]
mod spec {
    use std::sync::Arc;

    use super::ListingsView;
    use crate::{
        domain::{
            listing::{
                Coords, Id, Images, Location, Months, PaymentPlan, Price,
                SizeAcres, Slug, Status, Title,
            },
            Listing,
        },
        infra::map::{self, Canvas, MarkerStyle},
        map::{Availability, Hover, Variant},
        read::listing::list::{Filter, LocationFilter, StatusFilter},
    };

    fn listing(id: &str, location: &str, status: Status) -> Listing {
        let price = Price::new(1_000_000).unwrap();
        Listing {
            id: Id::new(id).unwrap(),
            slug: Slug::new(id).unwrap(),
            title: Title::new(format!("Plot {id}")).unwrap(),
            location: Location::new(location).unwrap(),
            price,
            size: SizeAcres::new("1/8").unwrap(),
            coords: Coords::new(-3.5, 39.9),
            status,
            images: Images::new(vec!["cover.jpg".to_owned()]).unwrap(),
            payment_plan: PaymentPlan::new(
                100_000,
                Months::new(12).unwrap(),
                price,
            )
            .unwrap(),
            features: vec![],
            amenities: vec![],
            short_description: String::new(),
            long_description: String::new(),
        }
    }

    fn listings() -> Arc<[Listing]> {
        vec![
            listing("a", "Kilifi – Bofa", Status::Available),
            listing("b", "Malindi", Status::Sold),
            listing("c", "Kilifi – Chumani", Status::Available),
        ]
        .into()
    }

    fn ready() -> Availability {
        Availability::Ready(Canvas::kilifi(map::Kind::Mapbox))
    }

    fn id(id: &str) -> Id {
        Id::new(id).unwrap()
    }

    fn visible_ids(view: &ListingsView) -> Vec<String> {
        view.visible().map(|l| l.id.to_string()).collect()
    }

    #[test]
    fn shows_everything_by_default() {
        let view = ListingsView::new(listings(), ready());

        assert_eq!(visible_ids(&view), ["a", "b", "c"]);
        assert_eq!(view.map(&map::Mapbox::new(None)).markers.len(), 3);
    }

    #[test]
    fn starts_with_provided_filter() {
        let filter = Filter {
            location: LocationFilter::new("kilifi"),
            ..Filter::default()
        };

        let mut view =
            ListingsView::filtered(listings(), filter.clone(), ready());

        assert_eq!(view.filter(), &filter);
        assert_eq!(visible_ids(&view), ["a", "c"]);
        assert_eq!(view.map(&map::Mapbox::new(None)).markers.len(), 2);

        let diff = view.set_filter(filter);

        assert!(diff.is_empty());
    }

    #[test]
    fn filter_change_syncs_markers() {
        let mut view = ListingsView::new(listings(), ready());

        let diff = view.set_filter(Filter {
            location: LocationFilter::new("kilifi"),
            ..Filter::default()
        });

        assert_eq!(visible_ids(&view), ["a", "c"]);
        assert_eq!(diff.removed, [id("b")]);
        assert!(diff.added.is_empty());

        let diff = view.clear_filters();

        assert_eq!(diff.added, [id("b")]);
        assert_eq!(view.count(), 3);
    }

    #[test]
    fn hover_emphasizes_card_and_marker() {
        let mut view = ListingsView::new(listings(), ready());

        view.hover(Hover::Enter(id("c")));
        let map = view.map(&map::Google::new(None));

        assert_eq!(view.card_variant(&id("c")), Variant::Emphasized);
        assert_eq!(view.card_variant(&id("a")), Variant::Default);
        let emphasized = map
            .markers
            .iter()
            .filter(|m| m.variant == Variant::Emphasized)
            .collect::<Vec<_>>();
        assert_eq!(emphasized.len(), 1);
        assert_eq!(emphasized[0].marker.listing_id, id("c"));
        assert_eq!(emphasized[0].style.fill_color, MarkerStyle::ACCENT);

        view.hover(Hover::Leave);

        assert_eq!(view.hovered(), None);
    }

    #[test]
    fn hovering_unknown_id_emphasizes_no_marker() {
        let mut view = ListingsView::new(listings(), ready());

        view.hover(Hover::Enter(id("zzz")));

        assert_eq!(view.hovered(), Some(&id("zzz")));
        assert!(view
            .map(&map::Mapbox::new(None))
            .markers
            .iter()
            .all(|m| m.variant == Variant::Default));
    }

    #[test]
    fn filtering_out_hovered_listing_clears_hover() {
        let mut view = ListingsView::new(listings(), ready());
        view.hover(Hover::Enter(id("b")));

        _ = view.set_filter(Filter {
            status: StatusFilter::Only(Status::Available),
            ..Filter::default()
        });

        assert_eq!(view.hovered(), None);
    }

    #[test]
    fn list_survives_unavailable_map() {
        let mut view = ListingsView::new(listings(), Availability::Loading);

        assert!(view.map(&map::Mapbox::new(None)).markers.is_empty());

        view.set_availability(Availability::Unavailable {
            reason: "`mapbox` credentials are missing".to_owned(),
        });
        _ = view.set_filter(Filter {
            status: StatusFilter::Only(Status::Sold),
            ..Filter::default()
        });

        assert_eq!(visible_ids(&view), ["b"]);
        let map = view.map(&map::Mapbox::new(None));
        assert!(!map.availability.is_ready());
        assert!(map.markers.is_empty());

        view.set_availability(ready());

        assert_eq!(view.map(&map::Mapbox::new(None)).markers.len(), 1);
    }
}
