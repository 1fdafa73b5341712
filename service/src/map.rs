//! Synchronization of map markers with the visible [`Listing`]s.

use std::collections::HashSet;

use crate::{
    domain::{listing, Listing},
    infra::map::Canvas,
};

/// Map marker representing a single [`Listing`].
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// ID of the [`Listing`] this [`Marker`] represents.
    pub listing_id: listing::Id,

    /// Position of this [`Marker`].
    pub coords: listing::Coords,

    /// [`listing::Status`] of the represented [`Listing`].
    pub status: listing::Status,
}

impl Marker {
    /// Creates a new [`Marker`] for the provided [`Listing`].
    ///
    /// [`None`] is returned if the [`Listing`] has no coordinates.
    #[must_use]
    pub fn new(listing: &Listing) -> Option<Self> {
        Some(Self {
            listing_id: listing.id.clone(),
            coords: listing.coords?,
            status: listing.status,
        })
    }
}

/// Visual variant of a [`Marker`] or a list card.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Variant {
    /// Regular look.
    #[default]
    Default,

    /// Highlighted look of the hovered [`Listing`].
    Emphasized,
}

impl Variant {
    /// Returns the [`Variant`] of the [`Listing`] with the provided ID, given
    /// the currently `hovered` one.
    #[must_use]
    pub fn of(id: &listing::Id, hovered: Option<&listing::Id>) -> Self {
        if hovered == Some(id) {
            Self::Emphasized
        } else {
            Self::Default
        }
    }
}

/// Pointer hover event, coming either from a list card or a [`Marker`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Hover {
    /// Pointer entered the [`Listing`] with the provided ID.
    Enter(listing::Id),

    /// Pointer left whatever it hovered.
    Leave,
}

impl Hover {
    /// Applies this [`Hover`] event to the `hovered` state.
    pub fn apply(self, hovered: &mut Option<listing::Id>) {
        *hovered = match self {
            Self::Enter(id) => Some(id),
            Self::Leave => None,
        };
    }
}

/// Availability of the map.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Availability {
    /// Map provider is still being initialized.
    #[default]
    Loading,

    /// Map is ready to render [`Marker`]s on the [`Canvas`].
    Ready(Canvas),

    /// Map provider failed to initialize.
    Unavailable {
        /// Human-readable reason of the failure.
        reason: String,
    },
}

impl Availability {
    /// Indicates whether the map can render [`Marker`]s.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Changes applied to [`Marker`]s by a [`Synchronizer::sync()`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Diff {
    /// IDs of the [`Listing`]s whose [`Marker`]s were added.
    pub added: Vec<listing::Id>,

    /// IDs of the [`Listing`]s whose [`Marker`]s were removed.
    pub removed: Vec<listing::Id>,
}

impl Diff {
    /// Indicates whether no [`Marker`] was changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Keeps exactly one [`Marker`] per visible mappable [`Listing`].
///
/// [`Marker`]s are kept in the order of the last synchronized [`Listing`]s.
#[derive(Clone, Debug, Default)]
pub struct Synchronizer {
    /// Current [`Availability`] of the map.
    availability: Availability,

    /// Current [`Marker`]s.
    markers: Vec<Marker>,
}

impl Synchronizer {
    /// Creates a new [`Synchronizer`] with no [`Marker`]s and a map still
    /// [`Availability::Loading`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current [`Availability`] of the map.
    #[must_use]
    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    /// Sets the [`Availability`] of the map.
    ///
    /// [`Marker`]s are kept regardless, so they are rendered as soon as the
    /// map becomes ready.
    pub fn set_availability(&mut self, availability: Availability) {
        self.availability = availability;
    }

    /// Reconciles [`Marker`]s with the provided visible [`Listing`]s.
    ///
    /// [`Listing`]s without coordinates get no [`Marker`]. [`Marker`]s of
    /// [`Listing`]s present before and after are left untouched.
    pub fn sync<'l>(
        &mut self,
        listings: impl IntoIterator<Item = &'l Listing>,
    ) -> Diff {
        let wanted = listings
            .into_iter()
            .filter_map(Marker::new)
            .collect::<Vec<_>>();
        let wanted_ids =
            wanted.iter().map(|m| &m.listing_id).collect::<HashSet<_>>();

        let mut diff = Diff::default();
        let mut kept = Vec::with_capacity(wanted.len());
        for marker in self.markers.drain(..) {
            if wanted_ids.contains(&marker.listing_id) {
                kept.push(marker);
            } else {
                diff.removed.push(marker.listing_id);
            }
        }

        let mut next = Vec::with_capacity(wanted.len());
        for marker in wanted {
            if let Some(pos) =
                kept.iter().position(|m| m.listing_id == marker.listing_id)
            {
                next.push(kept.swap_remove(pos));
            } else {
                diff.added.push(marker.listing_id.clone());
                next.push(marker);
            }
        }
        self.markers = next;

        diff
    }

    /// Returns the current [`Marker`]s along with their [`Variant`]s for the
    /// provided `hovered` [`Listing`] ID.
    ///
    /// At most one [`Marker`] is [`Variant::Emphasized`].
    pub fn markers<'s>(
        &'s self,
        hovered: Option<&'s listing::Id>,
    ) -> impl Iterator<Item = (&'s Marker, Variant)> + 's {
        self.markers
            .iter()
            .map(move |m| (m, Variant::of(&m.listing_id, hovered)))
    }

    /// Indicates whether there is a [`Marker`] for the [`Listing`] with the
    /// provided ID.
    #[must_use]
    pub fn contains(&self, id: &listing::Id) -> bool {
        self.markers.iter().any(|m| m.listing_id == *id)
    }

    /// Returns the number of current [`Marker`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Indicates whether there are no [`Marker`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod spec {
    use super::{Availability, Hover, Synchronizer, Variant};
    use crate::{
        domain::{
            listing::{
                Coords, Id, Images, Location, Months, PaymentPlan, Price,
                SizeAcres, Slug, Status, Title,
            },
            Listing,
        },
        infra::map::{self, Canvas},
    };

    fn listing(id: &str, coords: Option<Coords>) -> Listing {
        let price = Price::new(1_000_000).unwrap();
        Listing {
            id: Id::new(id).unwrap(),
            slug: Slug::new(id).unwrap(),
            title: Title::new(id).unwrap(),
            location: Location::new("Kilifi – Bofa").unwrap(),
            price,
            size: SizeAcres::new("1/8").unwrap(),
            coords,
            status: Status::Available,
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

    fn mapped(id: &str) -> Listing {
        listing(id, Coords::new(-3.5, 39.9))
    }

    fn id(id: &str) -> Id {
        Id::new(id).unwrap()
    }

    fn marker_ids(sync: &Synchronizer) -> Vec<String> {
        sync.markers(None)
            .map(|(m, _)| m.listing_id.to_string())
            .collect()
    }

    #[test]
    fn adds_markers_for_new_listings() {
        let mut sync = Synchronizer::new();
        let all = [mapped("a"), mapped("b")];

        let diff = sync.sync(&all);

        assert_eq!(diff.added, [id("a"), id("b")]);
        assert!(diff.removed.is_empty());
        assert_eq!(marker_ids(&sync), ["a", "b"]);
    }

    #[test]
    fn removes_only_missing_markers() {
        let mut sync = Synchronizer::new();
        let all = [mapped("a"), mapped("b"), mapped("c")];
        _ = sync.sync(&all);

        let diff = sync.sync([&all[0], &all[2]]);

        assert!(diff.added.is_empty());
        assert_eq!(diff.removed, [id("b")]);
        assert_eq!(marker_ids(&sync), ["a", "c"]);
    }

    #[test]
    fn same_listings_produce_empty_diff() {
        let mut sync = Synchronizer::new();
        let all = [mapped("a"), mapped("b")];
        _ = sync.sync(&all);

        assert!(sync.sync(&all).is_empty());
        assert_eq!(sync.len(), 2);
    }

    #[test]
    fn follows_new_listings_order() {
        let mut sync = Synchronizer::new();
        let all = [mapped("a"), mapped("b"), mapped("c")];
        _ = sync.sync(&all);

        let diff = sync.sync([&all[2], &all[0]]);

        assert_eq!(diff.removed, [id("b")]);
        assert_eq!(marker_ids(&sync), ["c", "a"]);
    }

    #[test]
    fn skips_listings_without_coords() {
        let mut sync = Synchronizer::new();
        let all = [mapped("a"), listing("b", None)];

        let diff = sync.sync(&all);

        assert_eq!(diff.added, [id("a")]);
        assert!(!sync.contains(&id("b")));
    }

    #[test]
    fn empty_listings_remove_every_marker() {
        let mut sync = Synchronizer::new();
        _ = sync.sync(&[mapped("a")]);

        let diff = sync.sync(&[]);

        assert_eq!(diff.removed, [id("a")]);
        assert!(sync.is_empty());
    }

    #[test]
    fn emphasizes_only_hovered_marker() {
        let mut sync = Synchronizer::new();
        _ = sync.sync(&[mapped("a"), mapped("b")]);
        let hovered = id("b");

        let variants = sync
            .markers(Some(&hovered))
            .map(|(m, v)| (m.listing_id.to_string(), v))
            .collect::<Vec<_>>();

        assert_eq!(
            variants,
            [
                ("a".to_owned(), Variant::Default),
                ("b".to_owned(), Variant::Emphasized),
            ],
        );
    }

    #[test]
    fn last_hover_wins() {
        let mut hovered = None;

        Hover::Enter(id("a")).apply(&mut hovered);
        Hover::Enter(id("b")).apply(&mut hovered);

        assert_eq!(hovered, Some(id("b")));
        assert_eq!(Variant::of(&id("a"), hovered.as_ref()), Variant::Default);

        Hover::Leave.apply(&mut hovered);

        assert_eq!(hovered, None);
    }

    #[test]
    fn keeps_markers_regardless_of_availability() {
        let mut sync = Synchronizer::new();
        _ = sync.sync(&[mapped("a")]);

        sync.set_availability(Availability::Unavailable {
            reason: "no token".to_owned(),
        });
        assert!(!sync.availability().is_ready());
        assert_eq!(sync.len(), 1);

        sync.set_availability(Availability::Ready(Canvas::kilifi(
            map::Kind::Mapbox,
        )));
        assert!(sync.availability().is_ready());
        assert_eq!(sync.len(), 1);
    }
}
