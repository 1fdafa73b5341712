//! Map-related read definitions.

use crate::{
    domain::listing,
    infra::map::{MarkerStyle, Provider},
    map::{Availability, Marker, Synchronizer, Variant},
};

/// Snapshot of a map, ready to be rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    /// [`Availability`] of the map.
    pub availability: Availability,

    /// Styled [`Marker`]s to render.
    ///
    /// Always empty unless the map is [`Availability::Ready`].
    pub markers: Vec<StyledMarker>,
}

impl View {
    /// Renders the current state of the provided [`Synchronizer`] with the
    /// provided `hovered` [`listing::Id`].
    pub fn render(
        sync: &Synchronizer,
        hovered: Option<&listing::Id>,
        provider: &impl Provider,
    ) -> Self {
        let availability = sync.availability().clone();
        let markers = if availability.is_ready() {
            sync.markers(hovered)
                .map(|(marker, variant)| StyledMarker {
                    marker: marker.clone(),
                    variant,
                    style: provider.marker_style(marker.status, variant),
                })
                .collect()
        } else {
            vec![]
        };
        Self {
            availability,
            markers,
        }
    }
}

/// [`Marker`] along with its look.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledMarker {
    /// Rendered [`Marker`].
    pub marker: Marker,

    /// [`Variant`] of the [`Marker`].
    pub variant: Variant,

    /// Provider-specific [`MarkerStyle`] of the [`Marker`].
    pub style: MarkerStyle,
}
