//! Service contains the business logic of the listings site: filtering of
//! [`domain::Listing`]s and synchronization of their map markers.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod domain;
pub mod infra;
pub mod map;
pub mod query;
pub mod read;
pub mod task;
pub mod view;

use std::sync::Arc;

use common::operations::{By, Start};
use derive_more::{Debug, Error};
use tokio::sync::watch;

#[cfg(doc)]
use infra::{Catalog, MapProvider};

pub use self::{query::Query, task::Task, view::ListingsView};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Contact [`domain::contact::Channels`] offered on every listing.
    pub contact: domain::contact::Channels,

    /// [`task::InitializeMap`] configuration.
    pub initialize_map: task::initialize_map::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<C, M> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Catalog`] of this [`Service`].
    catalog: C,

    /// [`MapProvider`] of this [`Service`].
    map: M,

    /// Current [`map::Availability`] of the [`MapProvider`].
    #[debug(skip)]
    availability: Arc<watch::Sender<map::Availability>>,
}

impl<C, M> Service<C, M> {
    /// Creates a new [`Service`] with the provided parameters.
    ///
    /// The [`MapProvider`] is initialized in the returned
    /// [`task::Background`], until then the map stays
    /// [`map::Availability::Loading`].
    pub fn new(
        config: Config,
        catalog: C,
        map: M,
    ) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::InitializeMap<Self>,
                        task::initialize_map::Config,
                    >,
                >,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let (availability, _) = watch::channel(map::Availability::Loading);
        let this = Service {
            config,
            catalog,
            map,
            availability: Arc::new(availability),
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn("InitializeMap", async move {
            svc.execute(Start(By::new(svc.config().initialize_map)))
                .await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Catalog`] of this [`Service`].
    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Returns [`MapProvider`] of this [`Service`].
    #[must_use]
    pub fn map_provider(&self) -> &M {
        &self.map
    }

    /// Returns the current [`map::Availability`] of the [`MapProvider`].
    #[must_use]
    pub fn availability(&self) -> map::Availability {
        self.availability.borrow().clone()
    }

    /// Publishes new [`map::Availability`] of the [`MapProvider`].
    pub(crate) fn set_availability(&self, availability: map::Availability) {
        _ = self.availability.send_replace(availability);
    }
}
