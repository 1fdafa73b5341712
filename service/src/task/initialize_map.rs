//! [`InitializeMap`] [`Task`].

use std::{convert::Infallible, time};

use common::operations::{By, Perform, Start};
use tokio::time::timeout;
use tracerr::Traced;
use tracing as log;

use crate::{
    infra::map::{self, Canvas, Provider},
    map::Availability,
    Service,
};

use super::Task;

/// Configuration for [`InitializeMap`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Timeout after which the map [`Provider`] is considered unavailable.
    pub timeout: time::Duration,
}

/// [`Task`] for initializing the map [`Provider`] of a [`Service`].
#[derive(Clone, Copy, Debug)]
pub struct InitializeMap<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<C, M> Task<Start<By<InitializeMap<Self>, Config>>> for Service<C, M>
where
    InitializeMap<Service<C, M>>:
        Task<Perform<()>, Ok = Canvas, Err = ExecutionError>,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<InitializeMap<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = InitializeMap {
            config,
            service: self.clone(),
        };

        let availability = match task.execute(Perform(())).await {
            Ok(canvas) => {
                log::info!("`{}` map is ready", canvas.provider);
                Availability::Ready(canvas)
            }
            Err(e) => {
                log::error!("`task::InitializeMap` failed: {e}");
                Availability::Unavailable {
                    reason: e.as_ref().to_string(),
                }
            }
        };
        self.set_availability(availability);
        Ok(())
    }
}

impl<C, M> Task<Perform<()>> for InitializeMap<Service<C, M>>
where
    M: Provider,
{
    type Ok = Canvas;
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let provider = self.service.map_provider();
        let kind = provider.kind();
        timeout(self.config.timeout, provider.initialize())
            .await
            .map_err(|_| tracerr::new!(map::Error::Timeout(kind)))?
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`InitializeMap`] execution.
pub type ExecutionError = Traced<map::Error>;
