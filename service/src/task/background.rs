//! Background environment for running [`Task`]s.

use std::{
    error::Error,
    future::{Future, IntoFuture},
    iter,
};

use futures::{
    future::{self, LocalBoxFuture},
    FutureExt as _, TryFutureExt as _,
};
use tokio::task;
use tracing as log;

#[cfg(doc)]
use crate::Task;

/// Boxed error of a [`Task`] running in the [`Background`].
type BoxedError = Box<dyn Error + 'static>;

/// Background environment for running [`Task`]s.
///
/// Spawned [`Task`]s make no progress until the [`Background`] itself is
/// awaited.
#[derive(Debug, Default)]
pub struct Background {
    /// Local set of tasks.
    set: task::LocalSet,

    /// Names and handles of spawned tasks.
    handles: Vec<(&'static str, task::JoinHandle<Result<(), BoxedError>>)>,
}

impl Background {
    /// Spawns a new [`Task`] inside the [`Background`] environment.
    pub fn spawn<F, E>(&mut self, name: &'static str, future: F)
    where
        F: Future<Output = Result<(), E>> + 'static,
        E: Error + 'static,
    {
        log::debug!("spawning `{name}` background task");
        self.handles.push((
            name,
            self.set
                .spawn_local(future.map_err(|e| BoxedError::from(Box::new(e)))),
        ));
    }

    /// Returns the number of spawned [`Task`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Indicates whether no [`Task`] was spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl IntoFuture for Background {
    type Output = Result<(), BoxedError>;
    type IntoFuture = LocalBoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let Self { set, handles } = self;
        future::try_join_all(iter::once(set.map(Ok).boxed_local()).chain(
            handles.into_iter().map(|(name, h)| {
                h.map(move |r| {
                    let res = match r {
                        Ok(res) => res,
                        Err(e) => Err(BoxedError::from(Box::new(e))),
                    };
                    if let Err(e) = &res {
                        log::error!("`{name}` background task failed: {e}");
                    }
                    res
                })
                .boxed_local()
            }),
        ))
        .map_ok(drop)
        .boxed_local()
    }
}
