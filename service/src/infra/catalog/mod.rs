//! [`Catalog`] of [`Listing`]s.

pub mod json;

use std::{collections::HashSet, fs, io, path::Path, sync::Arc};

use common::operations::{By, Select};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;
use tracing as log;

use crate::domain::{listing, Listing};

/// Operation over a [`Listing`]s storage.
pub use common::Handler as Catalog;

/// [`Catalog`] of [`Listing`]s loaded once and never changed afterwards.
#[derive(Clone, Debug, Default)]
pub struct Static {
    /// All the [`Listing`]s in their source order.
    listings: Arc<[Listing]>,
}

impl Static {
    /// Creates a new [`Static`] [`Catalog`] out of the provided [`Listing`]s.
    ///
    /// [`Listing`]s with an already seen [`listing::Id`] are skipped.
    #[must_use]
    pub fn new(listings: impl IntoIterator<Item = Listing>) -> Self {
        let mut seen = HashSet::new();
        let listings = listings
            .into_iter()
            .filter(|l| {
                let fresh = seen.insert(l.id.clone());
                if !fresh {
                    log::error!(
                        "skipping listing with duplicate ID `{}`",
                        l.id,
                    );
                }
                fresh
            })
            .collect();
        Self { listings }
    }

    /// Creates a new [`Static`] [`Catalog`] out of the provided JSON array
    /// of records.
    ///
    /// # Errors
    ///
    /// If the provided `json` cannot be parsed as an array.
    pub fn from_json(json: &[u8]) -> Result<Self, Traced<Error>> {
        let listings = json::parse(json).map_err(tracerr::from_and_wrap!())?;
        Ok(Self::new(listings))
    }

    /// Loads a new [`Static`] [`Catalog`] from the JSON file at the provided
    /// `path`.
    ///
    /// # Errors
    ///
    /// If the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Traced<Error>> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(tracerr::from_and_wrap!())?;
        let this = Self::from_json(&bytes).map_err(tracerr::wrap!())?;
        log::info!(
            "loaded {} listings from `{}`",
            this.listings.len(),
            path.display(),
        );
        Ok(this)
    }

    /// Returns the number of [`Listing`]s in this [`Catalog`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Indicates whether this [`Catalog`] has no [`Listing`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl Catalog<Select<By<Arc<[Listing]>, ()>>> for Static {
    type Ok = Arc<[Listing]>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<Arc<[Listing]>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(Arc::clone(&self.listings))
    }
}

impl Catalog<Select<By<Option<Listing>, listing::Id>>> for Static {
    type Ok = Option<Listing>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.listings.iter().find(|l| l.id == id).cloned())
    }
}

impl Catalog<Select<By<Option<Listing>, listing::Slug>>> for Static {
    type Ok = Option<Listing>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        let slug = by.into_inner();
        Ok(self.listings.iter().find(|l| l.slug == slug).cloned())
    }
}

/// [`Catalog`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Source file cannot be read.
    #[display("cannot read listings: {_0}")]
    Io(io::Error),

    /// Source file is not a JSON array.
    #[display("cannot parse listings: {_0}")]
    Json(serde_json::Error),
}
