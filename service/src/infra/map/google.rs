//! [Google Maps] map [`Provider`].
//!
//! [Google Maps]: https://developers.google.com/maps

use secrecy::{ExposeSecret as _, SecretString};
use tracerr::Traced;

use super::{Canvas, Error, Kind, MarkerStyle, Provider};
use crate::{domain::listing, map::Variant};

/// [Google Maps] map [`Provider`].
///
/// [Google Maps]: https://developers.google.com/maps
#[derive(Clone, Debug)]
pub struct Google {
    /// API key of the Google Maps JavaScript API.
    api_key: Option<SecretString>,
}

impl Google {
    /// Creates a new [`Google`] provider authorized with the provided
    /// `api_key`.
    #[must_use]
    pub fn new(api_key: Option<SecretString>) -> Self {
        Self { api_key }
    }
}

impl Provider for Google {
    fn kind(&self) -> Kind {
        Kind::Google
    }

    async fn initialize(&self) -> Result<Canvas, Traced<Error>> {
        let has_key = self
            .api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty());
        if !has_key {
            return Err(tracerr::new!(Error::MissingCredentials(Kind::Google)));
        }

        Ok(Canvas::kilifi(Kind::Google))
    }

    fn marker_style(
        &self,
        status: listing::Status,
        variant: Variant,
    ) -> MarkerStyle {
        match variant {
            Variant::Default => MarkerStyle {
                scale: 8.0,
                z_index: 1,
                fill_color: MarkerStyle::fill_of(status),
            },
            Variant::Emphasized => MarkerStyle {
                scale: 10.0,
                z_index: 1000,
                fill_color: MarkerStyle::ACCENT,
            },
        }
    }
}
