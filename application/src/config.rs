//! [`Config`]-related definitions.

use std::{path::PathBuf, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use secrecy::SecretString;
use serde::Deserialize;
use service::{domain::contact, infra::map};
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Listings data configuration.
    pub data: Data,

    /// Map configuration.
    pub map: Map,

    /// Contact channels configuration.
    pub contact: Contact,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Listings data configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Data {
    /// Path to the JSON file with listings.
    #[default(PathBuf::from("data/listings.json"))]
    pub listings: PathBuf,
}

/// Map configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Map {
    /// Map provider to render markers with.
    #[default(MapProvider::Mapbox)]
    pub provider: MapProvider,

    /// Mapbox public access token.
    pub mapbox_token: Option<String>,

    /// Google Maps JavaScript API key.
    pub google_api_key: Option<String>,

    /// Timeout of the map provider initialization.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub init_timeout: time::Duration,
}

impl From<Map> for map::Configured {
    fn from(value: Map) -> Self {
        let Map {
            provider,
            mapbox_token,
            google_api_key,
            init_timeout: _,
        } = value;
        match provider {
            MapProvider::Mapbox => {
                map::Mapbox::new(mapbox_token.map(SecretString::from)).into()
            }
            MapProvider::Google => {
                map::Google::new(google_api_key.map(SecretString::from)).into()
            }
            MapProvider::Disabled => Self::default(),
        }
    }
}

/// Map provider.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapProvider {
    /// [Mapbox GL JS](https://docs.mapbox.com/mapbox-gl-js).
    Mapbox,

    /// [Google Maps](https://developers.google.com/maps).
    Google,

    /// No map at all.
    Disabled,
}

/// Contact channels configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Contact {
    /// Phone number for calls.
    #[default("+254724027747".to_owned())]
    pub phone: String,

    /// Phone number registered in WhatsApp.
    #[default("+254783027747".to_owned())]
    pub whatsapp: String,

    /// Email address.
    #[default("info@inukanaploti.com".to_owned())]
    pub email: String,
}

impl TryFrom<Contact> for contact::Channels {
    type Error = &'static str;

    fn try_from(value: Contact) -> Result<Self, Self::Error> {
        let Contact {
            phone,
            whatsapp,
            email,
        } = value;
        Ok(Self {
            phone: phone.parse()?,
            whatsapp: whatsapp.parse()?,
            email: email.parse()?,
        })
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{
        domain::contact,
        infra::map::{self, Provider as _},
    };

    use super::{Config, Contact, Map, MapProvider};

    #[test]
    fn defaults_to_mapbox_without_token() {
        let config = Config::default();

        assert!(matches!(config.map.provider, MapProvider::Mapbox));
        assert!(config.map.mapbox_token.is_none());
        assert_eq!(config.map.init_timeout.as_secs(), 10);
        assert_eq!(
            map::Configured::from(config.map).kind(),
            map::Kind::Mapbox,
        );
    }

    #[test]
    fn selects_configured_provider() {
        let google = Map {
            provider: MapProvider::Google,
            ..Map::default()
        };
        let disabled = Map {
            provider: MapProvider::Disabled,
            ..Map::default()
        };

        assert_eq!(map::Configured::from(google).kind(), map::Kind::Google);
        assert_eq!(
            map::Configured::from(disabled).kind(),
            map::Kind::Disabled,
        );
    }

    #[test]
    fn converts_contact_channels() {
        let channels = contact::Channels::try_from(Contact::default()).unwrap();

        assert_eq!(channels.call_link(), "tel:+254724027747");
        assert_eq!(channels.email_link(), "mailto:info@inukanaploti.com");

        let invalid = Contact {
            email: "not an email".to_owned(),
            ..Contact::default()
        };
        assert!(contact::Channels::try_from(invalid).is_err());
    }

    #[test]
    fn loads_defaults_without_file() {
        let config = Config::new("/nonexistent/config.toml").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.data.listings.to_str(),
            Some("data/listings.json"),
        );
    }
}
