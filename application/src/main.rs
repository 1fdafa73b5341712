use std::{
    future::IntoFuture as _,
    io,
    sync::{Arc, OnceLock},
    time,
};

use application::{api, config, graphql, healthz, Args, Config, Service};
use axum::{
    extract::MatchedPath,
    routing::{get, on, MethodFilter},
    Extension, Router,
};
use axum_client_ip::InsecureClientIp;
use futures::{future, TryFutureExt as _};
use service::{domain::contact::Channels, infra::catalog, task};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

/// Levels written to `stderr` rather than `stdout`.
const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

/// Configured maximum log level, set once the [`Config`] is loaded.
static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    init_logging();

    _ = run().await;
}

/// Initializes the global logger, writing warnings and errors to `stderr`
/// and everything else to `stdout`.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(writes_to(false))),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(writes_to(true))),
        )
        .init();
}

/// Returns a filter passing spans and the events of the configured level
/// that belong to `stderr` (if `to_stderr`) or `stdout`.
fn writes_to(to_stderr: bool) -> impl Fn(&log::Metadata<'_>) -> bool {
    move |meta| {
        let level = LOG_LEVEL.get().copied().unwrap_or(log::Level::INFO);
        meta.is_span()
            || (STDERR_LEVELS.contains(meta.level()) == to_stderr
                && level >= *meta.level())
    }
}

/// Loads the listings, starts the [`Service`] and serves the GraphQL API
/// until failure.
async fn run() -> Result<(), ()> {
    let Args { config, listings } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        server,
        data,
        map,
        contact,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let listings = listings.unwrap_or(data.listings);
    let catalog = catalog::Static::load(&listings).map_err(|e| {
        log::error!(
            "failed to load listings from `{}`: {e}",
            listings.display(),
        );
    })?;
    if catalog.is_empty() {
        log::warn!("no listings loaded from `{}`", listings.display());
    }

    let contact: Channels = contact.try_into().map_err(|e| {
        log::error!("invalid `contact` config: {e}");
    })?;
    let initialize_map = task::initialize_map::Config {
        timeout: map.init_timeout,
    };
    let (service, background) = Service::new(
        service::Config {
            contact,
            initialize_map,
        },
        catalog,
        map.into(),
    );

    let app = router(service, cors(&server.cors)?);

    let listener = TcpListener::bind((server.host.clone(), server.port))
        .await
        .map_err(|e| {
            log::error!(
                "failed to listen on `{}:{}`: {e}",
                server.host,
                server.port,
            );
        })?;
    log::info!("listening on `{}:{}`", server.host, server.port);

    future::try_join(
        axum::serve(listener, app)
            .into_future()
            .map_err(|e| log::error!("webserver failed: {e}")),
        background.into_future().map_err(|e| {
            log::error!("background task failed: {e}");
        }),
    )
    .await
    .map(drop)
}

/// Builds a [`CorsLayer`] allowing the configured origins to query the API.
fn cors(config: &config::Cors) -> Result<CorsLayer, ()> {
    let mut cors = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::OPTIONS,
            http::Method::POST,
        ])
        .allow_headers([http::header::CONTENT_TYPE]);
    for origin in &config.origins {
        cors = cors.allow_origin(
            origin.parse::<http::header::HeaderValue>().map_err(|e| {
                log::error!("`{origin}` is not a valid CORS origin: {e}");
            })?,
        );
    }
    Ok(cors)
}

/// Builds the HTTP [`Router`] serving the GraphQL API of the provided
/// [`Service`].
fn router(service: Service, cors: CorsLayer) -> Router {
    Router::new()
        .route(
            "/graphql",
            on(MethodFilter::GET.or(MethodFilter::POST), graphql),
        )
        .route("/healthz", get(healthz))
        .layer(Extension(Arc::new(api::schema())))
        .layer(Extension(service))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|r: &http::Request<_>| {
                    log::info_span!(
                        "HTTP request",
                        http.client_ip = InsecureClientIp::from(
                            r.headers(),
                            r.extensions()
                        )
                            .map(|ip| ip.0.to_string())
                            .ok(),
                        http.method = r.method().as_str(),
                        http.route = r
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str),
                        http.target = r
                            .uri()
                            .path_and_query()
                            .map(http::uri::PathAndQuery::as_str),
                        http.user_agent = r
                            .headers()
                            .get(http::header::USER_AGENT)
                            .and_then(|h| h.to_str().ok()),
                        http.status_code = log::field::Empty,
                    )
                })
                .on_response(
                    |r: &http::Response<_>,
                     dur: time::Duration,
                     span: &log::Span| {
                        _ = span.record(
                            "http.status_code",
                            log::field::display(r.status().as_u16()),
                        );

                        let duration = format!("{}ms", dur.as_millis());
                        if r.status().is_server_error() {
                            log::error!(duration);
                        } else if r.status().is_client_error() {
                            log::warn!(duration);
                        } else {
                            log::info!(duration);
                        }
                    },
                ),
        )
}
