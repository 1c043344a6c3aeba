use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

#[cfg(not(test))]
use {
    axum::extract::ConnectInfo,
    std::net::{IpAddr, SocketAddr},
    std::sync::Arc,
    tower_governor::{governor::GovernorConfigBuilder, key_extractor::KeyExtractor, GovernorLayer},
};

use crate::api::handlers::{self as api_handlers, AppState};
use crate::config::Settings;
#[cfg(not(test))]
use crate::Error;
use crate::Result;

/// Create the router with all endpoints
#[cfg_attr(test, allow(unused_variables))]
pub fn create_router(state: AppState, settings: &Settings) -> Result<Router> {
    // Public API routes - read-only, no authentication required
    #[cfg_attr(test, allow(unused_mut))]
    let mut api_routes = Router::new()
        .route("/search", get(api_handlers::search_recipes))
        .route("/recipes/:id", get(api_handlers::get_recipe))
        .route("/categories", get(api_handlers::list_categories))
        .route("/subcategories", get(api_handlers::list_subcategories))
        .route("/ingredients/common", get(api_handlers::common_ingredients))
        .route("/stats", get(api_handlers::get_stats))
        .with_state(state.clone());

    // Rate limiting keys on the peer address, which requires serving with
    // `into_make_service_with_connect_info::<SocketAddr>()`. Test builds skip it.
    #[cfg(not(test))]
    {
        #[derive(Clone, Copy, Debug)]
        struct PeerIpKeyExtractor;

        impl KeyExtractor for PeerIpKeyExtractor {
            type Key = IpAddr;

            fn extract<B>(
                &self,
                req: &axum::http::Request<B>,
            ) -> std::result::Result<Self::Key, tower_governor::GovernorError> {
                if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
                    return Ok(addr.ip());
                }

                // Fall back to localhost when no connection info is attached
                Ok(IpAddr::V4(std::net::Ipv4Addr::LOCALHOST))
            }
        }

        // API_RATE_LIMIT is requests per second; the governor wants the refill period
        let rate = settings.server.api_rate_limit.max(1);
        let burst = u32::try_from(rate.saturating_mul(2)).unwrap_or(u32::MAX);
        let governor_conf = GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_nanosecond((1_000_000_000 / rate).max(1))
            .burst_size(burst)
            .finish()
            .ok_or_else(|| Error::Config("Invalid API rate limit configuration".to_string()))?;

        api_routes = api_routes.layer(GovernorLayer {
            config: Arc::new(governor_conf),
        });
    }

    let api_routes = api_routes;

    let health_routes = Router::new()
        .route("/health", get(api_handlers::health_check))
        .route("/ready", get(api_handlers::readiness_check))
        .with_state(state);

    let router = Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            // CORS - allow all origins for read-only public API
            CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
