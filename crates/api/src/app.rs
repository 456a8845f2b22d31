use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use shared::jwt::TokenVerifier;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{admin, exports, graduates, guests, health, storage, users, verify};
use crate::services::email::EmailService;
use crate::services::storage::StorageService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub verifier: TokenVerifier,
    pub email: EmailService,
    pub storage: Option<StorageService>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let verifier = TokenVerifier::with_leeway(&config.auth.jwt_secret, config.auth.leeway_secs);
    let email = EmailService::new(config.email.clone());

    let storage = if config.storage.enabled {
        match StorageService::new(&config.storage) {
            Ok(service) => Some(service),
            Err(err) => {
                tracing::error!(error = %err, "Failed to initialize object storage");
                None
            }
        }
    } else {
        None
    };

    // Rate limiter if rate limiting is enabled (rate_limit_per_minute > 0)
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        verifier,
        email,
        storage,
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Authenticated routes. Middleware order: auth runs first, then rate
    // limiting (which keys on the authenticated principal).
    let protected_routes = Router::new()
        .route("/api/users", post(users::register_user))
        .route("/api/users/me", get(users::current_user))
        .route("/api/guests", get(guests::list_guests))
        .route("/api/guests", post(guests::create_guest))
        .route("/api/guests/:guest_id", delete(guests::delete_guest))
        .route("/api/graduates", get(graduates::current_graduate))
        .route("/api/graduates", post(graduates::create_graduate))
        .route("/api/storage/signed-url", post(storage::signed_url))
        // Admin surface (role enforced per handler via AdminUser)
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/users/:user_id/guests", get(admin::user_guests))
        .route("/api/admin/graduates/:user_id", get(admin::user_graduate))
        .route("/api/export/guests", get(exports::export_guests))
        .route("/api/export/graduates", get(exports::export_graduates))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Public routes (no authentication; door scanners have no login)
    let public_routes = Router::new()
        .route("/verify/:code", get(verify::verify_code))
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
