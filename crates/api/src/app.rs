use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use shared::session::SessionKeys;

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_admin, require_session,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    auth, customers, dashboard, follow_ups, health, messages, templates, users, webhooks,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub session_keys: SessionKeys,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let session_keys = SessionKeys::new(
        &config.auth.token_secret,
        config.auth.token_expiry_secs,
        config.auth.leeway_secs,
    );

    // rate_limit_per_minute = 0 disables rate limiting
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
        session_keys,
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
        // Production: only allow specified origins
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

    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route("/api/auth/login", post(auth::login))
        .route("/api/webhooks/sms", post(webhooks::inbound_sms));

    // Staff routes (session required)
    // Middleware order: session validation runs first, then rate limiting
    // (which keys on the authenticated user)
    let staff_routes = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route("/api/customers", get(customers::list_customers))
        .route("/api/customers", post(customers::create_customer))
        .route("/api/customers/:id", get(customers::get_customer))
        .route("/api/customers/:id", patch(customers::update_customer))
        .route("/api/customers/:id", delete(customers::archive_customer))
        .route("/api/followups", post(follow_ups::follow_up_action))
        .route("/api/messages", get(messages::list_messages))
        .route("/api/messages/send", post(messages::send_message))
        .route("/api/templates", get(templates::list_templates))
        .route("/api/templates", post(templates::create_template))
        .route("/api/templates/:id", get(templates::get_template))
        .route("/api/templates/:id", patch(templates::update_template))
        .route("/api/templates/:id", delete(templates::delete_template))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    // Admin routes (session + ADMIN role)
    let admin_routes = Router::new()
        .route("/api/users", get(users::list_users))
        .route("/api/users", post(users::create_user))
        .route("/api/users/:id", get(users::get_user))
        .route("/api/users/:id", patch(users::update_user))
        .route("/api/users/:id", delete(users::deactivate_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(staff_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
