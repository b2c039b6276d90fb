/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use roster_api::{app::AppState, config::Config};
/// use roster_shared::remote::PostsClient;
/// use roster_shared::store::Store;
/// use roster_worker::{controller::Controller, dispatcher::Dispatcher};
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let store = Store::open(config.database.pool_config()).await?;
/// let db = store.pool().clone();
///
/// let dispatcher = Dispatcher::spawn(Controller::new(store));
/// let posts = PostsClient::new(config.posts.client_config())?;
///
/// let state = AppState::new(db, dispatcher.handle(), Arc::new(posts), config);
/// let app = roster_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use roster_shared::remote::PostSource;
use roster_worker::dispatcher::DispatchHandle;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used only for health probes
    pub db: SqlitePool,

    /// Handle to the record command dispatcher
    pub dispatcher: DispatchHandle,

    /// Remote post collection
    pub posts: Arc<dyn PostSource>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(
        db: SqlitePool,
        dispatcher: DispatchHandle,
        posts: Arc<dyn PostSource>,
        config: Config,
    ) -> Self {
        Self {
            db,
            dispatcher,
            posts,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                   # Health check
/// └── /v1/
///     ├── /records              # GET list, POST create
///     │   ├── /count            # GET count
///     │   └── /:id              # GET, PUT, DELETE
///     ├── /search?name=         # Store name search
///     ├── /filter?q=            # In-memory any-field filter
///     │   ├── /city?q=          # In-memory city filter
///     │   └── /cities           # City suggestions
///     └── /posts                # Remote list
///         └── /:id              # Remote single post
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let record_routes = Router::new()
        .route(
            "/",
            get(routes::records::list_records).post(routes::records::create_record),
        )
        .route("/count", get(routes::records::count_records))
        .route(
            "/:id",
            get(routes::records::get_record)
                .put(routes::records::update_record)
                .delete(routes::records::delete_record),
        );

    let filter_routes = Router::new()
        .route("/", get(routes::search::filter_records))
        .route("/city", get(routes::search::filter_by_city))
        .route("/cities", get(routes::search::city_suggestions));

    let post_routes = Router::new()
        .route("/", get(routes::posts::list_posts))
        .route("/:id", get(routes::posts::get_post));

    let v1_routes = Router::new()
        .nest("/records", record_routes)
        .route("/search", get(routes::search::search_by_name))
        .nest("/filter", filter_routes)
        .nest("/posts", post_routes);

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
