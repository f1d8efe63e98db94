mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::{self, routes as auth_routes};
use crate::features::destinations::DestinationService;
use crate::features::events::{routes as events_routes, EventsService};
use crate::features::itineraries::repositories::PgItineraryRepository;
use crate::features::itineraries::services::PendingStore;
use crate::features::itineraries::{routes as itineraries_routes, ItineraryService};
use crate::features::planner::PlannerService;
use crate::modules::openai::{OpenAiClient, TextGenerator};
use crate::modules::ticketmaster::TicketmasterClient;
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let jwt_validator = Arc::new(auth::JwtValidator::new(&config.auth));
    tracing::info!("Auth configuration initialized");

    // Providers are optional; a missing API key disables the feature
    let generator: Option<Arc<dyn TextGenerator>> = OpenAiClient::from_config(&config.openai)
        .map_err(|e| anyhow::anyhow!("Failed to build OpenAI client: {}", e))?
        .map(|client| Arc::new(client) as Arc<dyn TextGenerator>);
    match &generator {
        Some(_) => tracing::info!("OpenAI client initialized (model: {})", config.openai.model),
        None => tracing::warn!("OPENAI_API_KEY not set; itinerary generation is unavailable"),
    }

    let ticketmaster = TicketmasterClient::from_config(&config.events)
        .map_err(|e| anyhow::anyhow!("Failed to build Ticketmaster client: {}", e))?;
    if ticketmaster.is_none() {
        tracing::warn!("TICKETMASTER_API_KEY not set; event lookups return nothing");
    }

    let destination_service = Arc::new(DestinationService::new(
        generator.clone(),
        config.openai.destination_model.clone(),
    ));
    let planner_service = Arc::new(PlannerService::new(
        generator,
        config.openai.model.clone(),
    ));
    let events_service = Arc::new(EventsService::new(
        ticketmaster,
        Arc::clone(&destination_service),
        config.events.max_results,
    ));
    let pending_store = Arc::new(PendingStore::new(
        config.session.ttl,
        config.session.max_entries,
    ));
    let itinerary_service = Arc::new(ItineraryService::new(
        Arc::new(PgItineraryRepository::new(pool.clone())),
        planner_service,
        Arc::clone(&events_service),
        pending_store,
    ));
    tracing::info!("Itinerary services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // API routes; the token is optional at this layer and enforced per handler
    let api_routes = Router::new()
        .merge(auth_routes::routes())
        .merge(itineraries_routes::routes(itinerary_service))
        .merge(events_routes::routes(events_service))
        .route_layer(axum::middleware::from_fn_with_state(
            jwt_validator,
            middleware::auth_middleware,
        ));

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Outermost first: request id, tracing, id propagation, CORS, body limit
    let http_layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size));

    let app = Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route)
        .layer(http_layers);

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
