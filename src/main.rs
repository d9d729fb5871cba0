//! Newsletter Studio API server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use newsletter_studio::adapters::ai::{MockTextGenerator, OpenAiConfig, OpenAiTextGenerator};
use newsletter_studio::adapters::auth::JwtTokenValidator;
use newsletter_studio::adapters::export::HtmlExportService;
use newsletter_studio::adapters::http::middleware::{
    auth_middleware, rate_limit_middleware, AuthState, RateLimiterState,
};
use newsletter_studio::adapters::http::{
    newsletter_router, template_router, tools_router, NewsletterHandlers, TemplateHandlers,
    ToolsHandlers,
};
use newsletter_studio::adapters::images::{
    ImageProviderChain, PexelsProvider, UnsplashProvider,
};
use newsletter_studio::adapters::postgres::{
    PostgresNewsletterRepository, PostgresTemplateRepository,
};
use newsletter_studio::adapters::rate_limiter::{
    InMemoryRateLimiter, RateLimitConfig, RedisRateLimiter,
};
use newsletter_studio::application::handlers::newsletter::{
    CreateNewsletterHandler, DeleteNewsletterHandler, ExportNewsletterHandler,
    GetNewsletterHandler, ListNewslettersHandler, RenameNewsletterHandler, SaveNewsletterHandler,
    UpdateStatusHandler,
};
use newsletter_studio::application::handlers::template::{
    CreateTemplateHandler, DeleteTemplateHandler, InstantiateTemplateHandler,
    ListTemplatesHandler,
};
use newsletter_studio::application::handlers::tools::{GenerateTextHandler, SearchImagesHandler};
use newsletter_studio::config::AppConfig;
use newsletter_studio::domain::newsletter::{ContentCodec, SectionFactory};
use newsletter_studio::ports::{
    ImageProvider, NewsletterRepository, RateLimiter, TemplateRepository, TextGenerator,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!("starting newsletter-studio");

    // ── Persistence ─────────────────────────────────────────────────
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await?;

    let factory = SectionFactory::with_uuid_ids();
    let codec = ContentCodec::new(factory.clone());

    let newsletters: Arc<dyn NewsletterRepository> = Arc::new(
        PostgresNewsletterRepository::new(pool.clone(), codec.clone()),
    );
    let templates: Arc<dyn TemplateRepository> =
        Arc::new(PostgresTemplateRepository::new(pool, codec));

    // ── Collaborators ───────────────────────────────────────────────
    let text_generator: Arc<dyn TextGenerator> = match &config.ai.openai_api_key {
        Some(key) if !key.is_empty() => {
            let mut ai_config =
                OpenAiConfig::new(key.clone()).with_model(config.ai.model.clone());
            ai_config.timeout = config.ai.timeout();
            ai_config.max_retries = config.ai.max_retries;
            Arc::new(OpenAiTextGenerator::new(ai_config))
        }
        _ => {
            tracing::warn!("no AI provider configured; generate-text will be unavailable");
            Arc::new(MockTextGenerator::new())
        }
    };

    let image_provider: Arc<dyn ImageProvider> = Arc::new(ImageProviderChain::new(vec![
        Arc::new(PexelsProvider::new(config.images.pexels_api_key.clone())),
        Arc::new(UnsplashProvider::new(
            config.images.unsplash_access_key.clone(),
        )),
    ]));

    let export_service = Arc::new(HtmlExportService::new());

    let rate_limiter: RateLimiterState = match &config.redis.url {
        Some(url) if !url.is_empty() => {
            let client = redis::Client::open(url.as_str())?;
            let conn = client.get_multiplexed_async_connection().await?;
            Arc::new(RedisRateLimiter::new(conn, RateLimitConfig::default()))
                as Arc<dyn RateLimiter>
        }
        _ => {
            tracing::info!("no Redis configured; using in-memory rate limiter");
            Arc::new(InMemoryRateLimiter::with_defaults())
        }
    };

    let validator: AuthState = Arc::new(JwtTokenValidator::new(&config.auth.jwt_secret));

    // ── Application handlers ────────────────────────────────────────
    let newsletter_handlers = NewsletterHandlers {
        create: Arc::new(CreateNewsletterHandler::new(
            Arc::clone(&newsletters),
            factory.clone(),
        )),
        get: Arc::new(GetNewsletterHandler::new(Arc::clone(&newsletters))),
        list: Arc::new(ListNewslettersHandler::new(Arc::clone(&newsletters))),
        save: Arc::new(SaveNewsletterHandler::new(Arc::clone(&newsletters))),
        rename: Arc::new(RenameNewsletterHandler::new(Arc::clone(&newsletters))),
        update_status: Arc::new(UpdateStatusHandler::new(Arc::clone(&newsletters))),
        delete: Arc::new(DeleteNewsletterHandler::new(Arc::clone(&newsletters))),
        export: Arc::new(ExportNewsletterHandler::new(
            Arc::clone(&newsletters),
            export_service,
        )),
    };

    let template_handlers = TemplateHandlers {
        create: Arc::new(CreateTemplateHandler::new(
            Arc::clone(&newsletters),
            Arc::clone(&templates),
        )),
        list: Arc::new(ListTemplatesHandler::new(Arc::clone(&templates))),
        instantiate: Arc::new(InstantiateTemplateHandler::new(
            Arc::clone(&templates),
            Arc::clone(&newsletters),
        )),
        delete: Arc::new(DeleteTemplateHandler::new(Arc::clone(&templates))),
    };

    let tools_handlers = ToolsHandlers {
        generate_text: Arc::new(GenerateTextHandler::new(
            text_generator,
            Arc::clone(&rate_limiter),
        )),
        search_images: Arc::new(SearchImagesHandler::new(
            image_provider,
            Arc::clone(&rate_limiter),
        )),
    };

    // ── Router ──────────────────────────────────────────────────────
    let cors = if config.server.is_production() {
        let origins: Vec<_> = config
            .server
            .cors_origins_list()
            .into_iter()
            .filter_map(|origin| origin.parse::<axum::http::HeaderValue>().ok())
            .collect();
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    } else {
        CorsLayer::permissive()
    };

    let app = Router::new()
        .nest("/api/newsletters", newsletter_router(newsletter_handlers))
        .nest("/api/templates", template_router(template_handlers))
        .nest("/api/tools", tools_router(tools_handlers))
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                )))
                .layer(CompressionLayer::new())
                .layer(cors),
        );

    let addr = config.server.socket_addr();
    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
