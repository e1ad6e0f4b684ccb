use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use threadlens_api::{
    config::Config,
    middleware::logging,
    routes::{auth, chat, conversations, health, summarize},
    state::AppState,
};
use threadlens_auth::SupabaseVerifier;
use threadlens_core::{AnalysisEngine, ConversationEngine};
use threadlens_llm::OpenAIClient;
use threadlens_persist::MongoStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config =
        Config::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting ThreadLens API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Initialize LLM client
    tracing::info!("Initializing LLM client");
    let llm_client: Arc<dyn threadlens_llm::ChatClient> =
        Arc::new(OpenAIClient::new(config.openai_api_key.clone())?);

    // Initialize persistence (MongoDB)
    tracing::info!("Connecting to MongoDB");
    let store = MongoStore::connect(&config.mongodb_uri, &config.mongodb.database).await?;
    let store: Arc<dyn threadlens_persist::ConversationStore> = Arc::new(store);
    tracing::info!("MongoDB connected");

    // Initialize identity verification
    let verifier: Arc<dyn threadlens_auth::IdentityVerifier> = Arc::new(SupabaseVerifier::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
    )?);

    // Build the engines
    let analysis = AnalysisEngine::new(llm_client.clone(), config.llm.analysis_config());
    let conversation =
        ConversationEngine::new(llm_client, analysis.clone(), config.llm.chat_config());

    // Create application state
    let state = Arc::new(AppState::new(
        config.clone(),
        analysis,
        conversation,
        store,
        verifier,
    ));

    // Build router
    let app = build_router(state.clone());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Analysis & chat
        .route("/summarize", post(summarize::summarize_thread))
        .route("/chat", post(chat::chat_about_thread))
        // Auth
        .route("/auth/validate", post(auth::validate_token))
        // Conversations
        .route(
            "/conversations",
            post(conversations::save_conversation).get(conversations::list_conversations),
        );

    Router::new()
        .merge(api_routes)
        .layer(middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(120)))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors.allow_origin(Any)
        } else {
            let parsed_origins: Vec<axum::http::HeaderValue> = config
                .cors
                .origins
                .iter()
                .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
                .collect();

            cors.allow_origin(parsed_origins)
        }
    } else {
        CorsLayer::permissive()
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
