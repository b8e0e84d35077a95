//! Wiring & DI. Entry point: bootstrap adapters, inject into services, serve HTTP.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use unifit::adapters::ai::{MockAiAdapter, OpenAiAdapter};
use unifit::adapters::http::run_serve;
use unifit::adapters::persistence::{JsonPlanStore, SqliteRepo};
use unifit::ports::{ModelClient, PlanPort, PlanStore};
use unifit::shared::config::{AppConfig, StoreBackend};
use unifit::usecases::{GenerationOrchestrator, PlanService, PlanTemplateEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load()?;

    let data_path = cfg.data_dir_or_default();
    info!(path = %data_path.display(), "data directory");

    // --- Plan store ---
    let store: Arc<dyn PlanStore> = match cfg
        .store_backend()
        .map_err(|e| anyhow::anyhow!("{}", e))?
    {
        StoreBackend::Sqlite => Arc::new(
            SqliteRepo::connect(&data_path)
                .await
                .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
        ),
        StoreBackend::Json => {
            let json_store = JsonPlanStore::new(data_path.join("plans.json"));
            json_store
                .load()
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            Arc::new(json_store)
        }
    };

    // --- Model client ---
    let model: Arc<dyn ModelClient> = if cfg.is_ai_configured() {
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            timeout_secs = cfg.ai_timeout().as_secs(),
            "AI generation enabled with OpenAI adapter"
        );
        Arc::new(
            OpenAiAdapter::new(
                cfg.ai_api_url_or_default(),
                cfg.ai_api_key().unwrap_or_default(),
                cfg.ai_model_or_default(),
                cfg.ai_timeout(),
            )
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        )
    } else {
        warn!("UNIFIT_AI_API_KEY not set, using mock AI adapter");
        Arc::new(MockAiAdapter::new())
    };

    // --- Services ---
    let engine = PlanTemplateEngine::new();
    let orchestrator = GenerationOrchestrator::new(model, engine).with_timeout(cfg.ai_timeout());
    let plan_service: Arc<dyn PlanPort> = Arc::new(PlanService::new(store, orchestrator, engine));

    // --- Run ---
    run_serve(plan_service, &cfg.bind_or_default(), cfg.port_or_default()).await
}
