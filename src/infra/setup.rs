use std::{fs::File, path::Path, sync::Arc};

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{
        http::app_state::AppState,
        persistence::{memory::InMemoryKeyValueStore, waitlist::KeyValuePersistence},
    },
    application::ports::{
        key_value_store::KeyValueStore, referral_code::RandomReferralCodeGenerator,
    },
    infra::{
        InfraError,
        config::{AppConfig, StorageBackend},
        redis_store::RedisKeyValueStore,
    },
    use_cases::waitlist::{WaitlistRepo, WaitlistUseCases},
};

pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    info!(backend = %config.storage_backend, "Initializing waitlist storage");

    let store: Arc<dyn KeyValueStore> = match config.storage_backend {
        StorageBackend::Memory => {
            info!("Using in-memory waitlist storage; data is lost on restart");
            Arc::new(InMemoryKeyValueStore::new())
        }
        StorageBackend::Redis => {
            let store = RedisKeyValueStore::new(&config.redis_url).await?;
            info!("Connected to Redis!");
            Arc::new(store)
        }
    };

    let repo = Arc::new(KeyValuePersistence::new(store, &config.key_prefix)) as Arc<dyn WaitlistRepo>;

    let waitlist_use_cases = WaitlistUseCases::new(
        repo,
        Arc::new(RandomReferralCodeGenerator),
        config.app_origin.clone(),
    );

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
    })
}

pub fn init_tracing(log_file: Option<&Path>) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waitlist=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don't show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs), only when configured
    let json_layer = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(InfraError::LogFile)?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_current_span(true)
                    .with_span_list(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
