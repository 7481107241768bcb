use anyhow::Context;
use rare::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Selects the YAML configuration file
const ENV_CONFIG: &str = "RARE_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rare=info,rare_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var(ENV_CONFIG) {
        Ok(path) => RareConfig::from_yaml_file(&path)
            .with_context(|| format!("loading configuration from {}", path))?,
        Err(_) => {
            tracing::info!("{} not set, using default configuration", ENV_CONFIG);
            RareConfig::default()
        }
    }
    .with_env_overrides();

    let store = EntityStore::in_memory();
    let auth = TokenAuthProvider::new(store.users.clone());
    seed(&store, &auth, &config.seed)
        .await
        .context("seeding the store")?;

    let app = ServerBuilder::new()
        .with_store(store)
        .with_auth_provider(auth)
        .with_config(&config)
        .build()?;

    tracing::info!(
        media_root = %config.media.root.display(),
        "starting server on {}",
        config.server.addr
    );
    let listener = tokio::net::TcpListener::bind(&config.server.addr)
        .await
        .with_context(|| format!("binding {}", config.server.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
