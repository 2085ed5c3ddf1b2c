//! User Directory - serves user records from MongoDB over HTTP.

use std::env;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use user_directory::{app, build_state, Config, MongoUserStore, UserStore};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    println!("user-directory {}", VERSION);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle --version / -V
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        print_version();
        return Ok(());
    }

    // Pick up a local .env if there is one
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Set PORT and CONNECTION_STRING, or provide config.toml / USERDIR__SECTION__KEY variables.",
            e
        )
    })?;
    tracing::info!(
        "Starting user-directory {}: database={}, collection={}",
        VERSION,
        config.store.database,
        config.store.collection
    );

    // Open the store client; a malformed connection string is fatal
    let store = MongoUserStore::connect(&config.store)
        .await
        .map_err(|e| format!("Failed to create store client: {}", e))?;

    // Requests report their own store failures, so an unreachable store only warns here
    match store.ping().await {
        Ok(()) => tracing::info!("Connected to {}", store.backend()),
        Err(e) => tracing::warn!("Store not reachable at startup: {}", e),
    }

    let state = build_state(config.clone(), Arc::new(store));
    let router = app(state);

    // Start server
    let addr = format!("{}:{}", config.api.host, config.api.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
