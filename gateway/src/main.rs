//! Spam filter gateway binary.

use std::env;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use spam_filter_gateway::{app, AppState, Config, SubprocessClassifier};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    println!("spam-filter-gateway {}", VERSION);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle --version / -V
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        print_version();
        return Ok(());
    }

    // Load configuration
    let config = Config::load().map_err(|e| format!("Failed to load configuration: {}", e))?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting spam-filter-gateway {}", VERSION);
    tracing::info!(
        "Classifier: {} {:?} (work_dir={}, max_concurrent={:?}, timeout_secs={:?})",
        config.classifier.program,
        config.classifier.args,
        config.classifier.work_dir,
        config.classifier.max_concurrent,
        config.classifier.timeout_secs
    );

    let classifier = Arc::new(SubprocessClassifier::new(config.classifier.clone()));
    let state = Arc::new(AppState::new(config.clone(), classifier));

    // Build router
    let app = app(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
