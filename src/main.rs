use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use precip_qa_service::api::{create_router, AppState};
use precip_qa_service::config::Config;
use precip_qa_service::loader::excel_loader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,precip_qa_service=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    info!("Starting precipitation QA service with config: {:?}", config);

    // Preload a workbook snapshot if configured; /ask/upload works either way
    let tables = match &config.workbook_path {
        Some(path) => {
            info!("Preloading workbook from {}", path);
            let path = path.clone();
            let tables =
                tokio::task::spawn_blocking(move || excel_loader::load_workbook(&path)).await??;
            info!(
                "Workbook loaded: {} daily rows, {} monthly rows",
                tables.daily.len(),
                tables.monthly.len()
            );
            Some(Arc::new(tables))
        }
        None => {
            info!("No WORKBOOK_PATH set; only /ask/upload will be available");
            None
        }
    };

    let app_state = AppState { tables };
    let app = create_router(app_state).layer(TraceLayer::new_for_http());

    let addr = config.server_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
