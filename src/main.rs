use dreamjob_backend::{
    config::{get_config, init_config},
    create_router,
    database::pool::{create_pool, run_migrations},
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    init_config()?;
    let config = get_config()?;

    let app_state = match config.database_url.as_deref() {
        Some(url) => {
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            info!("Connected to PostgreSQL, migrations applied");
            AppState::postgres(pool, config)?
        }
        None => {
            warn!("DATABASE_URL is not set; running on in-memory repositories, data is lost on restart");
            AppState::in_memory(config)?
        }
    };
    info!("Storing attachments in {}", config.file_directory.display());

    let app = create_router(app_state, config);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
