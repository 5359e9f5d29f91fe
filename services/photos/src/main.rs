use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::database::{health_check, init_pool, run_migrations};
use photos::{
    config::{Settings, StorageBackend},
    jwt::JwtService,
    repositories::{InMemoryRepository, PgPhotoRepository, PgUserRepository},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting photos service");

    let settings = Settings::load()?;
    let jwt_service = JwtService::new(settings.jwt())?;

    let app_state = match settings.storage_backend {
        StorageBackend::Postgres => {
            let pool = init_pool(&settings.database()).await?;

            // Check database connectivity
            if health_check(&pool).await? {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            run_migrations(&pool).await?;

            AppState {
                jwt_service,
                user_repository: Arc::new(PgUserRepository::new(pool.clone())),
                photo_repository: Arc::new(PgPhotoRepository::new(pool)),
            }
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on shutdown");
            AppState::in_memory(jwt_service, InMemoryRepository::new())
        }
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let addr = settings.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Photos service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
