use mimalloc::MiMalloc;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &sqlab::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        host = %cfg.host,
        port = cfg.port,
        loglevel = %cfg.loglevel,
        "starting sqlab"
    );

    let pool = sqlab::db::connect(&cfg.database_url).await?;
    let storage = sqlab::db::LabStorage::new(pool);
    storage.init_schema().await?;
    storage.seed_if_empty().await?;

    let catalog = sqlab::catalog::ExerciseCatalog::builtin();
    let state = sqlab::router::LabState::new(storage, catalog, &cfg.secret_key);
    let app = sqlab::router::lab_router(state);

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
