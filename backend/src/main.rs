use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use rps_arena::config::{Cli, Config, StatsBackend};
use rps_arena::http::{health, play_handler};
use rps_arena::middleware::cors_middleware;
use rps_arena::service::MatchCoordinator;
use rps_arena::store::{MemoryStatsStore, RedisStatsStore, StatsStore};
use rps_arena::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?.with_cli(Cli::parse());

    // Initialize telemetry
    init_telemetry(&config.server.rust_log);

    // Connect the statistics store
    let store: Arc<dyn StatsStore> = match config.stats.backend {
        StatsBackend::Redis => Arc::new(RedisStatsStore::connect(&config.redis.url).await?),
        StatsBackend::Memory => {
            warn!("Using in-memory statistics store, stats are lost on restart");
            Arc::new(MemoryStatsStore::new())
        }
    };

    // Start the match coordinator
    let (coordinator, handle) =
        MatchCoordinator::new(store.clone(), config.stats.track_leaderboard);
    let coordinator_task = tokio::spawn(coordinator.run());

    info!(
        "Starting RPS arena on {}:{}",
        config.server.host, config.server.port
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(store.clone()))
            .app_data(web::Data::new(handle.clone()))
            .wrap(cors_middleware())
            .wrap(actix_web::middleware::Logger::default())
            .route("/health", web::get().to(health::health_check))
            .configure(play_handler::configure)
    })
    .bind((config.server.host.clone(), config.server.port))?
    .run();

    // Graceful shutdown
    let server_handle = server.handle();
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    server.await?;

    // The server owned every coordinator handle, so the loop drains and exits
    match coordinator_task.await {
        Ok(matches) => info!(matches_settled = matches, "RPS arena stopped"),
        Err(e) => error!(error = %e, "Match coordinator task failed"),
    }

    Ok(())
}
