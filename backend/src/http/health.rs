use crate::api_error::ApiError;
use crate::service::CoordinatorHandle;
use crate::store::StatsStore;
use actix_web::{web, HttpResponse, Result};

pub async fn health_check(
    store: web::Data<dyn StatsStore>,
    coordinator: web::Data<CoordinatorHandle>,
) -> Result<HttpResponse, ApiError> {
    store.ping().await?;

    let coordinator_status = if coordinator.is_running() {
        "running"
    } else {
        "stopped"
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "stats_store": "ok",
        "coordinator": coordinator_status
    })))
}
