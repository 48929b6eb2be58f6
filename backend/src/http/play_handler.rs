use crate::api_error::ApiError;
use crate::models::{Move, Outcome};
use crate::service::CoordinatorHandle;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct PlayQuery {
    pub iam: Option<String>,
}

/// Register `GET /rock`, `GET /paper` and `GET /scissors`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/rock", web::get().to(play_rock))
        .route("/paper", web::get().to(play_paper))
        .route("/scissors", web::get().to(play_scissors));
}

/// GET /rock
pub async fn play_rock(
    req: HttpRequest,
    query: web::Query<PlayQuery>,
    coordinator: web::Data<CoordinatorHandle>,
) -> Result<HttpResponse, ApiError> {
    play(Move::Rock, req, query.into_inner(), coordinator).await
}

/// GET /paper
pub async fn play_paper(
    req: HttpRequest,
    query: web::Query<PlayQuery>,
    coordinator: web::Data<CoordinatorHandle>,
) -> Result<HttpResponse, ApiError> {
    play(Move::Paper, req, query.into_inner(), coordinator).await
}

/// GET /scissors
pub async fn play_scissors(
    req: HttpRequest,
    query: web::Query<PlayQuery>,
    coordinator: web::Data<CoordinatorHandle>,
) -> Result<HttpResponse, ApiError> {
    play(Move::Scissors, req, query.into_inner(), coordinator).await
}

async fn play(
    chosen: Move,
    req: HttpRequest,
    query: PlayQuery,
    coordinator: web::Data<CoordinatorHandle>,
) -> Result<HttpResponse, ApiError> {
    let player = player_name(query.iam, &req);

    info!(player = %player, chosen = %chosen, "Received play request");

    let outcome = coordinator.submit(player.clone(), chosen).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(result_message(&player, outcome)))
}

/// The `iam` parameter, or the peer address when it is missing or empty
pub fn player_name(iam: Option<String>, req: &HttpRequest) -> String {
    match iam {
        Some(name) if !name.is_empty() => name,
        _ => req
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    }
}

pub fn result_message(player: &str, outcome: Outcome) -> String {
    match outcome {
        Outcome::Win => format!("Congrats, {}, you won!", player),
        Outcome::Lose => format!("Sorry, {}, you lost!", player),
        Outcome::Draw => format!(
            "Well, {}, you didn't lose, but you didn't win either. It was a draw!",
            player
        ),
    }
}
