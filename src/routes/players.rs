use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{HealthResponse, PlayerPayload, PlayerRecord};
use crate::routes::{error_response, match_error_response, not_found, store_error_response, AppState};

/// Configure player and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/players", web::get().to(list_players))
        .route("/players", web::post().to(upsert_player))
        .route("/players/{player_id}", web::get().to(get_player))
        .route("/players/{player_id}", web::delete().to(delete_player));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.repository.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List players
///
/// GET /api/v1/players
///
/// Rows that no longer validate are logged and left out.
async fn list_players(state: web::Data<AppState>) -> impl Responder {
    let payloads = match state.repository.list_all().await {
        Ok(payloads) => payloads,
        Err(e) => return store_error_response("Failed to list players", &e),
    };

    let players: Vec<PlayerRecord> = payloads
        .into_iter()
        .filter_map(|payload| match PlayerRecord::try_from(payload) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping stored player: {}", e);
                None
            }
        })
        .collect();

    HttpResponse::Ok().json(players)
}

/// Create or replace a player's preferences
///
/// POST /api/v1/players
///
/// Request body:
/// ```json
/// {
///   "player_id": "string",
///   "platform": "PC",
///   "game_mode": "story",
///   "level_range": "1-5",
///   "voice_chat": "required|optional|none",
///   "timezone": "UTC-5",
///   "tags": ["roleplay"],
///   "notes": "string"
/// }
/// ```
async fn upsert_player(
    state: web::Data<AppState>,
    req: web::Json<PlayerPayload>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for upsert_player request: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let player = match PlayerRecord::try_from(req.into_inner()) {
        Ok(player) => player,
        Err(e) => return match_error_response(&e),
    };

    if let Err(e) = state.repository.upsert(&player).await {
        return store_error_response("Failed to store player", &e);
    }

    tracing::info!("Stored preferences for {}", player.player_id());

    HttpResponse::Created().json(player)
}

/// Fetch one player
///
/// GET /api/v1/players/{player_id}
async fn get_player(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let player_id = path.into_inner();

    match state.repository.get(&player_id).await {
        Ok(Some(payload)) => match PlayerRecord::try_from(payload) {
            Ok(player) => HttpResponse::Ok().json(player),
            Err(e) => match_error_response(&e),
        },
        Ok(None) => not_found(&player_id),
        Err(e) => store_error_response("Failed to fetch player", &e),
    }
}

/// Delete a player
///
/// DELETE /api/v1/players/{player_id}
async fn delete_player(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let player_id = path.into_inner();

    match state.repository.remove(&player_id).await {
        Ok(true) => {
            tracing::info!("Removed preferences for {}", player_id);
            HttpResponse::NoContent().finish()
        }
        Ok(false) => not_found(&player_id),
        Err(e) => store_error_response("Failed to delete player", &e),
    }
}
