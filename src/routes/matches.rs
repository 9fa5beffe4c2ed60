use actix_web::{web, HttpResponse, Responder};

use crate::models::{FindMatchesQuery, FindMatchesResponse, MatchResponse, RankOptions};
use crate::routes::{match_error_response, not_found, store_error_response, AppState};

/// Configure match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/players/{player_id}/matches", web::get().to(find_matches));
}

/// Find matches endpoint
///
/// GET /api/v1/players/{player_id}/matches?min_score=4&limit=10
///
/// Missing parameters fall back to the configured defaults; `limit=0`
/// returns every qualifying candidate.
async fn find_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<FindMatchesQuery>,
) -> impl Responder {
    let player_id = path.into_inner();

    let options = match RankOptions::new(
        query.min_score.unwrap_or(state.matching.default_min_score),
        query.limit.unwrap_or(state.matching.default_limit),
    ) {
        Ok(options) => options,
        Err(e) => return match_error_response(&e),
    };

    let subject = match state.repository.get(&player_id).await {
        Ok(Some(subject)) => subject,
        Ok(None) => return not_found(&player_id),
        Err(e) => return store_error_response("Failed to fetch player", &e),
    };

    let pool = match state.repository.list_all().await {
        Ok(pool) => pool,
        Err(e) => return store_error_response("Failed to load candidates", &e),
    };

    tracing::debug!("Ranking {} stored players for {}", pool.len(), player_id);

    let outcome = match state.matcher.rank_payloads(&subject, pool, &options) {
        Ok(outcome) => outcome,
        Err(e) => return match_error_response(&e),
    };

    for skipped in &outcome.skipped {
        tracing::warn!(
            "Skipped candidate {} while matching {}: {}",
            skipped.player_id,
            player_id,
            skipped.reason
        );
    }

    tracing::info!(
        "Returning {} matches for player {} (from {} candidates)",
        outcome.matches.len(),
        player_id,
        outcome.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches: outcome.matches.into_iter().map(MatchResponse::from).collect(),
        skipped: outcome.skipped,
        total_candidates: outcome.total_candidates,
    })
}
