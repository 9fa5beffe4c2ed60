// Route exports
pub mod matches;
pub mod players;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::error::MatchError;
use crate::models::ErrorResponse;
use crate::services::{PlayerRepository, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: PlayerRepository,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(players::configure)
            .configure(matches::configure),
    );
}

/// JSON error body for extractor failures
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

pub(crate) fn match_error_response(err: &MatchError) -> HttpResponse {
    let error = match err {
        MatchError::InvalidRecord { .. } => "invalid_record",
        MatchError::InvalidArgument(_) => "invalid_argument",
    };
    error_response(StatusCode::BAD_REQUEST, error, err.to_string())
}

pub(crate) fn store_error_response(context: &str, err: &StoreError) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, context, err.to_string())
}

pub(crate) fn not_found(player_id: &str) -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        "Player not found",
        format!("No preferences stored for '{}'", player_id),
    )
}
