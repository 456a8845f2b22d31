//! Public QR code verification endpoint.
//!
//! This is the door-scanner surface: a single GET per scanned code, no
//! authentication. Redemption is a conditional update in the database, so
//! concurrent scans of the same code produce exactly one success.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{Redemption, VerifyResponse, VerifyStatus};
use persistence::repositories::QrCodeRepository;
use tracing::{error, info};

use crate::app::AppState;
use crate::middleware::metrics::record_redemption;

/// GET /verify/:code
///
/// Attempts to redeem the code. The response body always carries the
/// `VerifyResponse` shape; the HTTP status mirrors the outcome so dumb
/// scanner clients can branch on it alone.
pub async fn verify_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> (StatusCode, Json<VerifyResponse>) {
    let repo = QrCodeRepository::new(state.pool.clone());

    match repo.redeem(&code).await {
        Ok(redemption) => {
            let (status, outcome) = match &redemption {
                Redemption::Success { .. } => (StatusCode::OK, "success"),
                Redemption::AlreadyUsed { .. } => (StatusCode::BAD_REQUEST, "already_used"),
                Redemption::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            };
            record_redemption(outcome);
            info!(outcome = outcome, "QR code verification");
            (status, Json(VerifyResponse::from(redemption)))
        }
        Err(err) => {
            record_redemption("error");
            error!(error = %err, "QR code verification failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(VerifyResponse {
                    message: "Verification failed".to_string(),
                    status: VerifyStatus::Error,
                    guest: None,
                    scanned_at: None,
                }),
            )
        }
    }
}
