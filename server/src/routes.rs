use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use initdata_core::VerifyError;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub verified: bool,
    /// Epoch millis at which the check ran.
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub has_bot_token: bool,
}

/// `POST` handler: body `{ "initData": "<payload>" }`.
pub async fn verify(State(state): State<AppState>, body: Bytes) -> Result<Json<VerifyResponse>, ApiError> {
    let body: Value =
        serde_json::from_slice(&body).map_err(|e| ApiError::Internal(format!("request body: {e}")))?;
    // Only a non-empty string counts as a payload.
    let init_data = body
        .get("initData")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(VerifyError::MissingPayload)?;

    let verdict = match state.verifier.check(init_data) {
        Ok(v) => v,
        Err(VerifyError::MissingSecret) => {
            tracing::warn!("TELEGRAM_BOT_TOKEN is not set; cannot verify initData");
            return Err(VerifyError::MissingSecret.into());
        }
        Err(e) => return Err(e.into()),
    };
    if !verdict.verified {
        tracing::info!("initData signature mismatch");
    }

    Ok(Json(VerifyResponse { verified: verdict.verified, timestamp: verdict.checked_at.timestamp_millis() }))
}

/// `GET` handler reporting whether a token is configured, never its value.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Telegram verification endpoint is active",
        has_bot_token: state.verifier.has_secret(),
    })
}
