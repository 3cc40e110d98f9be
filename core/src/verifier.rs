use std::sync::Arc;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::errors::VerifyError;
use crate::traits::{Clock, SecretSource};
use crate::types::{BotToken, InitData, Reason, Verdict, HASH_KEY};

type HmacSha256 = Hmac<Sha256>;

/// Fixed HMAC key used to derive the intermediate key from the bot token.
pub const WEB_APP_DATA_KEY: &[u8] = b"WebAppData";

/// Maximum accepted payload age, in seconds.
pub const FRESHNESS_WINDOW_SECS: i64 = 86_400;

fn hmac_sha256(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

/// Lowercase hex signature of `data_check_string` under `token`.
///
/// The token is the *message* of the first HMAC and `WebAppData` the key.
pub fn compute_hash(token: &BotToken, data_check_string: &str) -> String {
    let intermediate = hmac_sha256(WEB_APP_DATA_KEY, token.as_bytes());
    hex::encode(hmac_sha256(&intermediate, data_check_string.as_bytes()))
}

/// Encode `pairs` and append a valid `hash`. Any `hash` already in `pairs` is dropped.
pub fn sign(pairs: &[(&str, &str)], token: &BotToken) -> String {
    let mut ser = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs.iter().filter(|(k, _)| *k != HASH_KEY) {
        ser.append_pair(k, v);
    }
    let unsigned = ser.finish();
    let hash = compute_hash(token, &InitData::parse(&unsigned).data_check_string());
    if unsigned.is_empty() {
        format!("{HASH_KEY}={hash}")
    } else {
        format!("{unsigned}&{HASH_KEY}={hash}")
    }
}

/// Verify `payload` with the default 24h freshness window.
pub fn verify(payload: &str, token: Option<&BotToken>, now: DateTime<Utc>) -> Result<Verdict, VerifyError> {
    verify_with_window(payload, token, now, FRESHNESS_WINDOW_SECS)
}

/// Verify `payload`, rejecting anything issued more than `max_age_secs` before `now`.
///
/// Expiry wins over a bad signature when both apply.
pub fn verify_with_window(
    payload: &str,
    token: Option<&BotToken>,
    now: DateTime<Utc>,
    max_age_secs: i64,
) -> Result<Verdict, VerifyError> {
    if payload.is_empty() { return Err(VerifyError::MissingPayload); }
    let Some(token) = token else {
        return Ok(Verdict::rejected(Reason::MissingSecret, now));
    };

    let data = InitData::parse(payload);
    let Some(claimed) = data.hash() else {
        return Ok(Verdict::rejected(Reason::MissingHash, now));
    };

    let expected = compute_hash(token, &data.data_check_string());
    let signature_ok: bool = expected.as_bytes().ct_eq(claimed.as_bytes()).into();

    if let Some(auth_date) = data.auth_date() {
        if now.timestamp().saturating_sub(auth_date) > max_age_secs {
            return Ok(Verdict::rejected(Reason::Expired, now));
        }
    }

    Ok(Verdict { verified: signature_ok, reason: Reason::None, checked_at: now })
}

/// Verifier binds a secret source, a clock and a freshness window.
pub struct Verifier {
    secrets: Arc<dyn SecretSource>,
    clock: Arc<dyn Clock>,
    max_age_secs: i64,
}

impl Verifier {
    /// Create a new `Verifier` with the default freshness window.
    pub fn new(secrets: Arc<dyn SecretSource>, clock: Arc<dyn Clock>) -> Self {
        Self { secrets, clock, max_age_secs: FRESHNESS_WINDOW_SECS }
    }

    pub fn with_max_age(mut self, max_age_secs: i64) -> Self {
        self.max_age_secs = max_age_secs;
        self
    }

    pub fn max_age_secs(&self) -> i64 { self.max_age_secs }

    pub fn has_secret(&self) -> bool { self.secrets.bot_token().is_some() }

    /// Verify against the current secret and time.
    pub fn verify(&self, payload: &str) -> Result<Verdict, VerifyError> {
        let token = self.secrets.bot_token();
        verify_with_window(payload, token.as_ref(), self.clock.now(), self.max_age_secs)
    }

    /// Like [`verify`](Self::verify), but missing hash, missing secret and
    /// expiry come back as errors.
    pub fn check(&self, payload: &str) -> Result<Verdict, VerifyError> {
        self.verify(payload)?.into_result()
    }
}
