use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::VerifyError;

/// Reserved key carrying the hex signature.
pub const HASH_KEY: &str = "hash";
/// Conventional key carrying the issuance time in Unix seconds.
pub const AUTH_DATE_KEY: &str = "auth_date";

/// Server-held bot token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(Vec<u8>);

impl BotToken {
    /// Wrap a token; an empty token is treated as "not configured".
    pub fn new(token: impl Into<Vec<u8>>) -> Option<Self> {
        let bytes = token.into();
        if bytes.is_empty() { None } else { Some(Self(bytes)) }
    }

    pub fn as_bytes(&self) -> &[u8] { &self.0 }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(<redacted>)")
    }
}

/// Why a verdict came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    None,
    MissingHash,
    MissingSecret,
    Expired,
}

/// Outcome of one verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub verified: bool,
    pub reason: Reason,
    pub checked_at: DateTime<Utc>,
}

impl Verdict {
    pub(crate) fn rejected(reason: Reason, checked_at: DateTime<Utc>) -> Self {
        Self { verified: false, reason, checked_at }
    }

    /// Fold a non-`None` reason into the matching error. Signature mismatch
    /// stays `Ok` with `verified == false`.
    pub fn into_result(self) -> Result<Verdict, VerifyError> {
        match self.reason {
            Reason::None => Ok(self),
            Reason::MissingHash => Err(VerifyError::MissingHash),
            Reason::MissingSecret => Err(VerifyError::MissingSecret),
            Reason::Expired => Err(VerifyError::Expired),
        }
    }
}

/// Mini-app user as embedded in the `user` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebAppUser {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub is_premium: Option<bool>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Parsed initData: decoded pairs in their original order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InitData {
    pairs: Vec<(String, String)>,
}

impl InitData {
    /// Parse a form-urlencoded payload. A single leading `?` is ignored.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = url::form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Claimed signature; an empty value counts as absent.
    pub fn hash(&self) -> Option<&str> {
        self.get(HASH_KEY).filter(|h| !h.is_empty())
    }

    pub fn query_id(&self) -> Option<&str> { self.get("query_id") }

    /// Issuance time in Unix seconds, read leniently: optional sign, then
    /// leading digits, anything after is ignored. `None` when no digits lead;
    /// values past the `i64` range clamp to its bounds.
    pub fn auth_date(&self) -> Option<i64> {
        self.get(AUTH_DATE_KEY).and_then(parse_leading_int)
    }

    /// Decode the `user` JSON field, if present.
    pub fn user(&self) -> Result<Option<WebAppUser>, VerifyError> {
        match self.get("user") {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| VerifyError::Malformed(format!("user: {e}"))),
        }
    }

    /// Canonical signing input: every non-hash pair, stable-sorted by key
    /// byte-wise, rendered `key=value` and joined by `\n`.
    pub fn data_check_string(&self) -> String {
        let mut fields: Vec<&(String, String)> =
            self.pairs.iter().filter(|(k, _)| k != HASH_KEY).collect();
        fields.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];
    let parsed = if negative { format!("-{digits}").parse() } else { digits.parse() };
    // Out of range saturates so `now - auth_date` still decides freshness.
    Some(parsed.unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}
