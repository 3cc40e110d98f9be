//! initdata core library: verification of signed mini-app session payloads.
//!
//! The hosting chat platform hands each mini-app session a form-urlencoded
//! `initData` string signed with a key derived from the bot token:
//! - canonical signing input: non-hash pairs, sorted by key, `key=value` joined by `\n`
//! - `HMAC-SHA256(key = "WebAppData", msg = token)` as the intermediate key
//! - `HMAC-SHA256(key = intermediate, msg = canonical)` hex-encoded as the signature
//! - `auth_date` freshness window of 24 hours
//!
//! Everything here is pure; the time and the token are passed in.

pub mod errors;
pub mod traits;
pub mod types;
pub mod verifier;

pub use errors::VerifyError;
pub use traits::{Clock, FixedClock, SecretSource, StaticSecret, SystemClock};
pub use types::{BotToken, InitData, Reason, Verdict, WebAppUser};
pub use verifier::{compute_hash, sign, verify, verify_with_window, Verifier, FRESHNESS_WINDOW_SECS};
