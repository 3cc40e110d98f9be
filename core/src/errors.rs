use thiserror::Error;

/// Errors that can arise while verifying an initData payload.
///
/// A bad signature is not an error: it is reported as `verified: false` on
/// the [`Verdict`](crate::Verdict).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("initData is required")]
    MissingPayload,
    #[error("hash not found in initData")]
    MissingHash,
    #[error("bot token not configured")]
    MissingSecret,
    #[error("initData expired")]
    Expired,
    #[error("malformed initData: {0}")]
    Malformed(String),
}

impl VerifyError {
    /// True when the caller supplied bad input and may fix it by sending a
    /// fresh payload. False for server-side faults.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingPayload | Self::MissingHash | Self::Expired)
    }
}
