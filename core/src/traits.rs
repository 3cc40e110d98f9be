use chrono::{DateTime, Utc};

use crate::types::BotToken;

/// Abstraction over where the bot token comes from. Implementers decide how
/// deployment configuration is read; `None` means "not configured".
pub trait SecretSource: Send + Sync {
    fn bot_token(&self) -> Option<BotToken>;
}

/// Source of the current time, injected so freshness can be tested.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Secret fixed at construction time.
#[derive(Clone, Debug, Default)]
pub struct StaticSecret(Option<BotToken>);

impl StaticSecret {
    /// Build from a raw token; empty or absent means unconfigured.
    pub fn new(token: Option<&str>) -> Self {
        Self(token.and_then(|t| BotToken::new(t)))
    }
}

impl SecretSource for StaticSecret {
    fn bot_token(&self) -> Option<BotToken> { self.0.clone() }
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// Clock frozen at a given instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> { self.0 }
}
