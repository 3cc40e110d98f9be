use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use initdata_core::{StaticSecret, SystemClock, Verifier, FRESHNESS_WINDOW_SECS};

/// Runtime configuration, read from flags or the environment.
#[derive(Parser, Clone)]
#[command(name = "initdata-server", about = "Verifies mini-app initData payloads over HTTP")]
pub struct ServerConfig {
    /// Bot token issued by the chat platform. Absent means every verification
    /// request answers 500.
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub bot_token: Option<String>,

    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Maximum accepted age of `auth_date`, in seconds.
    #[arg(long, env = "INITDATA_MAX_AGE_SECS", default_value_t = FRESHNESS_WINDOW_SECS)]
    pub max_age_secs: i64,
}

impl ServerConfig {
    pub fn has_bot_token(&self) -> bool {
        self.bot_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Build the verifier backed by the wall clock.
    pub fn verifier(&self) -> Verifier {
        Verifier::new(
            Arc::new(StaticSecret::new(self.bot_token.as_deref())),
            Arc::new(SystemClock),
        )
        .with_max_age(self.max_age_secs)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("listen", &self.listen)
            .field("max_age_secs", &self.max_age_secs)
            .finish()
    }
}
