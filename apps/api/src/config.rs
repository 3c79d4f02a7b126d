use anyhow::{bail, Context, Result};

use crate::game::engine::GameConfig;
use crate::search::fuzzy::DEFAULT_THRESHOLD;

/// Application configuration loaded from environment variables.
/// Every knob has a default, so the service starts with an empty env.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Negotiation bounds and pacing, passed into the engine on every call.
    pub game: GameConfig,
    /// Default similarity cutoff for job search; per-request overridable.
    pub fuzzy_threshold: f64,
    /// Selects the corrected per-token matcher instead of the compatible
    /// whole-text one.
    pub fuzzy_tokenized: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            game: GameConfig {
                min_offer: env_or("MIN_OFFER", 500)?,
                max_offer: env_or("MAX_OFFER", 10_000)?,
                rounds: env_or("NEGOTIATION_ROUNDS", 5)?,
                time_limit_secs: env_or("TIME_LIMIT_SECS", 60)?,
            },
            fuzzy_threshold: env_or("FUZZY_THRESHOLD", DEFAULT_THRESHOLD)?,
            fuzzy_tokenized: env_or("FUZZY_TOKENIZED", false)?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.game.min_offer >= self.game.max_offer {
            bail!(
                "MIN_OFFER ({}) must be below MAX_OFFER ({})",
                self.game.min_offer,
                self.game.max_offer
            );
        }
        if self.game.rounds == 0 {
            bail!("NEGOTIATION_ROUNDS must be at least 1");
        }
        if self.game.time_limit_secs == 0 {
            bail!("TIME_LIMIT_SECS must be at least 1");
        }
        if !(0.0..1.0).contains(&self.fuzzy_threshold) {
            bail!(
                "FUZZY_THRESHOLD must be in [0, 1), got {}",
                self.fuzzy_threshold
            );
        }
        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}
