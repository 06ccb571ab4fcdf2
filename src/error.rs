//! Error types for the economy model, its catalog, saves and configuration.

use crate::sci::Sci;

/// A rejected purchase or prestige. The player state is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EconomyError {
    #[error("unknown upgrade: {0}")]
    UnknownUpgrade(String),

    #[error("upgrade {0} is still locked")]
    UpgradeLocked(String),

    #[error("upgrade {0} is already at the maximum level")]
    MaxLevel(String),

    #[error("cannot afford {key}: costs {cost}, score is {score}")]
    InsufficientFunds { key: String, cost: Sci, score: Sci },

    #[error("prestige needs a score of at least 1.00B, score is {score}")]
    PrestigeNotEligible { score: Sci },
}

/// An inconsistent upgrade catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate upgrade key: {0}")]
    DuplicateKey(String),

    #[error("upgrade {key} unlocks on unknown upgrade {reference}")]
    UnknownReference { key: String, reference: String },

    #[error("upgrade {key} has cost multiplier {multiplier}, must be >= 1")]
    InvalidCostMultiplier { key: String, multiplier: f64 },

    #[error("upgrade {key} has base cost {cost}, must be > 0")]
    InvalidBaseCost { key: String, cost: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
