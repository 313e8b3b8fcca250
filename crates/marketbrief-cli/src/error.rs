use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] marketbrief_core::ConfigError),

    #[error("ticker {symbol} not found in watchlist")]
    UnknownTicker { symbol: String },

    #[error(transparent)]
    Core(#[from] marketbrief_core::CoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Source failures never reach here; anything that does ends the run with 1.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_)
            | Self::UnknownTicker { .. }
            | Self::Core(_)
            | Self::Serialization(_) => 1,
        }
    }
}
