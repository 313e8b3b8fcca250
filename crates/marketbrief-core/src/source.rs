use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Upstream providers that feed a briefing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Yahoo Finance chart endpoint (quotes).
    Yahoo,
    /// CNN Fear & Greed index.
    Cnn,
    /// DuckDuckGo HTML results (headlines).
    Duckduckgo,
}

impl ProviderId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Cnn => "cnn",
            Self::Duckduckgo => "duckduckgo",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names_match_their_serialized_form() {
        for provider in [ProviderId::Yahoo, ProviderId::Cnn, ProviderId::Duckduckgo] {
            let json = serde_json::to_string(&provider).expect("serializes");
            assert_eq!(json, format!("\"{}\"", provider.as_str()));
            assert_eq!(provider.to_string(), provider.as_str());
        }
    }
}
