use serde::{Deserialize, Serialize};
use std::fmt;

/// The overall routing strategy the browser should use.
///
/// Serialized form is the single-letter token used both on the wire and in
/// the key-value store (`"T"` is historical: the `ENABLED` key originally
/// held a plain on/off flag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyMode {
    #[serde(rename = "T")]
    On,
    #[serde(rename = "D")]
    Direct,
    #[serde(rename = "S")]
    System,
    #[serde(rename = "C")]
    China,
    #[serde(rename = "P")]
    Polyjuice,
    /// Reported by the coordinator when the mode is hard-coded; the persisted
    /// user choice is informational only. Never user-selectable.
    #[serde(rename = "B")]
    BakedIn,
}

impl ProxyMode {
    /// The storage/wire token for this mode.
    pub const fn token(self) -> &'static str {
        match self {
            ProxyMode::On => "T",
            ProxyMode::Direct => "D",
            ProxyMode::System => "S",
            ProxyMode::China => "C",
            ProxyMode::Polyjuice => "P",
            ProxyMode::BakedIn => "B",
        }
    }

    /// Parses a storage token. Unknown tokens yield `None`; callers decide
    /// whether that is an error or silently falls back to a default.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "T" => Some(ProxyMode::On),
            "D" => Some(ProxyMode::Direct),
            "S" => Some(ProxyMode::System),
            "C" => Some(ProxyMode::China),
            "P" => Some(ProxyMode::Polyjuice),
            "B" => Some(ProxyMode::BakedIn),
            _ => None,
        }
    }

    pub fn user_selectable(self) -> bool {
        !matches!(self, ProxyMode::BakedIn)
    }
}

impl Default for ProxyMode {
    fn default() -> Self {
        ProxyMode::On
    }
}

impl fmt::Display for ProxyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProxyMode::On => "on",
            ProxyMode::Direct => "direct",
            ProxyMode::System => "system",
            ProxyMode::China => "china",
            ProxyMode::Polyjuice => "polyjuice",
            ProxyMode::BakedIn => "baked-in",
        };
        write!(f, "{name}")
    }
}
