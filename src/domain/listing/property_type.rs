//! Property type classification.

use serde::{Deserialize, Serialize};

/// Kind of rentable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    StanzaSingola,
    StanzaDoppia,
    Monolocale,
    Bilocale,
    Altro,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::StanzaSingola,
        PropertyType::StanzaDoppia,
        PropertyType::Monolocale,
        PropertyType::Bilocale,
        PropertyType::Altro,
    ];

    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::StanzaSingola => "stanza_singola",
            PropertyType::StanzaDoppia => "stanza_doppia",
            PropertyType::Monolocale => "monolocale",
            PropertyType::Bilocale => "bilocale",
            PropertyType::Altro => "altro",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Human-readable Italian label used in generated copy.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::StanzaSingola => "stanza singola",
            PropertyType::StanzaDoppia => "stanza doppia",
            PropertyType::Monolocale => "monolocale",
            PropertyType::Bilocale => "bilocale",
            PropertyType::Altro => "immobile",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
