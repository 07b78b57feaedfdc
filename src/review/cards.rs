//! Card data for a review session
//!
//! Decodes the serialized card payload once and serves cards by index.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{log_debug, log_error};

// ═══════════════════════════════════════════════════════════════════════════════
// Card
// ═══════════════════════════════════════════════════════════════════════════════

/// A single term/definition pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Front side of the card
    #[serde(default, deserialize_with = "null_as_empty")]
    pub term: String,
    /// Back side of the card
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dfn: String,
    /// Legacy name for the back side, used when `dfn` is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

impl Card {
    pub fn new(term: impl Into<String>, dfn: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            dfn: dfn.into(),
            definition: None,
        }
    }

    /// Definition text as shown to the learner.
    ///
    /// `dfn` wins when non-empty, then the legacy `definition` field, then `""`.
    pub fn resolved_definition(&self) -> &str {
        if self.dfn.is_empty() {
            self.definition.as_deref().unwrap_or_default()
        } else {
            &self.dfn
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Card Set
// ═══════════════════════════════════════════════════════════════════════════════

/// The immutable ordered cards of one review session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSet {
    cards: Vec<Card>,
}

impl CardSet {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Decode a JSON array of card records.
    ///
    /// Blank input is an empty deck. Anything that fails to decode is logged
    /// and also yields an empty deck; this never fails outward.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }

        match serde_json::from_str::<Vec<Card>>(raw) {
            Ok(cards) => {
                log_debug!("Loaded {} cards", cards.len());
                Self { cards }
            }
            Err(e) => {
                log_error!("invalid cards JSON: {}", e);
                Self::default()
            }
        }
    }

    /// Card at `index`, or an empty card when `index` is out of range
    pub fn get(&self, index: usize) -> Card {
        self.cards.get(index).cloned().unwrap_or_default()
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Total used for display; an empty deck still reads as one position
    pub fn effective_total(&self) -> usize {
        self.cards.len().max(1)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════════════════════════

/// Where the serialized card payload comes from
#[derive(Debug, Clone)]
pub enum CardSource {
    /// JSON file on disk
    File(PathBuf),
    /// JSON passed directly on the command line
    Inline(String),
    /// JSON piped on standard input
    Stdin,
}

/// Read the raw payload and decode it.
///
/// Only I/O failures are errors here; a payload that reads fine but does not
/// decode still becomes an empty deck.
pub fn load_cards(source: &CardSource) -> Result<CardSet> {
    let raw = match source {
        CardSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read cards from {}", path.display()))?,
        CardSource::Inline(raw) => raw.clone(),
        CardSource::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read cards from stdin")?;
            buf
        }
    };

    Ok(CardSet::parse(&raw))
}
