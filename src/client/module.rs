//! Flashcard module authoring
//!
//! A [`ModuleDraft`] is the editable form: a name, a description and rows of
//! term/definition pairs. Only complete rows are submitted.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use super::{ApiClient, ClientError, Submitted, ValidationError};
use crate::log_info;

const MODULES_PATH: &str = "/api/modules";

/// One editable card row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDraft {
    #[serde(default)]
    pub term: String,
    #[serde(default, alias = "definition")]
    pub dfn: String,
}

impl CardDraft {
    pub fn new(term: impl Into<String>, dfn: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            dfn: dfn.into(),
        }
    }

    /// Both sides have non-blank text
    pub fn is_complete(&self) -> bool {
        !self.term.trim().is_empty() && !self.dfn.trim().is_empty()
    }
}

/// Module creation form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cards: Vec<CardDraft>,
}

impl Default for ModuleDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Request body for module creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModulePayload {
    pub name: String,
    pub description: String,
    pub cards: Vec<CardDraft>,
}

impl ModuleDraft {
    /// A blank form with a single empty row
    pub fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            cards: vec![CardDraft::default()],
        }
    }

    /// Read a draft from a `.json` or `.toml` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read module file {}", path.display()))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Invalid module file {}", path.display())),
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Invalid module file {}", path.display())),
            other => Err(anyhow!(
                "Unsupported module file type {:?}; use .json or .toml",
                other.unwrap_or_default()
            )),
        }
    }

    /// Append an empty row and return its one-based number
    pub fn add_card(&mut self) -> usize {
        self.cards.push(CardDraft::default());
        self.cards.len()
    }

    /// Remove the row at `index`, if it exists
    pub fn remove_card(&mut self, index: usize) -> Option<CardDraft> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    /// Check the form and build the request body from its complete rows
    pub fn validate(&self) -> Result<ModulePayload, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingModuleName);
        }

        let cards: Vec<CardDraft> = self
            .cards
            .iter()
            .filter(|c| c.is_complete())
            .cloned()
            .collect();
        if cards.is_empty() {
            return Err(ValidationError::NoCompleteCards);
        }

        Ok(ModulePayload {
            name: self.name.clone(),
            description: self.description.clone(),
            cards,
        })
    }
}

/// Validate and submit a module
pub async fn create_module(
    client: &ApiClient,
    draft: &ModuleDraft,
) -> Result<Submitted, ClientError> {
    let payload = draft.validate()?;
    let submitted = client
        .post_json(MODULES_PATH, &payload, "Network error", |_| {
            "Could not create a module".to_string()
        })
        .await?;

    log_info!(
        "Module '{}' created with {} cards",
        payload.name,
        payload.cards.len()
    );
    Ok(submitted)
}
