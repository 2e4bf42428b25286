//! # Import/Export Codec
//!
//! Converts the full entity set to and from a versioned JSON envelope:
//!
//! ```json
//! {
//!   "prompts": [...], "folders": [...], "tags": [...],
//!   "settings": {...}, "exportedAt": "...", "version": "1.0.0"
//! }
//! ```
//!
//! Decoding is strict and all-or-nothing: `prompts`, `folders`, and `tags`
//! must be present as arrays of well-formed entities. `settings` is optional
//! and any missing sub-field falls back to its default. A parse or shape
//! failure yields a single typed error; there is no partial recovery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PromptpadError, Result};
use crate::model::{Folder, Prompt, Settings, Tag};

/// Envelope version written on export.
pub const EXPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    prompts: &'a [Prompt],
    folders: &'a [Folder],
    tags: &'a [Tag],
    settings: &'a Settings,
    exported_at: DateTime<Utc>,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportEnvelope {
    prompts: Vec<Prompt>,
    folders: Vec<Folder>,
    tags: Vec<Tag>,
    #[serde(default)]
    settings: Option<Settings>,
}

/// The validated contents of an import document. `settings` has already
/// been merged over defaults.
#[derive(Debug, Clone)]
pub struct ImportedData {
    pub prompts: Vec<Prompt>,
    pub folders: Vec<Folder>,
    pub tags: Vec<Tag>,
    pub settings: Settings,
}

/// Serialize the full entity set plus settings into the versioned envelope.
pub fn encode(
    prompts: &[Prompt],
    folders: &[Folder],
    tags: &[Tag],
    settings: &Settings,
) -> Result<String> {
    let document = ExportDocument {
        prompts,
        folders,
        tags,
        settings,
        exported_at: Utc::now(),
        version: EXPORT_VERSION,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parse and structurally validate an import document.
pub fn decode(document: &str) -> Result<ImportedData> {
    let envelope: ImportEnvelope = serde_json::from_str(document)
        .map_err(|e| PromptpadError::Import(format!("invalid import document: {}", e)))?;

    Ok(ImportedData {
        prompts: envelope.prompts,
        folders: envelope.folders,
        tags: envelope.tags,
        settings: envelope.settings.unwrap_or_default(),
    })
}
