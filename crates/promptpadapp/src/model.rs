//! # Domain Model
//!
//! Core entity types for promptpad: [`Prompt`], [`Folder`], [`Tag`],
//! [`Settings`], and the transient [`SearchFilters`] query specification.
//!
//! ## Wire format
//!
//! All entities serialize with camelCase field names and RFC 3339 date
//! strings so that snapshots and export files remain interchangeable with
//! earlier versions of the data files.
//!
//! ## Derived fields
//!
//! `Prompt` carries two fields derived from `content`:
//! - `content_length`: character count of the content
//! - `word_count`: whitespace-delimited token count
//!
//! These are never set directly. [`Prompt::new`] and [`Prompt::set_content`]
//! are the only paths that write them, keeping them consistent with the
//! content at all times.
//!
//! ## Referential model
//!
//! A prompt references at most one folder by id and any number of tags by
//! id. Folders are a flat, single-level category system: `parent_id` and
//! `children` exist on the wire for compatibility with older data files but
//! no operation populates or traverses them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{char_count, generate_id, word_count};

/// A stored text artifact with title, content, and categorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub content_length: usize,
    pub word_count: usize,
}

impl Prompt {
    pub fn new(data: NewPrompt) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            content_length: char_count(&data.content),
            word_count: word_count(&data.content),
            title: data.title,
            content: data.content,
            folder_id: data.folder_id,
            tags: data.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the content and recompute both derived fields.
    pub fn set_content(&mut self, content: String) {
        self.content_length = char_count(&content);
        self.word_count = word_count(&content);
        self.content = content;
    }

    /// Merge a partial update into this prompt and refresh `updated_at`.
    /// Derived fields are recomputed only when the update carries content.
    pub fn apply(&mut self, update: PromptUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.set_content(content);
        }
        if let Some(folder_id) = update.folder_id {
            self.folder_id = folder_id;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        self.updated_at = Utc::now();
    }

    /// Copy of this prompt with a fresh id, a copy marker on the title, and
    /// both timestamps reset to now.
    pub fn duplicate(&self) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            title: format!("{} (copy)", self.title),
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }
}

/// Input for creating a prompt. Callers are expected to have validated
/// non-empty title and content before reaching the store.
#[derive(Debug, Clone, Default)]
pub struct NewPrompt {
    pub title: String,
    pub content: String,
    pub folder_id: Option<String>,
    pub tags: Vec<String>,
}

/// Partial prompt update. `folder_id` is doubly optional: `None` leaves the
/// folder untouched, `Some(None)` moves the prompt to uncategorized.
#[derive(Debug, Clone, Default)]
pub struct PromptUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl PromptUpdate {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_folder(mut self, folder_id: Option<String>) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// A single-level named category a prompt may belong to.
///
/// `parent_id` and `children` survive on the wire but the folder system is
/// flat: nothing reads or writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name,
            parent_id: None,
            children: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial folder update. A rename refreshes the folder's `updated_at`.
#[derive(Debug, Clone, Default)]
pub struct FolderUpdate {
    pub name: Option<String>,
}

impl FolderUpdate {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A named label. Renames do not refresh any timestamp; a tag only records
/// when it was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(name: String, color: Option<String>) -> Self {
        Self {
            id: generate_id(),
            name,
            color,
            created_at: Utc::now(),
        }
    }
}

/// Partial tag update. Tags carry no `updated_at`, so a rename leaves the
/// creation timestamp as the only one.
#[derive(Debug, Clone, Default)]
pub struct TagUpdate {
    pub name: Option<String>,
    pub color: Option<Option<String>>,
}

impl TagUpdate {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = Some(color);
        self
    }
}

/// Format of an outbound webhook notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    Markdown,
    Card,
}

impl Default for MessageFormat {
    fn default() -> Self {
        Self::Markdown
    }
}

/// Outbound webhook notification config (Feishu-compatible bot endpoint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeishuConfig {
    #[serde(default)]
    pub webhook_url: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub message_format: MessageFormat,
}

impl Default for FeishuConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            enabled: false,
            message_format: MessageFormat::Markdown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Default for Theme {
    fn default() -> Self {
        Self::System
    }
}

/// Process-wide singleton configuration. Created once with defaults and only
/// ever updated in place, never listed or keyed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub feishu: FeishuConfig,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_folder: Option<String>,
}

/// Partial settings update. Unset fields keep their current value, so
/// updating the theme cannot clobber the webhook config.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub feishu: Option<FeishuConfig>,
    pub theme: Option<Theme>,
    pub default_folder: Option<Option<String>>,
}

impl Settings {
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(feishu) = update.feishu {
            self.feishu = feishu;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(default_folder) = update.default_folder {
            self.default_folder = default_folder;
        }
    }
}

/// Sort key for the query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    CreatedAt,
    UpdatedAt,
    Title,
    ContentLength,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Transient query specification driving list views. Not part of the
/// import/export boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub query: String,
    pub selected_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_folder: Option<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: String::new(),
            selected_tags: Vec::new(),
            selected_folder: None,
            sort_by: SortBy::UpdatedAt,
            sort_order: SortOrder::Desc,
        }
    }
}

/// Partial filter update, mirroring [`PromptUpdate`] semantics.
#[derive(Debug, Clone, Default)]
pub struct FilterUpdate {
    pub query: Option<String>,
    pub selected_tags: Option<Vec<String>>,
    pub selected_folder: Option<Option<String>>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl SearchFilters {
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(query) = update.query {
            self.query = query;
        }
        if let Some(tags) = update.selected_tags {
            self.selected_tags = tags;
        }
        if let Some(folder) = update.selected_folder {
            self.selected_folder = folder;
        }
        if let Some(sort_by) = update.sort_by {
            self.sort_by = sort_by;
        }
        if let Some(sort_order) = update.sort_order {
            self.sort_order = sort_order;
        }
    }
}

/// Persisted list layout preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Cards,
    List,
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::Cards
    }
}
