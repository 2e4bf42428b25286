use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Folder, Prompt, Settings, Tag, ViewMode};

/// Durable portion of the application state. Transient UI state (search
/// filters, selection, edit flag) is deliberately excluded; only the view
/// mode preference survives a restart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub prompts: Vec<Prompt>,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub view_mode: ViewMode,
}

/// The complete serialized snapshot written to durable storage. Dates travel
/// as RFC 3339 text and are reconstructed to instants on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: PersistedState,
}

/// Abstract interface for snapshot persistence.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::PromptStore`] handles the "what" (entity mutations, cascades,
/// derived fields).
pub trait StorageBackend {
    /// Load the last saved snapshot. `Ok(None)` signals first run; an `Err`
    /// signals unreadable or corrupt data, which callers treat as absence.
    fn load(&self) -> Result<Option<Snapshot>>;

    /// Overwrite the entire persisted snapshot. Must be atomic so a crash
    /// mid-write never leaves a torn file behind.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}
