//! # Store Layer
//!
//! [`PromptStore`] is the single source of truth for all persisted entities
//! (prompts, folders, tags, settings) plus in-memory-only UI state (current
//! search filters, view mode, selection, edit flag).
//!
//! ## Write-through persistence
//!
//! Every entity mutation synchronously saves a full [`backend::Snapshot`]
//! through the configured [`backend::StorageBackend`]. The in-memory state
//! is authoritative: a failed save is logged and reported as an `Err`, but
//! the mutation that triggered it is never rolled back. Transient UI state
//! changes (filters, selection, edit flag) do not touch the backend; the
//! view mode preference does.
//!
//! ## Referential integrity
//!
//! Deleting a folder clears `folder_id` on every prompt that referenced it;
//! deleting a tag strips its id from every prompt's tag list. Both cascades
//! happen inside the same synchronous mutation as the deletion itself, so no
//! caller can observe a dangling reference.
//!
//! ## Missing ids
//!
//! Update, delete, and duplicate operations on a nonexistent id are no-ops,
//! not errors. They return `Ok(None)` / `Ok(false)` and skip the save.
//!
//! ## Implementations
//!
//! - [`FileStore`]: production store over [`fs_backend::FsBackend`]
//! - [`InMemoryStore`]: test store over [`mem_backend::MemBackend`]

use tracing::warn;

use crate::codec;
use crate::error::Result;
use crate::model::{
    FilterUpdate, Folder, FolderUpdate, NewPrompt, Prompt, PromptUpdate, SearchFilters, Settings,
    SettingsUpdate, Tag, TagUpdate, ViewMode,
};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

use backend::{PersistedState, Snapshot, StorageBackend};
use fs_backend::FsBackend;
use mem_backend::MemBackend;

pub struct PromptStore<B: StorageBackend> {
    backend: B,
    prompts: Vec<Prompt>,
    folders: Vec<Folder>,
    tags: Vec<Tag>,
    settings: Settings,
    view_mode: ViewMode,
    search_filters: SearchFilters,
    selected_prompt: Option<String>,
    is_editing: bool,
}

/// Production store persisting to the filesystem.
pub type FileStore = PromptStore<FsBackend>;

impl FileStore {
    /// Open the store at the OS default data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(FsBackend::new(FsBackend::default_root()?)))
    }
}

/// Ephemeral store for tests.
pub type InMemoryStore = PromptStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::open(MemBackend::new())
    }
}

impl<B: StorageBackend> PromptStore<B> {
    /// Open a store over the given backend. An unreadable or corrupt
    /// snapshot is treated as absent: the store starts from defaults.
    pub fn open(backend: B) -> Self {
        let state = match backend.load() {
            Ok(Some(snapshot)) => snapshot.state,
            Ok(None) => PersistedState::default(),
            Err(e) => {
                warn!(error = %e, "failed to load snapshot, starting from defaults");
                PersistedState::default()
            }
        };

        Self {
            backend,
            prompts: state.prompts,
            folders: state.folders,
            tags: state.tags,
            settings: state.settings,
            view_mode: state.view_mode,
            search_filters: SearchFilters::default(),
            selected_prompt: None,
            is_editing: false,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: PersistedState {
                prompts: self.prompts.clone(),
                folders: self.folders.clone(),
                tags: self.tags.clone(),
                settings: self.settings.clone(),
                view_mode: self.view_mode,
            },
        }
    }

    /// Write-through save. The in-memory mutation that triggered this has
    /// already been applied and stands regardless of the outcome.
    fn persist(&self) -> Result<()> {
        self.backend.save(&self.snapshot()).map_err(|e| {
            warn!(error = %e, "snapshot save failed, in-memory state retained");
            e
        })
    }

    // --- Accessors ---

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn search_filters(&self) -> &SearchFilters {
        &self.search_filters
    }

    pub fn selected_prompt(&self) -> Option<&str> {
        self.selected_prompt.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn prompt(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    pub fn tag(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    // --- Prompt operations ---

    pub fn add_prompt(&mut self, data: NewPrompt) -> Result<Prompt> {
        let prompt = Prompt::new(data);
        self.prompts.push(prompt.clone());
        self.persist()?;
        Ok(prompt)
    }

    pub fn update_prompt(&mut self, id: &str, update: PromptUpdate) -> Result<Option<Prompt>> {
        let Some(prompt) = self.prompts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        prompt.apply(update);
        let updated = prompt.clone();
        self.persist()?;
        Ok(Some(updated))
    }

    pub fn delete_prompt(&mut self, id: &str) -> Result<bool> {
        let before = self.prompts.len();
        self.prompts.retain(|p| p.id != id);
        if self.prompts.len() == before {
            return Ok(false);
        }
        if self.selected_prompt.as_deref() == Some(id) {
            self.selected_prompt = None;
        }
        self.persist()?;
        Ok(true)
    }

    pub fn duplicate_prompt(&mut self, id: &str) -> Result<Option<Prompt>> {
        let Some(source) = self.prompt(id) else {
            return Ok(None);
        };
        let copy = source.duplicate();
        self.prompts.push(copy.clone());
        self.persist()?;
        Ok(Some(copy))
    }

    // --- Folder operations ---

    pub fn add_folder(&mut self, name: impl Into<String>) -> Result<Folder> {
        let folder = Folder::new(name.into());
        self.folders.push(folder.clone());
        self.persist()?;
        Ok(folder)
    }

    pub fn update_folder(&mut self, id: &str, update: FolderUpdate) -> Result<Option<Folder>> {
        let Some(folder) = self.folders.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            folder.name = name;
        }
        folder.updated_at = chrono::Utc::now();
        let updated = folder.clone();
        self.persist()?;
        Ok(Some(updated))
    }

    /// Delete a folder and move every prompt that referenced it back to
    /// uncategorized, in one synchronous mutation.
    pub fn delete_folder(&mut self, id: &str) -> Result<bool> {
        let before = self.folders.len();
        self.folders.retain(|f| f.id != id);
        if self.folders.len() == before {
            return Ok(false);
        }
        for prompt in &mut self.prompts {
            if prompt.folder_id.as_deref() == Some(id) {
                prompt.folder_id = None;
            }
        }
        self.persist()?;
        Ok(true)
    }

    // --- Tag operations ---

    /// Create a tag. Names are unique case-insensitively: adding a name that
    /// already exists returns the existing tag instead of a duplicate. A
    /// color supplied alongside an existing name is applied to that tag.
    pub fn add_tag(&mut self, name: impl Into<String>, color: Option<String>) -> Result<Tag> {
        let name = name.into();
        let lower = name.to_lowercase();
        if let Some(existing) = self.tags.iter_mut().find(|t| t.name.to_lowercase() == lower) {
            if let Some(color) = color {
                existing.color = Some(color);
                let updated = existing.clone();
                self.persist()?;
                return Ok(updated);
            }
            return Ok(existing.clone());
        }
        let tag = Tag::new(name, color);
        self.tags.push(tag.clone());
        self.persist()?;
        Ok(tag)
    }

    pub fn update_tag(&mut self, id: &str, update: TagUpdate) -> Result<Option<Tag>> {
        let Some(tag) = self.tags.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            tag.name = name;
        }
        if let Some(color) = update.color {
            tag.color = color;
        }
        let updated = tag.clone();
        self.persist()?;
        Ok(Some(updated))
    }

    /// Delete a tag and strip its id from every prompt's tag list, in one
    /// synchronous mutation.
    pub fn delete_tag(&mut self, id: &str) -> Result<bool> {
        let before = self.tags.len();
        self.tags.retain(|t| t.id != id);
        if self.tags.len() == before {
            return Ok(false);
        }
        for prompt in &mut self.prompts {
            prompt.tags.retain(|t| t != id);
        }
        self.persist()?;
        Ok(true)
    }

    // --- Settings and UI state ---

    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<Settings> {
        self.settings.apply(update);
        let updated = self.settings.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Transient: not persisted.
    pub fn update_search_filters(&mut self, update: FilterUpdate) {
        self.search_filters.apply(update);
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> Result<()> {
        self.view_mode = mode;
        self.persist()
    }

    /// Transient: not persisted.
    pub fn set_selected_prompt(&mut self, id: Option<String>) {
        self.selected_prompt = id;
    }

    /// Transient: not persisted.
    pub fn set_editing(&mut self, editing: bool) {
        self.is_editing = editing;
    }

    // --- Import / export ---

    pub fn export_data(&self) -> Result<String> {
        codec::encode(&self.prompts, &self.folders, &self.tags, &self.settings)
    }

    /// Replace the entire entity set with the contents of an export
    /// document. All-or-nothing: a parse or structural failure leaves the
    /// current state completely unchanged.
    pub fn import_data(&mut self, document: &str) -> Result<()> {
        let imported = codec::decode(document)?;
        self.prompts = imported.prompts;
        self.folders = imported.folders;
        self.tags = imported.tags;
        self.settings = imported.settings;
        self.persist()?;
        Ok(())
    }

    pub fn clear_all_data(&mut self) -> Result<()> {
        self.prompts.clear();
        self.folders.clear();
        self.tags.clear();
        self.settings = Settings::default();
        self.search_filters = SearchFilters::default();
        self.selected_prompt = None;
        self.is_editing = false;
        self.persist()
    }
}
