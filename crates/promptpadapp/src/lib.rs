//! # promptpadapp
//!
//! Core library for promptpad: a local-first manager for reusable prompt
//! snippets, organized with folders and tags.
//!
//! ## Architecture
//!
//! - [`model`]: entity types (prompts, folders, tags, settings) and the
//!   partial-update structs that mutate them
//! - [`store`]: the [`store::PromptStore`], owning all state with
//!   write-through JSON persistence and cascading deletes
//! - [`query`]: pure filtering and sorting over prompt collections
//! - [`codec`]: the versioned export/import document format
//! - [`webhook`]: outbound Feishu bot notifications for prompt changes
//! - [`error`]: the crate-wide error type and `Result` alias
//!
//! The store is the only stateful component. Query, codec, and webhook are
//! pure functions (plus one HTTP call) so they stay independently testable.

pub mod codec;
pub mod error;
pub mod model;
pub mod query;
pub mod store;
pub mod util;
pub mod webhook;

pub use error::{PromptpadError, Result};
