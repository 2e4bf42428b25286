//! # CLI Behavior
//!
//! This is **one possible UI client** for promptpad—not the application
//! itself. For the overall architecture, see the crate-level docs.
//!
//! ## Naked Execution (`promptpad`)
//!
//! Running `promptpad` with no arguments defaults to `promptpad list`.
//! Browsing is the dominant operation and should be the path of least
//! resistance.
//!
//! ## Content Sources (`promptpad add`)
//!
//! 1. `--content` flag (highest priority)
//! 2. Piped stdin: `cat snippet.md | promptpad add "Title"`
//!
//! With neither, `add` fails; prompts never have empty content.
//!
//! ## Referencing Prompts
//!
//! Commands that take a `<PROMPT>` argument accept, in order of precedence:
//! the full id, a unique id prefix, or an exact title (case-insensitive).
//! Folders and tags are referenced the same way by name or id.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap, help text
//! - `commands`: per-command handlers that call the store and print
//! - `render`: output formatting (cards, tables, colors)

mod commands;
mod render;
mod setup;

pub use commands::run;
