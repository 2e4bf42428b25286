//! # Promptpad CLI Architecture
//!
//! Promptpad ships with a CLI client, but the binary is intentionally thin:
//! the CLI lives in `src/cli/`, while this file only invokes `cli::run()` and
//! handles process termination. The CLI is the only layer that knows about
//! terminal I/O, exit codes, and output formatting.
//!
//! ## Workspace Structure
//!
//! - `crates/promptpadapp/` — Core library with UI-agnostic business logic
//! - `crates/promptpad-cli/` — This CLI tool, depends on the library
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/cli/)                                    │
//! │  - clap argument parsing (setup.rs)                      │
//! │  - Command dispatch + store wiring (commands.rs)         │
//! │  - Terminal rendering via console styles (render.rs)     │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Store Layer (promptpadapp::store)                       │
//! │  - Entity mutations with write-through persistence       │
//! │  - Returns normal Rust values, never touches the tty     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Diagnostics go through `tracing`; set `PROMPTPAD_LOG` (an env-filter
//! directive, e.g. `promptpadapp=debug`) to see them on stderr.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
