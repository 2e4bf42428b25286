//! Argument parsing. Pure clap derive definitions, no behavior.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use promptpadapp::model::{MessageFormat, SortBy, SortOrder, Theme, ViewMode};

#[derive(Parser)]
#[command(
    name = "promptpad",
    version,
    about = "A local-first manager for reusable prompt snippets",
    long_about = "Store, organize and search prompt snippets from the terminal.\n\
                  Prompts live in folders, carry tags, and persist as a single\n\
                  JSON file in your OS data directory."
)]
pub struct Cli {
    /// Override the data directory (also: PROMPTPAD_DATA env var)
    #[arg(long, global = true, value_name = "DIR")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a prompt (content from --content or piped stdin)
    Add {
        title: String,
        /// Prompt body; omit to read from piped stdin
        #[arg(long)]
        content: Option<String>,
        /// Folder to file the prompt under (name or id)
        #[arg(long)]
        folder: Option<String>,
        /// Comma-separated tag names; missing tags are created
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// List prompts, optionally filtered and sorted
    List {
        /// Match title or content (case-insensitive substring)
        #[arg(long, short)]
        query: Option<String>,
        /// Only prompts in this folder (name or id)
        #[arg(long)]
        folder: Option<String>,
        /// Only prompts carrying any of these tags (repeatable)
        #[arg(long, short)]
        tag: Vec<String>,
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
        #[arg(long, value_enum)]
        order: Option<SortDir>,
        /// Switch the display style (remembered across runs)
        #[arg(long, value_enum)]
        view: Option<ViewModeArg>,
    },
    /// Show a prompt in full
    Show { prompt: String },
    /// Edit a prompt's fields
    Edit {
        prompt: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Move to this folder (name or id)
        #[arg(long, conflicts_with = "no_folder")]
        folder: Option<String>,
        /// Remove the prompt from its folder
        #[arg(long)]
        no_folder: bool,
        /// Replace the tag set (comma-separated names)
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },
    /// Delete a prompt
    Rm { prompt: String },
    /// Duplicate a prompt ("<title> (copy)")
    Dup { prompt: String },
    /// Manage folders
    Folder {
        #[command(subcommand)]
        action: FolderCommands,
    },
    /// Manage tags
    Tag {
        #[command(subcommand)]
        action: TagCommands,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsCommands>,
    },
    /// Export all data as a versioned JSON document
    Export {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Import a previously exported document, replacing all data
    Import { file: PathBuf },
    /// Delete all prompts, folders, tags, and settings
    Clear {
        /// Required; clearing is irreversible
        #[arg(long)]
        yes: bool,
    },
    /// Webhook utilities
    Webhook {
        #[command(subcommand)]
        action: WebhookCommands,
    },
}

#[derive(Subcommand)]
pub enum FolderCommands {
    /// Create a folder
    Add { name: String },
    /// List folders with prompt counts
    Ls,
    /// Rename a folder
    Rename { folder: String, name: String },
    /// Delete a folder (its prompts become unfiled)
    Rm { folder: String },
}

#[derive(Subcommand)]
pub enum TagCommands {
    /// Create a tag (names are unique, case-insensitive)
    Add {
        name: String,
        #[arg(long)]
        color: Option<String>,
    },
    /// List tags with usage counts
    Ls,
    /// Rename a tag
    Rename { tag: String, name: String },
    /// Set or clear a tag's color
    Color {
        tag: String,
        /// Omit to clear the color
        color: Option<String>,
    },
    /// Delete a tag (removed from every prompt)
    Rm { tag: String },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print the current settings
    Show,
    /// Change one setting
    ///
    /// Keys: theme, default-folder, feishu.url, feishu.enabled,
    /// feishu.format
    Set { key: String, value: String },
}

#[derive(Subcommand)]
pub enum WebhookCommands {
    /// Send a test message to the configured webhook
    Test,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortKey {
    Title,
    Created,
    Updated,
    Length,
}

impl From<SortKey> for SortBy {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Title => SortBy::Title,
            SortKey::Created => SortBy::CreatedAt,
            SortKey::Updated => SortBy::UpdatedAt,
            SortKey::Length => SortBy::ContentLength,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortDir {
    Asc,
    Desc,
}

impl From<SortDir> for SortOrder {
    fn from(dir: SortDir) -> Self {
        match dir {
            SortDir::Asc => SortOrder::Asc,
            SortDir::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ViewModeArg {
    Cards,
    List,
}

impl From<ViewModeArg> for ViewMode {
    fn from(arg: ViewModeArg) -> Self {
        match arg {
            ViewModeArg::Cards => ViewMode::Cards,
            ViewModeArg::List => ViewMode::List,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::System => Theme::System,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Markdown,
    Card,
}

impl From<FormatArg> for MessageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Markdown => MessageFormat::Markdown,
            FormatArg::Card => MessageFormat::Card,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_naked_invocation_parses() {
        let cli = Cli::try_parse_from(["promptpad"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_add_with_tags_splits_on_comma() {
        let cli = Cli::try_parse_from([
            "promptpad", "add", "T", "--content", "c", "--tags", "a,b",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add { tags, .. }) => assert_eq!(tags, vec!["a", "b"]),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_edit_folder_flags_conflict() {
        let result = Cli::try_parse_from([
            "promptpad", "edit", "p", "--folder", "f", "--no-folder",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_data_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["promptpad", "list", "--data", "/tmp/x"]).unwrap();
        assert_eq!(cli.data.unwrap(), std::path::Path::new("/tmp/x"));
    }
}
