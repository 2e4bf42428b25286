//! Command dispatch. Resolves user-facing references (id prefixes, titles,
//! names) to entity ids, calls the store, and hands results to `render`.

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use promptpadapp::model::{
    FilterUpdate, FolderUpdate, NewPrompt, PromptUpdate, SettingsUpdate, TagUpdate,
};
use promptpadapp::query;
use promptpadapp::store::fs_backend::FsBackend;
use promptpadapp::store::{FileStore, PromptStore};
use promptpadapp::webhook::{self, PromptAction};

use super::render::{self, short_id};
use super::setup::{
    Cli, Commands, FolderCommands, FormatArg, SettingsCommands, TagCommands, ThemeArg,
    WebhookCommands,
};

pub fn run() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let root = resolve_data_dir(cli.data)?;
    let mut store = PromptStore::open(FsBackend::new(root));

    // Naked promptpad defaults to list.
    let command = cli.command.unwrap_or(Commands::List {
        query: None,
        folder: None,
        tag: Vec::new(),
        sort: None,
        order: None,
        view: None,
    });

    match command {
        Commands::Add {
            title,
            content,
            folder,
            tags,
        } => cmd_add(&mut store, title, content, folder, tags),
        Commands::List {
            query,
            folder,
            tag,
            sort,
            order,
            view,
        } => cmd_list(&mut store, query, folder, tag, sort, order, view),
        Commands::Show { prompt } => cmd_show(&store, &prompt),
        Commands::Edit {
            prompt,
            title,
            content,
            folder,
            no_folder,
            tags,
        } => cmd_edit(&mut store, &prompt, title, content, folder, no_folder, tags),
        Commands::Rm { prompt } => cmd_rm(&mut store, &prompt),
        Commands::Dup { prompt } => cmd_dup(&mut store, &prompt),
        Commands::Folder { action } => cmd_folder(&mut store, action),
        Commands::Tag { action } => cmd_tag(&mut store, action),
        Commands::Settings { action } => cmd_settings(&mut store, action),
        Commands::Export { output } => cmd_export(&store, output),
        Commands::Import { file } => cmd_import(&mut store, &file),
        Commands::Clear { yes } => cmd_clear(&mut store, yes),
        Commands::Webhook { action } => cmd_webhook(&store, action),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env("PROMPTPAD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Data directory precedence: `--data` flag, `PROMPTPAD_DATA` env var,
/// OS default.
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Ok(dir) = std::env::var("PROMPTPAD_DATA") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    Ok(FsBackend::default_root()?)
}

fn cmd_add(
    store: &mut FileStore,
    title: String,
    content: Option<String>,
    folder: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let title = title.trim().to_string();
    if title.is_empty() {
        bail!("title must not be empty");
    }
    let content = match content {
        Some(c) => c,
        None => read_piped_stdin()?,
    };
    if content.trim().is_empty() {
        bail!("content must not be empty (use --content or pipe it in)");
    }

    let folder_id = match folder {
        Some(f) => Some(resolve_folder(store, &f)?),
        None => store.settings().default_folder.clone(),
    };
    let tag_ids = ensure_tags(store, &tags)?;

    let prompt = store.add_prompt(NewPrompt {
        title,
        content,
        folder_id,
        tags: tag_ids,
    })?;

    println!("Created \"{}\" ({})", prompt.title, short_id(&prompt.id));
    notify(store, &prompt.id, PromptAction::Created);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_list(
    store: &mut FileStore,
    query: Option<String>,
    folder: Option<String>,
    tags: Vec<String>,
    sort: Option<super::setup::SortKey>,
    order: Option<super::setup::SortDir>,
    view: Option<super::setup::ViewModeArg>,
) -> Result<()> {
    if let Some(mode) = view {
        store.set_view_mode(mode.into())?;
    }

    let folder_id = folder.map(|f| resolve_folder(store, &f)).transpose()?;
    let tag_ids = tags
        .iter()
        .map(|t| resolve_tag(store, t))
        .collect::<Result<Vec<_>>>()?;

    let mut update = FilterUpdate::default();
    if let Some(q) = query {
        update.query = Some(q);
    }
    if let Some(id) = folder_id {
        update.selected_folder = Some(Some(id));
    }
    if !tag_ids.is_empty() {
        update.selected_tags = Some(tag_ids);
    }
    update.sort_by = sort.map(Into::into);
    update.sort_order = order.map(Into::into);
    store.update_search_filters(update);

    let results = query::filter_and_sort(store.prompts(), store.search_filters());
    render::prompt_list(&results, store);
    Ok(())
}

fn cmd_show(store: &FileStore, reference: &str) -> Result<()> {
    let id = resolve_prompt(store, reference)?;
    let prompt = store
        .prompt(&id)
        .ok_or_else(|| anyhow::anyhow!("no prompt matching \"{reference}\""))?;
    render::prompt_detail(prompt, store);
    Ok(())
}

fn cmd_edit(
    store: &mut FileStore,
    reference: &str,
    title: Option<String>,
    content: Option<String>,
    folder: Option<String>,
    no_folder: bool,
    tags: Option<Vec<String>>,
) -> Result<()> {
    let id = resolve_prompt(store, reference)?;

    let mut update = PromptUpdate::default();
    if let Some(t) = title {
        if t.trim().is_empty() {
            bail!("title must not be empty");
        }
        update = update.with_title(t.trim());
    }
    if let Some(c) = content {
        if c.trim().is_empty() {
            bail!("content must not be empty");
        }
        update = update.with_content(c);
    }
    if no_folder {
        update = update.with_folder(None);
    } else if let Some(f) = folder {
        let folder_id = resolve_folder(store, &f)?;
        update = update.with_folder(Some(folder_id));
    }
    if let Some(names) = tags {
        let tag_ids = ensure_tags(store, &names)?;
        update = update.with_tags(tag_ids);
    }

    match store.update_prompt(&id, update)? {
        Some(prompt) => {
            println!("Updated \"{}\"", prompt.title);
            notify(store, &id, PromptAction::Updated);
            Ok(())
        }
        None => bail!("no prompt with id {id}"),
    }
}

fn cmd_rm(store: &mut FileStore, reference: &str) -> Result<()> {
    let id = resolve_prompt(store, reference)?;
    let title = store.prompt(&id).map(|p| p.title.clone());
    if store.delete_prompt(&id)? {
        println!("Deleted \"{}\"", title.unwrap_or_else(|| id.clone()));
    }
    Ok(())
}

fn cmd_dup(store: &mut FileStore, reference: &str) -> Result<()> {
    let id = resolve_prompt(store, reference)?;
    match store.duplicate_prompt(&id)? {
        Some(copy) => {
            println!("Created \"{}\" ({})", copy.title, short_id(&copy.id));
            Ok(())
        }
        None => bail!("no prompt with id {id}"),
    }
}

fn cmd_folder(store: &mut FileStore, action: FolderCommands) -> Result<()> {
    match action {
        FolderCommands::Add { name } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                bail!("folder name must not be empty");
            }
            let folder = store.add_folder(name)?;
            println!("Created folder \"{}\"", folder.name);
        }
        FolderCommands::Ls => render::folder_list(store),
        FolderCommands::Rename { folder, name } => {
            let id = resolve_folder(store, &folder)?;
            if name.trim().is_empty() {
                bail!("folder name must not be empty");
            }
            store.update_folder(&id, FolderUpdate::default().with_name(name.trim()))?;
            println!("Renamed folder to \"{}\"", name.trim());
        }
        FolderCommands::Rm { folder } => {
            let id = resolve_folder(store, &folder)?;
            let affected = store
                .prompts()
                .iter()
                .filter(|p| p.folder_id.as_deref() == Some(id.as_str()))
                .count();
            store.delete_folder(&id)?;
            println!("Deleted folder ({} prompts now unfiled)", affected);
        }
    }
    Ok(())
}

fn cmd_tag(store: &mut FileStore, action: TagCommands) -> Result<()> {
    match action {
        TagCommands::Add { name, color } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                bail!("tag name must not be empty");
            }
            let tag = store.add_tag(name, color)?;
            println!("Tag \"{}\" ({})", tag.name, short_id(&tag.id));
        }
        TagCommands::Ls => render::tag_list(store),
        TagCommands::Rename { tag, name } => {
            let id = resolve_tag(store, &tag)?;
            if name.trim().is_empty() {
                bail!("tag name must not be empty");
            }
            store.update_tag(&id, TagUpdate::default().with_name(name.trim()))?;
            println!("Renamed tag to \"{}\"", name.trim());
        }
        TagCommands::Color { tag, color } => {
            let id = resolve_tag(store, &tag)?;
            let clearing = color.is_none();
            store.update_tag(&id, TagUpdate::default().with_color(color))?;
            if clearing {
                println!("Cleared tag color");
            } else {
                println!("Set tag color");
            }
        }
        TagCommands::Rm { tag } => {
            let id = resolve_tag(store, &tag)?;
            store.delete_tag(&id)?;
            println!("Deleted tag");
        }
    }
    Ok(())
}

fn cmd_settings(store: &mut FileStore, action: Option<SettingsCommands>) -> Result<()> {
    match action.unwrap_or(SettingsCommands::Show) {
        SettingsCommands::Show => render::settings(store.settings()),
        SettingsCommands::Set { key, value } => {
            let update = build_settings_update(store, &key, &value)?;
            store.update_settings(update)?;
            println!("Set {key}");
        }
    }
    Ok(())
}

fn build_settings_update(store: &FileStore, key: &str, value: &str) -> Result<SettingsUpdate> {
    use clap::ValueEnum;

    let mut update = SettingsUpdate::default();
    match key {
        "theme" => {
            let theme = ThemeArg::from_str(value, true)
                .map_err(|_| anyhow::anyhow!("theme must be light, dark, or system"))?;
            update.theme = Some(theme.into());
        }
        "default-folder" => {
            update.default_folder = if value == "none" {
                Some(None)
            } else {
                Some(Some(resolve_folder(store, value)?))
            };
        }
        "feishu.url" => {
            let mut feishu = store.settings().feishu.clone();
            feishu.webhook_url = value.to_string();
            update.feishu = Some(feishu);
        }
        "feishu.enabled" => {
            let enabled: bool = value
                .parse()
                .map_err(|_| anyhow::anyhow!("feishu.enabled must be true or false"))?;
            let mut feishu = store.settings().feishu.clone();
            feishu.enabled = enabled;
            update.feishu = Some(feishu);
        }
        "feishu.format" => {
            let format = FormatArg::from_str(value, true)
                .map_err(|_| anyhow::anyhow!("feishu.format must be markdown or card"))?;
            let mut feishu = store.settings().feishu.clone();
            feishu.message_format = format.into();
            update.feishu = Some(feishu);
        }
        other => bail!(
            "unknown setting \"{other}\" (expected theme, default-folder, \
             feishu.url, feishu.enabled, or feishu.format)"
        ),
    }
    Ok(update)
}

fn cmd_export(store: &FileStore, output: Option<PathBuf>) -> Result<()> {
    let document = store.export_data()?;
    match output {
        Some(path) => {
            std::fs::write(&path, document)
                .with_context(|| format!("could not write {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => println!("{document}"),
    }
    Ok(())
}

fn cmd_import(store: &mut FileStore, file: &PathBuf) -> Result<()> {
    let document = std::fs::read_to_string(file)
        .with_context(|| format!("could not read {}", file.display()))?;
    store.import_data(&document)?;
    println!(
        "Imported {} prompts, {} folders, {} tags",
        store.prompts().len(),
        store.folders().len(),
        store.tags().len()
    );
    Ok(())
}

fn cmd_clear(store: &mut FileStore, yes: bool) -> Result<()> {
    if !yes {
        bail!("this deletes everything; pass --yes to confirm");
    }
    store.clear_all_data()?;
    println!("All data cleared");
    Ok(())
}

fn cmd_webhook(store: &FileStore, action: WebhookCommands) -> Result<()> {
    match action {
        WebhookCommands::Test => {
            webhook::test_connection(&store.settings().feishu)?;
            println!("Webhook test message delivered");
            Ok(())
        }
    }
}

/// Fire a notification for a prompt change. Failures are already logged by
/// the webhook module; the CLI does not fail the command over them.
fn notify(store: &FileStore, id: &str, action: PromptAction) {
    if let Some(prompt) = store.prompt(id) {
        webhook::send_prompt_notification(&store.settings().feishu, prompt, action);
    }
}

fn read_piped_stdin() -> Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("no content given; use --content or pipe it in");
    }
    let mut content = String::new();
    stdin.lock().read_to_string(&mut content)?;
    Ok(content)
}

/// Resolve a prompt reference: full id, unique id prefix, or exact title
/// (case-insensitive).
fn resolve_prompt(store: &FileStore, reference: &str) -> Result<String> {
    if store.prompt(reference).is_some() {
        return Ok(reference.to_string());
    }

    let prefix_matches: Vec<&str> = store
        .prompts()
        .iter()
        .filter(|p| p.id.starts_with(reference))
        .map(|p| p.id.as_str())
        .collect();
    match prefix_matches.as_slice() {
        [id] => return Ok((*id).to_string()),
        [] => {}
        _ => bail!("id prefix \"{reference}\" is ambiguous"),
    }

    let needle = reference.to_lowercase();
    let title_matches: Vec<&str> = store
        .prompts()
        .iter()
        .filter(|p| p.title.to_lowercase() == needle)
        .map(|p| p.id.as_str())
        .collect();
    match title_matches.as_slice() {
        [id] => Ok((*id).to_string()),
        [] => bail!("no prompt matching \"{reference}\""),
        _ => bail!("multiple prompts titled \"{reference}\"; use an id"),
    }
}

fn resolve_folder(store: &FileStore, reference: &str) -> Result<String> {
    if store.folder(reference).is_some() {
        return Ok(reference.to_string());
    }
    let needle = reference.to_lowercase();
    let matches: Vec<&str> = store
        .folders()
        .iter()
        .filter(|f| f.name.to_lowercase() == needle)
        .map(|f| f.id.as_str())
        .collect();
    match matches.as_slice() {
        [id] => Ok((*id).to_string()),
        [] => bail!("no folder matching \"{reference}\""),
        _ => bail!("multiple folders named \"{reference}\"; use an id"),
    }
}

fn resolve_tag(store: &FileStore, reference: &str) -> Result<String> {
    if store.tag(reference).is_some() {
        return Ok(reference.to_string());
    }
    let needle = reference.to_lowercase();
    let found = store
        .tags()
        .iter()
        .find(|t| t.name.to_lowercase() == needle)
        .map(|t| t.id.clone());
    found.ok_or_else(|| anyhow::anyhow!("no tag matching \"{reference}\""))
}

/// Map tag names to ids, creating tags that do not exist yet. The store
/// dedupes names case-insensitively, so repeats collapse to one tag.
fn ensure_tags(store: &mut FileStore, names: &[String]) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let tag = store.add_tag(name, None)?;
        if !ids.contains(&tag.id) {
            ids.push(tag.id);
        }
    }
    Ok(ids)
}
