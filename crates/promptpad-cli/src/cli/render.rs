//! Terminal output. All formatting lives here so the command handlers stay
//! print-free except for one-line confirmations.

use console::style;
use promptpadapp::model::{Prompt, Settings, Theme, ViewMode};
use promptpadapp::store::FileStore;
use promptpadapp::util::{format_absolute, format_relative};

pub fn prompt_list(prompts: &[Prompt], store: &FileStore) {
    if prompts.is_empty() {
        println!("{}", style("No prompts found.").dim());
        return;
    }
    match store.view_mode() {
        ViewMode::Cards => {
            for prompt in prompts {
                card(prompt, store);
            }
        }
        ViewMode::List => {
            for prompt in prompts {
                row(prompt, store);
            }
        }
    }
    println!(
        "{}",
        style(format!("{} prompt(s)", prompts.len())).dim()
    );
}

fn card(prompt: &Prompt, store: &FileStore) {
    println!(
        "{}  {}",
        style(&prompt.title).bold(),
        style(short_id(&prompt.id)).dim()
    );
    let mut meta = vec![format!(
        "{} chars, {} words",
        prompt.content_length, prompt.word_count
    )];
    if let Some(name) = folder_name(store, prompt) {
        meta.push(format!("in {name}"));
    }
    let tags = tag_names(store, prompt);
    if !tags.is_empty() {
        meta.push(tags.join(", "));
    }
    meta.push(format_relative(prompt.updated_at));
    println!("  {}", style(meta.join(" · ")).dim());
    if let Some(line) = prompt.content.lines().next() {
        println!("  {}", truncate(line, 72));
    }
    println!();
}

fn row(prompt: &Prompt, store: &FileStore) {
    let folder = folder_name(store, prompt).unwrap_or_default();
    println!(
        "{}  {:<30}  {:<15}  {}",
        style(short_id(&prompt.id)).dim(),
        truncate(&prompt.title, 30),
        truncate(&folder, 15),
        style(format_relative(prompt.updated_at)).dim()
    );
}

pub fn prompt_detail(prompt: &Prompt, store: &FileStore) {
    println!("{}", style(&prompt.title).bold());
    println!("{} {}", style("id:").dim(), prompt.id);
    if let Some(name) = folder_name(store, prompt) {
        println!("{} {}", style("folder:").dim(), name);
    }
    let tags = tag_names(store, prompt);
    if !tags.is_empty() {
        println!("{} {}", style("tags:").dim(), tags.join(", "));
    }
    println!(
        "{} {} chars, {} words",
        style("length:").dim(),
        prompt.content_length,
        prompt.word_count
    );
    println!(
        "{} {}",
        style("created:").dim(),
        format_absolute(prompt.created_at)
    );
    println!(
        "{} {} ({})",
        style("updated:").dim(),
        format_absolute(prompt.updated_at),
        format_relative(prompt.updated_at)
    );
    println!();
    println!("{}", prompt.content);
}

pub fn folder_list(store: &FileStore) {
    if store.folders().is_empty() {
        println!("{}", style("No folders.").dim());
        return;
    }
    for folder in store.folders() {
        let count = store
            .prompts()
            .iter()
            .filter(|p| p.folder_id.as_deref() == Some(folder.id.as_str()))
            .count();
        println!(
            "{}  {:<24}  {}",
            style(short_id(&folder.id)).dim(),
            folder.name,
            style(format!("{count} prompt(s)")).dim()
        );
    }
}

pub fn tag_list(store: &FileStore) {
    if store.tags().is_empty() {
        println!("{}", style("No tags.").dim());
        return;
    }
    for tag in store.tags() {
        let count = store
            .prompts()
            .iter()
            .filter(|p| p.tags.iter().any(|t| t == &tag.id))
            .count();
        let color = tag.color.as_deref().unwrap_or("-");
        println!(
            "{}  {:<20}  {:<10}  {}",
            style(short_id(&tag.id)).dim(),
            tag.name,
            color,
            style(format!("{count} prompt(s)")).dim()
        );
    }
}

pub fn settings(settings: &Settings) {
    let theme = match settings.theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
        Theme::System => "system",
    };
    println!("theme = {theme}");
    println!(
        "default-folder = {}",
        settings.default_folder.as_deref().unwrap_or("none")
    );
    let url = if settings.feishu.webhook_url.is_empty() {
        "(unset)".to_string()
    } else {
        settings.feishu.webhook_url.clone()
    };
    println!("feishu.url = {url}");
    println!("feishu.enabled = {}", settings.feishu.enabled);
    println!(
        "feishu.format = {}",
        match settings.feishu.message_format {
            promptpadapp::model::MessageFormat::Markdown => "markdown",
            promptpadapp::model::MessageFormat::Card => "card",
        }
    );
}

/// First eight characters of an entity id, enough to be unambiguous in
/// practice and accepted back as a prefix reference.
pub(crate) fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

fn folder_name(store: &FileStore, prompt: &Prompt) -> Option<String> {
    prompt
        .folder_id
        .as_deref()
        .and_then(|id| store.folder(id))
        .map(|f| f.name.clone())
}

fn tag_names(store: &FileStore, prompt: &Prompt) -> Vec<String> {
    prompt
        .tags
        .iter()
        .filter_map(|id| store.tag(id))
        .map(|t| format!("#{}", t.name))
        .collect()
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    format!("{cut}…")
}
