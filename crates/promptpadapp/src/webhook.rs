//! # Webhook Notifier
//!
//! Fire-and-forget delivery of prompt change notifications to a
//! Feishu-compatible bot webhook. Everything here is stateless: the config
//! is an explicit parameter on every call, never a cached instance.
//!
//! Message building is pure and separated from delivery so the shapes can
//! be tested without a network. Two formats exist:
//!
//! - `markdown`: a plain-text summary with a 200-character content preview
//! - `card`: a structured post message with a 300-character preview
//!
//! Delivery succeeds only on a 2xx response whose JSON body carries
//! `code == 0`. Every other outcome (network error, non-2xx status, missing
//! or non-zero code) is a boolean failure. Nothing in this module panics or
//! unwinds into the store: failures are logged and surfaced as values.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PromptpadError, Result};
use crate::model::{FeishuConfig, MessageFormat, Prompt};
use crate::util::format_absolute;

const TEXT_PREVIEW_CHARS: usize = 200;
const CARD_PREVIEW_CHARS: usize = 300;

/// What happened to the prompt being announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Created,
    Updated,
}

impl PromptAction {
    fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Created => "✨",
            Self::Updated => "🔄",
        }
    }
}

/// Wire shape of an outbound bot message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    pub msg_type: &'static str,
    pub content: MessageContent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostContent {
    pub zh_cn: PostBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostBody {
    pub title: String,
    pub content: Vec<Vec<PostNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostNode {
    pub tag: &'static str,
    pub text: String,
}

impl PostNode {
    fn text(text: impl Into<String>) -> Self {
        Self {
            tag: "text",
            text: text.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WebhookResponse {
    code: Option<i64>,
}

/// Build the notification message for a prompt change in the configured
/// format.
pub fn build_message(
    config: &FeishuConfig,
    prompt: &Prompt,
    action: PromptAction,
) -> WebhookMessage {
    match config.message_format {
        MessageFormat::Markdown => build_text_message(prompt, action),
        MessageFormat::Card => build_card_message(prompt, action),
    }
}

fn build_text_message(prompt: &Prompt, action: PromptAction) -> WebhookMessage {
    let text = [
        format!("📝 Prompt {}", action.label()),
        String::new(),
        format!("Title: {}", prompt.title),
        format!(
            "Length: {} chars / {} words",
            prompt.content_length, prompt.word_count
        ),
        format!("Updated: {}", format_absolute(prompt.updated_at)),
        String::new(),
        "Preview:".to_string(),
        preview(&prompt.content, TEXT_PREVIEW_CHARS),
    ]
    .join("\n");

    WebhookMessage {
        msg_type: "text",
        content: MessageContent {
            text: Some(text),
            post: None,
        },
    }
}

fn build_card_message(prompt: &Prompt, action: PromptAction) -> WebhookMessage {
    let rows = vec![
        vec![PostNode::text(format!("Title: {}", prompt.title))],
        vec![PostNode::text(format!(
            "Length: {} chars / {} words",
            prompt.content_length, prompt.word_count
        ))],
        vec![PostNode::text(format!(
            "Updated: {}",
            format_absolute(prompt.updated_at)
        ))],
        vec![PostNode::text("Preview:")],
        vec![PostNode::text(preview(&prompt.content, CARD_PREVIEW_CHARS))],
    ];

    WebhookMessage {
        msg_type: "post",
        content: MessageContent {
            text: None,
            post: Some(PostContent {
                zh_cn: PostBody {
                    title: format!("{} Prompt {}", action.icon(), action.label()),
                    content: rows,
                },
            }),
        },
    }
}

fn preview(content: &str, limit: usize) -> String {
    if content.chars().count() <= limit {
        return content.to_string();
    }
    let truncated: String = content.chars().take(limit).collect();
    format!("{}...", truncated)
}

/// Announce a prompt change. Returns `true` only on confirmed delivery.
/// Disabled config or a missing URL short-circuits to `false` without any
/// network traffic.
pub fn send_prompt_notification(
    config: &FeishuConfig,
    prompt: &Prompt,
    action: PromptAction,
) -> bool {
    if !config.enabled || config.webhook_url.is_empty() {
        return false;
    }
    let message = build_message(config, prompt, action);
    post_message(&config.webhook_url, &message)
}

/// Send a fixed confirmation message to verify the webhook configuration.
pub fn test_connection(config: &FeishuConfig) -> Result<()> {
    if config.webhook_url.is_empty() {
        return Err(PromptpadError::Webhook(
            "no webhook URL configured".to_string(),
        ));
    }

    let message = WebhookMessage {
        msg_type: "text",
        content: MessageContent {
            text: Some("🔔 promptpad webhook connection test successful!".to_string()),
            post: None,
        },
    };

    if post_message(&config.webhook_url, &message) {
        Ok(())
    } else {
        Err(PromptpadError::Webhook("delivery failed".to_string()))
    }
}

fn post_message(url: &str, message: &WebhookMessage) -> bool {
    match try_post(url, message) {
        Ok(true) => {
            debug!(url, "webhook delivered");
            true
        }
        Ok(false) => {
            warn!(url, "webhook endpoint rejected the message");
            false
        }
        Err(e) => {
            warn!(url, error = %e, "webhook delivery failed");
            false
        }
    }
}

fn try_post(url: &str, message: &WebhookMessage) -> Result<bool> {
    let client = reqwest::blocking::Client::new();
    let response = client
        .post(url)
        .json(message)
        .send()
        .map_err(|e| PromptpadError::Webhook(e.to_string()))?;

    if !response.status().is_success() {
        return Ok(false);
    }

    let body: WebhookResponse = response
        .json()
        .map_err(|e| PromptpadError::Webhook(e.to_string()))?;

    // The bot API reports success as { "code": 0 }; anything else, including
    // a missing code, is a rejection.
    Ok(body.code == Some(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewPrompt;

    fn prompt_with_content(content: &str) -> Prompt {
        Prompt::new(NewPrompt {
            title: "Sample".to_string(),
            content: content.to_string(),
            ..Default::default()
        })
    }

    fn config(format: MessageFormat) -> FeishuConfig {
        FeishuConfig {
            webhook_url: "https://example.invalid/hook".to_string(),
            enabled: true,
            message_format: format,
        }
    }

    #[test]
    fn test_text_message_shape() {
        let prompt = prompt_with_content("short body");
        let msg = build_message(&config(MessageFormat::Markdown), &prompt, PromptAction::Created);

        assert_eq!(msg.msg_type, "text");
        assert!(msg.content.post.is_none());
        let text = msg.content.text.unwrap();
        assert!(text.contains("Prompt created"));
        assert!(text.contains("Title: Sample"));
        assert!(text.contains("10 chars / 2 words"));
        assert!(text.contains("short body"));
    }

    #[test]
    fn test_card_message_shape() {
        let prompt = prompt_with_content("short body");
        let msg = build_message(&config(MessageFormat::Card), &prompt, PromptAction::Updated);

        assert_eq!(msg.msg_type, "post");
        assert!(msg.content.text.is_none());
        let post = msg.content.post.unwrap();
        assert_eq!(post.zh_cn.title, "🔄 Prompt updated");
        assert_eq!(post.zh_cn.content.len(), 5);
        assert_eq!(post.zh_cn.content[0][0].text, "Title: Sample");
    }

    #[test]
    fn test_text_preview_truncates_at_200() {
        let long = "x".repeat(500);
        let prompt = prompt_with_content(&long);
        let msg = build_text_message(&prompt, PromptAction::Created);

        let text = msg.content.text.unwrap();
        let preview_line = text.lines().last().unwrap();
        assert_eq!(preview_line.chars().count(), 203);
        assert!(preview_line.ends_with("..."));
    }

    #[test]
    fn test_card_preview_truncates_at_300() {
        let long = "y".repeat(500);
        let prompt = prompt_with_content(&long);
        let msg = build_card_message(&prompt, PromptAction::Created);

        let preview_text = &msg.content.post.unwrap().zh_cn.content[4][0].text;
        assert_eq!(preview_text.chars().count(), 303);
        assert!(preview_text.ends_with("..."));
    }

    #[test]
    fn test_short_content_not_truncated() {
        assert_eq!(preview("abc", 200), "abc");
        let exactly = "z".repeat(200);
        assert_eq!(preview(&exactly, 200), exactly);
    }

    #[test]
    fn test_disabled_config_skips_delivery() {
        let prompt = prompt_with_content("body");
        let mut cfg = config(MessageFormat::Markdown);
        cfg.enabled = false;

        assert!(!send_prompt_notification(&cfg, &prompt, PromptAction::Created));
    }

    #[test]
    fn test_empty_url_skips_delivery() {
        let prompt = prompt_with_content("body");
        let mut cfg = config(MessageFormat::Markdown);
        cfg.webhook_url = String::new();

        assert!(!send_prompt_notification(&cfg, &prompt, PromptAction::Updated));
    }

    #[test]
    fn test_connection_test_requires_url() {
        let cfg = FeishuConfig::default();
        assert!(test_connection(&cfg).is_err());
    }

    #[test]
    fn test_message_serializes_without_nulls() {
        let prompt = prompt_with_content("body");
        let msg = build_text_message(&prompt, PromptAction::Created);
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(value["msg_type"], "text");
        assert!(value["content"].get("post").is_none());
    }
}
