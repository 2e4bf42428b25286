use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptpadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Webhook error: {0}")]
    Webhook(String),
}

pub type Result<T> = std::result::Result<T, PromptpadError>;
