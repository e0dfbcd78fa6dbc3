use crate::clipboard::CopyOutcome;
use crate::config::VdConfig;
use crate::model::CatalogEntry;

pub mod config;
pub mod copy;
pub mod link;
pub mod search;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed: Vec<CatalogEntry>,
    pub share_link: Option<String>,
    pub copied: Option<CopyOutcome>,
    pub config: Option<VdConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, entries: Vec<CatalogEntry>) -> Self {
        self.listed = entries;
        self
    }

    pub fn with_share_link(mut self, link: String) -> Self {
        self.share_link = Some(link);
        self
    }

    pub fn with_copied(mut self, outcome: CopyOutcome) -> Self {
        self.copied = Some(outcome);
        self
    }

    pub fn with_config(mut self, config: VdConfig) -> Self {
        self.config = Some(config);
        self
    }
}
