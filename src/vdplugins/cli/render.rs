use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vdplugins::api::{CmdMessage, MessageLevel};
use vdplugins::config::{VdConfig, CONFIG_KEYS};
use vdplugins::model::CatalogEntry;

pub(super) const LINE_WIDTH: usize = 100;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One card per plugin: name and authors, the description, then the link.
pub(super) fn print_entries(entries: &[CatalogEntry]) {
    if entries.is_empty() {
        println!("{}", "No plugins found.".dimmed());
        return;
    }

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let by = format!("by {}", entry.author_names());
        let padding = LINE_WIDTH
            .saturating_sub(entry.name.width() + by.width() + 1)
            .max(1);
        println!("{}{}{}", entry.name.bold(), " ".repeat(padding), by.dimmed());
        if !entry.description.is_empty() {
            println!("  {}", truncate_to_width(&entry.description, LINE_WIDTH - 2));
        }
        println!("  {}", entry.url.cyan());
    }
}

pub(super) fn print_share_link(link: &str) {
    println!("{} {}", "Share:".dimmed(), link.underline());
}

pub(super) fn print_config(config: &VdConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

pub(super) fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Logs messages", 20), "Logs messages");
    }

    #[test]
    fn long_text_gets_ellipsis_within_width() {
        let out = truncate_to_width("abcdefghij", 5);
        assert_eq!(out, "abcd…");
        assert_eq!(out.width(), 5);
    }

    #[test]
    fn wide_chars_count_double() {
        let out = truncate_to_width("日本語テキスト", 6);
        assert_eq!(out, "日本…");
        assert!(out.width() <= 6);
    }
}
