use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::config::Config;

/// Message categories used by the shell output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputPreferences {
    pub screen_reader_mode: bool,
    pub high_contrast_mode: bool,
}

impl From<&Config> for OutputPreferences {
    fn from(config: &Config) -> Self {
        Self {
            screen_reader_mode: config.screen_reader_mode,
            high_contrast_mode: config.high_contrast_mode,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "",
        MessageKind::Success => "OK:",
        MessageKind::Warning => "WARNING:",
        MessageKind::Error => "ERROR:",
        MessageKind::Hint => "HINT:",
        MessageKind::Section => "",
    }
}

/// Builds the styled line for `message`; kept separate from printing for tests.
pub fn format_message(
    kind: MessageKind,
    message: impl fmt::Display,
    prefs: &OutputPreferences,
) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => match label(kind) {
            "" => text,
            label => format!("{label} {text}"),
        },
    };

    if prefs.screen_reader_mode {
        return formatted;
    }

    if prefs.high_contrast_mode {
        return match kind {
            MessageKind::Success
            | MessageKind::Warning
            | MessageKind::Error
            | MessageKind::Section => formatted.bold().to_string(),
            _ => formatted,
        };
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Hint => formatted.bright_cyan().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = format_message(kind, message, &preferences());
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Unstyled text such as listings, where alignment matters.
pub fn plain(text: impl fmt::Display) {
    println!("{text}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_reader_mode_skips_colour() {
        let prefs = OutputPreferences {
            screen_reader_mode: true,
            high_contrast_mode: false,
        };
        assert_eq!(
            format_message(MessageKind::Error, "boom", &prefs),
            "ERROR: boom"
        );
        assert_eq!(format_message(MessageKind::Info, "plain", &prefs), "plain");
        assert_eq!(
            format_message(MessageKind::Section, " Commands ", &prefs),
            "=== Commands ==="
        );
    }

    #[test]
    fn styled_messages_keep_their_text() {
        let prefs = OutputPreferences::default();
        let line = format_message(MessageKind::Warning, "careful", &prefs);
        assert!(line.contains("WARNING: careful"));
    }
}
