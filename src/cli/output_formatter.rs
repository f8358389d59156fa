use colored::*;
use std::io::IsTerminal;

use crate::utils::config::ColorChoice;
use crate::utils::error::KcError;

/// Role of a piece of text in the output, mapped to a colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Heading,
    Value,
    Info,
    Error,
}

/// Decides whether output gets ANSI decoration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn colored() -> Self {
        Self { enabled: true }
    }

    /// Resolve the configured choice against the current stdout
    pub fn detect(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Always => {
                colored::control::set_override(true);
                Self::colored()
            }
            ColorChoice::Never => {
                colored::control::set_override(false);
                Self::plain()
            }
            ColorChoice::Auto => {
                let enabled = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
                Self { enabled }
            }
        }
    }

    /// Colour status lines only when stderr is a terminal
    pub fn for_stderr() -> Self {
        let enabled = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wrap `text` in the colour for `accent`; identity when disabled
    pub fn decorate(&self, text: &str, accent: Accent) -> String {
        if !self.enabled {
            return text.to_string();
        }

        match accent {
            Accent::Heading => text.blue().to_string(),
            Accent::Value => text.green().to_string(),
            Accent::Info => text.blue().bold().to_string(),
            Accent::Error => text.red().bold().to_string(),
        }
    }
}

/// Formats status lines for CLI output
pub struct OutputFormatter;

impl OutputFormatter {
    /// Format error message for CLI display
    pub fn format_error(error: &KcError, palette: Palette) -> String {
        format!("{} {}", palette.decorate("Error:", Accent::Error), error)
    }

    /// Format info message for CLI display
    pub fn format_info(message: &str, palette: Palette) -> String {
        format!("{} {}", palette.decorate("Info:", Accent::Info), message)
    }
}
