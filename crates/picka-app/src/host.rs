use anyhow::Context;
use arboard::Clipboard;

use picka_host::{Entry, Host, Icon};

/// Terminal stand-in for a launcher shell: actions queue query swaps instead
/// of retyping, and clipboard writes hit the real system clipboard.
pub struct TerminalHost {
    clipboard: Option<Clipboard>,
    pending_query: Option<String>,
}

impl TerminalHost {
    pub fn new() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(error) => {
                // Headless sessions have no clipboard; everything else works.
                tracing::warn!("clipboard unavailable: {error}");
                None
            }
        };
        Self {
            clipboard,
            pending_query: None,
        }
    }

    /// Takes the query a previous action asked to display.
    pub fn take_pending_query(&mut self) -> Option<String> {
        self.pending_query.take()
    }
}

impl Host for TerminalHost {
    fn change_query(&mut self, query: &str) {
        self.pending_query = Some(query.to_string());
    }

    fn write_clipboard(&mut self, text: &str) -> anyhow::Result<()> {
        let clipboard = self
            .clipboard
            .as_mut()
            .context("clipboard unavailable")?;
        clipboard.set_text(text.to_string())?;
        println!("(copied '{text}' to clipboard)");
        Ok(())
    }

    fn present(&mut self, entries: &[Entry]) {
        for (index, entry) in entries.iter().enumerate() {
            let marker = match entry.icon {
                Icon::Main => ' ',
                Icon::Warning => '!',
            };
            if entry.subtitle.is_empty() {
                println!("{marker}[{index}] {}", entry.title);
            } else {
                println!("{marker}[{index}] {} | {}", entry.title, entry.subtitle);
            }
        }
    }
}
