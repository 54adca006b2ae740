pub mod entry;
pub mod query;
pub mod rank;

pub use crate::entry::{Entry, EntryAction, EntryContext, Icon};
pub use crate::query::Query;

/// Capabilities the hosting shell exposes to the picker.
///
/// The picker core never references a concrete launcher or UI framework;
/// everything it may ask of its surroundings goes through this trait.
pub trait Host {
    /// Replace the displayed query text.
    fn change_query(&mut self, query: &str);

    /// Place text on the system clipboard.
    fn write_clipboard(&mut self, text: &str) -> anyhow::Result<()>;

    /// Show the given entries to the user.
    fn present(&mut self, entries: &[Entry]);
}
