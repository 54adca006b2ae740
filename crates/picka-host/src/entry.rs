/// Icon shown beside a presented entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Icon {
    #[default]
    Main,
    Warning,
}

/// Follow-up behavior attached to a presented entry.
///
/// The launcher world attaches closures to its results; here the follow-up
/// is plain data the plugin interprets against the store and the [`Host`]
/// capabilities when the entry is activated.
///
/// [`Host`]: crate::Host
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntryAction {
    #[default]
    None,
    /// Replace the displayed query.
    ChangeQuery(String),
    /// Record the definition in history, arm generation and re-issue the
    /// triggering query.
    Generate {
        definition: String,
        raw_query: String,
    },
    /// Put the picked value on the clipboard and restore the query.
    CopyValue {
        value: String,
        restore_query: String,
    },
    /// Save the definition into favorites (skipped when already present).
    AddFavorite { definition: String },
    /// Drop the definition from favorites and restore the query.
    RemoveFavorite {
        definition: String,
        restore_query: String,
    },
}

/// Which stored list an entry was built from; drives its context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContext {
    History {
        definition: String,
    },
    Favorite {
        definition: String,
        raw_query: String,
    },
}

/// One presented result row.
#[derive(Debug, Clone, Default)]
pub struct Entry {
    /// Text the shell would place in the query box for this entry.
    pub query_text: String,
    pub title: String,
    pub subtitle: String,
    pub icon: Icon,
    /// Relevance score, higher sorts first. [`rank::lock_order`] overwrites
    /// it to pin the presentation order.
    ///
    /// [`rank::lock_order`]: crate::rank::lock_order
    pub score: i64,
    /// Usage counter an external ranker bumps per selection.
    pub selected_count: u32,
    pub action: EntryAction,
    pub context: Option<EntryContext>,
}

impl Entry {
    /// A warning row: no action, warning icon.
    pub fn warning(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            icon: Icon::Warning,
            ..Self::default()
        }
    }
}
