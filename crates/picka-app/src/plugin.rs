use rand::Rng;
use rand::rngs::ThreadRng;

use picka_core::{PickRequest, parse_definition, sample};
use picka_host::rank::lock_order;
use picka_host::{Entry, EntryAction, EntryContext, Host, Icon, Query};
use picka_store::Store;

/// Menu keywords routed on the first query term.
pub mod menu {
    pub const PICK: &str = "pick";
    pub const FAVORITES: &str = "favorites";
    pub const HISTORY: &str = "history";
}

const REQUEST_FORMAT: &str = "Right format: <RandomDefinition>[ <ResultCount>[ <MaxRepCount>]]\n\
                              Where <RandomDefinition> is: <item>[:weight][;<item>[:weight][...]]";

/// The picker plugin: routes queries to the pick/history/favorites menus and
/// interprets entry activations against the store and the host.
pub struct Plugin<R: Rng = ThreadRng> {
    store: Store,
    rng: R,
    /// Armed by the "Generate Random..." entry; stays true for exactly the
    /// one query that entry re-issues.
    generate_in_next_query: bool,
    /// Number of generations so far. Shown to the user so a re-draw that
    /// happens to repeat the previous result is still visibly fresh.
    generation_counter: u64,
}

impl Plugin {
    pub fn new(store: Store) -> Self {
        Self::with_rng(store, rand::thread_rng())
    }
}

impl<R: Rng> Plugin<R> {
    /// Plugin with a caller-supplied randomness source (seeded in tests).
    pub fn with_rng(store: Store, rng: R) -> Self {
        Self {
            store,
            rng,
            generate_in_next_query: false,
            generation_counter: 0,
        }
    }

    /// Builds the entries for one keystroke worth of query.
    pub fn handle_query(&mut self, query: &Query) -> Vec<Entry> {
        match query.term(0) {
            Some(menu::PICK) => self.pick(query),
            Some(menu::HISTORY) => self.history(query),
            Some(menu::FAVORITES) => self.favorites(query),
            _ => self.root_menu(query),
        }
    }

    /// Applies an entry's follow-up action against the store and the host.
    ///
    /// Persistence failures are logged and swallowed here: the in-memory
    /// mutation has already happened and the session keeps working.
    pub fn activate(&mut self, entry: &Entry, host: &mut dyn Host) {
        match &entry.action {
            EntryAction::None => {}
            EntryAction::ChangeQuery(query) => host.change_query(query),
            EntryAction::Generate {
                definition,
                raw_query,
            } => {
                if let Err(error) = self.store.add_history(definition) {
                    tracing::warn!("history not persisted: {error}");
                }
                host.change_query(raw_query);
                self.generate_in_next_query = true;
            }
            EntryAction::CopyValue {
                value,
                restore_query,
            } => {
                host.change_query(restore_query);
                if let Err(error) = host.write_clipboard(value) {
                    tracing::warn!("clipboard write failed: {error}");
                }
            }
            EntryAction::AddFavorite { definition } => {
                if let Err(error) = self.store.add_favorite(definition) {
                    tracing::warn!("favorite not persisted: {error}");
                }
            }
            EntryAction::RemoveFavorite {
                definition,
                restore_query,
            } => {
                if let Err(error) = self.store.remove_favorite(definition) {
                    tracing::warn!("favorite removal not persisted: {error}");
                }
                host.change_query(restore_query);
            }
        }
    }

    /// Context menu for a presented entry, derived from the list it came
    /// from. Entries without context have no menu.
    pub fn context_menu(&self, entry: &Entry) -> Vec<Entry> {
        match &entry.context {
            Some(EntryContext::History { definition }) => vec![Entry {
                title: "Add to Favorites (Ctrl+F)".to_string(),
                action: EntryAction::AddFavorite {
                    definition: definition.clone(),
                },
                ..Entry::default()
            }],
            Some(EntryContext::Favorite {
                definition,
                raw_query,
            }) => vec![Entry {
                title: "Delete from Favorites (Ctrl+D)".to_string(),
                action: EntryAction::RemoveFavorite {
                    definition: definition.clone(),
                    restore_query: raw_query.clone(),
                },
                ..Entry::default()
            }],
            None => Vec::new(),
        }
    }

    /// Generates the entries for the item picking menu.
    ///
    /// User input format: `<RandomDefinition>[ <ResultCount>[ <MaxRepCount>]]`,
    /// e.g. `item1;item2:2;item3:8 2 2` (excluding parent menus).
    fn pick(&mut self, query: &Query) -> Vec<Entry> {
        let generate = std::mem::take(&mut self.generate_in_next_query);

        let definition_input = query.terms[1..].join(" ");
        let request = match PickRequest::parse(&definition_input) {
            Ok(request) => request,
            Err(error) => {
                return vec![Entry::warning(
                    format!("Bad format: {error}"),
                    REQUEST_FORMAT,
                )];
            }
        };

        if generate {
            // Only counts actual generations, not definition keystrokes.
            self.generation_counter += 1;
        }

        let mut entries = vec![Entry {
            title: "Generate Random...".to_string(),
            subtitle: format!("Generation counter: {}", self.generation_counter),
            icon: Icon::Main,
            action: EntryAction::Generate {
                definition: request.definition.clone(),
                raw_query: query.raw_query.clone(),
            },
            ..Entry::default()
        }];

        if !generate {
            // Still typing the definition; draws happen on explicit trigger.
            return entries;
        }

        match self.draw(&request) {
            Ok(values) => {
                tracing::debug!(
                    "generation {} drew {} of {} requested",
                    self.generation_counter,
                    values.len(),
                    request.result_count
                );
                entries.extend(values.into_iter().map(|value| Entry {
                    title: value.clone(),
                    icon: Icon::Main,
                    action: EntryAction::CopyValue {
                        value,
                        restore_query: query.raw_query.clone(),
                    },
                    ..Entry::default()
                }));
            }
            Err(error) => entries.push(Entry::warning(error.to_string(), "")),
        }

        lock_order(&mut entries);
        entries
    }

    fn draw(&mut self, request: &PickRequest) -> anyhow::Result<Vec<String>> {
        let items = parse_definition(&request.definition)?;
        Ok(sample(
            &items,
            request.result_count,
            request.max_repeat,
            &mut self.rng,
        )?)
    }

    fn history(&self, query: &Query) -> Vec<Entry> {
        let search = search_after(query, menu::HISTORY);
        let mut entries: Vec<Entry> = self
            .store
            .history(None)
            .enumerate()
            // Filtering happens after numbering: indices always refer to the
            // full history, filtered or not.
            .filter(|(_, definition)| definition.contains(search))
            .map(|(index, definition)| Entry {
                query_text: query.search.clone(),
                title: format!("{index}: {definition}"),
                icon: Icon::Main,
                action: EntryAction::ChangeQuery(recall_query(query, definition)),
                context: Some(EntryContext::History {
                    definition: definition.to_string(),
                }),
                ..Entry::default()
            })
            .collect();

        if entries.is_empty() {
            return vec![Entry {
                query_text: query.search.clone(),
                ..Entry::warning("No history result", "")
            }];
        }
        lock_order(&mut entries);
        entries
    }

    fn favorites(&self, query: &Query) -> Vec<Entry> {
        let search = search_after(query, menu::FAVORITES);
        let mut entries: Vec<Entry> = self
            .store
            .favorites(Some(search))
            .map(|definition| Entry {
                query_text: query.search.clone(),
                title: definition.to_string(),
                icon: Icon::Main,
                action: EntryAction::ChangeQuery(recall_query(query, definition)),
                context: Some(EntryContext::Favorite {
                    definition: definition.to_string(),
                    raw_query: query.raw_query.clone(),
                }),
                ..Entry::default()
            })
            .collect();

        if entries.is_empty() {
            return vec![Entry {
                query_text: query.search.clone(),
                ..Entry::warning("No favorite result", "")
            }];
        }
        lock_order(&mut entries);
        entries
    }

    /// Top-level navigation menu: the three submenus as auto-completing
    /// entries, narrowed by a partially typed term.
    fn root_menu(&self, query: &Query) -> Vec<Entry> {
        let options = [
            (menu::PICK, "Provide a random definition"),
            (menu::FAVORITES, "Select a saved random definition"),
            (menu::HISTORY, "Select a previously used random definition"),
        ];
        let entries = navigation_menu(query, &options);
        if entries.is_empty() {
            return vec![Entry::warning("No result", "")];
        }
        entries
    }

    #[cfg(test)]
    fn store(&self) -> &Store {
        &self.store
    }
}

/// Query that recalls `definition` back into the pick menu.
fn recall_query(query: &Query, definition: &str) -> String {
    format!("{} {} {}", query.action_keyword, menu::PICK, definition)
}

/// Search text after the routed menu keyword, e.g. `"abc"` for
/// `history abc`. Empty when nothing was typed; an empty needle matches
/// every entry.
fn search_after<'a>(query: &'a Query, keyword: &str) -> &'a str {
    match query.search.trim_start().strip_prefix(keyword) {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => "",
    }
}

/// Turns fixed menu options into entries whose activation auto-completes the
/// query (a trailing space spares the user from typing it). One partially
/// typed term filters the options; anything deeper yields nothing.
fn navigation_menu(query: &Query, options: &[(&str, &str)]) -> Vec<Entry> {
    if query.terms.len() > 1 {
        return Vec::new();
    }
    let filter = query.term(0).unwrap_or("");
    options
        .iter()
        .filter(|(name, _)| name.contains(filter))
        .map(|(name, subtitle)| Entry {
            query_text: name.to_string(),
            title: name.to_string(),
            subtitle: subtitle.to_string(),
            icon: Icon::Main,
            action: EntryAction::ChangeQuery(format!("{} {name} ", query.action_keyword)),
            ..Entry::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    use picka_store::JsonStorage;

    use super::*;

    const KEYWORD: &str = "rnd";

    struct FakeHost {
        pending_query: Option<String>,
        clipboard: Vec<String>,
    }

    impl FakeHost {
        fn new() -> Self {
            Self {
                pending_query: None,
                clipboard: Vec::new(),
            }
        }
    }

    impl Host for FakeHost {
        fn change_query(&mut self, query: &str) {
            self.pending_query = Some(query.to_string());
        }

        fn write_clipboard(&mut self, text: &str) -> anyhow::Result<()> {
            self.clipboard.push(text.to_string());
            Ok(())
        }

        fn present(&mut self, _entries: &[Entry]) {}
    }

    fn plugin(dir: &TempDir) -> Plugin<StdRng> {
        let store = Store::open(JsonStorage::new(dir.path().join("store.json")));
        Plugin::with_rng(store, StdRng::seed_from_u64(7))
    }

    fn query(search: &str) -> Query {
        Query::new(KEYWORD, search)
    }

    /// Runs the full two-phase generate flow and returns the second-phase
    /// entries.
    fn generate(plugin: &mut Plugin<StdRng>, host: &mut FakeHost, search: &str) -> Vec<Entry> {
        let entries = plugin.handle_query(&query(search));
        plugin.activate(&entries[0], host);
        let raw = host.pending_query.take().expect("generate re-issues the query");
        plugin.handle_query(&Query::from_raw(KEYWORD, &raw))
    }

    #[test]
    fn root_menu_lists_the_three_submenus() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);

        let entries = plugin.handle_query(&query(""));
        let titles: Vec<&str> = entries.iter().map(|entry| entry.title.as_str()).collect();
        assert_eq!(titles, vec!["pick", "favorites", "history"]);
    }

    #[test]
    fn root_menu_filters_on_a_partial_term() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);

        let entries = plugin.handle_query(&query("fav"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "favorites");
        assert_eq!(
            entries[0].action,
            EntryAction::ChangeQuery("rnd favorites ".to_string())
        );
    }

    #[test]
    fn unmatched_root_input_warns() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);

        let entries = plugin.handle_query(&query("bogus words"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].icon, Icon::Warning);
        assert_eq!(entries[0].title, "No result");
    }

    #[test]
    fn typing_a_definition_only_offers_the_trigger() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);

        let entries = plugin.handle_query(&query("pick a;b:2"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Generate Random...");
        assert!(plugin.store().history(None).next().is_none());
    }

    #[test]
    fn generating_records_history_and_draws() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);
        let mut host = FakeHost::new();

        let entries = generate(&mut plugin, &mut host, "pick a;b 3");

        // Header plus three draws, order locked.
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].subtitle, "Generation counter: 1");
        assert_eq!(entries[0].score, 40_000);
        assert_eq!(entries[3].score, 10_000);
        for entry in &entries[1..] {
            assert!(["a", "b"].contains(&entry.title.as_str()));
        }
        assert_eq!(
            plugin.store().history(None).collect::<Vec<_>>(),
            vec!["a;b"]
        );
    }

    #[test]
    fn generation_counter_increments_per_generation() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);
        let mut host = FakeHost::new();

        generate(&mut plugin, &mut host, "pick a");
        let entries = generate(&mut plugin, &mut host, "pick a");
        assert_eq!(entries[0].subtitle, "Generation counter: 2");
    }

    #[test]
    fn generation_flag_lasts_a_single_query() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);
        let mut host = FakeHost::new();

        let entries = generate(&mut plugin, &mut host, "pick a;b");
        assert!(entries.len() > 1);

        // The next keystroke is back to the typing phase.
        let entries = plugin.handle_query(&query("pick a;b"));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn picking_copies_to_clipboard_and_restores_the_query() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);
        let mut host = FakeHost::new();

        let entries = generate(&mut plugin, &mut host, "pick winner 1");
        plugin.activate(&entries[1], &mut host);

        assert_eq!(host.clipboard, vec!["winner"]);
        assert_eq!(host.pending_query.as_deref(), Some("rnd pick winner 1"));
    }

    #[test]
    fn bad_format_warns_without_erasing_the_menu() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);

        let entries = plugin.handle_query(&query("pick "));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].icon, Icon::Warning);
        assert!(entries[0].title.starts_with("Bad format:"));
    }

    #[test]
    fn unselectable_definition_warns() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);
        let mut host = FakeHost::new();

        let entries = generate(&mut plugin, &mut host, "pick a:0;b:0");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].icon, Icon::Warning);
        assert!(entries[1].title.contains("total weight is zero"));
    }

    #[test]
    fn history_menu_keeps_unfiltered_indices() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);
        let mut host = FakeHost::new();

        for definition in ["aa", "bb", "ab"] {
            generate(&mut plugin, &mut host, &format!("pick {definition}"));
        }

        // Newest first: ab=0, bb=1, aa=2; filter "a" skips bb but keeps the
        // numbering.
        let entries = plugin.handle_query(&query("history a"));
        let titles: Vec<&str> = entries.iter().map(|entry| entry.title.as_str()).collect();
        assert_eq!(titles, vec!["0: ab", "2: aa"]);
    }

    #[test]
    fn history_entry_recalls_the_definition() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);
        let mut host = FakeHost::new();

        generate(&mut plugin, &mut host, "pick a;b 2");
        let entries = plugin.handle_query(&query("history"));
        assert_eq!(
            entries[0].action,
            EntryAction::ChangeQuery("rnd pick a;b".to_string())
        );
    }

    #[test]
    fn empty_history_warns() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);

        let entries = plugin.handle_query(&query("history"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "No history result");
        assert_eq!(entries[0].icon, Icon::Warning);
    }

    #[test]
    fn history_context_menu_adds_a_favorite() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);
        let mut host = FakeHost::new();

        generate(&mut plugin, &mut host, "pick a;b");
        let entries = plugin.handle_query(&query("history"));
        let menu = plugin.context_menu(&entries[0]);
        assert_eq!(menu.len(), 1);

        plugin.activate(&menu[0], &mut host);
        assert_eq!(
            plugin.store().favorites(None).collect::<Vec<_>>(),
            vec!["a;b"]
        );

        // A second add is skipped.
        plugin.activate(&menu[0], &mut host);
        assert_eq!(plugin.store().favorites(None).count(), 1);
    }

    #[test]
    fn favorite_context_menu_deletes_and_restores_the_query() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);
        let mut host = FakeHost::new();

        generate(&mut plugin, &mut host, "pick a;b");
        let history_entries = plugin.handle_query(&query("history"));
        let menu = plugin.context_menu(&history_entries[0]);
        plugin.activate(&menu[0], &mut host);

        let entries = plugin.handle_query(&query("favorites"));
        assert_eq!(entries[0].title, "a;b");

        let menu = plugin.context_menu(&entries[0]);
        plugin.activate(&menu[0], &mut host);
        assert!(plugin.store().favorites(None).next().is_none());
        assert_eq!(host.pending_query.as_deref(), Some("rnd favorites"));
    }

    #[test]
    fn favorites_filter_by_search_text() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin(&dir);
        let mut host = FakeHost::new();

        for definition in ["tea;coffee", "juice"] {
            generate(&mut plugin, &mut host, &format!("pick {definition}"));
            let entries = plugin.handle_query(&query("history"));
            let menu = plugin.context_menu(&entries[0]);
            plugin.activate(&menu[0], &mut host);
        }

        let entries = plugin.handle_query(&query("favorites tea"));
        let titles: Vec<&str> = entries.iter().map(|entry| entry.title.as_str()).collect();
        assert_eq!(titles, vec!["tea;coffee"]);

        let entries = plugin.handle_query(&query("favorites cocoa"));
        assert_eq!(entries[0].title, "No favorite result");
    }
}
